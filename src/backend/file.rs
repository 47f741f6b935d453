//! File-SR backend: VHD/raw files on a mounted storage repository.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{instrument, warn};
use walkdir::WalkDir;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::scan::extract_uuid;
use crate::backend::vhd::{self, DiskType};
use crate::backend::DiskEnumerator;
use crate::config::Settings;
use crate::domain::VdiInfo;

/// Lists the disk images of one mounted file SR (nfs, smb, ext).
///
/// Physical size comes from file metadata; virtual size and parent linkage
/// are read from the VHD metadata itself, so no external tooling is needed.
#[derive(Debug)]
pub struct FileEnumerator {
    sr_path: PathBuf,
}

impl FileEnumerator {
    pub fn new(sr_path: impl Into<PathBuf>) -> Self {
        Self {
            sr_path: sr_path.into(),
        }
    }

    /// Enumerator for the SR with the given uuid under the configured
    /// mount base (`<sr_mount_dir>/<sr-uuid>`).
    pub fn for_sr(settings: &Settings, sr_uuid: &str) -> Self {
        Self::new(settings.sr_mount_dir.join(sr_uuid))
    }

    fn image_files(&self) -> BackendResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.sr_path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| BackendError::io(
                format!("scan {}", self.sr_path.display()),
                e.into(),
            ))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if matches!(
                entry.path().extension().and_then(|e| e.to_str()),
                Some("vhd") | Some("raw")
            ) {
                files.push(entry.into_path());
            }
        }
        // Stable listing across runs (directory order is arbitrary)
        files.sort();
        Ok(files)
    }

    fn read_record(&self, path: &Path) -> BackendResult<Option<VdiInfo>> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let Some(uuid) = extract_uuid(name) else {
            warn!(file = %path.display(), "file name is not a vdi uuid, skipping");
            return Ok(None);
        };

        let size_phys = path
            .metadata()
            .map_err(|e| BackendError::io(format!("stat {}", path.display()), e))?
            .len();

        if path.extension().and_then(|e| e.to_str()) == Some("raw") {
            // Raw images are fully provisioned and never chained
            return Ok(Some(VdiInfo {
                uuid,
                parent_uuid: None,
                size_virt: size_phys,
                size_phys,
            }));
        }

        let meta = vhd::read_meta(path)?;
        if meta.disk_type == DiskType::Differencing && meta.parent_uuid.is_none() {
            warn!(file = %path.display(), "differencing vhd without parent uuid, skipping");
            return Ok(None);
        }

        Ok(Some(VdiInfo {
            uuid,
            parent_uuid: meta.parent_uuid.map(|u| u.to_string()),
            size_virt: meta.current_size,
            size_phys,
        }))
    }
}

impl DiskEnumerator for FileEnumerator {
    #[instrument(level = "debug", skip(self), fields(sr_path = %self.sr_path.display()))]
    fn enumerate(&self) -> BackendResult<IndexMap<String, VdiInfo>> {
        if !self.sr_path.is_dir() {
            return Err(BackendError::MountMissing(self.sr_path.clone()));
        }

        let mut vdis = IndexMap::new();
        for path in self.image_files()? {
            if let Some(vdi) = self.read_record(&path)? {
                vdis.insert(vdi.uuid.clone(), vdi);
            }
        }
        Ok(vdis)
    }
}
