//! LVM-SR backend: VHDs carried on logical volumes.
//!
//! LVs on an LVM SR are named `VHD-<vdi-uuid>` inside the volume group
//! `VG_XenStorage-<sr-uuid>`. Chain metadata lives inside the VHD blobs,
//! so enumeration shells out to `vhd-util scan` and parses its report.

use std::process::Command;

use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::scan::parse_scan_output;
use crate::backend::DiskEnumerator;
use crate::config::Settings;
use crate::domain::VdiInfo;

/// Lists the disk images of one LVM-backed SR (lvm, lvmoiscsi, lvmohba,
/// lvmofcoe).
#[derive(Debug)]
pub struct LvmEnumerator {
    vg_name: String,
    vhd_util: String,
}

impl LvmEnumerator {
    pub fn new(vg_name: impl Into<String>, vhd_util: impl Into<String>) -> Self {
        Self {
            vg_name: vg_name.into(),
            vhd_util: vhd_util.into(),
        }
    }

    /// Enumerator for the SR with the given uuid
    /// (`<vg_prefix><sr-uuid>`, normally `VG_XenStorage-<sr-uuid>`).
    pub fn for_sr(settings: &Settings, sr_uuid: &str) -> Self {
        Self::new(
            format!("{}{}", settings.vg_prefix, sr_uuid),
            settings.vhd_util.clone(),
        )
    }
}

impl DiskEnumerator for LvmEnumerator {
    #[instrument(level = "debug", skip(self), fields(vg = %self.vg_name))]
    fn enumerate(&self) -> BackendResult<IndexMap<String, VdiInfo>> {
        let output = Command::new(&self.vhd_util)
            .args(["scan", "-f", "-p", "-m", "VHD-*", "-l", &self.vg_name])
            .output()
            .map_err(|e| BackendError::CommandSpawn {
                program: self.vhd_util.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(BackendError::CommandFailed {
                program: self.vhd_util.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(bytes = stdout.len(), "vhd-util scan completed");
        parse_scan_output(&stdout)
    }
}
