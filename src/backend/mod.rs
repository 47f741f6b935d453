//! Storage backends: VDI enumeration per SR type
//!
//! Backends only produce the flat record mapping; tree construction and
//! rendering stay backend-agnostic in the domain layer.

pub mod error;
pub mod file;
pub mod lvm;
pub mod scan;
pub mod vhd;

use indexmap::IndexMap;

use crate::domain::{to_giga, VdiInfo};

pub use error::{BackendError, BackendResult, VhdError};
pub use file::FileEnumerator;
pub use lvm::LvmEnumerator;
pub use scan::{extract_uuid, parse_scan_output};

/// Storage-repository backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrKind {
    /// VHDs carried on LVM logical volumes
    Lvm,
    /// VHD/raw files on a mounted filesystem
    File,
}

impl SrKind {
    /// Map an SR type string (as reported by the host) to its backend.
    pub fn from_sr_type(sr_type: &str) -> Option<Self> {
        match sr_type {
            "lvm" | "lvmoiscsi" | "lvmohba" | "lvmofcoe" => Some(SrKind::Lvm),
            "nfs" | "smb" | "ext" => Some(SrKind::File),
            _ => None,
        }
    }
}

/// Capability interface: a backend that can list the VDIs of one SR.
///
/// Returns an insertion-ordered mapping of VDI uuid to record; the order is
/// the order trees and children appear in the rendered output.
pub trait DiskEnumerator {
    fn enumerate(&self) -> BackendResult<IndexMap<String, VdiInfo>>;
}

/// Size extraction for backend records: `(physical_gb, virtual_gb)`.
pub fn vdi_sizes(vdi: &VdiInfo) -> (f64, f64) {
    (to_giga(vdi.size_phys), to_giga(vdi.size_virt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GIGA;

    #[test]
    fn given_known_sr_types_when_mapping_then_backend_found() {
        assert_eq!(SrKind::from_sr_type("lvmoiscsi"), Some(SrKind::Lvm));
        assert_eq!(SrKind::from_sr_type("nfs"), Some(SrKind::File));
        assert_eq!(SrKind::from_sr_type("iso"), None);
    }

    #[test]
    fn test_vdi_sizes() {
        let vdi = VdiInfo {
            uuid: "x".to_string(),
            parent_uuid: None,
            size_virt: 10 * GIGA,
            size_phys: GIGA / 2,
        };
        assert_eq!(vdi_sizes(&vdi), (0.5, 10.0));
    }
}
