//! Domain entities: core data structures

/// Bytes per gigabyte (2^30).
pub const GIGA: u64 = 1 << 30;

/// Convert a byte count to gigabytes. Zero stays zero and renders as `?`.
pub fn to_giga(size: u64) -> f64 {
    size as f64 / GIGA as f64
}

/// A disk-image record as seen by the tree builder.
///
/// The builder only needs the identifier and the optional parent identifier;
/// everything else in a record is backend payload, read through an injected
/// size-extraction function at render time.
pub trait DiskImage {
    /// Unique identifier of this image.
    fn identifier(&self) -> &str;

    /// Identifier of the parent image, `None` for a root.
    /// An empty string counts as "no parent".
    fn parent_identifier(&self) -> Option<&str>;
}

/// Size-extraction function injected by the backend: returns
/// `(physical_gb, virtual_gb)` for a record. Zero means "unknown".
pub type SizeExtract<R> = dyn Fn(&R) -> (f64, f64);

/// A VDI as reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdiInfo {
    /// VDI uuid (the tree identifier)
    pub uuid: String,
    /// Parent VDI uuid, `None` for a root image
    pub parent_uuid: Option<String>,
    /// Virtual (provisioned) size in bytes, 0 if unknown
    pub size_virt: u64,
    /// Physical (allocated) size in bytes, 0 if unknown
    pub size_phys: u64,
}

impl DiskImage for VdiInfo {
    fn identifier(&self) -> &str {
        &self.uuid
    }

    fn parent_identifier(&self) -> Option<&str> {
        self.parent_uuid.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_parent_uuid_when_queried_then_treated_as_root() {
        let vdi = VdiInfo {
            uuid: "a".to_string(),
            parent_uuid: Some(String::new()),
            size_virt: 0,
            size_phys: 0,
        };
        assert_eq!(vdi.parent_identifier(), None);
    }

    #[test]
    fn test_to_giga() {
        assert_eq!(to_giga(GIGA), 1.0);
        assert_eq!(to_giga(0), 0.0);
        assert_eq!(to_giga(5 * GIGA + GIGA / 2), 5.5);
    }
}
