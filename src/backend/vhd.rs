//! Minimal reader for the VHD on-disk format.
//!
//! Reads just enough metadata to place an image in the snapshot forest:
//! the footer (cookie `conectix`) carries the virtual size, disk type and
//! image uuid; for differencing disks the dynamic header (cookie
//! `cxsparse`) carries the parent uuid. All multi-byte fields are
//! big-endian.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::instrument;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult, VhdError};

pub const FOOTER_SIZE: u64 = 512;
pub const DYN_HEADER_SIZE: u64 = 1024;

const FOOTER_COOKIE: &[u8; 8] = b"conectix";
const DYN_HEADER_COOKIE: &[u8; 8] = b"cxsparse";

/// VHD disk type (footer offset 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskType {
    Fixed,
    Dynamic,
    Differencing,
}

impl DiskType {
    fn from_raw(raw: u32) -> Result<Self, VhdError> {
        match raw {
            2 => Ok(DiskType::Fixed),
            3 => Ok(DiskType::Dynamic),
            4 => Ok(DiskType::Differencing),
            other => Err(VhdError::UnknownDiskType(other)),
        }
    }
}

/// Parsed VHD footer fields.
#[derive(Debug, Clone, Copy)]
pub struct Footer {
    /// Offset of the dynamic header (u64::MAX for fixed disks)
    pub data_offset: u64,
    /// Virtual size in bytes
    pub current_size: u64,
    pub disk_type: DiskType,
    pub uuid: Uuid,
}

/// Metadata needed to place one image in the forest.
#[derive(Debug, Clone)]
pub struct VhdMeta {
    pub uuid: Uuid,
    /// Virtual size in bytes
    pub current_size: u64,
    pub disk_type: DiskType,
    /// Parent image uuid, set only for differencing disks
    pub parent_uuid: Option<Uuid>,
}

fn be_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_be_bytes(buf)
}

fn be_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(buf)
}

/// Parse a 512-byte footer block.
///
/// Field offsets: cookie 0, data offset 16, current size 48, disk type 60,
/// uuid 68.
pub fn parse_footer(buf: &[u8]) -> Result<Footer, VhdError> {
    if buf.len() < FOOTER_SIZE as usize {
        return Err(VhdError::Truncated);
    }
    if &buf[0..8] != FOOTER_COOKIE {
        return Err(VhdError::BadFooterCookie);
    }

    Ok(Footer {
        data_offset: be_u64(&buf[16..24]),
        current_size: be_u64(&buf[48..56]),
        disk_type: DiskType::from_raw(be_u32(&buf[60..64]))?,
        uuid: Uuid::from_slice(&buf[68..84]).map_err(|_| VhdError::BadUuid)?,
    })
}

/// Parse a 1024-byte dynamic header block; returns the parent uuid, `None`
/// when the field is zeroed (non-differencing disks).
///
/// Field offsets: cookie 0, parent uuid 40.
pub fn parse_dynamic_header(buf: &[u8]) -> Result<Option<Uuid>, VhdError> {
    if buf.len() < DYN_HEADER_SIZE as usize {
        return Err(VhdError::Truncated);
    }
    if &buf[0..8] != DYN_HEADER_COOKIE {
        return Err(VhdError::BadHeaderCookie);
    }

    let parent = Uuid::from_slice(&buf[40..56]).map_err(|_| VhdError::BadUuid)?;
    Ok((!parent.is_nil()).then_some(parent))
}

/// Read the forest-relevant metadata of a VHD file.
///
/// Reads the footer at the end of the file, falling back to the footer
/// copy at offset 0 (dynamic and differencing disks keep one) when the end
/// footer is damaged. For differencing disks the dynamic header is read to
/// obtain the parent uuid.
#[instrument(level = "debug")]
pub fn read_meta(path: &Path) -> BackendResult<VhdMeta> {
    let invalid = |source: VhdError| BackendError::InvalidVhd {
        path: path.to_path_buf(),
        source,
    };
    let io_err =
        |source: std::io::Error| BackendError::io(format!("read vhd {}", path.display()), source);

    let mut file = File::open(path).map_err(io_err)?;
    let file_len = file.metadata().map_err(io_err)?.len();
    if file_len < FOOTER_SIZE {
        return Err(invalid(VhdError::Truncated));
    }

    let mut buf = [0u8; FOOTER_SIZE as usize];
    file.seek(SeekFrom::End(-(FOOTER_SIZE as i64)))
        .map_err(io_err)?;
    file.read_exact(&mut buf).map_err(io_err)?;

    let footer = match parse_footer(&buf) {
        Ok(footer) => footer,
        Err(VhdError::BadFooterCookie) if file_len >= FOOTER_SIZE + DYN_HEADER_SIZE => {
            // Damaged end footer: sparse disks keep a copy at offset 0
            file.seek(SeekFrom::Start(0)).map_err(io_err)?;
            file.read_exact(&mut buf).map_err(io_err)?;
            parse_footer(&buf).map_err(invalid)?
        }
        Err(e) => return Err(invalid(e)),
    };

    let parent_uuid = if footer.disk_type == DiskType::Differencing {
        if footer.data_offset.saturating_add(DYN_HEADER_SIZE) > file_len {
            return Err(invalid(VhdError::Truncated));
        }
        let mut header = [0u8; DYN_HEADER_SIZE as usize];
        file.seek(SeekFrom::Start(footer.data_offset))
            .map_err(io_err)?;
        file.read_exact(&mut header).map_err(io_err)?;
        parse_dynamic_header(&header).map_err(invalid)?
    } else {
        None
    };

    Ok(VhdMeta {
        uuid: footer.uuid,
        current_size: footer.current_size,
        disk_type: footer.disk_type,
        parent_uuid,
    })
}
