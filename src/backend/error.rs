//! Backend-level errors (storage enumeration and parsing)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the storage-backend layer: subprocess failures, missing
/// mounts, and unparsable on-disk or tool output.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("storage repository not mounted: {0}")]
    MountMissing(PathBuf),

    #[error("failed to run {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("unparsable scan line: {line}")]
    ScanFormat { line: String },

    #[error("invalid vhd image {path}: {source}")]
    InvalidVhd {
        path: PathBuf,
        #[source]
        source: VhdError,
    },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("unsupported sr type: {0}")]
    UnsupportedSrType(String),
}

impl BackendError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Errors parsing the VHD on-disk format.
#[derive(Error, Debug)]
pub enum VhdError {
    #[error("file too small for a vhd footer")]
    Truncated,

    #[error("bad footer cookie")]
    BadFooterCookie,

    #[error("bad dynamic header cookie")]
    BadHeaderCookie,

    #[error("unknown disk type {0}")]
    UnknownDiskType(u32),

    #[error("invalid uuid field")]
    BadUuid,
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
