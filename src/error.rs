use std::path::PathBuf;

/// Errors that can occur in dijunc.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    Parameter(String),

    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Malformed CIGAR string or alignment line; the record is skipped.
    #[error("format error: {0}")]
    Format(String),

    /// CIGAR outside the recognized topology grammar; the record is excluded.
    #[error("unrecognized topology: {0}")]
    UnrecognizedTopology(String),

    /// Segment absent from a reference table; the record is excluded.
    #[error("missing reference data: {0}")]
    MissingReferenceData(String),

    #[error("reference table error: {0}")]
    Reference(String),
}

impl Error {
    /// Convenience for wrapping an `io::Error` with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// True for errors that only exclude a single record.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            Self::Format(_) | Self::UnrecognizedTopology(_) | Self::MissingReferenceData(_)
        )
    }
}
