use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes surfaced by the engine. Per-file problems inside a batch
/// verification are classified into the report instead of raised here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported digest algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported digest encoding: {0:?}")]
    UnsupportedEncoding(String),

    #[error("malformed manifest, line {line}: {reason}")]
    MalformedManifest { line: usize, reason: String },

    #[error("format {format:?} holds exactly one digest, manifest has {count} entries")]
    SingleEntryFormat { format: &'static str, count: usize },

    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedManifest { line, reason: reason.into() }
    }
}
