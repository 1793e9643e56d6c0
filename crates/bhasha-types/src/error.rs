use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown contribution kind: {0}")]
    UnknownKind(String),

    #[error("unknown duration bucket: {0}")]
    UnknownBucket(String),
}
