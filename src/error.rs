use crate::types::{RecordKind, RecordRef};
use thiserror::Error;

/// Result alias used throughout the genealogy library
pub type Result<T> = std::result::Result<T, GeneaError>;

/// Data-integrity errors raised while ingesting or resolving records
#[derive(Debug, Error)]
pub enum GeneaError {
    #[error("genea not populated")]
    NotPopulated,

    #[error("unexpected type of object {0}")]
    UnknownRecordType(String),

    #[error("unexpected reference to have type \"{expected}\": {found}")]
    TypeMismatch { expected: RecordKind, found: RecordRef },

    #[error("no {kind} defined with id {id}")]
    UnknownRecord { kind: RecordKind, id: String },

    #[error("malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeneaError {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
