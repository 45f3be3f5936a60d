use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid class name {name:?}: {reason}")]
    InvalidClassName { name: String, reason: String },
}
