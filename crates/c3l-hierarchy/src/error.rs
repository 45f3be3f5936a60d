//! Error types for hierarchy declaration and resolution.

use c3l_core::C3Error;
use c3l_types::{ClassName, TypeError};

/// Errors that can occur while building, loading or resolving a hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    /// A referenced class was not declared.
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// A class was declared twice.
    #[error("duplicate class: {0}")]
    DuplicateClass(ClassName),

    /// A class names a parent that has not been declared yet.
    #[error("class {class} references undeclared parent {parent}")]
    UnknownParent {
        /// The class with the bad reference.
        class: ClassName,
        /// The missing parent.
        parent: ClassName,
    },

    /// A class lists the same parent twice.
    #[error("class {class} lists parent {parent} more than once")]
    DuplicateParent {
        /// The class with the repeated parent.
        class: ClassName,
        /// The repeated parent.
        parent: ClassName,
    },

    /// A cycle was found while validating a loaded snapshot.
    #[error("cycle detected involving class {0}")]
    CycleDetected(ClassName),

    /// A loaded snapshot's indexes disagree with its declarations.
    #[error("corrupt hierarchy index: {0}")]
    CorruptIndex(String),

    /// A name failed validation.
    #[error(transparent)]
    InvalidName(#[from] TypeError),

    /// C3 resolution failed.
    #[error(transparent)]
    Linearization(#[from] C3Error<ClassName>),

    /// Unsupported hierarchy file extension.
    #[error("unsupported hierarchy format: {0:?} (expected .toml or .json)")]
    UnsupportedFormat(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl HierarchyError {
    /// The underlying C3 failure, if this is one.
    pub fn as_c3(&self) -> Option<&C3Error<ClassName>> {
        match self {
            Self::Linearization(err) => Some(err),
            _ => None,
        }
    }
}

/// Convenience alias for hierarchy results.
pub type HierarchyResult<T> = Result<T, HierarchyError>;
