//! Error types for merging and linearization.

use std::fmt::Debug;

use crate::identifier::Identifier;

/// Errors that can occur while merging sequences or linearizing a node.
///
/// [`Inconsistent`](C3Error::Inconsistent) and
/// [`CyclicHierarchy`](C3Error::CyclicHierarchy) are distinct conditions:
/// the first means the hierarchy is a DAG but no order satisfies every
/// constraint, the second means the parent relation is not a DAG at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum C3Error<Id: Identifier> {
    /// Every remaining candidate reappears later in some sequence.
    #[error(
        "inconsistent hierarchy{}: no linearization exists, candidates {blocked:?} block each other",
        at_node(.node)
    )]
    Inconsistent {
        /// The node whose merge failed. `None` for a bare [`merge`](crate::merge) call.
        node: Option<Id>,
        /// The distinct heads left when selection got stuck, in scan order.
        blocked: Vec<Id>,
    },

    /// Following parents leads back to a node already being linearized.
    #[error("cyclic hierarchy: {cycle:?}")]
    CyclicHierarchy {
        /// The cycle path, starting and ending with the same node.
        cycle: Vec<Id>,
    },

    /// The hierarchy is deeper than the configured recursion bound.
    #[error("hierarchy depth limit of {limit} exceeded at {node:?}")]
    DepthExceeded {
        /// The node at which the bound was crossed.
        node: Id,
        /// The configured maximum depth.
        limit: usize,
    },

    /// The parent lookup has no entry for a node.
    #[error("unknown node: {0:?}")]
    UnknownNode(Id),

    /// A node lists the same direct parent more than once.
    #[error("node {node:?} lists parent {parent:?} more than once")]
    DuplicateParent {
        /// The node with the malformed parent list.
        node: Id,
        /// The repeated parent.
        parent: Id,
    },

    /// A merge input sequence repeats an element.
    #[error("merge input sequence {sequence} repeats {item:?}")]
    DuplicateEntry {
        /// Index of the malformed sequence in the merge input.
        sequence: usize,
        /// The repeated element.
        item: Id,
    },
}

fn at_node<Id: Debug>(node: &Option<Id>) -> String {
    match node {
        Some(node) => format!(" at {node:?}"),
        None => String::new(),
    }
}

impl<Id: Identifier> C3Error<Id> {
    /// Returns `true` for a C3 ordering contradiction.
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, Self::Inconsistent { .. })
    }

    /// Returns `true` when the parent relation contains a cycle.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::CyclicHierarchy { .. })
    }

    /// Attribute an unattributed inconsistency to `node`.
    ///
    /// An inconsistency that already names a node keeps it, so the innermost
    /// failing merge is what callers see.
    pub fn at(self, node: &Id) -> Self {
        match self {
            Self::Inconsistent {
                node: None,
                blocked,
            } => Self::Inconsistent {
                node: Some(node.clone()),
                blocked,
            },
            other => other,
        }
    }
}

/// Convenience alias for merge and linearization results.
pub type C3Result<T, Id> = Result<T, C3Error<Id>>;
