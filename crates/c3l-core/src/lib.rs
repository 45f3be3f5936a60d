//! C3 linearization for multiple-inheritance hierarchies.
//!
//! Given a node and a way to look up its direct parents, this crate computes
//! the node's linearization: a deterministic, duplicate-free ancestor order
//! that keeps every parent's own order (monotonicity) and the declared order
//! of direct parents (local precedence). Hierarchies for which no such order
//! exists are rejected.
//!
//! # Architecture
//!
//! ```text
//! linearize(node, lookup)
//!     ↓  recursively, parents in declared order
//! [L(p1), ..., L(pk), [p1, ..., pk]]
//!     ↓
//! merge(sequences)          → C3 selection over MergeCursors
//!     ↓
//! Linearization [node, ...]
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use c3l_core::linearize;
//!
//! let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
//! graph.insert("Root", vec![]);
//! graph.insert("A", vec!["Root"]);
//! graph.insert("B", vec!["Root"]);
//! graph.insert("C", vec!["A", "B"]);
//!
//! let order = linearize(&"C", &graph).unwrap();
//! assert_eq!(order.as_slice(), &["C", "A", "B", "Root"]);
//! ```

pub mod config;
pub mod error;
pub mod identifier;
pub mod linearization;
pub mod linearize;
pub mod lookup;
pub mod merge;
pub mod sequence;

pub use config::LinearizerConfig;
pub use error::{C3Error, C3Result};
pub use identifier::Identifier;
pub use linearization::{InvalidLinearization, Linearization};
pub use linearize::{linearize, Linearizer};
pub use lookup::{FnLookup, ParentLookup};
pub use merge::merge;
pub use sequence::MergeCursor;
