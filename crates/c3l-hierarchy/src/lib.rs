//! Declared class hierarchies.
//!
//! A [`Hierarchy`] is the concrete graph of class name → ordered direct
//! parents that the C3 core reads through [`c3l_core::ParentLookup`]. It
//! validates declarations as they arrive, answers traversal queries
//! (ancestors, descendants, topological order), resolves classes with C3,
//! and loads from TOML/JSON hierarchy files or bincode snapshots.
//!
//! ```rust
//! use c3l_hierarchy::Hierarchy;
//!
//! let mut h = Hierarchy::new();
//! h.declare::<&str>("Root", &[]).unwrap();
//! h.declare("A", &["Root"]).unwrap();
//! h.declare("B", &["Root"]).unwrap();
//! h.declare("C1", &["A", "B"]).unwrap();
//!
//! assert_eq!(h.linearize("C1").unwrap().to_string(), "C1, A, B, Root");
//! ```

pub mod class;
pub mod error;
pub mod file;
pub mod hierarchy;

pub use class::{ClassDecl, ClassMetadata};
pub use error::{HierarchyError, HierarchyResult};
pub use file::HierarchyFile;
pub use hierarchy::Hierarchy;
