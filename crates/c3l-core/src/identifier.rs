//! The bound every hierarchy node type must satisfy.

use std::fmt::Debug;
use std::hash::Hash;

/// An opaque, comparable, hashable node identifier.
///
/// Equality is identity: two identifiers denote the same node exactly when
/// they compare equal. The core never creates identifiers, it only clones
/// the ones handed to it. Any `Clone + Eq + Hash + Debug` type qualifies.
pub trait Identifier: Clone + Eq + Hash + Debug {}

impl<T> Identifier for T where T: Clone + Eq + Hash + Debug {}
