//! The result of linearizing one node.

use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;

/// The resolution order of one node: the node itself, then its ancestors.
///
/// Always non-empty and duplicate-free when produced by
/// [`linearize`](crate::linearize). Serializes as a flat ordered list;
/// deserializing applies the same checks as [`from_vec`](Self::from_vec).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Id>", into = "Vec<Id>")]
#[serde(bound(
    serialize = "Id: Clone + Serialize",
    deserialize = "Id: Identifier + Deserialize<'de>"
))]
pub struct Linearization<Id> {
    order: Vec<Id>,
}

impl<Id: Identifier> Linearization<Id> {
    /// Build a linearization from `node` followed by the merged ancestors.
    pub(crate) fn from_parts(node: Id, ancestors: Vec<Id>) -> Self {
        let mut order = Vec::with_capacity(ancestors.len() + 1);
        order.push(node);
        order.extend(ancestors);
        Self { order }
    }

    /// Wrap an existing order, checking that it is non-empty and
    /// duplicate-free. Returns `None` otherwise.
    pub fn from_vec(order: Vec<Id>) -> Option<Self> {
        if order.is_empty() {
            return None;
        }
        let mut seen = HashSet::with_capacity(order.len());
        order
            .iter()
            .all(|id| seen.insert(id))
            .then_some(Self { order })
    }

    /// The node this linearization belongs to.
    pub fn node(&self) -> &Id {
        &self.order[0]
    }

    /// Every ancestor in resolution order, the node itself excluded.
    pub fn ancestors(&self) -> &[Id] {
        &self.order[1..]
    }

    /// Position of `id`, or `None` if it is not an ancestor (or the node).
    pub fn position(&self, id: &Id) -> Option<usize> {
        self.order.iter().position(|x| x == id)
    }

    /// Returns `true` if `id` is the node or one of its ancestors.
    pub fn contains(&self, id: &Id) -> bool {
        self.order.contains(id)
    }

    /// Returns `true` if both are present and `a` resolves before `b`.
    pub fn precedes(&self, a: &Id, b: &Id) -> bool {
        matches!((self.position(a), self.position(b)), (Some(pa), Some(pb)) if pa < pb)
    }

    /// Number of entries, the node included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false` for a linearization built by this crate.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in resolution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Id> {
        self.order.iter()
    }

    /// The full order as a slice.
    pub fn as_slice(&self) -> &[Id] {
        &self.order
    }

    /// The full order as a vector.
    pub fn into_vec(self) -> Vec<Id> {
        self.order
    }
}

impl<Id> Index<usize> for Linearization<Id> {
    type Output = Id;

    fn index(&self, index: usize) -> &Id {
        &self.order[index]
    }
}

impl<'a, Id> IntoIterator for &'a Linearization<Id> {
    type Item = &'a Id;
    type IntoIter = std::slice::Iter<'a, Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl<Id> From<Linearization<Id>> for Vec<Id> {
    fn from(linearization: Linearization<Id>) -> Self {
        linearization.order
    }
}

/// Why a list of identifiers is not a valid linearization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLinearization {
    /// A linearization always starts with its node.
    #[error("linearization is empty")]
    Empty,
    /// Some identifier appears more than once.
    #[error("linearization repeats an entry")]
    Duplicate,
}

impl<Id: Identifier> TryFrom<Vec<Id>> for Linearization<Id> {
    type Error = InvalidLinearization;

    fn try_from(order: Vec<Id>) -> Result<Self, Self::Error> {
        if order.is_empty() {
            return Err(InvalidLinearization::Empty);
        }
        Self::from_vec(order).ok_or(InvalidLinearization::Duplicate)
    }
}

impl<Id: fmt::Display> fmt::Display for Linearization<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.order.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}
