//! The read-only seam between the linearizer and whatever owns the hierarchy.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::identifier::Identifier;

/// Supplies the direct parents of a node, in declaration order.
///
/// Returning `None` means the node is unknown to the lookup; an empty vector
/// means the node is a root. Implementations must answer consistently for the
/// duration of one [`linearize`](crate::linearize) call.
pub trait ParentLookup<Id: Identifier> {
    /// The direct parents of `node`, or `None` if `node` is not known.
    fn parents_of(&self, node: &Id) -> Option<Vec<Id>>;
}

impl<Id, L> ParentLookup<Id> for &L
where
    Id: Identifier,
    L: ParentLookup<Id> + ?Sized,
{
    fn parents_of(&self, node: &Id) -> Option<Vec<Id>> {
        (**self).parents_of(node)
    }
}

impl<Id, S> ParentLookup<Id> for HashMap<Id, Vec<Id>, S>
where
    Id: Identifier,
    S: BuildHasher,
{
    fn parents_of(&self, node: &Id) -> Option<Vec<Id>> {
        self.get(node).cloned()
    }
}

impl<Id> ParentLookup<Id> for BTreeMap<Id, Vec<Id>>
where
    Id: Identifier + Ord,
{
    fn parents_of(&self, node: &Id) -> Option<Vec<Id>> {
        self.get(node).cloned()
    }
}

/// Adapts a closure `Fn(&Id) -> Vec<Id>` into a [`ParentLookup`].
///
/// Every node is considered known; nodes the closure has nothing for should
/// return an empty vector.
///
/// ```
/// use c3l_core::{linearize, FnLookup};
///
/// let lookup = FnLookup::new(|n: &u32| if *n == 0 { vec![] } else { vec![n - 1] });
/// assert_eq!(linearize(&2, &lookup).unwrap().as_slice(), &[2, 1, 0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnLookup<F>(F);

impl<F> FnLookup<F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<Id, F> ParentLookup<Id> for FnLookup<F>
where
    Id: Identifier,
    F: Fn(&Id) -> Vec<Id>,
{
    fn parents_of(&self, node: &Id) -> Option<Vec<Id>> {
        Some((self.0)(node))
    }
}
