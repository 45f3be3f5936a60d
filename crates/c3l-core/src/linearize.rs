//! Recursive C3 linearization over a [`ParentLookup`].
//!
//! Each top-level call runs in its own [`Session`]: a memo of finished
//! ancestor linearizations and the stack of nodes currently being resolved.
//! Nothing is shared between calls, so a lookup that changes between calls
//! is always seen fresh.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::config::LinearizerConfig;
use crate::error::{C3Error, C3Result};
use crate::identifier::Identifier;
use crate::linearization::Linearization;
use crate::lookup::ParentLookup;
use crate::merge::merge;

/// Linearize `node` with the default [`LinearizerConfig`].
///
/// ```
/// use std::collections::HashMap;
/// use c3l_core::linearize;
///
/// let graph = HashMap::from([
///     ("Root", vec![]),
///     ("A", vec!["Root"]),
///     ("B", vec!["Root"]),
///     ("C1", vec!["A", "B"]),
/// ]);
/// assert_eq!(linearize(&"C1", &graph).unwrap().as_slice(), &["C1", "A", "B", "Root"]);
/// ```
///
/// # Errors
///
/// See [`Linearizer::linearize`].
pub fn linearize<Id, L>(node: &Id, lookup: &L) -> C3Result<Linearization<Id>, Id>
where
    Id: Identifier,
    L: ParentLookup<Id> + ?Sized,
{
    Linearizer::new(lookup).linearize(node)
}

/// Computes C3 linearizations against one parent lookup.
#[derive(Debug)]
pub struct Linearizer<'g, L: ?Sized> {
    lookup: &'g L,
    config: LinearizerConfig,
}

impl<'g, L: ?Sized> Linearizer<'g, L> {
    /// Create a linearizer with the default configuration.
    pub fn new(lookup: &'g L) -> Self {
        Self::with_config(lookup, LinearizerConfig::default())
    }

    /// Create a linearizer with an explicit configuration.
    pub fn with_config(lookup: &'g L, config: LinearizerConfig) -> Self {
        Self { lookup, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &LinearizerConfig {
        &self.config
    }

    /// Compute the linearization of `node`.
    ///
    /// The call is atomic: any failure anywhere in the ancestry fails the
    /// whole call and no partial order is returned.
    ///
    /// # Errors
    ///
    /// - [`C3Error::Inconsistent`] naming the innermost node whose merge failed.
    /// - [`C3Error::CyclicHierarchy`] if parents lead back to a node on the
    ///   current path.
    /// - [`C3Error::DepthExceeded`] past `max_depth` parent hops.
    /// - [`C3Error::UnknownNode`] if the lookup has no entry for a node.
    /// - [`C3Error::DuplicateParent`] if a parent list repeats a parent.
    pub fn linearize<Id>(&self, node: &Id) -> C3Result<Linearization<Id>, Id>
    where
        Id: Identifier,
        L: ParentLookup<Id>,
    {
        let mut session = Session::new(self.lookup, &self.config);
        let order = session.resolve(node, 0)?;
        debug!(?node, len = order.len(), memoized = session.memo.len(), "linearized node");
        Ok(order)
    }
}

/// State scoped to a single top-level [`Linearizer::linearize`] call.
struct Session<'s, Id, L: ?Sized> {
    lookup: &'s L,
    config: &'s LinearizerConfig,
    memo: HashMap<Id, Linearization<Id>>,
    /// Nodes whose linearization is in progress, outermost first.
    path: Vec<Id>,
}

impl<'s, Id, L> Session<'s, Id, L>
where
    Id: Identifier,
    L: ParentLookup<Id> + ?Sized,
{
    fn new(lookup: &'s L, config: &'s LinearizerConfig) -> Self {
        Self {
            lookup,
            config,
            memo: HashMap::new(),
            path: Vec::new(),
        }
    }

    fn resolve(&mut self, node: &Id, depth: usize) -> C3Result<Linearization<Id>, Id> {
        if let Some(done) = self.memo.get(node) {
            return Ok(done.clone());
        }

        if let Some(start) = self.path.iter().position(|n| n == node) {
            let mut cycle = self.path[start..].to_vec();
            cycle.push(node.clone());
            warn!(?cycle, "cyclic parent relation");
            return Err(C3Error::CyclicHierarchy { cycle });
        }

        if depth > self.config.max_depth {
            return Err(C3Error::DepthExceeded {
                node: node.clone(),
                limit: self.config.max_depth,
            });
        }

        let parents = self
            .lookup
            .parents_of(node)
            .ok_or_else(|| C3Error::UnknownNode(node.clone()))?;
        check_distinct(node, &parents)?;

        let order = if parents.is_empty() {
            Linearization::from_parts(node.clone(), Vec::new())
        } else {
            self.path.push(node.clone());
            let merged = self.merge_parents(&parents, depth);
            self.path.pop();
            Linearization::from_parts(node.clone(), merged.map_err(|e| e.at(node))?)
        };

        if self.config.memoize {
            self.memo.insert(node.clone(), order.clone());
        }
        Ok(order)
    }

    /// Merge `[L(p1), ..., L(pk), [p1, ..., pk]]`.
    fn merge_parents(&mut self, parents: &[Id], depth: usize) -> C3Result<Vec<Id>, Id> {
        let mut sequences: Vec<Vec<Id>> = Vec::with_capacity(parents.len() + 1);
        for parent in parents {
            sequences.push(self.resolve(parent, depth + 1)?.into_vec());
        }
        sequences.push(parents.to_vec());
        merge(&sequences)
    }
}

fn check_distinct<Id: Identifier>(node: &Id, parents: &[Id]) -> C3Result<(), Id> {
    let mut seen = HashSet::with_capacity(parents.len());
    match parents.iter().find(|p| !seen.insert(*p)) {
        Some(parent) => Err(C3Error::DuplicateParent {
            node: node.clone(),
            parent: parent.clone(),
        }),
        None => Ok(()),
    }
}
