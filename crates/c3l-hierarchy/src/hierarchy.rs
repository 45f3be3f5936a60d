//! The declared class hierarchy and its queries.
//!
//! [`Hierarchy`] stores declarations in a [`HashMap`] and maintains a
//! forward-edge index (`children`) for descendant queries. Declaration order
//! is kept separately so listings and bulk resolution are deterministic.
//!
//! # Invariants
//!
//! - Every parent reference resolves to an earlier declaration, so the
//!   graph is acyclic by construction.
//! - Class names are unique within the hierarchy.
//! - No class lists the same parent twice.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use c3l_core::{Linearization, Linearizer, LinearizerConfig, ParentLookup};
use c3l_types::ClassName;

use crate::class::ClassDecl;
use crate::error::{HierarchyError, HierarchyResult};

/// A multiple-inheritance hierarchy: class name → ordered direct parents.
///
/// Built incrementally with [`add_class`] or [`declare`]; a class can only
/// be declared after all of its parents.
///
/// Names are identities: a name is declared at most once, and a later
/// declaration cannot shadow an earlier class of the same name.
///
/// [`add_class`]: Hierarchy::add_class
/// [`declare`]: Hierarchy::declare
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Hierarchy {
    /// All classes, keyed by name.
    classes: HashMap<ClassName, ClassDecl>,
    /// Forward-edge index: parent -> list of direct subclasses.
    children: HashMap<ClassName, Vec<ClassName>>,
    /// Classes with no parents.
    roots: Vec<ClassName>,
    /// Declaration order.
    order: Vec<ClassName>,
}

impl Hierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of declared classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no class has been declared.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Add a class declaration.
    ///
    /// All parents must already be declared. Returns an error if the name is
    /// taken, a parent is missing, or a parent is listed twice.
    pub fn add_class(&mut self, class: ClassDecl) -> HierarchyResult<()> {
        if self.classes.contains_key(&class.name) {
            return Err(HierarchyError::DuplicateClass(class.name));
        }

        let mut seen = HashSet::with_capacity(class.parents.len());
        for parent in &class.parents {
            if !seen.insert(parent) {
                return Err(HierarchyError::DuplicateParent {
                    class: class.name.clone(),
                    parent: parent.clone(),
                });
            }
            if !self.classes.contains_key(parent) {
                return Err(HierarchyError::UnknownParent {
                    class: class.name.clone(),
                    parent: parent.clone(),
                });
            }
        }

        for parent in &class.parents {
            self.children
                .entry(parent.clone())
                .or_default()
                .push(class.name.clone());
        }

        if class.is_root() {
            self.roots.push(class.name.clone());
        }

        debug!(class = %class.name, parents = class.parents.len(), "declared class");
        self.order.push(class.name.clone());
        self.classes.insert(class.name.clone(), class);

        Ok(())
    }

    /// Declare a class by name with its parents in order.
    pub fn declare<S: AsRef<str>>(&mut self, name: &str, parents: &[S]) -> HierarchyResult<()> {
        self.add_class(ClassDecl::new(name, parents)?)
    }

    /// Retrieve a class declaration by name.
    pub fn get(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.get(name)
    }

    /// Returns `true` if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// All classes in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> + '_ {
        self.order.iter().filter_map(|name| self.classes.get(name))
    }

    /// All root classes (classes with no parents).
    pub fn roots(&self) -> Vec<&ClassDecl> {
        self.roots
            .iter()
            .filter_map(|name| self.classes.get(name))
            .collect()
    }

    fn require(&self, name: &str) -> HierarchyResult<&ClassDecl> {
        self.classes
            .get(name)
            .ok_or_else(|| HierarchyError::ClassNotFound(name.to_string()))
    }

    /// The direct parents of a class, in declaration order.
    pub fn parents(&self, name: &str) -> HierarchyResult<&[ClassName]> {
        Ok(&self.require(name)?.parents)
    }

    /// The direct subclasses of a class, in declaration order.
    pub fn children(&self, name: &str) -> HierarchyResult<&[ClassName]> {
        self.require(name)?;
        Ok(self.children.get(name).map(Vec::as_slice).unwrap_or(&[]))
    }

    // ---------------------------------------------------------------
    // Ancestor / Descendant queries
    // ---------------------------------------------------------------

    /// All ancestors of a class, breadth-first from its direct parents.
    ///
    /// The class itself is **not** included. This is reachability order, not
    /// resolution order; use [`linearize`](Self::linearize) for the latter.
    pub fn ancestors(&self, name: &str) -> HierarchyResult<Vec<&ClassDecl>> {
        let start = self.require(name)?;

        let mut visited: HashSet<&ClassName> = HashSet::new();
        visited.insert(&start.name);
        let mut result = Vec::new();
        let mut queue: VecDeque<&ClassName> = start
            .parents
            .iter()
            .filter(|p| visited.insert(*p))
            .collect();

        while let Some(current) = queue.pop_front() {
            if let Some(class) = self.classes.get(current) {
                result.push(class);
                for parent in &class.parents {
                    if visited.insert(parent) {
                        queue.push_back(parent);
                    }
                }
            }
        }

        Ok(result)
    }

    /// All descendants of a class, breadth-first from its direct subclasses.
    ///
    /// The class itself is **not** included.
    pub fn descendants(&self, name: &str) -> HierarchyResult<Vec<&ClassDecl>> {
        let start = self.require(name)?;

        let mut visited: HashSet<&ClassName> = HashSet::new();
        visited.insert(&start.name);
        let mut result = Vec::new();
        let mut queue: VecDeque<&ClassName> = VecDeque::new();

        if let Some(child_names) = self.children.get(&start.name) {
            for child in child_names {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        while let Some(current) = queue.pop_front() {
            if let Some(class) = self.classes.get(current) {
                result.push(class);
                if let Some(child_names) = self.children.get(current) {
                    for child in child_names {
                        if visited.insert(child) {
                            queue.push_back(child);
                        }
                    }
                }
            }
        }

        Ok(result)
    }

    /// Collect a class and all of its ancestors into a set.
    fn ancestor_set<'a>(&'a self, name: &'a ClassName) -> HashSet<&'a ClassName> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(name);
        queue.push_back(name);

        while let Some(current) = queue.pop_front() {
            if let Some(class) = self.classes.get(current) {
                for parent in &class.parents {
                    if visited.insert(parent) {
                        queue.push_back(parent);
                    }
                }
            }
        }

        visited
    }

    /// Returns `true` if `class` is `ancestor` or inherits from it.
    pub fn is_subclass(&self, class: &str, ancestor: &str) -> HierarchyResult<bool> {
        let start = self.require(class)?;
        let target = &self.require(ancestor)?.name;
        Ok(self.ancestor_set(&start.name).contains(target))
    }

    // ---------------------------------------------------------------
    // Topological order
    // ---------------------------------------------------------------

    /// All classes with every parent before its subclasses.
    ///
    /// Uses Kahn's algorithm, breaking ties by declaration order. Classes on
    /// a cycle (only possible in a tampered snapshot) are left out.
    pub fn topological_order(&self) -> Vec<&ClassDecl> {
        let rank: HashMap<&ClassName, usize> =
            self.order.iter().enumerate().map(|(i, n)| (n, i)).collect();
        let mut in_degree: HashMap<&ClassName, usize> = self
            .classes
            .values()
            .map(|c| (&c.name, c.parents.len()))
            .collect();

        let mut ready: Vec<&ClassName> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(name, _)| *name)
            .collect();
        ready.sort_by_key(|name| rank.get(name).copied().unwrap_or(usize::MAX));
        let mut queue: VecDeque<&ClassName> = ready.into();

        let mut result = Vec::with_capacity(self.classes.len());
        while let Some(current) = queue.pop_front() {
            if let Some(class) = self.classes.get(current) {
                result.push(class);
            }
            if let Some(child_names) = self.children.get(current) {
                let mut sorted: Vec<&ClassName> = child_names.iter().collect();
                sorted.sort_by_key(|name| rank.get(name).copied().unwrap_or(usize::MAX));
                for child in sorted {
                    if let Some(deg) = in_degree.get_mut(child) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push_back(child);
                        }
                    }
                }
            }
        }

        result
    }

    // ---------------------------------------------------------------
    // C3 resolution
    // ---------------------------------------------------------------

    /// The C3 linearization of a class with the default configuration.
    pub fn linearize(&self, name: &str) -> HierarchyResult<Linearization<ClassName>> {
        self.linearize_with(name, &LinearizerConfig::default())
    }

    /// The C3 linearization of a class with an explicit configuration.
    pub fn linearize_with(
        &self,
        name: &str,
        config: &LinearizerConfig,
    ) -> HierarchyResult<Linearization<ClassName>> {
        let class = self.require(name)?;
        let linearizer = Linearizer::with_config(self, config.clone());
        Ok(linearizer.linearize(&class.name)?)
    }

    /// Linearize every class, in declaration order.
    ///
    /// Each class is resolved independently, so one inconsistent class does
    /// not hide the results of the others.
    pub fn linearize_all(
        &self,
        config: &LinearizerConfig,
    ) -> Vec<(&ClassName, HierarchyResult<Linearization<ClassName>>)> {
        let linearizer = Linearizer::with_config(self, config.clone());
        self.order
            .iter()
            .map(|name| {
                let result = linearizer.linearize(name).map_err(HierarchyError::from);
                (name, result)
            })
            .collect()
    }

    /// The most specific ancestor shared by two classes.
    ///
    /// This is the first entry of `a`'s linearization that `b` also inherits
    /// from (either class itself counts). `None` if they share nothing.
    pub fn common_ancestor(&self, a: &str, b: &str) -> HierarchyResult<Option<ClassName>> {
        self.common_ancestor_with(a, b, &LinearizerConfig::default())
    }

    /// [`common_ancestor`](Self::common_ancestor) with an explicit configuration.
    pub fn common_ancestor_with(
        &self,
        a: &str,
        b: &str,
        config: &LinearizerConfig,
    ) -> HierarchyResult<Option<ClassName>> {
        let order = self.linearize_with(a, config)?;
        let other = self.require(b)?;
        let shared = self.ancestor_set(&other.name);
        Ok(order.iter().find(|name| shared.contains(name)).cloned())
    }

    // ---------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------

    /// Validate the hierarchy's structural integrity.
    ///
    /// Checks that:
    /// - Every class is stored under its own name.
    /// - All parent references resolve to declared classes.
    /// - No class lists a parent twice.
    /// - The declaration order, root list and subclass index agree with the
    ///   declarations.
    /// - The parent relation is acyclic.
    pub fn validate(&self) -> HierarchyResult<()> {
        for (key, class) in &self.classes {
            if key != &class.name {
                return Err(HierarchyError::CorruptIndex(format!(
                    "class {} stored under {key}",
                    class.name
                )));
            }
        }

        for class in self.classes.values() {
            let mut seen = HashSet::new();
            for parent in &class.parents {
                if !seen.insert(parent) {
                    return Err(HierarchyError::DuplicateParent {
                        class: class.name.clone(),
                        parent: parent.clone(),
                    });
                }
                if !self.classes.contains_key(parent) {
                    return Err(HierarchyError::UnknownParent {
                        class: class.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        self.validate_indexes()?;

        let sorted = self.topological_order();
        if sorted.len() != self.classes.len() {
            let placed: HashSet<&ClassName> = sorted.iter().map(|c| &c.name).collect();
            if let Some(stuck) = self.order.iter().find(|n| !placed.contains(n)) {
                return Err(HierarchyError::CycleDetected(stuck.clone()));
            }
        }

        Ok(())
    }

    /// Compare `order`, `roots` and `children` against indexes rebuilt from
    /// the declarations themselves.
    fn validate_indexes(&self) -> HierarchyResult<()> {
        let mut listed = HashSet::with_capacity(self.order.len());
        for name in &self.order {
            if !self.classes.contains_key(name) {
                return Err(HierarchyError::CorruptIndex(format!(
                    "declaration order lists unknown class {name}"
                )));
            }
            if !listed.insert(name) {
                return Err(HierarchyError::CorruptIndex(format!(
                    "declaration order lists {name} twice"
                )));
            }
        }
        if listed.len() != self.classes.len() {
            return Err(HierarchyError::CorruptIndex(
                "declaration order is missing classes".to_string(),
            ));
        }

        let mut roots = Vec::new();
        let mut children: HashMap<&ClassName, Vec<&ClassName>> = HashMap::new();
        for class in self.classes() {
            if class.is_root() {
                roots.push(&class.name);
            }
            for parent in &class.parents {
                children.entry(parent).or_default().push(&class.name);
            }
        }

        if !self.roots.iter().eq(roots) {
            return Err(HierarchyError::CorruptIndex(
                "root list does not match declarations".to_string(),
            ));
        }

        let mut stored = self.children.iter().filter(|(_, list)| !list.is_empty());
        let consistent = stored.clone().count() == children.len()
            && stored.all(|(parent, list)| {
                children
                    .get(parent)
                    .is_some_and(|expected| list.iter().eq(expected.iter().copied()))
            });
        if !consistent {
            return Err(HierarchyError::CorruptIndex(
                "subclass index does not match declarations".to_string(),
            ));
        }

        Ok(())
    }

    // ---------------------------------------------------------------
    // Serialization helpers
    // ---------------------------------------------------------------

    /// Serialize the hierarchy to bincode bytes.
    pub fn to_bytes(&self) -> HierarchyResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| HierarchyError::Serialization(e.to_string()))
    }

    /// Deserialize a hierarchy from bincode bytes and validate it.
    pub fn from_bytes(data: &[u8]) -> HierarchyResult<Self> {
        let hierarchy: Self =
            bincode::deserialize(data).map_err(|e| HierarchyError::Serialization(e.to_string()))?;
        hierarchy.validate()?;
        Ok(hierarchy)
    }
}

impl ParentLookup<ClassName> for Hierarchy {
    fn parents_of(&self, node: &ClassName) -> Option<Vec<ClassName>> {
        self.classes.get(node).map(|class| class.parents.clone())
    }
}
