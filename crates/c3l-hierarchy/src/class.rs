//! Class declarations: a name, its ordered direct parents, and metadata.

use serde::{Deserialize, Serialize};

use c3l_types::ClassName;

use crate::error::HierarchyResult;

/// A single class in a declared hierarchy.
///
/// Parent order is declaration order and is significant: C3 keeps it as the
/// local precedence order. Declarations are immutable once added to a
/// [`Hierarchy`](crate::Hierarchy).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// The class being declared.
    pub name: ClassName,
    /// Direct parents, in declaration order (may be empty for roots).
    #[serde(default)]
    pub parents: Vec<ClassName>,
    /// Additional metadata about this class.
    #[serde(default)]
    pub metadata: ClassMetadata,
}

impl ClassDecl {
    /// Declare a class with validated names.
    pub fn new<S: AsRef<str>>(name: &str, parents: &[S]) -> HierarchyResult<Self> {
        let parents = parents
            .iter()
            .map(|p| ClassName::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: ClassName::new(name)?,
            parents,
            metadata: ClassMetadata::empty(),
        })
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: ClassMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns `true` if this class has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns a human-readable summary of this class.
    pub fn summary(&self) -> String {
        if self.parents.is_empty() {
            return self.name.to_string();
        }
        let parents: Vec<&str> = self.parents.iter().map(ClassName::as_str).collect();
        format!("{}({})", self.name, parents.join(", "))
    }
}

/// Optional metadata attached to a class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassMetadata {
    /// Human-readable description of the class.
    pub description: Option<String>,
    /// Free-form tags for categorization.
    pub tags: Vec<String>,
}

impl ClassMetadata {
    /// Create empty metadata.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create metadata with a description.
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}
