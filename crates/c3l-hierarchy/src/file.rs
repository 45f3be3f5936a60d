//! Hierarchy files: a `[config]` section plus `[[class]]` declarations.
//!
//! ```toml
//! [config]
//! max_depth = 64
//!
//! [[class]]
//! name = "Root"
//!
//! [[class]]
//! name = "A"
//! parents = ["Root"]
//! ```
//!
//! The same shape is accepted as JSON (`{"config": {...}, "class": [...]}`).
//! Classes must appear after their parents.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use c3l_core::LinearizerConfig;

use crate::class::ClassDecl;
use crate::error::{HierarchyError, HierarchyResult};
use crate::hierarchy::Hierarchy;

/// The on-disk form of a hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyFile {
    /// Linearizer settings; missing keys take their defaults.
    #[serde(default)]
    pub config: LinearizerConfig,
    /// Class declarations, parents first.
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassDecl>,
}

impl HierarchyFile {
    /// Parse a TOML hierarchy file.
    pub fn from_toml_str(input: &str) -> HierarchyResult<Self> {
        toml::from_str(input).map_err(|e| HierarchyError::Serialization(e.to_string()))
    }

    /// Parse a JSON hierarchy file.
    pub fn from_json_str(input: &str) -> HierarchyResult<Self> {
        serde_json::from_str(input).map_err(|e| HierarchyError::Serialization(e.to_string()))
    }

    /// Read a hierarchy file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> HierarchyResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let parse: fn(&str) -> HierarchyResult<Self> = match extension.as_str() {
            "toml" => Self::from_toml_str,
            "json" => Self::from_json_str,
            _ => return Err(HierarchyError::UnsupportedFormat(path.display().to_string())),
        };
        let file = parse(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), classes = file.classes.len(), "loaded hierarchy file");
        Ok(file)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> HierarchyResult<String> {
        toml::to_string(self).map_err(|e| HierarchyError::Serialization(e.to_string()))
    }

    /// Render as pretty-printed JSON.
    pub fn to_json_string(&self) -> HierarchyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| HierarchyError::Serialization(e.to_string()))
    }

    /// Declare every class, in file order, into a new [`Hierarchy`].
    pub fn build(&self) -> HierarchyResult<Hierarchy> {
        let mut hierarchy = Hierarchy::new();
        for class in &self.classes {
            hierarchy.add_class(class.clone())?;
        }
        Ok(hierarchy)
    }

    /// Capture a hierarchy and a configuration as a file.
    pub fn from_hierarchy(hierarchy: &Hierarchy, config: LinearizerConfig) -> Self {
        Self {
            config,
            classes: hierarchy.classes().cloned().collect(),
        }
    }
}

impl Hierarchy {
    /// Build a hierarchy from TOML, ignoring any `[config]` section.
    pub fn from_toml_str(input: &str) -> HierarchyResult<Self> {
        HierarchyFile::from_toml_str(input)?.build()
    }

    /// Build a hierarchy from JSON, ignoring any `config` object.
    pub fn from_json_str(input: &str) -> HierarchyResult<Self> {
        HierarchyFile::from_json_str(input)?.build()
    }

    /// Load a hierarchy from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> HierarchyResult<Self> {
        HierarchyFile::load(path)?.build()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const DIAMOND_TOML: &str = r#"
[config]
max_depth = 16

[[class]]
name = "Root"

[[class]]
name = "A"
parents = ["Root"]

[[class]]
name = "B"
parents = ["Root"]
metadata = { description = "second branch", tags = ["mixin"] }

[[class]]
name = "C1"
parents = ["A", "B"]
"#;

    #[test]
    fn parse_toml() {
        let file = HierarchyFile::from_toml_str(DIAMOND_TOML).unwrap();
        assert_eq!(file.config.max_depth, 16);
        assert!(file.config.memoize);
        assert_eq!(file.classes.len(), 4);
        assert_eq!(
            file.classes[2].metadata.description.as_deref(),
            Some("second branch")
        );
        let h = file.build().unwrap();
        assert_eq!(h.linearize("C1").unwrap().to_string(), "C1, A, B, Root");
    }

    #[test]
    fn parse_json_without_config() {
        let json = r#"{"class": [{"name": "Root"}, {"name": "A", "parents": ["Root"]}]}"#;
        let file = HierarchyFile::from_json_str(json).unwrap();
        assert_eq!(file.config, LinearizerConfig::default());
        let h = Hierarchy::from_json_str(json).unwrap();
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn empty_toml_is_empty_hierarchy() {
        assert!(Hierarchy::from_toml_str("").unwrap().is_empty());
    }

    #[test]
    fn invalid_class_name_fails_to_parse() {
        let err = HierarchyFile::from_toml_str("[[class]]\nname = \"has space\"\n").unwrap_err();
        assert!(matches!(err, HierarchyError::Serialization(_)));
    }

    #[test]
    fn forward_reference_fails_to_build() {
        let toml = "[[class]]\nname = \"A\"\nparents = [\"Root\"]\n\n[[class]]\nname = \"Root\"\n";
        assert!(matches!(
            Hierarchy::from_toml_str(toml),
            Err(HierarchyError::UnknownParent { .. })
        ));
    }

    #[test]
    fn toml_rendering_reparses() {
        let file = HierarchyFile::from_toml_str(DIAMOND_TOML).unwrap();
        let again = HierarchyFile::from_toml_str(&file.to_toml_string().unwrap()).unwrap();
        assert_eq!(file, again);
    }

    #[test]
    fn from_hierarchy_keeps_declaration_order() {
        let h = Hierarchy::from_toml_str(DIAMOND_TOML).unwrap();
        let file = HierarchyFile::from_hierarchy(&h, LinearizerConfig::default());
        let names: Vec<&str> = file.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "A", "B", "C1"]);
    }

    #[test]
    fn load_by_extension() {
        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        toml_file.write_all(DIAMOND_TOML.as_bytes()).unwrap();
        assert_eq!(Hierarchy::load(toml_file.path()).unwrap().len(), 4);

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json = HierarchyFile::from_toml_str(DIAMOND_TOML)
            .unwrap()
            .to_json_string()
            .unwrap();
        json_file.write_all(json.as_bytes()).unwrap();
        assert_eq!(Hierarchy::load(json_file.path()).unwrap().len(), 4);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            HierarchyFile::load(file.path()),
            Err(HierarchyError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            HierarchyFile::load(dir.path().join("absent.toml")),
            Err(HierarchyError::Io(_))
        ));
    }
}
