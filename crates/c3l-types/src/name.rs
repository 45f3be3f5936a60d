//! Class name validation and the [`ClassName`] identifier.
//!
//! Valid class names:
//! - Must be non-empty
//! - Must not contain whitespace, `,`, `"`, `'`, `#`, `=`, `[`, `]`, `(`, `)`
//! - Are made of `.`-separated components (e.g. `pkg.models.User`)
//! - Components must be non-empty and must not start with an ASCII digit

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Characters that are forbidden anywhere in a class name.
const FORBIDDEN_CHARS: &[char] = &[',', '"', '\'', '#', '=', '[', ']', '(', ')'];

/// Validate a class name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use c3l_types::validate_class_name;
///
/// assert!(validate_class_name("Root").is_ok());
/// assert!(validate_class_name("pkg.models.User").is_ok());
/// assert!(validate_class_name("").is_err());
/// assert!(validate_class_name("a..b").is_err());
/// ```
pub fn validate_class_name(name: &str) -> Result<(), TypeError> {
    let invalid = |reason: String| TypeError::InvalidClassName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("class name must not be empty".into()));
    }

    if let Some(ch) = name.chars().find(|c| c.is_whitespace()) {
        return Err(invalid(format!("contains whitespace: {ch:?}")));
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(format!("contains forbidden character: {ch:?}")));
        }
    }

    for component in name.split('.') {
        if component.is_empty() {
            return Err(invalid("dotted components must not be empty".into()));
        }
        if component.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid(format!(
                "component must not start with a digit: {component:?}"
            )));
        }
    }

    Ok(())
}

/// The name of a class in a declared hierarchy.
///
/// Two `ClassName`s are the same node exactly when their text is equal.
/// Construction always validates, so a `ClassName` in hand is well-formed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    /// Create a validated class name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        validate_class_name(&name)?;
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last dotted component (`User` for `pkg.models.User`).
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// The dotted prefix before the last component, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(ns, _)| ns)
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClassName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClassName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ClassName {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ClassName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_simple_names() {
        assert!(validate_class_name("Root").is_ok());
        assert!(validate_class_name("object").is_ok());
        assert!(validate_class_name("K1").is_ok());
        assert!(validate_class_name("_Private").is_ok());
    }

    #[test]
    fn valid_dotted_names() {
        assert!(validate_class_name("pkg.Base").is_ok());
        assert!(validate_class_name("a.b.c.Deep").is_ok());
    }

    #[test]
    fn reject_empty_name() {
        assert!(validate_class_name("").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(validate_class_name("has space").is_err());
        assert!(validate_class_name("has\ttab").is_err());
        assert!(validate_class_name("has\nnewline").is_err());
    }

    #[test]
    fn reject_forbidden_chars() {
        assert!(validate_class_name("a,b").is_err());
        assert!(validate_class_name("a=b").is_err());
        assert!(validate_class_name("a[b").is_err());
        assert!(validate_class_name("a(b)").is_err());
        assert!(validate_class_name("a#b").is_err());
    }

    #[test]
    fn reject_empty_components() {
        assert!(validate_class_name(".Hidden").is_err());
        assert!(validate_class_name("Trailing.").is_err());
        assert!(validate_class_name("a..b").is_err());
    }

    #[test]
    fn reject_leading_digit_component() {
        assert!(validate_class_name("1st").is_err());
        assert!(validate_class_name("pkg.2nd").is_err());
        assert!(validate_class_name("v2").is_ok());
    }

    #[test]
    fn error_names_the_offender() {
        let err = ClassName::new("bad name").unwrap_err();
        assert!(err.to_string().contains("bad name"));
    }

    #[test]
    fn short_name_and_namespace() {
        let name = ClassName::new("pkg.models.User").unwrap();
        assert_eq!(name.short_name(), "User");
        assert_eq!(name.namespace(), Some("pkg.models"));

        let bare = ClassName::new("Root").unwrap();
        assert_eq!(bare.short_name(), "Root");
        assert_eq!(bare.namespace(), None);
    }

    #[test]
    fn parse_and_display_agree() {
        let name: ClassName = "pkg.Base".parse().unwrap();
        assert_eq!(name.to_string(), "pkg.Base");
        assert_eq!(format!("{name:?}"), "pkg.Base");
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let name: ClassName = serde_json::from_str("\"Root\"").unwrap();
        assert_eq!(name.as_str(), "Root");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Root\"");
        assert!(serde_json::from_str::<ClassName>("\"not valid\"").is_err());
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut set = std::collections::HashSet::new();
        set.insert(ClassName::new("Root").unwrap());
        assert!(set.contains("Root"));
    }
}
