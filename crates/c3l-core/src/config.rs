use serde::{Deserialize, Serialize};

/// Configuration for a [`Linearizer`](crate::Linearizer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearizerConfig {
    /// Maximum number of parent hops followed from the queried node.
    /// Crossing it fails with [`C3Error::DepthExceeded`](crate::C3Error::DepthExceeded).
    pub max_depth: usize,
    /// Reuse ancestor linearizations within one top-level call.
    /// The memo never outlives the call.
    pub memoize: bool,
}

impl Default for LinearizerConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            memoize: true,
        }
    }
}

impl LinearizerConfig {
    /// Override the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Turn per-call memoization on or off.
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = LinearizerConfig::default();
        assert_eq!(c.max_depth, 256);
        assert!(c.memoize);
    }

    #[test]
    fn builders_override() {
        let c = LinearizerConfig::default().with_max_depth(8).with_memoize(false);
        assert_eq!(c.max_depth, 8);
        assert!(!c.memoize);
    }

    #[test]
    fn partial_section_fills_defaults() {
        let c: LinearizerConfig = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(c.max_depth, 4);
        assert!(c.memoize);
    }
}
