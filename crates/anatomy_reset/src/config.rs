//! # Reset Configuration
//!
//! Loaded once at startup from TOML:
//!
//! ```toml
//! roots = ["Skeleton", "Organs"]
//! include_roots = true
//!
//! [eligibility]
//! mode = "name_suffix"
//! suffix = "_Controller"
//! ```
//!
//! Every field is optional; the defaults reproduce the viewer's behaviour.

use std::path::Path;

use anatomy_core::SceneGraph;
use serde::{Deserialize, Serialize};

use crate::eligibility::Eligibility;
use crate::error::{ResetError, ResetResult};

/// Which subtrees participate in reset, and how nodes are selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetConfig {
    /// Names of the root nodes whose subtrees are captured.
    pub roots: Vec<String>,
    /// Test the roots themselves, not only their descendants.
    ///
    /// Defaults to `true`. `false` matches the original viewer, which only
    /// tested the descendants of each root.
    pub include_roots: bool,
    /// Selection rule.
    pub eligibility: Eligibility,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            include_roots: true,
            eligibility: Eligibility::default(),
        }
    }
}

impl ResetConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::Parse`] for malformed TOML and
    /// [`ResetError::InvalidConfig`] for unusable values.
    pub fn from_toml_str(text: &str) -> ResetResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::Io`] if the file cannot be read, otherwise as
    /// [`ResetConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ResetResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ResetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), roots = config.roots.len(), "loaded reset config");
        Ok(config)
    }

    /// Checks values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// An empty suffix would mark every node resettable and is rejected.
    pub fn validate(&self) -> ResetResult<()> {
        if self.eligibility.suffix() == Some("") {
            return Err(ResetError::InvalidConfig(
                "eligibility suffix must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Looks up each configured root name in the scene.
    ///
    /// Each name resolves to the first node with that name in depth-first
    /// pre-order from the host's top-level nodes. Unknown names resolve to
    /// `None`, which `SnapshotStore::build` skips.
    #[must_use]
    pub fn resolve_roots<G: SceneGraph>(&self, graph: &G) -> Vec<Option<G::Node>> {
        self.roots
            .iter()
            .map(|name| {
                let found = find_by_name(graph, name);
                if found.is_none() {
                    tracing::warn!(root = %name, "configured root not found in scene");
                }
                found
            })
            .collect()
    }
}

fn find_by_name<G: SceneGraph>(graph: &G, name: &str) -> Option<G::Node> {
    let mut stack: Vec<G::Node> = graph.top_level().into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if graph.name_of(node).is_ok_and(|n| n == name) {
            return Some(node);
        }
        stack.extend(graph.children_of(node).into_iter().rev());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::CONTROLLER_SUFFIX;
    use anatomy_core::SceneWorld;
    use anatomy_shared::Transform;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ResetConfig::from_toml_str("").unwrap();
        assert_eq!(config, ResetConfig::default());
        assert!(config.include_roots);
        assert_eq!(config.eligibility.suffix(), Some(CONTROLLER_SUFFIX));
    }

    #[test]
    fn test_full_document() {
        let config = ResetConfig::from_toml_str(
            r#"
            roots = ["Skeleton", "Organs"]
            include_roots = false

            [eligibility]
            mode = "either"
            suffix = "_Grab"
            "#,
        )
        .unwrap();

        assert_eq!(config.roots, vec!["Skeleton", "Organs"]);
        assert!(!config.include_roots);
        assert_eq!(
            config.eligibility,
            Eligibility::Either {
                suffix: "_Grab".to_owned()
            }
        );
    }

    #[test]
    fn test_mode_without_suffix_defaults_suffix() {
        let config = ResetConfig::from_toml_str("[eligibility]\nmode = \"name_suffix\"\n").unwrap();
        assert_eq!(config.eligibility, Eligibility::default());

        let tagged = ResetConfig::from_toml_str("[eligibility]\nmode = \"tagged\"\n").unwrap();
        assert_eq!(tagged.eligibility, Eligibility::Tagged);
    }

    #[test]
    fn test_rejects_empty_suffix() {
        let err = ResetConfig::from_toml_str("[eligibility]\nmode = \"name_suffix\"\nsuffix = \"\"\n")
            .unwrap_err();
        assert!(matches!(err, ResetError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = ResetConfig::from_toml_str("roots = [").unwrap_err();
        assert!(matches!(err, ResetError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ResetConfig::load("/nonexistent/anatomy/reset.toml").unwrap_err();
        assert!(matches!(err, ResetError::Io { .. }));
    }

    #[test]
    fn test_resolve_roots() {
        let mut world = SceneWorld::new();
        let body = world.spawn("Body", Transform::IDENTITY);
        let organs = world.spawn_child(body, "Organs", Transform::IDENTITY).unwrap();

        let config = ResetConfig {
            roots: vec!["Organs".to_owned(), "Missing".to_owned()],
            ..ResetConfig::default()
        };
        assert_eq!(config.resolve_roots(&world), vec![Some(organs), None]);
    }

    #[test]
    fn test_resolve_roots_takes_first_preorder_match() {
        let mut world = SceneWorld::new();
        let a = world.spawn("A", Transform::IDENTITY);
        let first = world.spawn_child(a, "Organs", Transform::IDENTITY).unwrap();
        let b = world.spawn("B", Transform::IDENTITY);
        world.spawn_child(b, "Organs", Transform::IDENTITY).unwrap();

        let config = ResetConfig {
            roots: vec!["Organs".to_owned(), "B".to_owned()],
            ..ResetConfig::default()
        };
        assert_eq!(config.resolve_roots(&world), vec![Some(first), Some(b)]);
    }
}
