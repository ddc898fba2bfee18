//! # Reset Eligibility
//!
//! Decides which nodes the snapshot store captures.
//!
//! The default reproduces the viewer's naming convention: any node whose
//! name ends with `_Controller` is resettable. Scenes that mark nodes
//! explicitly can switch to [`Eligibility::Tagged`], and
//! [`Eligibility::Either`] accepts both while a scene is being migrated.

use anatomy_core::{SceneGraph, SceneResult};
use serde::{Deserialize, Serialize};

/// Name suffix that marks a node as resettable.
pub const CONTROLLER_SUFFIX: &str = "_Controller";

fn default_suffix() -> String {
    CONTROLLER_SUFFIX.to_owned()
}

/// Rule selecting resettable nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Eligibility {
    /// Name ends with `suffix` (case-sensitive).
    NameSuffix {
        /// Required name suffix.
        #[serde(default = "default_suffix")]
        suffix: String,
    },
    /// Node carries the host's explicit resettable marker.
    Tagged,
    /// Either of the above.
    Either {
        /// Required name suffix.
        #[serde(default = "default_suffix")]
        suffix: String,
    },
}

impl Default for Eligibility {
    fn default() -> Self {
        Self::NameSuffix {
            suffix: default_suffix(),
        }
    }
}

impl Eligibility {
    /// Suffix rule with a custom suffix.
    #[must_use]
    pub fn name_suffix(suffix: impl Into<String>) -> Self {
        Self::NameSuffix {
            suffix: suffix.into(),
        }
    }

    /// The suffix this rule checks, if any.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        match self {
            Self::NameSuffix { suffix } | Self::Either { suffix } => Some(suffix),
            Self::Tagged => None,
        }
    }

    /// Tests `node` against the rule.
    ///
    /// # Errors
    ///
    /// Fails if the rule needs the node's name and the host cannot provide
    /// it.
    pub fn matches<G: SceneGraph>(&self, graph: &G, node: G::Node) -> SceneResult<bool> {
        match self {
            Self::NameSuffix { suffix } => Ok(graph.name_of(node)?.ends_with(suffix.as_str())),
            Self::Tagged => Ok(graph.is_tagged_resettable(node)),
            Self::Either { suffix } => {
                if graph.is_tagged_resettable(node) {
                    return Ok(true);
                }
                Ok(graph.name_of(node)?.ends_with(suffix.as_str()))
            }
        }
    }
}
