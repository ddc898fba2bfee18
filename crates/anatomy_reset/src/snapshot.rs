//! # Snapshot Store
//!
//! One capture of every resettable node reachable from the configured
//! roots. Entries are keyed by node identity and never hold the node
//! alive; the store is rebuilt wholesale, never patched.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use anatomy_core::SceneGraph;
use anatomy_shared::{Quaternion, Transform, Vec3};

use crate::eligibility::Eligibility;

/// Traversal settings for [`SnapshotStore::build_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureRules {
    /// Selection rule.
    pub eligibility: Eligibility,
    /// Test the roots themselves, not only their descendants.
    pub include_roots: bool,
}

impl Default for CaptureRules {
    fn default() -> Self {
        Self {
            eligibility: Eligibility::default(),
            include_roots: true,
        }
    }
}

/// Immutable capture of one node's local pose.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<N> {
    node: N,
    name: String,
    transform: Transform,
}

impl<N: Copy> Snapshot<N> {
    /// The captured node.
    #[inline]
    #[must_use]
    pub fn node(&self) -> N {
        self.node
    }

    /// Node name at capture time.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Captured local transform.
    #[inline]
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Captured local position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Captured local rotation.
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quaternion {
        self.transform.rotation
    }

    /// Captured local scale.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }
}

/// Map from node identity to its [`Snapshot`].
#[derive(Clone, Debug)]
pub struct SnapshotStore<N> {
    entries: HashMap<N, Snapshot<N>>,
}

impl<N> Default for SnapshotStore<N> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<N: Copy + Eq + Hash + Debug> SnapshotStore<N> {
    /// An empty store. Restoring it does nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures every `_Controller` node reachable from `roots`, roots
    /// included.
    ///
    /// See [`SnapshotStore::build_with`].
    pub fn build<G, I>(graph: &G, roots: I) -> Self
    where
        G: SceneGraph<Node = N>,
        I: IntoIterator,
        I::Item: Into<Option<N>>,
    {
        Self::build_with(graph, roots, &CaptureRules::default())
    }

    /// Captures every node reachable from `roots` that `rules` selects.
    ///
    /// Traversal is depth-first pre-order with an explicit stack, so depth
    /// is bounded only by the hierarchy. Children of a captured node are
    /// still visited and may be captured themselves. `None` and dead roots
    /// are skipped; a node whose name or transform cannot be read is
    /// skipped but its children are still visited.
    pub fn build_with<G, I>(graph: &G, roots: I, rules: &CaptureRules) -> Self
    where
        G: SceneGraph<Node = N>,
        I: IntoIterator,
        I::Item: Into<Option<N>>,
    {
        let mut store = Self::new();
        let mut stack: Vec<N> = Vec::new();
        let mut visited = 0usize;

        for root in roots {
            let Some(root): Option<N> = root.into() else {
                tracing::debug!("skipping absent root");
                continue;
            };
            if !graph.contains(root) {
                tracing::debug!(root = ?root, "skipping destroyed root");
                continue;
            }

            if rules.include_roots {
                stack.push(root);
            } else {
                stack.extend(graph.children_of(root).into_iter().rev());
            }

            while let Some(node) = stack.pop() {
                visited += 1;
                store.visit(graph, node, &rules.eligibility);
                stack.extend(graph.children_of(node).into_iter().rev());
            }
        }

        tracing::debug!(visited, captured = store.len(), "snapshot store built");
        store
    }

    fn visit<G: SceneGraph<Node = N>>(&mut self, graph: &G, node: N, eligibility: &Eligibility) {
        match eligibility.matches(graph, node) {
            Ok(true) => {}
            Ok(false) => return,
            Err(err) => {
                tracing::warn!(node = ?node, %err, "cannot test node, skipping");
                return;
            }
        }

        let transform = match graph.local_transform_of(node) {
            Ok(transform) => transform,
            Err(err) => {
                tracing::warn!(node = ?node, %err, "cannot read transform, skipping");
                return;
            }
        };
        let name = graph.name_of(node).map(str::to_owned).unwrap_or_default();

        self.entries.insert(
            node,
            Snapshot {
                node,
                name,
                transform,
            },
        );
    }

    /// Number of captured nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was captured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `node` was captured.
    #[inline]
    #[must_use]
    pub fn contains(&self, node: N) -> bool {
        self.entries.contains_key(&node)
    }

    /// Snapshot of `node`, if captured.
    #[inline]
    #[must_use]
    pub fn get(&self, node: N) -> Option<&Snapshot<N>> {
        self.entries.get(&node)
    }

    /// All snapshots, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot<N>> {
        self.entries.values()
    }

    /// All captured nodes, in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.entries.keys().copied()
    }
}
