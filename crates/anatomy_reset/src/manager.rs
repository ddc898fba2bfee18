//! # Reset Manager
//!
//! Owns the configured roots and the snapshot store. The host calls
//! [`ResetManager::initialize`] once while the scene is in its initial
//! state, then [`ResetManager::reset_all`] whenever the user asks for a
//! reset.

use std::fmt::Debug;
use std::hash::Hash;

use anatomy_core::{SceneError, SceneGraph};

use crate::config::ResetConfig;
use crate::controller::{self, ResetReport, RestoreOutcome};
use crate::error::{ResetError, ResetResult};
use crate::snapshot::{CaptureRules, SnapshotStore};

/// Build-once, reset-many front end over a host scene.
///
/// The manager never owns the scene: every call borrows it.
///
/// # Example
///
/// ```rust,ignore
/// let mut manager = ResetManager::new(ResetConfig::load("reset.toml")?)?;
/// manager.initialize_from_config(&world);
///
/// // ... user drags organs around ...
///
/// let report = manager.reset_all(&mut world);
/// ```
#[derive(Debug)]
pub struct ResetManager<N> {
    config: ResetConfig,
    roots: Vec<N>,
    store: SnapshotStore<N>,
    initialized: bool,
}

impl<N: Copy + Eq + Hash + Debug> ResetManager<N> {
    /// Creates an uninitialized manager.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::InvalidConfig`] if `config` fails
    /// [`ResetConfig::validate`].
    pub fn new(config: ResetConfig) -> ResetResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ResetConfig) -> Self {
        Self {
            config,
            roots: Vec::new(),
            store: SnapshotStore::new(),
            initialized: false,
        }
    }

    /// Remembers `roots` and captures every resettable node below them.
    ///
    /// `None` roots are dropped. Calling this again replaces both the roots
    /// and the store.
    pub fn initialize<G, I>(&mut self, graph: &G, roots: I)
    where
        G: SceneGraph<Node = N>,
        I: IntoIterator,
        I::Item: Into<Option<N>>,
    {
        self.roots = roots.into_iter().filter_map(Into::<Option<N>>::into).collect();
        self.rebuild(graph);
    }

    /// Resolves the configured root names and initializes from them.
    ///
    /// Returns how many roots were found.
    pub fn initialize_from_config<G: SceneGraph<Node = N>>(&mut self, graph: &G) -> usize {
        let roots = self.config.resolve_roots(graph);
        self.initialize(graph, roots);
        self.roots.len()
    }

    /// Captures the current scene again from the remembered roots.
    ///
    /// Every entry is replaced. Roots destroyed since initialization are
    /// skipped.
    pub fn rebuild<G: SceneGraph<Node = N>>(&mut self, graph: &G) {
        let rules = self.capture_rules();
        self.store = SnapshotStore::build_with(graph, self.roots.iter().copied(), &rules);
        self.initialized = true;
        tracing::info!(
            roots = self.roots.len(),
            captured = self.store.len(),
            "reset snapshots captured"
        );
    }

    /// Restores every captured node.
    ///
    /// Before initialization this does nothing.
    pub fn reset_all<G: SceneGraph<Node = N>>(&self, graph: &mut G) -> ResetReport {
        if !self.initialized {
            tracing::debug!("reset requested before initialization");
            return ResetReport::default();
        }
        controller::reset_all(graph, &self.store)
    }

    /// Restores a single captured node.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::NotCaptured`] if the node has no snapshot,
    /// and [`ResetError::Scene`] if it is gone or the host rejects the
    /// write.
    pub fn reset_node<G: SceneGraph<Node = N>>(&self, graph: &mut G, node: N) -> ResetResult<()> {
        let snapshot = self
            .store
            .get(node)
            .ok_or_else(|| ResetError::NotCaptured(format!("{node:?}")))?;
        match controller::restore_entry(graph, snapshot) {
            RestoreOutcome::Restored => Ok(()),
            RestoreOutcome::Missing => Err(SceneError::not_found(node).into()),
            RestoreOutcome::Failed(err) => Err(err.into()),
        }
    }

    /// Roots remembered at initialization.
    #[must_use]
    pub fn roots(&self) -> &[N] {
        &self.roots
    }

    /// Current snapshots.
    #[must_use]
    pub fn store(&self) -> &SnapshotStore<N> {
        &self.store
    }

    /// Returns `true` once snapshots have been captured.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn capture_rules(&self) -> CaptureRules {
        CaptureRules {
            eligibility: self.config.eligibility.clone(),
            include_roots: self.config.include_roots,
        }
    }
}

impl<N: Copy + Eq + Hash + Debug> Default for ResetManager<N> {
    fn default() -> Self {
        Self::with_valid_config(ResetConfig::default())
    }
}
