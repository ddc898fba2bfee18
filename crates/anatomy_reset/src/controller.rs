//! # Reset Controller
//!
//! Writes every snapshot back onto its live node and brings the node's
//! physical body to rest. Each entry is an absolute overwrite, so entries
//! are independent and repeated resets converge.

use anatomy_core::{SceneError, SceneGraph};

use crate::snapshot::{Snapshot, SnapshotStore};

/// What happened to one snapshot during a restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Pose written back and velocity cleared.
    Restored,
    /// The node was destroyed after capture.
    Missing,
    /// The host rejected the write.
    Failed(SceneError),
}

/// Summary of one [`reset_all`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetReport {
    /// Entries written back.
    pub restored: usize,
    /// Entries whose node no longer exists.
    pub missing: usize,
    /// Entries the host refused.
    pub failed: usize,
}

impl ResetReport {
    /// Total entries processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.restored + self.missing + self.failed
    }

    /// Returns `true` if nothing was skipped.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.missing == 0 && self.failed == 0
    }

    fn record(&mut self, outcome: &RestoreOutcome) {
        match outcome {
            RestoreOutcome::Restored => self.restored += 1,
            RestoreOutcome::Missing => self.missing += 1,
            RestoreOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Restores one snapshot.
///
/// 1. Skips the entry if its node is gone.
/// 2. Writes back position, rotation and scale.
/// 3. Zeroes linear and angular velocity if the node has a body.
///
/// A rejected transform write leaves the node untouched.
pub fn restore_entry<G: SceneGraph>(graph: &mut G, snapshot: &Snapshot<G::Node>) -> RestoreOutcome {
    let node = snapshot.node();
    if !graph.contains(node) {
        return RestoreOutcome::Missing;
    }

    if let Err(err) = graph.set_local_transform(node, snapshot.transform()) {
        if err.is_missing() {
            return RestoreOutcome::Missing;
        }
        tracing::warn!(node = ?node, name = snapshot.name(), %err, "transform restore rejected");
        return RestoreOutcome::Failed(err);
    }

    if let Some(body) = graph.physical_body_of(node) {
        if let Err(err) = graph.reset_velocity(body) {
            tracing::warn!(node = ?node, name = snapshot.name(), %err, "velocity reset rejected");
            return RestoreOutcome::Failed(err);
        }
    }

    RestoreOutcome::Restored
}

/// Restores every entry of `store`.
///
/// After this returns, every captured node that still exists holds its
/// captured pose and is at rest. Nodes outside the store are untouched.
/// Calling it before anything was captured is a no-op.
pub fn reset_all<G: SceneGraph>(graph: &mut G, store: &SnapshotStore<G::Node>) -> ResetReport {
    let mut report = ResetReport::default();
    for snapshot in store.iter() {
        let outcome = restore_entry(graph, snapshot);
        report.record(&outcome);
    }

    if report.is_clean() {
        tracing::debug!(restored = report.restored, "reset complete");
    } else {
        tracing::info!(
            restored = report.restored,
            missing = report.missing,
            failed = report.failed,
            "reset completed with skipped nodes"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use anatomy_core::{BodyHandle, NodeId, SceneResult, SceneWorld};
    use anatomy_shared::{Quaternion, Transform, Vec3};

    /// Host whose physics refuses every velocity reset.
    struct StuckBodies(SceneWorld);

    impl SceneGraph for StuckBodies {
        type Node = NodeId;
        type Body = BodyHandle;

        fn contains(&self, node: NodeId) -> bool {
            self.0.contains(node)
        }

        fn top_level(&self) -> Vec<NodeId> {
            self.0.top_level()
        }

        fn children_of(&self, node: NodeId) -> Vec<NodeId> {
            self.0.children_of(node)
        }

        fn name_of(&self, node: NodeId) -> SceneResult<&str> {
            self.0.name_of(node)
        }

        fn local_transform_of(&self, node: NodeId) -> SceneResult<Transform> {
            self.0.local_transform_of(node)
        }

        fn set_local_transform(&mut self, node: NodeId, transform: Transform) -> SceneResult<()> {
            self.0.set_local_transform(node, transform)
        }

        fn physical_body_of(&self, node: NodeId) -> Option<BodyHandle> {
            self.0.physical_body_of(node)
        }

        fn reset_velocity(&mut self, body: BodyHandle) -> SceneResult<()> {
            Err(SceneError::no_body(body.0))
        }
    }

    #[test]
    fn test_restores_pose_and_velocity() {
        let mut world = SceneWorld::new();
        let root = world.spawn("R", Transform::IDENTITY);
        let heart = world
            .spawn_child(root, "Heart_Controller", Transform::from_position(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();
        world.attach_body(heart).unwrap();
        let store = SnapshotStore::build(&world, [root]);

        let node = world.get_mut(heart).unwrap();
        node.transform = Transform::new(
            Vec3::new(5.0, 5.0, 5.0),
            Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.7),
            Vec3::new(2.0, 2.0, 2.0),
        );
        world.set_velocity(heart, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 3.0)).unwrap();

        let report = reset_all(&mut world, &store);
        assert_eq!(report, ResetReport { restored: 1, missing: 0, failed: 0 });
        assert_eq!(world.get(heart).unwrap().transform, Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        assert!(world.body(heart).unwrap().is_at_rest());
    }

    #[test]
    fn test_missing_node_is_skipped() {
        let mut world = SceneWorld::new();
        let root = world.spawn("R", Transform::IDENTITY);
        let gone = world.spawn_child(root, "Heart_Controller", Transform::IDENTITY).unwrap();
        let kept = world.spawn_child(root, "Lung_Controller", Transform::IDENTITY).unwrap();
        let store = SnapshotStore::build(&world, [root]);

        world.despawn(gone);
        world.get_mut(kept).unwrap().transform.position = Vec3::new(9.0, 9.0, 9.0);

        let report = reset_all(&mut world, &store);
        assert_eq!(report.restored, 1);
        assert_eq!(report.missing, 1);
        assert_eq!(report.total(), 2);
        assert_eq!(world.get(kept).unwrap().transform, Transform::IDENTITY);
    }

    #[test]
    fn test_reused_slot_is_not_overwritten() {
        let mut world = SceneWorld::new();
        let gone = world.spawn("Heart_Controller", Transform::IDENTITY);
        let store = SnapshotStore::build(&world, [gone]);
        world.despawn(gone);

        let moved = Transform::from_position(Vec3::new(3.0, 0.0, 0.0));
        let newcomer = world.spawn("Heart_Controller", moved);
        assert_eq!(newcomer.index(), gone.index());

        let report = reset_all(&mut world, &store);
        assert_eq!(report.missing, 1);
        assert_eq!(world.get(newcomer).unwrap().transform, moved);
    }

    #[test]
    fn test_rejected_write_is_counted() {
        let mut world = SceneWorld::new();
        let root = world.spawn("R", Transform::IDENTITY);
        let heart = world.spawn_child(root, "Heart_Controller", Transform::IDENTITY).unwrap();
        let lung = world.spawn_child(root, "Lung_Controller", Transform::IDENTITY).unwrap();
        let store = SnapshotStore::build(&world, [root]);

        world.get_mut(lung).unwrap().transform.position = Vec3::new(0.0, 7.0, 0.0);
        world.mark_unreadable(heart, true).unwrap();

        let report = reset_all(&mut world, &store);
        assert_eq!(report.failed, 1);
        assert_eq!(report.restored, 1);
        assert!(!report.is_clean());
        assert_eq!(world.get(lung).unwrap().transform, Transform::IDENTITY);
    }

    #[test]
    fn test_empty_store_is_noop() {
        let mut world = SceneWorld::new();
        let heart = world.spawn("Heart_Controller", Transform::IDENTITY);
        world.get_mut(heart).unwrap().transform.position = Vec3::new(1.0, 1.0, 1.0);

        let report = reset_all(&mut world, &SnapshotStore::new());
        assert_eq!(report, ResetReport::default());
        assert_eq!(
            world.get(heart).unwrap().transform.position,
            Vec3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_velocity_failure_keeps_written_pose() {
        let mut world = SceneWorld::new();
        let root = world.spawn("R", Transform::IDENTITY);
        let heart = world.spawn_child(root, "Heart_Controller", Transform::IDENTITY).unwrap();
        let lung = world.spawn_child(root, "Lung_Controller", Transform::IDENTITY).unwrap();
        world.attach_body(heart).unwrap();
        let store = SnapshotStore::build(&world, [root]);

        world.get_mut(heart).unwrap().transform.position = Vec3::new(4.0, 0.0, 0.0);
        world.get_mut(lung).unwrap().transform.position = Vec3::new(0.0, 4.0, 0.0);
        world.set_velocity(heart, Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO).unwrap();

        let mut host = StuckBodies(world);
        let report = reset_all(&mut host, &store);
        assert_eq!(report, ResetReport { restored: 1, missing: 0, failed: 1 });

        let StuckBodies(world) = host;
        assert_eq!(world.get(heart).unwrap().transform, Transform::IDENTITY);
        assert!(!world.body(heart).unwrap().is_at_rest());
        assert_eq!(world.get(lung).unwrap().transform, Transform::IDENTITY);
    }
}
