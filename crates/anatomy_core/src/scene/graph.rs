//! # Scene Graph Adapter
//!
//! The narrow surface through which the reset subsystem sees the host's
//! scene. The host owns every node; implementors only expose reads,
//! pose writes, and velocity resets.

use std::fmt::Debug;
use std::hash::Hash;

use anatomy_shared::Transform;

use crate::error::SceneResult;

/// Read/write view over an externally-owned node hierarchy.
///
/// All operations are synchronous. Reads must never insert or remove
/// nodes as a side effect.
pub trait SceneGraph {
    /// Stable node identity. Must stay valid as a key after the node dies;
    /// [`SceneGraph::contains`] then reports `false`.
    type Node: Copy + Eq + Hash + Debug;

    /// Handle to a physical body.
    type Body: Copy + Debug;

    /// Returns `true` while the node exists.
    fn contains(&self, node: Self::Node) -> bool;

    /// Nodes without a parent, in the host's native order.
    fn top_level(&self) -> Vec<Self::Node>;

    /// Direct children of `node` in the host's native order.
    ///
    /// A destroyed node has no children.
    fn children_of(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Display name of `node`.
    ///
    /// # Errors
    ///
    /// Fails if the node is gone or unreadable.
    fn name_of(&self, node: Self::Node) -> SceneResult<&str>;

    /// Local position, rotation and scale of `node`.
    ///
    /// # Errors
    ///
    /// Fails if the node is gone or unreadable.
    fn local_transform_of(&self, node: Self::Node) -> SceneResult<Transform>;

    /// Overwrites the local position, rotation and scale of `node`.
    ///
    /// # Errors
    ///
    /// Fails if the node is gone or rejects the write.
    fn set_local_transform(&mut self, node: Self::Node, transform: Transform) -> SceneResult<()>;

    /// Physical body attached to `node`, if any.
    fn physical_body_of(&self, node: Self::Node) -> Option<Self::Body>;

    /// Zeroes linear and angular velocity of `body`.
    ///
    /// # Errors
    ///
    /// Fails if the body no longer exists.
    fn reset_velocity(&mut self, body: Self::Body) -> SceneResult<()>;

    /// Explicit opt-in marker for reset eligibility.
    ///
    /// Hosts without tags keep the default.
    fn is_tagged_resettable(&self, _node: Self::Node) -> bool {
        false
    }
}
