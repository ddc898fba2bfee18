//! # Node Identity
//!
//! Nodes are addressed by lightweight identifiers consisting of:
//! - An index into the scene's slot array
//! - A generation counter for detecting destroyed nodes

use anatomy_shared::{Transform, Vec3};

/// Unique identifier for a scene node.
///
/// The ID is split into two parts:
/// - Lower 32 bits: Index into the slot array
/// - Upper 32 bits: Generation counter for detecting stale references
///
/// A `NodeId` never keeps its node alive. Holders must check
/// [`SceneGraph::contains`](super::SceneGraph::contains) before writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new node ID from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the node ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the node ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

/// Handle to the physical body attached to a node.
///
/// Bodies are owned by the node they are attached to, so the handle simply
/// carries the owning node's id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub NodeId);

/// Simulated rigid body state.
///
/// The scene only stores velocities; integrating them is the physics
/// engine's job.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    /// Linear velocity in parent space, units per second.
    pub linear_velocity: Vec3,
    /// Angular velocity, radians per second around each axis.
    pub angular_velocity: Vec3,
}

impl RigidBody {
    /// A body at rest.
    pub const AT_REST: Self = Self {
        linear_velocity: Vec3::ZERO,
        angular_velocity: Vec3::ZERO,
    };

    /// Returns `true` if both velocities are zero.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.linear_velocity.is_zero() && self.angular_velocity.is_zero()
    }
}

/// Per-node data stored in a [`SceneWorld`](super::SceneWorld).
///
/// Pose, body and tag are public so host code can manipulate them
/// directly. Hierarchy links are private: use `spawn_child` and `despawn`.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Display name.
    pub name: String,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Optional physical body.
    pub body: Option<RigidBody>,
    /// Explicit "resettable" marker.
    pub resettable: bool,
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) unreadable: bool,
}

impl SceneNode {
    pub(crate) fn new(id: NodeId, name: String, transform: Transform) -> Self {
        Self {
            name,
            transform,
            body: None,
            resettable: false,
            id,
            parent: None,
            children: Vec::new(),
            unreadable: false,
        }
    }

    /// This node's id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Parent node, or `None` for a top-level node.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
