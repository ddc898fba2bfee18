//! # Scene World
//!
//! In-memory host scene. Nodes live in a slot array; a free list recycles
//! slots and every reuse bumps the slot generation so old ids stop
//! resolving.

use anatomy_shared::{Transform, Vec3};

use super::graph::SceneGraph;
use super::node::{BodyHandle, NodeId, RigidBody, SceneNode};
use crate::error::{SceneError, SceneResult};

/// One slot of the arena.
#[derive(Clone, Debug)]
struct Slot {
    /// Generation of the most recent occupant.
    generation: u32,
    /// Occupant, `None` while the slot is free.
    node: Option<SceneNode>,
}

/// Hierarchical scene of named nodes with local transforms and optional
/// rigid bodies.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = SceneWorld::new();
/// let root = world.spawn("Body", Transform::IDENTITY);
/// let heart = world.spawn_child(root, "Heart_Controller", Transform::IDENTITY)?;
/// world.despawn(root); // heart goes with it
/// assert!(!world.contains(heart));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SceneWorld {
    /// All slots, alive or free.
    slots: Vec<Slot>,
    /// Free list of slot indices for reuse.
    free_indices: Vec<u32>,
    /// Nodes without a parent, in spawn order.
    top_level: Vec<NodeId>,
    /// Number of currently alive nodes.
    alive_count: usize,
}

impl SceneWorld {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scene with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_indices: Vec::new(),
            top_level: Vec::new(),
            alive_count: 0,
        }
    }

    /// Returns the number of currently alive nodes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.alive_count
    }

    /// Returns `true` if the scene has no nodes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.alive_count == 0
    }

    /// Spawns a top-level node.
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        let id = self.allocate(name.into(), transform);
        self.top_level.push(id);
        id
    }

    /// Spawns a node as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if `parent` is dead.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
    ) -> SceneResult<NodeId> {
        if !self.contains(parent) {
            return Err(SceneError::not_found(parent));
        }
        let id = self.allocate(name.into(), transform);
        if let Some(node) = self.get_mut(id) {
            node.parent = Some(parent);
        }
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(id);
        }
        Ok(id)
    }

    fn allocate(&mut self, name: String, transform: Transform) -> NodeId {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            // Increment generation to invalidate old references
            slot.generation = slot.generation.wrapping_add(1);
            let id = NodeId::new(index, slot.generation);
            slot.node = Some(SceneNode::new(id, name, transform));
            return id;
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        let id = NodeId::new(index, 0);
        self.slots.push(Slot {
            generation: 0,
            node: Some(SceneNode::new(id, name, transform)),
        });
        id
    }

    /// Destroys a node and its whole subtree.
    ///
    /// # Returns
    ///
    /// `true` if the node was alive, `false` if it was already gone or the
    /// id is stale.
    pub fn despawn(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.get(id).map(SceneNode::parent) else {
            return false;
        };

        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.get_mut(parent) {
                    parent_node.children.retain(|&c| c != id);
                }
            }
            None => self.top_level.retain(|&r| r != id),
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.slots[current.index() as usize].node.take() else {
                continue;
            };
            stack.extend(node.children);
            self.free_indices.push(current.index());
            self.alive_count -= 1;
        }

        tracing::debug!(node = ?id, "despawned subtree");
        true
    }

    /// Checks if a node is alive.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Gets a node by ID.
    ///
    /// # Returns
    ///
    /// Reference to the node, or None if not found/dead/stale.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    /// Gets a mutable node by ID.
    ///
    /// # Returns
    ///
    /// Mutable reference to the node, or None if not found/dead/stale.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.get_mut(id).ok_or_else(|| SceneError::not_found(id))
    }

    /// Iterates over all alive nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.slots.iter().filter_map(|slot| slot.node.as_ref())
    }

    /// Attaches a rigid body at rest, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the node is dead.
    pub fn attach_body(&mut self, id: NodeId) -> SceneResult<BodyHandle> {
        self.node_mut(id)?.body = Some(RigidBody::AT_REST);
        Ok(BodyHandle(id))
    }

    /// Sets both velocities of the node's body.
    ///
    /// # Errors
    ///
    /// Fails if the node is dead or has no body.
    pub fn set_velocity(&mut self, id: NodeId, linear: Vec3, angular: Vec3) -> SceneResult<()> {
        let body = self
            .node_mut(id)?
            .body
            .as_mut()
            .ok_or_else(|| SceneError::no_body(id))?;
        body.linear_velocity = linear;
        body.angular_velocity = angular;
        Ok(())
    }

    /// Rigid body state of a node, if it has one.
    #[must_use]
    pub fn body(&self, id: NodeId) -> Option<&RigidBody> {
        self.get(id).and_then(|node| node.body.as_ref())
    }

    /// Sets or clears the explicit resettable marker.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the node is dead.
    pub fn set_resettable(&mut self, id: NodeId, resettable: bool) -> SceneResult<()> {
        self.node_mut(id)?.resettable = resettable;
        Ok(())
    }

    /// Makes adapter transform reads and writes of this node fail.
    ///
    /// Models a host node whose backing state is corrupted. Direct access
    /// through [`SceneWorld::get`] is unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the node is dead.
    pub fn mark_unreadable(&mut self, id: NodeId, unreadable: bool) -> SceneResult<()> {
        self.node_mut(id)?.unreadable = unreadable;
        Ok(())
    }

    fn readable(&self, id: NodeId) -> SceneResult<&SceneNode> {
        let node = self.get(id).ok_or_else(|| SceneError::not_found(id))?;
        if node.unreadable {
            return Err(SceneError::unreadable(id));
        }
        Ok(node)
    }
}

impl SceneGraph for SceneWorld {
    type Node = NodeId;
    type Body = BodyHandle;

    fn contains(&self, node: NodeId) -> bool {
        SceneWorld::contains(self, node)
    }

    fn top_level(&self) -> Vec<NodeId> {
        self.top_level.clone()
    }

    fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn name_of(&self, node: NodeId) -> SceneResult<&str> {
        self.get(node)
            .map(|n| n.name.as_str())
            .ok_or_else(|| SceneError::not_found(node))
    }

    fn local_transform_of(&self, node: NodeId) -> SceneResult<Transform> {
        self.readable(node).map(|n| n.transform)
    }

    fn set_local_transform(&mut self, node: NodeId, transform: Transform) -> SceneResult<()> {
        let target = self.node_mut(node)?;
        if target.unreadable {
            return Err(SceneError::not_writable(node));
        }
        target.transform = transform;
        Ok(())
    }

    fn physical_body_of(&self, node: NodeId) -> Option<BodyHandle> {
        self.body(node).map(|_| BodyHandle(node))
    }

    fn reset_velocity(&mut self, body: BodyHandle) -> SceneResult<()> {
        let BodyHandle(node) = body;
        let state = self
            .node_mut(node)?
            .body
            .as_mut()
            .ok_or_else(|| SceneError::no_body(node))?;
        *state = RigidBody::AT_REST;
        Ok(())
    }

    fn is_tagged_resettable(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|n| n.resettable)
    }
}
