//! # Scene
//!
//! Host-side view of the node hierarchy.
//!
//! ## Design Philosophy
//!
//! - The host owns node lifetime; callers only hold generational ids
//! - A destroyed node is detected by a generation mismatch, never by a
//!   dangling pointer
//! - Child order is the host's business and carries no meaning

mod graph;
mod node;
mod world;

pub use graph::SceneGraph;
pub use node::{BodyHandle, NodeId, RigidBody, SceneNode};
pub use world::SceneWorld;
