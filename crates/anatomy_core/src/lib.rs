//! # Anatomy Core
//!
//! Scene graph adapter for the anatomy viewer's reset subsystem:
//! - [`SceneGraph`]: the only surface the reset logic touches
//! - [`NodeId`]: generational weak reference to a host node
//! - [`SceneWorld`]: in-memory host scene implementing the adapter
//!
//! ## Example
//!
//! ```rust,ignore
//! use anatomy_core::{SceneGraph, SceneWorld};
//! use anatomy_shared::Transform;
//!
//! let mut world = SceneWorld::new();
//! let root = world.spawn("Skeleton", Transform::IDENTITY);
//! let femur = world.spawn_child(root, "Femur_Controller", Transform::IDENTITY)?;
//! assert_eq!(world.children_of(root), vec![femur]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod scene;

pub use error::{SceneError, SceneResult};
pub use scene::{BodyHandle, NodeId, RigidBody, SceneGraph, SceneNode, SceneWorld};
