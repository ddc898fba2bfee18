//! # Anatomy Reset
//!
//! Snapshot-and-restore of resettable scene nodes.
//!
//! At startup the viewer captures the local pose of every resettable node
//! under a set of roots. A later reset writes those poses back and brings
//! every physical body to rest, undoing whatever the user did to the
//! scene.
//!
//! ## Rules
//!
//! 1. **Build once** - nodes spawned after capture are never reset
//! 2. **Absolute restore** - a reset overwrites, so repeating it is harmless
//! 3. **Never fatal** - destroyed or broken nodes are skipped, not reported
//!    as failures of the whole operation
//!
//! ## Example
//!
//! ```rust,ignore
//! use anatomy_reset::{ResetConfig, ResetManager};
//!
//! let mut manager = ResetManager::new(ResetConfig::default())?;
//! manager.initialize(&world, [organs_root, skeleton_root]);
//! // ...
//! manager.reset_all(&mut world);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod controller;
pub mod eligibility;
pub mod error;
pub mod manager;
pub mod snapshot;

pub use config::ResetConfig;
pub use controller::{reset_all, restore_entry, ResetReport, RestoreOutcome};
pub use eligibility::{Eligibility, CONTROLLER_SUFFIX};
pub use error::{ResetError, ResetResult};
pub use manager::ResetManager;
pub use snapshot::{CaptureRules, Snapshot, SnapshotStore};
