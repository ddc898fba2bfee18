//! # Anatomy Shared
//!
//! Math types used by the scene adapter and the reset subsystem.
//!
//! ## RULE
//!
//! This crate holds plain data only. Scene access lives in `anatomy_core`,
//! snapshot and restore logic in `anatomy_reset`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{Quaternion, Transform, Vec3};
