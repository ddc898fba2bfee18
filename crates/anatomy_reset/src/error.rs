//! # Reset Error Types
//!
//! Errors surfaced by configuration loading and single-node resets.
//! `build` and `reset_all` never return these: they log and skip instead.

use std::path::PathBuf;

use anatomy_core::SceneError;
use thiserror::Error;

/// Errors that can occur in the reset subsystem.
#[derive(Error, Debug)]
pub enum ResetError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for [`ResetConfig`](crate::ResetConfig).
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The node was never captured by the snapshot store.
    #[error("node {0} has no snapshot")]
    NotCaptured(String),

    /// The host scene rejected an operation.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for reset operations.
pub type ResetResult<T> = Result<T, ResetError>;
