//! # Scene Error Types
//!
//! Failures reported by a scene graph adapter. None of them are fatal to the
//! host: callers skip the affected node and carry on.

use std::fmt::Debug;

use thiserror::Error;

/// Errors that can occur when reading or writing the host scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The node was destroyed or never existed.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// The node exists but its state cannot be read.
    #[error("node {0} is unreadable")]
    Unreadable(String),

    /// The node exists but its state cannot be written.
    #[error("node {0} rejected the write")]
    NotWritable(String),

    /// The node has no physical body attached.
    #[error("node {0} has no physical body")]
    NoBody(String),
}

impl SceneError {
    /// Builds a [`SceneError::NodeNotFound`] for any debuggable node handle.
    #[must_use]
    pub fn not_found(node: impl Debug) -> Self {
        Self::NodeNotFound(format!("{node:?}"))
    }

    /// Builds a [`SceneError::Unreadable`] for any debuggable node handle.
    #[must_use]
    pub fn unreadable(node: impl Debug) -> Self {
        Self::Unreadable(format!("{node:?}"))
    }

    /// Builds a [`SceneError::NotWritable`] for any debuggable node handle.
    #[must_use]
    pub fn not_writable(node: impl Debug) -> Self {
        Self::NotWritable(format!("{node:?}"))
    }

    /// Builds a [`SceneError::NoBody`] for any debuggable node handle.
    #[must_use]
    pub fn no_body(node: impl Debug) -> Self {
        Self::NoBody(format!("{node:?}"))
    }

    /// Returns `true` if the error means the node is gone.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::NodeNotFound(_))
    }
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
