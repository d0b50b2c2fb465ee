//! Error types for acceleration structure construction.

use thiserror::Error;

/// Errors that can occur while building a [`Bvh`](crate::Bvh).
#[derive(Error, Debug)]
pub enum BvhError {
    /// No primitives were supplied and the settings forbid an empty scene.
    #[error("scene has no primitives")]
    EmptyScene,

    /// More primitives than a `u32` index can address.
    #[error("too many primitives: {count} (limit is {})", u32::MAX)]
    TooManyPrimitives {
        /// Number of primitives supplied.
        count: usize,
    },

    /// Invalid build settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The built tree is deeper than the traversal stack can hold.
    #[error("tree depth {depth} exceeds traversal stack capacity {limit}")]
    TreeTooDeep {
        /// Deepest leaf in the built tree (root has depth 0).
        depth: usize,
        /// Traversal stack capacity.
        limit: usize,
    },

    /// Settings could not be parsed.
    #[error("malformed settings: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for acceleration structure operations.
pub type Result<T> = std::result::Result<T, BvhError>;
