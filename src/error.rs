//! Error types.

use thiserror::Error;

/// Errors returned by [`DepthRegistry`](crate::DepthRegistry) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DepthError {
    /// The requested depth has no table.
    #[error("depth {depth} is out of range, registry holds depths 0..{max}")]
    OutOfRange {
        /// Depth the caller asked for
        depth: usize,
        /// Number of depth tables in the registry
        max: usize,
    },
}
