//! Errors returned by the checked accessors of [`HybridVec`](crate::HybridVec).

use thiserror::Error;

/// A failed checked access.
///
/// Both variants are local to the failing call: the container is left
/// unchanged and remains fully usable afterwards.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// Indexed access at or past the logical length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// `front`/`back` access on an empty container.
    #[error("container is empty")]
    Empty,
}

/// Convenience alias for the checked accessors.
pub type Result<T> = core::result::Result<T, AccessError>;
