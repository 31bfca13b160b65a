//! Typed errors for the engine's fallible construction paths.
//!
//! The public mutator surface (`Manager`) reports failure with `bool`/sentinel
//! returns per the external interface contract. These types exist only for
//! the handful of construction-time failures that a caller must not silently
//! swallow.

/// Failure constructing an owned substructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// `PopularityHeap::create` was asked for a zero-capacity heap.
    #[error("heap capacity must be greater than zero")]
    ZeroCapacity,
}
