//! Domain error types.
//!
//! These errors represent invariant violations in legs, paths and
//! timetables. When one escapes path reconstruction it points at a bug in
//! whatever produced the input, not at an unreachable candidate.

use super::{Place, TransitTime};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Path has no legs
    #[error("path must have at least one leg")]
    EmptyPath,

    /// A leg ends before it starts
    #[error("leg ends at {end} before it starts at {start}")]
    NegativeDuration {
        start: TransitTime,
        end: TransitTime,
    },

    /// Consecutive legs don't share a place
    #[error("legs are not connected: {0:?} does not match {1:?}")]
    LegsNotConnected(Place, Place),

    /// A leg starts before the previous leg ends
    #[error("leg starting at {next_start} overlaps previous leg ending at {previous_end}")]
    OverlappingLegs {
        previous_end: TransitTime,
        next_start: TransitTime,
    },

    /// Invalid leg construction
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Invalid trip or pattern data
    #[error("invalid trip data: {0}")]
    InvalidTrip(&'static str),
}
