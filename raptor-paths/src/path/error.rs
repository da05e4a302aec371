//! Errors from configuring a result set and rebuilding paths.

use crate::arrivals::ArrivalId;
use crate::domain::{DomainError, PatternIndex, StopIndex, TransitTime, TripId};

/// Invalid search configuration. Fatal to search construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Relaxed cost only makes sense when optimizing on cost
    #[error("relaxed cost at destination requires generalized cost")]
    RelaxedCostWithoutCost,

    /// Relax factor must be finite and at least 1.0
    #[error("invalid cost relax factor {0}: must be finite and at least 1.0")]
    InvalidRelaxFactor(f64),

    /// Cost requested but nothing to compute it
    #[error("generalized cost requested but no cost calculator configured")]
    MissingCostCalculator,

    /// Configuration could not be read
    #[error("failed to read search config: {0}")]
    Read(String),
}

/// Why an arrival could not be turned into a path.
///
/// These are per-candidate: the arrival is dropped and the search goes on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReconstructError {
    /// Back-pointer refers to a record that doesn't exist
    #[error("arrival {0:?} is not in the arrival table")]
    DanglingArrival(ArrivalId),

    /// Chain is longer than the table, so it loops
    #[error("arrival chain does not terminate")]
    CyclicChain,

    /// Leg kinds are in an order no path can have
    #[error("arrival chain has invalid leg order: {0}")]
    InvalidLegOrder(&'static str),

    /// Round numbers along the chain don't add up
    #[error("round mismatch: expected round {expected}, record says {actual}")]
    RoundMismatch { expected: usize, actual: usize },

    /// Trip doesn't serve the stop the chain says it does
    #[error("trip does not serve stop {stop} at position {pos}")]
    StopMismatch { stop: StopIndex, pos: usize },

    /// Walk doesn't start or end where the chain says it does
    #[error("walk connects stop {expected}, chain has stop {actual}")]
    WalkMismatch {
        expected: StopIndex,
        actual: StopIndex,
    },

    /// Pattern or trip referenced by the chain is not in the transit data
    #[error("unknown trip {trip} in pattern {pattern:?}")]
    UnknownTrip { pattern: PatternIndex, trip: usize },

    /// Exact trip search found no trip matching the recorded times
    #[error("no trip in pattern {pattern:?} matches board/alight times near {time}")]
    TripNotFound {
        pattern: PatternIndex,
        time: TransitTime,
    },

    /// A constrained transfer forbids this connection
    #[error("transfer from {from} to {to} at stop {stop} is forbidden")]
    ForbiddenTransfer {
        from: TripId,
        to: TripId,
        stop: StopIndex,
    },

    /// Connection is shorter (or, for exact rules, not equal to) the rule
    #[error("transfer from {from} to {to} violates its time constraint")]
    TransferTimeViolated { from: TripId, to: TripId },

    /// A walk or slack pushes a time out of the representable range
    #[error("time out of range while placing legs")]
    TimeOverflow,
}

/// Failure of a path mapper.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// The candidate does not exist; drop it.
    #[error(transparent)]
    Reconstruction(#[from] ReconstructError),

    /// The mapper built an invalid path; something upstream is broken.
    #[error("internal consistency error: {0}")]
    Inconsistent(#[from] DomainError),
}
