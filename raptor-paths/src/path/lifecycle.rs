//! Observer hooks for search progress and result-set decisions.
//!
//! Subscribers are notified, never consulted: nothing they do changes which
//! paths are kept.

use crate::domain::{Path, TransitTime};
use crate::path::ReconstructError;
use crate::arrivals::DestinationArrival;

/// Callbacks at search boundaries.
pub trait LifeCycleObserver {
    /// A range-search iteration starts at `departure_time`.
    fn iteration_start(&mut self, departure_time: TransitTime) {
        let _ = departure_time;
    }

    /// Round `round` starts.
    fn round_start(&mut self, round: usize) {
        let _ = round;
    }

    /// Round `round` is complete.
    fn round_end(&mut self, round: usize) {
        let _ = round;
    }

    /// All rounds and iterations are done.
    fn search_complete(&mut self) {}
}

/// Why a destination arrival did not make it into the result set.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// A stored path dominates it.
    Dominated,
    /// A stored path is equal on every criterion.
    Duplicate,
    /// The arrival is outside the search time limit.
    OutsideTimeLimit,
}

/// Receives every decision the result set makes.
pub trait DebugHandler {
    fn accepted(&mut self, path: &Path) {
        let _ = path;
    }

    fn rejected(&mut self, path: Option<&Path>, reason: RejectReason) {
        let _ = (path, reason);
    }

    /// `path` was removed because `by` dominates it.
    fn evicted(&mut self, path: &Path, by: &Path) {
        let _ = (path, by);
    }

    /// The arrival could not be rebuilt into a path.
    fn dropped(&mut self, arrival: &DestinationArrival, error: &ReconstructError) {
        let _ = (arrival, error);
    }
}
