//! The destination result set.
//!
//! The round loop hands every destination arrival to [`DestinationPaths::offer`].
//! Arrivals outside the time limit are rejected straight away; the rest are
//! mapped to paths and offered to a Pareto set under the search's
//! comparator. Arrivals that can't be mapped are dropped and the search
//! carries on.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::comparator::PathComparator;
use super::display::PathDisplay;
use super::error::{PathError, ReconstructError};
use super::lifecycle::{DebugHandler, LifeCycleObserver, RejectReason};
use super::mapper::PathMapper;
use super::pareto::{Insert, ParetoSet};
use crate::arrivals::{ArrivalTable, DestinationArrival};
use crate::domain::{DomainError, Path, TransitTime};
use crate::transit::{StopIndexNames, StopNameResolver};

/// Bound on destination arrival times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLimit {
    /// Forward searches: arrive no later than this.
    LatestArrival(TransitTime),
    /// Reverse searches: leave no earlier than this.
    EarliestDeparture(TransitTime),
}

impl TimeLimit {
    pub fn admits(&self, time: TransitTime) -> bool {
        match *self {
            TimeLimit::LatestArrival(limit) => time <= limit,
            TimeLimit::EarliestDeparture(limit) => time >= limit,
        }
    }
}

/// What happened to an offered arrival.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferOutcome {
    /// Stored, evicting this many paths.
    Accepted { evicted: usize },
    /// A stored path dominates it.
    Dominated,
    /// A stored path is equal on every criterion.
    Duplicate,
    OutsideTimeLimit,
    /// The arrival could not be mapped to a path.
    Dropped(ReconstructError),
}

impl OfferOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, OfferOutcome::Accepted { .. })
    }
}

/// Pareto-optimal paths to the destination of one search.
pub struct DestinationPaths<'a> {
    paths: ParetoSet<Path, PathComparator>,
    mapper: Box<dyn PathMapper + 'a>,
    time_limit: Option<TimeLimit>,
    reached_current_round: bool,
    iteration_departure_time: Option<TransitTime>,
    observers: Vec<Box<dyn LifeCycleObserver + 'a>>,
    debug_handler: Option<Box<dyn DebugHandler + 'a>>,
    names: &'a dyn StopNameResolver,
}

impl<'a> DestinationPaths<'a> {
    pub fn new(comparator: PathComparator, mapper: Box<dyn PathMapper + 'a>) -> Self {
        Self {
            paths: ParetoSet::new(comparator),
            mapper,
            time_limit: None,
            reached_current_round: false,
            iteration_departure_time: None,
            observers: Vec::new(),
            debug_handler: None,
            names: &StopIndexNames,
        }
    }

    pub fn with_time_limit(mut self, limit: TimeLimit) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_stop_names(mut self, names: &'a dyn StopNameResolver) -> Self {
        self.names = names;
        self
    }

    pub fn with_debug_handler(mut self, handler: Box<dyn DebugHandler + 'a>) -> Self {
        self.debug_handler = Some(handler);
        self
    }

    /// Register a lifecycle observer. Events are forwarded in subscription
    /// order.
    pub fn subscribe(&mut self, observer: Box<dyn LifeCycleObserver + 'a>) {
        self.observers.push(observer);
    }

    pub fn comparator(&self) -> &PathComparator {
        self.paths.comparator()
    }

    /// Offer one destination arrival.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the mapper produced a path that breaks the
    /// path invariants, which points at a bug in the arrival data.
    /// Arrivals that simply cannot be mapped come back as
    /// [`OfferOutcome::Dropped`].
    pub fn offer(
        &mut self,
        table: &ArrivalTable,
        arrival: &DestinationArrival,
    ) -> Result<OfferOutcome, DomainError> {
        if let Some(limit) = self.time_limit {
            if !limit.admits(arrival.time) {
                trace!(time = %arrival.time, ?limit, "arrival outside time limit");
                if let Some(handler) = self.debug_handler.as_mut() {
                    handler.rejected(None, RejectReason::OutsideTimeLimit);
                }
                return Ok(OfferOutcome::OutsideTimeLimit);
            }
        }

        let path = match self.mapper.map_to_path(table, arrival) {
            Ok(path) => path,
            Err(PathError::Reconstruction(error)) => {
                debug!(
                    time = %arrival.time,
                    round = arrival.round,
                    stop = %self.names.stop_name(arrival.egress.stop),
                    %error,
                    "dropped destination arrival"
                );
                if let Some(handler) = self.debug_handler.as_mut() {
                    handler.dropped(arrival, &error);
                }
                return Ok(OfferOutcome::Dropped(error));
            }
            Err(PathError::Inconsistent(error)) => return Err(error),
        };
        let path = match self.iteration_departure_time {
            Some(time) => path.with_iteration_departure_time(time),
            None => path,
        };

        // Only keep a copy around when someone wants to see rejected paths.
        let candidate = self.debug_handler.as_ref().map(|_| path.clone());

        match self.paths.add(path) {
            Insert::Accepted { evicted } => {
                self.reached_current_round = true;
                let Some(stored) = self.paths.as_slice().last() else {
                    return Ok(OfferOutcome::Accepted { evicted: evicted.len() });
                };
                debug!(
                    path = %PathDisplay::new(stored, self.names),
                    round = arrival.round,
                    evicted = evicted.len(),
                    "accepted path"
                );
                for old in &evicted {
                    trace!(path = %PathDisplay::new(old, self.names), "evicted path");
                }
                if let Some(handler) = self.debug_handler.as_mut() {
                    handler.accepted(stored);
                    for old in &evicted {
                        handler.evicted(old, stored);
                    }
                }
                Ok(OfferOutcome::Accepted {
                    evicted: evicted.len(),
                })
            }
            Insert::Dominated => {
                self.reject(candidate.as_ref(), RejectReason::Dominated, arrival);
                Ok(OfferOutcome::Dominated)
            }
            Insert::Equal => {
                self.reject(candidate.as_ref(), RejectReason::Duplicate, arrival);
                Ok(OfferOutcome::Duplicate)
            }
        }
    }

    fn reject(&mut self, path: Option<&Path>, reason: RejectReason, arrival: &DestinationArrival) {
        trace!(time = %arrival.time, round = arrival.round, ?reason, "rejected path");
        if let Some(handler) = self.debug_handler.as_mut() {
            handler.rejected(path, reason);
        }
    }

    /// The current Pareto-optimal paths.
    pub fn results(&self) -> &[Path] {
        self.paths.as_slice()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Was a path accepted since the current round started?
    pub fn reached_current_round(&self) -> bool {
        self.reached_current_round
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths.into_vec()
    }

    /// A range-search iteration starts. Paths accepted from now on record
    /// `departure_time`.
    pub fn iteration_start(&mut self, departure_time: TransitTime) {
        self.iteration_departure_time = Some(departure_time);
        for observer in &mut self.observers {
            observer.iteration_start(departure_time);
        }
    }

    pub fn round_start(&mut self, round: usize) {
        self.reached_current_round = false;
        for observer in &mut self.observers {
            observer.round_start(round);
        }
    }

    pub fn round_end(&mut self, round: usize) {
        trace!(round, paths = self.paths.len(), reached = self.reached_current_round, "round done");
        for observer in &mut self.observers {
            observer.round_end(round);
        }
    }

    pub fn search_complete(&mut self) {
        debug!(paths = self.paths.len(), "search complete");
        for observer in &mut self.observers {
            observer.search_complete();
        }
    }
}

impl std::fmt::Debug for DestinationPaths<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationPaths")
            .field("comparator", self.paths.comparator())
            .field("paths", &self.paths.len())
            .field("time_limit", &self.time_limit)
            .field("reached_current_round", &self.reached_current_round)
            .finish_non_exhaustive()
    }
}
