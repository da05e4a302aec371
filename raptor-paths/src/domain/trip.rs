//! Trip and pattern types.
//!
//! A `Pattern` is an ordered list of stops served by a set of trips that
//! all call at exactly those stops. Each trip's times live in a
//! `TripTimes`. Trips in a pattern are ordered by departure and do not
//! overtake one another, which is what makes the trip searches below
//! a simple scan.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::{DomainError, StopIndex, TransitTime};

/// Stable identifier of a trip, as published by the feed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(Arc<str>);

impl TripId {
    /// Creates a trip id.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.0)
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a pattern in the transit data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternIndex(pub u32);

/// Reference to one trip in one pattern's timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripRef {
    pub pattern: PatternIndex,
    /// Position of the trip in the pattern's departure-ordered trip list.
    pub trip: usize,
}

impl TripRef {
    pub fn new(pattern: PatternIndex, trip: usize) -> Self {
        Self { pattern, trip }
    }
}

/// Scheduled times of one trip along its pattern.
///
/// # Invariants
///
/// - `arrivals` and `departures` have one entry per pattern stop
/// - At each stop, arrival is not after departure
/// - Times never decrease along the trip
#[derive(Debug, Clone)]
pub struct TripTimes {
    id: TripId,
    arrivals: Vec<TransitTime>,
    departures: Vec<TransitTime>,
}

impl TripTimes {
    /// Construct trip times, validating ordering.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the vectors differ in length, are empty, or the
    /// times go backwards.
    pub fn new(
        id: TripId,
        arrivals: Vec<TransitTime>,
        departures: Vec<TransitTime>,
    ) -> Result<Self, DomainError> {
        if arrivals.is_empty() || arrivals.len() != departures.len() {
            return Err(DomainError::InvalidTrip(
                "arrival and departure lists must be non-empty and equal length",
            ));
        }

        for (arr, dep) in arrivals.iter().zip(&departures) {
            if dep < arr {
                return Err(DomainError::InvalidTrip("departure before arrival"));
            }
        }
        for pos in 1..arrivals.len() {
            if arrivals[pos] < departures[pos - 1] {
                return Err(DomainError::InvalidTrip("trip times go backwards"));
            }
        }

        Ok(Self {
            id,
            arrivals,
            departures,
        })
    }

    /// Trip with no dwell: arrival equals departure at every stop.
    pub fn from_passing_times(id: TripId, times: Vec<TransitTime>) -> Result<Self, DomainError> {
        Self::new(id, times.clone(), times)
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    /// Number of stop positions on this trip.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    pub fn arrival(&self, pos: usize) -> Option<TransitTime> {
        self.arrivals.get(pos).copied()
    }

    pub fn departure(&self, pos: usize) -> Option<TransitTime> {
        self.departures.get(pos).copied()
    }
}

/// A stop sequence with the trips that serve it.
#[derive(Debug, Clone)]
pub struct Pattern {
    stops: Vec<StopIndex>,
    trips: Vec<TripTimes>,
}

impl Pattern {
    /// Construct a pattern.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are fewer than two stops or a trip's length
    /// doesn't match the stop count.
    pub fn new(stops: Vec<StopIndex>, trips: Vec<TripTimes>) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::InvalidTrip("pattern needs at least two stops"));
        }
        if trips.iter().any(|t| t.len() != stops.len()) {
            return Err(DomainError::InvalidTrip(
                "trip length does not match pattern stops",
            ));
        }
        Ok(Self { stops, trips })
    }

    pub fn stops(&self) -> &[StopIndex] {
        &self.stops
    }

    pub fn stop(&self, pos: usize) -> Option<StopIndex> {
        self.stops.get(pos).copied()
    }

    pub fn trips(&self) -> &[TripTimes] {
        &self.trips
    }

    pub fn trip(&self, index: usize) -> Option<&TripTimes> {
        self.trips.get(index)
    }

    /// Find the first trip departing `board_pos` at or after `earliest`.
    pub fn earliest_boarding(
        &self,
        board_pos: usize,
        earliest: TransitTime,
    ) -> Option<(usize, &TripTimes)> {
        self.trips
            .iter()
            .enumerate()
            .find(|(_, trip)| trip.departure(board_pos).is_some_and(|t| t >= earliest))
    }

    /// Find the last trip arriving at `alight_pos` at or before `latest`.
    pub fn latest_alighting(
        &self,
        alight_pos: usize,
        latest: TransitTime,
    ) -> Option<(usize, &TripTimes)> {
        self.trips
            .iter()
            .enumerate()
            .rev()
            .find(|(_, trip)| trip.arrival(alight_pos).is_some_and(|t| t <= latest))
    }
}
