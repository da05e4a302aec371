//! Path type.
//!
//! A `Path` is one complete candidate itinerary from the search origin to
//! the search destination: access, one or more transit rides possibly
//! joined by transfers, and egress.

use chrono::Duration;

use super::{Cost, DomainError, Leg, Place, StopIndex, TransitTime, TripId};

/// One boarding in a path: which trip, boarded where.
pub type Boarding = (TripId, StopIndex);

/// A complete itinerary.
///
/// Paths are immutable once constructed. They have no value equality:
/// two paths with identical times but different trips are different
/// candidates.
///
/// # Invariants
///
/// - At least one leg
/// - Starts at [`Place::Origin`] and ends at [`Place::Destination`]
/// - Consecutive legs connect (`to` of one = `from` of the next)
/// - Legs don't overlap in time
#[derive(Debug, Clone)]
pub struct Path {
    legs: Vec<Leg>,
    cost: Option<Cost>,
    transit_count: usize,
    boardings: Vec<Boarding>,
    iteration_departure_time: Option<TransitTime>,
}

impl Path {
    /// Constructs a path from legs in travel order.
    ///
    /// `cost` is the total generalized cost, or `None` when the search does
    /// not optimize on cost.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `legs` is empty
    /// - A leg is invalid on its own
    /// - The path doesn't start at the origin or end at the destination
    /// - Consecutive legs don't connect or overlap in time
    ///
    /// # Examples
    ///
    /// ```
    /// use raptor_paths::domain::{Leg, Path, StopIndex, TransitTime};
    ///
    /// let t = |s| TransitTime::parse(s).unwrap();
    /// let legs = vec![
    ///     Leg::access(StopIndex(1), t("09:50"), t("10:00")).unwrap(),
    ///     Leg::egress(StopIndex(1), t("10:00"), t("10:05")).unwrap(),
    /// ];
    /// let path = Path::new(legs, None).unwrap();
    ///
    /// assert_eq!(path.transit_count(), 0);
    /// assert_eq!(path.start_time(), t("09:50"));
    /// assert_eq!(path.end_time(), t("10:05"));
    /// ```
    pub fn new(legs: Vec<Leg>, cost: Option<Cost>) -> Result<Self, DomainError> {
        let (first, last) = match (legs.first(), legs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(DomainError::EmptyPath),
        };

        if first.from() != Place::Origin || last.to() != Place::Destination {
            return Err(DomainError::InvalidLeg(
                "path must run from origin to destination",
            ));
        }

        for leg in &legs {
            leg.validate()?;
        }

        for window in legs.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if prev.to() != next.from() {
                return Err(DomainError::LegsNotConnected(prev.to(), next.from()));
            }
            if next.start_time() < prev.end_time() {
                return Err(DomainError::OverlappingLegs {
                    previous_end: prev.end_time(),
                    next_start: next.start_time(),
                });
            }
        }

        let boardings: Vec<Boarding> = legs
            .iter()
            .filter_map(|leg| {
                let details = leg.as_transit()?;
                let stop = leg.from().stop()?;
                Some((details.trip_id.clone(), stop))
            })
            .collect();

        Ok(Path {
            transit_count: boardings.len(),
            legs,
            cost,
            boardings,
            iteration_departure_time: None,
        })
    }

    /// Records the range-search iteration that produced this path.
    pub fn with_iteration_departure_time(mut self, time: TransitTime) -> Self {
        self.iteration_departure_time = Some(time);
        self
    }

    /// Returns all legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns only the transit legs.
    pub fn transit_legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter().filter(|leg| leg.is_transit())
    }

    /// Number of transit legs, which is the search round that found it.
    pub fn transit_count(&self) -> usize {
        self.transit_count
    }

    /// Number of transfers (transit legs - 1, or 0 without transit).
    pub fn number_of_transfers(&self) -> usize {
        self.transit_count.saturating_sub(1)
    }

    /// Departure from the origin (start of the first leg).
    pub fn start_time(&self) -> TransitTime {
        self.legs[0].start_time()
    }

    /// Arrival at the destination (end of the last leg).
    pub fn end_time(&self) -> TransitTime {
        self.legs[self.legs.len() - 1].end_time()
    }

    pub fn duration(&self) -> Duration {
        self.end_time().since(self.start_time())
    }

    /// Time spent between legs, waiting at stops.
    pub fn wait_time(&self) -> Duration {
        let moving: Duration = self.legs.iter().map(Leg::duration).sum();
        self.duration() - moving
    }

    /// Total generalized cost, `None` when computed without cost.
    pub fn cost(&self) -> Option<Cost> {
        self.cost
    }

    /// Ordered trips boarded, with their boarding stops.
    pub fn boardings(&self) -> &[Boarding] {
        &self.boardings
    }

    /// Departure time of the range-search iteration that found this path.
    pub fn iteration_departure_time(&self) -> Option<TransitTime> {
        self.iteration_departure_time
    }

    /// First stop reached after the access leg.
    pub fn first_stop(&self) -> Option<StopIndex> {
        self.legs[0].to().stop()
    }

    /// Last stop left by the egress leg.
    pub fn last_stop(&self) -> Option<StopIndex> {
        self.legs[self.legs.len() - 1].from().stop()
    }
}
