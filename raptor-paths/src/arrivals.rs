//! Round-indexed arrival records.
//!
//! The round-based search records every improved stop arrival in an
//! `ArrivalTable`. Each record points back at the arrival it was reached
//! from, so a destination arrival identifies a whole chain of boardings
//! without any per-path allocation. Path reconstruction walks that chain.
//!
//! We associate the minimum amount of data with each record:
//!  - Access   -> the access walk; starts a chain in round 0
//!  - Transit  -> the trip ridden and its board/alight positions; one round
//!                after the arrival it boarded from
//!  - Transfer -> the walk duration; same round as the arrival it left
//!
//! Times are in search direction. A forward search records the time it
//! arrives at each stop and chains run destination to origin. A reverse
//! search records the latest time it may leave each stop and chains run
//! origin to destination.

use chrono::Duration;

use crate::domain::{StopIndex, TransitTime, TripRef};

/// Index of a record in an [`ArrivalTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrivalId(pub usize);

/// A walk between a street location and a stop.
///
/// Used for both access (origin to first stop) and egress (last stop to
/// destination). In a reverse search the roles are swapped: the search
/// starts from the egress walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessEgress {
    pub stop: StopIndex,
    pub duration: Duration,
}

impl AccessEgress {
    pub fn new(stop: StopIndex, duration: Duration) -> Self {
        Self { stop, duration }
    }
}

/// A ride recorded by the search: the trip and where it was used.
///
/// Positions are in journey terms in both search directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitHop {
    pub trip: TripRef,
    pub board_pos: usize,
    pub alight_pos: usize,
}

impl TransitHop {
    pub fn new(trip: TripRef, board_pos: usize, alight_pos: usize) -> Self {
        Self {
            trip,
            board_pos,
            alight_pos,
        }
    }
}

/// How a stop was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivedBy {
    Access(AccessEgress),
    Transit { previous: ArrivalId, hop: TransitHop },
    Transfer { previous: ArrivalId, duration: Duration },
}

impl ArrivedBy {
    /// The record this one was reached from, `None` for access.
    pub fn previous(&self) -> Option<ArrivalId> {
        match self {
            ArrivedBy::Access(_) => None,
            ArrivedBy::Transit { previous, .. } | ArrivedBy::Transfer { previous, .. } => {
                Some(*previous)
            }
        }
    }
}

/// The best arrival at one stop in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopArrival {
    pub stop: StopIndex,
    pub round: usize,
    pub time: TransitTime,
    pub arrived_by: ArrivedBy,
}

/// An arrival at the search destination, handed to the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationArrival {
    /// The stop arrival the egress walk leaves from.
    pub previous: ArrivalId,
    pub egress: AccessEgress,
    /// Arrival at the destination (departure from the origin in a reverse
    /// search).
    pub time: TransitTime,
    /// Round in which the destination was reached.
    pub round: usize,
}

/// Arena of stop arrivals for one search.
#[derive(Debug, Clone, Default)]
pub struct ArrivalTable {
    arrivals: Vec<StopArrival>,
}

impl ArrivalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `rounds` rounds over `stops` stops.
    pub fn with_capacity(rounds: usize, stops: usize) -> Self {
        Self {
            arrivals: Vec::with_capacity(rounds.saturating_mul(stops)),
        }
    }

    /// Record reaching `stop` by an access walk.
    pub fn access(&mut self, access: AccessEgress, time: TransitTime) -> ArrivalId {
        self.push(StopArrival {
            stop: access.stop,
            round: 0,
            time,
            arrived_by: ArrivedBy::Access(access),
        })
    }

    /// Record reaching `stop` by riding from the `previous` arrival.
    ///
    /// Returns `None` if `previous` is not in this table.
    pub fn transit(
        &mut self,
        previous: ArrivalId,
        stop: StopIndex,
        time: TransitTime,
        hop: TransitHop,
    ) -> Option<ArrivalId> {
        let round = self.get(previous)?.round + 1;
        Some(self.push(StopArrival {
            stop,
            round,
            time,
            arrived_by: ArrivedBy::Transit { previous, hop },
        }))
    }

    /// Record reaching `stop` by walking from the `previous` arrival.
    ///
    /// Returns `None` if `previous` is not in this table.
    pub fn transfer(
        &mut self,
        previous: ArrivalId,
        stop: StopIndex,
        time: TransitTime,
        duration: Duration,
    ) -> Option<ArrivalId> {
        let round = self.get(previous)?.round;
        Some(self.push(StopArrival {
            stop,
            round,
            time,
            arrived_by: ArrivedBy::Transfer { previous, duration },
        }))
    }

    /// Build the destination arrival reached by `egress` from `previous`.
    ///
    /// Returns `None` if `previous` is not in this table.
    pub fn destination(
        &self,
        previous: ArrivalId,
        egress: AccessEgress,
        time: TransitTime,
    ) -> Option<DestinationArrival> {
        let round = self.get(previous)?.round;
        Some(DestinationArrival {
            previous,
            egress,
            time,
            round,
        })
    }

    /// Append a raw record. The caller is responsible for its round.
    pub fn push(&mut self, arrival: StopArrival) -> ArrivalId {
        let id = ArrivalId(self.arrivals.len());
        self.arrivals.push(arrival);
        id
    }

    pub fn get(&self, id: ArrivalId) -> Option<&StopArrival> {
        self.arrivals.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// Drop all records, keeping the allocation.
    pub fn clear(&mut self) {
        self.arrivals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatternIndex;

    fn t(s: &str) -> TransitTime {
        TransitTime::parse(s).unwrap()
    }

    #[test]
    fn rounds_follow_chain() {
        let mut table = ArrivalTable::with_capacity(3, 10);
        let access = table.access(AccessEgress::new(StopIndex(1), Duration::minutes(5)), t("10:05"));
        let hop = TransitHop::new(TripRef::new(PatternIndex(0), 0), 0, 2);
        let ride = table.transit(access, StopIndex(3), t("10:30"), hop).unwrap();
        let walk = table
            .transfer(ride, StopIndex(4), t("10:35"), Duration::minutes(5))
            .unwrap();

        assert_eq!(table.get(access).unwrap().round, 0);
        assert_eq!(table.get(ride).unwrap().round, 1);
        assert_eq!(table.get(walk).unwrap().round, 1);
        assert_eq!(table.get(walk).unwrap().arrived_by.previous(), Some(ride));
        assert_eq!(table.get(access).unwrap().arrived_by.previous(), None);

        let dest = table
            .destination(walk, AccessEgress::new(StopIndex(4), Duration::minutes(2)), t("10:37"))
            .unwrap();
        assert_eq!(dest.round, 1);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn unknown_previous_rejected() {
        let mut table = ArrivalTable::new();
        let hop = TransitHop::new(TripRef::new(PatternIndex(0), 0), 0, 1);
        assert!(table.transit(ArrivalId(0), StopIndex(1), t("10:00"), hop).is_none());
        assert!(
            table
                .transfer(ArrivalId(3), StopIndex(1), t("10:00"), Duration::zero())
                .is_none()
        );
        assert!(table.is_empty());
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut table = ArrivalTable::new();
        table.access(AccessEgress::new(StopIndex(1), Duration::zero()), t("10:00"));
        table.clear();
        assert!(table.is_empty());
        assert!(table.get(ArrivalId(0)).is_none());
    }
}
