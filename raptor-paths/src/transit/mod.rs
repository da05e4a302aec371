//! Interfaces to the transit data this crate reads but does not own.
//!
//! The round-based search keeps its own index of stops, patterns and
//! timetables. Path reconstruction only needs a narrow view of it, plus
//! the slack and transfer rules of the network. Each is a trait so the
//! search can plug in whatever store it has.

mod constraints;
mod names;
mod slack;

pub use constraints::{ConstrainedTransfers, NoTransferConstraints, TransferConstraintSearch, TransferPoint};
pub use names::{StopIndexNames, StopNameResolver};
pub use slack::{DefaultSlackProvider, SlackProvider};

use crate::domain::{Pattern, PatternIndex, TripRef, TripTimes};

/// Read access to the patterns of the transit index.
pub trait TransitData {
    /// Returns the pattern with this index, if it exists.
    fn pattern(&self, index: PatternIndex) -> Option<&Pattern>;

    /// Returns the pattern and trip a reference points at.
    fn trip(&self, trip: TripRef) -> Option<(&Pattern, &TripTimes)> {
        let pattern = self.pattern(trip.pattern)?;
        let times = pattern.trip(trip.trip)?;
        Some((pattern, times))
    }
}

impl TransitData for [Pattern] {
    fn pattern(&self, index: PatternIndex) -> Option<&Pattern> {
        self.get(index.0 as usize)
    }
}

impl TransitData for Vec<Pattern> {
    fn pattern(&self, index: PatternIndex) -> Option<&Pattern> {
        self.as_slice().pattern(index)
    }
}

impl<T: TransitData + ?Sized> TransitData for &T {
    fn pattern(&self, index: PatternIndex) -> Option<&Pattern> {
        (**self).pattern(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StopIndex, TransitTime, TripId};

    fn patterns() -> Vec<Pattern> {
        let times = vec![TransitTime::hms(8, 0, 0), TransitTime::hms(8, 10, 0)];
        let trip = TripTimes::from_passing_times(TripId::new("T"), times).unwrap();
        vec![Pattern::new(vec![StopIndex(0), StopIndex(1)], vec![trip]).unwrap()]
    }

    #[test]
    fn vec_lookup() {
        let data = patterns();
        assert!(data.pattern(PatternIndex(0)).is_some());
        assert!(data.pattern(PatternIndex(1)).is_none());
    }

    #[test]
    fn trip_lookup() {
        let data = patterns();
        let (pattern, trip) = data.trip(TripRef::new(PatternIndex(0), 0)).unwrap();
        assert_eq!(pattern.stops().len(), 2);
        assert_eq!(trip.id().as_str(), "T");
        assert!(data.trip(TripRef::new(PatternIndex(0), 1)).is_none());
    }
}
