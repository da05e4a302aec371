//! Constrained transfer lookup.

use std::collections::HashMap;

use crate::domain::{StopIndex, TransferConstraint, TripId};

/// One end of a transfer between two trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransferPoint {
    pub trip: TripId,
    pub stop: StopIndex,
    /// Stop position in the trip's pattern.
    pub stop_pos: usize,
}

impl TransferPoint {
    pub fn new(trip: TripId, stop: StopIndex, stop_pos: usize) -> Self {
        Self {
            trip,
            stop,
            stop_pos,
        }
    }
}

/// Looks up the rule, if any, for transferring between two trips.
pub trait TransferConstraintSearch {
    /// Returns the constraint for alighting at `from` and boarding at `to`.
    fn find(&self, from: &TransferPoint, to: &TransferPoint) -> Option<TransferConstraint>;
}

/// A network without constrained transfers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransferConstraints;

impl TransferConstraintSearch for NoTransferConstraints {
    fn find(&self, _from: &TransferPoint, _to: &TransferPoint) -> Option<TransferConstraint> {
        None
    }
}

/// Constraints keyed by the trip and stop at each end.
///
/// Rules match on trip id and stop; the stop position is not part of the
/// key, so a rule applies at every visit of a looping pattern.
#[derive(Debug, Clone, Default)]
pub struct ConstrainedTransfers {
    rules: HashMap<(TripId, StopIndex, TripId, StopIndex), TransferConstraint>,
}

impl ConstrainedTransfers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule for one trip pair at one stop pair.
    pub fn insert(
        &mut self,
        from_trip: TripId,
        from_stop: StopIndex,
        to_trip: TripId,
        to_stop: StopIndex,
        constraint: TransferConstraint,
    ) {
        self.rules
            .insert((from_trip, from_stop, to_trip, to_stop), constraint);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TransferConstraintSearch for ConstrainedTransfers {
    fn find(&self, from: &TransferPoint, to: &TransferPoint) -> Option<TransferConstraint> {
        self.rules
            .get(&(from.trip.clone(), from.stop, to.trip.clone(), to.stop))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn lookup_by_trip_and_stop() {
        let mut rules = ConstrainedTransfers::new();
        rules.insert(
            TripId::new("A"),
            StopIndex(2),
            TripId::new("B"),
            StopIndex(2),
            TransferConstraint::MinimumTime(Duration::minutes(3)),
        );

        let from = TransferPoint::new(TripId::new("A"), StopIndex(2), 4);
        let to = TransferPoint::new(TripId::new("B"), StopIndex(2), 0);
        assert_eq!(
            rules.find(&from, &to),
            Some(TransferConstraint::MinimumTime(Duration::minutes(3)))
        );

        let other = TransferPoint::new(TripId::new("C"), StopIndex(2), 0);
        assert_eq!(rules.find(&from, &other), None);
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn no_constraints() {
        let p = TransferPoint::new(TripId::new("A"), StopIndex(1), 0);
        assert_eq!(NoTransferConstraints.find(&p, &p), None);
    }
}
