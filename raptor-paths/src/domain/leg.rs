//! Leg types.
//!
//! A `Leg` is one traversed segment of a path: the walk from the origin to
//! the first stop, a ride on one trip, a walk between stops, or the walk
//! from the last stop to the destination.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::time::duration_secs;
use super::{Cost, DomainError, Place, StopIndex, TransitTime, TripId, TripRef};

/// A rule overriding default transfer timing between two trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferConstraint {
    /// The gap between alighting and boarding must be at least this long.
    /// Board and alight slack are not applied.
    MinimumTime(#[serde(with = "duration_secs")] Duration),
    /// The gap between alighting and boarding must be exactly this long.
    ExactTime(#[serde(with = "duration_secs")] Duration),
    /// The transfer is not allowed.
    Forbidden,
}

/// Details of a ride on one trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitDetails {
    /// Feed id of the boarded trip.
    pub trip_id: TripId,
    /// Where the trip sits in the timetable.
    pub trip: TripRef,
    /// Stop position of the boarding in the pattern.
    pub board_pos: usize,
    /// Stop position of the alighting in the pattern.
    pub alight_pos: usize,
    /// Slack required before boarding.
    #[serde(with = "duration_secs")]
    pub board_slack: Duration,
    /// Slack required after alighting.
    #[serde(with = "duration_secs")]
    pub alight_slack: Duration,
    /// Constrained transfer used to board this trip, if any.
    pub constraint: Option<TransferConstraint>,
}

/// What kind of segment a leg is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegKind {
    Access,
    Transit(TransitDetails),
    Transfer,
    Egress,
}

/// One segment of a path.
///
/// # Invariants
///
/// - `end >= start`
/// - Access legs start at [`Place::Origin`], egress legs end at
///   [`Place::Destination`], transit and transfer legs join two stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    kind: LegKind,
    from: Place,
    to: Place,
    start: TransitTime,
    end: TransitTime,
    cost: Option<Cost>,
}

impl Leg {
    /// Walk from the origin to the first boarding stop.
    pub fn access(
        stop: StopIndex,
        start: TransitTime,
        end: TransitTime,
    ) -> Result<Self, DomainError> {
        Self::new(LegKind::Access, Place::Origin, Place::Stop(stop), start, end)
    }

    /// Ride on a trip between two stops.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `alight_pos <= board_pos` or the times go backwards.
    pub fn transit(
        details: TransitDetails,
        board_stop: StopIndex,
        alight_stop: StopIndex,
        board_time: TransitTime,
        alight_time: TransitTime,
    ) -> Result<Self, DomainError> {
        if details.alight_pos <= details.board_pos {
            return Err(DomainError::InvalidLeg(
                "alight position must be after board position",
            ));
        }
        Self::new(
            LegKind::Transit(details),
            Place::Stop(board_stop),
            Place::Stop(alight_stop),
            board_time,
            alight_time,
        )
    }

    /// Walk between two stops.
    pub fn transfer(
        from: StopIndex,
        to: StopIndex,
        start: TransitTime,
        end: TransitTime,
    ) -> Result<Self, DomainError> {
        Self::new(
            LegKind::Transfer,
            Place::Stop(from),
            Place::Stop(to),
            start,
            end,
        )
    }

    /// Walk from the last alighting stop to the destination.
    pub fn egress(
        stop: StopIndex,
        start: TransitTime,
        end: TransitTime,
    ) -> Result<Self, DomainError> {
        Self::new(LegKind::Egress, Place::Stop(stop), Place::Destination, start, end)
    }

    fn new(
        kind: LegKind,
        from: Place,
        to: Place,
        start: TransitTime,
        end: TransitTime,
    ) -> Result<Self, DomainError> {
        let leg = Leg {
            kind,
            from,
            to,
            start,
            end,
            cost: None,
        };
        leg.validate()?;
        Ok(leg)
    }

    /// Check the leg invariants.
    ///
    /// Deserialized legs bypass the constructors, so [`Path`](super::Path)
    /// re-checks every leg through this.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.end < self.start {
            return Err(DomainError::NegativeDuration {
                start: self.start,
                end: self.end,
            });
        }
        let places_ok = match self.kind {
            LegKind::Access => self.from == Place::Origin && self.to.stop().is_some(),
            LegKind::Egress => self.from.stop().is_some() && self.to == Place::Destination,
            LegKind::Transit(_) | LegKind::Transfer => {
                self.from.stop().is_some() && self.to.stop().is_some()
            }
        };
        if !places_ok {
            return Err(DomainError::InvalidLeg("leg kind does not match its places"));
        }
        Ok(())
    }

    /// Attach a generalized cost to this leg.
    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn kind(&self) -> &LegKind {
        &self.kind
    }

    pub fn from(&self) -> Place {
        self.from
    }

    pub fn to(&self) -> Place {
        self.to
    }

    pub fn start_time(&self) -> TransitTime {
        self.start
    }

    pub fn end_time(&self) -> TransitTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end.since(self.start)
    }

    /// Cost attached to this leg, `None` when computed without cost.
    pub fn cost(&self) -> Option<Cost> {
        self.cost
    }

    pub fn is_transit(&self) -> bool {
        matches!(self.kind, LegKind::Transit(_))
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self.kind, LegKind::Transfer)
    }

    /// Returns the ride details if this is a transit leg.
    pub fn as_transit(&self) -> Option<&TransitDetails> {
        match &self.kind {
            LegKind::Transit(details) => Some(details),
            _ => None,
        }
    }
}
