//! Turning destination arrivals into paths.
//!
//! Both mappers share the same three steps:
//!
//! 1. Walk the back-pointer chain in the arrival table and check that it
//!    describes a well-formed journey (access, rides with optional walks
//!    between them, egress). The result is in journey order.
//! 2. Find the concrete trips and their times. This is the only step that
//!    differs by direction: the forward mapper searches from the origin
//!    adding durations, the reverse mapper searches from the destination
//!    subtracting them. Each candidate trip is checked against the transfer
//!    rule to the trip already found on the neighbouring ride.
//! 3. Place the walking legs around the rides and build the [`Path`].
//!
//! Because step 3 is shared, the same itinerary found by a forward and a
//! reverse search produces identical legs.

mod forward;
mod reverse;

pub use forward::ForwardPathMapper;
pub use reverse::ReversePathMapper;

use chrono::Duration;
use tracing::trace;

use crate::arrivals::{
    AccessEgress, ArrivalId, ArrivalTable, ArrivedBy, DestinationArrival, StopArrival,
    TransitHop,
};
use crate::domain::{
    Leg, Path, Pattern, StopIndex, TransferConstraint, TransitDetails, TransitTime, TripId,
    TripRef, TripTimes,
};
use crate::path::cost::CostModel;
use crate::path::error::{PathError, ReconstructError};
use crate::transit::{SlackProvider, TransferConstraintSearch, TransferPoint, TransitData};

/// Rebuilds a [`Path`] from a destination arrival.
pub trait PathMapper {
    /// Returns `Err(PathError::Reconstruction)` if the arrival does not
    /// describe a usable journey.
    fn map_to_path(
        &self,
        table: &ArrivalTable,
        arrival: &DestinationArrival,
    ) -> Result<Path, PathError>;
}

/// What a mapper needs besides the arrival table.
#[derive(Clone, Copy)]
pub struct MapperContext<'a> {
    transit: &'a dyn TransitData,
    slack: &'a dyn SlackProvider,
    constraints: &'a dyn TransferConstraintSearch,
    cost: Option<CostModel<'a>>,
    approximate_trip_search: bool,
}

impl<'a> MapperContext<'a> {
    pub fn new(
        transit: &'a dyn TransitData,
        slack: &'a dyn SlackProvider,
        constraints: &'a dyn TransferConstraintSearch,
    ) -> Self {
        Self {
            transit,
            slack,
            constraints,
            cost: None,
            approximate_trip_search: false,
        }
    }

    /// Attach generalized costs to every path.
    pub fn with_cost(mut self, cost: CostModel<'a>) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Trust the trip index recorded by the search instead of searching
    /// the timetable again.
    pub fn with_approximate_trip_search(mut self, approximate: bool) -> Self {
        self.approximate_trip_search = approximate;
        self
    }

    pub fn includes_cost(&self) -> bool {
        self.cost.is_some()
    }

    pub(crate) fn approximate(&self) -> bool {
        self.approximate_trip_search
    }

    pub(crate) fn pattern(&self, trip: TripRef) -> Result<&'a Pattern, ReconstructError> {
        self.transit
            .pattern(trip.pattern)
            .ok_or(ReconstructError::UnknownTrip {
                pattern: trip.pattern,
                trip: trip.trip,
            })
    }

    pub(crate) fn recorded_trip(&self, trip: TripRef) -> Result<&'a TripTimes, ReconstructError> {
        self.pattern(trip)?
            .trip(trip.trip)
            .ok_or(ReconstructError::UnknownTrip {
                pattern: trip.pattern,
                trip: trip.trip,
            })
    }

    /// Rule for alighting `from_trip` and boarding `to_trip` between two
    /// consecutive rides.
    pub(crate) fn transfer_rule(
        &self,
        from: &Ride,
        from_trip: &TripId,
        to: &Ride,
        to_trip: &TripId,
    ) -> Option<TransferConstraint> {
        let (from_point, to_point) = transfer_points(from, from_trip, to, to_trip);
        self.constraints.find(&from_point, &to_point)
    }

    /// Shared driver: collect the chain, let `time_rides` find the trips,
    /// settle the transfer rules between them, then assemble and cost the
    /// path.
    pub(crate) fn map_with<F>(
        &self,
        table: &ArrivalTable,
        arrival: &DestinationArrival,
        direction: Direction,
        time_rides: F,
    ) -> Result<Path, PathError>
    where
        F: FnOnce(&Self, &Chain) -> Result<Vec<RideTiming>, ReconstructError>,
    {
        let mut chain = collect_chain(self, table, arrival, direction)?;
        let timings = time_rides(self, &chain)?;
        resolve_constraints(self, &mut chain, &timings)?;
        check_constraints(&chain, &timings)?;
        let legs = assemble(&chain, &timings)?;

        let path = match self.cost {
            Some(model) => {
                let (legs, total) = model.apply(legs);
                Path::new(legs, Some(total))?
            }
            None => Path::new(legs, None)?,
        };
        Ok(path)
    }
}

impl std::fmt::Debug for MapperContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperContext")
            .field("cost", &self.cost)
            .field("approximate_trip_search", &self.approximate_trip_search)
            .finish_non_exhaustive()
    }
}

/// Which way the arrival table was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Reverse,
}

/// One ride of the journey, as recorded by the search.
#[derive(Debug, Clone)]
pub(crate) struct Ride {
    pub hop: TransitHop,
    pub board_stop: StopIndex,
    pub alight_stop: StopIndex,
    /// Arrival at the alight stop (forward) or departure from the board
    /// stop (reverse), as recorded.
    pub recorded_time: TransitTime,
    /// Slack from the provider, never negative. Zeroed next to a
    /// constrained transfer once the trips are known.
    pub board_slack: Duration,
    pub alight_slack: Duration,
}

/// What happens between two consecutive rides.
#[derive(Debug, Clone)]
pub(crate) struct Connection {
    pub walk: Option<Duration>,
    /// Rule between the trips actually ridden. Set after timing.
    pub constraint: Option<TransferConstraint>,
}

impl Connection {
    fn walk_duration(&self) -> Duration {
        self.walk.unwrap_or_else(Duration::zero)
    }
}

/// A validated chain in journey order.
#[derive(Debug, Clone)]
pub(crate) struct Chain {
    pub access: AccessEgress,
    pub egress: AccessEgress,
    /// Time of the chain's access record: arrival at the first stop in a
    /// forward search, latest departure from the last stop in a reverse one.
    pub anchor: TransitTime,
    pub rides: Vec<Ride>,
    /// `connections[i]` sits between `rides[i]` and `rides[i + 1]`.
    pub connections: Vec<Connection>,
}

impl Chain {
    /// Earliest time ride `i` (not the first) may depart, given when the
    /// previous ride arrived and the rule between the two trips.
    pub fn earliest_board(
        &self,
        i: usize,
        previous: &RideTiming,
        constraint: Option<TransferConstraint>,
    ) -> Result<TransitTime, ReconstructError> {
        let gap = self.transfer_gap(i - 1, constraint)?;
        later(previous.alight_time, gap)
    }

    /// Latest time ride `i` (not the last) may arrive, given when the next
    /// ride departs and the rule between the two trips.
    pub fn latest_alight(
        &self,
        i: usize,
        next: &RideTiming,
        constraint: Option<TransferConstraint>,
    ) -> Result<TransitTime, ReconstructError> {
        let gap = self.transfer_gap(i, constraint)?;
        earlier(next.board_time, gap)
    }

    /// Time needed from alighting ride `c` to boarding ride `c + 1`.
    fn transfer_gap(
        &self,
        c: usize,
        constraint: Option<TransferConstraint>,
    ) -> Result<Duration, ReconstructError> {
        let walk = self.connections[c].walk_duration();
        match constraint {
            Some(TransferConstraint::MinimumTime(min)) => Ok(min.max(walk)),
            Some(TransferConstraint::ExactTime(exact)) => Ok(exact),
            _ => total(&[
                self.rides[c].alight_slack,
                walk,
                self.rides[c + 1].board_slack,
            ]),
        }
    }
}

pub(crate) fn later(time: TransitTime, by: Duration) -> Result<TransitTime, ReconstructError> {
    time.checked_add(by).ok_or(ReconstructError::TimeOverflow)
}

pub(crate) fn earlier(time: TransitTime, by: Duration) -> Result<TransitTime, ReconstructError> {
    time.checked_sub(by).ok_or(ReconstructError::TimeOverflow)
}

fn total(parts: &[Duration]) -> Result<Duration, ReconstructError> {
    parts.iter().try_fold(Duration::zero(), |sum, part| {
        sum.checked_add(part).ok_or(ReconstructError::TimeOverflow)
    })
}

fn transfer_points(
    from: &Ride,
    from_trip: &TripId,
    to: &Ride,
    to_trip: &TripId,
) -> (TransferPoint, TransferPoint) {
    (
        TransferPoint::new(from_trip.clone(), from.alight_stop, from.hop.alight_pos),
        TransferPoint::new(to_trip.clone(), to.board_stop, to.hop.board_pos),
    )
}

pub(crate) fn forbidden(from: &TripId, to: &TripId, stop: StopIndex) -> ReconstructError {
    ReconstructError::ForbiddenTransfer {
        from: from.clone(),
        to: to.clone(),
        stop,
    }
}

/// The trip found for a ride.
#[derive(Debug, Clone)]
pub(crate) struct RideTiming {
    pub trip: TripRef,
    pub trip_id: TripId,
    pub board_time: TransitTime,
    pub alight_time: TransitTime,
}

impl RideTiming {
    pub fn new(ride: &Ride, trip: TripRef, times: &TripTimes) -> Result<Self, ReconstructError> {
        let board_time = times
            .departure(ride.hop.board_pos)
            .ok_or(ReconstructError::StopMismatch {
                stop: ride.board_stop,
                pos: ride.hop.board_pos,
            })?;
        let alight_time = times
            .arrival(ride.hop.alight_pos)
            .ok_or(ReconstructError::StopMismatch {
                stop: ride.alight_stop,
                pos: ride.hop.alight_pos,
            })?;
        Ok(Self {
            trip,
            trip_id: times.id().clone(),
            board_time,
            alight_time,
        })
    }
}

enum Step {
    Ride {
        hop: TransitHop,
        board_stop: StopIndex,
        alight_stop: StopIndex,
        time: TransitTime,
    },
    Walk(Duration),
}

/// Walk the back-pointers from `arrival` and return the chain in journey
/// order.
fn collect_chain(
    ctx: &MapperContext<'_>,
    table: &ArrivalTable,
    arrival: &DestinationArrival,
    direction: Direction,
) -> Result<Chain, ReconstructError> {
    let mut record = lookup(table, arrival.previous)?;

    if record.stop != arrival.egress.stop {
        return Err(ReconstructError::WalkMismatch {
            expected: arrival.egress.stop,
            actual: record.stop,
        });
    }
    if record.round != arrival.round {
        return Err(ReconstructError::RoundMismatch {
            expected: arrival.round,
            actual: record.round,
        });
    }

    // In the order the chain is walked.
    let mut steps = Vec::new();
    let (start, anchor) = loop {
        if steps.len() > table.len() {
            return Err(ReconstructError::CyclicChain);
        }
        match record.arrived_by {
            ArrivedBy::Access(access) => {
                if access.stop != record.stop {
                    return Err(ReconstructError::WalkMismatch {
                        expected: access.stop,
                        actual: record.stop,
                    });
                }
                expect_round(record, 0)?;
                break (access, record.time);
            }
            ArrivedBy::Transit { previous, hop } => {
                let previous_record = lookup(table, previous)?;
                if record.round == 0 {
                    return Err(ReconstructError::InvalidLegOrder("ride recorded in round 0"));
                }
                expect_round(previous_record, record.round - 1)?;
                let (board_stop, alight_stop) = match direction {
                    Direction::Forward => (previous_record.stop, record.stop),
                    Direction::Reverse => (record.stop, previous_record.stop),
                };
                steps.push(Step::Ride {
                    hop,
                    board_stop,
                    alight_stop,
                    time: record.time,
                });
                record = previous_record;
            }
            ArrivedBy::Transfer { previous, duration } => {
                let previous_record = lookup(table, previous)?;
                expect_round(previous_record, record.round)?;
                steps.push(Step::Walk(duration));
                record = previous_record;
            }
        }
    };

    trace!(steps = steps.len(), ?direction, "collected arrival chain");

    let (access, egress) = match direction {
        Direction::Forward => {
            steps.reverse();
            (start, arrival.egress)
        }
        Direction::Reverse => (arrival.egress, start),
    };

    let chain = build_chain(ctx, access, egress, anchor, steps)?;
    if chain.rides.len() != arrival.round {
        return Err(ReconstructError::RoundMismatch {
            expected: arrival.round,
            actual: chain.rides.len(),
        });
    }
    Ok(chain)
}

fn lookup(table: &ArrivalTable, id: ArrivalId) -> Result<&StopArrival, ReconstructError> {
    table.get(id).ok_or(ReconstructError::DanglingArrival(id))
}

fn expect_round(record: &StopArrival, round: usize) -> Result<(), ReconstructError> {
    if record.round == round {
        Ok(())
    } else {
        Err(ReconstructError::RoundMismatch {
            expected: round,
            actual: record.round,
        })
    }
}

/// Check the leg order `Ride (Walk? Ride)*` and resolve every ride against
/// the timetable.
fn build_chain(
    ctx: &MapperContext<'_>,
    access: AccessEgress,
    egress: AccessEgress,
    anchor: TransitTime,
    steps: Vec<Step>,
) -> Result<Chain, ReconstructError> {
    let mut rides = Vec::with_capacity(steps.len());
    let mut connections = Vec::new();
    let mut pending_walk = None;

    for step in steps {
        match step {
            Step::Walk(duration) => {
                if rides.is_empty() {
                    return Err(ReconstructError::InvalidLegOrder("walk before the first ride"));
                }
                if pending_walk.is_some() {
                    return Err(ReconstructError::InvalidLegOrder("two walks in a row"));
                }
                pending_walk = Some(duration);
            }
            Step::Ride {
                hop,
                board_stop,
                alight_stop,
                time,
            } => {
                if !rides.is_empty() {
                    connections.push(Connection {
                        walk: pending_walk.take(),
                        constraint: None,
                    });
                }
                rides.push(resolve_ride(ctx, hop, board_stop, alight_stop, time)?);
            }
        }
    }

    if rides.is_empty() {
        return Err(ReconstructError::InvalidLegOrder("no ride in chain"));
    }
    if pending_walk.is_some() {
        return Err(ReconstructError::InvalidLegOrder("walk after the last ride"));
    }

    Ok(Chain {
        access,
        egress,
        anchor,
        rides,
        connections,
    })
}

fn resolve_ride(
    ctx: &MapperContext<'_>,
    hop: TransitHop,
    board_stop: StopIndex,
    alight_stop: StopIndex,
    recorded_time: TransitTime,
) -> Result<Ride, ReconstructError> {
    if hop.alight_pos <= hop.board_pos {
        return Err(ReconstructError::InvalidLegOrder("alight position before board position"));
    }
    let pattern = ctx.pattern(hop.trip)?;
    for (stop, pos) in [(board_stop, hop.board_pos), (alight_stop, hop.alight_pos)] {
        if pattern.stop(pos) != Some(stop) {
            return Err(ReconstructError::StopMismatch { stop, pos });
        }
    }
    // The recorded trip must exist even when a different one is ridden.
    ctx.recorded_trip(hop.trip)?;

    Ok(Ride {
        hop,
        board_stop,
        alight_stop,
        recorded_time,
        board_slack: ctx.slack.board_slack(board_stop, hop.trip).max(Duration::zero()),
        alight_slack: ctx.slack.alight_slack(alight_stop, hop.trip).max(Duration::zero()),
    })
}

/// Look up the rule for every connection between the trips actually
/// found. A rule replaces the slack on both sides of the connection.
fn resolve_constraints(
    ctx: &MapperContext<'_>,
    chain: &mut Chain,
    timings: &[RideTiming],
) -> Result<(), ReconstructError> {
    for i in 0..chain.connections.len() {
        let (from, to) = (&chain.rides[i], &chain.rides[i + 1]);
        let (from_trip, to_trip) = (&timings[i].trip_id, &timings[i + 1].trip_id);

        let constraint = ctx.transfer_rule(from, from_trip, to, to_trip);
        if constraint == Some(TransferConstraint::Forbidden) {
            return Err(forbidden(from_trip, to_trip, to.board_stop));
        }
        chain.connections[i].constraint = constraint;
        if constraint.is_some() {
            chain.rides[i].alight_slack = Duration::zero();
            chain.rides[i + 1].board_slack = Duration::zero();
        }
    }
    Ok(())
}

/// Constrained transfers must hold for the trips actually found.
fn check_constraints(chain: &Chain, timings: &[RideTiming]) -> Result<(), ReconstructError> {
    for (i, connection) in chain.connections.iter().enumerate() {
        let Some(constraint) = connection.constraint else {
            continue;
        };
        let (from, to) = (&timings[i], &timings[i + 1]);
        let gap = to.board_time.since(from.alight_time);
        let walk = connection.walk_duration();
        let holds = match constraint {
            TransferConstraint::MinimumTime(min) => gap >= min && gap >= walk,
            TransferConstraint::ExactTime(exact) => gap == exact && walk <= exact,
            TransferConstraint::Forbidden => false,
        };
        if !holds {
            return Err(ReconstructError::TransferTimeViolated {
                from: from.trip_id.clone(),
                to: to.trip_id.clone(),
            });
        }
    }
    Ok(())
}

/// Build legs in travel order. Walks leave as soon as the slack allows;
/// the access walk arrives just in time for the first boarding.
fn assemble(chain: &Chain, timings: &[RideTiming]) -> Result<Vec<Leg>, PathError> {
    let (Some(first), Some(last)) = (chain.rides.first(), chain.rides.last()) else {
        return Err(ReconstructError::InvalidLegOrder("no ride in chain").into());
    };
    let (Some(first_timing), Some(last_timing)) = (timings.first(), timings.last()) else {
        return Err(ReconstructError::InvalidLegOrder("no ride in chain").into());
    };

    let mut legs = Vec::with_capacity(2 * chain.rides.len() + 1);

    let access_end = earlier(first_timing.board_time, first.board_slack)?;
    legs.push(Leg::access(
        chain.access.stop,
        earlier(access_end, chain.access.duration)?,
        access_end,
    )?);

    for (i, (ride, timing)) in chain.rides.iter().zip(timings).enumerate() {
        let constraint = match i {
            0 => None,
            _ => chain.connections[i - 1].constraint,
        };
        let details = TransitDetails {
            trip_id: timing.trip_id.clone(),
            trip: timing.trip,
            board_pos: ride.hop.board_pos,
            alight_pos: ride.hop.alight_pos,
            board_slack: ride.board_slack,
            alight_slack: ride.alight_slack,
            constraint,
        };
        legs.push(Leg::transit(
            details,
            ride.board_stop,
            ride.alight_stop,
            timing.board_time,
            timing.alight_time,
        )?);

        if let Some(walk) = chain.connections.get(i).and_then(|c| c.walk) {
            let start = later(timing.alight_time, ride.alight_slack)?;
            legs.push(Leg::transfer(
                ride.alight_stop,
                chain.rides[i + 1].board_stop,
                start,
                later(start, walk)?,
            )?);
        }
    }

    let egress_start = later(last_timing.alight_time, last.alight_slack)?;
    legs.push(Leg::egress(
        chain.egress.stop,
        egress_start,
        later(egress_start, chain.egress.duration)?,
    )?);

    Ok(legs)
}
