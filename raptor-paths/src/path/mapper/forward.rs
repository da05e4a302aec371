use tracing::trace;

use super::{Chain, Direction, MapperContext, PathMapper, RideTiming, forbidden, later};
use crate::arrivals::{ArrivalTable, DestinationArrival};
use crate::domain::{Path, TransferConstraint, TripRef};
use crate::path::error::{PathError, ReconstructError};

/// Mapper for depart-after searches.
///
/// The chain runs from the destination back to the origin. Trips are found
/// from the origin onwards: each ride takes the first trip that can be
/// boarded after the previous leg, and must reach its alight stop no later
/// than the search recorded.
#[derive(Debug, Clone, Copy)]
pub struct ForwardPathMapper<'a> {
    ctx: MapperContext<'a>,
}

impl<'a> ForwardPathMapper<'a> {
    pub fn new(ctx: MapperContext<'a>) -> Self {
        Self { ctx }
    }
}

impl PathMapper for ForwardPathMapper<'_> {
    fn map_to_path(
        &self,
        table: &ArrivalTable,
        arrival: &DestinationArrival,
    ) -> Result<Path, PathError> {
        self.ctx
            .map_with(table, arrival, Direction::Forward, time_rides)
    }
}

fn time_rides(ctx: &MapperContext<'_>, chain: &Chain) -> Result<Vec<RideTiming>, ReconstructError> {
    let mut timings: Vec<RideTiming> = Vec::with_capacity(chain.rides.len());

    for i in 0..chain.rides.len() {
        let timing = find_trip(ctx, chain, i, timings.last())?;
        trace!(
            trip = %timing.trip_id,
            board = %timing.board_time,
            alight = %timing.alight_time,
            "forward ride"
        );
        timings.push(timing);
    }

    Ok(timings)
}

/// First trip for ride `i` that can be boarded after `previous` and still
/// arrives in time. Trips behind a forbidden transfer are passed over.
fn find_trip(
    ctx: &MapperContext<'_>,
    chain: &Chain,
    i: usize,
    previous: Option<&RideTiming>,
) -> Result<RideTiming, ReconstructError> {
    let ride = &chain.rides[i];
    if ctx.approximate() {
        let times = ctx.recorded_trip(ride.hop.trip)?;
        return RideTiming::new(ride, ride.hop.trip, times);
    }

    let pattern_index = ride.hop.trip.pattern;
    let pattern = ctx.pattern(ride.hop.trip)?;
    let mut skipped = None;

    for (index, times) in pattern.trips().iter().enumerate() {
        let (constraint, earliest) = match previous {
            None => (None, later(chain.anchor, ride.board_slack)?),
            Some(previous) => {
                let from = &chain.rides[i - 1];
                let rule = ctx.transfer_rule(from, &previous.trip_id, ride, times.id());
                (rule, chain.earliest_board(i, previous, rule)?)
            }
        };
        let timing = RideTiming::new(ride, TripRef::new(pattern_index, index), times)?;
        let boardable = match constraint {
            Some(TransferConstraint::ExactTime(_)) => timing.board_time == earliest,
            _ => timing.board_time >= earliest,
        };
        if !boardable {
            continue;
        }
        if constraint == Some(TransferConstraint::Forbidden) {
            if let Some(previous) = previous {
                trace!(
                    from = %previous.trip_id,
                    to = %timing.trip_id,
                    "skipping forbidden transfer"
                );
                skipped.get_or_insert_with(|| {
                    forbidden(&previous.trip_id, &timing.trip_id, ride.board_stop)
                });
            }
            continue;
        }
        // Trips don't overtake, so every later one arrives later still.
        if timing.alight_time > ride.recorded_time {
            break;
        }
        return Ok(timing);
    }

    Err(skipped.unwrap_or(ReconstructError::TripNotFound {
        pattern: pattern_index,
        time: ride.recorded_time,
    }))
}
