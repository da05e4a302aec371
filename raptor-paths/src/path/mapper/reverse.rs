use tracing::trace;

use super::{Chain, Direction, MapperContext, PathMapper, RideTiming, earlier, forbidden};
use crate::arrivals::{ArrivalTable, DestinationArrival};
use crate::domain::{Path, TransferConstraint, TripRef};
use crate::path::error::{PathError, ReconstructError};

/// Mapper for arrive-before searches.
///
/// The chain already runs in journey order. Trips are found from the
/// destination backwards: each ride takes the last trip that arrives in
/// time for the next leg, and must leave its board stop no earlier than
/// the search recorded.
#[derive(Debug, Clone, Copy)]
pub struct ReversePathMapper<'a> {
    ctx: MapperContext<'a>,
}

impl<'a> ReversePathMapper<'a> {
    pub fn new(ctx: MapperContext<'a>) -> Self {
        Self { ctx }
    }
}

impl PathMapper for ReversePathMapper<'_> {
    fn map_to_path(
        &self,
        table: &ArrivalTable,
        arrival: &DestinationArrival,
    ) -> Result<Path, PathError> {
        self.ctx
            .map_with(table, arrival, Direction::Reverse, time_rides)
    }
}

fn time_rides(ctx: &MapperContext<'_>, chain: &Chain) -> Result<Vec<RideTiming>, ReconstructError> {
    // Filled last ride first.
    let mut timings: Vec<RideTiming> = Vec::with_capacity(chain.rides.len());

    for i in (0..chain.rides.len()).rev() {
        let timing = find_trip(ctx, chain, i, timings.last())?;
        trace!(
            trip = %timing.trip_id,
            board = %timing.board_time,
            alight = %timing.alight_time,
            "reverse ride"
        );
        timings.push(timing);
    }

    timings.reverse();
    Ok(timings)
}

/// Last trip for ride `i` that arrives in time for `next` and still
/// departs no earlier than recorded. Trips behind a forbidden transfer are
/// passed over.
fn find_trip(
    ctx: &MapperContext<'_>,
    chain: &Chain,
    i: usize,
    next: Option<&RideTiming>,
) -> Result<RideTiming, ReconstructError> {
    let ride = &chain.rides[i];
    if ctx.approximate() {
        let times = ctx.recorded_trip(ride.hop.trip)?;
        return RideTiming::new(ride, ride.hop.trip, times);
    }

    let pattern_index = ride.hop.trip.pattern;
    let pattern = ctx.pattern(ride.hop.trip)?;
    let mut skipped = None;

    for (index, times) in pattern.trips().iter().enumerate().rev() {
        let (constraint, latest) = match next {
            None => (None, earlier(chain.anchor, ride.alight_slack)?),
            Some(next) => {
                let to = &chain.rides[i + 1];
                let rule = ctx.transfer_rule(ride, times.id(), to, &next.trip_id);
                (rule, chain.latest_alight(i, next, rule)?)
            }
        };
        let timing = RideTiming::new(ride, TripRef::new(pattern_index, index), times)?;
        let in_time = match constraint {
            Some(TransferConstraint::ExactTime(_)) => timing.alight_time == latest,
            _ => timing.alight_time <= latest,
        };
        if !in_time {
            continue;
        }
        if constraint == Some(TransferConstraint::Forbidden) {
            if let Some(next) = next {
                let stop = chain.rides[i + 1].board_stop;
                trace!(
                    from = %timing.trip_id,
                    to = %next.trip_id,
                    "skipping forbidden transfer"
                );
                skipped.get_or_insert_with(|| forbidden(&timing.trip_id, &next.trip_id, stop));
            }
            continue;
        }
        // Trips don't overtake, so every earlier one departs earlier still.
        if timing.board_time < ride.recorded_time {
            break;
        }
        return Ok(timing);
    }

    Err(skipped.unwrap_or(ReconstructError::TripNotFound {
        pattern: pattern_index,
        time: ride.recorded_time,
    }))
}
