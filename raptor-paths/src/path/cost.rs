//! Generalized cost.
//!
//! The cost formula belongs to the caller. The result set and mappers only
//! see a `CostModel`, which asks a `CostCalculator` for per-leg and
//! per-boarding contributions and sums them.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::{Cost, Leg, LegKind};

/// Computes the generalized cost of legs and boardings.
pub trait CostCalculator {
    /// Cost of traversing `leg` itself.
    fn leg_cost(&self, leg: &Leg) -> Cost;

    /// Cost of boarding the transit `leg` after waiting `wait` at the stop.
    ///
    /// `first_boarding` is true for the first transit leg of a path.
    fn boarding_cost(&self, first_boarding: bool, wait: Duration, leg: &Leg) -> Cost {
        let _ = (first_boarding, wait, leg);
        Cost::ZERO
    }
}

/// Reluctance-based cost: time weighted by activity, plus fixed penalties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultCostCalculator {
    /// Weight of walking time (access, egress, transfers).
    pub walk_reluctance: f64,
    /// Weight of time spent waiting for a boarding.
    pub wait_reluctance: f64,
    /// Weight of time spent riding.
    pub transit_reluctance: f64,
    /// Penalty for every boarding.
    pub board_cost: Cost,
    /// Extra penalty for every boarding after the first.
    pub transfer_cost: Cost,
}

impl Default for DefaultCostCalculator {
    fn default() -> Self {
        Self {
            walk_reluctance: 2.0,
            wait_reluctance: 1.0,
            transit_reluctance: 1.0,
            board_cost: Cost(60_000),
            transfer_cost: Cost(0),
        }
    }
}

impl CostCalculator for DefaultCostCalculator {
    fn leg_cost(&self, leg: &Leg) -> Cost {
        let secs = leg.duration().num_seconds();
        match leg.kind() {
            LegKind::Transit(_) => Cost::from_seconds(secs, self.transit_reluctance),
            LegKind::Access | LegKind::Transfer | LegKind::Egress => {
                Cost::from_seconds(secs, self.walk_reluctance)
            }
        }
    }

    fn boarding_cost(&self, first_boarding: bool, wait: Duration, _leg: &Leg) -> Cost {
        let penalty = if first_boarding {
            self.board_cost
        } else {
            self.board_cost + self.transfer_cost
        };
        penalty + Cost::from_seconds(wait.num_seconds(), self.wait_reluctance)
    }
}

/// Attaches costs to legs using a calculator.
///
/// A transit leg's cost includes its boarding cost, so a path's cost is
/// the sum of its legs' costs.
#[derive(Clone, Copy)]
pub struct CostModel<'a> {
    calculator: &'a dyn CostCalculator,
}

impl<'a> CostModel<'a> {
    pub fn new(calculator: &'a dyn CostCalculator) -> Self {
        Self { calculator }
    }

    /// Attach a cost to every leg and return the total.
    ///
    /// Legs must be in travel order.
    pub fn apply(&self, legs: Vec<Leg>) -> (Vec<Leg>, Cost) {
        let mut total = Cost::ZERO;
        let mut out = Vec::with_capacity(legs.len());
        let mut first_boarding = true;
        let mut previous_end = None;

        for leg in legs {
            let mut cost = self.calculator.leg_cost(&leg);
            if leg.is_transit() {
                let wait = previous_end
                    .map(|end| leg.start_time().since(end))
                    .unwrap_or_else(Duration::zero)
                    .max(Duration::zero());
                cost = cost + self.calculator.boarding_cost(first_boarding, wait, &leg);
                first_boarding = false;
            }
            previous_end = Some(leg.end_time());
            total = total + cost;
            out.push(leg.with_cost(cost));
        }

        (out, total)
    }
}

impl std::fmt::Debug for CostModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostModel").finish_non_exhaustive()
    }
}
