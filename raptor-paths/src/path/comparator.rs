//! Dominance criteria for destination paths.
//!
//! Which criteria decide that one path makes another unnecessary depends
//! on what the caller asked for. The four request flags map to one of nine
//! fixed comparators, chosen once per search.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::pareto::ParetoComparator;
use crate::domain::Path;

/// Request flags that select the dominance criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DominanceOptions {
    /// Compare generalized cost.
    pub include_cost: bool,
    /// Paths whose cost is within this factor of one another don't dominate
    /// each other on cost. Requires `include_cost`.
    pub relax_cost_at_destination: Option<f64>,
    /// Keep one path per distinct sequence of boardings.
    pub timetable: bool,
    /// Prefer the later departure when arrival and transit count tie.
    pub prefer_late_departure: bool,
}

/// The dominance criteria of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathComparator {
    /// Arrival time and transit count.
    Standard,
    /// Standard, plus later departure.
    StandardAndLatestDeparture,
    /// Standard, plus distinct boardings.
    Timetable,
    /// Standard, plus cost.
    Cost,
    /// Cost, plus later departure.
    CostAndLatestDeparture,
    /// Cost, plus distinct boardings.
    TimetableAndCost,
    /// Standard, plus cost within `relax` of each other.
    RelaxedCost { relax: f64 },
    /// Relaxed cost, plus later departure.
    RelaxedCostAndLatestDeparture { relax: f64 },
    /// Relaxed cost, plus distinct boardings.
    TimetableAndRelaxedCost { relax: f64 },
}

impl PathComparator {
    /// Pick the comparator for a set of request flags.
    ///
    /// Relaxed cost takes precedence over plain cost, and timetable mode
    /// over late departure.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a relax factor is given without `include_cost`, or
    /// the factor is below 1.0 or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use raptor_paths::path::{DominanceOptions, PathComparator};
    ///
    /// let options = DominanceOptions {
    ///     include_cost: true,
    ///     prefer_late_departure: true,
    ///     ..DominanceOptions::default()
    /// };
    /// assert_eq!(
    ///     PathComparator::select(&options).unwrap(),
    ///     PathComparator::CostAndLatestDeparture
    /// );
    /// ```
    pub fn select(options: &DominanceOptions) -> Result<Self, ConfigError> {
        if let Some(relax) = options.relax_cost_at_destination {
            if !options.include_cost {
                return Err(ConfigError::RelaxedCostWithoutCost);
            }
            if !relax.is_finite() || relax < 1.0 {
                return Err(ConfigError::InvalidRelaxFactor(relax));
            }
            if options.timetable {
                return Ok(Self::TimetableAndRelaxedCost { relax });
            }
            if options.prefer_late_departure {
                return Ok(Self::RelaxedCostAndLatestDeparture { relax });
            }
            return Ok(Self::RelaxedCost { relax });
        }

        if options.include_cost {
            if options.timetable {
                return Ok(Self::TimetableAndCost);
            }
            if options.prefer_late_departure {
                return Ok(Self::CostAndLatestDeparture);
            }
            return Ok(Self::Cost);
        }

        if options.timetable {
            return Ok(Self::Timetable);
        }
        if options.prefer_late_departure {
            return Ok(Self::StandardAndLatestDeparture);
        }
        Ok(Self::Standard)
    }

    /// True if paths compared by this comparator need a cost.
    pub fn includes_cost(&self) -> bool {
        !matches!(
            self,
            Self::Standard | Self::StandardAndLatestDeparture | Self::Timetable
        )
    }

    /// Is `l` better than `r` on at least one active criterion?
    pub fn left_dominance_exist(&self, l: &Path, r: &Path) -> bool {
        let standard = better_arrival(l, r) || fewer_transits(l, r);
        match *self {
            Self::Standard => standard,
            Self::StandardAndLatestDeparture => standard || later_departure(l, r),
            Self::Timetable => distinct_boardings(l, r) || standard,
            Self::Cost => standard || lower_cost(l, r),
            Self::CostAndLatestDeparture => standard || later_departure(l, r) || lower_cost(l, r),
            Self::TimetableAndCost => distinct_boardings(l, r) || standard || lower_cost(l, r),
            Self::RelaxedCost { relax } => standard || lower_relaxed_cost(l, r, relax),
            Self::RelaxedCostAndLatestDeparture { relax } => {
                standard || later_departure(l, r) || lower_relaxed_cost(l, r, relax)
            }
            Self::TimetableAndRelaxedCost { relax } => {
                distinct_boardings(l, r) || standard || lower_relaxed_cost(l, r, relax)
            }
        }
    }

    /// `a` makes `b` unnecessary.
    pub fn dominates(&self, a: &Path, b: &Path) -> bool {
        self.left_dominance_exist(a, b) && !self.left_dominance_exist(b, a)
    }
}

impl ParetoComparator<Path> for PathComparator {
    fn left_dominance_exist(&self, left: &Path, right: &Path) -> bool {
        PathComparator::left_dominance_exist(self, left, right)
    }
}

fn better_arrival(l: &Path, r: &Path) -> bool {
    l.end_time() < r.end_time()
}

fn fewer_transits(l: &Path, r: &Path) -> bool {
    l.transit_count() < r.transit_count()
}

fn later_departure(l: &Path, r: &Path) -> bool {
    l.start_time() > r.start_time()
}

fn distinct_boardings(l: &Path, r: &Path) -> bool {
    l.boardings() != r.boardings()
}

// A path without cost never wins on cost.
fn lower_cost(l: &Path, r: &Path) -> bool {
    match (l.cost(), r.cost()) {
        (Some(lc), Some(rc)) => lc < rc,
        _ => false,
    }
}

// Equal costs are a tie, so exact duplicates still collapse.
fn lower_relaxed_cost(l: &Path, r: &Path, relax: f64) -> bool {
    match (l.cost(), r.cost()) {
        (Some(lc), Some(rc)) => lc != rc && lc <= rc.relax(relax),
        _ => false,
    }
}
