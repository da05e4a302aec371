//! Generalized cost values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A generalized cost in centi-seconds.
///
/// Costs are never negative. A path computed without cost optimization
/// carries `Option::<Cost>::None`, which is distinct from `Cost::ZERO`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(pub u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    /// Cost of `seconds` weighted by `factor`, rounded to centi-seconds.
    ///
    /// Negative or non-finite inputs yield zero.
    pub fn from_seconds(seconds: i64, factor: f64) -> Self {
        let value = seconds as f64 * factor * 100.0;
        if value.is_finite() && value > 0.0 {
            Cost(value.round() as u64)
        } else {
            Cost::ZERO
        }
    }

    /// This cost scaled by `factor`, rounded to the nearest unit.
    pub fn relax(&self, factor: f64) -> Cost {
        Cost((self.0 as f64 * factor).round() as u64)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl fmt::Debug for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
