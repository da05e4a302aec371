//! Stop identifiers and places.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a stop in the transit data.
///
/// Stop indices are dense and assigned by the transit index; they carry no
/// meaning beyond identity. Use a [`StopNameResolver`](crate::transit::StopNameResolver)
/// to turn one into something a human can read.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopIndex(pub u32);

impl StopIndex {
    /// Returns the index as a `usize`, for slice addressing.
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stop({})", self.0)
    }
}

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a leg starts or ends.
///
/// Access legs begin at the search origin and egress legs end at the
/// search destination; those are street locations, not stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Place {
    /// The search origin.
    Origin,
    /// A transit stop.
    Stop(StopIndex),
    /// The search destination.
    Destination,
}

impl Place {
    /// Returns the stop if this place is one.
    pub fn stop(&self) -> Option<StopIndex> {
        match self {
            Place::Stop(stop) => Some(*stop),
            Place::Origin | Place::Destination => None,
        }
    }
}

impl From<StopIndex> for Place {
    fn from(stop: StopIndex) -> Self {
        Place::Stop(stop)
    }
}
