//! Domain types for path reconstruction.
//!
//! This module contains the value types that describe transit itineraries
//! and the timetable view needed to rebuild them. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod cost;
mod error;
mod leg;
mod path;
mod stop;
pub(crate) mod time;
mod trip;

pub use cost::Cost;
pub use error::DomainError;
pub use leg::{Leg, LegKind, TransferConstraint, TransitDetails};
pub use path::{Boarding, Path};
pub use stop::{Place, StopIndex};
pub use time::{TimeError, TransitTime, format_duration};
pub use trip::{Pattern, PatternIndex, TripId, TripRef, TripTimes};
