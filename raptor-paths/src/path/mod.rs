//! Destination result set and path reconstruction.

mod comparator;
mod configure;
mod cost;
mod destination;
mod display;
mod error;
mod lifecycle;
pub mod mapper;
mod pareto;


pub use comparator::{DominanceOptions, PathComparator};
pub use configure::{PathConfig, SearchContext};
pub use cost::{CostCalculator, CostModel, DefaultCostCalculator};
pub use destination::{DestinationPaths, OfferOutcome, TimeLimit};
pub use display::PathDisplay;
pub use error::{ConfigError, PathError, ReconstructError};
pub use lifecycle::{DebugHandler, LifeCycleObserver, RejectReason};
pub use mapper::{ForwardPathMapper, MapperContext, PathMapper, ReversePathMapper};
pub use pareto::{Insert, ParetoComparator, ParetoSet};
