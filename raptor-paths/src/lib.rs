//! Result collection and path reconstruction for round-based transit search.
//!
//! A round-based (RAPTOR-style) search records every improved stop arrival
//! in an [`arrivals::ArrivalTable`] and reports each time it reaches the
//! destination. This crate takes it from there:
//!
//! - [`path::DestinationPaths`] keeps the Pareto-optimal paths under a
//!   comparator chosen from the request flags ([`path::PathComparator`]).
//! - [`path::ForwardPathMapper`] and [`path::ReversePathMapper`] rebuild a
//!   concrete [`domain::Path`] (legs, trips, slack, constrained transfers,
//!   generalized cost) from a destination arrival.
//! - [`path::PathConfig`] wires both up once per search from a
//!   [`config::SearchConfig`].
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use raptor_paths::arrivals::{AccessEgress, ArrivalTable, TransitHop};
//! use raptor_paths::config::SearchConfig;
//! use raptor_paths::domain::{Pattern, PatternIndex, StopIndex, TransitTime, TripId, TripRef, TripTimes};
//! use raptor_paths::path::{OfferOutcome, PathConfig, SearchContext};
//!
//! let t = |s: &str| TransitTime::parse(s).unwrap();
//! let trip = TripTimes::from_passing_times(TripId::new("T1"), vec![t("10:00"), t("10:20")]).unwrap();
//! let patterns = vec![Pattern::new(vec![StopIndex(0), StopIndex(1)], vec![trip]).unwrap()];
//!
//! let config = SearchConfig::default();
//! let slack = config.slack_provider();
//! let mut paths = PathConfig::new(SearchContext::new(&config, &patterns, &slack))
//!     .create_dest_arrival_paths()
//!     .unwrap();
//!
//! // What the round loop would have recorded.
//! let mut table = ArrivalTable::new();
//! let access = table.access(AccessEgress::new(StopIndex(0), Duration::minutes(5)), t("09:55"));
//! let hop = TransitHop::new(TripRef::new(PatternIndex(0), 0), 0, 1);
//! let ride = table.transit(access, StopIndex(1), t("10:20"), hop).unwrap();
//! let egress = AccessEgress::new(StopIndex(1), Duration::minutes(3));
//! let arrival = table.destination(ride, egress, t("10:23")).unwrap();
//!
//! assert!(paths.offer(&table, &arrival).unwrap().is_accepted());
//! assert_eq!(paths.offer(&table, &arrival).unwrap(), OfferOutcome::Duplicate);
//!
//! let path = &paths.results()[0];
//! assert_eq!(path.start_time(), t("09:55"));
//! assert_eq!(path.end_time(), t("10:23"));
//! assert_eq!(path.transit_count(), 1);
//! ```

pub mod arrivals;
pub mod config;
pub mod domain;
pub mod path;
pub mod transit;
