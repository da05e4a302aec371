//! Search configuration for path collection.

use std::path::Path as FsPath;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::TransitTime;
use crate::path::{ConfigError, DominanceOptions, PathComparator, TimeLimit};
use crate::transit::DefaultSlackProvider;

/// Which way the round loop searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDirection {
    /// Depart after a given time.
    #[default]
    Forward,
    /// Arrive before a given time.
    Reverse,
}

/// Configuration parameters for one search.
///
/// Missing fields take their default when read from JSON:
///
/// ```
/// use raptor_paths::config::{SearchConfig, SearchDirection};
///
/// let config = SearchConfig::from_json_str(r#"{"direction": "reverse", "include_cost": true}"#).unwrap();
/// assert_eq!(config.direction, SearchDirection::Reverse);
/// assert!(config.include_cost);
/// assert!(!config.timetable);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub direction: SearchDirection,

    /// Optimize on generalized cost as well as time and transits.
    pub include_cost: bool,

    /// Paths whose costs are within this factor don't dominate each other
    /// on cost. Must be at least 1.0 and needs `include_cost`.
    pub relax_cost_at_destination: Option<f64>,

    /// Keep one path per distinct boarding pattern.
    pub timetable: bool,

    /// Prefer the later departure when arrival and transit count tie.
    pub prefer_late_departure: bool,

    /// Trust the trip index recorded by the round loop during path
    /// reconstruction instead of searching the timetable again.
    pub approximate_trip_search: bool,

    /// Latest arrival (forward) or earliest departure (reverse).
    pub time_limit: Option<TransitTime>,

    /// Default board slack (seconds).
    pub board_slack_secs: i64,

    /// Default alight slack (seconds).
    pub alight_slack_secs: i64,
}

impl SearchConfig {
    /// Create a configuration for `direction` with every option off.
    pub fn new(direction: SearchDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Read(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Check the option combination before any search starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        PathComparator::select(&self.dominance_options()).map(|_| ())
    }

    pub fn dominance_options(&self) -> DominanceOptions {
        DominanceOptions {
            include_cost: self.include_cost,
            relax_cost_at_destination: self.relax_cost_at_destination,
            timetable: self.timetable,
            prefer_late_departure: self.prefer_late_departure,
        }
    }

    /// The time limit in the terms of the search direction.
    pub fn time_limit(&self) -> Option<TimeLimit> {
        self.time_limit.map(|time| match self.direction {
            SearchDirection::Forward => TimeLimit::LatestArrival(time),
            SearchDirection::Reverse => TimeLimit::EarliestDeparture(time),
        })
    }

    /// Returns the board slack as a Duration.
    pub fn board_slack(&self) -> Duration {
        Duration::seconds(self.board_slack_secs)
    }

    /// Returns the alight slack as a Duration.
    pub fn alight_slack(&self) -> Duration {
        Duration::seconds(self.alight_slack_secs)
    }

    /// Uniform slack from the configured defaults.
    pub fn slack_provider(&self) -> DefaultSlackProvider {
        DefaultSlackProvider::new(self.board_slack(), self.alight_slack())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            direction: SearchDirection::Forward,
            include_cost: false,
            relax_cost_at_destination: None,
            timetable: false,
            prefer_late_departure: false,
            approximate_trip_search: false,
            time_limit: None,
            board_slack_secs: 0,
            alight_slack_secs: 0,
        }
    }
}
