//! Board and alight slack.

use chrono::Duration;

use crate::domain::{StopIndex, TripRef};

/// Required buffers around boarding and alighting.
///
/// Both values must be non-negative.
pub trait SlackProvider {
    /// Time that must pass between arriving at `stop` and boarding `trip`.
    fn board_slack(&self, stop: StopIndex, trip: TripRef) -> Duration;

    /// Time that must pass after alighting `trip` at `stop` before moving on.
    fn alight_slack(&self, stop: StopIndex, trip: TripRef) -> Duration;
}

/// The same slack everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSlackProvider {
    board: Duration,
    alight: Duration,
}

impl DefaultSlackProvider {
    /// Negative durations are clamped to zero.
    pub fn new(board: Duration, alight: Duration) -> Self {
        Self {
            board: board.max(Duration::zero()),
            alight: alight.max(Duration::zero()),
        }
    }

    /// No slack at all.
    pub fn none() -> Self {
        Self::new(Duration::zero(), Duration::zero())
    }
}

impl Default for DefaultSlackProvider {
    fn default() -> Self {
        Self::none()
    }
}

impl SlackProvider for DefaultSlackProvider {
    fn board_slack(&self, _stop: StopIndex, _trip: TripRef) -> Duration {
        self.board
    }

    fn alight_slack(&self, _stop: StopIndex, _trip: TripRef) -> Duration {
        self.alight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatternIndex;

    #[test]
    fn uniform_slack() {
        let slack = DefaultSlackProvider::new(Duration::minutes(1), Duration::seconds(30));
        let trip = TripRef::new(PatternIndex(3), 0);
        assert_eq!(slack.board_slack(StopIndex(0), trip), Duration::minutes(1));
        assert_eq!(slack.alight_slack(StopIndex(9), trip), Duration::seconds(30));
    }

    #[test]
    fn negative_slack_clamped() {
        let slack = DefaultSlackProvider::new(Duration::minutes(-1), Duration::zero());
        assert_eq!(
            slack.board_slack(StopIndex(0), TripRef::new(PatternIndex(0), 0)),
            Duration::zero()
        );
    }
}
