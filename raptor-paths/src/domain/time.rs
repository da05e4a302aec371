//! Service-day time handling.
//!
//! Timetables express times as seconds past midnight of the service day.
//! Services running after midnight keep counting (25:10 is ten past one the
//! next morning), so times are not wrapped at 24 hours.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A point in time on the service day, in whole seconds past midnight.
///
/// # Examples
///
/// ```
/// use raptor_paths::domain::TransitTime;
///
/// let t = TransitTime::parse("14:30").unwrap();
/// assert_eq!(t.seconds(), 14 * 3600 + 30 * 60);
/// assert_eq!(t.to_string(), "14:30");
///
/// let late = TransitTime::parse("25:10:05").unwrap();
/// assert_eq!(late.to_string(), "25:10:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitTime(i32);

impl TransitTime {
    /// Midnight at the start of the service day.
    pub const MIDNIGHT: TransitTime = TransitTime(0);

    /// Create a time from seconds past midnight.
    pub const fn from_seconds(seconds: i32) -> Self {
        Self(seconds)
    }

    /// Create a time from hours, minutes and seconds.
    pub const fn hms(hours: i32, minutes: i32, seconds: i32) -> Self {
        Self(hours * 3600 + minutes * 60 + seconds)
    }

    /// Parse `HH:MM` or `HH:MM:SS`. Hours may exceed 23.
    ///
    /// # Examples
    ///
    /// ```
    /// use raptor_paths::domain::TransitTime;
    ///
    /// assert!(TransitTime::parse("00:00").is_ok());
    /// assert!(TransitTime::parse("27:59:59").is_ok());
    ///
    /// assert!(TransitTime::parse("1430").is_err());
    /// assert!(TransitTime::parse("14:3").is_err());
    /// assert!(TransitTime::parse("14:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split(':');

        let hours = parts
            .next()
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;
        let minutes = parts
            .next()
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;
        let seconds = parts.next();
        if parts.next().is_some() {
            return Err(TimeError::new("too many components"));
        }

        if hours.len() != 2 {
            return Err(TimeError::new("hours must be two digits"));
        }
        let hours = parse_two_digits(hours.as_bytes())
            .ok_or_else(|| TimeError::new("invalid hour digits"))?;

        let minutes = parse_sexagesimal(minutes)
            .ok_or_else(|| TimeError::new("minutes must be two digits 00-59"))?;

        let seconds = match seconds {
            Some(s) => parse_sexagesimal(s)
                .ok_or_else(|| TimeError::new("seconds must be two digits 00-59"))?,
            None => 0,
        };

        Ok(Self::hms(hours, minutes, seconds))
    }

    /// Returns the number of seconds past midnight.
    pub fn seconds(&self) -> i32 {
        self.0
    }

    /// Add a duration, returning `None` on overflow.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let secs = i32::try_from(duration.num_seconds()).ok()?;
        self.0.checked_add(secs).map(Self)
    }

    /// Subtract a duration, returning `None` on overflow.
    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        let secs = i32::try_from(duration.num_seconds()).ok()?;
        self.0.checked_sub(secs).map(Self)
    }

    /// Returns the duration from `earlier` to `self`.
    ///
    /// Negative if `earlier` is actually later.
    pub fn since(&self, earlier: Self) -> Duration {
        Duration::seconds(i64::from(self.0) - i64::from(earlier.0))
    }
}

fn parse_two_digits(bytes: &[u8]) -> Option<i32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(i32::from(a - b'0') * 10 + i32::from(b - b'0'))
        }
        _ => None,
    }
}

fn parse_sexagesimal(s: &str) -> Option<i32> {
    parse_two_digits(s.as_bytes()).filter(|v| *v < 60)
}

fn saturate(seconds: i64) -> TransitTime {
    let clamped = seconds.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    TransitTime(i32::try_from(clamped).unwrap_or_default())
}

/// Saturates at the ends of the representable range. Use `checked_add`
/// where an overflow must be reported.
impl Add<Duration> for TransitTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        saturate(i64::from(self.0).saturating_add(rhs.num_seconds()))
    }
}

/// Saturates like `Add`.
impl Sub<Duration> for TransitTime {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        saturate(i64::from(self.0).saturating_sub(rhs.num_seconds()))
    }
}

impl fmt::Debug for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransitTime({self})")
    }
}

impl fmt::Display for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total = self.0.unsigned_abs();
        let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
        if s == 0 {
            write!(f, "{sign}{h:02}:{m:02}")
        } else {
            write!(f, "{sign}{h:02}:{m:02}:{s:02}")
        }
    }
}

/// Serde adapter storing a `chrono::Duration` as whole seconds.
pub(crate) mod duration_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        i64::deserialize(d).map(Duration::seconds)
    }
}

/// Formats a duration compactly, e.g. `1h5m`, `7m`, `45s`.
pub fn format_duration(d: Duration) -> String {
    let secs = d.num_seconds();
    let (sign, secs) = if secs < 0 { ("-", -secs) } else { ("", secs) };
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    let mut out = String::from(sign);
    if h > 0 {
        out.push_str(&format!("{h}h"));
    }
    if m > 0 {
        out.push_str(&format!("{m}m"));
    }
    if s > 0 || (h == 0 && m == 0) {
        out.push_str(&format!("{s}s"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hh_mm() {
        let t = TransitTime::parse("08:05").unwrap();
        assert_eq!(t.seconds(), 8 * 3600 + 5 * 60);
    }

    #[test]
    fn parse_hh_mm_ss() {
        let t = TransitTime::parse("08:05:30").unwrap();
        assert_eq!(t.seconds(), 8 * 3600 + 5 * 60 + 30);
    }

    #[test]
    fn parse_after_midnight() {
        let t = TransitTime::parse("25:00").unwrap();
        assert_eq!(t, TransitTime::hms(25, 0, 0));
    }

    #[test]
    fn reject_malformed() {
        for bad in ["", "8:00", "08", "08:0", "08:60", "08:00:60", "08:00:00:00", "ab:cd"] {
            assert!(TransitTime::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn display_omits_zero_seconds() {
        assert_eq!(TransitTime::hms(9, 7, 0).to_string(), "09:07");
        assert_eq!(TransitTime::hms(9, 7, 3).to_string(), "09:07:03");
        assert_eq!(TransitTime::from_seconds(-60).to_string(), "-00:01");
    }

    #[test]
    fn arithmetic() {
        let t = TransitTime::hms(10, 0, 0);
        assert_eq!(t + Duration::minutes(5), TransitTime::hms(10, 5, 0));
        assert_eq!(t - Duration::minutes(5), TransitTime::hms(9, 55, 0));
        assert_eq!(TransitTime::hms(10, 30, 0).since(t), Duration::minutes(30));
        assert_eq!(t.since(TransitTime::hms(10, 30, 0)), Duration::minutes(-30));
    }

    #[test]
    fn checked_arithmetic_overflow() {
        let t = TransitTime::from_seconds(i32::MAX);
        assert!(t.checked_add(Duration::seconds(1)).is_none());
        assert!(TransitTime::MIDNIGHT.checked_sub(Duration::seconds(1)).is_some());
        assert!(TransitTime::MIDNIGHT.checked_add(Duration::days(30_000)).is_none());
    }

    #[test]
    fn operators_saturate() {
        let huge = Duration::days(30_000);
        assert_eq!(TransitTime::hms(10, 0, 0) + huge, TransitTime::from_seconds(i32::MAX));
        assert_eq!(TransitTime::hms(10, 0, 0) - huge, TransitTime::from_seconds(i32::MIN));
        assert_eq!(
            TransitTime::from_seconds(i32::MAX) + Duration::seconds(1),
            TransitTime::from_seconds(i32::MAX)
        );
    }

    #[test]
    fn format_durations() {
        assert_eq!(format_duration(Duration::seconds(0)), "0s");
        assert_eq!(format_duration(Duration::seconds(45)), "45s");
        assert_eq!(format_duration(Duration::minutes(7)), "7m");
        assert_eq!(format_duration(Duration::minutes(65)), "1h5m");
    }

    #[test]
    fn serializes_as_seconds() {
        let json = serde_json::to_string(&TransitTime::hms(1, 0, 1)).unwrap();
        assert_eq!(json, "3601");
        let back: TransitTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TransitTime::hms(1, 0, 1));
    }
}
