//! Clock values and minute arithmetic within a single day.
//!
//! Sessions never cross midnight, so there is no day rollover anywhere in
//! here: arithmetic that leaves the day is clamped instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationFailure;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// A wall-clock time on the event day with minute resolution.
///
/// Stored as minutes since midnight. `24:00` is representable so that a
/// session may end exactly at the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clock(u16);

impl Clock {
    pub const MIDNIGHT: Clock = Clock(0);
    pub const END_OF_DAY: Clock = Clock(MINUTES_PER_DAY);

    /// Default anchor for newly added sessions.
    pub const DEFAULT_ANCHOR: Clock = Clock(9 * MINUTES_PER_HOUR);

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if minute > 59 {
            return None;
        }
        let total = u16::from(hour) * MINUTES_PER_HOUR + u16::from(minute);
        (total <= MINUTES_PER_DAY).then_some(Clock(total))
    }

    pub fn hour(self) -> u8 {
        (self.0 / MINUTES_PER_HOUR) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % MINUTES_PER_HOUR) as u8
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }

    /// Parse either a bare `HH:MM` or an ISO-8601 datetime such as
    /// `2025-10-29T15:00:00`, keeping only the time of day.
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let s = input.trim();
        if !is_iso_datetime(s) {
            return s.parse().ok();
        }

        let hour = two_digits(s.get(11..13)?)?;
        let minute = if s.len() == 13 {
            0
        } else if s.as_bytes().get(16).is_some_and(u8::is_ascii_digit) {
            return None;
        } else {
            two_digits(s.get(13..16)?.strip_prefix(':')?)?
        };
        Clock::from_hm(hour, minute)
    }
}

impl FromStr for Clock {
    type Err = ValidationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationFailure::MalformedTime(s.to_string());

        let (h, m) = s.trim().split_once(':').ok_or_else(malformed)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(malformed());
        }
        let hour: u8 = h.parse().map_err(|_| malformed())?;
        let minute: u8 = m.parse().map_err(|_| malformed())?;

        Clock::from_hm(hour, minute).ok_or_else(malformed)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for Clock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Clock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Clock::parse_lenient(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid clock time \"{raw}\"")))
    }
}

/// A datetime is recognized by its length and the date/time separator at
/// position 10 (`YYYY-MM-DDTHH...`).
fn is_iso_datetime(s: &str) -> bool {
    s.len() >= 13 && matches!(s.as_bytes()[10], b'T' | b't' | b' ')
}

fn two_digits(s: &str) -> Option<u8> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Add (possibly negative) minutes to a clock time.
///
/// The result is clamped per field rather than wrapped: the hour is the
/// floored quotient clamped to `0..=23` and the minute is the remainder
/// clamped to `0..=59`, each independently. `09:00 + 900` is `23:00`,
/// not `23:59` and not `00:00`.
pub fn add_minutes(clock: Clock, minutes: i64) -> Clock {
    let total = i64::from(clock.minutes_since_midnight()).saturating_add(minutes);
    let hour = total.div_euclid(i64::from(MINUTES_PER_HOUR)).clamp(0, 23);
    let minute = (total % i64::from(MINUTES_PER_HOUR)).clamp(0, 59);
    Clock((hour * i64::from(MINUTES_PER_HOUR) + minute) as u16)
}

/// `HH:00` for a whole hour, or `None` past the end of the day.
pub fn hour_to_clock(hour: u8) -> Option<Clock> {
    Clock::from_hm(hour, 0)
}

/// Extract the hour from `HH:MM` or an ISO datetime. Malformed or absent
/// input yields `None`.
pub fn clock_to_hour(input: Option<&str>) -> Option<u8> {
    let s = input?.trim();
    if s.is_empty() {
        return None;
    }

    if is_iso_datetime(s) {
        return two_digits(s.get(11..13)?);
    }
    s.split(':').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(s: &str) -> Clock {
        s.parse().unwrap()
    }

    #[test]
    fn add_minutes_within_day() {
        assert_eq!(add_minutes(clock("09:00"), 60), clock("10:00"));
        assert_eq!(add_minutes(clock("09:00"), 30), clock("09:30"));
        assert_eq!(add_minutes(clock("09:45"), 30), clock("10:15"));
    }

    #[test]
    fn add_minutes_clamps_hour_field_independently() {
        // 540 + 900 = 1440 -> hour 24 clamped to 23, minute 0 kept
        assert_eq!(add_minutes(clock("09:00"), 900), clock("23:00"));
        // 1425 + 30 = 1455 -> hour 24 clamped to 23, minute 15 kept
        assert_eq!(add_minutes(clock("23:45"), 30), clock("23:15"));
    }

    #[test]
    fn add_minutes_clamps_underflow_to_midnight() {
        assert_eq!(add_minutes(clock("00:10"), -30), clock("00:00"));
        assert_eq!(add_minutes(clock("09:00"), -600), clock("00:00"));
        assert_eq!(add_minutes(clock("01:10"), -30), clock("00:40"));
    }

    #[test]
    fn add_minutes_never_leaves_field_ranges() {
        for start in [0u16, 59, 540, 1380, 1439] {
            for delta in [-5000i64, -61, -1, 0, 1, 59, 61, 900, 5000, i64::MAX] {
                let result = add_minutes(Clock(start), delta);
                assert!(result.hour() <= 23, "{start} + {delta} -> {result}");
                assert!(result.minute() <= 59, "{start} + {delta} -> {result}");
            }
        }
    }

    #[test]
    fn hour_to_clock_pads() {
        assert_eq!(hour_to_clock(9).unwrap().to_string(), "09:00");
        assert_eq!(hour_to_clock(0).unwrap().to_string(), "00:00");
        assert_eq!(hour_to_clock(24), Some(Clock::END_OF_DAY));
        assert_eq!(hour_to_clock(25), None);
    }

    #[test]
    fn clock_to_hour_accepts_both_forms() {
        assert_eq!(clock_to_hour(Some("09:00")), Some(9));
        assert_eq!(clock_to_hour(Some("2025-10-29T15:00:00")), Some(15));
        assert_eq!(clock_to_hour(Some("")), None);
        assert_eq!(clock_to_hour(None), None);
        assert_eq!(clock_to_hour(Some("lunch")), None);
        assert_eq!(clock_to_hour(Some("2025-10-29Tab:00")), None);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!("9".parse::<Clock>().is_err());
        assert!("09:7".parse::<Clock>().is_err());
        assert!("24:30".parse::<Clock>().is_err());
        assert!("12:60".parse::<Clock>().is_err());
        assert_eq!("9:05".parse::<Clock>().unwrap(), clock("09:05"));
        assert_eq!("24:00".parse::<Clock>().unwrap(), Clock::END_OF_DAY);
    }

    #[test]
    fn parse_lenient_reads_iso_datetimes() {
        assert_eq!(Clock::parse_lenient("2025-10-29T15:30:00"), Some(clock("15:30")));
        assert_eq!(Clock::parse_lenient("2025-10-29 08:15"), Some(clock("08:15")));
        assert_eq!(Clock::parse_lenient("2025-10-29T15"), Some(clock("15:00")));
        assert_eq!(Clock::parse_lenient("10:45"), Some(clock("10:45")));
        assert_eq!(Clock::parse_lenient("2025-10-29"), None);
    }

    #[test]
    fn parse_lenient_rejects_truncated_iso_minutes() {
        assert_eq!(Clock::parse_lenient("2025-10-29T15:3"), None);
        assert_eq!(Clock::parse_lenient("2025-10-29T1530"), None);
        assert_eq!(Clock::parse_lenient("2025-10-29T15:3x"), None);
        assert_eq!(Clock::parse_lenient("2025-10-29T+5:30"), None);
        assert_eq!(Clock::parse_lenient("2025-10-29T15:305"), None);
        assert!(serde_json::from_str::<Clock>("\"2025-10-29T15:3\"").is_err());
    }

    #[test]
    fn serde_uses_hh_mm_strings() {
        let json = serde_json::to_string(&clock("07:05")).unwrap();
        assert_eq!(json, "\"07:05\"");

        let parsed: Clock = serde_json::from_str("\"2025-10-29T15:00:00\"").unwrap();
        assert_eq!(parsed, clock("15:00"));

        assert!(serde_json::from_str::<Clock>("\"noon\"").is_err());
    }
}
