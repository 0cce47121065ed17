//! Form input values and the controls that constrain them.
//!
//! The estimator accepts whatever values it is given. Range limits live
//! here, on the consuming controls: the stepper for [`SleepGoal`] and the
//! picker for [`CaffeineCups`] snap and clamp before a value is committed.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Time of day the user wants to wake up. Only hour and minute matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WakeTime(NaiveTime);

impl WakeTime {
    pub const DEFAULT_HOUR: u32 = 7;
    pub const DEFAULT_MINUTE: u32 = 0;

    /// Build a wake time from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::TimeOutOfRange`] if `hour > 23` or `minute > 59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self, InputError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or(InputError::TimeOutOfRange { hour, minute })
    }

    /// Drops seconds and sub-second precision from `time`.
    pub fn from_time(time: NaiveTime) -> Self {
        Self(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Seconds since midnight: `hour * 3600 + minute * 60`.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.hour() * 3600 + self.minute() * 60
    }

    pub fn as_time(&self) -> NaiveTime {
        self.0
    }
}

impl Default for WakeTime {
    fn default() -> Self {
        Self(
            NaiveTime::from_hms_opt(Self::DEFAULT_HOUR, Self::DEFAULT_MINUTE, 0)
                .unwrap_or(NaiveTime::MIN),
        )
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for WakeTime {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| InputError::InvalidTime(s.to_string()))?;
        let hour: u32 = h
            .parse()
            .map_err(|_| InputError::InvalidTime(s.to_string()))?;
        let minute: u32 = m
            .parse()
            .map_err(|_| InputError::InvalidTime(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for WakeTime {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WakeTime> for String {
    fn from(value: WakeTime) -> Self {
        value.to_string()
    }
}

/// Desired amount of sleep, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SleepGoal(f64);

impl SleepGoal {
    pub const MIN: f64 = 4.0;
    pub const MAX: f64 = 12.0;
    pub const STEP: f64 = 0.25;
    pub const DEFAULT: f64 = 8.0;

    /// Wraps `hours` as-is. No range check.
    pub fn new(hours: f64) -> Self {
        Self(hours)
    }

    /// Snaps to the nearest 0.25 step and clamps into [4, 12], the way the
    /// stepper control does.
    pub fn clamped(hours: f64) -> Self {
        if hours.is_nan() {
            return Self::default();
        }
        let snapped = (hours / Self::STEP).round() * Self::STEP;
        Self(snapped.clamp(Self::MIN, Self::MAX))
    }

    /// Stepper "+" press.
    pub fn increment(self) -> Self {
        Self::clamped(self.0 + Self::STEP)
    }

    /// Stepper "-" press.
    pub fn decrement(self) -> Self {
        Self::clamped(self.0 - Self::STEP)
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    /// True when the value is one the stepper could have produced.
    pub fn is_valid(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0) && (self.0 / Self::STEP).fract() == 0.0
    }
}

impl Default for SleepGoal {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for SleepGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours", self.0)
    }
}

impl FromStr for SleepGoal {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .map(Self)
            .map_err(|_| InputError::InvalidNumber {
                field: "sleep goal",
                value: s.to_string(),
            })
    }
}

/// Daily coffee intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaffeineCups(u32);

impl CaffeineCups {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;
    pub const DEFAULT: u32 = 1;

    /// Wraps `cups` as-is. No range check.
    pub fn new(cups: u32) -> Self {
        Self(cups)
    }

    /// Clamps into [1, 20], the range the picker enumerates.
    pub fn clamped(cups: i64) -> Self {
        Self(cups.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u32)
    }

    /// Every value the picker offers, in display order.
    pub fn choices() -> impl Iterator<Item = CaffeineCups> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    pub fn count(&self) -> u32 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl Default for CaffeineCups {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for CaffeineCups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 cup")
        } else {
            write!(f, "{} cups", self.0)
        }
    }
}

impl FromStr for CaffeineCups {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| InputError::InvalidNumber {
                field: "caffeine cups",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wake_time_defaults_to_seven() {
        let wake = WakeTime::default();
        assert_eq!(wake.hour(), 7);
        assert_eq!(wake.minute(), 0);
        assert_eq!(wake.seconds_since_midnight(), 25_200);
    }

    #[test]
    fn wake_time_parses_and_displays() {
        let wake: WakeTime = "6:45".parse().unwrap();
        assert_eq!(wake.to_string(), "06:45");
        assert_eq!(wake.seconds_since_midnight(), 6 * 3600 + 45 * 60);
    }

    #[test]
    fn wake_time_rejects_bad_text() {
        assert_eq!(
            "0700".parse::<WakeTime>(),
            Err(InputError::InvalidTime("0700".into()))
        );
        assert_eq!(
            "24:00".parse::<WakeTime>(),
            Err(InputError::TimeOutOfRange { hour: 24, minute: 0 })
        );
    }

    #[test]
    fn wake_time_from_time_drops_seconds() {
        let t = NaiveTime::from_hms_opt(5, 30, 42).unwrap();
        assert_eq!(WakeTime::from_time(t), WakeTime::new(5, 30).unwrap());
    }

    #[test]
    fn wake_time_serializes_as_string() {
        let json = serde_json::to_string(&WakeTime::new(9, 5).unwrap()).unwrap();
        assert_eq!(json, "\"09:05\"");
        let back: WakeTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back.minute(), 5);
    }

    #[test]
    fn stepper_saturates_at_bounds() {
        let max = SleepGoal::clamped(12.0);
        assert_eq!(max.increment().hours(), 12.0);
        let min = SleepGoal::clamped(4.0);
        assert_eq!(min.decrement().hours(), 4.0);
        assert_eq!(SleepGoal::default().increment().hours(), 8.25);
        assert_eq!(SleepGoal::default().decrement().hours(), 7.75);
    }

    #[test]
    fn clamped_sleep_goal_snaps_to_quarter_hours() {
        assert_eq!(SleepGoal::clamped(7.3).hours(), 7.25);
        assert_eq!(SleepGoal::clamped(7.4).hours(), 7.5);
        assert_eq!(SleepGoal::clamped(1.0).hours(), 4.0);
        assert_eq!(SleepGoal::clamped(40.0).hours(), 12.0);
        assert_eq!(SleepGoal::clamped(f64::NAN).hours(), 8.0);
    }

    #[test]
    fn sleep_goal_display_drops_trailing_zero() {
        assert_eq!(SleepGoal::new(8.0).to_string(), "8 hours");
        assert_eq!(SleepGoal::new(7.25).to_string(), "7.25 hours");
    }

    #[test]
    fn sleep_goal_validity() {
        assert!(SleepGoal::new(4.0).is_valid());
        assert!(SleepGoal::new(11.75).is_valid());
        assert!(!SleepGoal::new(3.75).is_valid());
        assert!(!SleepGoal::new(8.1).is_valid());
    }

    #[test]
    fn picker_offers_one_through_twenty() {
        let choices: Vec<u32> = CaffeineCups::choices().map(|c| c.count()).collect();
        assert_eq!(choices.len(), 20);
        assert_eq!(choices.first(), Some(&1));
        assert_eq!(choices.last(), Some(&20));
    }

    #[test]
    fn caffeine_cups_clamps() {
        assert_eq!(CaffeineCups::clamped(0).count(), 1);
        assert_eq!(CaffeineCups::clamped(-3).count(), 1);
        assert_eq!(CaffeineCups::clamped(99).count(), 20);
        assert!(!CaffeineCups::new(21).is_valid());
    }

    #[test]
    fn caffeine_cups_display_pluralizes() {
        assert_eq!(CaffeineCups::new(1).to_string(), "1 cup");
        assert_eq!(CaffeineCups::new(3).to_string(), "3 cups");
    }
}
