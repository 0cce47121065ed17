//! Bedtime arithmetic and short time-of-day formatting.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// How a time of day is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockStyle {
    /// `11:00 PM`
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// `23:00`
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl ClockStyle {
    fn pattern(self) -> &'static str {
        match self {
            ClockStyle::TwelveHour => "%-I:%M %p",
            ClockStyle::TwentyFourHour => "%H:%M",
        }
    }

    /// Format `time` as a short time-of-day string. Seconds are dropped.
    pub fn format(self, time: NaiveTime) -> String {
        time.format(self.pattern()).to_string()
    }

    /// True if `text` is something [`ClockStyle::format`] could produce.
    pub fn is_short_time(self, text: &str) -> bool {
        NaiveTime::parse_from_str(text, self.pattern()).is_ok()
    }
}

impl fmt::Display for ClockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockStyle::TwelveHour => write!(f, "12h"),
            ClockStyle::TwentyFourHour => write!(f, "24h"),
        }
    }
}

impl FromStr for ClockStyle {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "12h" | "12" => Ok(ClockStyle::TwelveHour),
            "24h" | "24" => Ok(ClockStyle::TwentyFourHour),
            _ => Err(InputError::InvalidClock(s.to_string())),
        }
    }
}

/// A bedtime on a 24h clock, relative to the wake-up day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bedtime {
    /// Time of day to go to bed.
    pub time: NaiveTime,
    /// Whole days before the wake-up day (1 = the evening before).
    pub days_before: u32,
}

/// Subtract `predicted_seconds` of sleep from `wake`.
///
/// Wraps across midnight as many times as needed and truncates to whole
/// seconds. Returns `None` for non-finite input.
pub fn bedtime_before(wake: NaiveTime, predicted_seconds: f64) -> Option<Bedtime> {
    if !predicted_seconds.is_finite() {
        return None;
    }
    let wake_secs = f64::from(chrono::Timelike::num_seconds_from_midnight(&wake));
    let raw = (wake_secs - predicted_seconds).floor();
    let time_secs = raw.rem_euclid(SECONDS_PER_DAY);
    // raw < 0 means the bedtime falls on an earlier day
    let days_before = (-(raw / SECONDS_PER_DAY).floor()).max(0.0);

    let time = NaiveTime::from_num_seconds_from_midnight_opt(time_secs as u32, 0)?;
    Some(Bedtime {
        time,
        days_before: days_before.min(f64::from(u32::MAX)) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn eight_hours_before_seven_is_eleven_pm_previous_day() {
        let bed = bedtime_before(at(7, 0), 28_800.0).unwrap();
        assert_eq!(bed.time, at(23, 0));
        assert_eq!(bed.days_before, 1);
        assert_eq!(ClockStyle::TwelveHour.format(bed.time), "11:00 PM");
        assert_eq!(ClockStyle::TwentyFourHour.format(bed.time), "23:00");
    }

    #[test]
    fn same_day_bedtime_has_no_offset() {
        let bed = bedtime_before(at(14, 30), 3_600.0).unwrap();
        assert_eq!(bed.time, at(13, 30));
        assert_eq!(bed.days_before, 0);
    }

    #[test]
    fn negative_prediction_moves_forward() {
        let bed = bedtime_before(at(23, 30), -3_600.0).unwrap();
        assert_eq!(bed.time, at(0, 30));
        assert_eq!(bed.days_before, 0);
    }

    #[test]
    fn long_prediction_wraps_multiple_days() {
        let bed = bedtime_before(at(7, 0), 2.0 * 86_400.0 + 3_600.0).unwrap();
        assert_eq!(bed.time, at(6, 0));
        assert_eq!(bed.days_before, 2);
    }

    #[test]
    fn fractional_seconds_truncate_toward_earlier_time() {
        let bed = bedtime_before(at(7, 0), 28_800.4).unwrap();
        assert_eq!(ClockStyle::TwelveHour.format(bed.time), "10:59 PM");
    }

    #[test]
    fn non_finite_prediction_has_no_bedtime() {
        assert!(bedtime_before(at(7, 0), f64::NAN).is_none());
        assert!(bedtime_before(at(7, 0), f64::INFINITY).is_none());
    }

    #[test]
    fn twelve_hour_format_has_no_leading_zero() {
        assert_eq!(ClockStyle::TwelveHour.format(at(9, 5)), "9:05 AM");
        assert_eq!(ClockStyle::TwelveHour.format(at(0, 0)), "12:00 AM");
        assert!(ClockStyle::TwelveHour.is_short_time("9:05 AM"));
        assert!(!ClockStyle::TwelveHour.is_short_time("Sorry"));
    }

    #[test]
    fn clock_style_parses() {
        assert_eq!("24h".parse::<ClockStyle>(), Ok(ClockStyle::TwentyFourHour));
        assert_eq!("12".parse::<ClockStyle>(), Ok(ClockStyle::TwelveHour));
        assert!("13h".parse::<ClockStyle>().is_err());
    }
}
