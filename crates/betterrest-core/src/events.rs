//! Events emitted by the estimator to its subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::Bedtime;

/// Which form input was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    WakeTime,
    SleepGoal,
    CaffeineCups,
}

/// Every committed change and recomputation produces an Event.
/// Front-ends subscribe to them through the estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    InputCommitted {
        field: InputField,
        value: String,
        at: DateTime<Utc>,
    },
    BedtimeRecomputed {
        bedtime: Bedtime,
        display: String,
        at: DateTime<Utc>,
    },
    /// The model failed and the fallback message is shown.
    PredictionFailed {
        reason: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::InputCommitted { at, .. }
            | Event::BedtimeRecomputed { at, .. }
            | Event::PredictionFailed { at, .. } => *at,
        }
    }
}
