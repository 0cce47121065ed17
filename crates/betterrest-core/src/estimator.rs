//! Bedtime estimator.
//!
//! Owns the three form inputs and the recommended bedtime derived from them.
//! Every committed input change triggers exactly one synchronous
//! recomputation, so the displayed bedtime never lags the inputs.
//!
//! ```
//! use betterrest_core::{BedtimeEstimator, WakeTime};
//! use betterrest_core::model::predictor_fn;
//!
//! let mut estimator = BedtimeEstimator::new(predictor_fn(|_| Ok(28_800.0)));
//! assert_eq!(estimator.recommended_bedtime(), "11:00 PM");
//!
//! estimator.set_wake_time(WakeTime::new(6, 30).unwrap());
//! assert_eq!(estimator.recommended_bedtime(), "10:30 PM");
//! ```

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::events::{Event, InputField};
use crate::format::{bedtime_before, Bedtime, ClockStyle};
use crate::inputs::{CaffeineCups, SleepGoal, WakeTime};
use crate::model::{SleepFeatures, SleepPredictor};

/// Shown instead of a bedtime whenever the model fails.
pub const FALLBACK_MESSAGE: &str = "Sorry, there was a problem calculating your bedtime.";

/// The three form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub wake_time: WakeTime,
    pub sleep_goal: SleepGoal,
    pub caffeine_cups: CaffeineCups,
}

impl FormState {
    pub fn features(&self) -> SleepFeatures {
        SleepFeatures::new(
            f64::from(self.wake_time.seconds_since_midnight()),
            self.sleep_goal.hours(),
            f64::from(self.caffeine_cups.count()),
        )
    }
}

/// The derived output: a formatted bedtime or the fallback message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    Bedtime { bedtime: Bedtime, display: String },
    Unavailable,
}

impl Recommendation {
    /// Display text.
    pub fn as_str(&self) -> &str {
        match self {
            Recommendation::Bedtime { display, .. } => display,
            Recommendation::Unavailable => FALLBACK_MESSAGE,
        }
    }

    pub fn bedtime(&self) -> Option<Bedtime> {
        match self {
            Recommendation::Bedtime { bedtime, .. } => Some(*bedtime),
            Recommendation::Unavailable => None,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Listener = Box<dyn FnMut(&Event)>;

/// Recomputes the recommended bedtime whenever an input is committed.
pub struct BedtimeEstimator<P> {
    model: P,
    clock: ClockStyle,
    state: FormState,
    recommendation: Recommendation,
    recomputations: u64,
    listeners: Vec<Listener>,
}

impl<P: SleepPredictor> BedtimeEstimator<P> {
    /// Default inputs (07:00, 8 hours, 1 cup), 12-hour clock.
    pub fn new(model: P) -> Self {
        Self::with_state(model, FormState::default(), ClockStyle::default())
    }

    /// Start from the given inputs. The bedtime is computed once here.
    pub fn with_state(model: P, state: FormState, clock: ClockStyle) -> Self {
        let mut estimator = Self {
            model,
            clock,
            state,
            recommendation: Recommendation::Unavailable,
            recomputations: 0,
            listeners: Vec::new(),
        };
        estimator.recompute();
        estimator
    }

    /// Register a listener for input commits and recomputations.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Commit a new wake time. Returns false, without recomputing, if the
    /// value is unchanged.
    pub fn set_wake_time(&mut self, wake_time: WakeTime) -> bool {
        if self.state.wake_time == wake_time {
            return false;
        }
        self.state.wake_time = wake_time;
        self.commit(InputField::WakeTime, wake_time.to_string());
        true
    }

    /// Commit a new sleep goal. The value is not range-checked here.
    pub fn set_sleep_goal(&mut self, sleep_goal: SleepGoal) -> bool {
        if self.state.sleep_goal == sleep_goal {
            return false;
        }
        self.state.sleep_goal = sleep_goal;
        self.commit(InputField::SleepGoal, sleep_goal.to_string());
        true
    }

    /// Commit a new cup count. The value is not range-checked here.
    pub fn set_caffeine_cups(&mut self, cups: CaffeineCups) -> bool {
        if self.state.caffeine_cups == cups {
            return false;
        }
        self.state.caffeine_cups = cups;
        self.commit(InputField::CaffeineCups, cups.to_string());
        true
    }

    fn commit(&mut self, field: InputField, value: String) {
        self.emit(&Event::InputCommitted {
            field,
            value,
            at: Utc::now(),
        });
        self.recompute();
    }

    /// Recompute the recommended bedtime from the current inputs.
    ///
    /// Never fails: any model error becomes [`FALLBACK_MESSAGE`].
    pub fn recompute(&mut self) -> &Recommendation {
        self.recomputations += 1;
        let features = self.state.features();
        let wake = self.state.wake_time.as_time();

        let outcome = self.model.predict(&features).and_then(|seconds| {
            bedtime_before(wake, seconds).ok_or_else(|| {
                ModelError::Internal(format!("prediction is not a finite duration: {seconds}"))
            })
        });

        let (recommendation, event) = match outcome {
            Ok(bedtime) => {
                let text = self.clock.format(bedtime.time);
                tracing::debug!(
                    wake = %self.state.wake_time,
                    sleep_goal = self.state.sleep_goal.hours(),
                    cups = self.state.caffeine_cups.count(),
                    bedtime = %text,
                    "bedtime recomputed"
                );
                let event = Event::BedtimeRecomputed {
                    bedtime,
                    display: text.clone(),
                    at: Utc::now(),
                };
                (
                    Recommendation::Bedtime {
                        bedtime,
                        display: text,
                    },
                    event,
                )
            }
            Err(e) => {
                tracing::warn!("Bedtime prediction failed: {}", e);
                let event = Event::PredictionFailed {
                    reason: e.to_string(),
                    at: Utc::now(),
                };
                (Recommendation::Unavailable, event)
            }
        };

        self.recommendation = recommendation;
        self.emit(&event);
        &self.recommendation
    }

    fn emit(&mut self, event: &Event) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl<P> BedtimeEstimator<P> {
    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn wake_time(&self) -> WakeTime {
        self.state.wake_time
    }

    pub fn sleep_goal(&self) -> SleepGoal {
        self.state.sleep_goal
    }

    pub fn caffeine_cups(&self) -> CaffeineCups {
        self.state.caffeine_cups
    }

    pub fn clock_style(&self) -> ClockStyle {
        self.clock
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    /// The text shown under "Recommended Bed Time".
    pub fn recommended_bedtime(&self) -> &str {
        self.recommendation.as_str()
    }

    /// How many times the bedtime has been computed, including the initial one.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn model(&self) -> &P {
        &self.model
    }
}
