//! # BetterRest Core Library
//!
//! This library provides the logic behind the BetterRest bedtime form: given
//! a wake time, a sleep goal and daily coffee intake, it asks a sleep model
//! how much actual sleep is needed and recommends when to go to bed.
//!
//! ## Architecture
//!
//! - **Estimator**: owns the form inputs and recomputes the recommended
//!   bedtime synchronously after every committed change
//! - **Inputs**: value types and the clamping controls that feed the estimator
//! - **Model**: the injectable [`SleepPredictor`] boundary and a linear
//!   regressor loaded from bundled coefficients or a TOML file
//! - **Storage**: TOML-based preferences (starting values, clock, model path)
//!
//! ## Key Components
//!
//! - [`BedtimeEstimator`]: Input state and derived bedtime
//! - [`SleepPredictor`]: Trait for sleep models
//! - [`Config`]: Application configuration management

pub mod estimator;
pub mod inputs;
pub mod model;
pub mod format;
pub mod storage;
pub mod events;
pub mod error;

pub use estimator::{BedtimeEstimator, FormState, Recommendation, FALLBACK_MESSAGE};
pub use inputs::{CaffeineCups, SleepGoal, WakeTime};
pub use model::{LinearSleepModel, ModelFile, SleepFeatures, SleepPredictor};
pub use format::{Bedtime, ClockStyle};
pub use storage::Config;
pub use events::{Event, InputField};
pub use error::{CoreError, ConfigError, InputError, ModelError};
