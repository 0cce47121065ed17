//! Sleep model boundary.
//!
//! The estimator only sees [`SleepPredictor`]. Production code plugs in a
//! [`LinearSleepModel`] (bundled coefficients) or a [`ModelFile`] (loaded on
//! every call); tests plug in closures via [`predictor_fn`].

mod linear;

pub use linear::{Coefficients, LinearSleepModel, ModelFile};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Feature vector fed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepFeatures {
    /// Wake time as seconds since midnight.
    pub wake: f64,
    /// Sleep goal in hours.
    pub estimated_sleep: f64,
    /// Cups of coffee per day.
    pub coffee: f64,
}

impl SleepFeatures {
    pub fn new(wake: f64, estimated_sleep: f64, coffee: f64) -> Self {
        Self {
            wake,
            estimated_sleep,
            coffee,
        }
    }

    /// The first non-finite feature, if any.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        [
            ("wake", self.wake),
            ("estimated_sleep", self.estimated_sleep),
            ("coffee", self.coffee),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    }
}

/// Predicts how many seconds of actual sleep the user needs.
///
/// The output is opaque: it is not guaranteed to be bounded, positive or
/// monotonic in any feature.
pub trait SleepPredictor {
    /// # Errors
    ///
    /// Returns a [`ModelError`] when the model cannot be loaded, rejects the
    /// features, or fails internally.
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError>;
}

impl<P: SleepPredictor + ?Sized> SleepPredictor for &P {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        (**self).predict(features)
    }
}

impl<P: SleepPredictor + ?Sized> SleepPredictor for Box<P> {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        (**self).predict(features)
    }
}

/// Predictor backed by a closure.
#[derive(Debug, Clone, Copy)]
pub struct FnPredictor<F>(F);

impl<F> SleepPredictor for FnPredictor<F>
where
    F: Fn(&SleepFeatures) -> Result<f64, ModelError>,
{
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        (self.0)(features)
    }
}

/// Wrap a closure as a [`SleepPredictor`].
pub fn predictor_fn<F>(f: F) -> FnPredictor<F>
where
    F: Fn(&SleepFeatures) -> Result<f64, ModelError>,
{
    FnPredictor(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_invalid_reports_feature_name() {
        let features = SleepFeatures::new(25_200.0, f64::NAN, 1.0);
        let (name, value) = features.first_invalid().unwrap();
        assert_eq!(name, "estimated_sleep");
        assert!(value.is_nan());
        assert!(SleepFeatures::new(0.0, 8.0, 1.0).first_invalid().is_none());
    }

    #[test]
    fn boxed_and_borrowed_predictors_delegate() {
        let model = predictor_fn(|f: &SleepFeatures| Ok(f.estimated_sleep * 3600.0));
        let features = SleepFeatures::new(0.0, 2.0, 1.0);
        assert_eq!((&model).predict(&features), Ok(7200.0));

        let boxed: Box<dyn SleepPredictor> = Box::new(model);
        assert_eq!(boxed.predict(&features), Ok(7200.0));
    }
}
