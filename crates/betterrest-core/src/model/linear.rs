//! Linear sleep regressor and its TOML model file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{SleepFeatures, SleepPredictor};
use crate::error::ModelError;

/// Per-feature weights of the linear model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Seconds of sleep per second of wake time.
    pub wake: f64,
    /// Seconds of sleep per hour of sleep goal.
    pub estimated_sleep: f64,
    /// Seconds of sleep per daily cup.
    pub coffee: f64,
}

/// `actual_sleep = intercept + Σ coefficient · feature`, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSleepModel {
    #[serde(default = "default_name")]
    pub name: String,
    pub intercept: f64,
    pub coefficients: Coefficients,
}

fn default_name() -> String {
    "custom".into()
}

impl LinearSleepModel {
    pub fn new(intercept: f64, coefficients: Coefficients) -> Self {
        Self {
            name: default_name(),
            intercept,
            coefficients,
        }
    }

    /// The regressor shipped with the application.
    pub fn bundled() -> Self {
        Self {
            name: "SleepCalculator".into(),
            intercept: 1_800.0,
            coefficients: Coefficients {
                wake: -0.0625,
                estimated_sleep: 3_600.0,
                coffee: 1_500.0,
            },
        }
    }

    /// Parse a model from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LoadFailed`] if the text is not a valid model.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ModelError> {
        let model: Self = toml::from_str(content).map_err(|e| ModelError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let values = [
            model.intercept,
            model.coefficients.wake,
            model.coefficients.estimated_sleep,
            model.coefficients.coffee,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::LoadFailed {
                path: path.to_path_buf(),
                message: "coefficients must be finite".into(),
            });
        }
        Ok(model)
    }

    /// Serialize to the model file format.
    ///
    /// # Errors
    ///
    /// Returns an error if TOML serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for LinearSleepModel {
    fn default() -> Self {
        Self::bundled()
    }
}

impl SleepPredictor for LinearSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        if let Some((feature, value)) = features.first_invalid() {
            return Err(ModelError::InvalidFeatures { feature, value });
        }
        let c = &self.coefficients;
        let seconds = self.intercept
            + c.wake * features.wake
            + c.estimated_sleep * features.estimated_sleep
            + c.coffee * features.coffee;
        if !seconds.is_finite() {
            return Err(ModelError::Internal(format!(
                "{} produced a non-finite prediction",
                self.name
            )));
        }
        Ok(seconds)
    }
}

/// A model stored on disk, reloaded on every prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFile {
    path: PathBuf,
}

impl ModelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the model file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LoadFailed`] if the file is missing or malformed.
    pub fn load(&self) -> Result<LinearSleepModel, ModelError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| ModelError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        LinearSleepModel::from_toml(&self.path, &content)
    }
}

impl SleepPredictor for ModelFile {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        self.load()?.predict(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_prediction_sums_weighted_features() {
        let model = LinearSleepModel::new(
            100.0,
            Coefficients {
                wake: 0.0,
                estimated_sleep: 3_600.0,
                coffee: 60.0,
            },
        );
        let seconds = model
            .predict(&SleepFeatures::new(25_200.0, 8.0, 2.0))
            .unwrap();
        assert_eq!(seconds, 100.0 + 28_800.0 + 120.0);
    }

    #[test]
    fn bundled_model_predicts_plausible_night() {
        let seconds = LinearSleepModel::bundled()
            .predict(&SleepFeatures::new(25_200.0, 8.0, 1.0))
            .unwrap();
        let hours = seconds / 3600.0;
        assert!((6.0..=11.0).contains(&hours), "got {hours} hours");
    }

    #[test]
    fn non_finite_feature_is_rejected() {
        let err = LinearSleepModel::bundled()
            .predict(&SleepFeatures::new(25_200.0, 8.0, f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidFeatures { feature: "coffee", .. }));
    }

    #[test]
    fn overflowing_prediction_is_internal_error() {
        let model = LinearSleepModel::new(
            f64::MAX,
            Coefficients {
                wake: 0.0,
                estimated_sleep: f64::MAX,
                coffee: 0.0,
            },
        );
        let err = model.predict(&SleepFeatures::new(0.0, 8.0, 1.0)).unwrap_err();
        assert!(matches!(err, ModelError::Internal(_)));
    }

    #[test]
    fn model_file_roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        let model = LinearSleepModel::bundled();
        std::fs::write(&path, model.to_toml().unwrap()).unwrap();

        let file = ModelFile::new(&path);
        assert_eq!(file.load().unwrap(), model);
        let features = SleepFeatures::new(25_200.0, 8.0, 1.0);
        assert_eq!(file.predict(&features), model.predict(&features));
    }

    #[test]
    fn missing_model_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = ModelFile::new(dir.path().join("absent.toml"));
        let err = file.predict(&SleepFeatures::new(0.0, 8.0, 1.0)).unwrap_err();
        assert!(matches!(err, ModelError::LoadFailed { .. }));
    }

    #[test]
    fn malformed_model_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        std::fs::write(&path, "intercept = \"lots\"").unwrap();
        let err = ModelFile::new(&path).load().unwrap_err();
        assert!(matches!(err, ModelError::LoadFailed { .. }));
    }

    #[test]
    fn name_defaults_when_omitted() {
        let text = "intercept = 0.0\n[coefficients]\nwake = 0.0\nestimated_sleep = 3600.0\ncoffee = 0.0\n";
        let model = LinearSleepModel::from_toml(Path::new("inline"), text).unwrap();
        assert_eq!(model.name, "custom");
    }
}
