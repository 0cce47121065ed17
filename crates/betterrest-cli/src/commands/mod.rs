pub mod config;
pub mod estimate;
pub mod form;
pub mod model;

use std::path::PathBuf;

use betterrest_core::{ClockStyle, Config, ModelFile, SleepPredictor};

/// Model chosen on the command line, else the configured one.
pub fn predictor_for(config: &Config, model: Option<PathBuf>) -> Box<dyn SleepPredictor> {
    match model {
        Some(path) => Box::new(ModelFile::new(path)),
        None => config.predictor(),
    }
}

/// Clock chosen on the command line, else the configured one.
pub fn clock_for(
    config: &Config,
    clock: Option<&str>,
) -> Result<ClockStyle, Box<dyn std::error::Error>> {
    match clock {
        Some(text) => Ok(text.parse()?),
        None => Ok(config.display.clock),
    }
}
