//! One-shot bedtime recommendation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use betterrest_core::{
    BedtimeEstimator, CaffeineCups, Config, FormState, Recommendation, SleepGoal, WakeTime,
};

use super::{clock_for, predictor_for};

#[derive(Args)]
pub struct EstimateArgs {
    /// Wake-up time (HH:MM)
    #[arg(long)]
    pub wake: Option<String>,
    /// Desired sleep in hours; snapped to 0.25 and clamped to 4-12
    #[arg(long, allow_negative_numbers = true)]
    pub sleep: Option<f64>,
    /// Daily cups of coffee; clamped to 1-20
    #[arg(long, allow_negative_numbers = true)]
    pub coffee: Option<i64>,
    /// TOML model file to use instead of the configured one
    #[arg(long)]
    pub model: Option<PathBuf>,
    /// Clock style: 12h or 24h
    #[arg(long)]
    pub clock: Option<String>,
    /// Print the inputs and result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct EstimateReport<'a> {
    inputs: FormState,
    recommendation: &'a Recommendation,
    text: &'a str,
}

/// Apply command-line overrides the way the form controls would.
fn form_state(config: &Config, args: &EstimateArgs) -> Result<FormState, Box<dyn std::error::Error>> {
    let mut state = config.form_state();
    if let Some(wake) = &args.wake {
        state.wake_time = wake.parse::<WakeTime>()?;
    }
    if let Some(sleep) = args.sleep {
        state.sleep_goal = SleepGoal::clamped(sleep);
    }
    if let Some(coffee) = args.coffee {
        state.caffeine_cups = CaffeineCups::clamped(coffee);
    }
    Ok(state)
}

pub fn run(args: EstimateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let state = form_state(&config, &args)?;
    let clock = clock_for(&config, args.clock.as_deref())?;
    let predictor = predictor_for(&config, args.model.clone());

    let estimator = BedtimeEstimator::with_state(predictor, state, clock);

    if args.json {
        let report = EstimateReport {
            inputs: estimator.state(),
            recommendation: estimator.recommendation(),
            text: estimator.recommended_bedtime(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", estimator.recommended_bedtime());
    }
    Ok(())
}
