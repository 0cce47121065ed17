//! Integration tests for the bedtime estimator.

use std::cell::RefCell;
use std::rc::Rc;

use betterrest_core::model::predictor_fn;
use betterrest_core::{
    BedtimeEstimator, CaffeineCups, ClockStyle, Config, Event, LinearSleepModel, ModelError,
    ModelFile, SleepFeatures, SleepGoal, WakeTime, FALLBACK_MESSAGE,
};

#[test]
fn test_full_form_workflow_with_bundled_model() {
    let mut estimator = BedtimeEstimator::new(LinearSleepModel::bundled());

    // 07:00, 8 hours, 1 cup
    assert_eq!(estimator.recommended_bedtime(), "10:31 PM");

    // Earlier alarm moves bedtime earlier
    estimator.set_wake_time(WakeTime::new(6, 0).unwrap());
    assert_eq!(estimator.recommended_bedtime(), "9:27 PM");

    // Stepper down 15 minutes
    estimator.set_sleep_goal(estimator.sleep_goal().decrement());
    assert_eq!(estimator.sleep_goal(), SleepGoal::new(7.75));
    assert_eq!(estimator.recommended_bedtime(), "9:42 PM");

    // Each extra cup adds 25 minutes
    estimator.set_caffeine_cups(CaffeineCups::new(2));
    assert_eq!(estimator.recommended_bedtime(), "9:17 PM");

    assert_eq!(estimator.recomputations(), 4);
}

#[test]
fn test_model_file_edits_apply_on_next_recompute() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.toml");
    std::fs::write(&path, LinearSleepModel::bundled().to_toml().unwrap()).unwrap();

    let mut estimator = BedtimeEstimator::new(ModelFile::new(&path));
    assert_eq!(estimator.recommended_bedtime(), "10:31 PM");

    // A broken file is reported as the fallback, not an error
    std::fs::write(&path, "not a model").unwrap();
    estimator.recompute();
    assert_eq!(estimator.recommended_bedtime(), FALLBACK_MESSAGE);

    let eight_hours = "intercept = 28800.0\n[coefficients]\nwake = 0.0\nestimated_sleep = 0.0\ncoffee = 0.0\n";
    std::fs::write(&path, eight_hours).unwrap();
    estimator.recompute();
    assert_eq!(estimator.recommended_bedtime(), "11:00 PM");
}

#[test]
fn test_configured_state_and_clock() {
    let mut config = Config::default();
    config.set("form.wake_time", "05:45").unwrap();
    config.set("display.clock", "24h").unwrap();

    let model = predictor_fn(|_: &SleepFeatures| Ok(7.5 * 3600.0));
    let estimator =
        BedtimeEstimator::with_state(model, config.form_state(), config.display.clock);
    assert_eq!(estimator.clock_style(), ClockStyle::TwentyFourHour);
    assert_eq!(estimator.recommended_bedtime(), "22:15");
}

#[test]
fn test_event_stream_matches_recommendations() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);

    let model = predictor_fn(|f: &SleepFeatures| {
        if f.coffee > 10.0 {
            Err(ModelError::Internal("too much coffee".into()))
        } else {
            Ok(f.estimated_sleep * 3600.0)
        }
    });
    let mut estimator = BedtimeEstimator::new(model);
    estimator.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    estimator.set_caffeine_cups(CaffeineCups::new(12));
    assert_eq!(estimator.recommended_bedtime(), FALLBACK_MESSAGE);
    estimator.set_caffeine_cups(CaffeineCups::new(3));
    assert_eq!(estimator.recommended_bedtime(), "11:00 PM");

    let events = events.borrow();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[1], Event::PredictionFailed { .. }));
    match &events[3] {
        Event::BedtimeRecomputed { display, bedtime, .. } => {
            assert_eq!(display, "11:00 PM");
            assert_eq!(bedtime.days_before, 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(events.windows(2).all(|w| w[0].at() <= w[1].at()));
}
