//! Interactive bedtime form.
//!
//! Reads one control action per line and prints the recommended bedtime
//! after each committed change.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;

use betterrest_core::{
    BedtimeEstimator, CaffeineCups, Config, SleepGoal, SleepPredictor, WakeTime,
};

use super::{clock_for, predictor_for};

const HELP: &str = "\
Commands:
  wake HH:MM     set the wake-up time
  sleep + | -    step the sleep goal by 15 minutes
  sleep H        set the sleep goal in hours (4-12)
  coffee N       set daily cups of coffee (1-20)
  show           print the whole form
  help           print this help
  quit           leave";

#[derive(Args)]
pub struct FormArgs {
    /// TOML model file to use instead of the configured one
    #[arg(long)]
    pub model: Option<PathBuf>,
    /// Clock style: 12h or 24h
    #[arg(long)]
    pub clock: Option<String>,
    /// Print estimator events to stderr as JSON lines
    #[arg(long)]
    pub events: bool,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
enum FormCommand {
    Wake(WakeTime),
    SleepUp,
    SleepDown,
    Sleep(f64),
    Coffee(i64),
    Show,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<FormCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments: {line}"));
    }

    let command = match (verb.to_lowercase().as_str(), arg) {
        ("wake", Some(time)) => {
            FormCommand::Wake(time.parse::<WakeTime>().map_err(|e| e.to_string())?)
        }
        ("sleep", Some("+")) => FormCommand::SleepUp,
        ("sleep", Some("-")) => FormCommand::SleepDown,
        ("sleep", Some(hours)) => FormCommand::Sleep(
            hours
                .parse::<f64>()
                .map_err(|_| format!("not a number of hours: {hours}"))?,
        ),
        ("coffee", Some(cups)) => FormCommand::Coffee(
            cups.parse::<i64>()
                .map_err(|_| format!("not a number of cups: {cups}"))?,
        ),
        ("show", None) => FormCommand::Show,
        ("help", None) | ("?", None) => FormCommand::Help,
        ("quit", None) | ("exit", None) => FormCommand::Quit,
        _ => return Err(format!("unrecognized command: {line} (try 'help')")),
    };
    Ok(Some(command))
}

fn render<P: SleepPredictor, W: Write>(
    estimator: &BedtimeEstimator<P>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "BetterRest")?;
    writeln!(out, "  When do you want to wake up?  {}", estimator.wake_time())?;
    writeln!(out, "  Desired amount of sleep       {}", estimator.sleep_goal())?;
    writeln!(out, "  Daily coffee intake           {}", estimator.caffeine_cups())?;
    writeln!(out, "  Recommended Bed Time          {}", estimator.recommended_bedtime())?;
    Ok(())
}

/// Drive the form from `input` until EOF or `quit`.
fn run_session<P, R, W>(
    estimator: &mut BedtimeEstimator<P>,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    P: SleepPredictor,
    R: BufRead,
    W: Write,
{
    render(estimator, out)?;
    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        let changed = match command {
            FormCommand::Wake(time) => estimator.set_wake_time(time),
            FormCommand::SleepUp => estimator.set_sleep_goal(estimator.sleep_goal().increment()),
            FormCommand::SleepDown => estimator.set_sleep_goal(estimator.sleep_goal().decrement()),
            FormCommand::Sleep(hours) => estimator.set_sleep_goal(SleepGoal::clamped(hours)),
            FormCommand::Coffee(cups) => estimator.set_caffeine_cups(CaffeineCups::clamped(cups)),
            FormCommand::Show => {
                render(estimator, out)?;
                continue;
            }
            FormCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            FormCommand::Quit => break,
        };

        if changed {
            writeln!(out, "Recommended Bed Time: {}", estimator.recommended_bedtime())?;
        } else {
            writeln!(out, "(unchanged)")?;
        }
    }
    out.flush()
}

pub fn run(args: FormArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let clock = clock_for(&config, args.clock.as_deref())?;
    let predictor = predictor_for(&config, args.model);

    let mut estimator = BedtimeEstimator::with_state(predictor, config.form_state(), clock);
    if args.events {
        estimator.subscribe(|event| match serde_json::to_string(event) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => tracing::warn!("Failed to encode event: {}", e),
        });
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&mut estimator, stdin.lock(), &mut stdout)?;
    Ok(())
}
