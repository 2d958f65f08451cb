//! Shift the matches to start at the current time.
//!
//! Mostly useful while developing tooling against a compstate, to move its
//! matches to start at a convenient time.

use std::path::PathBuf;

use anyhow::Context;
use clap::ValueEnum;
use serde_yaml::Value;
use time::{Duration, OffsetDateTime};
use tracing::{info, instrument};

use crate::{
    configuration::Configuration,
    timestamp::{format_timestamp, now_local, parse_timestamp},
    yaml_round_trip::YamlStore,
};

const SHIFTED_KEYS: [&str; 3] = ["start_time", "end_time", "max_end_time"];

/// Which kind of match period to line up with now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Focus {
    League,
    Knockout,
}

impl Focus {
    fn key(self) -> &'static str {
        match self {
            Focus::League => "league",
            Focus::Knockout => "knockout",
        }
    }
}

fn shift_timestamp(value: &mut Value, delta: Duration) -> anyhow::Result<()> {
    let text = value.as_str().context("timestamp is not a string")?;
    let shifted = parse_timestamp(text)? + delta;
    *value = Value::from(format_timestamp(shifted)?);
    Ok(())
}

/// Moves every match period so that the first `focus` period starts one to
/// two minutes after `now`. Returns how far the periods moved.
pub fn shift_matches(
    schedule: &mut Value,
    focus: Focus,
    now: OffsetDateTime,
) -> anyhow::Result<Duration> {
    let periods = schedule
        .get_mut("match_periods")
        .and_then(Value::as_mapping_mut)
        .context("schedule has no match periods")?;

    let old_start = periods
        .get(focus.key())
        .and_then(|group| group.get(0))
        .and_then(|period| period.get("start_time"))
        .and_then(Value::as_str)
        .with_context(|| format!("no {} match period to focus on", focus.key()))?;
    let old_start = parse_timestamp(old_start)?;

    // round to 1-2 minutes ahead
    let new_start = now
        .to_offset(old_start.offset())
        .replace_second(0)?
        .replace_nanosecond(0)?
        + Duration::minutes(2);
    let delta = new_start - old_start;

    for group in periods.values_mut() {
        let Some(entries) = group.as_sequence_mut() else {
            continue;
        };
        for entry in entries {
            for key in SHIFTED_KEYS {
                if let Some(value) = entry.get_mut(key) {
                    shift_timestamp(value, delta)?;
                }
            }
        }
    }

    Ok(delta)
}

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Competition state repository
    pub compstate: PathBuf,
    /// Match period to focus
    #[arg(value_enum)]
    pub focus: Focus,
}

#[instrument(skip(_config))]
pub fn run(args: Args, _config: Configuration) -> anyhow::Result<()> {
    let store = YamlStore::new();
    let schedule_path = args.compstate.join("schedule.yaml");
    let mut schedule = store.load(&schedule_path)?;

    let delta = shift_matches(&mut schedule, args.focus, now_local())?;

    store.dump(&schedule_path, &schedule)?;
    std::fs::write(args.compstate.join(".update-pls"), "")
        .context("could not request a compstate update")?;

    info!(%delta, "shifted matches");
    println!("Shifted matches by {delta}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    const SCHEDULE: &str = "\
match_periods:
  league:
  - description: Friday
    start_time: 2022-04-01 10:00:00+01:00
    end_time: 2022-04-01 12:00:00+01:00
    max_end_time: 2022-04-01 12:15:00+01:00
  knockout:
  - description: Saturday
    start_time: 2022-04-02 14:00:00+01:00
    end_time: 2022-04-02 16:00:00+01:00
";

    #[test]
    fn shifts_all_periods_to_now() {
        let mut schedule: Value = serde_yaml::from_str(SCHEDULE).unwrap();
        let now = datetime!(2022-04-05 08:30:45 UTC);

        let delta = shift_matches(&mut schedule, Focus::League, now).unwrap();

        // 08:30:45Z is 09:30:45+01:00, rounded down and two minutes on
        assert_eq!(delta, Duration::days(4) - Duration::minutes(28));

        let league = &schedule["match_periods"]["league"][0];
        assert_eq!(league["start_time"].as_str(), Some("2022-04-05 09:32:00+01:00"));
        assert_eq!(league["end_time"].as_str(), Some("2022-04-05 11:32:00+01:00"));
        assert_eq!(league["max_end_time"].as_str(), Some("2022-04-05 11:47:00+01:00"));

        let knockout = &schedule["match_periods"]["knockout"][0];
        assert_eq!(knockout["start_time"].as_str(), Some("2022-04-06 13:32:00+01:00"));
        assert_eq!(knockout["description"].as_str(), Some("Saturday"));
    }

    #[test]
    fn missing_focus_is_an_error() {
        let mut schedule: Value =
            serde_yaml::from_str("match_periods:\n  league: []\n").unwrap();
        let now = datetime!(2022-04-05 08:30 UTC);
        assert!(shift_matches(&mut schedule, Focus::Knockout, now).is_err());
    }
}
