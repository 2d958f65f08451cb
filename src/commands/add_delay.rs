//! Add a delay to the competition state.

use std::{path::PathBuf, sync::LazyLock};

use anyhow::{bail, Context};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use time::{format_description, Duration, OffsetDateTime, PrimitiveDateTime, Time};
use tracing::{info, instrument};

use crate::{
    configuration::Configuration,
    timestamp::{format_timestamp, now_local, parse_timestamp},
    yaml_round_trip::YamlStore,
};

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?P<hours>\d+?)hr)?((?P<minutes>\d+?)m)?((?P<seconds>\d+?)s)?$")
        .expect("duration pattern is valid")
});
static AGO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^ ]+)\s*ago$").expect("ago pattern is valid"));
static IN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^in\s*([^ ]+)$").expect("in pattern is valid"));

const TIME_FORMATS: [&str; 2] = ["[hour]:[minute]:[second]", "[hour]:[minute]"];
const DATETIME_FORMATS: [&str; 2] = [
    "[year]-[month]-[day] [hour]:[minute]:[second]",
    "[year]-[month]-[day] [hour]:[minute]",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unable to parse duration string '{0}'.")]
pub struct BadDuration(pub String);

/// Parses `1hr2m3s` style durations (each part optional) or a plain number
/// of seconds.
pub fn parse_duration(text: &str) -> Result<Duration, BadDuration> {
    let bad = || BadDuration(text.to_string());

    let Some(parts) = DURATION_PATTERN.captures(text) else {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let seconds: i64 = text.parse().map_err(|_| bad())?;
        return Ok(Duration::seconds(seconds));
    };

    let part = |name: &str| -> Result<i64, BadDuration> {
        match parts.name(name) {
            Some(value) => value.as_str().parse().map_err(|_| bad()),
            None => Ok(0),
        }
    };

    let (hours, minutes, seconds) = (part("hours")?, part("minutes")?, part("seconds")?);
    hours
        .checked_mul(3600)
        .zip(minutes.checked_mul(60))
        .and_then(|(hours, minutes)| hours.checked_add(minutes)?.checked_add(seconds))
        .map(Duration::seconds)
        .ok_or_else(bad)
}

fn parse_absolute(text: &str, now: OffsetDateTime) -> Option<OffsetDateTime> {
    if let Ok(when) = parse_timestamp(text) {
        return Some(when);
    }
    for format in DATETIME_FORMATS {
        let format = format_description::parse(format).ok()?;
        if let Ok(when) = PrimitiveDateTime::parse(text, &format) {
            return Some(when.assume_offset(now.offset()));
        }
    }
    for format in TIME_FORMATS {
        let format = format_description::parse(format).ok()?;
        if let Ok(when) = Time::parse(text, &format) {
            return Some(now.replace_time(when));
        }
    }
    None
}

/// Works out when something happens from a human description of it.
///
/// Understands `now`, `in 5m`, `5m ago`, times of day (today) and full
/// dates with times. Times without an offset take the offset of `now`.
pub fn parse_datetime(text: &str, now: OffsetDateTime) -> anyhow::Result<OffsetDateTime> {
    let relative = if let Some(caps) = AGO_PATTERN.captures(text) {
        parse_duration(&caps[1])
            .ok()
            .and_then(|offset| now.checked_sub(offset))
    } else if let Some(caps) = IN_PATTERN.captures(text) {
        parse_duration(&caps[1])
            .ok()
            .and_then(|offset| now.checked_add(offset))
    } else if text == "now" {
        Some(now)
    } else {
        None
    };

    let Some(when) = relative.or_else(|| parse_absolute(text, now)) else {
        bail!("Unable to parse date string: {text:?}");
    };
    Ok(when.replace_nanosecond(0)?)
}

/// Appends a delay to a schedule document, creating the list if needed.
pub fn add_delay(
    schedule: &mut Value,
    delay_seconds: u64,
    when: OffsetDateTime,
) -> anyhow::Result<()> {
    let schedule = schedule
        .as_mapping_mut()
        .context("schedule is not a mapping")?;

    if schedule.get("delays").map_or(true, Value::is_null) {
        schedule.insert(Value::from("delays"), Value::Sequence(vec![]));
    }
    let Some(Value::Sequence(delays)) = schedule.get_mut("delays") else {
        bail!("'delays' in schedule is not a list");
    };

    let mut new_delay = Mapping::new();
    new_delay.insert(Value::from("delay"), Value::Number(delay_seconds.into()));
    new_delay.insert(Value::from("time"), Value::from(format_timestamp(when)?));
    delays.push(Value::Mapping(new_delay));
    Ok(())
}

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Competition state repository
    pub compstate: PathBuf,
    /// How long to delay the competition for. Specify either as a number of
    /// seconds or as a string of the form 1m30s.
    pub how_long: String,
    /// When the delay should occur, e.g. `now`, `in 5m`, `5m ago`, `14:30`
    /// or `2024-04-13 14:30`. Times are assumed to be in the local timezone.
    #[arg(default_value = "now")]
    pub when: String,
}

#[instrument(skip(_config))]
pub fn run(args: Args, _config: Configuration) -> anyhow::Result<()> {
    let store = YamlStore::new();
    let schedule_path = args.compstate.join("schedule.yaml");
    let mut schedule = store.load(&schedule_path)?;

    let how_long = parse_duration(&args.how_long)?;
    let when = parse_datetime(&args.when, now_local())?;
    let seconds = u64::try_from(how_long.whole_seconds())
        .with_context(|| format!("negative delay {how_long}"))?;

    add_delay(&mut schedule, seconds, when)?;
    store.dump(&schedule_path, &schedule)?;

    info!(seconds, %when, "added delay");
    println!("Added a delay of {how_long} at {}", format_timestamp(when)?);
    Ok(())
}
