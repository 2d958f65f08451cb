//! Timestamps as they are written in compstate YAML files.

use anyhow::Context;
use time::{
    format_description::{self, well_known::Rfc3339},
    OffsetDateTime,
};

const TIMESTAMP_FORMAT: &str =
    "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]";

/// The current local time, falling back to UTC when the offset is unknown.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Parses `2022-04-01 12:04:12+01:00` (or the RFC 3339 spelling of it).
pub fn parse_timestamp(text: &str) -> anyhow::Result<OffsetDateTime> {
    let format = format_description::parse(TIMESTAMP_FORMAT)?;
    OffsetDateTime::parse(text, &format)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339))
        .with_context(|| format!("invalid timestamp '{text}'"))
}

pub fn format_timestamp(when: OffsetDateTime) -> anyhow::Result<String> {
    let format = format_description::parse(TIMESTAMP_FORMAT)?;
    Ok(when.format(&format)?)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn keeps_offset() {
        let when = parse_timestamp("2022-04-01 12:04:12+01:00").unwrap();
        assert_eq!(when, datetime!(2022-04-01 12:04:12 +01:00));
        assert_eq!(when.offset().whole_hours(), 1);
        assert_eq!(format_timestamp(when).unwrap(), "2022-04-01 12:04:12+01:00");
    }

    #[test]
    fn accepts_rfc3339() {
        let when = parse_timestamp("2022-04-01T12:04:12Z").unwrap();
        assert_eq!(when, datetime!(2022-04-01 12:04:12 UTC));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
