//! Lenient timestamp (de)serialization for service payloads.
//!
//! The service echoes timezone-aware values as RFC 3339 but stamps server-side values
//! (`created_at`, `next_dca_date`) with naive local ISO-8601 strings. Naive values are taken as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

pub(crate) fn parse_lenient(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|err| format!("invalid timestamp `{raw}`: {err}"))
}

fn format_utc(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) mod utc {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_utc(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_lenient(&raw).map_err(de::Error::custom)
    }
}

pub(crate) mod utc_option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&format_utc(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_lenient(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_rfc3339_with_offset_into_utc() {
        let parsed = parse_lenient("2025-02-01T10:30:00+02:00").unwrap();
        assert_eq!(parsed.hour(), 8);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn parses_naive_python_isoformat_as_utc() {
        let parsed = parse_lenient("2025-03-04T05:06:07.123456").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2025, 3, 4));
        assert_eq!(parsed.second(), 7);
        assert_eq!(parsed.timestamp_subsec_micros(), 123_456);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_lenient("next tuesday").is_err());
    }
}
