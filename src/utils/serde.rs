//! 後端時間欄位有時帶時區 (RFC 3339)，有時是 naive ISO-8601，兩種都接受。

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

pub fn deserialize_flexible_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_datetime(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime: {}", value)))
}

pub fn deserialize_option_flexible_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_flexible_datetime")] NaiveDateTime);

    let value: Option<Wrapper> = Option::deserialize(deserializer)?;
    Ok(value.map(|Wrapper(dt)| dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[derive(Deserialize)]
    struct Stamp {
        #[serde(deserialize_with = "deserialize_flexible_datetime")]
        at: NaiveDateTime,
    }

    #[derive(Deserialize)]
    struct MaybeStamp {
        #[serde(default, deserialize_with = "deserialize_option_flexible_datetime")]
        at: Option<NaiveDateTime>,
    }

    #[test]
    fn test_accepts_rfc3339_with_offset() {
        let stamp: Stamp = serde_json::from_str(r#"{"at": "2024-01-15T10:30:00+01:00"}"#).unwrap();
        assert_eq!(stamp.at.hour(), 9);
        assert_eq!(stamp.at.day(), 15);
    }

    #[test]
    fn test_accepts_naive_timestamp_with_fraction() {
        let stamp: Stamp =
            serde_json::from_str(r#"{"at": "2024-01-15T10:30:00.123456"}"#).unwrap();
        assert_eq!(stamp.at.hour(), 10);
        assert_eq!(stamp.at.minute(), 30);
    }

    #[test]
    fn test_rejects_garbage() {
        let result: Result<Stamp, _> = serde_json::from_str(r#"{"at": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_null_and_missing() {
        let stamp: MaybeStamp = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(stamp.at.is_none());
        let stamp: MaybeStamp = serde_json::from_str(r#"{}"#).unwrap();
        assert!(stamp.at.is_none());
    }
}
