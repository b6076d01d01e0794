use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Body for endpoints that only acknowledge an action
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: &str) -> Message {
        Message {
            message: message.to_string(),
        }
    }
}

/// Time of day on the wire.
///
/// Serialized as `HH:MM:SS`, accepts both `HH:MM` and `HH:MM:SS`.
pub mod time_of_day {
    use super::*;

    const FORMAT: &str = "%H:%M:%S";
    const SHORT_FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, SHORT_FORMAT))
            .map_err(|_| {
                format!(
                    "Time has wrong format. Use one of these formats instead: hh:mm[:ss], got '{}'",
                    raw
                )
            })
    }
}
