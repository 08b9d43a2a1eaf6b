//! Serde adapters for the optional date and time fields of stored records.
//!
//! Stored documents use `YYYY-MM-DD` dates and `HH:MM` times. Form input
//! historically wrote empty strings for unset fields, so `""` reads back as
//! `None`.

/// `Option<NaiveDate>` as `YYYY-MM-DD`.
pub mod opt_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::core::datetime::normalize_local_date;

    /// Serialize as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from `YYYY-MM-DD`, `""` or `null`.
    ///
    /// # Errors
    ///
    /// Fails on a non-empty string that is not a valid calendar date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => normalize_local_date(s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date '{s}', expected YYYY-MM-DD"))),
        }
    }
}

/// `Option<NaiveTime>` as `HH:MM`.
pub mod opt_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::core::datetime::parse_time_of_day;

    /// Serialize as `HH:MM`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from `HH:MM`, `""` or `null`.
    ///
    /// # Errors
    ///
    /// Fails on a non-empty string that is not a valid time of day.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_time_of_day(s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid time '{s}', expected HH:MM"))),
        }
    }
}

/// `Option<DateTime<Utc>>` as RFC 3339, with `""` read as `None`.
pub mod opt_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as RFC 3339 with millisecond precision.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from RFC 3339, `""` or `null`.
    ///
    /// # Errors
    ///
    /// Fails on a non-empty string that is not an RFC 3339 timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{s}': {e}"))),
        }
    }
}
