//! Serde helpers for the date and time formats the parish API speaks.
//!
//! The API writes dates as `YYYY-MM-DD` and times as whatever its database
//! layer stringifies (`HH:MM:SS`, sometimes `HH:MM`, occasionally with
//! fractional seconds). Records accept all of these and always write back
//! `YYYY-MM-DD` / `HH:MM`, which is what the API expects on create/update.

use chrono::{NaiveDate, NaiveTime};

/// Date format written to the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format written to the API.
pub const TIME_FORMAT: &str = "%H:%M";

const TIME_INPUT_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Parse a calendar date, tolerating a trailing time component.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// Parse a time of day in any of the accepted layouts.
#[must_use]
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// `#[serde(with = "wire::date")]` for `NaiveDate` fields.
pub mod date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Serialize as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::DATE_FORMAT))
    }

    /// Deserialize leniently.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string holding a date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
    }
}

/// `#[serde(with = "wire::time")]` for `NaiveTime` fields.
pub mod time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Serialize as `HH:MM`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::TIME_FORMAT))
    }

    /// Deserialize leniently.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string holding a time of day.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).ok_or_else(|| D::Error::custom(format!("invalid time: {raw}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Slot {
        #[serde(with = "date")]
        data: NaiveDate,
        #[serde(with = "time")]
        horario: NaiveTime,
    }

    #[test]
    fn test_accepts_database_time_layouts() {
        for raw in ["19:30:00", "19:30", "19:30:00.000000"] {
            assert_eq!(
                parse_time(raw),
                NaiveTime::from_hms_opt(19, 30, 0),
                "layout {raw}"
            );
        }
        assert!(parse_time("7 da noite").is_none());
    }

    #[test]
    fn test_date_ignores_time_suffix() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 24);
        assert_eq!(parse_date("2025-12-24"), expected);
        assert_eq!(parse_date("2025-12-24T10:00:00"), expected);
        assert_eq!(parse_date("2025-12-24 10:00:00"), expected);
        assert!(parse_date("24/12/2025").is_none());
    }

    #[test]
    fn test_writes_api_layout() {
        let slot: Slot =
            serde_json::from_str(r#"{"data":"2025-12-24","horario":"23:59:00"}"#).unwrap();
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["data"], "2025-12-24");
        assert_eq!(json["horario"], "23:59");
    }
}
