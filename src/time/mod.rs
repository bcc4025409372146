//! Local date-time text helpers.
//!
//! Text uses the `YYYY-MM-DD hh:mm:ss` layout and is interpreted in the
//! local time zone in both directions.

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};
use thiserror::Error;

/// The layout shared by every function here.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("cannot parse '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("'{0}' does not name a single local time")]
    Ambiguous(String),
}

/// How much of a date-time to keep when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    #[default]
    Second,
}

impl Precision {
    /// `1` = year … `5` = minute; anything else is seconds.
    pub fn from_level(level: i32) -> Self {
        match level {
            1 => Self::Year,
            2 => Self::Month,
            3 => Self::Day,
            4 => Self::Hour,
            5 => Self::Minute,
            _ => Self::Second,
        }
    }

    fn layout(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%Y-%m",
            Self::Day => "%Y-%m-%d",
            Self::Hour => "%Y-%m-%d %H",
            Self::Minute => "%Y-%m-%d %H:%M",
            Self::Second => DATETIME_FORMAT,
        }
    }
}

/// Reformat `input` at `precision`. Empty or unparsable input uses the
/// current local time.
pub fn format_at(input: &str, precision: Precision) -> String {
    let when = NaiveDateTime::parse_from_str(input, DATETIME_FORMAT)
        .unwrap_or_else(|_| Local::now().naive_local());
    when.format(precision.layout()).to_string()
}

/// Unix timestamp (seconds, or milliseconds when `millis`) as local text.
/// Non-positive or out-of-range timestamps give an empty string.
pub fn timestamp_to_string(ts: i64, millis: bool) -> String {
    if ts <= 0 {
        return String::new();
    }
    let utc = if millis {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    };
    utc.map(|t| t.with_timezone(&Local).format(DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse local text into a Unix timestamp.
pub fn string_to_timestamp(text: &str, millis: bool) -> Result<i64, TimeError> {
    let naive = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).map_err(|source| {
        TimeError::Parse {
            input: text.to_string(),
            source,
        }
    })?;
    let local = match Local.from_local_datetime(&naive) {
        LocalResult::Single(t) => t,
        _ => return Err(TimeError::Ambiguous(text.to_string())),
    };
    Ok(if millis {
        local.timestamp_millis()
    } else {
        local.timestamp()
    })
}

/// Current Unix time.
pub fn now_timestamp(millis: bool) -> i64 {
    let now = Local::now();
    if millis {
        now.timestamp_millis()
    } else {
        now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_precision() {
        let input = "2025-01-02 15:04:05";
        assert_eq!(format_at(input, Precision::Year), "2025");
        assert_eq!(format_at(input, Precision::Month), "2025-01");
        assert_eq!(format_at(input, Precision::Day), "2025-01-02");
        assert_eq!(format_at(input, Precision::Hour), "2025-01-02 15");
        assert_eq!(format_at(input, Precision::Minute), "2025-01-02 15:04");
        assert_eq!(format_at(input, Precision::Second), input);
    }

    #[test]
    fn bad_input_formats_now() {
        let formatted = format_at("", Precision::Second);
        assert!(NaiveDateTime::parse_from_str(&formatted, DATETIME_FORMAT).is_ok());
    }

    #[test]
    fn level_mapping() {
        assert_eq!(Precision::from_level(1), Precision::Year);
        assert_eq!(Precision::from_level(5), Precision::Minute);
        assert_eq!(Precision::from_level(0), Precision::Second);
        assert_eq!(Precision::from_level(42), Precision::Second);
    }

    #[test]
    fn timestamps_round_trip_through_text() {
        let ts = 1_700_000_000;
        let text = timestamp_to_string(ts, false);
        assert_eq!(string_to_timestamp(&text, false).unwrap(), ts);

        let ms_text = timestamp_to_string(ts * 1000 + 999, true);
        assert_eq!(ms_text, text);
        assert_eq!(string_to_timestamp(&text, true).unwrap(), ts * 1000);
    }

    #[test]
    fn non_positive_timestamp_is_empty() {
        assert_eq!(timestamp_to_string(0, false), "");
        assert_eq!(timestamp_to_string(-5, true), "");
    }

    #[test]
    fn unparsable_text_is_an_error() {
        assert!(matches!(
            string_to_timestamp("yesterday", false),
            Err(TimeError::Parse { .. })
        ));
    }
}
