//! Permissive date and datetime parsing.
//!
//! Accepts ISO 8601 and RFC 3339 (with offsets), slash, dot and month-name
//! layouts, compact `YYYYMMDD`, and the partial forms `YYYY-MM` and `YYYY`
//! (which resolve to the first day of the period). Ambiguous slash dates are
//! read month-first (`01/02/2024` is January 2).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use tabmap_model::FieldValue;

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S", // US
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S", // European
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%m/%d/%Y",  // US: 01/15/2024
    "%d/%m/%Y",  // European: 15/01/2024
    "%d.%m.%Y",  // German: 15.01.2024
    "%Y%m%d",    // Compact: 20240115
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y-%b-%d",  // 2024-Jan-15
    "%d-%m-%Y",  // 15-01-2024
];

/// Month-year layouts, parsed by appending a day.
const MONTH_YEAR_FORMATS: &[&str] = &["%Y-%m", "%b %Y", "%B %Y", "%m/%Y"];

/// A parsed timestamp, keeping the offset when one was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Calendar date as written (local to the offset, if any).
    pub fn date(&self) -> NaiveDate {
        match self {
            Timestamp::Naive(dt) => dt.date(),
            Timestamp::Offset(dt) => dt.date_naive(),
        }
    }

    pub fn into_field_value(self) -> FieldValue {
        match self {
            Timestamp::Naive(dt) => FieldValue::DateTime(dt),
            Timestamp::Offset(dt) => FieldValue::DateTimeOffset(dt),
        }
    }
}

/// Parse a date, ignoring any time part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_date(trimmed)
        .or_else(|| try_parse_partial(trimmed))
        .or_else(|| try_parse_timestamp(trimmed).map(|ts| ts.date()))
}

/// Parse a datetime; date-only input resolves to midnight.
pub fn parse_datetime(value: &str) -> Option<Timestamp> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_timestamp(trimmed).or_else(|| {
        try_parse_date(trimmed)
            .or_else(|| try_parse_partial(trimmed))
            .map(|date| Timestamp::Naive(date.and_time(NaiveTime::MIN)))
    })
}

fn try_parse_timestamp(value: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(Timestamp::Offset(dt));
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(Timestamp::Offset(dt));
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(Timestamp::Naive(dt));
        }
    }
    None
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// `YYYY-MM`, month-year and `YYYY` forms, as the first day of the period.
fn try_parse_partial(value: &str) -> Option<NaiveDate> {
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        let year = value.parse::<i32>().ok()?;
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
        return None;
    }
    let padded = format!("{value} 01");
    MONTH_YEAR_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&padded, &format!("{fmt} %d")).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_various_date_formats() {
        assert_eq!(parse_date("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024/01/15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("15-Jan-2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("01/15/2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("15/01/2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("15.01.2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("20240115"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("January 15, 2024"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_month_first_for_ambiguous_slash_dates() {
        assert_eq!(parse_date("01/02/2024"), Some(date(2024, 1, 2)));
    }

    #[test]
    fn test_partial_dates_use_first_day() {
        assert_eq!(parse_date("2024-03"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("2024"), Some(date(2024, 1, 1)));
        assert_eq!(parse_date("Mar 2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_date("0042"), None);
    }

    #[test]
    fn test_date_from_datetime_input() {
        assert_eq!(parse_date("2024-01-15T10:30:00"), Some(date(2024, 1, 15)));
        assert_eq!(
            parse_date("2024-01-15T23:30:00-05:00"),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_datetime_keeps_offset() {
        let parsed = parse_datetime("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(
            parsed.into_field_value().canonical(),
            "2024-01-15T10:30:00+02:00"
        );
        let utc = parse_datetime("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(utc.into_field_value().canonical(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_parse_datetime_naive_and_date_only() {
        let naive = parse_datetime("2024-01-15 10:30").unwrap();
        assert_eq!(naive.into_field_value().canonical(), "2024-01-15T10:30:00");
        let midnight = parse_datetime("15.01.2024").unwrap();
        assert_eq!(midnight.into_field_value().canonical(), "2024-01-15T00:00:00");
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_datetime("31/31/2024"), None);
        assert_eq!(parse_datetime(""), None);
    }
}
