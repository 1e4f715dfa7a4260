//! Typed cell values and timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed cell values — source data arrives as text but type info is preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Extract as string slice, returning None for non-text values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract as f64, returning None for non-numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as timestamp. Text values go through [`parse_timestamp`].
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            FieldValue::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Binary truthiness for ground-truth labels: nonzero numbers, `true`,
    /// and the strings "1"/"true" (case-insensitive) count as positive.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n != 0.0,
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => s == "1" || s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            // Integral numbers print without a trailing ".0" so numeric ids
            // round-trip to their source text.
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

// ── Timestamp parsing ───────────────────────────────────────────────

/// Datetime formats seen in ledger exports, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a timestamp string. Naive datetimes are taken as UTC; date-only
/// strings parse as midnight UTC. Returns None for anything unrecognized.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&midnight));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ledger_export_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 9, 1, 9, 25, 0).unwrap();
        assert_eq!(parse_timestamp("2023/09/01 09:25"), Some(expected));
        assert_eq!(parse_timestamp("2023-09-01 09:25:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-09-01T09:25:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-09-01T09:25:00Z"), Some(expected));
    }

    #[test]
    fn parses_date_only_as_midnight() {
        let expected = Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2023-09-01"), Some(expected));
        assert_eq!(parse_timestamp("2023/09/01"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp("2023-13-40 99:99"), None);
    }

    #[test]
    fn as_timestamp_reads_text_and_typed_values() {
        let ts = Utc.with_ymd_and_hms(2023, 9, 1, 8, 0, 0).unwrap();
        assert_eq!(FieldValue::Timestamp(ts).as_timestamp(), Some(ts));
        assert_eq!(
            FieldValue::from("2023/09/01 08:00").as_timestamp(),
            Some(ts)
        );
        assert_eq!(FieldValue::Number(42.0).as_timestamp(), None);
        assert_eq!(FieldValue::Null.as_timestamp(), None);
    }

    #[test]
    fn truthiness_covers_label_encodings() {
        assert!(FieldValue::Number(1.0).is_truthy());
        assert!(FieldValue::Bool(true).is_truthy());
        assert!(FieldValue::from("1").is_truthy());
        assert!(FieldValue::from("TRUE").is_truthy());

        assert!(!FieldValue::Number(0.0).is_truthy());
        assert!(!FieldValue::Bool(false).is_truthy());
        assert!(!FieldValue::from("0").is_truthy());
        assert!(!FieldValue::from("yes").is_truthy());
        assert!(!FieldValue::Null.is_truthy());
    }

    #[test]
    fn display_keeps_integral_numbers_clean() {
        assert_eq!(FieldValue::Number(9500.0).to_string(), "9500");
        assert_eq!(FieldValue::Number(310.75).to_string(), "310.75");
        assert_eq!(FieldValue::from("ACC-100").to_string(), "ACC-100");
        assert_eq!(FieldValue::Null.to_string(), "");
    }
}
