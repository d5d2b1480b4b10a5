//! Ledger timestamp value object.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage format of the ledger `date` column.
pub const LEDGER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage format of a calendar day, as accepted by inventory queries.
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Local wall-clock time with second resolution.
///
/// Serialized as `YYYY-MM-DD HH:MM:SS`, which sorts lexically in time order
/// and is understood by SQLite's `date()` function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LedgerTimestamp(NaiveDateTime);

impl LedgerTimestamp {
    /// Create a timestamp, dropping sub-second precision.
    #[must_use]
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at.with_nanosecond(0).unwrap_or(at))
    }

    /// The current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Parse the storage format.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, LEDGER_TIMESTAMP_FORMAT).map(Self)
    }

    /// Get the inner date-time.
    #[must_use]
    pub const fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// The calendar day of this timestamp.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl fmt::Display for LedgerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LEDGER_TIMESTAMP_FORMAT))
    }
}

impl From<NaiveDateTime> for LedgerTimestamp {
    fn from(at: NaiveDateTime) -> Self {
        Self::new(at)
    }
}

impl TryFrom<String> for LedgerTimestamp {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LedgerTimestamp> for String {
    fn from(ts: LedgerTimestamp) -> Self {
        ts.to_string()
    }
}

/// Parse a calendar day in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns error if the string is not a valid date.
pub fn parse_ledger_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), LEDGER_DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_format_roundtrip() {
        let ts = LedgerTimestamp::parse("2026-01-19 12:30:05").unwrap();
        assert_eq!(ts.to_string(), "2026-01-19 12:30:05");
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
    }

    #[test]
    fn timestamp_parse_invalid() {
        assert!(LedgerTimestamp::parse("2026-01-19T12:30:05Z").is_err());
        assert!(LedgerTimestamp::parse("not-a-date").is_err());
    }

    #[test]
    fn timestamp_drops_subseconds() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 19)
            .unwrap()
            .and_hms_milli_opt(8, 0, 1, 750)
            .unwrap();
        assert_eq!(LedgerTimestamp::new(at).to_string(), "2026-01-19 08:00:01");
    }

    #[test]
    fn timestamp_ordering_matches_string_ordering() {
        let a = LedgerTimestamp::parse("2026-01-19 09:00:00").unwrap();
        let b = LedgerTimestamp::parse("2026-01-19 10:00:00").unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(LedgerTimestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn parse_ledger_date_accepts_calendar_days() {
        assert_eq!(
            parse_ledger_date("2026-10-19").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert!(parse_ledger_date("2026-13-01").is_err());
    }
}
