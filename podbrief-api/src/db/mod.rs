//! Persistence gateway for guests and briefs
//!
//! Schema creation lives in `podbrief_common::db`; this module only reads
//! and writes rows. Timestamps are stored as RFC 3339 text with microsecond
//! precision so they sort lexically and survive a round trip unchanged.
//! Rows written by older releases carry SQLite `CURRENT_TIMESTAMP` text
//! (`YYYY-MM-DD HH:MM:SS`, UTC) and are still readable.

pub mod briefs;
pub mod guests;

pub use briefs::{create_brief_with_guest, delete_brief, get_brief, insert_brief, list_briefs};
pub use guests::{get_guest, insert_guest};

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use podbrief_common::{Error, Result};

/// Current time at storage precision
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, LEGACY_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::CorruptRecord(format!("invalid timestamp '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let ts = now();
        assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_timestamps_sort_lexically() {
        let earlier = "2024-01-01T10:00:00.000000Z";
        let later = format_timestamp(&now());
        assert!(earlier < later.as_str());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_sqlite_current_timestamp_is_utc() {
        let ts = parse_timestamp("2024-05-01 10:00:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T10:00:00.000000Z");
    }
}
