//! Query modules, one per table family.

pub mod article_ops;
pub mod dead_letter;
pub mod embedding_ops;
pub mod issue_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use newsflow_core::errors::NewsflowResult;

use crate::to_storage_err;

/// Timestamps are stored as fixed-width RFC 3339 UTC strings so that string
/// comparison inside SQL orders them correctly.
pub(crate) fn ts_to_sql(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn ts_from_sql(s: &str) -> NewsflowResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_round_trip() {
        let t = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(ts_from_sql(&ts_to_sql(t)).unwrap(), t);
    }

    #[test]
    fn encoded_timestamps_order_lexicographically() {
        let early = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        let late = early + chrono::Duration::milliseconds(1);
        assert!(ts_to_sql(early) < ts_to_sql(late));
    }
}
