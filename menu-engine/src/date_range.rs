//! Date-range resolution for sales queries.
//!
//! Turns the raw `startDate` / `endDate` request parameters into a
//! [`DateRange`]. No parameters means "latest snapshot"; either parameter
//! opens an aggregation window whose missing side is unbounded.

use chrono::{DateTime, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::types::DateRange;

pub const START_DATE_PARAM: &str = "startDate";
pub const END_DATE_PARAM: &str = "endDate";

/// Resolve optional date parameters into a validated range.
///
/// Empty or whitespace-only parameters count as absent. Accepts
/// `YYYY-MM-DD` or a full RFC 3339 timestamp (its calendar date is used).
pub fn resolve_date_range(
    start_param: Option<&str>,
    end_param: Option<&str>,
) -> EngineResult<DateRange> {
    let start = parse_date_param(START_DATE_PARAM, start_param)?;
    let end = parse_date_param(END_DATE_PARAM, end_param)?;

    match (start, end) {
        (None, None) => Ok(DateRange::LatestSnapshot),
        (Some(s), Some(e)) if s > e => Err(EngineError::InvalidRange { start: s, end: e }),
        (start, end) => Ok(DateRange::Window { start, end }),
    }
}

fn parse_date_param(
    param: &'static str,
    raw: Option<&str>,
) -> EngineResult<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| EngineError::InvalidDate {
            param,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_params_is_latest_snapshot() {
        assert_eq!(resolve_date_range(None, None).unwrap(), DateRange::LatestSnapshot);
    }

    #[test]
    fn blank_params_count_as_absent() {
        assert_eq!(
            resolve_date_range(Some(""), Some("   ")).unwrap(),
            DateRange::LatestSnapshot
        );
    }

    #[test]
    fn both_bounds_parse() {
        let range = resolve_date_range(Some("2025-01-01"), Some("2025-01-31")).unwrap();
        assert_eq!(
            range,
            DateRange::Window {
                start: Some(date(2025, 1, 1)),
                end: Some(date(2025, 1, 31)),
            }
        );
    }

    #[test]
    fn single_bound_leaves_other_side_open() {
        assert_eq!(
            resolve_date_range(Some("2025-02-01"), None).unwrap(),
            DateRange::Window {
                start: Some(date(2025, 2, 1)),
                end: None,
            }
        );
        assert_eq!(
            resolve_date_range(None, Some("2025-02-01")).unwrap(),
            DateRange::Window {
                start: None,
                end: Some(date(2025, 2, 1)),
            }
        );
    }

    #[test]
    fn same_day_range_is_valid() {
        let range = resolve_date_range(Some("2025-03-03"), Some("2025-03-03")).unwrap();
        assert!(range.contains(date(2025, 3, 3)));
    }

    #[test]
    fn rfc3339_timestamps_use_calendar_date() {
        let range =
            resolve_date_range(Some("2025-01-01T00:00:00Z"), Some("2025-01-15T23:59:59+10:00"))
                .unwrap();
        assert_eq!(
            range,
            DateRange::Window {
                start: Some(date(2025, 1, 1)),
                end: Some(date(2025, 1, 15)),
            }
        );
    }

    #[test]
    fn unparsable_start_names_start_param() {
        let err = resolve_date_range(Some("last tuesday"), None).unwrap_err();
        match err {
            EngineError::InvalidDate { param, value } => {
                assert_eq!(param, START_DATE_PARAM);
                assert_eq!(value, "last tuesday");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let err = resolve_date_range(None, Some("2025-02-30")).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidDate { param: END_DATE_PARAM, .. }
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = resolve_date_range(Some("2025-02-01"), Some("2025-01-01")).unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, EngineError::InvalidRange { .. }));
    }
}
