use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::reservation::ReservationSummary;

/// Fixed-width UTC timestamp format used for every stored or bound
/// `start_date`/`end_date` value. All instants render to the same width and
/// offset ("2025-10-01T00:00:00.000Z"), so lexicographic comparison in SQL
/// agrees with instant ordering.
pub fn fmt_ts(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp from caller input: RFC 3339, or a bare `YYYY-MM-DD`
/// taken as midnight UTC of that day.
pub fn parse_ts(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// The closed `[start, end]` interval a query is evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    /// Resolve a caller-supplied query into a window. Exactly one form is
    /// accepted: a single `date` (expanded to the full calendar day in UTC,
    /// `[00:00:00.000, 23:59:59.999]`) or both `start_date` and `end_date`
    /// used verbatim.
    pub fn resolve(
        date: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ApiResult<Self> {
        match (date, start_date, end_date) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ApiError::BadRequest(
                "Provide either date or startDate/endDate, not both".to_string(),
            )),
            (Some(day), None, None) => {
                let parsed = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| {
                    ApiError::BadRequest(format!("Invalid date: {} (expected YYYY-MM-DD)", day))
                })?;
                let start = Utc.from_utc_datetime(&parsed.and_hms_opt(0, 0, 0).unwrap());
                let end =
                    Utc.from_utc_datetime(&parsed.and_hms_milli_opt(23, 59, 59, 999).unwrap());
                Ok(Self { start, end })
            }
            (None, Some(s), Some(e)) => {
                let start = parse_ts(s)
                    .ok_or_else(|| ApiError::BadRequest(format!("Invalid startDate: {}", s)))?;
                let end = parse_ts(e)
                    .ok_or_else(|| ApiError::BadRequest(format!("Invalid endDate: {}", e)))?;
                if start > end {
                    return Err(ApiError::BadRequest(
                        "startDate must not be after endDate".to_string(),
                    ));
                }
                Ok(Self { start, end })
            }
            (None, Some(_), None) | (None, None, Some(_)) => Err(ApiError::BadRequest(
                "Both startDate and endDate are required for a range query".to_string(),
            )),
            (None, None, None) => Err(ApiError::BadRequest(
                "Either date or startDate/endDate must be provided".to_string(),
            )),
        }
    }

    /// Closed-interval overlap: a reservation ending exactly when the window
    /// begins still conflicts. Inclusive boundaries are deliberate for
    /// physical-resource scheduling; do not "fix" this to a strict
    /// comparison without changing the booking semantics.
    pub fn overlaps(&self, other_start: DateTime<Utc>, other_end: DateTime<Utc>) -> bool {
        self.start <= other_end && self.end >= other_start
    }

    pub fn start_str(&self) -> String {
        fmt_ts(self.start)
    }

    pub fn end_str(&self) -> String {
        fmt_ts(self.end)
    }

    /// Number of calendar nights spanned, minimum one (same-day stays are
    /// charged as a single day).
    pub fn nights(&self) -> i64 {
        (self.end.date_naive() - self.start.date_naive()).num_days().max(1)
    }
}

/// Result of a single-resource availability check.
///
/// `degraded` marks the store-failure fallback: the store could not be
/// queried, and the resource is reported available with no known conflicts
/// rather than failing the caller's workflow. Degraded results are logged
/// and counted so they are distinguishable from genuine availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub resource_id: String,
    pub check_start_date: String,
    pub check_end_date: String,
    pub is_available: bool,
    pub occupying_reservations: Vec<ReservationSummary>,
    pub degraded: bool,
}

/// Per-resource entry of a batch check; the window and degraded flag live on
/// [`BatchAvailabilityResult`] since they are shared by the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAvailability {
    pub resource_id: String,
    pub is_available: bool,
    pub occupying_reservations: Vec<ReservationSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAvailabilityResult {
    pub check_start_date: String,
    pub check_end_date: String,
    pub degraded: bool,
    pub resources: Vec<ResourceAvailability>,
}
