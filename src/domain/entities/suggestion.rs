use serde::{Deserialize, Serialize};

/// A candidate alternative date range offered when the requested range is
/// unavailable. Ranked by calendar distance from the requested start, then
/// by price; the first-ranked entry carries `best_match` for UI emphasis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeDateSuggestion {
    pub start_date: String,
    pub end_date: String,
    pub available_count: i64,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<i64>,
    pub reason: String,
    pub best_match: bool,
}
