use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use super::availability::QueryWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Kennel,
    Suite,
    GroomingSlot,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Kennel => "kennel",
            ResourceType::Suite => "suite",
            ResourceType::GroomingSlot => "grooming_slot",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "kennel" => Some(ResourceType::Kennel),
            "suite" => Some(ResourceType::Suite),
            "grooming_slot" => Some(ResourceType::GroomingSlot),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable physical unit (kennel, suite, grooming slot) tracked
/// independently for occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingResource {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub resource_type: ResourceType,
    pub capacity: i64,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl BoardingResource {
    pub fn new(tenant_id: String, name: String, resource_type: ResourceType, capacity: i64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id,
            name,
            resource_type,
            capacity,
            active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A bookable service (e.g. standard boarding, luxury suite stay) with
/// per-night pricing. Friday and Saturday nights bill at the weekend rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub resource_type: ResourceType,
    pub base_rate_cents: i64,
    pub weekend_rate_cents: i64,
}

impl ServiceOffering {
    /// Price a stay over `window` for `number_of_pets` pets, in cents.
    /// Each calendar night from the start date up to (not including) the end
    /// date is billed at its nightly rate; same-day stays bill a single day
    /// (`QueryWindow::nights` floors at one).
    pub fn quote(&self, window: &QueryWindow, number_of_pets: i64) -> i64 {
        let start = window.start.date_naive();
        let mut total = 0i64;
        let mut night = start;
        for _ in 0..window.nights() {
            let rate = match night.weekday() {
                Weekday::Fri | Weekday::Sat => self.weekend_rate_cents,
                _ => self.base_rate_cents,
            };
            total += rate;
            night = night.succ_opt().expect("date overflow");
        }
        total * number_of_pets.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::availability::QueryWindow;

    fn offering() -> ServiceOffering {
        ServiceOffering {
            id: "svc-1".to_string(),
            tenant_id: "t1".to_string(),
            name: "Standard Boarding".to_string(),
            resource_type: ResourceType::Kennel,
            base_rate_cents: 4000,
            weekend_rate_cents: 5500,
        }
    }

    #[test]
    fn test_quote_weekday_nights() {
        // Mon 2025-10-06 .. Thu 2025-10-09: three weekday nights.
        let window =
            QueryWindow::resolve(None, Some("2025-10-06"), Some("2025-10-09")).unwrap();
        assert_eq!(offering().quote(&window, 1), 3 * 4000);
    }

    #[test]
    fn test_quote_weekend_nights_cost_more() {
        // Fri 2025-10-10 .. Sun 2025-10-12: Friday + Saturday nights.
        let window =
            QueryWindow::resolve(None, Some("2025-10-10"), Some("2025-10-12")).unwrap();
        assert_eq!(offering().quote(&window, 1), 2 * 5500);
    }

    #[test]
    fn test_quote_same_day_bills_one_base_day() {
        let window = QueryWindow::resolve(Some("2025-10-06"), None, None).unwrap();
        assert_eq!(offering().quote(&window, 1), 4000);
    }

    #[test]
    fn test_quote_scales_with_pets() {
        let window =
            QueryWindow::resolve(None, Some("2025-10-06"), Some("2025-10-08")).unwrap();
        assert_eq!(offering().quote(&window, 3), 3 * 2 * 4000);
    }
}
