use serde::{Deserialize, Serialize};

/// Waitlist entry lifecycle:
/// `waiting → notified → { converted | expired }`, with `cancelled`
/// reachable from `waiting` or `notified`. When an entry expires, the next
/// entry in priority order is promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    Waiting,
    Notified,
    Expired,
    Converted,
    Cancelled,
}

impl WaitlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitlistStatus::Waiting => "waiting",
            WaitlistStatus::Notified => "notified",
            WaitlistStatus::Expired => "expired",
            WaitlistStatus::Converted => "converted",
            WaitlistStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(WaitlistStatus::Waiting),
            "notified" => Some(WaitlistStatus::Notified),
            "expired" => Some(WaitlistStatus::Expired),
            "converted" => Some(WaitlistStatus::Converted),
            "cancelled" => Some(WaitlistStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for WaitlistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer waiting for a service/date-range combination that was
/// unavailable at booking time. `priority` is the FIFO position within the
/// `(tenant_id, service_id, start_date, end_date)` bucket; lower is served
/// first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: String,
    pub tenant_id: String,
    pub customer_id: String,
    pub service_id: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_pets: i64,
    pub contact_email: String,
    pub contact_phone: String,
    pub notes: Option<String>,
    pub priority: i64,
    pub status: WaitlistStatus,
    pub notified_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl WaitlistEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: String,
        customer_id: String,
        service_id: String,
        start_date: String,
        end_date: String,
        number_of_pets: i64,
        contact_email: String,
        contact_phone: String,
        notes: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id,
            customer_id,
            service_id,
            start_date,
            end_date,
            number_of_pets,
            contact_email,
            contact_phone,
            notes,
            // Assigned by the store inside the insert transaction.
            priority: 0,
            status: WaitlistStatus::Waiting,
            notified_at: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// DTO for joining the waitlist
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistRequest {
    pub customer_id: String,
    pub service_id: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_pets: i64,
    pub contact_email: String,
    pub contact_phone: String,
    pub notes: Option<String>,
}
