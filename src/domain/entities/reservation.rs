use serde::{Deserialize, Serialize};

/// Reservation lifecycle states. Only the subset returned by
/// [`ReservationStatus::active_set`] counts toward occupancy; a checked-out
/// or cancelled reservation never blocks a kennel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    PendingPayment,
    PartiallyPaid,
    CheckedOut,
    Cancelled,
}

/// The one place the "occupying" status set is defined. Both the single and
/// batch availability paths, and the write-time conflict re-check, consume
/// this constant so the no-overlap invariant cannot drift between them.
pub const ACTIVE_STATUSES: [ReservationStatus; 4] = [
    ReservationStatus::Confirmed,
    ReservationStatus::CheckedIn,
    ReservationStatus::PendingPayment,
    ReservationStatus::PartiallyPaid,
];

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::PendingPayment => "pending_payment",
            ReservationStatus::PartiallyPaid => "partially_paid",
            ReservationStatus::CheckedOut => "checked_out",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "checked_in" => Some(ReservationStatus::CheckedIn),
            "pending_payment" => Some(ReservationStatus::PendingPayment),
            "partially_paid" => Some(ReservationStatus::PartiallyPaid),
            "checked_out" => Some(ReservationStatus::CheckedOut),
            "cancelled" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }

    pub fn active_set() -> &'static [ReservationStatus] {
        &ACTIVE_STATUSES
    }

    pub fn is_active(&self) -> bool {
        ACTIVE_STATUSES.contains(self)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A boarding reservation. `start_date`/`end_date` are RFC 3339 UTC strings
/// in the fixed-width format produced by [`crate::domain::entities::fmt_ts`],
/// so string comparison in SQL matches instant ordering.
///
/// `resource_id` is nullable: imported reservations can exist without an
/// assigned kennel, and those never block a specific resource. `pet_id` is
/// nullable for the same reason (waitlist conversions book the stay before
/// a pet is attached).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub tenant_id: String,
    pub resource_id: Option<String>,
    pub customer_id: String,
    pub pet_id: Option<String>,
    pub service_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: ReservationStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: String,
        resource_id: Option<String>,
        customer_id: String,
        pet_id: Option<String>,
        service_id: String,
        start_date: String,
        end_date: String,
        status: ReservationStatus,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id,
            resource_id,
            customer_id,
            pet_id,
            service_id,
            start_date,
            end_date,
            status,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Minimal conflict summary surfaced to staff in availability responses.
    pub fn summary(&self) -> ReservationSummary {
        ReservationSummary {
            id: self.id.clone(),
            customer_id: self.customer_id.clone(),
            pet_id: self.pet_id.clone(),
            service_id: self.service_id.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    pub id: String,
    pub customer_id: String,
    pub pet_id: Option<String>,
    pub service_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: ReservationStatus,
}

/// DTO for creating a reservation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub resource_id: Option<String>,
    pub customer_id: String,
    pub pet_id: Option<String>,
    pub service_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: Option<ReservationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_set_excludes_terminal_states() {
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(ReservationStatus::CheckedIn.is_active());
        assert!(ReservationStatus::PendingPayment.is_active());
        assert!(ReservationStatus::PartiallyPaid.is_active());
        assert!(!ReservationStatus::Pending.is_active());
        assert!(!ReservationStatus::CheckedOut.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            ReservationStatus::PendingPayment,
            ReservationStatus::PartiallyPaid,
            ReservationStatus::CheckedOut,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ReservationStatus::from_str("unknown"), None);
    }
}
