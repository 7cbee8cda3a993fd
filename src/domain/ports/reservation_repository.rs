use crate::domain::entities::{QueryWindow, Reservation, ReservationStatus};
use crate::infrastructure::http::middleware::error::ApiResult;

/// Repository for reservation reads and the authoritative write path.
///
/// Every method is tenant-scoped; a cross-tenant row leaking out of any of
/// these is a correctness violation, not a formatting bug.
#[async_trait::async_trait]
pub trait ReservationRepository: Send + Sync {
    /// All reservations for the given resources whose `[start_date, end_date]`
    /// interval overlaps `window` (closed-interval, inclusive boundaries) and
    /// whose status is in `statuses`. Results are ordered by start date then
    /// id so conflict lists are stable.
    async fn find_overlapping(
        &self,
        tenant_id: &str,
        resource_ids: &[String],
        window: &QueryWindow,
        statuses: &[ReservationStatus],
    ) -> ApiResult<Vec<Reservation>>;

    /// Insert a reservation, re-running the overlap check against the active
    /// status set inside the same transaction. Returns `ApiError::Conflict`
    /// listing the blocking reservation ids if the slot was taken between the
    /// advisory read and this write.
    async fn create_reservation(&self, reservation: &Reservation) -> ApiResult<()>;

    async fn get_reservation(&self, tenant_id: &str, id: &str) -> ApiResult<Option<Reservation>>;

    /// Newest-first listing with an optional status filter, plus the total
    /// row count for pagination.
    async fn list_reservations(
        &self,
        tenant_id: &str,
        status: Option<ReservationStatus>,
        limit: i64,
        offset: i64,
    ) -> ApiResult<(Vec<Reservation>, i64)>;

    async fn update_reservation_status(
        &self,
        tenant_id: &str,
        id: &str,
        status: ReservationStatus,
    ) -> ApiResult<()>;
}
