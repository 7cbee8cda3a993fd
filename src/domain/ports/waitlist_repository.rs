use crate::domain::entities::{QueryWindow, WaitlistEntry, WaitlistStatus};
use crate::infrastructure::http::middleware::error::ApiResult;

/// Repository for waitlist entries.
#[async_trait::async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Insert the entry, assigning the next sequential priority within its
    /// `(tenant_id, service_id, start_date, end_date)` bucket inside the
    /// insert transaction. Returns the entry with its assigned priority.
    async fn insert_waitlist_entry(&self, entry: &WaitlistEntry) -> ApiResult<WaitlistEntry>;

    async fn get_waitlist_entry(
        &self,
        tenant_id: &str,
        id: &str,
    ) -> ApiResult<Option<WaitlistEntry>>;

    async fn list_waitlist_entries(
        &self,
        tenant_id: &str,
        service_id: Option<&str>,
    ) -> ApiResult<Vec<WaitlistEntry>>;

    /// The lowest-priority-number `waiting` entry for this service whose
    /// requested range overlaps `window`.
    async fn next_waiting_entry(
        &self,
        tenant_id: &str,
        service_id: &str,
        window: &QueryWindow,
    ) -> ApiResult<Option<WaitlistEntry>>;

    /// Whether any entry for this service overlapping `window` is currently
    /// `notified` (holding the at-most-one-active-notification slot).
    async fn has_notified_entry(
        &self,
        tenant_id: &str,
        service_id: &str,
        window: &QueryWindow,
    ) -> ApiResult<bool>;

    /// Guarded transition `waiting → notified`. Returns false if the entry
    /// was no longer `waiting` (a concurrent promoter or cancellation won).
    async fn mark_notified(&self, tenant_id: &str, id: &str) -> ApiResult<bool>;

    /// Guarded transition out of `notified`/`waiting`. Returns false if the
    /// entry was not in `expected` status.
    async fn transition_status(
        &self,
        tenant_id: &str,
        id: &str,
        expected: WaitlistStatus,
        next: WaitlistStatus,
    ) -> ApiResult<bool>;

    /// All `notified` entries (across tenants) whose notification is older
    /// than `cutoff`, for the expiry sweeper.
    async fn notified_entries_before(&self, cutoff: &str) -> ApiResult<Vec<WaitlistEntry>>;
}
