use crate::domain::entities::{
    fmt_ts, JoinWaitlistRequest, QueryWindow, Reservation, ReservationStatus, WaitlistEntry,
    WaitlistStatus,
};
use crate::domain::ports::resource_repository::ResourceRepository;
use crate::domain::ports::reservation_repository::ReservationRepository;
use crate::domain::ports::waitlist_repository::WaitlistRepository;
use crate::events::{EventBus, SystemEvent};
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::services::AvailabilityService;
use std::sync::Arc;

pub fn validate_and_normalize_email(email: &str) -> ApiResult<String> {
    let trimmed = email.trim();

    if !email_address::EmailAddress::is_valid(trimmed) {
        return Err(ApiError::BadRequest(
            "Invalid contactEmail. Must be in format user@domain.tld".to_string(),
        ));
    }

    // Additional validation: require a TLD (dot after @)
    if let Some(at_pos) = trimmed.find('@') {
        let domain_part = &trimmed[at_pos + 1..];
        if !domain_part.contains('.') {
            return Err(ApiError::BadRequest(
                "Invalid contactEmail. Domain must include a TLD (e.g., .com, .org)".to_string(),
            ));
        }
    }

    // Normalize to lowercase for consistent storage
    Ok(trimmed.to_lowercase())
}

/// Waitlist enrollment and the notify/expire/convert state machine.
///
/// Promotion is sequential per contended range: at most one entry may hold a
/// `notified` slot at a time, and the guarded store updates make sure two
/// concurrent promoters (two cancellations, or a cancellation racing the
/// expiry sweeper) cannot both hand out the same freed slot.
#[derive(Clone)]
pub struct WaitlistService {
    waitlist: Arc<dyn WaitlistRepository>,
    reservations: Arc<dyn ReservationRepository>,
    resources: Arc<dyn ResourceRepository>,
    availability_service: AvailabilityService,
    event_bus: EventBus,
    hold_hours: i64,
}

impl WaitlistService {
    pub fn new(
        waitlist: Arc<dyn WaitlistRepository>,
        reservations: Arc<dyn ReservationRepository>,
        resources: Arc<dyn ResourceRepository>,
        availability_service: AvailabilityService,
        event_bus: EventBus,
        hold_hours: i64,
    ) -> Self {
        Self {
            waitlist,
            reservations,
            resources,
            availability_service,
            event_bus,
            hold_hours,
        }
    }

    /// Enroll a customer. Priority is assigned FIFO within the
    /// `(tenant, service, range)` bucket by the store.
    pub async fn join(
        &self,
        tenant_id: &str,
        request: JoinWaitlistRequest,
    ) -> ApiResult<WaitlistEntry> {
        if tenant_id.trim().is_empty() {
            return Err(ApiError::Unauthorized);
        }
        if request.customer_id.trim().is_empty() {
            return Err(ApiError::BadRequest("customerId is required".to_string()));
        }
        if request.service_id.trim().is_empty() {
            return Err(ApiError::BadRequest("serviceId is required".to_string()));
        }
        if request.number_of_pets < 1 {
            return Err(ApiError::BadRequest(
                "numberOfPets must be at least 1".to_string(),
            ));
        }
        // The UI requires both contact channels; re-validate here since the
        // API is also called directly.
        let contact_email = validate_and_normalize_email(&request.contact_email)?;
        let contact_phone = request.contact_phone.trim().to_string();
        if contact_phone.is_empty() {
            return Err(ApiError::BadRequest("contactPhone is required".to_string()));
        }

        let window = QueryWindow::resolve(
            None,
            Some(request.start_date.as_str()),
            Some(request.end_date.as_str()),
        )?;

        let entry = WaitlistEntry::new(
            tenant_id.to_string(),
            request.customer_id,
            request.service_id,
            fmt_ts(window.start),
            fmt_ts(window.end),
            request.number_of_pets,
            contact_email,
            contact_phone,
            request.notes,
        );

        let entry = self.waitlist.insert_waitlist_entry(&entry).await?;

        self.event_bus.publish(SystemEvent::WaitlistJoined {
            entry_id: entry.id.clone(),
            tenant_id: tenant_id.to_string(),
            service_id: entry.service_id.clone(),
            priority: entry.priority,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });

        tracing::info!(
            tenant_id = %tenant_id,
            entry_id = %entry.id,
            priority = entry.priority,
            "waitlist entry created"
        );

        Ok(entry)
    }

    pub async fn get_entry(&self, tenant_id: &str, id: &str) -> ApiResult<WaitlistEntry> {
        self.waitlist
            .get_waitlist_entry(tenant_id, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Waitlist entry {} not found", id)))
    }

    pub async fn list_entries(
        &self,
        tenant_id: &str,
        service_id: Option<&str>,
    ) -> ApiResult<Vec<WaitlistEntry>> {
        self.waitlist.list_waitlist_entries(tenant_id, service_id).await
    }

    /// Offer a freed window to the waitlist: promote the highest-priority
    /// `waiting` entry overlapping it to `notified`, unless some entry for
    /// the range is already holding a notification.
    pub async fn promote_next(
        &self,
        tenant_id: &str,
        service_id: &str,
        window: &QueryWindow,
    ) -> ApiResult<Option<WaitlistEntry>> {
        if self
            .waitlist
            .has_notified_entry(tenant_id, service_id, window)
            .await?
        {
            return Ok(None);
        }

        loop {
            let Some(entry) = self
                .waitlist
                .next_waiting_entry(tenant_id, service_id, window)
                .await?
            else {
                return Ok(None);
            };

            // Guarded update; losing the race means another promoter or a
            // cancellation got to this entry first, so try the next one.
            if self.waitlist.mark_notified(tenant_id, &entry.id).await? {
                self.publish_transition(&entry, WaitlistStatus::Notified, "promotion");
                tracing::info!(
                    tenant_id = %tenant_id,
                    entry_id = %entry.id,
                    priority = entry.priority,
                    "waitlist entry notified of freed slot"
                );
                let mut notified = entry;
                notified.status = WaitlistStatus::Notified;
                return Ok(Some(notified));
            }
        }
    }

    /// Convert a notified entry into a confirmed reservation on the first
    /// resource of the service's pool that is still free for the range.
    pub async fn confirm(&self, tenant_id: &str, id: &str) -> ApiResult<Reservation> {
        let entry = self.get_entry(tenant_id, id).await?;
        if entry.status != WaitlistStatus::Notified {
            return Err(ApiError::Conflict(format!(
                "Waitlist entry {} is {} and cannot be confirmed",
                id, entry.status
            )));
        }

        let offering = self
            .resources
            .get_service_offering(tenant_id, &entry.service_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Service {} not found", entry.service_id))
            })?;

        let pool = self
            .resources
            .list_resources_for_type(tenant_id, offering.resource_type, entry.number_of_pets)
            .await?;
        if pool.is_empty() {
            return Err(ApiError::Conflict(
                "No eligible resources for this service".to_string(),
            ));
        }

        let window = QueryWindow::resolve(
            None,
            Some(entry.start_date.as_str()),
            Some(entry.end_date.as_str()),
        )?;
        let pool_ids: Vec<String> = pool.iter().map(|r| r.id.clone()).collect();
        let batch = self
            .availability_service
            .check_availability_batch(tenant_id, &pool_ids, &window)
            .await?;

        // The advisory read narrows the candidates; the create below is the
        // authoritative check, so a candidate lost to a concurrent booking
        // just moves us to the next one.
        let mut booked: Option<Reservation> = None;
        for candidate in batch.resources.iter().filter(|r| r.is_available) {
            let reservation = Reservation::new(
                tenant_id.to_string(),
                Some(candidate.resource_id.clone()),
                entry.customer_id.clone(),
                None,
                entry.service_id.clone(),
                entry.start_date.clone(),
                entry.end_date.clone(),
                ReservationStatus::Confirmed,
            );
            match self.reservations.create_reservation(&reservation).await {
                Ok(()) => {
                    booked = Some(reservation);
                    break;
                }
                Err(ApiError::Conflict(_)) => continue,
                Err(err) => return Err(err),
            }
        }

        let Some(reservation) = booked else {
            return Err(ApiError::Conflict(
                "The requested dates are no longer available".to_string(),
            ));
        };

        if !self
            .waitlist
            .transition_status(tenant_id, id, WaitlistStatus::Notified, WaitlistStatus::Converted)
            .await?
        {
            // The entry expired or was cancelled while we were booking; the
            // reservation stands, but record the anomaly.
            tracing::warn!(
                tenant_id = %tenant_id,
                entry_id = %id,
                "waitlist entry changed state during confirmation"
            );
        } else {
            self.publish_transition(&entry, WaitlistStatus::Converted, "confirmed");
        }

        Ok(reservation)
    }

    pub async fn cancel(&self, tenant_id: &str, id: &str) -> ApiResult<WaitlistEntry> {
        let entry = self.get_entry(tenant_id, id).await?;
        match entry.status {
            WaitlistStatus::Waiting | WaitlistStatus::Notified => {}
            _ => {
                return Err(ApiError::Conflict(format!(
                    "Waitlist entry {} is {} and cannot be cancelled",
                    id, entry.status
                )))
            }
        }

        if !self
            .waitlist
            .transition_status(tenant_id, id, entry.status, WaitlistStatus::Cancelled)
            .await?
        {
            return Err(ApiError::Conflict(format!(
                "Waitlist entry {} changed state concurrently",
                id
            )));
        }

        self.publish_transition(&entry, WaitlistStatus::Cancelled, "cancelled");

        let mut cancelled = entry;
        cancelled.status = WaitlistStatus::Cancelled;
        Ok(cancelled)
    }

    /// Expire notified entries whose confirmation hold has lapsed and offer
    /// their slot to the next entry in priority order. Called by the
    /// background sweeper; returns the ids of expired entries.
    pub async fn expire_lapsed(&self) -> ApiResult<Vec<String>> {
        let cutoff = fmt_ts(chrono::Utc::now() - chrono::Duration::hours(self.hold_hours));
        let lapsed = self.waitlist.notified_entries_before(&cutoff).await?;

        let mut expired = Vec::new();
        for entry in lapsed {
            if !self
                .waitlist
                .transition_status(
                    &entry.tenant_id,
                    &entry.id,
                    WaitlistStatus::Notified,
                    WaitlistStatus::Expired,
                )
                .await?
            {
                // Converted or cancelled in the meantime.
                continue;
            }

            self.publish_transition(&entry, WaitlistStatus::Expired, "hold_expired");
            tracing::info!(
                tenant_id = %entry.tenant_id,
                entry_id = %entry.id,
                "waitlist hold expired"
            );

            let window = QueryWindow::resolve(
                None,
                Some(entry.start_date.as_str()),
                Some(entry.end_date.as_str()),
            )?;
            self.promote_next(&entry.tenant_id, &entry.service_id, &window)
                .await?;

            expired.push(entry.id);
        }

        Ok(expired)
    }

    fn publish_transition(&self, entry: &WaitlistEntry, new_status: WaitlistStatus, reason: &str) {
        self.event_bus.publish(SystemEvent::WaitlistStatusChanged {
            entry_id: entry.id.clone(),
            tenant_id: entry.tenant_id.clone(),
            service_id: entry.service_id.clone(),
            old_status: entry.status,
            new_status,
            timestamp: chrono::Utc::now().to_rfc3339(),
            reason: reason.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let result = validate_and_normalize_email("owner@example.com");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "owner@example.com");
    }

    #[test]
    fn test_email_normalization() {
        let result = validate_and_normalize_email("Owner@Example.COM");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "owner@example.com");
    }

    #[test]
    fn test_email_with_whitespace() {
        let result = validate_and_normalize_email("  owner@example.com  ");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "owner@example.com");
    }

    #[test]
    fn test_invalid_email_no_at() {
        assert!(validate_and_normalize_email("ownerexample.com").is_err());
    }

    #[test]
    fn test_invalid_email_no_tld() {
        assert!(validate_and_normalize_email("owner@example").is_err());
    }
}
