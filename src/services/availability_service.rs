use crate::domain::entities::{
    AvailabilityResult, BatchAvailabilityResult, QueryWindow, Reservation, ResourceAvailability,
    ReservationStatus,
};
use crate::domain::ports::reservation_repository::ReservationRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use std::sync::Arc;

/// Advisory availability checks over the reservation store.
///
/// Results are advisory for UI purposes only: the authoritative no-overlap
/// enforcement happens at write time, inside the reservation insert
/// transaction, using the same overlap predicate.
#[derive(Clone)]
pub struct AvailabilityService {
    reservations: Arc<dyn ReservationRepository>,
}

impl AvailabilityService {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// Check whether a single resource is free over `window`.
    pub async fn check_availability(
        &self,
        tenant_id: &str,
        resource_id: &str,
        window: &QueryWindow,
    ) -> ApiResult<AvailabilityResult> {
        if tenant_id.trim().is_empty() {
            return Err(ApiError::Unauthorized);
        }
        if resource_id.trim().is_empty() {
            return Err(ApiError::BadRequest("resourceId is required".to_string()));
        }

        let resource_ids = vec![resource_id.to_string()];
        match self
            .reservations
            .find_overlapping(
                tenant_id,
                &resource_ids,
                window,
                ReservationStatus::active_set(),
            )
            .await
        {
            Ok(overlapping) => Ok(AvailabilityResult {
                resource_id: resource_id.to_string(),
                check_start_date: window.start_str(),
                check_end_date: window.end_str(),
                is_available: overlapping.is_empty(),
                occupying_reservations: overlapping.iter().map(Reservation::summary).collect(),
                degraded: false,
            }),
            Err(err) => {
                Self::record_degraded(tenant_id, 1, &err);
                Ok(AvailabilityResult {
                    resource_id: resource_id.to_string(),
                    check_start_date: window.start_str(),
                    check_end_date: window.end_str(),
                    is_available: true,
                    occupying_reservations: Vec::new(),
                    degraded: true,
                })
            }
        }
    }

    /// Check many resources in one store round trip. Output order matches
    /// the input `resource_ids` order exactly, and resources with no
    /// reservations at all still appear as available.
    pub async fn check_availability_batch(
        &self,
        tenant_id: &str,
        resource_ids: &[String],
        window: &QueryWindow,
    ) -> ApiResult<BatchAvailabilityResult> {
        if tenant_id.trim().is_empty() {
            return Err(ApiError::Unauthorized);
        }
        if resource_ids.is_empty() {
            return Err(ApiError::BadRequest(
                "resources must contain at least one resource id".to_string(),
            ));
        }
        if resource_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ApiError::BadRequest(
                "resources must not contain empty resource ids".to_string(),
            ));
        }

        match self
            .reservations
            .find_overlapping(
                tenant_id,
                resource_ids,
                window,
                ReservationStatus::active_set(),
            )
            .await
        {
            Ok(overlapping) => {
                let resources = resource_ids
                    .iter()
                    .map(|resource_id| {
                        let occupying: Vec<_> = overlapping
                            .iter()
                            .filter(|r| r.resource_id.as_deref() == Some(resource_id.as_str()))
                            .map(Reservation::summary)
                            .collect();
                        ResourceAvailability {
                            resource_id: resource_id.clone(),
                            is_available: occupying.is_empty(),
                            occupying_reservations: occupying,
                        }
                    })
                    .collect();

                Ok(BatchAvailabilityResult {
                    check_start_date: window.start_str(),
                    check_end_date: window.end_str(),
                    degraded: false,
                    resources,
                })
            }
            Err(err) => {
                Self::record_degraded(tenant_id, resource_ids.len(), &err);
                let resources = resource_ids
                    .iter()
                    .map(|resource_id| ResourceAvailability {
                        resource_id: resource_id.clone(),
                        is_available: true,
                        occupying_reservations: Vec::new(),
                    })
                    .collect();
                Ok(BatchAvailabilityResult {
                    check_start_date: window.start_str(),
                    check_end_date: window.end_str(),
                    degraded: true,
                    resources,
                })
            }
        }
    }

    /// Store failures on this read path degrade to "available, no known
    /// conflicts" instead of blocking the booking UI: a false available is a
    /// staff-correctable overbooking caught by the write-time re-check,
    /// while a hard 500 stalls every downstream workflow. The branch is
    /// logged and counted so degraded answers stay distinguishable from
    /// genuine availability in production.
    fn record_degraded(tenant_id: &str, resource_count: usize, err: &ApiError) {
        tracing::warn!(
            tenant_id = %tenant_id,
            resource_count,
            error = %err,
            "availability lookup failed; degrading to available with no conflicts"
        );
        metrics::counter!("availability_degraded_total").increment(1);
    }
}
