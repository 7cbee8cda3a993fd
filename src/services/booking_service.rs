use crate::domain::entities::{
    fmt_ts, CreateReservationRequest, QueryWindow, Reservation, ReservationStatus,
};
use crate::domain::ports::reservation_repository::ReservationRepository;
use crate::events::{EventBus, SystemEvent};
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::services::WaitlistService;
use std::sync::Arc;

/// Reservation write path. Creation re-verifies the no-overlap invariant
/// inside the store transaction; cancellation frees the window and hands it
/// to the waitlist.
#[derive(Clone)]
pub struct BookingService {
    reservations: Arc<dyn ReservationRepository>,
    waitlist_service: WaitlistService,
    event_bus: EventBus,
}

impl BookingService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        waitlist_service: WaitlistService,
        event_bus: EventBus,
    ) -> Self {
        Self {
            reservations,
            waitlist_service,
            event_bus,
        }
    }

    pub async fn create_reservation(
        &self,
        tenant_id: &str,
        request: CreateReservationRequest,
    ) -> ApiResult<Reservation> {
        if tenant_id.trim().is_empty() {
            return Err(ApiError::Unauthorized);
        }
        for (field, value) in [
            ("customerId", &request.customer_id),
            ("serviceId", &request.service_id),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::BadRequest(format!("{} is required", field)));
            }
        }
        for (field, value) in [
            ("resourceId", &request.resource_id),
            ("petId", &request.pet_id),
        ] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(ApiError::BadRequest(format!(
                        "{} must not be empty when provided",
                        field
                    )));
                }
            }
        }

        let window = QueryWindow::resolve(
            None,
            Some(request.start_date.as_str()),
            Some(request.end_date.as_str()),
        )?;

        let reservation = Reservation::new(
            tenant_id.to_string(),
            request.resource_id.clone(),
            request.customer_id.clone(),
            request.pet_id.clone(),
            request.service_id.clone(),
            fmt_ts(window.start),
            fmt_ts(window.end),
            request.status.unwrap_or(ReservationStatus::Confirmed),
        );

        // Store failures here always surface; assuming success on a write is
        // not acceptable.
        self.reservations.create_reservation(&reservation).await?;

        self.event_bus.publish(SystemEvent::ReservationCreated {
            reservation_id: reservation.id.clone(),
            tenant_id: tenant_id.to_string(),
            resource_id: reservation.resource_id.clone(),
            start_date: reservation.start_date.clone(),
            end_date: reservation.end_date.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        });

        tracing::info!(
            tenant_id = %tenant_id,
            reservation_id = %reservation.id,
            resource_id = ?reservation.resource_id,
            "reservation created"
        );

        Ok(reservation)
    }

    /// Cancel a reservation. If it was occupying a resource, the freed
    /// window is offered to the waitlist (highest-priority matching entry
    /// gets notified).
    pub async fn cancel_reservation(&self, tenant_id: &str, id: &str) -> ApiResult<Reservation> {
        let reservation = self
            .reservations
            .get_reservation(tenant_id, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Reservation {} not found", id)))?;

        match reservation.status {
            ReservationStatus::Cancelled => {
                return Err(ApiError::Conflict(format!(
                    "Reservation {} is already cancelled",
                    id
                )))
            }
            ReservationStatus::CheckedOut => {
                return Err(ApiError::BadRequest(format!(
                    "Reservation {} is already checked out",
                    id
                )))
            }
            _ => {}
        }

        let freed_a_slot = reservation.status.is_active() && reservation.resource_id.is_some();

        self.reservations
            .update_reservation_status(tenant_id, id, ReservationStatus::Cancelled)
            .await?;

        self.event_bus.publish(SystemEvent::ReservationCancelled {
            reservation_id: reservation.id.clone(),
            tenant_id: tenant_id.to_string(),
            resource_id: reservation.resource_id.clone(),
            service_id: reservation.service_id.clone(),
            start_date: reservation.start_date.clone(),
            end_date: reservation.end_date.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        });

        tracing::info!(
            tenant_id = %tenant_id,
            reservation_id = %id,
            "reservation cancelled"
        );

        if freed_a_slot {
            let window = QueryWindow::resolve(
                None,
                Some(reservation.start_date.as_str()),
                Some(reservation.end_date.as_str()),
            )?;
            // The cancellation is already committed; a promotion failure is
            // recoverable on the next cancellation or sweeper pass.
            if let Err(err) = self
                .waitlist_service
                .promote_next(tenant_id, &reservation.service_id, &window)
                .await
            {
                tracing::warn!(
                    tenant_id = %tenant_id,
                    service_id = %reservation.service_id,
                    error = %err,
                    "waitlist promotion after cancellation failed"
                );
            }
        }

        let mut cancelled = reservation;
        cancelled.status = ReservationStatus::Cancelled;
        Ok(cancelled)
    }

    pub async fn get_reservation(&self, tenant_id: &str, id: &str) -> ApiResult<Reservation> {
        self.reservations
            .get_reservation(tenant_id, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Reservation {} not found", id)))
    }

    pub async fn list_reservations(
        &self,
        tenant_id: &str,
        status: Option<ReservationStatus>,
        limit: i64,
        offset: i64,
    ) -> ApiResult<(Vec<Reservation>, i64)> {
        self.reservations
            .list_reservations(tenant_id, status, limit, offset)
            .await
    }
}
