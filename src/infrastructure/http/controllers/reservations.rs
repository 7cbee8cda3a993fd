use crate::domain::entities::{CreateReservationRequest, Reservation, ReservationStatus};
use crate::infrastructure::http::controllers::{success, Envelope};
use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState, TenantContext};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReservationsParams {
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListData {
    pub reservations: Vec<Reservation>,
    pub total: i64,
}

/// GET /api/v1/reservations - List reservations (newest first)
pub async fn list_reservations(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Query(params): Query<ListReservationsParams>,
) -> ApiResult<Json<Envelope<ReservationListData>>> {
    let status = params
        .status
        .as_deref()
        .map(|raw| {
            ReservationStatus::from_str(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown status: {}", raw)))
        })
        .transpose()?;

    let page = params.page.max(1);
    let per_page = params.per_page.clamp(1, 200);
    let offset = (page - 1) * per_page;

    let (reservations, total) = state
        .booking_service
        .list_reservations(&tenant.tenant_id, status, per_page, offset)
        .await?;

    Ok(success(ReservationListData {
        reservations,
        total,
    }))
}

/// POST /api/v1/reservations - Create a reservation (authoritative conflict check)
pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Json(request): Json<CreateReservationRequest>,
) -> ApiResult<Json<Envelope<Reservation>>> {
    let reservation = state
        .booking_service
        .create_reservation(&tenant.tenant_id, request)
        .await?;

    Ok(success(reservation))
}

/// GET /api/v1/reservations/:id
pub async fn get_reservation(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Reservation>>> {
    let reservation = state
        .booking_service
        .get_reservation(&tenant.tenant_id, &id)
        .await?;

    Ok(success(reservation))
}

/// POST /api/v1/reservations/:id/cancel - Cancel and offer the slot to the waitlist
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Reservation>>> {
    let reservation = state
        .booking_service
        .cancel_reservation(&tenant.tenant_id, &id)
        .await?;

    Ok(success(reservation))
}
