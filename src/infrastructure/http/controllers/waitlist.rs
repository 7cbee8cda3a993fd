use crate::domain::entities::{JoinWaitlistRequest, Reservation, WaitlistEntry};
use crate::infrastructure::http::controllers::{success, Envelope};
use crate::infrastructure::http::middleware::{ApiResult, AppState, TenantContext};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

/// POST /api/v1/waitlist - Join the waitlist for a contended range
pub async fn join_waitlist(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Json(request): Json<JoinWaitlistRequest>,
) -> ApiResult<Json<Envelope<WaitlistEntry>>> {
    let entry = state
        .waitlist_service
        .join(&tenant.tenant_id, request)
        .await?;

    Ok(success(entry))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWaitlistParams {
    pub service_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistListData {
    pub entries: Vec<WaitlistEntry>,
}

/// GET /api/v1/waitlist - List entries, optionally per service
pub async fn list_waitlist(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Query(params): Query<ListWaitlistParams>,
) -> ApiResult<Json<Envelope<WaitlistListData>>> {
    let entries = state
        .waitlist_service
        .list_entries(&tenant.tenant_id, params.service_id.as_deref())
        .await?;

    Ok(success(WaitlistListData { entries }))
}

/// POST /api/v1/waitlist/:id/confirm - Convert a notified entry to a reservation
pub async fn confirm_waitlist_entry(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Reservation>>> {
    let reservation = state
        .waitlist_service
        .confirm(&tenant.tenant_id, &id)
        .await?;

    Ok(success(reservation))
}

/// POST /api/v1/waitlist/:id/cancel
pub async fn cancel_waitlist_entry(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<WaitlistEntry>>> {
    let entry = state
        .waitlist_service
        .cancel(&tenant.tenant_id, &id)
        .await?;

    Ok(success(entry))
}
