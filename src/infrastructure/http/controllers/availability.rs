use crate::domain::entities::{BatchAvailabilityResult, QueryWindow, ReservationSummary};
use crate::infrastructure::http::controllers::{success, Envelope};
use crate::infrastructure::http::middleware::{ApiResult, AppState, TenantContext};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    pub resource_id: Option<String>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityData {
    pub resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_date: Option<String>,
    pub check_start_date: String,
    pub check_end_date: String,
    pub is_available: bool,
    pub degraded: bool,
    pub occupying_reservations: Vec<ReservationSummary>,
}

/// GET /api/v1/resources/availability - Check one resource over a date or range
pub async fn check_availability(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Query(params): Query<AvailabilityParams>,
) -> ApiResult<Json<Envelope<AvailabilityData>>> {
    let resource_id = params.resource_id.unwrap_or_default();
    let window = QueryWindow::resolve(
        params.date.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let result = state
        .availability_service
        .check_availability(&tenant.tenant_id, &resource_id, &window)
        .await?;

    Ok(success(AvailabilityData {
        resource_id: result.resource_id,
        check_date: params.date,
        check_start_date: result.check_start_date,
        check_end_date: result.check_end_date,
        is_available: result.is_available,
        degraded: result.degraded,
        occupying_reservations: result.occupying_reservations,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAvailabilityRequest {
    #[serde(default)]
    pub resources: Vec<String>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// POST /api/v1/resources/availability/batch - Check many resources in one call
pub async fn check_availability_batch(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Json(request): Json<BatchAvailabilityRequest>,
) -> ApiResult<Json<Envelope<BatchAvailabilityResult>>> {
    let window = QueryWindow::resolve(
        request.date.as_deref(),
        request.start_date.as_deref(),
        request.end_date.as_deref(),
    )?;

    let result = state
        .availability_service
        .check_availability_batch(&tenant.tenant_id, &request.resources, &window)
        .await?;

    Ok(success(result))
}
