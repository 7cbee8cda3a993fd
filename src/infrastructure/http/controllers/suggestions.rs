use crate::domain::entities::AlternativeDateSuggestion;
use crate::infrastructure::http::controllers::{success, Envelope};
use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState, TenantContext};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativesParams {
    pub service_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default = "default_pets")]
    pub number_of_pets: i64,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

fn default_pets() -> i64 {
    1
}

fn default_max_results() -> i64 {
    5
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativesData {
    pub suggestions: Vec<AlternativeDateSuggestion>,
}

/// GET /api/v1/reservations/alternatives - Ranked nearby date ranges
pub async fn suggest_alternatives(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Query(params): Query<AlternativesParams>,
) -> ApiResult<Json<Envelope<AlternativesData>>> {
    let service_id = params.service_id.unwrap_or_default();
    let start_date = params
        .start_date
        .ok_or_else(|| ApiError::BadRequest("startDate is required".to_string()))?;
    let end_date = params
        .end_date
        .ok_or_else(|| ApiError::BadRequest("endDate is required".to_string()))?;
    if params.max_results < 1 {
        return Err(ApiError::BadRequest(
            "maxResults must be greater than zero".to_string(),
        ));
    }

    let suggestions = state
        .suggestion_service
        .suggest_alternatives(
            &tenant.tenant_id,
            &service_id,
            &start_date,
            &end_date,
            params.number_of_pets,
            params.max_results as usize,
        )
        .await?;

    Ok(success(AlternativesData { suggestions }))
}
