use crate::domain::entities::BoardingResource;
use crate::infrastructure::http::controllers::{success, Envelope};
use crate::infrastructure::http::middleware::{ApiResult, AppState, TenantContext};
use axum::{extract::State, Extension, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListData {
    pub resources: Vec<BoardingResource>,
}

/// GET /api/v1/resources - Active boarding resources for the tenant
pub async fn list_resources(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
) -> ApiResult<Json<Envelope<ResourceListData>>> {
    let resources = state
        .resource_service
        .list_resources(&tenant.tenant_id)
        .await?;

    Ok(success(ResourceListData { resources }))
}
