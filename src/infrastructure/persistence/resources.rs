use crate::domain::entities::{BoardingResource, ResourceType, ServiceOffering};
use crate::domain::ports::resource_repository::ResourceRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use sqlx::any::AnyRow;
use sqlx::Row;

fn resource_from_row(row: &AnyRow) -> ApiResult<BoardingResource> {
    let type_raw: String = row.try_get("resource_type")?;
    let resource_type = ResourceType::from_str(&type_raw)
        .ok_or_else(|| ApiError::Internal(format!("Unknown resource type: {}", type_raw)))?;

    Ok(BoardingResource {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        name: row.try_get("name")?,
        resource_type,
        capacity: row.try_get("capacity")?,
        active: row.try_get::<i64, _>("active")? != 0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn offering_from_row(row: &AnyRow) -> ApiResult<ServiceOffering> {
    let type_raw: String = row.try_get("resource_type")?;
    let resource_type = ResourceType::from_str(&type_raw)
        .ok_or_else(|| ApiError::Internal(format!("Unknown resource type: {}", type_raw)))?;

    Ok(ServiceOffering {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        name: row.try_get("name")?,
        resource_type,
        base_rate_cents: row.try_get("base_rate_cents")?,
        weekend_rate_cents: row.try_get("weekend_rate_cents")?,
    })
}

#[async_trait::async_trait]
impl ResourceRepository for Database {
    async fn list_resources(&self, tenant_id: &str) -> ApiResult<Vec<BoardingResource>> {
        let rows = sqlx::query(
            "SELECT id, tenant_id, name, resource_type, capacity, active, created_at, updated_at
             FROM boarding_resources
             WHERE tenant_id = ? AND active = 1
             ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(resource_from_row).collect()
    }

    async fn list_resources_for_type(
        &self,
        tenant_id: &str,
        resource_type: ResourceType,
        min_capacity: i64,
    ) -> ApiResult<Vec<BoardingResource>> {
        let rows = sqlx::query(
            "SELECT id, tenant_id, name, resource_type, capacity, active, created_at, updated_at
             FROM boarding_resources
             WHERE tenant_id = ? AND resource_type = ? AND capacity >= ? AND active = 1
             ORDER BY name ASC",
        )
        .bind(tenant_id)
        .bind(resource_type.as_str())
        .bind(min_capacity)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(resource_from_row).collect()
    }

    async fn get_service_offering(
        &self,
        tenant_id: &str,
        service_id: &str,
    ) -> ApiResult<Option<ServiceOffering>> {
        let row = sqlx::query(
            "SELECT id, tenant_id, name, resource_type, base_rate_cents, weekend_rate_cents
             FROM service_offerings
             WHERE tenant_id = ? AND id = ?",
        )
        .bind(tenant_id)
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(offering_from_row).transpose()
    }
}
