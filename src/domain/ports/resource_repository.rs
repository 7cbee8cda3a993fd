use crate::domain::entities::{BoardingResource, ResourceType, ServiceOffering};
use crate::infrastructure::http::middleware::error::ApiResult;

/// Repository for boarding resources and service offerings.
#[async_trait::async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Active resources for the tenant, ordered by name.
    async fn list_resources(&self, tenant_id: &str) -> ApiResult<Vec<BoardingResource>>;

    /// The active resource pool eligible for a service: matching type, with
    /// capacity of at least `min_capacity`.
    async fn list_resources_for_type(
        &self,
        tenant_id: &str,
        resource_type: ResourceType,
        min_capacity: i64,
    ) -> ApiResult<Vec<BoardingResource>>;

    async fn get_service_offering(
        &self,
        tenant_id: &str,
        service_id: &str,
    ) -> ApiResult<Option<ServiceOffering>>;
}
