use crate::domain::entities::BoardingResource;
use crate::domain::ports::resource_repository::ResourceRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use std::sync::Arc;

#[derive(Clone)]
pub struct ResourceService {
    resources: Arc<dyn ResourceRepository>,
}

impl ResourceService {
    pub fn new(resources: Arc<dyn ResourceRepository>) -> Self {
        Self { resources }
    }

    pub async fn list_resources(&self, tenant_id: &str) -> ApiResult<Vec<BoardingResource>> {
        if tenant_id.trim().is_empty() {
            return Err(ApiError::Unauthorized);
        }
        self.resources.list_resources(tenant_id).await
    }
}
