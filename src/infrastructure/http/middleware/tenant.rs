use super::error::ApiError;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};

pub const TENANT_HEADER: &str = "x-tenant-id";

/// Tenant scope for the current request, resolved upstream of the handlers.
/// Every query and write downstream must be constrained by `tenant_id`.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: String,
}

/// Resolve the tenant from the `X-Tenant-Id` header into a request
/// extension. A missing or empty header means the caller is not identified
/// and is rejected before any handler runs.
pub async fn resolve_tenant(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let tenant_id = request
        .headers()
        .get(TENANT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    request.extensions_mut().insert(TenantContext { tenant_id });

    Ok(next.run(request).await)
}
