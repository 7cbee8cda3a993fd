use crate::infrastructure::http::controllers;
use crate::infrastructure::http::middleware::{resolve_tenant, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    // Tenant-scoped API routes; every handler below sees a resolved
    // TenantContext extension or the request never reaches it.
    let api = Router::new()
        .route(
            "/api/v1/resources",
            get(controllers::resources::list_resources),
        )
        .route(
            "/api/v1/resources/availability",
            get(controllers::availability::check_availability),
        )
        .route(
            "/api/v1/resources/availability/batch",
            post(controllers::availability::check_availability_batch),
        )
        .route(
            "/api/v1/reservations",
            get(controllers::reservations::list_reservations),
        )
        .route(
            "/api/v1/reservations",
            post(controllers::reservations::create_reservation),
        )
        .route(
            "/api/v1/reservations/alternatives",
            get(controllers::suggestions::suggest_alternatives),
        )
        .route(
            "/api/v1/reservations/:id",
            get(controllers::reservations::get_reservation),
        )
        .route(
            "/api/v1/reservations/:id/cancel",
            post(controllers::reservations::cancel_reservation),
        )
        .route("/api/v1/waitlist", post(controllers::waitlist::join_waitlist))
        .route("/api/v1/waitlist", get(controllers::waitlist::list_waitlist))
        .route(
            "/api/v1/waitlist/:id/confirm",
            post(controllers::waitlist::confirm_waitlist_entry),
        )
        .route(
            "/api/v1/waitlist/:id/cancel",
            post(controllers::waitlist::cancel_waitlist_entry),
        )
        .layer(axum::middleware::from_fn(resolve_tenant));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Kenneldesk Reservation Service"
}

async fn health_handler() -> &'static str {
    "OK"
}
