use crate::config::Config;
use crate::domain::ports::reservation_repository::ReservationRepository;
use crate::domain::ports::resource_repository::ResourceRepository;
use crate::domain::ports::waitlist_repository::WaitlistRepository;
use crate::events::EventBus;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use crate::services::{
    AvailabilityService, BookingService, ResourceService, SuggestionService, WaitlistService,
};
use std::sync::Arc;
use std::time::Duration;

pub async fn build_app_state(db: Database, config: &Config) -> anyhow::Result<AppState> {
    let reservation_repo: Arc<dyn ReservationRepository> = Arc::new(db.clone());
    let waitlist_repo: Arc<dyn WaitlistRepository> = Arc::new(db.clone());
    let resource_repo: Arc<dyn ResourceRepository> = Arc::new(db.clone());

    let event_bus = EventBus::new(100);
    tracing::info!("Event bus initialized with capacity 100");

    let availability_service = AvailabilityService::new(reservation_repo.clone());
    tracing::info!("Availability service initialized");

    let waitlist_service = WaitlistService::new(
        waitlist_repo,
        reservation_repo.clone(),
        resource_repo.clone(),
        availability_service.clone(),
        event_bus.clone(),
        config.waitlist_hold_hours,
    );
    tracing::info!(
        "Waitlist service initialized ({}h confirmation hold)",
        config.waitlist_hold_hours
    );

    let booking_service = BookingService::new(
        reservation_repo,
        waitlist_service.clone(),
        event_bus.clone(),
    );
    tracing::info!("Booking service initialized");

    let suggestion_service = SuggestionService::new(
        availability_service.clone(),
        resource_repo.clone(),
        config.suggestion_scan_days,
    );
    tracing::info!(
        "Suggestion service initialized (±{} day scan)",
        config.suggestion_scan_days
    );

    let resource_service = ResourceService::new(resource_repo);

    // Background sweeper: expire lapsed waitlist holds and promote the next
    // entry in priority order.
    spawn_waitlist_sweeper(waitlist_service.clone(), config.waitlist_sweep_interval_secs);

    Ok(AppState {
        availability_service,
        booking_service,
        suggestion_service,
        waitlist_service,
        resource_service,
        event_bus,
    })
}

fn spawn_waitlist_sweeper(waitlist_service: WaitlistService, interval_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            match waitlist_service.expire_lapsed().await {
                Ok(expired) if !expired.is_empty() => {
                    tracing::info!("Expired {} lapsed waitlist holds", expired.len());
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Waitlist expiry sweep failed: {}", e);
                }
            }
        }
    });
    tracing::info!(
        "Waitlist expiry sweeper started (every {}s)",
        interval_secs
    );
}
