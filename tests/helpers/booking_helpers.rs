#![allow(dead_code)]
use kenneldesk::domain::entities::{fmt_ts, parse_ts, ReservationStatus};
use kenneldesk::domain::ports::reservation_repository::ReservationRepository;
use kenneldesk::domain::ports::resource_repository::ResourceRepository;
use kenneldesk::domain::ports::waitlist_repository::WaitlistRepository;
use kenneldesk::events::EventBus;
use kenneldesk::infrastructure::persistence::Database;
use kenneldesk::services::{
    AvailabilityService, BookingService, SuggestionService, WaitlistService,
};
use sqlx::Row;
use std::sync::Arc;

/// Wire the full service stack against a test database, mirroring
/// bootstrap::build_app_state.
pub fn build_services(
    db: &Database,
    hold_hours: i64,
) -> (AvailabilityService, WaitlistService, BookingService, SuggestionService) {
    let reservation_repo: Arc<dyn ReservationRepository> = Arc::new(db.clone());
    let waitlist_repo: Arc<dyn WaitlistRepository> = Arc::new(db.clone());
    let resource_repo: Arc<dyn ResourceRepository> = Arc::new(db.clone());
    let event_bus = EventBus::new(100);

    let availability_service = AvailabilityService::new(reservation_repo.clone());
    let waitlist_service = WaitlistService::new(
        waitlist_repo,
        reservation_repo.clone(),
        resource_repo.clone(),
        availability_service.clone(),
        event_bus.clone(),
        hold_hours,
    );
    let booking_service = BookingService::new(
        reservation_repo,
        waitlist_service.clone(),
        event_bus,
    );
    let suggestion_service =
        SuggestionService::new(availability_service.clone(), resource_repo, 7);

    (
        availability_service,
        waitlist_service,
        booking_service,
        suggestion_service,
    )
}

/// Canonical fixed-width storage form of a date/timestamp string.
pub fn canon(value: &str) -> String {
    fmt_ts(parse_ts(value).expect("valid timestamp"))
}

/// Insert a reservation row directly. Dates may be bare `YYYY-MM-DD` or RFC
/// 3339; they are normalized to the canonical storage format.
pub async fn create_test_reservation(
    db: &Database,
    tenant_id: &str,
    resource_id: Option<&str>,
    start_date: &str,
    end_date: &str,
    status: ReservationStatus,
) -> String {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO reservations (id, tenant_id, resource_id, customer_id, pet_id, service_id, start_date, end_date, status, created_at, updated_at)
         VALUES (?, ?, ?, 'cust-001', 'pet-001', 'svc-001', ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(tenant_id)
    .bind(resource_id)
    .bind(canon(start_date))
    .bind(canon(end_date))
    .bind(status.as_str())
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await
    .expect("Failed to create test reservation");

    id
}

pub async fn create_test_resource(
    db: &Database,
    tenant_id: &str,
    id: &str,
    name: &str,
    resource_type: &str,
    capacity: i64,
) {
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO boarding_resources (id, tenant_id, name, resource_type, capacity, active, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(name)
    .bind(resource_type)
    .bind(capacity)
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await
    .expect("Failed to create test resource");
}

pub async fn create_test_offering(
    db: &Database,
    tenant_id: &str,
    id: &str,
    name: &str,
    resource_type: &str,
    base_rate_cents: i64,
    weekend_rate_cents: i64,
) {
    sqlx::query(
        "INSERT INTO service_offerings (id, tenant_id, name, resource_type, base_rate_cents, weekend_rate_cents)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(name)
    .bind(resource_type)
    .bind(base_rate_cents)
    .bind(weekend_rate_cents)
    .execute(db.pool())
    .await
    .expect("Failed to create test offering");
}

pub async fn get_reservation_status(db: &Database, id: &str) -> String {
    let row = sqlx::query("SELECT status FROM reservations WHERE id = ?")
        .bind(id)
        .fetch_one(db.pool())
        .await
        .expect("Failed to fetch reservation status");
    row.try_get("status").expect("status column")
}

pub async fn get_waitlist_status(db: &Database, id: &str) -> String {
    let row = sqlx::query("SELECT status FROM waitlist_entries WHERE id = ?")
        .bind(id)
        .fetch_one(db.pool())
        .await
        .expect("Failed to fetch waitlist status");
    row.try_get("status").expect("status column")
}

/// Backdate a notified entry so the expiry sweeper treats its hold as lapsed.
pub async fn backdate_notification(db: &Database, id: &str, hours_ago: i64) {
    let backdated = fmt_ts(chrono::Utc::now() - chrono::Duration::hours(hours_ago));
    sqlx::query("UPDATE waitlist_entries SET notified_at = ? WHERE id = ?")
        .bind(&backdated)
        .bind(id)
        .execute(db.pool())
        .await
        .expect("Failed to backdate notification");
}

/// Simulate a store outage for availability reads.
pub async fn drop_reservations_table(db: &Database) {
    sqlx::query("DROP TABLE reservations")
        .execute(db.pool())
        .await
        .expect("Failed to drop reservations table");
}
