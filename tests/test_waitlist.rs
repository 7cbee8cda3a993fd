mod helpers;

use helpers::*;
use kenneldesk::domain::entities::{
    JoinWaitlistRequest, QueryWindow, ReservationStatus, WaitlistStatus,
};
use kenneldesk::infrastructure::http::middleware::ApiError;
use kenneldesk::infrastructure::persistence::Database;
use kenneldesk::services::{AvailabilityService, BookingService, WaitlistService};

async fn setup() -> (Database, AvailabilityService, WaitlistService, BookingService) {
    let db = setup_test_db().await;
    let (availability, waitlist, booking, _) = build_services(&db, 24);

    create_test_offering(&db, "t1", "svc-1", "Standard Boarding", "kennel", 4000, 5500).await;
    create_test_resource(&db, "t1", "res-k1", "K1", "kennel", 2).await;

    (db, availability, waitlist, booking)
}

fn join_request(customer: &str, start: &str, end: &str) -> JoinWaitlistRequest {
    JoinWaitlistRequest {
        customer_id: customer.to_string(),
        service_id: "svc-1".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        number_of_pets: 1,
        contact_email: format!("{}@example.com", customer),
        contact_phone: "+1-555-0100".to_string(),
        notes: None,
    }
}

fn range_window(start: &str, end: &str) -> QueryWindow {
    QueryWindow::resolve(None, Some(start), Some(end)).unwrap()
}

#[tokio::test]
async fn test_fifo_priorities_within_bucket() {
    let (db, _, waitlist, _) = setup().await;

    let mut priorities = Vec::new();
    for customer in ["cust-a", "cust-b", "cust-c"] {
        let entry = waitlist
            .join("t1", join_request(customer, "2025-10-10", "2025-10-12"))
            .await
            .expect("join should succeed");
        assert_eq!(entry.status, WaitlistStatus::Waiting);
        priorities.push(entry.priority);
    }

    // Strictly increasing in submission order.
    assert_eq!(priorities, vec![1, 2, 3]);

    // A different range is a different bucket with its own sequence.
    let other = waitlist
        .join("t1", join_request("cust-d", "2025-11-01", "2025-11-03"))
        .await
        .unwrap();
    assert_eq!(other.priority, 1);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_join_validation() {
    let (db, _, waitlist, _) = setup().await;

    let mut bad = join_request("cust-a", "2025-10-10", "2025-10-12");
    bad.contact_email = "not-an-email".to_string();
    assert!(matches!(
        waitlist.join("t1", bad).await,
        Err(ApiError::BadRequest(_))
    ));

    let mut bad = join_request("cust-a", "2025-10-10", "2025-10-12");
    bad.contact_phone = "   ".to_string();
    assert!(matches!(
        waitlist.join("t1", bad).await,
        Err(ApiError::BadRequest(_))
    ));

    let mut bad = join_request("cust-a", "2025-10-10", "2025-10-12");
    bad.number_of_pets = 0;
    assert!(matches!(
        waitlist.join("t1", bad).await,
        Err(ApiError::BadRequest(_))
    ));

    let bad = join_request("cust-a", "2025-10-12", "2025-10-10");
    assert!(matches!(
        waitlist.join("t1", bad).await,
        Err(ApiError::BadRequest(_))
    ));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_contact_email_is_normalized() {
    let (db, _, waitlist, _) = setup().await;

    let mut request = join_request("cust-a", "2025-10-10", "2025-10-12");
    request.contact_email = "  Cust-A@Example.COM ".to_string();

    let entry = waitlist.join("t1", request).await.expect("join should succeed");
    assert_eq!(entry.contact_email, "cust-a@example.com");

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_cancellation_promotes_highest_priority_entry() {
    let (db, _, waitlist, booking) = setup().await;

    let reservation = booking
        .create_reservation(
            "t1",
            kenneldesk::domain::entities::CreateReservationRequest {
                resource_id: Some("res-k1".to_string()),
                customer_id: "cust-0".to_string(),
                pet_id: None,
                service_id: "svc-1".to_string(),
                start_date: "2025-10-10".to_string(),
                end_date: "2025-10-12".to_string(),
                status: None,
            },
        )
        .await
        .unwrap();

    let first = waitlist
        .join("t1", join_request("cust-a", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();
    let second = waitlist
        .join("t1", join_request("cust-b", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();

    booking.cancel_reservation("t1", &reservation.id).await.unwrap();

    // First come, first served: only the head of the queue gets notified.
    assert_eq!(get_waitlist_status(&db, &first.id).await, "notified");
    assert_eq!(get_waitlist_status(&db, &second.id).await, "waiting");

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_at_most_one_active_notification_per_range() {
    let (db, _, waitlist, _) = setup().await;

    let first = waitlist
        .join("t1", join_request("cust-a", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();
    let second = waitlist
        .join("t1", join_request("cust-b", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();

    let window = range_window("2025-10-10", "2025-10-12");
    let promoted = waitlist
        .promote_next("t1", "svc-1", &window)
        .await
        .unwrap()
        .expect("first promotion should notify the head entry");
    assert_eq!(promoted.id, first.id);

    // A second freed slot for the same range must not double-notify while
    // the first hold is outstanding.
    let promoted = waitlist.promote_next("t1", "svc-1", &window).await.unwrap();
    assert!(promoted.is_none());
    assert_eq!(get_waitlist_status(&db, &second.id).await, "waiting");

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_expired_hold_passes_to_next_entry() {
    let (db, _, waitlist, _) = setup().await;

    let first = waitlist
        .join("t1", join_request("cust-a", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();
    let second = waitlist
        .join("t1", join_request("cust-b", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();

    let window = range_window("2025-10-10", "2025-10-12");
    waitlist.promote_next("t1", "svc-1", &window).await.unwrap();

    // Hold still fresh: nothing to expire.
    let expired = waitlist.expire_lapsed().await.unwrap();
    assert!(expired.is_empty());

    // Push the notification past the 24h confirmation window.
    backdate_notification(&db, &first.id, 25).await;
    let expired = waitlist.expire_lapsed().await.unwrap();
    assert_eq!(expired, vec![first.id.clone()]);

    assert_eq!(get_waitlist_status(&db, &first.id).await, "expired");
    assert_eq!(get_waitlist_status(&db, &second.id).await, "notified");

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_confirm_converts_and_books_a_real_slot() {
    let (db, availability, waitlist, _) = setup().await;

    let entry = waitlist
        .join("t1", join_request("cust-a", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();
    let window = range_window("2025-10-10", "2025-10-12");
    waitlist.promote_next("t1", "svc-1", &window).await.unwrap();

    let reservation = waitlist
        .confirm("t1", &entry.id)
        .await
        .expect("confirm should book the freed slot");

    assert_eq!(reservation.resource_id.as_deref(), Some("res-k1"));
    assert_eq!(reservation.status, ReservationStatus::Confirmed);
    assert_eq!(reservation.customer_id, "cust-a");
    assert_eq!(get_waitlist_status(&db, &entry.id).await, "converted");

    // The conversion went through the authoritative write path and now
    // occupies the kennel.
    let result = availability
        .check_availability("t1", "res-k1", &window)
        .await
        .unwrap();
    assert!(!result.is_available);
    assert_eq!(result.occupying_reservations[0].id, reservation.id);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_confirm_requires_notified_status_and_free_slot() {
    let (db, _, waitlist, _) = setup().await;

    let entry = waitlist
        .join("t1", join_request("cust-a", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();

    // Still waiting: nothing was offered yet.
    let err = waitlist
        .confirm("t1", &entry.id)
        .await
        .expect_err("waiting entry cannot confirm");
    assert!(matches!(err, ApiError::Conflict(_)));

    let window = range_window("2025-10-10", "2025-10-12");
    waitlist.promote_next("t1", "svc-1", &window).await.unwrap();

    // The slot was re-taken before the customer confirmed.
    create_test_reservation(
        &db,
        "t1",
        Some("res-k1"),
        "2025-10-10",
        "2025-10-12",
        ReservationStatus::Confirmed,
    )
    .await;

    let err = waitlist
        .confirm("t1", &entry.id)
        .await
        .expect_err("no free resource means no conversion");
    assert!(matches!(err, ApiError::Conflict(_)));
    assert_eq!(get_waitlist_status(&db, &entry.id).await, "notified");

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_cancel_entry() {
    let (db, _, waitlist, _) = setup().await;

    let entry = waitlist
        .join("t1", join_request("cust-a", "2025-10-10", "2025-10-12"))
        .await
        .unwrap();

    let cancelled = waitlist.cancel("t1", &entry.id).await.unwrap();
    assert_eq!(cancelled.status, WaitlistStatus::Cancelled);

    let err = waitlist
        .cancel("t1", &entry.id)
        .await
        .expect_err("terminal entries cannot be cancelled again");
    assert!(matches!(err, ApiError::Conflict(_)));

    // Cross-tenant access is invisible.
    let err = waitlist
        .get_entry("t2", &entry.id)
        .await
        .expect_err("cross-tenant lookup must be NotFound");
    assert!(matches!(err, ApiError::NotFound(_)));

    teardown_test_db(db).await;
}
