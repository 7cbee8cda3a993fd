use kenneldesk::infrastructure::persistence::Database;

pub async fn setup_test_db() -> Database {
    // Install drivers for AnyPool (required for tests)
    sqlx::any::install_default_drivers();

    // Use file-based SQLite for tests (unique UUID per test for parallel execution)
    use uuid::Uuid;
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    setup_schema(&db).await;

    db
}

async fn setup_schema(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "CREATE TABLE boarding_resources (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            name TEXT NOT NULL,
            resource_type TEXT NOT NULL CHECK(resource_type IN ('kennel', 'suite', 'grooming_slot')),
            capacity INTEGER NOT NULL DEFAULT 1,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(tenant_id, name)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create boarding_resources table");

    sqlx::query("CREATE INDEX idx_resources_tenant_type ON boarding_resources(tenant_id, resource_type)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE service_offerings (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            name TEXT NOT NULL,
            resource_type TEXT NOT NULL CHECK(resource_type IN ('kennel', 'suite', 'grooming_slot')),
            base_rate_cents INTEGER NOT NULL,
            weekend_rate_cents INTEGER NOT NULL,
            UNIQUE(tenant_id, name)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create service_offerings table");

    sqlx::query(
        "CREATE TABLE reservations (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            resource_id TEXT,
            customer_id TEXT NOT NULL,
            pet_id TEXT,
            service_id TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('pending', 'confirmed', 'checked_in', 'pending_payment', 'partially_paid', 'checked_out', 'cancelled')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create reservations table");

    sqlx::query(
        "CREATE INDEX idx_reservations_tenant_resource_dates
         ON reservations(tenant_id, resource_id, start_date, end_date)",
    )
    .execute(pool)
    .await
    .ok();

    sqlx::query("CREATE INDEX idx_reservations_tenant_status ON reservations(tenant_id, status)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE waitlist_entries (
            id TEXT PRIMARY KEY,
            tenant_id TEXT NOT NULL,
            customer_id TEXT NOT NULL,
            service_id TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            number_of_pets INTEGER NOT NULL DEFAULT 1,
            contact_email TEXT NOT NULL,
            contact_phone TEXT NOT NULL,
            notes TEXT,
            priority INTEGER NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('waiting', 'notified', 'expired', 'converted', 'cancelled')),
            notified_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create waitlist_entries table");

    sqlx::query(
        "CREATE INDEX idx_waitlist_bucket
         ON waitlist_entries(tenant_id, service_id, start_date, end_date, priority)",
    )
    .execute(pool)
    .await
    .ok();

    sqlx::query("CREATE INDEX idx_waitlist_status ON waitlist_entries(status, notified_at)")
        .execute(pool)
        .await
        .ok();
}

pub async fn teardown_test_db(db: Database) {
    // Close the connection
    drop(db);
    // Note: Test database files will be cleaned up manually or by .gitignore
}
