use crate::domain::entities::{fmt_ts, QueryWindow, WaitlistEntry, WaitlistStatus};
use crate::domain::ports::waitlist_repository::WaitlistRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use sqlx::any::AnyRow;
use sqlx::Row;

const WAITLIST_COLUMNS: &str = "id, tenant_id, customer_id, service_id, start_date, end_date, \
     number_of_pets, contact_email, contact_phone, notes, priority, status, notified_at, \
     created_at, updated_at";

fn entry_from_row(row: &AnyRow) -> ApiResult<WaitlistEntry> {
    let status_raw: String = row.try_get("status")?;
    let status = WaitlistStatus::from_str(&status_raw)
        .ok_or_else(|| ApiError::Internal(format!("Unknown waitlist status: {}", status_raw)))?;

    Ok(WaitlistEntry {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        customer_id: row.try_get("customer_id")?,
        service_id: row.try_get("service_id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        number_of_pets: row.try_get("number_of_pets")?,
        contact_email: row.try_get("contact_email")?,
        contact_phone: row.try_get("contact_phone")?,
        notes: row.try_get::<Option<String>, _>("notes")?,
        priority: row.try_get("priority")?,
        status,
        notified_at: row.try_get::<Option<String>, _>("notified_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl WaitlistRepository for Database {
    async fn insert_waitlist_entry(&self, entry: &WaitlistEntry) -> ApiResult<WaitlistEntry> {
        let mut tx = self.pool.begin().await?;

        // FIFO: the next priority in the bucket is read and the row inserted
        // in one transaction, so two concurrent joins cannot claim the same
        // position.
        let row = sqlx::query(
            "SELECT COALESCE(MAX(priority), 0) + 1 as next_priority
             FROM waitlist_entries
             WHERE tenant_id = ? AND service_id = ? AND start_date = ? AND end_date = ?",
        )
        .bind(&entry.tenant_id)
        .bind(&entry.service_id)
        .bind(&entry.start_date)
        .bind(&entry.end_date)
        .fetch_one(&mut *tx)
        .await?;
        let priority: i64 = row.try_get("next_priority")?;

        sqlx::query(
            "INSERT INTO waitlist_entries (id, tenant_id, customer_id, service_id, start_date, end_date, number_of_pets, contact_email, contact_phone, notes, priority, status, notified_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.tenant_id)
        .bind(&entry.customer_id)
        .bind(&entry.service_id)
        .bind(&entry.start_date)
        .bind(&entry.end_date)
        .bind(entry.number_of_pets)
        .bind(&entry.contact_email)
        .bind(&entry.contact_phone)
        .bind(&entry.notes)
        .bind(priority)
        .bind(entry.status.as_str())
        .bind(&entry.notified_at)
        .bind(&entry.created_at)
        .bind(&entry.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut assigned = entry.clone();
        assigned.priority = priority;
        Ok(assigned)
    }

    async fn get_waitlist_entry(
        &self,
        tenant_id: &str,
        id: &str,
    ) -> ApiResult<Option<WaitlistEntry>> {
        let sql = format!(
            "SELECT {} FROM waitlist_entries WHERE tenant_id = ? AND id = ?",
            WAITLIST_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn list_waitlist_entries(
        &self,
        tenant_id: &str,
        service_id: Option<&str>,
    ) -> ApiResult<Vec<WaitlistEntry>> {
        let rows = if let Some(service_id) = service_id {
            let sql = format!(
                "SELECT {} FROM waitlist_entries
                 WHERE tenant_id = ? AND service_id = ?
                 ORDER BY start_date ASC, priority ASC",
                WAITLIST_COLUMNS
            );
            sqlx::query(&sql)
                .bind(tenant_id)
                .bind(service_id)
                .fetch_all(&self.pool)
                .await?
        } else {
            let sql = format!(
                "SELECT {} FROM waitlist_entries
                 WHERE tenant_id = ?
                 ORDER BY start_date ASC, priority ASC",
                WAITLIST_COLUMNS
            );
            sqlx::query(&sql).bind(tenant_id).fetch_all(&self.pool).await?
        };

        rows.iter().map(entry_from_row).collect()
    }

    async fn next_waiting_entry(
        &self,
        tenant_id: &str,
        service_id: &str,
        window: &QueryWindow,
    ) -> ApiResult<Option<WaitlistEntry>> {
        let sql = format!(
            "SELECT {} FROM waitlist_entries
             WHERE tenant_id = ? AND service_id = ? AND status = 'waiting'
               AND start_date <= ? AND end_date >= ?
             ORDER BY priority ASC, created_at ASC
             LIMIT 1",
            WAITLIST_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(tenant_id)
            .bind(service_id)
            .bind(window.end_str())
            .bind(window.start_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn has_notified_entry(
        &self,
        tenant_id: &str,
        service_id: &str,
        window: &QueryWindow,
    ) -> ApiResult<bool> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM waitlist_entries
             WHERE tenant_id = ? AND service_id = ? AND status = 'notified'
               AND start_date <= ? AND end_date >= ?",
        )
        .bind(tenant_id)
        .bind(service_id)
        .bind(window.end_str())
        .bind(window.start_str())
        .fetch_one(&self.pool)
        .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }

    async fn mark_notified(&self, tenant_id: &str, id: &str) -> ApiResult<bool> {
        let now = fmt_ts(chrono::Utc::now());
        // Guarded: only a still-waiting entry can be promoted, so concurrent
        // promoters cannot both win the freed slot.
        let result = sqlx::query(
            "UPDATE waitlist_entries
             SET status = 'notified', notified_at = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ? AND status = 'waiting'",
        )
        .bind(&now)
        .bind(&now)
        .bind(tenant_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn transition_status(
        &self,
        tenant_id: &str,
        id: &str,
        expected: WaitlistStatus,
        next: WaitlistStatus,
    ) -> ApiResult<bool> {
        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE waitlist_entries
             SET status = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ? AND status = ?",
        )
        .bind(next.as_str())
        .bind(&now)
        .bind(tenant_id)
        .bind(id)
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn notified_entries_before(&self, cutoff: &str) -> ApiResult<Vec<WaitlistEntry>> {
        let sql = format!(
            "SELECT {} FROM waitlist_entries
             WHERE status = 'notified' AND notified_at <= ?
             ORDER BY notified_at ASC",
            WAITLIST_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(cutoff).fetch_all(&self.pool).await?;

        rows.iter().map(entry_from_row).collect()
    }
}
