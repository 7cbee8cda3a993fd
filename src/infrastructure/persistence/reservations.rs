use crate::domain::entities::{QueryWindow, Reservation, ReservationStatus, ACTIVE_STATUSES};
use crate::domain::ports::reservation_repository::ReservationRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use sqlx::any::AnyRow;
use sqlx::Row;

const RESERVATION_COLUMNS: &str = "id, tenant_id, resource_id, customer_id, pet_id, service_id, \
     start_date, end_date, status, created_at, updated_at";

/// Closed-interval overlap against a `[?, ?]` window, bound as
/// (window.end, window.start). Must stay identical between the advisory
/// read ([`ReservationRepository::find_overlapping`]) and the write-time
/// re-check in [`ReservationRepository::create_reservation`].
const OVERLAP_PREDICATE: &str = "start_date <= ? AND end_date >= ?";

fn reservation_from_row(row: &AnyRow) -> ApiResult<Reservation> {
    let status_raw: String = row.try_get("status")?;
    let status = ReservationStatus::from_str(&status_raw)
        .ok_or_else(|| ApiError::Internal(format!("Unknown reservation status: {}", status_raw)))?;

    Ok(Reservation {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        resource_id: row.try_get::<Option<String>, _>("resource_id")?,
        customer_id: row.try_get("customer_id")?,
        pet_id: row.try_get::<Option<String>, _>("pet_id")?,
        service_id: row.try_get("service_id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[async_trait::async_trait]
impl ReservationRepository for Database {
    async fn find_overlapping(
        &self,
        tenant_id: &str,
        resource_ids: &[String],
        window: &QueryWindow,
        statuses: &[ReservationStatus],
    ) -> ApiResult<Vec<Reservation>> {
        if resource_ids.is_empty() || statuses.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM reservations
             WHERE tenant_id = ?
               AND resource_id IN ({})
               AND status IN ({})
               AND {}
             ORDER BY start_date ASC, id ASC",
            RESERVATION_COLUMNS,
            placeholders(resource_ids.len()),
            placeholders(statuses.len()),
            OVERLAP_PREDICATE,
        );

        let mut query = sqlx::query(&sql).bind(tenant_id);
        for resource_id in resource_ids {
            query = query.bind(resource_id);
        }
        for status in statuses {
            query = query.bind(status.as_str());
        }
        query = query.bind(window.end_str()).bind(window.start_str());

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(reservation_from_row).collect()
    }

    async fn create_reservation(&self, reservation: &Reservation) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        // Authoritative conflict re-check: the advisory read the caller did
        // earlier is not trusted; the no-overlap invariant is enforced here,
        // inside the transaction that inserts the row. Only an assigned
        // resource and an occupying status can violate it.
        if let (Some(resource_id), true) = (&reservation.resource_id, reservation.status.is_active())
        {
            let sql = format!(
                "SELECT id FROM reservations
                 WHERE tenant_id = ?
                   AND resource_id = ?
                   AND status IN ({})
                   AND {}
                 ORDER BY start_date ASC, id ASC",
                placeholders(ACTIVE_STATUSES.len()),
                OVERLAP_PREDICATE,
            );

            let mut query = sqlx::query(&sql)
                .bind(&reservation.tenant_id)
                .bind(resource_id);
            for status in ACTIVE_STATUSES {
                query = query.bind(status.as_str());
            }
            query = query
                .bind(&reservation.end_date)
                .bind(&reservation.start_date);

            let conflicting = query.fetch_all(&mut *tx).await?;
            if !conflicting.is_empty() {
                let ids: Vec<String> = conflicting
                    .iter()
                    .map(|row| row.try_get("id"))
                    .collect::<Result<_, _>>()?;
                return Err(ApiError::Conflict(format!(
                    "Resource {} is already reserved for the requested dates by: {}",
                    resource_id,
                    ids.join(", ")
                )));
            }
        }

        sqlx::query(
            "INSERT INTO reservations (id, tenant_id, resource_id, customer_id, pet_id, service_id, start_date, end_date, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&reservation.id)
        .bind(&reservation.tenant_id)
        .bind(&reservation.resource_id)
        .bind(&reservation.customer_id)
        .bind(&reservation.pet_id)
        .bind(&reservation.service_id)
        .bind(&reservation.start_date)
        .bind(&reservation.end_date)
        .bind(reservation.status.as_str())
        .bind(&reservation.created_at)
        .bind(&reservation.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_reservation(&self, tenant_id: &str, id: &str) -> ApiResult<Option<Reservation>> {
        let sql = format!(
            "SELECT {} FROM reservations WHERE tenant_id = ? AND id = ?",
            RESERVATION_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(reservation_from_row).transpose()
    }

    async fn list_reservations(
        &self,
        tenant_id: &str,
        status: Option<ReservationStatus>,
        limit: i64,
        offset: i64,
    ) -> ApiResult<(Vec<Reservation>, i64)> {
        let (rows, count_row) = if let Some(status) = status {
            let sql = format!(
                "SELECT {} FROM reservations
                 WHERE tenant_id = ? AND status = ?
                 ORDER BY created_at DESC, id DESC
                 LIMIT ? OFFSET ?",
                RESERVATION_COLUMNS
            );
            let rows = sqlx::query(&sql)
                .bind(tenant_id)
                .bind(status.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
            let count_row = sqlx::query(
                "SELECT COUNT(*) as count FROM reservations WHERE tenant_id = ? AND status = ?",
            )
            .bind(tenant_id)
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
            (rows, count_row)
        } else {
            let sql = format!(
                "SELECT {} FROM reservations
                 WHERE tenant_id = ?
                 ORDER BY created_at DESC, id DESC
                 LIMIT ? OFFSET ?",
                RESERVATION_COLUMNS
            );
            let rows = sqlx::query(&sql)
                .bind(tenant_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
            let count_row =
                sqlx::query("SELECT COUNT(*) as count FROM reservations WHERE tenant_id = ?")
                    .bind(tenant_id)
                    .fetch_one(&self.pool)
                    .await?;
            (rows, count_row)
        };

        let reservations: Vec<Reservation> =
            rows.iter().map(reservation_from_row).collect::<ApiResult<_>>()?;
        let total: i64 = count_row.try_get("count")?;

        Ok((reservations, total))
    }

    async fn update_reservation_status(
        &self,
        tenant_id: &str,
        id: &str,
        status: ReservationStatus,
    ) -> ApiResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE reservations SET status = ?, updated_at = ? WHERE tenant_id = ? AND id = ?",
        )
        .bind(status.as_str())
        .bind(&now)
        .bind(tenant_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Reservation {} not found", id)));
        }
        Ok(())
    }
}
