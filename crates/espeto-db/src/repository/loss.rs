//! # Loss Repository
//!
//! Append-only log of intentional stock write-offs (spoilage, waste).
//! The day reset deletes the day's rows after folding the day away;
//! nothing else ever touches an existing record.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use espeto_core::LossRecord;

use crate::error::DbResult;

// =============================================================================
// Row Type
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct LossRow {
    id: String,
    product: String,
    quantity: i64,
    total_cost_cents: i64,
    recorded_at: DateTime<Utc>,
}

impl LossRow {
    fn into_record(self) -> LossRecord {
        LossRecord {
            id: self.id,
            product: self.product,
            quantity: self.quantity,
            total_cost_cents: self.total_cost_cents,
            recorded_at: self.recorded_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the loss log.
#[derive(Debug, Clone)]
pub struct LossRepository {
    pool: SqlitePool,
}

impl LossRepository {
    /// Creates a new loss repository.
    pub fn new(pool: SqlitePool) -> Self {
        LossRepository { pool }
    }

    /// Appends one loss record.
    pub async fn insert(&self, record: &LossRecord) -> DbResult<()> {
        debug!(
            product = %record.product,
            quantity = record.quantity,
            cost_cents = record.total_cost_cents,
            "Recording loss"
        );

        sqlx::query(
            r#"
            INSERT INTO loss_records (id, product, quantity, total_cost_cents, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&record.id)
        .bind(&record.product)
        .bind(record.quantity)
        .bind(record.total_cost_cents)
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists losses with `start <= recorded_at < end`, oldest first.
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<LossRecord>> {
        let rows = sqlx::query_as::<_, LossRow>(
            r#"
            SELECT id, product, quantity, total_cost_cents, recorded_at
            FROM loss_records
            WHERE recorded_at >= ?1 AND recorded_at < ?2
            ORDER BY recorded_at
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LossRow::into_record).collect())
    }

    /// Deletes losses with `start <= recorded_at < end`.
    /// Returns the number of rows removed.
    pub async fn delete_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM loss_records
            WHERE recorded_at >= ?1 AND recorded_at < ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .execute(&self.pool)
        .await?;

        debug!(removed = result.rows_affected(), "Deleted loss records in range");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn loss(product: &str, at: DateTime<Utc>) -> LossRecord {
        LossRecord {
            id: uuid::Uuid::new_v4().to_string(),
            product: product.to_string(),
            quantity: 3,
            total_cost_cents: 1200,
            recorded_at: at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_round_trip() {
        let db = test_db().await;
        let repo = db.losses();

        let at = Utc.with_ymd_and_hms(2026, 8, 20, 15, 0, 0).unwrap();
        let record = loss("Carne", at);
        repo.insert(&record).await.unwrap();

        let listed = repo
            .list_between(at, at + chrono::Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], record);
    }

    #[tokio::test]
    async fn test_delete_between_scopes_to_range() {
        let db = test_db().await;
        let repo = db.losses();

        let yesterday = Utc.with_ymd_and_hms(2026, 8, 19, 12, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap();
        repo.insert(&loss("Carne", yesterday)).await.unwrap();
        repo.insert(&loss("Frango", today)).await.unwrap();

        let day_start = Utc.with_ymd_and_hms(2026, 8, 20, 0, 0, 0).unwrap();
        let day_end = Utc.with_ymd_and_hms(2026, 8, 21, 0, 0, 0).unwrap();
        let removed = repo.delete_between(day_start, day_end).await.unwrap();

        assert_eq!(removed, 1);
        let remaining = repo
            .list_between(yesterday, day_end)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product, "Carne");
    }
}
