//! # Order Repository
//!
//! Storage for open tabs ("comandas"). Rows in this table are transient:
//! a tab leaves it either through the closing flow (moving to the
//! closed-orders log) or through cancellation (deleted outright).
//!
//! The `lines` column is a JSON array of line items; `total_cents` is the
//! derived cache maintained by every line replacement.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use espeto_core::{Order, OrderLine};

use crate::error::{DbError, DbResult};

// =============================================================================
// Row Type
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer: String,
    lines: String,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> DbResult<Order> {
        let lines: Vec<OrderLine> = serde_json::from_str(&self.lines)?;
        Ok(Order {
            id: self.id,
            customer: self.customer,
            lines,
            total_cents: self.total_cents,
            created_at: self.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for open-tab operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new order repository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new open tab. The id is the sequential tab number the
    /// caller allocated from settings; duplicates fail on the primary key.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(order_id = order.id, customer = %order.customer, "Inserting open tab");

        let lines = serde_json::to_string(&order.lines)?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer, lines, total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(order.id)
        .bind(&order.customer)
        .bind(&lines)
        .bind(order.total_cents)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetches one open tab by its number.
    pub async fn get(&self, id: i64) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer, lines, total_cents, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    /// Lists all open tabs, ordered by tab number.
    pub async fn list_all(&self) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer, lines, total_cents, created_at
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Replaces a tab's line list and its total cache in one write.
    pub async fn update_lines(&self, id: i64, lines: &[OrderLine], total_cents: i64) -> DbResult<()> {
        let lines_json = serde_json::to_string(lines)?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET lines = ?1, total_cents = ?2
            WHERE id = ?3
            "#,
        )
        .bind(&lines_json)
        .bind(total_cents)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id.to_string()));
        }

        debug!(order_id = id, total_cents, "Updated tab lines");
        Ok(())
    }

    /// Deletes one open tab.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id.to_string()));
        }

        debug!(order_id = id, "Deleted open tab");
        Ok(())
    }

    /// Counts the open tabs.
    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_order(id: i64) -> Order {
        Order {
            id,
            customer: "Ana".to_string(),
            lines: vec![OrderLine {
                name: "Carne".to_string(),
                unit_price_cents: 1100,
                quantity: 2,
            }],
            total_cents: 2200,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.orders();

        repo.insert(&sample_order(1)).await.unwrap();

        let fetched = repo.get(1).await.unwrap().unwrap();
        assert_eq!(fetched.customer, "Ana");
        assert_eq!(fetched.total_cents, 2200);
        assert_eq!(fetched.lines.len(), 1);
        assert_eq!(fetched.lines[0].name, "Carne");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.orders().get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_number() {
        let db = test_db().await;
        let repo = db.orders();

        repo.insert(&sample_order(3)).await.unwrap();
        repo.insert(&sample_order(1)).await.unwrap();
        repo.insert(&sample_order(2)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_lines_replaces_list_and_total() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order(1)).await.unwrap();

        let new_lines = vec![
            OrderLine {
                name: "Carne".to_string(),
                unit_price_cents: 1100,
                quantity: 1,
            },
            OrderLine {
                name: "Coca-Cola 350ml".to_string(),
                unit_price_cents: 600,
                quantity: 2,
            },
        ];
        repo.update_lines(1, &new_lines, 2300).await.unwrap();

        let fetched = repo.get(1).await.unwrap().unwrap();
        assert_eq!(fetched.lines.len(), 2);
        assert_eq!(fetched.total_cents, 2300);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = test_db().await;
        let err = db.orders().update_lines(9, &[], 0).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order(1)).await.unwrap();

        repo.delete(1).await.unwrap();
        assert!(repo.get(1).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete(1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
