//! # Closed Order Repository
//!
//! Append-only log of finalized tabs. Rows are written once by the
//! closing flow and never updated; the day reset is the only deleter,
//! and it removes exactly the rows it has already folded into a
//! daily summary.
//!
//! Range scans use half-open `[start, end)` bounds on `closed_at`, so
//! "today" and billing-period windows never double-count a boundary.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use espeto_core::{ClosedOrder, OrderLine, PaymentMethod};

use crate::error::{DbError, DbResult};

// =============================================================================
// Row Type
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ClosedOrderRow {
    id: String,
    order_id: i64,
    customer: String,
    lines: String,
    total_cents: i64,
    created_at: DateTime<Utc>,
    payment_method: String,
    fee_cents: i64,
    closed_at: DateTime<Utc>,
}

impl ClosedOrderRow {
    fn into_closed_order(self) -> DbResult<ClosedOrder> {
        let lines: Vec<OrderLine> = serde_json::from_str(&self.lines)?;
        let payment_method = PaymentMethod::parse(&self.payment_method).ok_or_else(|| {
            DbError::CorruptRecord(format!("unknown payment method: {}", self.payment_method))
        })?;

        Ok(ClosedOrder {
            id: self.id,
            order_id: self.order_id,
            customer: self.customer,
            lines,
            total_cents: self.total_cents,
            created_at: self.created_at,
            payment_method,
            fee_cents: self.fee_cents,
            closed_at: self.closed_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the closed-orders log.
#[derive(Debug, Clone)]
pub struct ClosedOrderRepository {
    pool: SqlitePool,
}

impl ClosedOrderRepository {
    /// Creates a new closed-order repository.
    pub fn new(pool: SqlitePool) -> Self {
        ClosedOrderRepository { pool }
    }

    /// Appends one finalized tab to the log.
    pub async fn insert(&self, order: &ClosedOrder) -> DbResult<()> {
        debug!(
            id = %order.id,
            order_id = order.order_id,
            method = %order.payment_method,
            total_cents = order.total_cents,
            "Appending closed order"
        );

        let lines = serde_json::to_string(&order.lines)?;

        sqlx::query(
            r#"
            INSERT INTO closed_orders
                (id, order_id, customer, lines, total_cents, created_at,
                 payment_method, fee_cents, closed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&order.id)
        .bind(order.order_id)
        .bind(&order.customer)
        .bind(&lines)
        .bind(order.total_cents)
        .bind(order.created_at)
        .bind(order.payment_method.as_str())
        .bind(order.fee_cents)
        .bind(order.closed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists closed orders with `start <= closed_at < end`, oldest first.
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<ClosedOrder>> {
        let rows = sqlx::query_as::<_, ClosedOrderRow>(
            r#"
            SELECT id, order_id, customer, lines, total_cents, created_at,
                   payment_method, fee_cents, closed_at
            FROM closed_orders
            WHERE closed_at >= ?1 AND closed_at < ?2
            ORDER BY closed_at
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(ClosedOrderRow::into_closed_order)
            .collect()
    }

    /// Deletes closed orders with `start <= closed_at < end`.
    /// Returns the number of rows removed.
    pub async fn delete_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM closed_orders
            WHERE closed_at >= ?1 AND closed_at < ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .execute(&self.pool)
        .await?;

        debug!(removed = result.rows_affected(), "Deleted closed orders in range");
        Ok(result.rows_affected())
    }

    /// Counts all rows in the log.
    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM closed_orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
