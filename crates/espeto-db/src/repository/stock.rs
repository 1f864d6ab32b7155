//! # Stock Repository
//!
//! The stock ledger, keyed by product name. Sale deductions go through
//! [`StockRepository::deduct_clamped`], which floors at zero inside the
//! UPDATE itself - overselling reduces the count to 0 and never errors.

use sqlx::SqlitePool;
use tracing::debug;

use espeto_core::StockItem;

use crate::error::{DbError, DbResult};

// =============================================================================
// Row Type
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct StockRow {
    name: String,
    quantity: i64,
    unit_cost_cents: i64,
    unit_sale_price_cents: i64,
}

impl StockRow {
    fn into_item(self) -> StockItem {
        StockItem {
            name: self.name,
            quantity: self.quantity,
            unit_cost_cents: self.unit_cost_cents,
            unit_sale_price_cents: self.unit_sale_price_cents,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for stock-ledger operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new stock repository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Destructively replaces the whole ledger with the given items.
    /// Runs in one transaction, so readers never observe a half-empty
    /// ledger.
    pub async fn replace_all(&self, items: &[StockItem]) -> DbResult<()> {
        debug!(items = items.len(), "Replacing stock ledger");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM stock_items").execute(&mut *tx).await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO stock_items (name, quantity, unit_cost_cents, unit_sale_price_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&item.name)
            .bind(item.quantity)
            .bind(item.unit_cost_cents)
            .bind(item.unit_sale_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Fetches one ledger entry by product name.
    pub async fn get(&self, name: &str) -> DbResult<Option<StockItem>> {
        let row = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT name, quantity, unit_cost_cents, unit_sale_price_cents
            FROM stock_items
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StockRow::into_item))
    }

    /// Lists the whole ledger, ordered by product name.
    pub async fn list_all(&self) -> DbResult<Vec<StockItem>> {
        let rows = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT name, quantity, unit_cost_cents, unit_sale_price_cents
            FROM stock_items
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StockRow::into_item).collect())
    }

    /// Lists ledger entries with `quantity < threshold`, ordered by name.
    pub async fn below_threshold(&self, threshold: i64) -> DbResult<Vec<StockItem>> {
        let rows = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT name, quantity, unit_cost_cents, unit_sale_price_cents
            FROM stock_items
            WHERE quantity < ?1
            ORDER BY name
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StockRow::into_item).collect())
    }

    /// Adds quantity to an existing entry (restock).
    pub async fn add_quantity(&self, name: &str, quantity: i64) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE stock_items
            SET quantity = quantity + ?1
            WHERE name = ?2
            "#,
        )
        .bind(quantity)
        .bind(name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("StockItem", name));
        }

        debug!(product = name, added = quantity, "Restocked");
        Ok(())
    }

    /// Deducts quantity, flooring at zero. Products with no ledger entry
    /// are silently skipped: a tab can sell items the operator never put
    /// under stock control.
    pub async fn deduct_clamped(&self, name: &str, quantity: i64) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE stock_items
            SET quantity = MAX(0, quantity - ?1)
            WHERE name = ?2
            "#,
        )
        .bind(quantity)
        .bind(name)
        .execute(&self.pool)
        .await?;

        debug!(product = name, deducted = quantity, "Deducted stock (clamped)");
        Ok(())
    }

    /// Sets the unit cost of an existing entry.
    pub async fn set_unit_cost(&self, name: &str, unit_cost_cents: i64) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE stock_items
            SET unit_cost_cents = ?1
            WHERE name = ?2
            "#,
        )
        .bind(unit_cost_cents)
        .bind(name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("StockItem", name));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
