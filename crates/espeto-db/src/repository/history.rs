//! # History Repository
//!
//! Permanent daily summaries, keyed by calendar date. The day reset
//! writes here through an upsert, which is what makes re-running a
//! reset on the same date idempotent: the second rollup sees no live
//! orders, recomputes the same totals, and overwrites the row with
//! itself.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::debug;

use espeto_core::{DailySummary, MethodTotals, PaymentMethod};

use crate::error::DbResult;

// =============================================================================
// Row Type
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    date: NaiveDate,
    total_sales_cents: i64,
    order_count: i64,
    average_ticket_cents: i64,
    by_method: String,
}

impl SummaryRow {
    fn into_summary(self) -> DbResult<DailySummary> {
        let by_method: BTreeMap<PaymentMethod, MethodTotals> =
            serde_json::from_str(&self.by_method)?;

        Ok(DailySummary {
            date: self.date,
            total_sales_cents: self.total_sales_cents,
            order_count: self.order_count,
            average_ticket_cents: self.average_ticket_cents,
            by_method,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the daily-summary history.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    /// Creates a new history repository.
    pub fn new(pool: SqlitePool) -> Self {
        HistoryRepository { pool }
    }

    /// Inserts or overwrites the summary for its date.
    pub async fn upsert(&self, summary: &DailySummary) -> DbResult<()> {
        debug!(
            date = %summary.date,
            total_sales_cents = summary.total_sales_cents,
            order_count = summary.order_count,
            "Upserting daily summary"
        );

        let by_method = serde_json::to_string(&summary.by_method)?;

        sqlx::query(
            r#"
            INSERT INTO daily_summaries
                (date, total_sales_cents, order_count, average_ticket_cents, by_method)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(date) DO UPDATE SET
                total_sales_cents = excluded.total_sales_cents,
                order_count = excluded.order_count,
                average_ticket_cents = excluded.average_ticket_cents,
                by_method = excluded.by_method
            "#,
        )
        .bind(summary.date)
        .bind(summary.total_sales_cents)
        .bind(summary.order_count)
        .bind(summary.average_ticket_cents)
        .bind(&by_method)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetches the summary for one date.
    pub async fn get(&self, date: NaiveDate) -> DbResult<Option<DailySummary>> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT date, total_sales_cents, order_count, average_ticket_cents, by_method
            FROM daily_summaries
            WHERE date = ?1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SummaryRow::into_summary).transpose()
    }

    /// Lists summaries with `start <= date <= end` (both inclusive, to
    /// match the 5th-to-4th billing period), oldest first.
    pub async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<DailySummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT date, total_sales_cents, order_count, average_ticket_cents, by_method
            FROM daily_summaries
            WHERE date >= ?1 AND date <= ?2
            ORDER BY date
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    /// Lists the whole history, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<DailySummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT date, total_sales_cents, order_count, average_ticket_cents, by_method
            FROM daily_summaries
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
