//! # Settings Repository
//!
//! The two singleton rows: operational settings (order-number counter,
//! stock-configured flag) and the payment-fee schedule. Both rows are
//! seeded by the initial migration, so every read hits exactly one row.

use sqlx::SqlitePool;
use tracing::debug;

use espeto_core::FeeSchedule;

use crate::error::DbResult;

// =============================================================================
// Row Type
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct FeeScheduleRow {
    debit_bps: u32,
    credit_bps: u32,
    pix_bps: u32,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the settings and fee-schedule singletons.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Returns the next order number without consuming it.
    pub async fn next_order_number(&self) -> DbResult<i64> {
        let number = sqlx::query_scalar::<_, i64>(
            "SELECT next_order_number FROM settings WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(number)
    }

    /// Consumes and returns the next order number. The increment and the
    /// read happen in one statement, so two concurrent opens can never
    /// receive the same number.
    pub async fn allocate_order_number(&self) -> DbResult<i64> {
        let allocated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE settings
            SET next_order_number = next_order_number + 1
            WHERE id = 1
            RETURNING next_order_number - 1
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        debug!(order_number = allocated, "Allocated order number");
        Ok(allocated)
    }

    /// Resets the order-number counter to 1 (part of the day reset).
    pub async fn reset_order_number(&self) -> DbResult<()> {
        sqlx::query("UPDATE settings SET next_order_number = 1 WHERE id = 1")
            .execute(&self.pool)
            .await?;

        debug!("Order-number counter reset to 1");
        Ok(())
    }

    /// Returns whether the operator has configured the stock ledger.
    pub async fn stock_configured(&self) -> DbResult<bool> {
        let flag = sqlx::query_scalar::<_, i64>(
            "SELECT stock_configured FROM settings WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(flag != 0)
    }

    /// Sets the stock-configured flag.
    pub async fn set_stock_configured(&self, configured: bool) -> DbResult<()> {
        sqlx::query("UPDATE settings SET stock_configured = ?1 WHERE id = 1")
            .bind(configured as i64)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns the configured fee schedule.
    pub async fn fee_schedule(&self) -> DbResult<FeeSchedule> {
        let row = sqlx::query_as::<_, FeeScheduleRow>(
            "SELECT debit_bps, credit_bps, pix_bps FROM fee_schedule WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(FeeSchedule {
            debit_bps: row.debit_bps,
            credit_bps: row.credit_bps,
            pix_bps: row.pix_bps,
        })
    }

    /// Replaces the fee schedule. Takes effect for closings from now on;
    /// already-closed orders keep the fee they were stamped with.
    pub async fn set_fee_schedule(&self, schedule: &FeeSchedule) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE fee_schedule
            SET debit_bps = ?1, credit_bps = ?2, pix_bps = ?3
            WHERE id = 1
            "#,
        )
        .bind(schedule.debit_bps)
        .bind(schedule.credit_bps)
        .bind(schedule.pix_bps)
        .execute(&self.pool)
        .await?;

        debug!(
            debit_bps = schedule.debit_bps,
            credit_bps = schedule.credit_bps,
            pix_bps = schedule.pix_bps,
            "Fee schedule updated"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
