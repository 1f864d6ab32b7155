//! # Tab Closing
//!
//! Finalizing a tab against a payment method. The sequence is:
//!
//! 1. Stamp the fee from the schedule as it stands right now
//! 2. Append the closed order to the permanent log
//! 3. Deduct sold quantities from the stock ledger (clamped at zero)
//! 4. Delete the open tab
//!
//! The log append comes first: if a later step fails, the sale is
//! already recorded and the operator retries the cheap part, instead of
//! a recorded-nowhere sale.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use espeto_core::validation::validate_fee_bps;
use espeto_core::{ClosedOrder, FeeSchedule, Money, PaymentMethod};

use crate::error::EngineResult;
use crate::PosEngine;

impl PosEngine {
    /// Closes an open tab against a payment method.
    ///
    /// The fee is computed from the schedule configured at this moment
    /// and stamped onto the closed order; later schedule changes never
    /// rewrite history. Stock deductions clamp at zero, so overselling
    /// empties a ledger entry instead of failing the close.
    pub async fn close_order(
        &self,
        id: i64,
        payment_method: PaymentMethod,
    ) -> EngineResult<ClosedOrder> {
        let order = self.get_order(id).await?;

        let schedule = self.db().settings().fee_schedule().await?;
        let rate = schedule.rate_for(payment_method);
        let fee = Money::from_cents(order.total_cents).apply_fee(rate);

        let closed = ClosedOrder {
            id: Uuid::new_v4().to_string(),
            order_id: order.id,
            customer: order.customer.clone(),
            lines: order.lines.clone(),
            total_cents: order.total_cents,
            created_at: order.created_at,
            payment_method,
            fee_cents: fee.cents(),
            closed_at: Utc::now(),
        };
        self.db().closed_orders().insert(&closed).await?;

        for line in &order.lines {
            self.db()
                .stock()
                .deduct_clamped(&line.name, line.quantity)
                .await?;
        }

        if let Err(err) = self.db().orders().delete(id).await {
            // The sale is already logged; a stale open tab is recoverable.
            warn!(order_id = id, error = %err, "Closed tab could not be removed from open list");
        }

        info!(
            order_id = id,
            method = %payment_method,
            total_cents = closed.total_cents,
            fee_cents = closed.fee_cents,
            "Closed tab"
        );
        Ok(closed)
    }

    /// The configured payment-fee schedule.
    pub async fn fee_schedule(&self) -> EngineResult<FeeSchedule> {
        Ok(self.db().settings().fee_schedule().await?)
    }

    /// Replaces the payment-fee schedule. Applies to closings from now
    /// on only.
    pub async fn set_fee_schedule(&self, schedule: FeeSchedule) -> EngineResult<()> {
        validate_fee_bps(schedule.debit_bps)?;
        validate_fee_bps(schedule.credit_bps)?;
        validate_fee_bps(schedule.pix_bps)?;

        self.db().settings().set_fee_schedule(&schedule).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
