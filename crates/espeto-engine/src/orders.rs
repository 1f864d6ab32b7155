//! # Open-Tab Operations
//!
//! Opening, mutating and cancelling tabs. A tab's line list is replaced
//! wholesale on every change; the stored total is recomputed in the same
//! write, so the cache can never drift from the lines.

use chrono::Utc;
use tracing::info;

use espeto_core::validation::{validate_customer, validate_quantity};
use espeto_core::{total_from_lines, Order, OrderLine};

use crate::error::{EngineError, EngineResult};
use crate::PosEngine;

impl PosEngine {
    /// Opens a new tab for a customer and returns it with its sequential
    /// number. Numbers restart at 1 after each day reset.
    pub async fn open_order(&self, customer: &str) -> EngineResult<Order> {
        validate_customer(customer)?;

        let number = self.db().settings().allocate_order_number().await?;
        let order = Order {
            id: number,
            customer: customer.trim().to_string(),
            lines: Vec::new(),
            total_cents: 0,
            created_at: Utc::now(),
        };
        self.db().orders().insert(&order).await?;

        info!(order_id = number, customer = %order.customer, "Opened tab");
        Ok(order)
    }

    /// Fetches one open tab.
    pub async fn get_order(&self, id: i64) -> EngineResult<Order> {
        self.db()
            .orders()
            .get(id)
            .await?
            .ok_or_else(|| EngineError::not_found("Order", id.to_string()))
    }

    /// Lists all open tabs, ordered by number.
    pub async fn list_open_orders(&self) -> EngineResult<Vec<Order>> {
        Ok(self.db().orders().list_all().await?)
    }

    /// Replaces a tab's line list.
    ///
    /// Lines with quantity ≤ 0 are dropped (that is how an item is
    /// removed), duplicate names are merged into the first occurrence,
    /// and the stored total is recomputed from the result. Returns the
    /// tab as persisted.
    pub async fn set_order_lines(&self, id: i64, lines: Vec<OrderLine>) -> EngineResult<Order> {
        let mut merged: Vec<OrderLine> = Vec::new();
        for line in lines {
            if line.quantity <= 0 {
                continue;
            }
            match merged.iter_mut().find(|l| l.name == line.name) {
                Some(existing) => existing.quantity += line.quantity,
                None => merged.push(line),
            }
        }
        for line in &merged {
            validate_quantity(line.quantity)?;
        }

        let mut order = self.get_order(id).await?;
        let total_cents = total_from_lines(&merged);
        self.db()
            .orders()
            .update_lines(id, &merged, total_cents)
            .await?;

        order.lines = merged;
        order.total_cents = total_cents;
        Ok(order)
    }

    /// Cancels an open tab, discarding it without trace.
    pub async fn cancel_order(&self, id: i64) -> EngineResult<()> {
        self.db().orders().delete(id).await.map_err(|err| match err {
            espeto_db::DbError::NotFound { .. } => {
                EngineError::not_found("Order", id.to_string())
            }
            other => EngineError::Db(other),
        })?;

        info!(order_id = id, "Cancelled tab");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
