//! # Day Reset
//!
//! Ends the operating day: folds today's closed orders into a permanent
//! daily summary, purges the folded records and today's losses, and
//! restarts tab numbering at 1.
//!
//! ## Idempotence
//! Running the reset twice is safe. The first run moves today's closed
//! orders into the summary and deletes them; the second run finds no
//! closed orders, writes no summary, deletes nothing, and only resets
//! the (already reset) counter. The summary upsert keys on the date, so
//! even a day with late extra sales ends up with exactly one row.

use tracing::info;

use espeto_core::metrics::summarize_day;
use espeto_core::DailySummary;

use crate::error::EngineResult;
use crate::{day_bounds, today, PosEngine};

impl PosEngine {
    /// Performs the day reset. Returns the summary written to history,
    /// or `None` when today had no closed orders (nothing to fold).
    ///
    /// Open tabs survive the reset; only finalized records are folded
    /// and purged.
    pub async fn reset_day(&self) -> EngineResult<Option<DailySummary>> {
        let date = today();
        let (start, end) = day_bounds(date);

        let closed = self.db().closed_orders().list_between(start, end).await?;

        let summary = if closed.is_empty() {
            None
        } else {
            let summary = summarize_day(date, &closed);
            self.db().history().upsert(&summary).await?;
            Some(summary)
        };

        let purged_orders = self.db().closed_orders().delete_between(start, end).await?;
        let purged_losses = self.db().losses().delete_between(start, end).await?;
        self.db().settings().reset_order_number().await?;

        info!(
            date = %date,
            folded = closed.len(),
            purged_orders,
            purged_losses,
            "Day reset complete"
        );
        Ok(summary)
    }

    /// The full daily history, newest first.
    pub async fn daily_history(&self) -> EngineResult<Vec<DailySummary>> {
        Ok(self.db().history().list_all().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use espeto_core::{OrderLine, PaymentMethod, StockItem};
    use espeto_db::{Database, DbConfig};

    async fn test_engine() -> PosEngine {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        PosEngine::new(db)
    }

    fn line(name: &str, price: i64, qty: i64) -> OrderLine {
        OrderLine {
            name: name.to_string(),
            unit_price_cents: price,
            quantity: qty,
        }
    }

    async fn sell(engine: &PosEngine, lines: Vec<OrderLine>, method: PaymentMethod) {
        let order = engine.open_order("Cliente").await.unwrap();
        engine.set_order_lines(order.id, lines).await.unwrap();
        engine.close_order(order.id, method).await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_day_folds_and_purges() {
        let engine = test_engine().await;
        engine
            .configure_stock(vec![StockItem {
                name: "Carne".to_string(),
                quantity: 10,
                unit_cost_cents: 400,
                unit_sale_price_cents: 1100,
            }])
            .await
            .unwrap();

        sell(&engine, vec![line("Carne", 1100, 2)], PaymentMethod::Pix).await;
        sell(&engine, vec![line("Carne", 1100, 1)], PaymentMethod::Cash).await;
        engine.register_loss("Carne", 1).await.unwrap();

        let summary = engine.reset_day().await.unwrap().unwrap();

        assert_eq!(summary.total_sales_cents, 3300);
        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.by_method[&PaymentMethod::Pix].value_cents, 2200);

        // Today's records are gone, the summary persists
        assert!(engine.closed_orders_today().await.unwrap().is_empty());
        assert!(engine.losses_today().await.unwrap().is_empty());
        let history = engine.daily_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], summary);
    }

    #[tokio::test]
    async fn test_reset_day_restarts_numbering() {
        let engine = test_engine().await;

        let first = engine.open_order("Ana").await.unwrap();
        assert_eq!(first.id, 1);
        engine.close_order(first.id, PaymentMethod::Cash).await.unwrap();

        engine.reset_day().await.unwrap();

        let next = engine.open_order("Bruno").await.unwrap();
        assert_eq!(next.id, 1);
    }

    #[tokio::test]
    async fn test_reset_day_is_idempotent() {
        let engine = test_engine().await;
        sell(&engine, vec![line("Frango", 1000, 2)], PaymentMethod::Debit).await;

        let first = engine.reset_day().await.unwrap();
        let second = engine.reset_day().await.unwrap();

        assert!(first.is_some());
        assert!(second.is_none());

        let history = engine.daily_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].total_sales_cents, 2000);
    }

    #[tokio::test]
    async fn test_reset_day_keeps_open_tabs() {
        let engine = test_engine().await;
        let open = engine.open_order("Ana").await.unwrap();
        engine
            .set_order_lines(open.id, vec![line("Carne", 1100, 1)])
            .await
            .unwrap();

        let summary = engine.reset_day().await.unwrap();
        assert!(summary.is_none());

        let remaining = engine.list_open_orders().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, open.id);
    }
}
