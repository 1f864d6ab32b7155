//! # Loss Recording
//!
//! Intentional write-offs of stock (spoilage, dropped skewers, expired
//! drinks). A loss costs the product's configured unit cost per unit,
//! snapshotted at recording time, and also removes the lost units from
//! the ledger.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use espeto_core::validation::{validate_product_name, validate_quantity};
use espeto_core::LossRecord;

use crate::error::{EngineError, EngineResult};
use crate::{day_bounds, today, PosEngine};

impl PosEngine {
    /// Records a loss of `quantity` units of a stocked product and
    /// deducts those units from the ledger (clamped at zero).
    pub async fn register_loss(&self, product: &str, quantity: i64) -> EngineResult<LossRecord> {
        validate_product_name(product)?;
        validate_quantity(quantity)?;

        let item = self
            .db()
            .stock()
            .get(product)
            .await?
            .ok_or_else(|| EngineError::not_found("StockItem", product))?;

        let record = LossRecord {
            id: Uuid::new_v4().to_string(),
            product: item.name.clone(),
            quantity,
            total_cost_cents: item.unit_cost_cents * quantity,
            recorded_at: Utc::now(),
        };
        self.db().losses().insert(&record).await?;
        self.db().stock().deduct_clamped(product, quantity).await?;

        info!(
            product,
            quantity,
            cost_cents = record.total_cost_cents,
            "Loss recorded"
        );
        Ok(record)
    }

    /// Lists today's loss records, oldest first.
    pub async fn losses_today(&self) -> EngineResult<Vec<LossRecord>> {
        let (start, end) = day_bounds(today());
        Ok(self.db().losses().list_between(start, end).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use espeto_core::StockItem;
    use espeto_db::{Database, DbConfig};

    async fn test_engine() -> PosEngine {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        PosEngine::new(db)
    }

    #[tokio::test]
    async fn test_register_loss_costs_and_deducts() {
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

        let record = engine.register_loss("Carne", 3).await.unwrap();

        // 3 units at R$4.00 cost each
        assert_eq!(record.total_cost_cents, 1200);
        assert_eq!(record.quantity, 3);

        let ledger = engine.list_stock().await.unwrap();
        assert_eq!(ledger[0].quantity, 7);

        let today_losses = engine.losses_today().await.unwrap();
        assert_eq!(today_losses.len(), 1);
        assert_eq!(today_losses[0], record);
    }

    #[tokio::test]
    async fn test_register_loss_unknown_product() {
        let engine = test_engine().await;
        let err = engine.register_loss("Inexistente", 1).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_register_loss_rejects_zero_quantity() {
        let engine = test_engine().await;
        let err = engine.register_loss("Carne", 0).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_loss_clamps_stock_at_zero() {
        let engine = test_engine().await;
        engine
            .configure_stock(vec![StockItem {
                name: "Frango".to_string(),
                quantity: 2,
                unit_cost_cents: 350,
                unit_sale_price_cents: 1000,
            }])
            .await
            .unwrap();

        let record = engine.register_loss("Frango", 5).await.unwrap();

        // Cost reflects the full declared loss even past the on-hand count
        assert_eq!(record.total_cost_cents, 1750);
        assert_eq!(engine.list_stock().await.unwrap()[0].quantity, 0);
    }
}
