//! # Stock Operations
//!
//! Configuring and maintaining the stock ledger. Configuration is a
//! destructive replace: the operator hands over the full list and it
//! becomes the ledger, which also flips the stock-configured flag used
//! by frontends to decide whether to show the setup screen.

use tracing::info;

use espeto_core::validation::{
    validate_price_cents, validate_product_name, validate_quantity, validate_stock_quantity,
};
use espeto_core::StockItem;

use crate::error::{EngineError, EngineResult};
use crate::PosEngine;

/// Quantity under which an item counts as running low.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

impl PosEngine {
    /// Replaces the whole stock ledger and marks stock as configured.
    pub async fn configure_stock(&self, items: Vec<StockItem>) -> EngineResult<()> {
        for item in &items {
            validate_product_name(&item.name)?;
            validate_stock_quantity(item.quantity)?;
            validate_price_cents(item.unit_cost_cents)?;
            validate_price_cents(item.unit_sale_price_cents)?;
        }

        self.db().stock().replace_all(&items).await?;
        self.db().settings().set_stock_configured(true).await?;

        info!(items = items.len(), "Stock ledger configured");
        Ok(())
    }

    /// Whether the operator has configured the stock ledger yet.
    pub async fn stock_configured(&self) -> EngineResult<bool> {
        Ok(self.db().settings().stock_configured().await?)
    }

    /// The whole stock ledger, ordered by product name.
    pub async fn list_stock(&self) -> EngineResult<Vec<StockItem>> {
        Ok(self.db().stock().list_all().await?)
    }

    /// Ledger entries running low (quantity under [`LOW_STOCK_THRESHOLD`]).
    pub async fn low_stock(&self) -> EngineResult<Vec<StockItem>> {
        Ok(self.db().stock().below_threshold(LOW_STOCK_THRESHOLD).await?)
    }

    /// Adds units to an existing ledger entry.
    pub async fn restock(&self, product: &str, quantity: i64) -> EngineResult<()> {
        validate_quantity(quantity)?;

        self.db()
            .stock()
            .add_quantity(product, quantity)
            .await
            .map_err(|err| match err {
                espeto_db::DbError::NotFound { .. } => {
                    EngineError::not_found("StockItem", product)
                }
                other => EngineError::Db(other),
            })?;

        info!(product, added = quantity, "Restocked");
        Ok(())
    }

    /// Sets the unit cost used for loss and profit computations.
    pub async fn set_unit_cost(&self, product: &str, unit_cost_cents: i64) -> EngineResult<()> {
        validate_price_cents(unit_cost_cents)?;

        self.db()
            .stock()
            .set_unit_cost(product, unit_cost_cents)
            .await
            .map_err(|err| match err {
                espeto_db::DbError::NotFound { .. } => {
                    EngineError::not_found("StockItem", product)
                }
                other => EngineError::Db(other),
            })?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
