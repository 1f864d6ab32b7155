//! # Development Database Seeder
//!
//! Creates (or resets) a local database with the food-stand catalog
//! loaded into the stock ledger and a typical card-fee schedule, so a
//! development build starts from a realistic state.
//!
//! ## Usage
//! ```bash
//! cargo run --bin seed                    # seeds ./espeto.db
//! cargo run --bin seed -- /tmp/dev.db     # seeds a custom path
//! ```

use espeto_core::{Catalog, FeeSchedule, StockItem};
use espeto_db::{Database, DbConfig, DbError};

const DEFAULT_DB_PATH: &str = "espeto.db";
const SEED_QUANTITY: i64 = 50;

#[tokio::main]
async fn main() -> Result<(), DbError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    println!("Seeding database at {path}");

    let db = Database::new(DbConfig::new(&path)).await?;

    // Typical Brazilian card-terminal fees: 1.5% debit, 3% credit, free Pix.
    let schedule = FeeSchedule {
        debit_bps: 150,
        credit_bps: 300,
        pix_bps: 0,
    };
    db.settings().set_fee_schedule(&schedule).await?;
    println!(
        "Fee schedule: debit {:.1}% / credit {:.1}% / pix {:.1}%",
        schedule.debit_bps as f64 / 100.0,
        schedule.credit_bps as f64 / 100.0,
        schedule.pix_bps as f64 / 100.0,
    );

    // Stock ledger from the catalog; unit costs start at zero and are
    // set per product by the operator.
    let catalog = Catalog::food_stand();
    let items: Vec<StockItem> = catalog
        .items()
        .map(|item| StockItem {
            name: item.name.clone(),
            quantity: SEED_QUANTITY,
            unit_cost_cents: 0,
            unit_sale_price_cents: item.price_cents,
        })
        .collect();

    db.stock().replace_all(&items).await?;
    db.settings().set_stock_configured(true).await?;
    println!(
        "Stock ledger: {} products at {} units each",
        items.len(),
        SEED_QUANTITY
    );

    db.close().await;
    println!("Done.");
    Ok(())
}
