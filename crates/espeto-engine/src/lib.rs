//! # espeto-engine: Operation Layer
//!
//! Sequenced operations over the database plus pure computation from
//! espeto-core. One [`PosEngine`] per running terminal.
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           PosEngine                                 │
//! │                                                                     │
//! │  orders.rs     open_order · set_order_lines · cancel_order         │
//! │  closing.rs    close_order · fee_schedule · set_fee_schedule       │
//! │  stock.rs      configure_stock · restock · set_unit_cost ·         │
//! │                list_stock · low_stock                              │
//! │  losses.rs     register_loss · losses_today                        │
//! │  day_reset.rs  reset_day (rollup + purge + counter reset)          │
//! │  metrics.rs    today_metrics · billing_month_metrics · history     │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operating Day
//! The operating day is the UTC calendar day. Every "today" read and the
//! day reset derive the same half-open `[00:00, next 00:00)` window from
//! [`day_bounds`], so they always agree on which records belong to today.

pub mod closing;
pub mod day_reset;
pub mod error;
pub mod losses;
pub mod metrics;
pub mod orders;
pub mod stock;

pub use error::{EngineError, EngineResult};

use chrono::{DateTime, Days, NaiveDate, Utc};

use espeto_core::Catalog;
use espeto_db::Database;

// =============================================================================
// Engine
// =============================================================================

/// The POS operation engine. Cheap to clone; all clones share the same
/// database pool.
#[derive(Debug, Clone)]
pub struct PosEngine {
    db: Database,
    catalog: Catalog,
}

impl PosEngine {
    /// Creates an engine over an open database, using the food-stand
    /// catalog.
    pub fn new(db: Database) -> Self {
        PosEngine {
            db,
            catalog: Catalog::food_stand(),
        }
    }

    /// Creates an engine with a custom catalog.
    pub fn with_catalog(db: Database, catalog: Catalog) -> Self {
        PosEngine { db, catalog }
    }

    /// The menu catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The underlying database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }
}

// =============================================================================
// Operating-Day Helpers
// =============================================================================

/// The half-open UTC window `[date 00:00, date+1 00:00)`.
pub(crate) fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    let end = date
        .checked_add_days(Days::new(1))
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc();
    (start, end)
}

/// Today's UTC calendar date.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds_are_midnight_to_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        let (start, end) = day_bounds(date);

        assert_eq!(start.to_rfc3339(), "2026-08-20T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-08-21T00:00:00+00:00");
    }
}
