//! # espeto-db: Database Layer
//!
//! SQLite persistence for Espeto POS.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          espeto-db                                  │
//! │                                                                     │
//! │  ┌─────────────┐    ┌─────────────────────────────────────────┐    │
//! │  │  Database   │───►│              Repositories               │    │
//! │  │  (pool.rs)  │    │                                         │    │
//! │  └─────────────┘    │  orders · closed_orders · stock         │    │
//! │        │            │  losses · history · settings            │    │
//! │        ▼            └─────────────────────────────────────────┘    │
//! │  ┌─────────────┐                                                   │
//! │  │ Migrations  │  embedded SQL, applied on connect                 │
//! │  └─────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use espeto_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("espeto.db")).await?;
//! let open_tabs = db.orders().list_all().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{
    ClosedOrderRepository, HistoryRepository, LossRepository, OrderRepository,
    SettingsRepository, StockRepository,
};
