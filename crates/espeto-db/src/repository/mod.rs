//! # Repository Modules
//!
//! Repository pattern implementation for database access.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Repository Layer                                 │
//! │                                                                     │
//! │  Database (pool.rs)                                                 │
//! │       │                                                             │
//! │       ├──► OrderRepository        (open tabs)                       │
//! │       ├──► ClosedOrderRepository  (finalized tabs, append-only)     │
//! │       ├──► StockRepository        (stock ledger)                    │
//! │       ├──► LossRepository         (write-offs, append-only)         │
//! │       ├──► HistoryRepository      (daily summaries)                 │
//! │       └──► SettingsRepository     (counter, flags, fee schedule)    │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository owns the SQL for one record family and converts rows
//! into espeto-core domain types at the boundary. Multi-table sequences
//! (closing a tab, day reset) belong to espeto-engine.

pub mod closed_order;
pub mod history;
pub mod loss;
pub mod order;
pub mod settings;
pub mod stock;

pub use closed_order::ClosedOrderRepository;
pub use history::HistoryRepository;
pub use loss::LossRepository;
pub use order::OrderRepository;
pub use settings::SettingsRepository;
pub use stock::StockRepository;
