//! # espeto-core: Pure Business Logic for Espeto POS
//!
//! This crate is the **heart** of Espeto POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Espeto POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  UI / Presentation Layer                      │ │
//! │  │   Tab screens ──► Closing dialog ──► Dashboard ──► Reports    │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                  espeto-engine (operations)                   │ │
//! │  │   open/close orders, losses, stock, day reset, metrics       │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │              ★ espeto-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌────────┐ │ │
//! │  │   │  types  │ │  money  │ │  menu   │ │ metrics │ │validate│ │ │
//! │  │   │ Order   │ │  Money  │ │ Catalog │ │ day/    │ │ rules  │ │ │
//! │  │   │ Stock   │ │ FeeRate │ │ reverse │ │ month   │ │ checks │ │ │
//! │  │   │ Loss    │ │         │ │ index   │ │ rollup  │ │        │ │ │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └────────┘ │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                  espeto-db (SQLite storage)                   │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, ClosedOrder, StockItem, LossRecord, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`menu`] - Static menu catalog with a name → category reverse index
//! - [`metrics`] - Day and billing-month aggregation (pure)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: database, network and file system access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are centavos (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod menu;
pub mod metrics;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use menu::{Catalog, MenuCategory, MenuItem};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item on an order.
///
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum length of a customer label on an open tab.
pub const MAX_CUSTOMER_LEN: usize = 100;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
