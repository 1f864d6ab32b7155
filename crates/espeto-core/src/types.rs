//! # Domain Types
//!
//! Core domain types used throughout Espeto POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │     Order      │   │  ClosedOrder   │   │   StockItem    │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  id (seq ≥ 1)  │──►│  order_id      │   │  name (key)    │      │
//! │  │  customer      │   │  payment       │   │  quantity ≥ 0  │      │
//! │  │  lines         │   │  fee_cents     │   │  unit_cost     │      │
//! │  │  total (cache) │   │  closed_at     │   │  sale_price    │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │   LossRecord   │   │  DailySummary  │   │  FeeSchedule   │      │
//! │  │  append-only   │   │  one per date  │   │  bps per card  │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! An `Order` is created empty, mutated by line replacement, and terminated
//! either by the closing engine (becoming a `ClosedOrder`, append-only) or
//! by cancellation (discarded, no trace kept). `total_cents` is a derived
//! cache: every mutation of `lines` recomputes it in the same write.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::money::Money;

// =============================================================================
// Fee Rate
// =============================================================================

/// Payment-method fee rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 300 bps = 3.00% (a typical credit-card processor fee)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRate(u32);

impl FeeRate {
    /// Creates a fee rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        FeeRate(bps)
    }

    /// Creates a fee rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        FeeRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero fee rate.
    #[inline]
    pub const fn zero() -> Self {
        FeeRate(0)
    }

    /// Checks if the fee rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        FeeRate::zero()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a closed order was paid.
///
/// Cash and Tab ("fiado", pay-later) never carry a processor fee;
/// Pix, Debit and Credit use the configured [`FeeSchedule`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Pix instant transfer.
    Pix,
    /// Debit card on external terminal.
    Debit,
    /// Credit card on external terminal.
    Credit,
    /// On credit ("fiado") - settled later, no fee.
    Tab,
}

impl PaymentMethod {
    /// Stable string form, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Tab => "tab",
        }
    }

    /// Parses the stable string form back into a method.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "pix" => Some(PaymentMethod::Pix),
            "debit" => Some(PaymentMethod::Debit),
            "credit" => Some(PaymentMethod::Credit),
            "tab" => Some(PaymentMethod::Tab),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Fee Schedule
// =============================================================================

/// Configured fee percentage per card-like payment method.
///
/// Global singleton, no history. Cash and Tab are always fee-free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub debit_bps: u32,
    pub credit_bps: u32,
    pub pix_bps: u32,
}

impl FeeSchedule {
    /// Returns the fee rate for a payment method (zero when unfee'd).
    pub fn rate_for(&self, method: PaymentMethod) -> FeeRate {
        match method {
            PaymentMethod::Debit => FeeRate::from_bps(self.debit_bps),
            PaymentMethod::Credit => FeeRate::from_bps(self.credit_bps),
            PaymentMethod::Pix => FeeRate::from_bps(self.pix_bps),
            PaymentMethod::Cash | PaymentMethod::Tab => FeeRate::zero(),
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item on an open or closed order.
/// The unit price is snapshotted from the menu at add-time, so later
/// catalog changes never alter an existing tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product name (the natural key throughout the system).
    pub name: String,
    /// Unit price in centavos, frozen at add-time.
    pub unit_price_cents: i64,
    /// Quantity, always ≥ 1 once stored (0 is removed, never persisted).
    pub quantity: i64,
}

impl OrderLine {
    /// Returns `unit_price × quantity` for this line.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents * self.quantity)
    }
}

/// Sums `unit_price × quantity` over a line list.
///
/// Single source of truth for the `total_cents` cache on [`Order`].
pub fn total_from_lines(lines: &[OrderLine]) -> i64 {
    lines.iter().map(|l| l.unit_price_cents * l.quantity).sum()
}

// =============================================================================
// Order (open tab / "comanda")
// =============================================================================

/// An open tab associated with one customer visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Sequential number ≥ 1, assigned at creation, never reused within
    /// an operating day (numbering resets only at day reset).
    pub id: i64,
    /// Customer label shown on the tab card.
    pub customer: String,
    /// Line items, unique by product name.
    pub lines: Vec<OrderLine>,
    /// Derived cache: always equals [`total_from_lines`] over `lines`.
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the cached total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Recomputes the cached total from the current lines.
    pub fn recompute_total(&mut self) {
        self.total_cents = total_from_lines(&self.lines);
    }
}

// =============================================================================
// Closed Order
// =============================================================================

/// An order finalized against a payment method, fee-annotated,
/// permanently logged. Append-only once created; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedOrder {
    /// Row id (UUID v4) - the order number repeats across days, this doesn't.
    pub id: String,
    /// The sequential order number the tab carried while open.
    pub order_id: i64,
    pub customer: String,
    pub lines: Vec<OrderLine>,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    /// `total × feeSchedule[method] / 100`, 0 when the method has no fee.
    pub fee_cents: i64,
    pub closed_at: DateTime<Utc>,
}

impl ClosedOrder {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the applied fee as Money.
    #[inline]
    pub fn fee(&self) -> Money {
        Money::from_cents(self.fee_cents)
    }
}

// =============================================================================
// Stock Item
// =============================================================================

/// One entry in the stock ledger, keyed by product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    /// Product name, matches a menu item name.
    pub name: String,
    /// Quantity on hand, clamped at 0, never negative.
    pub quantity: i64,
    /// Unit cost in centavos (used for loss and profit computations).
    pub unit_cost_cents: i64,
    /// Unit sale price in centavos (mirrors the catalog at configure time).
    pub unit_sale_price_cents: i64,
}

impl StockItem {
    /// Returns the unit cost as Money.
    #[inline]
    pub fn unit_cost(&self) -> Money {
        Money::from_cents(self.unit_cost_cents)
    }
}

// =============================================================================
// Loss Record
// =============================================================================

/// An intentional stock write-off (spoilage, waste) outside of a sale.
/// Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossRecord {
    /// UUID v4, time-ordered by `recorded_at`.
    pub id: String,
    pub product: String,
    /// Quantity lost, ≥ 1.
    pub quantity: i64,
    /// `unit_cost(product) × quantity` at the moment of loss.
    pub total_cost_cents: i64,
    pub recorded_at: DateTime<Utc>,
}

impl LossRecord {
    /// Returns the total cost as Money.
    #[inline]
    pub fn total_cost(&self) -> Money {
        Money::from_cents(self.total_cost_cents)
    }
}

// =============================================================================
// Daily Summary
// =============================================================================

/// Per-method slice of a daily summary (count and gross value; the
/// summary does not retain fee detail).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotals {
    pub orders: i64,
    pub value_cents: i64,
}

/// One operating day folded into permanent history by the day reset.
/// At most one summary exists per date; re-running the rollup on the
/// same date overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar day key.
    pub date: NaiveDate,
    pub total_sales_cents: i64,
    pub order_count: i64,
    pub average_ticket_cents: i64,
    pub by_method: BTreeMap<PaymentMethod, MethodTotals>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, price: i64, qty: i64) -> OrderLine {
        OrderLine {
            name: name.to_string(),
            unit_price_cents: price,
            quantity: qty,
        }
    }

    #[test]
    fn test_total_from_lines() {
        let lines = vec![line("Carne", 1100, 2), line("Coca-Cola 350ml", 600, 1)];
        assert_eq!(total_from_lines(&lines), 2800);
        assert_eq!(total_from_lines(&[]), 0);
    }

    #[test]
    fn test_order_recompute_total() {
        let mut order = Order {
            id: 1,
            customer: "Ana".to_string(),
            lines: vec![],
            total_cents: 0,
            created_at: Utc::now(),
        };
        order.lines.push(line("Frango", 1000, 3));
        order.recompute_total();
        assert_eq!(order.total_cents, 3000);
        assert_eq!(order.total().cents(), 3000);
    }

    #[test]
    fn test_fee_schedule_unfeed_methods() {
        let schedule = FeeSchedule {
            debit_bps: 150,
            credit_bps: 300,
            pix_bps: 99,
        };

        assert_eq!(schedule.rate_for(PaymentMethod::Debit).bps(), 150);
        assert_eq!(schedule.rate_for(PaymentMethod::Credit).bps(), 300);
        assert_eq!(schedule.rate_for(PaymentMethod::Pix).bps(), 99);
        assert!(schedule.rate_for(PaymentMethod::Cash).is_zero());
        assert!(schedule.rate_for(PaymentMethod::Tab).is_zero());
    }

    #[test]
    fn test_payment_method_round_trip() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Pix,
            PaymentMethod::Debit,
            PaymentMethod::Credit,
            PaymentMethod::Tab,
        ] {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("cheque"), None);
    }

    #[test]
    fn test_fee_rate_from_percentage() {
        assert_eq!(FeeRate::from_percentage(3.0).bps(), 300);
        assert_eq!(FeeRate::from_percentage(1.5).bps(), 150);
        assert!((FeeRate::from_bps(300).percentage() - 3.0).abs() < 0.001);
    }
}
