//! # Metrics Aggregation
//!
//! Pure read-side computation: "today" and "billing month" aggregates,
//! plus the daily rollup used by the day reset. No mutation anywhere;
//! everything here is re-derivable at any time from the current records.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Where the numbers come from                     │
//! │                                                                     │
//! │  live ClosedOrders ──┬──► day_metrics()      (today dashboard)     │
//! │  (today only)        │                                              │
//! │                      └──► summarize_day()    (day-reset rollup)    │
//! │                                                                     │
//! │  live ClosedOrders + DailySummary history + LossRecords + stock    │
//! │                      ────► month_metrics()   (billing-month report)│
//! │                                                                     │
//! │  Billing month = 5th of one month through the 4th of the next.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller (espeto-engine) filters records to the relevant date range;
//! the functions here only aggregate what they are given.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::menu::{Catalog, MenuCategory};
use crate::types::{ClosedOrder, DailySummary, LossRecord, MethodTotals, PaymentMethod, StockItem};

// =============================================================================
// Breakdown Types
// =============================================================================

/// Per-payment-method slice of a metrics report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBreakdown {
    pub orders: i64,
    pub value_cents: i64,
    /// Fees are only known for live closed orders; rolled-up history
    /// contributes orders and value but no fee detail.
    pub fee_cents: i64,
}

/// Per-category slice of the day report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub quantity: i64,
    pub value_cents: i64,
}

/// One row of a products-by-quantity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
    pub value_cents: i64,
}

// =============================================================================
// Day Metrics
// =============================================================================

/// Aggregates for the current operating day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMetrics {
    pub total_sales_cents: i64,
    pub total_fees_cents: i64,
    pub order_count: i64,
    /// `total_sales / order_count`, 0 when the count is 0.
    pub average_ticket_cents: i64,
    pub by_method: BTreeMap<PaymentMethod, MethodBreakdown>,
    pub by_category: BTreeMap<MenuCategory, CategoryTotals>,
    /// Top 10 products by quantity sold; ties keep first-seen order.
    pub top_products: Vec<ProductSales>,
}

/// Computes the day dashboard from the day's closed orders.
///
/// A day with zero closed orders yields all-zero totals and empty
/// breakdowns - never a division error.
pub fn day_metrics(closed: &[ClosedOrder], catalog: &Catalog) -> DayMetrics {
    let mut total_sales = 0i64;
    let mut total_fees = 0i64;
    let mut by_method: BTreeMap<PaymentMethod, MethodBreakdown> = BTreeMap::new();
    let mut by_category: BTreeMap<MenuCategory, CategoryTotals> = BTreeMap::new();

    for order in closed {
        total_sales += order.total_cents;
        total_fees += order.fee_cents;

        let slot = by_method.entry(order.payment_method).or_default();
        slot.orders += 1;
        slot.value_cents += order.total_cents;
        slot.fee_cents += order.fee_cents;

        for line in &order.lines {
            let slot = by_category.entry(catalog.category_of(&line.name)).or_default();
            slot.quantity += line.quantity;
            slot.value_cents += line.line_total().cents();
        }
    }

    let order_count = closed.len() as i64;
    let mut top_products = rank_products(closed);
    top_products.truncate(10);

    DayMetrics {
        total_sales_cents: total_sales,
        total_fees_cents: total_fees,
        order_count,
        average_ticket_cents: average_ticket(total_sales, order_count),
        by_method,
        by_category,
        top_products,
    }
}

// =============================================================================
// Daily Rollup
// =============================================================================

/// Folds one day's closed orders into the summary row the day reset
/// persists. The per-method breakdown keeps count and gross value only
/// (no fee detail survives the rollup).
pub fn summarize_day(date: NaiveDate, closed: &[ClosedOrder]) -> DailySummary {
    let mut total_sales = 0i64;
    let mut by_method: BTreeMap<PaymentMethod, MethodTotals> = BTreeMap::new();

    for order in closed {
        total_sales += order.total_cents;
        let slot = by_method.entry(order.payment_method).or_default();
        slot.orders += 1;
        slot.value_cents += order.total_cents;
    }

    let order_count = closed.len() as i64;

    DailySummary {
        date,
        total_sales_cents: total_sales,
        order_count,
        average_ticket_cents: average_ticket(total_sales, order_count),
        by_method,
    }
}

// =============================================================================
// Billing Period
// =============================================================================

/// The 5th-to-4th rolling period used for monthly reporting,
/// independent of calendar months. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Checks whether a date falls inside the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Computes the billing period containing `today`.
///
/// Day-of-month ≥ 5 → [5th of this month, 4th of next month];
/// otherwise → [5th of the previous month, 4th of this month].
pub fn billing_period(today: NaiveDate) -> BillingPeriod {
    let anchor = if today.day() >= 5 {
        today
    } else {
        today - Months::new(1)
    };

    // Day 5 and day 4 exist in every month, so with_day cannot fail here;
    // the fallbacks only keep the function total.
    let start = anchor.with_day(5).unwrap_or(anchor);
    let next = anchor + Months::new(1);
    let end = next.with_day(4).unwrap_or(next);

    BillingPeriod { start, end }
}

// =============================================================================
// Billing-Month Metrics
// =============================================================================

/// Aggregates for the current billing month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthMetrics {
    pub period: BillingPeriod,
    /// Live in-range closed orders plus in-range daily summaries.
    pub total_sales_cents: i64,
    pub order_count: i64,
    /// `total_sales / order_count`, 0 when the count is 0.
    pub average_ticket_cents: i64,
    /// From live closed orders only - summaries do not retain fees.
    pub total_fees_cents: i64,
    /// From live loss records in range.
    pub total_losses_cents: i64,
    /// Σ unit_cost × quantity over live in-range line items; products no
    /// longer in the stock ledger contribute zero cost.
    pub total_cost_cents: i64,
    /// `total_sales − total_fees − total_cost − total_losses`.
    pub net_profit_cents: i64,
    pub by_method: BTreeMap<PaymentMethod, MethodBreakdown>,
    /// Products-by-quantity ranking over live in-range orders.
    pub products_sold: Vec<ProductSales>,
    /// The in-range summary rows, for the report's per-day table.
    pub daily_history: Vec<DailySummary>,
}

/// Computes the billing-month report.
///
/// Inputs must already be filtered to the period. Live orders and the
/// daily history are a disjoint union by construction: the day reset
/// removes a day's closed orders in the same operation that writes its
/// summary, so a day is never counted twice.
pub fn month_metrics(
    period: BillingPeriod,
    live: &[ClosedOrder],
    history: &[DailySummary],
    losses: &[LossRecord],
    stock: &[StockItem],
) -> MonthMetrics {
    let mut total_sales = 0i64;
    let mut total_fees = 0i64;
    let mut order_count = live.len() as i64;
    let mut by_method: BTreeMap<PaymentMethod, MethodBreakdown> = BTreeMap::new();

    for order in live {
        total_sales += order.total_cents;
        total_fees += order.fee_cents;

        let slot = by_method.entry(order.payment_method).or_default();
        slot.orders += 1;
        slot.value_cents += order.total_cents;
        slot.fee_cents += order.fee_cents;
    }

    for summary in history {
        total_sales += summary.total_sales_cents;
        order_count += summary.order_count;

        for (method, totals) in &summary.by_method {
            let slot = by_method.entry(*method).or_default();
            slot.orders += totals.orders;
            slot.value_cents += totals.value_cents;
        }
    }

    let total_losses: i64 = losses.iter().map(|l| l.total_cost_cents).sum();

    let cost_index: HashMap<&str, i64> = stock
        .iter()
        .map(|item| (item.name.as_str(), item.unit_cost_cents))
        .collect();
    let total_cost: i64 = live
        .iter()
        .flat_map(|order| order.lines.iter())
        .map(|line| cost_index.get(line.name.as_str()).copied().unwrap_or(0) * line.quantity)
        .sum();

    MonthMetrics {
        period,
        total_sales_cents: total_sales,
        order_count,
        average_ticket_cents: average_ticket(total_sales, order_count),
        total_fees_cents: total_fees,
        total_losses_cents: total_losses,
        total_cost_cents: total_cost,
        net_profit_cents: total_sales - total_fees - total_cost - total_losses,
        by_method,
        products_sold: rank_products(live),
        daily_history: history.to_vec(),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Ranks products by quantity sold, descending. The aggregation walks
/// line items in order, and the sort is stable, so ties keep the order
/// a product was first seen in.
fn rank_products(orders: &[ClosedOrder]) -> Vec<ProductSales> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut ranked: Vec<ProductSales> = Vec::new();

    for order in orders {
        for line in &order.lines {
            let idx = *slots.entry(line.name.clone()).or_insert_with(|| {
                ranked.push(ProductSales {
                    name: line.name.clone(),
                    quantity: 0,
                    value_cents: 0,
                });
                ranked.len() - 1
            });
            ranked[idx].quantity += line.quantity;
            ranked[idx].value_cents += line.line_total().cents();
        }
    }

    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked
}

fn average_ticket(total_sales: i64, order_count: i64) -> i64 {
    if order_count > 0 {
        total_sales / order_count
    } else {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderLine;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(name: &str, price: i64, qty: i64) -> OrderLine {
        OrderLine {
            name: name.to_string(),
            unit_price_cents: price,
            quantity: qty,
        }
    }

    fn closed(
        order_id: i64,
        lines: Vec<OrderLine>,
        method: PaymentMethod,
        fee_cents: i64,
    ) -> ClosedOrder {
        let total_cents = crate::types::total_from_lines(&lines);
        let at = Utc.with_ymd_and_hms(2026, 8, 20, 18, 30, 0).unwrap();
        ClosedOrder {
            id: format!("closed-{order_id}"),
            order_id,
            customer: "Ana".to_string(),
            lines,
            total_cents,
            created_at: at,
            payment_method: method,
            fee_cents,
            closed_at: at,
        }
    }

    // -------------------------------------------------------------------------
    // Billing period
    // -------------------------------------------------------------------------

    #[test]
    fn test_billing_period_before_the_fifth() {
        // On the 3rd, the period is [5th of previous month, 4th of this month]
        let period = billing_period(date(2026, 8, 3));
        assert_eq!(period.start, date(2026, 7, 5));
        assert_eq!(period.end, date(2026, 8, 4));
    }

    #[test]
    fn test_billing_period_on_the_fifth() {
        // On the 5th, the period shifts to [5th of this month, 4th of next]
        let period = billing_period(date(2026, 8, 5));
        assert_eq!(period.start, date(2026, 8, 5));
        assert_eq!(period.end, date(2026, 9, 4));
    }

    #[test]
    fn test_billing_period_on_the_fourth_is_still_previous() {
        let period = billing_period(date(2026, 8, 4));
        assert_eq!(period.start, date(2026, 7, 5));
        assert_eq!(period.end, date(2026, 8, 4));
    }

    #[test]
    fn test_billing_period_year_wrap() {
        // Early January reaches back into December
        let period = billing_period(date(2026, 1, 2));
        assert_eq!(period.start, date(2025, 12, 5));
        assert_eq!(period.end, date(2026, 1, 4));

        // Late December reaches forward into January
        let period = billing_period(date(2025, 12, 28));
        assert_eq!(period.start, date(2025, 12, 5));
        assert_eq!(period.end, date(2026, 1, 4));
    }

    #[test]
    fn test_billing_period_contains() {
        let period = billing_period(date(2026, 8, 10));
        assert!(period.contains(date(2026, 8, 5)));
        assert!(period.contains(date(2026, 9, 4)));
        assert!(!period.contains(date(2026, 8, 4)));
        assert!(!period.contains(date(2026, 9, 5)));
    }

    // -------------------------------------------------------------------------
    // Day metrics
    // -------------------------------------------------------------------------

    #[test]
    fn test_day_metrics_empty_day() {
        let catalog = Catalog::food_stand();
        let metrics = day_metrics(&[], &catalog);

        assert_eq!(metrics.total_sales_cents, 0);
        assert_eq!(metrics.total_fees_cents, 0);
        assert_eq!(metrics.order_count, 0);
        assert_eq!(metrics.average_ticket_cents, 0);
        assert!(metrics.by_method.is_empty());
        assert!(metrics.by_category.is_empty());
        assert!(metrics.top_products.is_empty());
    }

    #[test]
    fn test_day_metrics_totals_and_breakdowns() {
        let catalog = Catalog::food_stand();
        let orders = vec![
            closed(
                1,
                vec![line("Carne", 1100, 2), line("Coca-Cola 350ml", 600, 1)],
                PaymentMethod::Credit,
                84,
            ),
            closed(
                2,
                vec![line("Carne", 1100, 1)],
                PaymentMethod::Cash,
                0,
            ),
        ];

        let metrics = day_metrics(&orders, &catalog);

        assert_eq!(metrics.total_sales_cents, 3900);
        assert_eq!(metrics.total_fees_cents, 84);
        assert_eq!(metrics.order_count, 2);
        assert_eq!(metrics.average_ticket_cents, 1950);

        let credit = &metrics.by_method[&PaymentMethod::Credit];
        assert_eq!(credit.orders, 1);
        assert_eq!(credit.value_cents, 2800);
        assert_eq!(credit.fee_cents, 84);

        let skewers = &metrics.by_category[&MenuCategory::Skewers];
        assert_eq!(skewers.quantity, 3);
        assert_eq!(skewers.value_cents, 3300);

        let drinks = &metrics.by_category[&MenuCategory::Drinks];
        assert_eq!(drinks.quantity, 1);
        assert_eq!(drinks.value_cents, 600);
    }

    #[test]
    fn test_day_metrics_unknown_product_goes_to_other() {
        let catalog = Catalog::food_stand();
        let orders = vec![closed(
            1,
            vec![line("Produto removido", 500, 2)],
            PaymentMethod::Pix,
            0,
        )];

        let metrics = day_metrics(&orders, &catalog);
        let other = &metrics.by_category[&MenuCategory::Other];
        assert_eq!(other.quantity, 2);
        assert_eq!(other.value_cents, 1000);
    }

    #[test]
    fn test_top_products_ties_keep_first_seen_order() {
        let catalog = Catalog::food_stand();
        let orders = vec![closed(
            1,
            vec![
                line("Frango", 1000, 2),
                line("Carne", 1100, 3),
                line("Farofa", 100, 2),
            ],
            PaymentMethod::Cash,
            0,
        )];

        let metrics = day_metrics(&orders, &catalog);
        let names: Vec<&str> = metrics.top_products.iter().map(|p| p.name.as_str()).collect();
        // Carne leads; Frango and Farofa tie at 2 and keep insertion order
        assert_eq!(names, vec!["Carne", "Frango", "Farofa"]);
    }

    #[test]
    fn test_top_products_cut_at_ten() {
        let catalog = Catalog::food_stand();
        let lines: Vec<OrderLine> = (0..15)
            .map(|i| line(&format!("Produto {i}"), 100, 15 - i))
            .collect();
        let orders = vec![closed(1, lines, PaymentMethod::Cash, 0)];

        let metrics = day_metrics(&orders, &catalog);
        assert_eq!(metrics.top_products.len(), 10);
        assert_eq!(metrics.top_products[0].quantity, 15);
        assert_eq!(metrics.top_products[9].quantity, 6);
    }

    // -------------------------------------------------------------------------
    // Daily rollup
    // -------------------------------------------------------------------------

    #[test]
    fn test_summarize_day() {
        let orders = vec![
            closed(1, vec![line("Carne", 1100, 2)], PaymentMethod::Pix, 22),
            closed(2, vec![line("Frango", 1000, 1)], PaymentMethod::Pix, 10),
            closed(3, vec![line("Água", 350, 2)], PaymentMethod::Cash, 0),
        ];

        let summary = summarize_day(date(2026, 8, 20), &orders);

        assert_eq!(summary.total_sales_cents, 2200 + 1000 + 700);
        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.average_ticket_cents, 3900 / 3);

        let pix = &summary.by_method[&PaymentMethod::Pix];
        assert_eq!(pix.orders, 2);
        assert_eq!(pix.value_cents, 3200);
    }

    // -------------------------------------------------------------------------
    // Month metrics
    // -------------------------------------------------------------------------

    fn stock_item(name: &str, unit_cost: i64) -> StockItem {
        StockItem {
            name: name.to_string(),
            quantity: 50,
            unit_cost_cents: unit_cost,
            unit_sale_price_cents: 0,
        }
    }

    #[test]
    fn test_month_metrics_combines_live_and_history() {
        let period = billing_period(date(2026, 8, 20));
        let live = vec![closed(
            1,
            vec![line("Carne", 1100, 2)],
            PaymentMethod::Credit,
            66,
        )];
        let history = vec![summarize_day(
            date(2026, 8, 10),
            &[closed(7, vec![line("Frango", 1000, 3)], PaymentMethod::Credit, 90)],
        )];
        let stock = vec![stock_item("Carne", 500)];

        let metrics = month_metrics(period, &live, &history, &[], &stock);

        assert_eq!(metrics.total_sales_cents, 2200 + 3000);
        assert_eq!(metrics.order_count, 2);
        assert_eq!(metrics.average_ticket_cents, 5200 / 2);
        // Fees only from the live order - the rollup drops fee detail
        assert_eq!(metrics.total_fees_cents, 66);
        // Cost only from live line items: 2 × 500
        assert_eq!(metrics.total_cost_cents, 1000);

        let credit = &metrics.by_method[&PaymentMethod::Credit];
        assert_eq!(credit.orders, 2);
        assert_eq!(credit.value_cents, 5200);
        assert_eq!(credit.fee_cents, 66);
    }

    #[test]
    fn test_month_metrics_profit() {
        let period = billing_period(date(2026, 8, 20));
        let live = vec![closed(
            1,
            vec![line("Carne", 1100, 4)],
            PaymentMethod::Debit,
            44,
        )];
        let losses = vec![LossRecord {
            id: "loss-1".to_string(),
            product: "Carne".to_string(),
            quantity: 2,
            total_cost_cents: 1000,
            recorded_at: Utc.with_ymd_and_hms(2026, 8, 19, 12, 0, 0).unwrap(),
        }];
        let stock = vec![stock_item("Carne", 500)];

        let metrics = month_metrics(period, &live, &[], &losses, &stock);

        assert_eq!(metrics.total_sales_cents, 4400);
        assert_eq!(metrics.total_losses_cents, 1000);
        assert_eq!(metrics.total_cost_cents, 2000);
        // 4400 − 44 − 2000 − 1000
        assert_eq!(metrics.net_profit_cents, 1356);
    }

    #[test]
    fn test_month_metrics_missing_stock_contributes_zero_cost() {
        let period = billing_period(date(2026, 8, 20));
        let live = vec![closed(
            1,
            vec![line("Produto removido", 700, 2)],
            PaymentMethod::Cash,
            0,
        )];

        let metrics = month_metrics(period, &live, &[], &[], &[]);
        assert_eq!(metrics.total_cost_cents, 0);
        assert_eq!(metrics.total_sales_cents, 1400);
    }

    #[test]
    fn test_month_totals_invariant_under_rollup() {
        // Moving a day's orders from "live" to "history" must not change
        // the month's sales totals, order count, or per-method values.
        let period = billing_period(date(2026, 8, 20));
        let day_orders = vec![
            closed(1, vec![line("Carne", 1100, 2)], PaymentMethod::Pix, 22),
            closed(2, vec![line("Frango", 1000, 1)], PaymentMethod::Cash, 0),
        ];

        let as_live = month_metrics(period, &day_orders, &[], &[], &[]);
        let summary = summarize_day(date(2026, 8, 20), &day_orders);
        let as_history = month_metrics(period, &[], &[summary], &[], &[]);

        assert_eq!(as_live.total_sales_cents, as_history.total_sales_cents);
        assert_eq!(as_live.order_count, as_history.order_count);
        assert_eq!(as_live.average_ticket_cents, as_history.average_ticket_cents);
        for (method, live_slot) in &as_live.by_method {
            let hist_slot = &as_history.by_method[method];
            assert_eq!(live_slot.orders, hist_slot.orders);
            assert_eq!(live_slot.value_cents, hist_slot.value_cents);
        }
    }

    #[test]
    fn test_month_metrics_empty_period() {
        let period = billing_period(date(2026, 8, 20));
        let metrics = month_metrics(period, &[], &[], &[], &[]);

        assert_eq!(metrics.total_sales_cents, 0);
        assert_eq!(metrics.order_count, 0);
        assert_eq!(metrics.average_ticket_cents, 0);
        assert_eq!(metrics.net_profit_cents, 0);
        assert!(metrics.by_method.is_empty());
        assert!(metrics.products_sold.is_empty());
    }
}
