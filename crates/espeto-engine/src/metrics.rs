//! # Metrics Operations
//!
//! Gathers the records a report needs and hands them to the pure
//! aggregation functions in espeto-core. The engine only decides the
//! date windows; all arithmetic lives in the core.

use espeto_core::metrics::{billing_period, day_metrics, month_metrics, DayMetrics, MonthMetrics};
use espeto_core::ClosedOrder;

use crate::error::EngineResult;
use crate::{day_bounds, today, PosEngine};

impl PosEngine {
    /// Lists today's closed orders, oldest first.
    pub async fn closed_orders_today(&self) -> EngineResult<Vec<ClosedOrder>> {
        let (start, end) = day_bounds(today());
        Ok(self.db().closed_orders().list_between(start, end).await?)
    }

    /// The dashboard for the current operating day.
    pub async fn today_metrics(&self) -> EngineResult<DayMetrics> {
        let closed = self.closed_orders_today().await?;
        Ok(day_metrics(&closed, self.catalog()))
    }

    /// The report for the current billing month (5th through the 4th).
    ///
    /// Combines still-live closed orders with already-rolled-up daily
    /// summaries; the day reset keeps the two disjoint, so the union
    /// never double-counts.
    pub async fn billing_month_metrics(&self) -> EngineResult<MonthMetrics> {
        let period = billing_period(today());

        let (live_start, _) = day_bounds(period.start);
        let (_, live_end) = day_bounds(period.end);

        let live = self
            .db()
            .closed_orders()
            .list_between(live_start, live_end)
            .await?;
        let history = self
            .db()
            .history()
            .list_between(period.start, period.end)
            .await?;
        let losses = self
            .db()
            .losses()
            .list_between(live_start, live_end)
            .await?;
        let stock = self.db().stock().list_all().await?;

        Ok(month_metrics(period, &live, &history, &losses, &stock))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
