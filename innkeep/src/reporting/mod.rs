//! Read-only reporting: occupancy, revenue, financial summaries, and the
//! dashboard snapshot.
//!
//! Everything here runs over a plain `&Connection` and may run
//! concurrently with bookings; reports are advisory and tolerate reading
//! a snapshot that a concurrent writer is about to move on from.

mod dashboard;
mod occupancy;
mod revenue;

pub use dashboard::{dashboard, DashboardSnapshot};
pub use occupancy::{daily_occupancy, period_occupancy, DailyOccupancy, PeriodOccupancy,
    RoomTypeOccupancy};
pub use revenue::{
    daily_revenue, financial_summary, growth_rate, period_revenue, FinancialSummary,
    KindBreakdown, MethodBreakdown, RevenueReport,
};
