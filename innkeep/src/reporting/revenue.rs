//! Revenue and financial aggregation: window totals, kind and method
//! breakdowns, growth rates, and net profit against paid expenses.
//!
//! Only Completed payments count; amounts are exact decimals and
//! percentage shares degrade to 0 when the denominator is zero.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::database;
use crate::error::Result;
use crate::payment::{Payment, PaymentKind, PaymentMethod};
use crate::stay::StayRange;

/// Revenue attributed to one payment kind bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindBreakdown {
    /// The bucket: `reservation`, `sale`, or `other` (deposits, refunds
    /// and miscellany).
    pub kind: String,
    /// Signed revenue in the bucket.
    pub amount: Decimal,
    /// `amount / total × 100`, 0.00 when the total is zero.
    pub share: Decimal,
}

/// Revenue attributed to one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodBreakdown {
    /// The payment method.
    pub method: PaymentMethod,
    /// Signed revenue taken through the method.
    pub amount: Decimal,
    /// `amount / total × 100`, 0.00 when the total is zero.
    pub share: Decimal,
}

/// Revenue over a window `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueReport {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// End of the window (exclusive).
    pub end: NaiveDate,
    /// Sum of completed payments in the window; refunds subtract.
    pub total: Decimal,
    /// Breakdown by payment kind bucket.
    pub by_kind: Vec<KindBreakdown>,
    /// Breakdown by payment method.
    pub by_method: Vec<MethodBreakdown>,
}

/// Net result over a window: revenue against paid expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// End of the window (exclusive).
    pub end: NaiveDate,
    /// Completed payment revenue in the window.
    pub revenue: Decimal,
    /// Expenses with status Paid and a payment date in the window.
    pub expenses: Decimal,
    /// `revenue − expenses`.
    pub net_profit: Decimal,
    /// `net_profit / revenue × 100`, 0.00 when revenue is zero.
    pub profit_margin: Decimal,
}

fn share(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        (amount / total * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

fn kind_bucket(kind: PaymentKind) -> &'static str {
    match kind {
        PaymentKind::Reservation => "reservation",
        PaymentKind::Sale => "sale",
        PaymentKind::Deposit | PaymentKind::Refund | PaymentKind::Other => "other",
    }
}

fn build_report(start: NaiveDate, end: NaiveDate, payments: &[Payment]) -> RevenueReport {
    let total: Decimal = payments.iter().map(|p| p.amount).sum();

    let by_kind = ["reservation", "sale", "other"]
        .into_iter()
        .map(|bucket| {
            let amount = payments
                .iter()
                .filter(|p| kind_bucket(p.kind) == bucket)
                .map(|p| p.amount)
                .sum();
            KindBreakdown {
                kind: bucket.to_string(),
                amount,
                share: share(amount, total),
            }
        })
        .collect();

    let by_method = PaymentMethod::ALL
        .into_iter()
        .map(|method| {
            let amount = payments
                .iter()
                .filter(|p| p.method == method)
                .map(|p| p.amount)
                .sum();
            MethodBreakdown {
                method,
                amount,
                share: share(amount, total),
            }
        })
        .collect();

    RevenueReport {
        start,
        end,
        total,
        by_kind,
        by_method,
    }
}

fn payments_in(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Vec<Payment>> {
    database::completed_payments_between(
        conn,
        start.and_hms_opt(0, 0, 0).unwrap(),
        end.and_hms_opt(0, 0, 0).unwrap(),
    )
}

/// Computes revenue for a single day.
///
/// # Errors
///
/// Returns an error if the underlying queries fail.
pub fn daily_revenue(conn: &Connection, date: NaiveDate) -> Result<RevenueReport> {
    let end = date + chrono::Duration::days(1);
    let payments = payments_in(conn, date, end)?;
    Ok(build_report(date, end, &payments))
}

/// Computes revenue over a date range `[start, end)`.
///
/// # Errors
///
/// Returns an error if the underlying queries fail.
pub fn period_revenue(conn: &Connection, window: &StayRange) -> Result<RevenueReport> {
    let payments = payments_in(conn, window.check_in(), window.check_out())?;
    Ok(build_report(window.check_in(), window.check_out(), &payments))
}

/// Growth of `current` over `previous` as a percentage, defined as 0 when
/// there is nothing to grow from.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use innkeep::reporting::growth_rate;
///
/// assert_eq!(growth_rate(Decimal::from(1200), Decimal::from(1000)), Decimal::new(2000, 2));
/// assert_eq!(growth_rate(Decimal::from(1200), Decimal::ZERO), Decimal::ZERO);
/// ```
#[must_use]
pub fn growth_rate(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        Decimal::ZERO
    } else {
        ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

/// Computes revenue, paid expenses and net profit over a window.
///
/// # Errors
///
/// Returns an error if the underlying queries fail.
pub fn financial_summary(conn: &Connection, window: &StayRange) -> Result<FinancialSummary> {
    let revenue = period_revenue(conn, window)?.total;
    let expenses: Decimal =
        database::paid_expenses_between(conn, window.check_in(), window.check_out())?
            .into_iter()
            .map(|e| e.amount)
            .sum();
    let net_profit = revenue - expenses;

    Ok(FinancialSummary {
        start: window.check_in(),
        end: window.check_out(),
        revenue,
        expenses,
        net_profit,
        profit_margin: share(net_profit, revenue),
    })
}
