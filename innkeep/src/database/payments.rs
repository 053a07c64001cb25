//! Payment and expense queries for financial aggregation.
//!
//! Only inserts and window reads live here: the platform records the
//! money, this core sums it.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::payment::{
    Expense, ExpenseStatus, Payment, PaymentKind, PaymentMethod, PaymentStatus,
};

use super::{date_to_text, datetime_to_unix_secs, text_to_date, text_to_decimal,
    unix_secs_to_datetime};

const INSERT_PAYMENT: &str = r"
    INSERT INTO payments
    (reservation_id, sale_id, guest_id, amount, method, kind, status, paid_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

const INSERT_EXPENSE: &str = r"
    INSERT INTO expenses (category, amount, status, due_date, paid_date)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_COMPLETED_BETWEEN: &str = r"
    SELECT id, reservation_id, sale_id, guest_id, amount, method, kind, status, paid_at
    FROM payments
    WHERE status = 'completed' AND paid_at >= ? AND paid_at < ?
    ORDER BY paid_at
";

const SELECT_PAID_EXPENSES_BETWEEN: &str = r"
    SELECT id, category, amount, status, due_date, paid_date
    FROM expenses
    WHERE status = 'paid' AND paid_date IS NOT NULL
      AND paid_date >= ? AND paid_date < ?
    ORDER BY paid_date
";

fn parse_enum<T: std::str::FromStr<Err = String>>(
    index: usize,
    text: &str,
) -> rusqlite::Result<T> {
    text.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, e.into())
    })
}

fn row_to_payment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Payment> {
    let amount_text: String = row.get(4)?;
    let method_text: String = row.get(5)?;
    let kind_text: String = row.get(6)?;
    let status_text: String = row.get(7)?;
    let paid_secs: i64 = row.get(8)?;

    Ok(Payment {
        id: Some(row.get(0)?),
        reservation_id: row.get(1)?,
        sale_id: row.get(2)?,
        guest_id: row.get(3)?,
        amount: text_to_decimal(&amount_text)?,
        method: parse_enum::<PaymentMethod>(5, &method_text)?,
        kind: parse_enum::<PaymentKind>(6, &kind_text)?,
        status: parse_enum::<PaymentStatus>(7, &status_text)?,
        paid_at: unix_secs_to_datetime(paid_secs)?,
    })
}

fn row_to_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    let amount_text: String = row.get(2)?;
    let status_text: String = row.get(3)?;
    let due_text: Option<String> = row.get(4)?;
    let paid_text: Option<String> = row.get(5)?;

    Ok(Expense {
        id: Some(row.get(0)?),
        category: row.get(1)?,
        amount: text_to_decimal(&amount_text)?,
        status: parse_enum::<ExpenseStatus>(3, &status_text)?,
        due_date: due_text.as_deref().map(text_to_date).transpose()?,
        paid_date: paid_text.as_deref().map(text_to_date).transpose()?,
    })
}

/// Inserts a payment and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_payment(conn: &Connection, payment: &Payment) -> Result<i64> {
    conn.execute(
        INSERT_PAYMENT,
        params![
            payment.reservation_id,
            payment.sale_id,
            payment.guest_id,
            payment.amount.to_string(),
            payment.method.as_str(),
            payment.kind.as_str(),
            payment.status.as_str(),
            datetime_to_unix_secs(payment.paid_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Inserts an expense and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_expense(conn: &Connection, expense: &Expense) -> Result<i64> {
    conn.execute(
        INSERT_EXPENSE,
        params![
            expense.category,
            expense.amount.to_string(),
            expense.status.as_str(),
            expense.due_date.map(date_to_text),
            expense.paid_date.map(date_to_text),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Completed payments with `paid_at` in `[start, end)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn completed_payments_between(
    conn: &Connection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<Payment>> {
    let mut stmt = conn.prepare(SELECT_COMPLETED_BETWEEN)?;
    let rows = stmt
        .query_map(
            params![datetime_to_unix_secs(start), datetime_to_unix_secs(end)],
            row_to_payment,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Paid expenses with a payment date in `[start, end)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn paid_expenses_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(SELECT_PAID_EXPENSES_BETWEEN)?;
    let rows = stmt
        .query_map(
            params![date_to_text(start), date_to_text(end)],
            row_to_expense,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
