//! Database layer for persistent storage of rooms, reservations and
//! financial records.
//!
//! This module provides a SQLite-based storage layer: connection
//! management, schema versioning, and per-entity query functions. Every
//! query function takes a `&rusqlite::Connection` so it composes into a
//! caller's transaction; the booking executor relies on this to evaluate
//! availability and write the reservation as one atomic unit.
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::database::{self, Database, DatabaseConfig};
//! use rust_decimal::Decimal;
//! use innkeep::Room;
//!
//! let config = DatabaseConfig::new("/tmp/innkeep.db");
//! let db = Database::open(config).unwrap();
//!
//! let room = Room::builder("101", 2, Decimal::new(9000, 2)).build().unwrap();
//! let id = database::insert_room(db.connection(), &room).unwrap();
//! println!("room stored as {id}");
//! ```

mod config;
mod connection;
mod guests;
pub mod migrations;
mod payments;
mod reservations;
mod rooms;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::Result;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;
pub use guests::{guest_exists, insert_guest, list_guests, Guest};
pub use payments::{
    completed_payments_between, insert_expense, insert_payment, paid_expenses_between,
};
pub use reservations::{
    arrivals_due_on, calendar, delete_reservation, departures_due_on, get_reservation,
    insert_reservation, occupancy_reservations_containing, occupancy_reservations_overlapping,
    reservations_overlapping, rooms_reserved_on, transition_reservation, update_reservation,
    upcoming_reservations,
};
pub use rooms::{
    count_rooms, get_room, get_room_by_number, insert_room, list_rooms, set_room_status,
};

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

/// Runs a storage operation, transparently retrying exactly once when the
/// failure is transient (busy/locked database).
///
/// Infrastructure trouble is never surfaced as a domain failure on the
/// first hiccup; anything that fails twice propagates.
///
/// # Errors
///
/// Returns the second error if both attempts fail, or the first error if
/// it is not retryable.
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::{self, Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let rooms = database::with_retry(|| database::list_rooms(db.connection())).unwrap();
/// ```
pub fn with_retry<T>(mut op: impl FnMut() -> Result<T>) -> Result<T> {
    match op() {
        Err(e) if e.is_retryable() => {
            log::debug!("retrying after transient storage error: {e}");
            op()
        }
        other => other,
    }
}

/// Converts a timestamp to Unix epoch seconds for database storage.
pub(crate) fn datetime_to_unix_secs(at: NaiveDateTime) -> i64 {
    at.and_utc().timestamp()
}

/// Converts Unix epoch seconds from the database back to a timestamp.
pub(crate) fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Integer,
                format!("timestamp {secs} out of range").into(),
            )
        })
}

/// Formats a calendar date as the ISO string stored in TEXT columns.
/// ISO dates compare lexicographically in date order, which the overlap
/// queries depend on.
pub(crate) fn date_to_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses an ISO date string from a TEXT column.
pub(crate) fn text_to_date(text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid date '{text}': {e}").into(),
        )
    })
}

/// Parses an exact decimal amount from a TEXT column.
pub(crate) fn text_to_decimal(text: &str) -> rusqlite::Result<Decimal> {
    text.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid decimal '{text}': {e}").into(),
        )
    })
}
