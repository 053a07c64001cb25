//! Shared test utilities for database unit tests.

use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

use crate::database::{insert_guest, insert_room, Database, DatabaseConfig};
use crate::room::Room;

/// Creates a temporary test database that lives for the whole test.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created; tests
/// want to fail fast here.
#[must_use]
pub fn open_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Inserts a two-person room with a 100.00 nightly rate; returns its id.
///
/// # Panics
///
/// Panics on any failure; acceptable in test code.
pub fn seed_room(conn: &Connection, number: &str) -> i64 {
    let room = Room::builder(number, 2, Decimal::new(10000, 2))
        .build()
        .unwrap();
    insert_room(conn, &room).unwrap()
}

/// Inserts a guest; returns its id.
///
/// # Panics
///
/// Panics on any failure; acceptable in test code.
pub fn seed_guest(conn: &Connection, name: &str) -> i64 {
    insert_guest(conn, name).unwrap()
}
