//! Guest lookups.
//!
//! Customer profiles are owned by the surrounding platform; this core only
//! needs existence checks before accepting a booking, plus a minimal
//! insert for seeding and tests.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The minimal guest record this core reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Store-assigned id.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Inserts a guest and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_guest(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO guests (name) VALUES (?)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// Checks whether a guest exists, the referential check run before any
/// reservation write.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn guest_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM guests WHERE id = ?",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Lists all guests ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_guests(conn: &Connection) -> Result<Vec<Guest>> {
    let mut stmt = conn.prepare("SELECT id, name FROM guests ORDER BY id")?;
    let guests = stmt
        .query_map([], |row| {
            Ok(Guest {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(guests)
}
