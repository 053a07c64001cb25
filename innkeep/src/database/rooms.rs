//! Room CRUD operations.

use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::room::{Room, RoomStatus};

use super::text_to_decimal;

const INSERT_ROOM: &str = r"
    INSERT INTO rooms (number, capacity, nightly_rate, sea_view, balcony, air_conditioning, status)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const SELECT_ROOM_COLUMNS: &str = r"
    SELECT id, number, capacity, nightly_rate, sea_view, balcony, air_conditioning, status
    FROM rooms
";

const UPDATE_ROOM_STATUS: &str = "UPDATE rooms SET status = ? WHERE id = ?";

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let id: i64 = row.get(0)?;
    let number: String = row.get(1)?;
    let capacity: u32 = row.get(2)?;
    let rate_text: String = row.get(3)?;
    let sea_view: bool = row.get(4)?;
    let balcony: bool = row.get(5)?;
    let air_conditioning: bool = row.get(6)?;
    let status_text: String = row.get(7)?;

    let status: RoomStatus = status_text
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, e.into()))?;

    Room::builder(number, capacity, text_to_decimal(&rate_text)?)
        .id(id)
        .sea_view(sea_view)
        .balcony(balcony)
        .air_conditioning(air_conditioning)
        .status(status)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Inserts a room and returns its assigned id.
///
/// # Errors
///
/// Returns a validation error if the room number is already taken, or a
/// database error for other failures.
pub fn insert_room(conn: &Connection, room: &Room) -> Result<i64> {
    let result = conn.execute(
        INSERT_ROOM,
        params![
            room.number(),
            room.capacity(),
            room.nightly_rate().to_string(),
            room.sea_view(),
            room.balcony(),
            room.air_conditioning(),
            room.status().as_str(),
        ],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, msg))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            let _ = msg;
            Err(Error::Validation {
                field: "number".into(),
                message: format!("room number '{}' is already taken", room.number()),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Retrieves a room by id.
///
/// # Errors
///
/// Returns an error if the query fails (other than "not found").
pub fn get_room(conn: &Connection, id: i64) -> Result<Option<Room>> {
    let sql = format!("{SELECT_ROOM_COLUMNS} WHERE id = ?");
    match conn.query_row(&sql, params![id], row_to_room) {
        Ok(room) => Ok(Some(room)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Retrieves a room by its unique number.
///
/// # Errors
///
/// Returns an error if the query fails (other than "not found").
pub fn get_room_by_number(conn: &Connection, number: &str) -> Result<Option<Room>> {
    let sql = format!("{SELECT_ROOM_COLUMNS} WHERE number = ?");
    match conn.query_row(&sql, params![number], row_to_room) {
        Ok(room) => Ok(Some(room)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists all rooms ordered by number.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
    let sql = format!("{SELECT_ROOM_COLUMNS} ORDER BY number");
    let mut stmt = conn.prepare(&sql)?;
    let rooms = stmt
        .query_map([], row_to_room)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rooms)
}

/// Counts the rooms in the fixed inventory.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_rooms(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))?;
    Ok(count)
}

/// Updates a room's physical status.
///
/// # Returns
///
/// - `Ok(true)` if the room was found and updated
/// - `Ok(false)` if no such room exists
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_room_status(conn: &Connection, id: i64, status: RoomStatus) -> Result<bool> {
    let rows = conn.execute(UPDATE_ROOM_STATUS, params![status.as_str(), id])?;
    Ok(rows > 0)
}
