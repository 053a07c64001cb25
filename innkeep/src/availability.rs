//! Room availability checking.
//!
//! A room is available for a window when no active reservation (pending,
//! confirmed or checked-in) on that room overlaps it. Cancelled and
//! no-show bookings never block a room, and back-to-back stays touching at
//! a boundary date don't conflict.
//!
//! These functions take a `&Connection` deliberately: a result is only
//! trustworthy inside the same IMMEDIATE transaction that goes on to write
//! the reservation. The plan executor re-runs the check there; calling
//! `is_available` as a separate prior step and believing the answer is the
//! classic lost-update race.

use rusqlite::{params, Connection};

use crate::database;
use crate::error::Result;
use crate::reservation::Reservation;
use crate::room::Room;
use crate::stay::StayRange;

const SELECT_RESERVED_ROOM_IDS: &str = r"
    SELECT DISTINCT room_id FROM reservations
    WHERE status IN ('pending', 'confirmed', 'checked-in')
      AND check_in < ? AND ? < check_out
";

/// Returns the active reservations on a room that overlap the window,
/// excluding `exclude` (a reservation revalidating its own update).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_conflicts(
    conn: &Connection,
    room_id: i64,
    window: &StayRange,
    exclude: Option<i64>,
) -> Result<Vec<Reservation>> {
    database::reservations_overlapping(conn, room_id, window, exclude)
}

/// Returns true if the room has no active reservation overlapping the
/// window.
///
/// When revalidating an update, pass the reservation's own id as
/// `exclude`; a reservation never conflicts with itself.
///
/// # Errors
///
/// Returns an error if the query fails.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use innkeep::availability;
/// use innkeep::{Database, DatabaseConfig, StayRange};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let june = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
/// let window = StayRange::new(june(10), june(13)).unwrap();
///
/// if availability::is_available(db.connection(), 1, &window, None).unwrap() {
///     println!("room 1 is free");
/// }
/// ```
pub fn is_available(
    conn: &Connection,
    room_id: i64,
    window: &StayRange,
    exclude: Option<i64>,
) -> Result<bool> {
    Ok(find_conflicts(conn, room_id, window, exclude)?.is_empty())
}

/// Returns the rooms free for the whole window, ordered by room number.
///
/// This backs the get-availability query; the answer is advisory for
/// browsing, and booking revalidates inside its own transaction.
///
/// # Errors
///
/// Returns an error if the queries fail.
pub fn available_rooms(conn: &Connection, window: &StayRange) -> Result<Vec<Room>> {
    let mut stmt = conn.prepare(SELECT_RESERVED_ROOM_IDS)?;
    let reserved: std::collections::HashSet<i64> = stmt
        .query_map(
            params![
                window.check_out().format("%Y-%m-%d").to_string(),
                window.check_in().format("%Y-%m-%d").to_string(),
            ],
            |row| row.get(0),
        )?
        .collect::<rusqlite::Result<_>>()?;

    let rooms = database::list_rooms(conn)?
        .into_iter()
        .filter(|room| room.id().map_or(true, |id| !reserved.contains(&id)))
        .collect();
    Ok(rooms)
}
