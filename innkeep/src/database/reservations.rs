//! Reservation CRUD and the queries behind availability, calendar and
//! occupancy.
//!
//! Date predicates run in SQL on the TEXT ISO columns: `check_in < :end
//! AND :start < check_out` is the half-open overlap test, and string
//! comparison on ISO dates is date order.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::reservation::{Reservation, ReservationStatus};
use crate::stay::StayRange;

use super::{date_to_text, datetime_to_unix_secs, text_to_date, text_to_decimal,
    unix_secs_to_datetime};

const RESERVATION_COLUMNS: &str = r"
    id, room_id, guest_id, extra_guest_ids, check_in, check_out, guests,
    total_amount, paid_amount, status, actual_check_in, actual_check_out,
    notes, created_at, updated_at
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (room_id, guest_id, extra_guest_ids, check_in, check_out, guests,
     total_amount, paid_amount, status, actual_check_in, actual_check_out,
     notes, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET room_id = ?, guest_id = ?, extra_guest_ids = ?, check_in = ?,
        check_out = ?, guests = ?, total_amount = ?, paid_amount = ?,
        notes = ?, updated_at = ?
    WHERE id = ?
";

// The optimistic row check: the UPDATE only lands if the reservation is
// still in the state the caller observed. Zero affected rows means a
// concurrent writer won.
const TRANSITION_RESERVATION: &str = r"
    UPDATE reservations
    SET status = ?, notes = ?, updated_at = ?,
        actual_check_in = COALESCE(?, actual_check_in),
        actual_check_out = COALESCE(?, actual_check_out)
    WHERE id = ? AND status = ?
";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

// Active set: statuses that hold the room against other bookings.
const SELECT_OVERLAPPING: &str = r"
    SELECT id, room_id, guest_id, extra_guest_ids, check_in, check_out, guests,
           total_amount, paid_amount, status, actual_check_in, actual_check_out,
           notes, created_at, updated_at
    FROM reservations
    WHERE room_id = ?
      AND status IN ('pending', 'confirmed', 'checked-in')
      AND check_in < ? AND ? < check_out
      AND (? IS NULL OR id != ?)
    ORDER BY check_in
";

// Occupancy counts realized stays only: the guest arrived (and may have
// left), regardless of where the booking pipeline is for future windows.
const SELECT_OCCUPANCY_CONTAINING: &str = r"
    SELECT id, room_id, guest_id, extra_guest_ids, check_in, check_out, guests,
           total_amount, paid_amount, status, actual_check_in, actual_check_out,
           notes, created_at, updated_at
    FROM reservations
    WHERE status IN ('checked-in', 'checked-out')
      AND check_in <= ? AND ? < check_out
";

const SELECT_OCCUPANCY_OVERLAPPING: &str = r"
    SELECT id, room_id, guest_id, extra_guest_ids, check_in, check_out, guests,
           total_amount, paid_amount, status, actual_check_in, actual_check_out,
           notes, created_at, updated_at
    FROM reservations
    WHERE status IN ('checked-in', 'checked-out')
      AND check_in < ? AND ? < check_out
";

// Cancelled and no-show bookings no longer occupy the calendar.
const SELECT_CALENDAR: &str = r"
    SELECT id, room_id, guest_id, extra_guest_ids, check_in, check_out, guests,
           total_amount, paid_amount, status, actual_check_in, actual_check_out,
           notes, created_at, updated_at
    FROM reservations
    WHERE status IN ('pending', 'confirmed', 'checked-in', 'checked-out')
      AND check_in < ? AND ? < check_out
    ORDER BY check_in, room_id
";

const SELECT_UPCOMING: &str = r"
    SELECT id, room_id, guest_id, extra_guest_ids, check_in, check_out, guests,
           total_amount, paid_amount, status, actual_check_in, actual_check_out,
           notes, created_at, updated_at
    FROM reservations
    WHERE status IN ('pending', 'confirmed')
      AND check_in > ? AND check_in <= ?
    ORDER BY check_in, id
    LIMIT ?
";

const COUNT_ARRIVALS_DUE: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE status IN ('pending', 'confirmed') AND check_in = ?
";

const COUNT_DEPARTURES_DUE: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE status = 'checked-in' AND check_out = ?
";

const COUNT_ROOMS_RESERVED_ON: &str = r"
    SELECT COUNT(DISTINCT room_id) FROM reservations
    WHERE status IN ('pending', 'confirmed', 'checked-in')
      AND check_in <= ? AND ? < check_out
";

fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(1)?;
    let guest_id: i64 = row.get(2)?;
    let extra_text: String = row.get(3)?;
    let check_in_text: String = row.get(4)?;
    let check_out_text: String = row.get(5)?;
    let guests: u32 = row.get(6)?;
    let total_text: String = row.get(7)?;
    let paid_text: String = row.get(8)?;
    let status_text: String = row.get(9)?;
    let actual_in_secs: Option<i64> = row.get(10)?;
    let actual_out_secs: Option<i64> = row.get(11)?;
    let notes_text: String = row.get(12)?;
    let created_secs: i64 = row.get(13)?;
    let updated_secs: i64 = row.get(14)?;

    let stay = StayRange::new(text_to_date(&check_in_text)?, text_to_date(&check_out_text)?)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let status: ReservationStatus = status_text.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, e.into())
    })?;

    let extra_guest_ids: Vec<i64> = serde_json::from_str(&extra_text)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let notes: Vec<String> = serde_json::from_str(&notes_text)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let actual_check_in = actual_in_secs.map(unix_secs_to_datetime).transpose()?;
    let actual_check_out = actual_out_secs.map(unix_secs_to_datetime).transpose()?;

    Reservation::builder(room_id, guest_id, stay)
        .id(id)
        .extra_guest_ids(extra_guest_ids)
        .guests(guests)
        .total_amount(text_to_decimal(&total_text)?)
        .paid_amount(text_to_decimal(&paid_text)?)
        .status(status)
        .actual_check_in(actual_check_in)
        .actual_check_out(actual_check_out)
        .notes(notes)
        .created_at(unix_secs_to_datetime(created_secs)?)
        .updated_at(unix_secs_to_datetime(updated_secs)?)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn json_text<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| crate::error::Error::Validation {
        field: "json".into(),
        message: format!("cannot serialize: {e}"),
    })
}

/// Inserts a reservation and returns its assigned id.
///
/// Callers that need the insert to be conditional on availability must run
/// this inside the same IMMEDIATE transaction as the conflict check; the
/// executor does.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_reservation(conn: &Connection, reservation: &Reservation) -> Result<i64> {
    conn.execute(
        INSERT_RESERVATION,
        params![
            reservation.room_id(),
            reservation.guest_id(),
            json_text(&reservation.extra_guest_ids())?,
            date_to_text(reservation.stay().check_in()),
            date_to_text(reservation.stay().check_out()),
            reservation.guests(),
            reservation.total_amount().to_string(),
            reservation.paid_amount().to_string(),
            reservation.status().as_str(),
            reservation.actual_check_in().map(datetime_to_unix_secs),
            reservation.actual_check_out().map(datetime_to_unix_secs),
            json_text(&reservation.notes())?,
            datetime_to_unix_secs(reservation.created_at()),
            datetime_to_unix_secs(reservation.updated_at()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Retrieves a reservation by id.
///
/// # Errors
///
/// Returns an error if the query fails (other than "not found").
pub fn get_reservation(conn: &Connection, id: i64) -> Result<Option<Reservation>> {
    let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
    match conn.query_row(&sql, params![id], row_to_reservation) {
        Ok(reservation) => Ok(Some(reservation)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Rewrites a reservation's plan fields (room, window, party, amounts,
/// notes). Status is deliberately not written here; transitions go through
/// [`transition_reservation`] and its optimistic check.
///
/// # Returns
///
/// - `Ok(true)` if the reservation was found and updated
/// - `Ok(false)` if no such reservation exists
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_reservation(conn: &Connection, id: i64, reservation: &Reservation) -> Result<bool> {
    let now = Utc::now().naive_utc();
    let rows = conn.execute(
        UPDATE_RESERVATION,
        params![
            reservation.room_id(),
            reservation.guest_id(),
            json_text(&reservation.extra_guest_ids())?,
            date_to_text(reservation.stay().check_in()),
            date_to_text(reservation.stay().check_out()),
            reservation.guests(),
            reservation.total_amount().to_string(),
            reservation.paid_amount().to_string(),
            json_text(&reservation.notes())?,
            datetime_to_unix_secs(now),
            id,
        ],
    )?;
    Ok(rows > 0)
}

/// Moves a reservation from `expected` to `to`, stamping `updated_at`,
/// optionally recording actual check-in/out timestamps and appending a
/// note.
///
/// The UPDATE carries `WHERE id = ? AND status = ?`: if a concurrent
/// writer already moved the reservation, zero rows change and this
/// returns `Ok(false)`; the caller maps that to a conflict, never a
/// silent success.
///
/// # Errors
///
/// Returns an error if the read or update fails.
pub fn transition_reservation(
    conn: &Connection,
    id: i64,
    expected: ReservationStatus,
    to: ReservationStatus,
    actual_check_in: Option<NaiveDateTime>,
    actual_check_out: Option<NaiveDateTime>,
    note: Option<&str>,
) -> Result<bool> {
    let notes_text: String = match conn.query_row(
        "SELECT notes FROM reservations WHERE id = ?",
        params![id],
        |row| row.get(0),
    ) {
        Ok(text) => text,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let mut notes: Vec<String> = serde_json::from_str(&notes_text).unwrap_or_default();
    if let Some(note) = note {
        let trimmed = note.trim();
        if !trimmed.is_empty() {
            notes.push(trimmed.to_string());
        }
    }

    let now = Utc::now().naive_utc();
    let rows = conn.execute(
        TRANSITION_RESERVATION,
        params![
            to.as_str(),
            json_text(&notes)?,
            datetime_to_unix_secs(now),
            actual_check_in.map(datetime_to_unix_secs),
            actual_check_out.map(datetime_to_unix_secs),
            id,
            expected.as_str(),
        ],
    )?;
    Ok(rows > 0)
}

/// Deletes a reservation.
///
/// # Returns
///
/// - `Ok(true)` if the reservation was found and deleted
/// - `Ok(false)` if no such reservation exists
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_reservation(conn: &Connection, id: i64) -> Result<bool> {
    let rows = conn.execute(DELETE_RESERVATION, params![id])?;
    Ok(rows > 0)
}

/// Finds active reservations on a room whose windows overlap `range`,
/// excluding `exclude` (a reservation revalidating its own update).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn reservations_overlapping(
    conn: &Connection,
    room_id: i64,
    range: &StayRange,
    exclude: Option<i64>,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(SELECT_OVERLAPPING)?;
    let rows = stmt
        .query_map(
            params![
                room_id,
                date_to_text(range.check_out()),
                date_to_text(range.check_in()),
                exclude,
                exclude,
            ],
            row_to_reservation,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Realized (checked-in or checked-out) reservations whose window contains
/// `date`; the daily occupancy population.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn occupancy_reservations_containing(
    conn: &Connection,
    date: NaiveDate,
) -> Result<Vec<Reservation>> {
    let text = date_to_text(date);
    let mut stmt = conn.prepare(SELECT_OCCUPANCY_CONTAINING)?;
    let rows = stmt
        .query_map(params![text, text], row_to_reservation)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Realized reservations whose window overlaps `range`; the period
/// occupancy population.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn occupancy_reservations_overlapping(
    conn: &Connection,
    range: &StayRange,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(SELECT_OCCUPANCY_OVERLAPPING)?;
    let rows = stmt
        .query_map(
            params![date_to_text(range.check_out()), date_to_text(range.check_in())],
            row_to_reservation,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Reservations intersecting a range for calendar display, ordered by
/// check-in. Cancelled and no-show bookings are omitted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn calendar(conn: &Connection, range: &StayRange) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(SELECT_CALENDAR)?;
    let rows = stmt
        .query_map(
            params![date_to_text(range.check_out()), date_to_text(range.check_in())],
            row_to_reservation,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// The next bookings arriving after `from`, within `horizon_days`, at most
/// `limit` of them, check-in ascending.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn upcoming_reservations(
    conn: &Connection,
    from: NaiveDate,
    horizon_days: i64,
    limit: u32,
) -> Result<Vec<Reservation>> {
    let until = from + chrono::Duration::days(horizon_days);
    let mut stmt = conn.prepare(SELECT_UPCOMING)?;
    let rows = stmt
        .query_map(
            params![date_to_text(from), date_to_text(until), limit],
            row_to_reservation,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Counts bookings due to arrive on `date` (pending or confirmed).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn arrivals_due_on(conn: &Connection, date: NaiveDate) -> Result<u32> {
    let count = conn.query_row(COUNT_ARRIVALS_DUE, params![date_to_text(date)], |row| {
        row.get(0)
    })?;
    Ok(count)
}

/// Counts in-house guests due to leave on `date`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn departures_due_on(conn: &Connection, date: NaiveDate) -> Result<u32> {
    let count = conn.query_row(COUNT_DEPARTURES_DUE, params![date_to_text(date)], |row| {
        row.get(0)
    })?;
    Ok(count)
}

/// Counts distinct rooms covered by an active reservation on `date`; the
/// dashboard's available-now figure is the room total minus this.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn rooms_reserved_on(conn: &Connection, date: NaiveDate) -> Result<u32> {
    let text = date_to_text(date);
    let count = conn.query_row(COUNT_ROOMS_RESERVED_ON, params![text, text], |row| {
        row.get(0)
    })?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{open_test_database, seed_guest, seed_room};
    use rust_decimal::Decimal;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn stay(a: u32, b: u32) -> StayRange {
        StayRange::new(june(a), june(b)).unwrap()
    }

    fn build(room_id: i64, guest_id: i64, s: StayRange, status: ReservationStatus) -> Reservation {
        Reservation::builder(room_id, guest_id, s)
            .guests(2)
            .total_amount(Decimal::new(30000, 2))
            .status(status)
            .build()
            .unwrap()
    }

    #[test]
    fn test_insert_and_get_roundtrip() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");

        let reservation = Reservation::builder(room, guest, stay(10, 13))
            .guests(2)
            .extra_guest_ids(vec![guest])
            .total_amount(Decimal::new(36000, 2))
            .paid_amount(Decimal::new(10000, 2))
            .notes(vec!["late arrival".to_string()])
            .build()
            .unwrap();

        let id = insert_reservation(db.connection(), &reservation).unwrap();
        let loaded = get_reservation(db.connection(), id).unwrap().unwrap();

        assert_eq!(loaded.id(), Some(id));
        assert_eq!(loaded.room_id(), room);
        assert_eq!(loaded.stay(), stay(10, 13));
        assert_eq!(loaded.total_amount(), Decimal::new(36000, 2));
        assert_eq!(loaded.paid_amount(), Decimal::new(10000, 2));
        assert_eq!(loaded.notes(), &["late arrival".to_string()]);
        assert_eq!(loaded.extra_guest_ids(), &[guest]);
        assert_eq!(loaded.status(), ReservationStatus::Pending);
    }

    #[test]
    fn test_get_reservation_missing() {
        let db = open_test_database();
        assert!(get_reservation(db.connection(), 42).unwrap().is_none());
    }

    #[test]
    fn test_overlap_query_half_open() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");
        insert_reservation(
            db.connection(),
            &build(room, guest, stay(10, 13), ReservationStatus::CheckedIn),
        )
        .unwrap();

        // Overlapping window conflicts
        let hits =
            reservations_overlapping(db.connection(), room, &stay(11, 14), None).unwrap();
        assert_eq!(hits.len(), 1);

        // Adjacent window does not
        let hits =
            reservations_overlapping(db.connection(), room, &stay(13, 15), None).unwrap();
        assert!(hits.is_empty());

        // Ending exactly at the existing check-in does not either
        let hits = reservations_overlapping(db.connection(), room, &stay(8, 10), None).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_overlap_query_ignores_inactive_and_other_rooms() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let other = seed_room(db.connection(), "102");
        let guest = seed_guest(db.connection(), "Ada");

        insert_reservation(
            db.connection(),
            &build(room, guest, stay(10, 13), ReservationStatus::Cancelled),
        )
        .unwrap();
        insert_reservation(
            db.connection(),
            &build(room, guest, stay(10, 13), ReservationStatus::NoShow),
        )
        .unwrap();
        insert_reservation(
            db.connection(),
            &build(other, guest, stay(10, 13), ReservationStatus::Confirmed),
        )
        .unwrap();

        let hits =
            reservations_overlapping(db.connection(), room, &stay(10, 13), None).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_overlap_query_excludes_own_id() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");
        let id = insert_reservation(
            db.connection(),
            &build(room, guest, stay(10, 13), ReservationStatus::Confirmed),
        )
        .unwrap();

        let hits =
            reservations_overlapping(db.connection(), room, &stay(10, 13), Some(id)).unwrap();
        assert!(hits.is_empty());

        let hits =
            reservations_overlapping(db.connection(), room, &stay(10, 13), None).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_transition_optimistic_check() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");
        let id = insert_reservation(
            db.connection(),
            &build(room, guest, stay(10, 13), ReservationStatus::Pending),
        )
        .unwrap();

        // Expected state matches: transition lands
        let moved = transition_reservation(
            db.connection(),
            id,
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            None,
            None,
            Some("phone confirmation"),
        )
        .unwrap();
        assert!(moved);

        let loaded = get_reservation(db.connection(), id).unwrap().unwrap();
        assert_eq!(loaded.status(), ReservationStatus::Confirmed);
        assert_eq!(loaded.notes(), &["phone confirmation".to_string()]);

        // Second attempt from the stale expected state fails
        let moved = transition_reservation(
            db.connection(),
            id,
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            None,
            None,
            None,
        )
        .unwrap();
        assert!(!moved);
    }

    #[test]
    fn test_transition_records_actual_timestamps() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");
        let id = insert_reservation(
            db.connection(),
            &build(room, guest, stay(10, 13), ReservationStatus::Confirmed),
        )
        .unwrap();

        let arrival = june(10).and_hms_opt(15, 30, 0).unwrap();
        transition_reservation(
            db.connection(),
            id,
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            Some(arrival),
            None,
            None,
        )
        .unwrap();

        let loaded = get_reservation(db.connection(), id).unwrap().unwrap();
        assert_eq!(loaded.actual_check_in(), Some(arrival));
        assert_eq!(loaded.actual_check_out(), None);
    }

    #[test]
    fn test_transition_missing_reservation() {
        let db = open_test_database();
        let moved = transition_reservation(
            db.connection(),
            404,
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            None,
            None,
            None,
        )
        .unwrap();
        assert!(!moved);
    }

    #[test]
    fn test_update_reservation_fields() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");
        let id = insert_reservation(
            db.connection(),
            &build(room, guest, stay(10, 13), ReservationStatus::Pending),
        )
        .unwrap();

        let amended = Reservation::builder(room, guest, stay(12, 16))
            .guests(1)
            .total_amount(Decimal::new(48000, 2))
            .build()
            .unwrap();
        assert!(update_reservation(db.connection(), id, &amended).unwrap());

        let loaded = get_reservation(db.connection(), id).unwrap().unwrap();
        assert_eq!(loaded.stay(), stay(12, 16));
        assert_eq!(loaded.guests(), 1);
        // Status is untouched by field updates
        assert_eq!(loaded.status(), ReservationStatus::Pending);

        assert!(!update_reservation(db.connection(), 404, &amended).unwrap());
    }

    #[test]
    fn test_delete_reservation() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");
        let id = insert_reservation(
            db.connection(),
            &build(room, guest, stay(10, 13), ReservationStatus::Pending),
        )
        .unwrap();

        assert!(delete_reservation(db.connection(), id).unwrap());
        assert!(get_reservation(db.connection(), id).unwrap().is_none());
        assert!(!delete_reservation(db.connection(), id).unwrap());
    }

    #[test]
    fn test_calendar_filters_and_orders() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let other = seed_room(db.connection(), "102");
        let guest = seed_guest(db.connection(), "Ada");

        insert_reservation(
            db.connection(),
            &build(room, guest, stay(20, 22), ReservationStatus::Confirmed),
        )
        .unwrap();
        insert_reservation(
            db.connection(),
            &build(other, guest, stay(10, 12), ReservationStatus::CheckedOut),
        )
        .unwrap();
        insert_reservation(
            db.connection(),
            &build(room, guest, stay(15, 18), ReservationStatus::Cancelled),
        )
        .unwrap();

        let entries = calendar(db.connection(), &stay(1, 30)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].stay(), stay(10, 12));
        assert_eq!(entries[1].stay(), stay(20, 22));
    }

    #[test]
    fn test_dashboard_counts() {
        let db = open_test_database();
        let r1 = seed_room(db.connection(), "101");
        let r2 = seed_room(db.connection(), "102");
        let r3 = seed_room(db.connection(), "103");
        let guest = seed_guest(db.connection(), "Ada");

        // Arriving today
        insert_reservation(
            db.connection(),
            &build(r1, guest, stay(10, 13), ReservationStatus::Confirmed),
        )
        .unwrap();
        // In house, leaving today
        insert_reservation(
            db.connection(),
            &build(r2, guest, stay(8, 10), ReservationStatus::CheckedIn),
        )
        .unwrap();
        // Future arrival within a week
        insert_reservation(
            db.connection(),
            &build(r3, guest, stay(14, 16), ReservationStatus::Pending),
        )
        .unwrap();

        let today = june(10);
        assert_eq!(arrivals_due_on(db.connection(), today).unwrap(), 1);
        assert_eq!(departures_due_on(db.connection(), today).unwrap(), 1);
        // r1's window contains today; r2's ends today (half-open, so not
        // counted); r3 is in the future.
        assert_eq!(rooms_reserved_on(db.connection(), today).unwrap(), 1);

        let upcoming = upcoming_reservations(db.connection(), today, 7, 5).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].stay(), stay(14, 16));
    }

    #[test]
    fn test_upcoming_limit_and_order() {
        let db = open_test_database();
        let guest = seed_guest(db.connection(), "Ada");
        for (i, day) in [16u32, 12, 14, 11, 15, 13].iter().enumerate() {
            let room = seed_room(db.connection(), &format!("10{i}"));
            insert_reservation(
                db.connection(),
                &build(room, guest, stay(*day, day + 2), ReservationStatus::Confirmed),
            )
            .unwrap();
        }

        let upcoming = upcoming_reservations(db.connection(), june(10), 7, 5).unwrap();
        assert_eq!(upcoming.len(), 5);
        let days: Vec<u32> = upcoming
            .iter()
            .map(|r| r.stay().check_in().format("%d").to_string().parse().unwrap())
            .collect();
        assert_eq!(days, vec![11, 12, 13, 14, 15]);
    }
}
