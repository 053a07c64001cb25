//! Occupancy aggregation: per-day and per-period rates, room-night
//! accounting, and room-type breakdowns.
//!
//! Occupancy counts realized stays (reservations that reached CheckedIn
//! or CheckedOut) whose windows cover the dates in question. A missing
//! denominator (no rooms, no occupied rooms) degrades to a defined zero
//! rather than failing.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::database;
use crate::error::Result;
use crate::payment::PaymentKind;
use crate::room::RoomCategory;
use crate::stay::StayRange;

/// Occupancy and revenue for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyOccupancy {
    /// The day in question.
    pub date: NaiveDate,
    /// Rooms covered by a realized stay on this date.
    pub occupied_rooms: u32,
    /// Rooms in the fixed inventory.
    pub total_rooms: u32,
    /// `occupied / total × 100`, 0.00 when the property has no rooms.
    pub rate: Decimal,
    /// Completed reservation payments taken this day.
    pub revenue: Decimal,
    /// `revenue / occupied_rooms`, 0.00 when nothing was occupied.
    pub avg_room_rate: Decimal,
}

/// Occupancy for one room category over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomTypeOccupancy {
    /// The grouping key.
    pub category: RoomCategory,
    /// Human label for the category.
    pub label: String,
    /// Rooms of this category.
    pub total_rooms: u32,
    /// Room-nights of this category covered by realized stays.
    pub occupied_room_nights: i64,
    /// `total_rooms × nights in the period`.
    pub total_room_nights: i64,
    /// `occupied / total × 100`, 0.00 when the category is empty.
    pub rate: Decimal,
}

/// Occupancy over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodOccupancy {
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// End of the period (exclusive).
    pub end: NaiveDate,
    /// `occupied_room_nights / total_room_nights × 100`.
    pub rate: Decimal,
    /// Room-nights covered by realized stays, counted once per room and
    /// night.
    pub occupied_room_nights: i64,
    /// `total_rooms × days in the range`.
    pub total_room_nights: i64,
    /// Per-day breakdown over the range.
    pub daily: Vec<DailyOccupancy>,
    /// Per-category breakdown, categories in label order.
    pub by_room_type: Vec<RoomTypeOccupancy>,
}

fn percentage(part: i64, whole: i64) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Computes occupancy and reservation revenue for one day.
///
/// # Errors
///
/// Returns an error if the underlying queries fail.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use innkeep::reporting::daily_occupancy;
/// use innkeep::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let day = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
/// let report = daily_occupancy(db.connection(), day).unwrap();
/// println!("{}% occupied", report.rate);
/// ```
pub fn daily_occupancy(conn: &Connection, date: NaiveDate) -> Result<DailyOccupancy> {
    let total_rooms = database::count_rooms(conn)?;

    let reservations = database::occupancy_reservations_containing(conn, date)?;
    let occupied: HashSet<i64> = reservations.iter().map(|r| r.room_id()).collect();
    let occupied_rooms = u32::try_from(occupied.len()).unwrap_or(u32::MAX);

    let day_start = date.and_hms_opt(0, 0, 0).unwrap();
    let day_end = (date + chrono::Duration::days(1)).and_hms_opt(0, 0, 0).unwrap();
    let revenue: Decimal = database::completed_payments_between(conn, day_start, day_end)?
        .into_iter()
        .filter(|p| p.kind == PaymentKind::Reservation)
        .map(|p| p.amount)
        .sum();

    let avg_room_rate = if occupied_rooms == 0 {
        Decimal::ZERO
    } else {
        (revenue / Decimal::from(occupied_rooms)).round_dp(2)
    };

    Ok(DailyOccupancy {
        date,
        occupied_rooms,
        total_rooms,
        rate: percentage(i64::from(occupied_rooms), i64::from(total_rooms)),
        revenue,
        avg_room_rate,
    })
}

/// Computes occupancy over a date range, with daily and room-type
/// breakdowns.
///
/// Room-nights are counted once per room and night, so the occupied total
/// can never exceed `total_rooms × days` even when a room's history holds
/// realized stays that overlap.
///
/// # Errors
///
/// Returns an error if the underlying queries fail.
pub fn period_occupancy(conn: &Connection, window: &StayRange) -> Result<PeriodOccupancy> {
    let rooms = database::list_rooms(conn)?;
    let total_rooms = i64::try_from(rooms.len()).unwrap_or(i64::MAX);
    let days = window.nights();
    let total_room_nights = total_rooms * days;

    // (room, night) pairs covered by realized stays, clipped to the window.
    let mut covered: HashSet<(i64, NaiveDate)> = HashSet::new();
    for reservation in database::occupancy_reservations_overlapping(conn, window)? {
        if let Some(clipped) = reservation.stay().clip(window) {
            for night in clipped.dates() {
                covered.insert((reservation.room_id(), night));
            }
        }
    }
    let occupied_room_nights = i64::try_from(covered.len()).unwrap_or(i64::MAX);

    // Room-type breakdown over the same covered set.
    let mut categories: BTreeMap<RoomCategory, (u32, i64)> = BTreeMap::new();
    for room in &rooms {
        let entry = categories.entry(room.category()).or_insert((0, 0));
        entry.0 += 1;
        if let Some(id) = room.id() {
            entry.1 += covered.iter().filter(|(rid, _)| *rid == id).count() as i64;
        }
    }
    let by_room_type = categories
        .into_iter()
        .map(|(category, (room_count, occupied))| {
            let category_total = i64::from(room_count) * days;
            RoomTypeOccupancy {
                label: category.label(),
                category,
                total_rooms: room_count,
                occupied_room_nights: occupied,
                total_room_nights: category_total,
                rate: percentage(occupied, category_total),
            }
        })
        .collect();

    let daily = window
        .dates()
        .map(|date| daily_occupancy(conn, date))
        .collect::<Result<Vec<_>>>()?;

    Ok(PeriodOccupancy {
        start: window.check_in(),
        end: window.check_out(),
        rate: percentage(occupied_room_nights, total_room_nights),
        occupied_room_nights,
        total_room_nights,
        daily,
        by_room_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{open_test_database, seed_guest};
    use crate::database::{insert_payment, insert_reservation, insert_room};
    use crate::payment::{Payment, PaymentMethod};
    use crate::reservation::{Reservation, ReservationStatus};
    use crate::room::Room;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn stay(a: u32, b: u32) -> StayRange {
        StayRange::new(june(a), june(b)).unwrap()
    }

    fn seed_room_with(conn: &Connection, number: &str, capacity: u32, sea_view: bool) -> i64 {
        let room = Room::builder(number, capacity, Decimal::new(10000, 2))
            .sea_view(sea_view)
            .build()
            .unwrap();
        insert_room(conn, &room).unwrap()
    }

    fn realize(conn: &Connection, room: i64, guest: i64, s: StayRange, status: ReservationStatus) {
        let r = Reservation::builder(room, guest, s)
            .status(status)
            .build()
            .unwrap();
        insert_reservation(conn, &r).unwrap();
    }

    #[test]
    fn test_daily_occupancy_counts_realized_stays() {
        let db = open_test_database();
        let conn = db.connection();
        let r1 = seed_room_with(conn, "101", 2, false);
        let r2 = seed_room_with(conn, "102", 2, false);
        let _r3 = seed_room_with(conn, "103", 2, false);
        let r4 = seed_room_with(conn, "104", 2, false);
        let guest = seed_guest(conn, "Ada");

        realize(conn, r1, guest, stay(10, 13), ReservationStatus::CheckedIn);
        realize(conn, r2, guest, stay(8, 11), ReservationStatus::CheckedOut);
        // Pending and Confirmed windows are bookings, not occupancy
        realize(conn, r4, guest, stay(10, 12), ReservationStatus::Confirmed);

        let report = daily_occupancy(conn, june(10)).unwrap();
        assert_eq!(report.total_rooms, 4);
        assert_eq!(report.occupied_rooms, 2);
        assert_eq!(report.rate, Decimal::new(5000, 2)); // 50.00
    }

    #[test]
    fn test_daily_occupancy_no_rooms_is_zero() {
        let db = open_test_database();
        let report = daily_occupancy(db.connection(), june(10)).unwrap();
        assert_eq!(report.total_rooms, 0);
        assert_eq!(report.rate, Decimal::ZERO);
        assert_eq!(report.avg_room_rate, Decimal::ZERO);
    }

    #[test]
    fn test_daily_revenue_counts_reservation_payments_only() {
        let db = open_test_database();
        let conn = db.connection();
        let room = seed_room_with(conn, "101", 2, false);
        let guest = seed_guest(conn, "Ada");
        realize(conn, room, guest, stay(10, 13), ReservationStatus::CheckedIn);

        let noon = june(10).and_hms_opt(12, 0, 0).unwrap();
        insert_payment(
            conn,
            &Payment::completed(
                guest,
                Decimal::new(24000, 2),
                PaymentMethod::Card,
                PaymentKind::Reservation,
                noon,
            ),
        )
        .unwrap();
        // Sale payments belong to revenue reports, not room occupancy
        insert_payment(
            conn,
            &Payment::completed(
                guest,
                Decimal::new(1500, 2),
                PaymentMethod::Cash,
                PaymentKind::Sale,
                noon,
            ),
        )
        .unwrap();
        // Next day's payment is outside the window
        insert_payment(
            conn,
            &Payment::completed(
                guest,
                Decimal::new(9900, 2),
                PaymentMethod::Card,
                PaymentKind::Reservation,
                june(11).and_hms_opt(9, 0, 0).unwrap(),
            ),
        )
        .unwrap();

        let report = daily_occupancy(conn, june(10)).unwrap();
        assert_eq!(report.revenue, Decimal::new(24000, 2));
        assert_eq!(report.occupied_rooms, 1);
        assert_eq!(report.avg_room_rate, Decimal::new(24000, 2));
    }

    #[test]
    fn test_period_occupancy_worked_example() {
        // 10 rooms over June (30 days) = 300 room-nights; 90 occupied
        // room-nights -> 30.00%
        let db = open_test_database();
        let conn = db.connection();
        let guest = seed_guest(conn, "Ada");
        let mut rooms = Vec::new();
        for i in 0..10 {
            rooms.push(seed_room_with(conn, &format!("1{i:02}"), 2, false));
        }
        // 9 rooms × a 10-night realized stay each = 90 room-nights
        for room in rooms.iter().take(9) {
            realize(conn, *room, guest, stay(11, 21), ReservationStatus::CheckedOut);
        }

        let window = StayRange::new(june(1), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()).unwrap();
        let report = period_occupancy(conn, &window).unwrap();
        assert_eq!(report.total_room_nights, 300);
        assert_eq!(report.occupied_room_nights, 90);
        assert_eq!(report.rate, Decimal::new(3000, 2)); // 30.00
        assert_eq!(report.daily.len(), 30);
    }

    #[test]
    fn test_period_occupancy_clips_straddling_stays() {
        let db = open_test_database();
        let conn = db.connection();
        let room = seed_room_with(conn, "101", 2, false);
        let guest = seed_guest(conn, "Ada");
        // Stay runs 2025-06-28 .. 2025-07-03; only two nights land in June
        let s = StayRange::new(june(28), NaiveDate::from_ymd_opt(2025, 7, 3).unwrap()).unwrap();
        realize(conn, room, guest, s, ReservationStatus::CheckedIn);

        let window = StayRange::new(june(1), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()).unwrap();
        let report = period_occupancy(conn, &window).unwrap();
        assert_eq!(report.occupied_room_nights, 2);
    }

    #[test]
    fn test_period_occupancy_room_type_breakdown() {
        let db = open_test_database();
        let conn = db.connection();
        let sea = seed_room_with(conn, "201", 2, true);
        let _sea2 = seed_room_with(conn, "202", 2, true);
        let land = seed_room_with(conn, "101", 2, false);
        let guest = seed_guest(conn, "Ada");

        realize(conn, sea, guest, stay(10, 15), ReservationStatus::CheckedOut); // 5 nights
        realize(conn, land, guest, stay(10, 12), ReservationStatus::CheckedIn); // 2 nights

        let window = stay(10, 20); // 10 days
        let report = period_occupancy(conn, &window).unwrap();

        assert_eq!(report.by_room_type.len(), 2);
        let sea_view = report
            .by_room_type
            .iter()
            .find(|t| t.category.sea_view)
            .unwrap();
        assert_eq!(sea_view.total_rooms, 2);
        assert_eq!(sea_view.total_room_nights, 20);
        assert_eq!(sea_view.occupied_room_nights, 5);
        assert_eq!(sea_view.rate, Decimal::new(2500, 2)); // 25.00

        let landward = report
            .by_room_type
            .iter()
            .find(|t| !t.category.sea_view)
            .unwrap();
        assert_eq!(landward.occupied_room_nights, 2);
        assert_eq!(landward.rate, Decimal::new(2000, 2)); // 2/10 = 20.00
    }

    #[test]
    fn test_rate_bounds_and_consistency() {
        let db = open_test_database();
        let conn = db.connection();
        let room = seed_room_with(conn, "101", 2, false);
        let guest = seed_guest(conn, "Ada");
        realize(conn, room, guest, stay(1, 30), ReservationStatus::CheckedIn);

        let report = period_occupancy(conn, &stay(5, 10)).unwrap();
        assert!(report.rate >= Decimal::ZERO && report.rate <= Decimal::ONE_HUNDRED);
        assert!(report.occupied_room_nights <= report.total_room_nights);
        // The one room is occupied every night of the window
        assert_eq!(report.rate, Decimal::ONE_HUNDRED.round_dp(2));
    }
}
