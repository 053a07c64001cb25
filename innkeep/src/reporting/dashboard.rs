//! Dashboard assembly: one snapshot composing the day's numbers from the
//! occupancy and revenue aggregators. Pure read composition, no mutation.

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::database;
use crate::error::Result;
use crate::reservation::Reservation;
use crate::stay::StayRange;

use super::occupancy::{daily_occupancy, period_occupancy};
use super::revenue::period_revenue;

/// How far ahead the dashboard looks for upcoming arrivals, in days.
const UPCOMING_HORIZON_DAYS: i64 = 7;

/// How many upcoming arrivals the dashboard lists.
const UPCOMING_LIMIT: u32 = 5;

/// The front-desk snapshot for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// The day the snapshot describes.
    pub today: NaiveDate,
    /// Completed payment revenue today.
    pub revenue_today: Decimal,
    /// Completed payment revenue this calendar month.
    pub revenue_month: Decimal,
    /// Completed payment revenue this calendar year.
    pub revenue_year: Decimal,
    /// Today's occupancy rate (realized stays).
    pub occupancy_today: Decimal,
    /// This month's occupancy rate.
    pub occupancy_month: Decimal,
    /// Bookings due to arrive today.
    pub arrivals_due: u32,
    /// In-house guests due to leave today.
    pub departures_due: u32,
    /// Rooms in the fixed inventory.
    pub total_rooms: u32,
    /// Rooms not covered by any active reservation today.
    pub available_rooms: u32,
    /// The next arrivals within a week, check-in ascending, at most five.
    pub upcoming: Vec<Reservation>,
}

fn month_window(today: NaiveDate) -> StayRange {
    let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
    let end = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1).unwrap()
    };
    StayRange::new(start, end).unwrap()
}

fn year_window(today: NaiveDate) -> StayRange {
    StayRange::new(
        NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap(),
    )
    .unwrap()
}

/// Assembles the dashboard snapshot for `today`.
///
/// # Errors
///
/// Returns an error if any underlying query fails.
///
/// # Examples
///
/// ```no_run
/// use chrono::Utc;
/// use innkeep::reporting::dashboard;
/// use innkeep::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let snapshot = dashboard(db.connection(), Utc::now().date_naive()).unwrap();
/// println!("{} arrivals today", snapshot.arrivals_due);
/// ```
pub fn dashboard(conn: &Connection, today: NaiveDate) -> Result<DashboardSnapshot> {
    let today_window = StayRange::new(today, today + chrono::Duration::days(1)).unwrap();

    let revenue_today = period_revenue(conn, &today_window)?.total;
    let revenue_month = period_revenue(conn, &month_window(today))?.total;
    let revenue_year = period_revenue(conn, &year_window(today))?.total;

    let occupancy_today = daily_occupancy(conn, today)?;
    let occupancy_month = period_occupancy(conn, &month_window(today))?;

    let total_rooms = database::count_rooms(conn)?;
    let reserved_now = database::rooms_reserved_on(conn, today)?;

    Ok(DashboardSnapshot {
        today,
        revenue_today,
        revenue_month,
        revenue_year,
        occupancy_today: occupancy_today.rate,
        occupancy_month: occupancy_month.rate,
        arrivals_due: database::arrivals_due_on(conn, today)?,
        departures_due: database::departures_due_on(conn, today)?,
        total_rooms,
        available_rooms: total_rooms.saturating_sub(reserved_now),
        upcoming: database::upcoming_reservations(
            conn,
            today,
            UPCOMING_HORIZON_DAYS,
            UPCOMING_LIMIT,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{open_test_database, seed_guest, seed_room};
    use crate::database::{insert_payment, insert_reservation};
    use crate::payment::{Payment, PaymentKind, PaymentMethod};
    use crate::reservation::ReservationStatus;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn stay(a: u32, b: u32) -> StayRange {
        StayRange::new(june(a), june(b)).unwrap()
    }

    fn seed(conn: &Connection, room: i64, guest: i64, s: StayRange, status: ReservationStatus) {
        let r = Reservation::builder(room, guest, s)
            .status(status)
            .build()
            .unwrap();
        insert_reservation(conn, &r).unwrap();
    }

    #[test]
    fn test_dashboard_composition() {
        let db = open_test_database();
        let conn = db.connection();
        let guest = seed_guest(conn, "Ada");
        let r1 = seed_room(conn, "101");
        let r2 = seed_room(conn, "102");
        let r3 = seed_room(conn, "103");
        let _r4 = seed_room(conn, "104");

        // In house, leaving today
        seed(conn, r1, guest, stay(8, 10), ReservationStatus::CheckedIn);
        // Arriving today
        seed(conn, r2, guest, stay(10, 13), ReservationStatus::Confirmed);
        // Arriving in three days
        seed(conn, r3, guest, stay(13, 15), ReservationStatus::Pending);

        // Money: today, earlier this month, and January
        insert_payment(
            conn,
            &Payment::completed(
                guest,
                Decimal::new(20000, 2),
                PaymentMethod::Card,
                PaymentKind::Reservation,
                june(10).and_hms_opt(11, 0, 0).unwrap(),
            ),
        )
        .unwrap();
        insert_payment(
            conn,
            &Payment::completed(
                guest,
                Decimal::new(5000, 2),
                PaymentMethod::Cash,
                PaymentKind::Sale,
                june(2).and_hms_opt(11, 0, 0).unwrap(),
            ),
        )
        .unwrap();
        insert_payment(
            conn,
            &Payment::completed(
                guest,
                Decimal::new(7000, 2),
                PaymentMethod::Card,
                PaymentKind::Reservation,
                NaiveDate::from_ymd_opt(2025, 1, 15)
                    .unwrap()
                    .and_hms_opt(11, 0, 0)
                    .unwrap(),
            ),
        )
        .unwrap();

        let snapshot = dashboard(conn, june(10)).unwrap();

        assert_eq!(snapshot.revenue_today, Decimal::new(20000, 2));
        assert_eq!(snapshot.revenue_month, Decimal::new(25000, 2));
        assert_eq!(snapshot.revenue_year, Decimal::new(32000, 2));

        assert_eq!(snapshot.arrivals_due, 1);
        assert_eq!(snapshot.departures_due, 1);

        // Today r2's window covers the day (active); r1 ends today
        // (half-open) and r3 is in the future: 4 rooms - 1 reserved.
        assert_eq!(snapshot.total_rooms, 4);
        assert_eq!(snapshot.available_rooms, 3);

        assert_eq!(snapshot.upcoming.len(), 1);
        assert_eq!(snapshot.upcoming[0].stay(), stay(13, 15));

        // r1's realized stay ends today (half-open) and r2 hasn't checked
        // in, so no room counts as occupied
        assert_eq!(snapshot.occupancy_today, Decimal::ZERO);
    }

    #[test]
    fn test_dashboard_empty_property() {
        let db = open_test_database();
        let snapshot = dashboard(db.connection(), june(10)).unwrap();
        assert_eq!(snapshot.total_rooms, 0);
        assert_eq!(snapshot.available_rooms, 0);
        assert_eq!(snapshot.occupancy_today, Decimal::ZERO);
        assert_eq!(snapshot.revenue_year, Decimal::ZERO);
        assert!(snapshot.upcoming.is_empty());
    }

    #[test]
    fn test_upcoming_respects_horizon() {
        let db = open_test_database();
        let conn = db.connection();
        let guest = seed_guest(conn, "Ada");
        let r1 = seed_room(conn, "101");
        let r2 = seed_room(conn, "102");

        // Inside the 7-day horizon
        seed(conn, r1, guest, stay(16, 18), ReservationStatus::Confirmed);
        // Outside it
        seed(conn, r2, guest, stay(25, 28), ReservationStatus::Confirmed);

        let snapshot = dashboard(conn, june(10)).unwrap();
        assert_eq!(snapshot.upcoming.len(), 1);
        assert_eq!(snapshot.upcoming[0].stay(), stay(16, 18));
    }
}
