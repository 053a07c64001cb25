//! Race condition tests.
//!
//! The availability check and the reservation write must behave as one
//! atomic unit: when several writers fight over the same room and window,
//! exactly one booking may land. These tests open one connection per
//! thread against the same database file and rely on the IMMEDIATE
//! transaction taken by the executor path.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{at, stay, Property};

use innkeep::config::ConfigBuilder;
use innkeep::database::{self, Database, DatabaseConfig};
use innkeep::operations::{self, BookOptions, BookPlan, CheckInOptions, CheckInPlan};
use innkeep::ReservationStatus;

#[test]
fn concurrent_bookings_for_one_window_yield_one_winner() {
    let property = Property::with_rooms(1);
    let room = property.rooms[0];
    let guest = property.guest;
    let db_path = property.db_path.clone();

    const WRITERS: usize = 8;
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let db_path = db_path.clone();
            thread::spawn(move || {
                let mut db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
                let config = ConfigBuilder::new().without_env().build().unwrap();

                // Line every writer up on the same instant
                barrier.wait();

                let options = BookOptions::new(room, guest, stay(10, 13));
                let plan = match BookPlan::new(options, &config).build_plan(db.connection()) {
                    Ok(plan) => plan,
                    Err(e) => return Err(e),
                };
                operations::execute_in_transaction(&mut db, &plan)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one booking may win the window");

    for result in results.iter().filter(|r| r.is_err()) {
        let err = result.as_ref().unwrap_err();
        assert!(
            err.is_conflict() || err.is_retryable(),
            "losers must fail with a conflict (or a busy store), got: {err}"
        );
    }

    // The store holds exactly one reservation
    let count: i64 = property
        .db
        .connection()
        .query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn concurrent_disjoint_windows_all_land() {
    let property = Property::with_rooms(1);
    let room = property.rooms[0];
    let guest = property.guest;
    let db_path = property.db_path.clone();

    // Back-to-back weeks on the same room: no pair overlaps
    let windows = [stay(1, 5), stay(5, 9), stay(9, 13), stay(13, 17)];
    let barrier = Arc::new(Barrier::new(windows.len()));

    let handles: Vec<_> = windows
        .into_iter()
        .map(|window| {
            let barrier = Arc::clone(&barrier);
            let db_path = db_path.clone();
            thread::spawn(move || {
                let mut db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
                let config = ConfigBuilder::new().without_env().build().unwrap();
                barrier.wait();

                let plan = BookPlan::new(BookOptions::new(room, guest, window), &config)
                    .build_plan(db.connection())?;
                operations::execute_in_transaction(&mut db, &plan)
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().expect("disjoint windows never conflict");
    }

    let count: i64 = property
        .db
        .connection()
        .query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 4);
}

#[test]
fn concurrent_checkins_cannot_both_succeed() {
    let mut property = Property::with_rooms(1);
    let id = property.book(property.rooms[0], stay(10, 13)).unwrap();
    let db_path = property.db_path.clone();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let db_path = db_path.clone();
            thread::spawn(move || {
                let mut db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
                barrier.wait();

                let options = CheckInOptions::new(id, at(10, 15)).with_now(at(10, 16));
                let plan = CheckInPlan::new(options).build_plan(db.connection())?;
                operations::execute_in_transaction(&mut db, &plan)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "two desks cannot both check the guest in");

    let reservation = database::get_reservation(property.db.connection(), id)
        .unwrap()
        .unwrap();
    assert_eq!(reservation.status(), ReservationStatus::CheckedIn);
    // The single recorded arrival, not a second overwrite
    assert_eq!(reservation.actual_check_in(), Some(at(10, 15)));
}
