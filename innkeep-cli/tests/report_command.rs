//! Integration tests for the report commands driven through the binary.

mod common;

use assert_cmd::prelude::*;
use common::{add_guest, add_room, book, init_property, innkeep_cmd};
use predicates::prelude::*;

/// Seeds a realized stay: booked, checked in, checked out.
fn seed_realized_stay(dir: &tempfile::TempDir) -> (String, String, String) {
    let room = add_room(dir, "101");
    let guest = add_guest(dir, "Ada Lovelace");
    let id = book(dir, &room, &guest, "2025-06-10", "2025-06-13");

    innkeep_cmd(dir)
        .args(["checkin", &id, "--at", "2025-06-10T15:00"])
        .assert()
        .success();
    innkeep_cmd(dir)
        .args(["checkout", &id, "--at", "2025-06-13T10:00"])
        .assert()
        .success();
    (room, guest, id)
}

#[test]
fn occupancy_report_counts_the_stay() {
    let dir = init_property();
    seed_realized_stay(&dir);
    add_room(&dir, "102");

    // Two rooms over ten days = 20 room-nights, 3 of them occupied
    innkeep_cmd(&dir)
        .args([
            "report", "occupancy", "--from", "2025-06-08", "--to", "2025-06-18",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 20 room-nights"));
}

#[test]
fn occupancy_report_json_shape() {
    let dir = init_property();
    seed_realized_stay(&dir);

    let output = innkeep_cmd(&dir)
        .args([
            "report", "occupancy", "--from", "2025-06-01", "--to", "2025-06-30", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("report emits valid JSON");
    assert_eq!(parsed["occupied_room_nights"], 3);
    assert!(parsed["daily"].as_array().unwrap().len() == 29);
    assert!(parsed["by_room_type"].as_array().is_some());
}

#[test]
fn revenue_report_empty_store_is_zero() {
    let dir = init_property();

    innkeep_cmd(&dir)
        .args([
            "report", "revenue", "--from", "2025-06-01", "--to", "2025-06-30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00"));
}

#[test]
fn month_report_composes_rollup() {
    let dir = init_property();
    seed_realized_stay(&dir);

    innkeep_cmd(&dir)
        .args(["report", "month", "--month", "2025-06"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Occupancy")
                .and(predicate::str::contains("Revenue"))
                .and(predicate::str::contains("Growth"))
                .and(predicate::str::contains("Net profit")),
        );
}

#[test]
fn dashboard_reports_the_day() {
    let dir = init_property();
    let room = add_room(&dir, "101");
    let guest = add_guest(&dir, "Ada Lovelace");
    book(&dir, &room, &guest, "2025-06-10", "2025-06-13");

    innkeep_cmd(&dir)
        .args(["report", "dashboard", "--date", "2025-06-10"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1 check-ins")
                .and(predicate::str::contains("Rooms available now: 0 of 1")),
        );
}

#[test]
fn bad_month_argument_is_rejected() {
    let dir = init_property();
    innkeep_cmd(&dir)
        .args(["report", "month", "--month", "June"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("expected YYYY-MM"));
}
