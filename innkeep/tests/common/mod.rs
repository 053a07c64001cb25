//! Common test utilities for integration tests.
//!
//! Provides a small property fixture: a temporary database seeded with a
//! fixed room inventory and a guest, plus date helpers shared by the
//! suites.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tempfile::TempDir;

use innkeep::config::ConfigBuilder;
use innkeep::database::{self, Database, DatabaseConfig};
use innkeep::operations::{self, BookOptions, BookPlan};
use innkeep::{Config, Room, StayRange};

/// A temporary property: database file, config, seeded rooms and a guest.
///
/// The `TempDir` rides along so the database file outlives the fixture.
pub struct Property {
    #[allow(dead_code)]
    dir: TempDir,
    /// Path to the database file, for opening extra connections.
    #[allow(dead_code)]
    pub db_path: std::path::PathBuf,
    /// An open handle to the property database.
    pub db: Database,
    /// Merged configuration with defaults.
    pub config: Config,
    /// Ids of the seeded rooms, in room-number order.
    pub rooms: Vec<i64>,
    /// A seeded guest.
    pub guest: i64,
}

impl Property {
    /// Creates a property with `room_count` double rooms at 100.00/night.
    pub fn with_rooms(room_count: u32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("innkeep.db");
        let db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
        let config = ConfigBuilder::new().without_env().build().unwrap();

        let mut rooms = Vec::new();
        for i in 0..room_count {
            let room = Room::builder(format!("1{i:02}"), 2, Decimal::new(10000, 2))
                .build()
                .unwrap();
            rooms.push(database::insert_room(db.connection(), &room).unwrap());
        }
        let guest = database::insert_guest(db.connection(), "Ada Lovelace").unwrap();

        Self {
            dir,
            db_path,
            db,
            config,
            rooms,
            guest,
        }
    }

    /// Books a room through the full plan/execute path, returning the new
    /// reservation id.
    pub fn book(&mut self, room: i64, stay: StayRange) -> innkeep::Result<i64> {
        let options = BookOptions::new(room, self.guest, stay)
            .with_guests(2)
            .with_total_amount(Decimal::new(10000, 2) * Decimal::from(stay.nights()));
        let plan = BookPlan::new(options, &self.config).build_plan(self.db.connection())?;
        let result = operations::execute_in_transaction(&mut self.db, &plan)?;
        Ok(result.reservation_id.expect("booking returns an id"))
    }
}

/// A date in June 2025.
#[allow(dead_code)]
pub fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

/// A stay range within June 2025.
#[allow(dead_code)]
pub fn stay(check_in: u32, check_out: u32) -> StayRange {
    StayRange::new(june(check_in), june(check_out)).unwrap()
}

/// A timestamp within June 2025.
#[allow(dead_code)]
pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    june(day).and_hms_opt(hour, 0, 0).unwrap()
}
