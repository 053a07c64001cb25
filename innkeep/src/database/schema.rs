//! Database schema definitions and SQL constants.
//!
//! Conventions: calendar dates are TEXT ISO (`YYYY-MM-DD`), which compares
//! lexicographically in date order so the overlap predicates run in SQL;
//! money is TEXT holding an exact decimal; audit timestamps are Unix
//! seconds in INTEGER columns.

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table, which stores key-value
/// pairs for database configuration and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table. Room numbers are unique across
/// the property.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY,
        number TEXT NOT NULL UNIQUE,
        capacity INTEGER NOT NULL,
        nightly_rate TEXT NOT NULL,
        sea_view INTEGER NOT NULL DEFAULT 0,
        balcony INTEGER NOT NULL DEFAULT 0,
        air_conditioning INTEGER NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'available'
    )";

/// SQL statement to create the guests table: the minimal read-side mirror
/// of the platform's customer store, enough for referential checks.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// The stay window is `[check_in, check_out)`; the CHECK constraint keeps
/// reversed or empty windows out even if a writer bypasses the builder.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        guest_id INTEGER NOT NULL REFERENCES guests(id),
        extra_guest_ids TEXT NOT NULL DEFAULT '[]',
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        guests INTEGER NOT NULL,
        total_amount TEXT NOT NULL,
        paid_amount TEXT NOT NULL,
        status TEXT NOT NULL,
        actual_check_in INTEGER,
        actual_check_out INTEGER,
        notes TEXT NOT NULL DEFAULT '[]',
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        CHECK (check_in < check_out)
    )";

/// SQL statement to create the payments table (read model for revenue).
pub const CREATE_PAYMENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS payments (
        id INTEGER PRIMARY KEY,
        reservation_id INTEGER REFERENCES reservations(id),
        sale_id INTEGER,
        guest_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        method TEXT NOT NULL,
        kind TEXT NOT NULL,
        status TEXT NOT NULL,
        paid_at INTEGER NOT NULL
    )";

/// SQL statement to create the expenses table (read model for net profit).
pub const CREATE_EXPENSES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS expenses (
        id INTEGER PRIMARY KEY,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        status TEXT NOT NULL,
        due_date TEXT,
        paid_date TEXT
    )";

/// Index speeding up the per-room overlap scan behind every availability
/// check.
pub const CREATE_RESERVATION_ROOM_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_room_dates
    ON reservations(room_id, check_in)";

/// Index speeding up status-filtered scans (occupancy, calendar).
pub const CREATE_RESERVATION_STATUS_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_status
    ON reservations(status)";

/// Index speeding up revenue window queries.
pub const CREATE_PAYMENT_PAID_AT_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_payments_paid_at
    ON payments(paid_at)";

/// Index speeding up the paid-expense scan behind net profit.
pub const CREATE_EXPENSE_STATUS_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_expenses_status
    ON expenses(status)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
