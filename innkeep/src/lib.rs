#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library for small-property booking and revenue management.
//!
//! innkeep tracks room inventory, arbitrates date-range reservation
//! conflicts, drives the reservation lifecycle (check-in, check-out,
//! cancellation), and derives the occupancy and revenue reports used for
//! dashboards and financial statements.
//!
//! ## Core Types
//!
//! - [`StayRange`]: half-open calendar-date intervals with overlap arithmetic
//! - [`Room`] and [`RoomStatus`]: physical room inventory
//! - [`Reservation`] and [`ReservationStatus`]: the booking state machine
//! - [`Payment`] and [`Expense`]: financial records read for aggregation
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::StayRange;
//!
//! let june = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
//!
//! // Half-open [check-in, check-out): three nights
//! let stay = StayRange::new(june(10), june(13)).unwrap();
//! assert_eq!(stay.nights(), 3);
//!
//! // Back-to-back stays never conflict
//! let next = StayRange::new(june(13), june(15)).unwrap();
//! assert!(!stay.overlaps(&next));
//! ```

pub mod availability;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod output;
pub mod payment;
pub mod reporting;
pub mod reservation;
pub mod room;
pub mod stay;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    AmendOptions, AmendPlan, BookOptions, BookPlan, CheckInOptions, CheckInPlan, CheckOutOptions,
    CheckOutPlan, DeletePlan, ExecutionResult, OperationPlan, PatchStatusPlan, PlanAction,
    PlanExecutor,
};
pub use payment::{Expense, ExpenseStatus, Payment, PaymentKind, PaymentMethod, PaymentStatus};
pub use reservation::{Reservation, ReservationStatus};
pub use room::{Room, RoomCategory, RoomStatus};
pub use stay::StayRange;
