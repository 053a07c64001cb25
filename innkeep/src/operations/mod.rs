//! Booking operations using the plan-execute pattern.
//!
//! Operations are split into two phases:
//!
//! 1. **Planning**: analyzes the request, validates fields and referenced
//!    records, builds a plan; no writes.
//! 2. **Execution**: applies the plan's actions to the store, re-checking
//!    availability under the writer lock immediately before any
//!    reservation write.
//!
//! The split buys dry-run mode, inspectable/loggable intent, and a single
//! place where the check-then-act race is closed: whatever the planning
//! phase observed, only the executor's re-check inside the caller's
//! IMMEDIATE transaction authorizes a write.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use innkeep::config::ConfigBuilder;
//! use innkeep::operations::{self, BookOptions, BookPlan};
//! use innkeep::{Database, DatabaseConfig, StayRange};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let config = ConfigBuilder::new().build().unwrap();
//! let june = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
//!
//! let options = BookOptions::new(1, 1, StayRange::new(june(10), june(13)).unwrap())
//!     .with_guests(2)
//!     .with_total_amount(Decimal::new(36000, 2));
//!
//! let plan = BookPlan::new(options, &config).build_plan(db.connection()).unwrap();
//! let result = operations::execute_in_transaction(&mut db, &plan).unwrap();
//! println!("booked as reservation {:?}", result.reservation_id);
//! ```

pub mod amend;
pub mod book;
pub mod executor;
pub mod lifecycle;
pub mod plan;

pub use amend::{AmendOptions, AmendPlan};
pub use book::{BookOptions, BookPlan};
pub use executor::{ExecutionResult, PlanExecutor};
pub use lifecycle::{
    CheckInOptions, CheckInPlan, CheckOutOptions, CheckOutPlan, DeletePlan, PatchStatusPlan,
};
pub use plan::{OperationPlan, PlanAction};

use crate::database::Database;
use crate::error::Result;

/// Executes a plan inside a fresh IMMEDIATE transaction, committing on
/// success.
///
/// This is the one-call path for callers that don't need to batch several
/// plans into one transaction. A transient busy/locked failure gets one
/// transparent retry of the whole transaction before surfacing.
///
/// # Errors
///
/// Returns an error if the transaction cannot be started or committed, or
/// if any action fails; a failed action rolls the whole plan back.
pub fn execute_in_transaction(
    db: &mut Database,
    plan: &OperationPlan,
) -> Result<ExecutionResult> {
    crate::database::with_retry(|| {
        let tx = db.begin_transaction()?;
        let result = PlanExecutor::new(&tx).execute(plan)?;
        tx.commit()?;
        Ok(result)
    })
}
