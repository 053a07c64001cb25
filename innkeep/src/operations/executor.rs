//! Plan execution engine.
//!
//! The executor takes operation plans and applies them to the store. Run
//! it inside an IMMEDIATE transaction (see [`crate::Database::begin_transaction`])
//! so that the availability re-check and the reservation write observe the
//! same state; the convenience wrapper
//! [`crate::operations::execute_in_transaction`] does exactly that.

use rusqlite::Connection;

use crate::availability;
use crate::database;
use crate::error::{Error, Result};
use crate::reservation::Reservation;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be, in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The id of the reservation the plan created or operated on.
    pub reservation_id: Option<i64>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool, reservation_id: Option<i64>) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation_id,
        }
    }
}

/// Executes operation plans against the store.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting what would happen without touching the store).
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use innkeep::config::ConfigBuilder;
/// use innkeep::{BookOptions, BookPlan, Database, DatabaseConfig, PlanExecutor, StayRange};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let config = ConfigBuilder::new().build().unwrap();
/// let june = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
/// let stay = StayRange::new(june(10), june(13)).unwrap();
///
/// let options = BookOptions::new(1, 1, stay).with_total_amount(Decimal::new(36000, 2));
/// let plan = BookPlan::new(options, &config).build_plan(db.connection()).unwrap();
///
/// let tx = db.begin_transaction().unwrap();
/// let result = PlanExecutor::new(&tx).execute(&plan).unwrap();
/// tx.commit().unwrap();
/// assert!(result.reservation_id.is_some());
/// ```
pub struct PlanExecutor<'conn> {
    conn: &'conn Connection,
    dry_run: bool,
}

impl<'conn> PlanExecutor<'conn> {
    /// Creates a new plan executor over a connection or open transaction.
    #[must_use]
    pub const fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode: the plan is reported, nothing is
    /// written.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute; when run inside a
    /// transaction the caller's rollback discards every prior action of
    /// the same plan.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            let id = plan.actions.iter().find_map(|action| match action {
                PlanAction::UpdateReservation { id, .. }
                | PlanAction::TransitionReservation { id, .. }
                | PlanAction::DeleteReservation { id } => Some(*id),
                _ => None,
            });
            return Ok(ExecutionResult::new(plan, true, id));
        }

        let mut reservation_id = None;
        for action in &plan.actions {
            if let Some(id) = self.execute_action(action)? {
                reservation_id = Some(id);
            }
        }

        Ok(ExecutionResult::new(plan, false, reservation_id))
    }

    /// Executes a single action, returning the reservation id it touched.
    fn execute_action(&mut self, action: &PlanAction) -> Result<Option<i64>> {
        match action {
            PlanAction::CreateReservation(reservation) => {
                // The authoritative availability check. Planning already
                // checked, but only this one runs under the writer lock,
                // so only this one rules out a booking that slipped in
                // between planning and execution.
                self.ensure_available(reservation, None)?;
                let id = database::insert_reservation(self.conn, reservation)?;
                log::debug!(
                    "created reservation {id} for room {} over {}",
                    reservation.room_id(),
                    reservation.stay()
                );
                Ok(Some(id))
            }
            PlanAction::UpdateReservation { id, reservation } => {
                self.ensure_available(reservation, Some(*id))?;
                if !database::update_reservation(self.conn, *id, reservation)? {
                    return Err(Error::ReservationNotFound { id: *id });
                }
                log::debug!("updated reservation {id}");
                Ok(Some(*id))
            }
            PlanAction::TransitionReservation {
                id,
                from,
                to,
                actual_check_in,
                actual_check_out,
                note,
            } => {
                let moved = database::transition_reservation(
                    self.conn,
                    *id,
                    *from,
                    *to,
                    *actual_check_in,
                    *actual_check_out,
                    note.as_deref(),
                )?;
                if !moved {
                    // Distinguish a vanished reservation from one a
                    // concurrent writer moved first.
                    return if database::get_reservation(self.conn, *id)?.is_none() {
                        Err(Error::ReservationNotFound { id: *id })
                    } else {
                        Err(Error::StaleUpdate {
                            id: *id,
                            expected: *from,
                        })
                    };
                }
                log::debug!("reservation {id}: {from} -> {to}");
                Ok(Some(*id))
            }
            PlanAction::SetRoomStatus { room_id, status } => {
                if !database::set_room_status(self.conn, *room_id, *status)? {
                    return Err(Error::RoomNotFound { id: *room_id });
                }
                log::debug!("room {room_id} status -> {status}");
                Ok(None)
            }
            PlanAction::DeleteReservation { id } => {
                if !database::delete_reservation(self.conn, *id)? {
                    return Err(Error::ReservationNotFound { id: *id });
                }
                log::debug!("deleted reservation {id}");
                Ok(Some(*id))
            }
        }
    }

    fn ensure_available(&self, reservation: &Reservation, exclude: Option<i64>) -> Result<()> {
        let conflicts = availability::find_conflicts(
            self.conn,
            reservation.room_id(),
            &reservation.stay(),
            exclude,
        )?;
        if conflicts.is_empty() {
            return Ok(());
        }
        let details = conflicts
            .iter()
            .map(|c| {
                format!(
                    "reservation {} ({})",
                    c.id().unwrap_or_default(),
                    c.stay()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::RoomUnavailable {
            room_id: reservation.room_id(),
            window: reservation.stay(),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{open_test_database, seed_guest, seed_room};
    use crate::reservation::ReservationStatus;
    use crate::room::RoomStatus;
    use crate::stay::StayRange;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn stay(a: u32, b: u32) -> StayRange {
        StayRange::new(
            NaiveDate::from_ymd_opt(2025, 6, a).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, b).unwrap(),
        )
        .unwrap()
    }

    fn reservation(room: i64, guest: i64, s: StayRange) -> Reservation {
        Reservation::builder(room, guest, s)
            .total_amount(Decimal::new(30000, 2))
            .build()
            .unwrap()
    }

    #[test]
    fn test_execute_create_reservation() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");

        let plan = OperationPlan::new("Book")
            .add_action(PlanAction::CreateReservation(reservation(room, guest, stay(10, 13))));

        let result = PlanExecutor::new(db.connection()).execute(&plan).unwrap();
        assert!(result.success);
        assert!(!result.dry_run);
        let id = result.reservation_id.unwrap();

        let loaded = database::get_reservation(db.connection(), id).unwrap().unwrap();
        assert_eq!(loaded.status(), ReservationStatus::Pending);
    }

    #[test]
    fn test_create_rechecks_availability() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");

        // A booking that landed after "planning"
        database::insert_reservation(db.connection(), &reservation(room, guest, stay(10, 13)))
            .unwrap();

        let plan = OperationPlan::new("Book")
            .add_action(PlanAction::CreateReservation(reservation(room, guest, stay(12, 15))));

        let err = PlanExecutor::new(db.connection()).execute(&plan).unwrap_err();
        assert!(err.is_conflict());
        assert!(format!("{err}").contains("unavailable"));
    }

    #[test]
    fn test_update_excludes_own_reservation() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");
        let id =
            database::insert_reservation(db.connection(), &reservation(room, guest, stay(10, 13)))
                .unwrap();

        // Extending the same reservation's window must not conflict with
        // itself.
        let plan = OperationPlan::new("Amend").add_action(PlanAction::UpdateReservation {
            id,
            reservation: reservation(room, guest, stay(10, 15)),
        });
        let result = PlanExecutor::new(db.connection()).execute(&plan).unwrap();
        assert_eq!(result.reservation_id, Some(id));

        let loaded = database::get_reservation(db.connection(), id).unwrap().unwrap();
        assert_eq!(loaded.stay(), stay(10, 15));
    }

    #[test]
    fn test_transition_stale_state_fails() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");
        let id =
            database::insert_reservation(db.connection(), &reservation(room, guest, stay(10, 13)))
                .unwrap();

        let transition = |from, to| {
            OperationPlan::new("Patch").add_action(PlanAction::TransitionReservation {
                id,
                from,
                to,
                actual_check_in: None,
                actual_check_out: None,
                note: None,
            })
        };

        PlanExecutor::new(db.connection())
            .execute(&transition(
                ReservationStatus::Pending,
                ReservationStatus::Confirmed,
            ))
            .unwrap();

        // Replaying the same transition finds the state gone
        let err = PlanExecutor::new(db.connection())
            .execute(&transition(
                ReservationStatus::Pending,
                ReservationStatus::Confirmed,
            ))
            .unwrap_err();
        assert!(matches!(err, Error::StaleUpdate { .. }));
    }

    #[test]
    fn test_transition_missing_reservation() {
        let db = open_test_database();
        let plan = OperationPlan::new("Patch").add_action(PlanAction::TransitionReservation {
            id: 404,
            from: ReservationStatus::Pending,
            to: ReservationStatus::Confirmed,
            actual_check_in: None,
            actual_check_out: None,
            note: None,
        });
        let err = PlanExecutor::new(db.connection()).execute(&plan).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_set_room_status() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");

        let plan = OperationPlan::new("Housekeeping").add_action(PlanAction::SetRoomStatus {
            room_id: room,
            status: RoomStatus::Cleaning,
        });
        PlanExecutor::new(db.connection()).execute(&plan).unwrap();

        let loaded = database::get_room(db.connection(), room).unwrap().unwrap();
        assert_eq!(loaded.status(), RoomStatus::Cleaning);
    }

    #[test]
    fn test_dry_run_does_not_modify_store() {
        let db = open_test_database();
        let room = seed_room(db.connection(), "101");
        let guest = seed_guest(db.connection(), "Ada");

        let plan = OperationPlan::new("Book")
            .add_action(PlanAction::CreateReservation(reservation(room, guest, stay(10, 13))));

        let result = PlanExecutor::new(db.connection())
            .dry_run()
            .execute(&plan)
            .unwrap();
        assert!(result.dry_run);
        assert_eq!(result.actions_taken.len(), 1);

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_execution_result_includes_warnings() {
        let db = open_test_database();
        let plan = OperationPlan::new("Test")
            .add_warning("Warning 1")
            .add_warning("Warning 2");

        let result = PlanExecutor::new(db.connection()).execute(&plan).unwrap();
        assert_eq!(result.warnings, vec!["Warning 1", "Warning 2"]);
    }
}
