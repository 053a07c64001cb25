//! Lifecycle transition planning: check-in, check-out, cancellation,
//! generic status patches, and deletion.
//!
//! Every transition is validated against the table in
//! [`ReservationStatus::can_transition`] and executed with the optimistic
//! expected-state check, so replaying a transition from a state the
//! reservation has left fails with a conflict instead of succeeding
//! silently.

use chrono::{Duration, NaiveDateTime, Utc};
use rusqlite::Connection;

use crate::database;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationStatus};
use crate::room::RoomStatus;

use super::plan::{OperationPlan, PlanAction};

fn load_reservation(conn: &Connection, id: i64) -> Result<Reservation> {
    database::get_reservation(conn, id)?.ok_or(Error::ReservationNotFound { id })
}

fn require_transition(reservation: &Reservation, to: ReservationStatus) -> Result<()> {
    let id = reservation.id().unwrap_or_default();
    let from = reservation.status();
    if from.can_transition(to) {
        Ok(())
    } else {
        Err(Error::InvalidTransition { id, from, to })
    }
}

/// Options for a check-in.
#[derive(Debug, Clone)]
pub struct CheckInOptions {
    /// The reservation to check in.
    pub reservation_id: i64,
    /// The actual arrival timestamp to record.
    pub actual: NaiveDateTime,
    /// A note for the reservation's note log.
    pub note: Option<String>,
    /// The clock the plan validates "not in the future" against. Defaults
    /// to the current time; fixed in tests.
    pub now: NaiveDateTime,
}

impl CheckInOptions {
    /// Creates check-in options with `now` as the validation clock.
    #[must_use]
    pub fn new(reservation_id: i64, actual: NaiveDateTime) -> Self {
        Self {
            reservation_id,
            actual,
            note: None,
            now: Utc::now().naive_utc(),
        }
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// Overrides the validation clock.
    #[must_use]
    pub const fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }
}

/// A check-in plan generator: Pending/Confirmed → CheckedIn, recording
/// the arrival and occupying the room.
pub struct CheckInPlan {
    options: CheckInOptions,
}

impl CheckInPlan {
    /// Creates a new check-in plan with the given options.
    #[must_use]
    pub const fn new(options: CheckInOptions) -> Self {
        Self { options }
    }

    /// Builds the check-in plan.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown reservation,
    /// [`Error::InvalidTransition`] when the reservation is not
    /// check-in-eligible, or a validation error when the arrival timestamp
    /// precedes the reservation's check-in midnight or lies in the future.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let options = &self.options;
        let reservation = load_reservation(conn, options.reservation_id)?;
        require_transition(&reservation, ReservationStatus::CheckedIn)?;

        let earliest = reservation.stay().check_in().and_hms_opt(0, 0, 0).unwrap();
        if options.actual < earliest {
            return Err(Error::Validation {
                field: "actual_check_in".into(),
                message: format!(
                    "arrival {} precedes the reservation's check-in date {}",
                    options.actual,
                    reservation.stay().check_in()
                ),
            });
        }
        if options.actual > options.now {
            return Err(Error::Validation {
                field: "actual_check_in".into(),
                message: format!("arrival {} is in the future", options.actual),
            });
        }

        let plan = OperationPlan::new(format!(
            "Check in reservation {}",
            options.reservation_id
        ))
        .add_action(PlanAction::TransitionReservation {
            id: options.reservation_id,
            from: reservation.status(),
            to: ReservationStatus::CheckedIn,
            actual_check_in: Some(options.actual),
            actual_check_out: None,
            note: options.note.clone(),
        })
        .add_action(PlanAction::SetRoomStatus {
            room_id: reservation.room_id(),
            status: RoomStatus::Occupied,
        });
        Ok(plan)
    }
}

/// Options for a check-out.
#[derive(Debug, Clone)]
pub struct CheckOutOptions {
    /// The reservation to check out.
    pub reservation_id: i64,
    /// The actual departure timestamp to record.
    pub actual: NaiveDateTime,
    /// A note for the reservation's note log.
    pub note: Option<String>,
}

impl CheckOutOptions {
    /// Creates check-out options.
    #[must_use]
    pub const fn new(reservation_id: i64, actual: NaiveDateTime) -> Self {
        Self {
            reservation_id,
            actual,
            note: None,
        }
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

/// A check-out plan generator: CheckedIn → CheckedOut, recording the
/// departure and sending the room to housekeeping.
pub struct CheckOutPlan {
    options: CheckOutOptions,
}

impl CheckOutPlan {
    /// Creates a new check-out plan with the given options.
    #[must_use]
    pub const fn new(options: CheckOutOptions) -> Self {
        Self { options }
    }

    /// Builds the check-out plan.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown reservation,
    /// [`Error::InvalidTransition`] unless the reservation is checked in,
    /// or a validation error when the departure timestamp precedes the
    /// check-in midnight or falls after the end of the check-out day.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let options = &self.options;
        let reservation = load_reservation(conn, options.reservation_id)?;
        require_transition(&reservation, ReservationStatus::CheckedOut)?;

        let earliest = reservation.stay().check_in().and_hms_opt(0, 0, 0).unwrap();
        // Departure may run past the nominal check-out date's midnight but
        // not past the end of that day.
        let latest = (reservation.stay().check_out() + Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .unwrap();
        if options.actual < earliest {
            return Err(Error::Validation {
                field: "actual_check_out".into(),
                message: format!(
                    "departure {} precedes the reservation's check-in date {}",
                    options.actual,
                    reservation.stay().check_in()
                ),
            });
        }
        if options.actual >= latest {
            return Err(Error::Validation {
                field: "actual_check_out".into(),
                message: format!(
                    "departure {} is after the end of the check-out day {}",
                    options.actual,
                    reservation.stay().check_out()
                ),
            });
        }

        let plan = OperationPlan::new(format!(
            "Check out reservation {}",
            options.reservation_id
        ))
        .add_action(PlanAction::TransitionReservation {
            id: options.reservation_id,
            from: ReservationStatus::CheckedIn,
            to: ReservationStatus::CheckedOut,
            actual_check_in: None,
            actual_check_out: Some(options.actual),
            note: options.note.clone(),
        })
        .add_action(PlanAction::SetRoomStatus {
            room_id: reservation.room_id(),
            status: RoomStatus::Cleaning,
        });
        Ok(plan)
    }
}

/// A generic status patch: Pending ↔ Confirmed, or → Cancelled / NoShow.
///
/// CheckedIn and CheckedOut targets are rejected here; those transitions
/// record an actual timestamp and only exist as [`CheckInPlan`] and
/// [`CheckOutPlan`].
pub struct PatchStatusPlan {
    reservation_id: i64,
    to: ReservationStatus,
    note: Option<String>,
}

impl PatchStatusPlan {
    /// Creates a new status patch plan.
    #[must_use]
    pub const fn new(reservation_id: i64, to: ReservationStatus) -> Self {
        Self {
            reservation_id,
            to,
            note: None,
        }
    }

    /// Sets a note to append alongside the patch.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// Builds the patch plan.
    ///
    /// # Errors
    ///
    /// Returns a validation error for CheckedIn/CheckedOut targets, a
    /// not-found error for an unknown reservation, or
    /// [`Error::InvalidTransition`] when the move is not in the table.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        if matches!(
            self.to,
            ReservationStatus::CheckedIn | ReservationStatus::CheckedOut
        ) {
            return Err(Error::Validation {
                field: "status".into(),
                message: format!(
                    "{} requires an actual timestamp; use the check-in/check-out operations",
                    self.to
                ),
            });
        }

        let reservation = load_reservation(conn, self.reservation_id)?;
        require_transition(&reservation, self.to)?;

        // Status only; cancellations and no-shows have no room side effect.
        Ok(OperationPlan::new(format!(
            "Set reservation {} to {}",
            self.reservation_id, self.to
        ))
        .add_action(PlanAction::TransitionReservation {
            id: self.reservation_id,
            from: reservation.status(),
            to: self.to,
            actual_check_in: None,
            actual_check_out: None,
            note: self.note.clone(),
        }))
    }
}

/// A deletion plan generator.
///
/// Deletion refuses to orphan money: a reservation with a paid amount is
/// only deletable once it is Cancelled or NoShow (refunding is the
/// platform's concern). Deleting a CheckedIn reservation releases its
/// room back to Available in the same plan, hence the same transaction.
pub struct DeletePlan {
    reservation_id: i64,
}

impl DeletePlan {
    /// Creates a new deletion plan.
    #[must_use]
    pub const fn new(reservation_id: i64) -> Self {
        Self { reservation_id }
    }

    /// Builds the deletion plan.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown reservation or
    /// [`Error::DeletionBlocked`] when money would be orphaned.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.reservation_id;
        let reservation = load_reservation(conn, id)?;

        let refundable = matches!(
            reservation.status(),
            ReservationStatus::Cancelled | ReservationStatus::NoShow
        );
        if reservation.paid_amount() > rust_decimal::Decimal::ZERO && !refundable {
            return Err(Error::DeletionBlocked {
                id,
                details: format!(
                    "{} was paid against a {} reservation; cancel it first",
                    reservation.paid_amount(),
                    reservation.status()
                ),
            });
        }

        let mut plan = OperationPlan::new(format!("Delete reservation {id}"));
        if reservation.status() == ReservationStatus::CheckedIn {
            plan = plan.add_action(PlanAction::SetRoomStatus {
                room_id: reservation.room_id(),
                status: RoomStatus::Available,
            });
        }
        Ok(plan.add_action(PlanAction::DeleteReservation { id }))
    }
}
