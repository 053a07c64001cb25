//! Plan types for booking operations.
//!
//! Plans describe what a booking operation will do without doing it.
//! Building a plan performs all validation and referential checks but
//! never writes; the executor performs the writes, re-checking
//! availability inside its transaction.

use chrono::NaiveDateTime;

use crate::reservation::{Reservation, ReservationStatus};
use crate::room::RoomStatus;

/// A single action to be taken during plan execution.
///
/// Each action corresponds to one database write performed when the plan
/// is executed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    /// Insert a new reservation (the executor re-checks availability
    /// immediately before the insert).
    CreateReservation(Reservation),

    /// Rewrite an existing reservation's plan fields (the executor
    /// re-checks availability excluding the reservation's own id).
    UpdateReservation {
        /// The reservation being amended.
        id: i64,
        /// Its new field values.
        reservation: Reservation,
    },

    /// Move a reservation through the lifecycle with an optimistic
    /// expected-state check.
    TransitionReservation {
        /// The reservation to transition.
        id: i64,
        /// The status the caller observed; the write fails if it changed.
        from: ReservationStatus,
        /// The target status.
        to: ReservationStatus,
        /// Arrival timestamp, recorded by check-in only.
        actual_check_in: Option<NaiveDateTime>,
        /// Departure timestamp, recorded by check-out only.
        actual_check_out: Option<NaiveDateTime>,
        /// A note to append to the reservation's note log.
        note: Option<String>,
    },

    /// Update a room's physical status (check-out → Cleaning and friends).
    SetRoomStatus {
        /// The room to update.
        room_id: i64,
        /// The new physical status.
        status: RoomStatus,
    },

    /// Delete a reservation.
    DeleteReservation {
        /// The reservation to delete.
        id: i64,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(r) => {
                format!(
                    "Create reservation for room {} over {}",
                    r.room_id(),
                    r.stay()
                )
            }
            Self::UpdateReservation { id, reservation } => {
                format!(
                    "Update reservation {id} to room {} over {}",
                    reservation.room_id(),
                    reservation.stay()
                )
            }
            Self::TransitionReservation { id, from, to, .. } => {
                format!("Transition reservation {id} from {from} to {to}")
            }
            Self::SetRoomStatus { room_id, status } => {
                format!("Set room {room_id} status to {status}")
            }
            Self::DeleteReservation { id } => {
                format!("Delete reservation {id}")
            }
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Check in reservation 7");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
