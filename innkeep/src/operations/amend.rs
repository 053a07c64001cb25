//! Reservation amendment (update-reservation) planning.
//!
//! Amendments rewrite a reservation's plan fields (window, room, party,
//! amounts) while it is still active. A changed window or room is
//! revalidated against availability with the reservation's own id
//! excluded, so an unchanged booking never conflicts with itself.

use rusqlite::Connection;

use crate::availability;
use crate::database;
use crate::error::{Error, Result};
use crate::reservation::Reservation;
use crate::stay::StayRange;

use super::plan::{OperationPlan, PlanAction};

/// Options for an amendment; unset fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct AmendOptions {
    /// The reservation to amend.
    pub reservation_id: i64,
    /// A new stay window.
    pub stay: Option<StayRange>,
    /// A different room.
    pub room_id: Option<i64>,
    /// A new party size.
    pub guests: Option<u32>,
    /// A new agreed total.
    pub total_amount: Option<rust_decimal::Decimal>,
    /// A new paid amount.
    pub paid_amount: Option<rust_decimal::Decimal>,
    /// A note to append to the reservation's note log.
    pub note: Option<String>,
}

impl AmendOptions {
    /// Creates empty amendment options for a reservation.
    #[must_use]
    pub fn new(reservation_id: i64) -> Self {
        Self {
            reservation_id,
            ..Self::default()
        }
    }

    /// Sets a new stay window.
    #[must_use]
    pub const fn with_stay(mut self, stay: StayRange) -> Self {
        self.stay = Some(stay);
        self
    }

    /// Moves the booking to a different room.
    #[must_use]
    pub const fn with_room(mut self, room_id: i64) -> Self {
        self.room_id = Some(room_id);
        self
    }

    /// Sets a new party size.
    #[must_use]
    pub const fn with_guests(mut self, guests: u32) -> Self {
        self.guests = Some(guests);
        self
    }

    /// Sets a new agreed total.
    #[must_use]
    pub const fn with_total_amount(mut self, amount: rust_decimal::Decimal) -> Self {
        self.total_amount = Some(amount);
        self
    }

    /// Sets a new paid amount.
    #[must_use]
    pub const fn with_paid_amount(mut self, amount: rust_decimal::Decimal) -> Self {
        self.paid_amount = Some(amount);
        self
    }

    /// Appends a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    fn is_noop(&self) -> bool {
        self.stay.is_none()
            && self.room_id.is_none()
            && self.guests.is_none()
            && self.total_amount.is_none()
            && self.paid_amount.is_none()
            && self.note.is_none()
    }
}

/// An amendment plan generator.
pub struct AmendPlan {
    options: AmendOptions,
}

impl AmendPlan {
    /// Creates a new amendment plan with the given options.
    #[must_use]
    pub const fn new(options: AmendOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this amendment.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown reservation or room,
    /// [`Error::ReservationClosed`] when the reservation is terminal,
    /// a validation error when the merged fields are inconsistent, or
    /// [`Error::RoomUnavailable`] when the new window conflicts.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let options = &self.options;
        let id = options.reservation_id;

        let current = database::get_reservation(conn, id)?
            .ok_or(Error::ReservationNotFound { id })?;

        if current.status().is_terminal() {
            return Err(Error::ReservationClosed {
                id,
                status: current.status(),
            });
        }

        let mut plan = OperationPlan::new(format!("Amend reservation {id}"));

        if options.is_noop() {
            return Ok(plan.add_warning("no fields to change"));
        }

        let room_id = options.room_id.unwrap_or_else(|| current.room_id());
        let stay = options.stay.unwrap_or_else(|| current.stay());
        let guests = options.guests.unwrap_or_else(|| current.guests());

        let room = database::get_room(conn, room_id)?
            .ok_or(Error::RoomNotFound { id: room_id })?;
        if guests > room.capacity() {
            return Err(Error::Validation {
                field: "guests".into(),
                message: format!(
                    "guest count {guests} exceeds room {} capacity of {}",
                    room.number(),
                    room.capacity()
                ),
            });
        }

        // Advisory availability check for the merged window; the executor
        // repeats it under the writer lock.
        let window_changed = room_id != current.room_id() || stay != current.stay();
        if window_changed && !availability::is_available(conn, room_id, &stay, Some(id))? {
            let conflicts = availability::find_conflicts(conn, room_id, &stay, Some(id))?;
            let details = conflicts
                .iter()
                .map(|c| format!("reservation {} ({})", c.id().unwrap_or_default(), c.stay()))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::RoomUnavailable {
                room_id,
                window: stay,
                details,
            });
        }

        let mut notes = current.notes().to_vec();
        if let Some(note) = options.note.as_deref() {
            let trimmed = note.trim();
            if !trimmed.is_empty() {
                notes.push(trimmed.to_string());
            }
        }

        // The builder re-applies the amount invariants (paid <= total, no
        // negatives) over the merged values.
        let amended = Reservation::builder(room_id, current.guest_id(), stay)
            .guests(guests)
            .total_amount(options.total_amount.unwrap_or_else(|| current.total_amount()))
            .paid_amount(options.paid_amount.unwrap_or_else(|| current.paid_amount()))
            .extra_guest_ids(current.extra_guest_ids().to_vec())
            .status(current.status())
            .actual_check_in(current.actual_check_in())
            .actual_check_out(current.actual_check_out())
            .notes(notes)
            .created_at(current.created_at())
            .build()?;

        plan = plan.add_action(PlanAction::UpdateReservation {
            id,
            reservation: amended,
        });
        Ok(plan)
    }
}
