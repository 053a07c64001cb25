//! Booking (create-reservation) planning.
//!
//! Planning validates the request and checks the referenced records, then
//! plans a `Pending` reservation. The availability answer computed here is
//! advisory, good enough to fail fast with a conflict the caller can act
//! on; the executor repeats it under the writer lock before the insert
//! lands.

use rusqlite::Connection;

use crate::availability;
use crate::config::Config;
use crate::database;
use crate::error::{Error, Result};
use crate::reservation::Reservation;
use crate::room::RoomStatus;
use crate::stay::StayRange;

use super::plan::{OperationPlan, PlanAction};

/// Options for a booking operation.
#[derive(Debug, Clone)]
pub struct BookOptions {
    /// The room to book.
    pub room_id: i64,
    /// The primary guest.
    pub guest_id: i64,
    /// The requested stay window.
    pub stay: StayRange,
    /// Party size, primary guest included.
    pub guests: u32,
    /// The agreed total for the stay.
    pub total_amount: rust_decimal::Decimal,
    /// Deposit already taken, if any.
    pub paid_amount: rust_decimal::Decimal,
    /// Additional guests sharing the room.
    pub extra_guest_ids: Vec<i64>,
    /// An initial note for the reservation's note log.
    pub note: Option<String>,
}

impl BookOptions {
    /// Creates booking options with defaults: one guest, zero amounts, no
    /// extras, no note.
    #[must_use]
    pub fn new(room_id: i64, guest_id: i64, stay: StayRange) -> Self {
        Self {
            room_id,
            guest_id,
            stay,
            guests: 1,
            total_amount: rust_decimal::Decimal::ZERO,
            paid_amount: rust_decimal::Decimal::ZERO,
            extra_guest_ids: Vec::new(),
            note: None,
        }
    }

    /// Sets the party size.
    #[must_use]
    pub const fn with_guests(mut self, guests: u32) -> Self {
        self.guests = guests;
        self
    }

    /// Sets the agreed total.
    #[must_use]
    pub const fn with_total_amount(mut self, amount: rust_decimal::Decimal) -> Self {
        self.total_amount = amount;
        self
    }

    /// Sets the deposit already taken.
    #[must_use]
    pub const fn with_paid_amount(mut self, amount: rust_decimal::Decimal) -> Self {
        self.paid_amount = amount;
        self
    }

    /// Sets the additional guests.
    #[must_use]
    pub fn with_extra_guests(mut self, ids: Vec<i64>) -> Self {
        self.extra_guest_ids = ids;
        self
    }

    /// Sets the initial note.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

/// A booking plan generator.
pub struct BookPlan<'a> {
    options: BookOptions,
    config: &'a Config,
}

impl<'a> BookPlan<'a> {
    /// Creates a new booking plan with the given options and config.
    #[must_use]
    pub const fn new(options: BookOptions, config: &'a Config) -> Self {
        Self { options, config }
    }

    /// Builds an operation plan for this booking request.
    ///
    /// Performs all validation and referential checks without modifying
    /// the store:
    ///
    /// 1. guest count within the configured bound and the room's capacity
    /// 2. room and all guests exist
    /// 3. no active reservation overlaps the window (advisory; re-checked
    ///    at execution)
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-bounds fields, a not-found
    /// error for unknown records, or [`Error::RoomUnavailable`] when the
    /// window conflicts.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let options = &self.options;

        if options.guests == 0 {
            return Err(Error::Validation {
                field: "guests".into(),
                message: "guest count must be at least 1".into(),
            });
        }
        if options.guests > self.config.max_guests() {
            return Err(Error::Validation {
                field: "guests".into(),
                message: format!(
                    "guest count {} exceeds the property limit of {}",
                    options.guests,
                    self.config.max_guests()
                ),
            });
        }

        let room = database::get_room(conn, options.room_id)?
            .ok_or(Error::RoomNotFound { id: options.room_id })?;
        if options.guests > room.capacity() {
            return Err(Error::Validation {
                field: "guests".into(),
                message: format!(
                    "guest count {} exceeds room {} capacity of {}",
                    options.guests,
                    room.number(),
                    room.capacity()
                ),
            });
        }

        if !database::guest_exists(conn, options.guest_id)? {
            return Err(Error::GuestNotFound { id: options.guest_id });
        }
        for &extra in &options.extra_guest_ids {
            if !database::guest_exists(conn, extra)? {
                return Err(Error::GuestNotFound { id: extra });
            }
        }

        let conflicts =
            availability::find_conflicts(conn, options.room_id, &options.stay, None)?;
        if !conflicts.is_empty() {
            let details = conflicts
                .iter()
                .map(|c| format!("reservation {} ({})", c.id().unwrap_or_default(), c.stay()))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::RoomUnavailable {
                room_id: options.room_id,
                window: options.stay,
                details,
            });
        }

        let notes = options
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| vec![n.to_string()])
            .unwrap_or_default();

        let reservation = Reservation::builder(options.room_id, options.guest_id, options.stay)
            .guests(options.guests)
            .total_amount(options.total_amount)
            .paid_amount(options.paid_amount)
            .extra_guest_ids(options.extra_guest_ids.clone())
            .notes(notes)
            .build()?;

        let mut plan = OperationPlan::new(format!(
            "Book room {} for {}",
            room.number(),
            options.stay
        ));

        // Physical state doesn't gate future bookings, but the desk should
        // hear about it.
        if matches!(room.status(), RoomStatus::Maintenance | RoomStatus::OutOfOrder) {
            plan = plan.add_warning(format!(
                "room {} is currently {}",
                room.number(),
                room.status()
            ));
        }

        Ok(plan.add_action(PlanAction::CreateReservation(reservation)))
    }
}
