//! Reservation types and the booking lifecycle state machine.
//!
//! A [`Reservation`] ties a room to a guest for a [`StayRange`] and carries
//! the money agreed and taken so far. Its [`ReservationStatus`] moves
//! through a closed transition table; every status change in the crate goes
//! through [`ReservationStatus::can_transition`], so there is exactly one
//! place where the lifecycle is defined.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::stay::StayRange;

/// The lifecycle state of a reservation.
///
/// ```text
///   Pending ⇄ Confirmed
///      │         │
///      ├─────────┴──→ CheckedIn ──→ CheckedOut
///      │         │        │
///      └─────────┴────────┴──→ Cancelled | NoShow
/// ```
///
/// `CheckedOut`, `Cancelled` and `NoShow` are terminal: no transition
/// leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    /// Created, not yet confirmed by the property.
    Pending,
    /// Confirmed by the property; still counts against availability.
    Confirmed,
    /// The guest has arrived; the room is physically occupied.
    CheckedIn,
    /// The stay ended normally. Terminal.
    CheckedOut,
    /// Called off before arrival. Terminal.
    Cancelled,
    /// The guest never arrived. Terminal.
    NoShow,
}

impl ReservationStatus {
    /// The statuses that count toward room-conflict checks.
    pub const ACTIVE: [Self; 3] = [Self::Pending, Self::Confirmed, Self::CheckedIn];

    /// All statuses, for exhaustive iteration in tests and filters.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::Cancelled,
        Self::NoShow,
    ];

    /// Returns true if the status holds the room against other bookings.
    #[must_use]
    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled | Self::NoShow)
    }

    /// The transition table: returns true if `self → to` is a legal move.
    ///
    /// Self-transitions are not transitions and return false.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::ReservationStatus as S;
    ///
    /// assert!(S::Pending.can_transition(S::Confirmed));
    /// assert!(S::Confirmed.can_transition(S::CheckedIn));
    /// assert!(S::CheckedIn.can_transition(S::CheckedOut));
    /// assert!(!S::CheckedOut.can_transition(S::CheckedIn)); // terminal
    /// assert!(!S::Pending.can_transition(S::CheckedOut));   // must pass CheckedIn
    /// ```
    #[must_use]
    pub const fn can_transition(self, to: Self) -> bool {
        match self {
            Self::Pending => matches!(
                to,
                Self::Confirmed | Self::CheckedIn | Self::Cancelled | Self::NoShow
            ),
            Self::Confirmed => matches!(
                to,
                Self::Pending | Self::CheckedIn | Self::Cancelled | Self::NoShow
            ),
            Self::CheckedIn => matches!(to, Self::CheckedOut | Self::Cancelled | Self::NoShow),
            Self::CheckedOut | Self::Cancelled | Self::NoShow => false,
        }
    }

    /// The canonical storage string, also used by [`std::fmt::Display`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked-in",
            Self::CheckedOut => "checked-out",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no-show",
        }
    }

    /// The human label shown on calendars and reports.
    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "Checked In",
            Self::CheckedOut => "Checked Out",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "No Show",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "checked-in" => Ok(Self::CheckedIn),
            "checked-out" => Ok(Self::CheckedOut),
            "cancelled" => Ok(Self::Cancelled),
            "no-show" => Ok(Self::NoShow),
            _ => Err(format!("invalid reservation status: {s}")),
        }
    }
}

/// A booking of one room for one stay window.
///
/// Constructed through [`Reservation::builder`], which validates guest
/// count and amounts. Persisted reservations carry an id assigned by the
/// store; a freshly built one has none yet.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use innkeep::{Reservation, StayRange};
///
/// let stay = StayRange::new(
///     NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
/// ).unwrap();
///
/// let reservation = Reservation::builder(1, 1, stay)
///     .guests(2)
///     .total_amount(Decimal::new(36000, 2)) // 360.00
///     .build()
///     .unwrap();
///
/// assert_eq!(reservation.stay().nights(), 3);
/// assert!(reservation.status().is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<i64>,
    room_id: i64,
    guest_id: i64,
    extra_guest_ids: Vec<i64>,
    stay: StayRange,
    guests: u32,
    total_amount: Decimal,
    paid_amount: Decimal,
    status: ReservationStatus,
    actual_check_in: Option<NaiveDateTime>,
    actual_check_out: Option<NaiveDateTime>,
    notes: Vec<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Reservation {
    /// Creates a new reservation builder for a room, primary guest and stay.
    ///
    /// Defaults: 1 guest, zero amounts, `Pending` status, no notes.
    #[must_use]
    pub fn builder(room_id: i64, guest_id: i64, stay: StayRange) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            room_id,
            guest_id,
            extra_guest_ids: Vec::new(),
            stay,
            guests: 1,
            total_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            status: ReservationStatus::Pending,
            actual_check_in: None,
            actual_check_out: None,
            notes: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the store-assigned id, if the reservation has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the booked room's id.
    #[must_use]
    pub const fn room_id(&self) -> i64 {
        self.room_id
    }

    /// Returns the primary guest's id.
    #[must_use]
    pub const fn guest_id(&self) -> i64 {
        self.guest_id
    }

    /// Returns the ids of additional guests sharing the room.
    #[must_use]
    pub fn extra_guest_ids(&self) -> &[i64] {
        &self.extra_guest_ids
    }

    /// Returns the stay window.
    #[must_use]
    pub const fn stay(&self) -> StayRange {
        self.stay
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn guests(&self) -> u32 {
        self.guests
    }

    /// Returns the agreed total for the stay.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Returns the amount taken so far, never more than the total.
    #[must_use]
    pub const fn paid_amount(&self) -> Decimal {
        self.paid_amount
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the recorded arrival timestamp, set by check-in only.
    #[must_use]
    pub const fn actual_check_in(&self) -> Option<NaiveDateTime> {
        self.actual_check_in
    }

    /// Returns the recorded departure timestamp, set by check-out only.
    #[must_use]
    pub const fn actual_check_out(&self) -> Option<NaiveDateTime> {
        self.actual_check_out
    }

    /// Returns the append-only notes, oldest first.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Returns the last-modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}

/// Builder for creating [`Reservation`] instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<i64>,
    room_id: i64,
    guest_id: i64,
    extra_guest_ids: Vec<i64>,
    stay: StayRange,
    guests: u32,
    total_amount: Decimal,
    paid_amount: Decimal,
    status: ReservationStatus,
    actual_check_in: Option<NaiveDateTime>,
    actual_check_out: Option<NaiveDateTime>,
    notes: Vec<String>,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl ReservationBuilder {
    /// Sets the store-assigned id (used when loading from the database).
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the ids of additional guests sharing the room.
    #[must_use]
    pub fn extra_guest_ids(mut self, ids: Vec<i64>) -> Self {
        self.extra_guest_ids = ids;
        self
    }

    /// Sets the guest count.
    #[must_use]
    pub const fn guests(mut self, guests: u32) -> Self {
        self.guests = guests;
        self
    }

    /// Sets the agreed total for the stay.
    #[must_use]
    pub const fn total_amount(mut self, amount: Decimal) -> Self {
        self.total_amount = amount;
        self
    }

    /// Sets the amount taken so far.
    #[must_use]
    pub const fn paid_amount(mut self, amount: Decimal) -> Self {
        self.paid_amount = amount;
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the recorded arrival timestamp.
    #[must_use]
    pub const fn actual_check_in(mut self, at: Option<NaiveDateTime>) -> Self {
        self.actual_check_in = at;
        self
    }

    /// Sets the recorded departure timestamp.
    #[must_use]
    pub const fn actual_check_out(mut self, at: Option<NaiveDateTime>) -> Self {
        self.actual_check_out = at;
        self
    }

    /// Sets the notes, oldest first.
    #[must_use]
    pub fn notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, at: NaiveDateTime) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Sets the last-modification timestamp.
    #[must_use]
    pub const fn updated_at(mut self, at: NaiveDateTime) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the guest count is zero
    /// - either amount is negative
    /// - the paid amount exceeds the total
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.guests == 0 {
            return Err(ValidationError {
                field: "guests".into(),
                message: "guest count must be at least 1".into(),
            });
        }
        if self.total_amount < Decimal::ZERO {
            return Err(ValidationError {
                field: "total_amount".into(),
                message: "total amount must not be negative".into(),
            });
        }
        if self.paid_amount < Decimal::ZERO {
            return Err(ValidationError {
                field: "paid_amount".into(),
                message: "paid amount must not be negative".into(),
            });
        }
        if self.paid_amount > self.total_amount {
            return Err(ValidationError {
                field: "paid_amount".into(),
                message: format!(
                    "paid amount {} exceeds total {}",
                    self.paid_amount, self.total_amount
                ),
            });
        }

        let now = Utc::now().naive_utc();
        Ok(Reservation {
            id: self.id,
            room_id: self.room_id,
            guest_id: self.guest_id,
            extra_guest_ids: self.extra_guest_ids,
            stay: self.stay,
            guests: self.guests,
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            status: self.status,
            actual_check_in: self.actual_check_in,
            actual_check_out: self.actual_check_out,
            notes: self.notes,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
