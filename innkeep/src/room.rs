//! Room inventory types.
//!
//! A [`Room`] is a physical unit with a capacity, a nightly rate, and
//! feature flags. Its [`RoomStatus`] describes the physical state of the
//! room (cleaned, under maintenance, ...) and is deliberately independent
//! of reservation status: a room can be `Cleaning` while its next
//! reservation is already `Confirmed`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The physical state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
    /// Clean and ready for a guest.
    Available,
    /// A guest is currently in the room.
    Occupied,
    /// Awaiting housekeeping after a departure.
    Cleaning,
    /// Undergoing scheduled maintenance.
    Maintenance,
    /// Unusable until further notice.
    OutOfOrder,
}

impl RoomStatus {
    /// The canonical storage string, also used by [`std::fmt::Display`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Cleaning => "cleaning",
            Self::Maintenance => "maintenance",
            Self::OutOfOrder => "out-of-order",
        }
    }

    /// The human label shown in room listings.
    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Cleaning => "Cleaning",
            Self::Maintenance => "Maintenance",
            Self::OutOfOrder => "Out of Order",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "cleaning" => Ok(Self::Cleaning),
            "maintenance" => Ok(Self::Maintenance),
            "out-of-order" => Ok(Self::OutOfOrder),
            _ => Err(format!("invalid room status: {s}")),
        }
    }
}

/// The grouping key for room-type reporting: capacity plus the two
/// features guests book by.
///
/// Air conditioning deliberately does not split categories; it does not
/// change what a room sells as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomCategory {
    /// Number of guests the rooms in this category sleep.
    pub capacity: u32,
    /// Whether the rooms face the sea.
    pub sea_view: bool,
    /// Whether the rooms have a balcony.
    pub balcony: bool,
}

impl RoomCategory {
    /// A short human label, e.g. `"double · sea view · balcony"`.
    #[must_use]
    pub fn label(&self) -> String {
        let base = match self.capacity {
            1 => "single".to_string(),
            2 => "double".to_string(),
            3 => "triple".to_string(),
            4 => "quad".to_string(),
            n => format!("{n}-bed"),
        };
        let mut label = base;
        if self.sea_view {
            label.push_str(" · sea view");
        }
        if self.balcony {
            label.push_str(" · balcony");
        }
        label
    }
}

impl std::fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// A physical room in the property's fixed inventory.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use innkeep::{Room, RoomStatus};
///
/// let room = Room::builder("204", 2, Decimal::new(12000, 2)) // 120.00/night
///     .sea_view(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(room.number(), "204");
/// assert_eq!(room.status(), RoomStatus::Available);
/// assert_eq!(room.category().label(), "double · sea view");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: Option<i64>,
    number: String,
    capacity: u32,
    nightly_rate: Decimal,
    sea_view: bool,
    balcony: bool,
    air_conditioning: bool,
    status: RoomStatus,
}

impl Room {
    /// Creates a new room builder.
    ///
    /// Defaults: no features, status `Available`.
    #[must_use]
    pub fn builder(number: impl Into<String>, capacity: u32, nightly_rate: Decimal) -> RoomBuilder {
        RoomBuilder {
            id: None,
            number: number.into(),
            capacity,
            nightly_rate,
            sea_view: false,
            balcony: false,
            air_conditioning: false,
            status: RoomStatus::Available,
        }
    }

    /// Returns the store-assigned id, if the room has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the unique room number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns how many guests the room sleeps.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the standard nightly rate.
    #[must_use]
    pub const fn nightly_rate(&self) -> Decimal {
        self.nightly_rate
    }

    /// Returns true if the room faces the sea.
    #[must_use]
    pub const fn sea_view(&self) -> bool {
        self.sea_view
    }

    /// Returns true if the room has a balcony.
    #[must_use]
    pub const fn balcony(&self) -> bool {
        self.balcony
    }

    /// Returns true if the room has air conditioning.
    #[must_use]
    pub const fn air_conditioning(&self) -> bool {
        self.air_conditioning
    }

    /// Returns the physical status.
    #[must_use]
    pub const fn status(&self) -> RoomStatus {
        self.status
    }

    /// Returns the reporting category this room falls into.
    #[must_use]
    pub const fn category(&self) -> RoomCategory {
        RoomCategory {
            capacity: self.capacity,
            sea_view: self.sea_view,
            balcony: self.balcony,
        }
    }
}

/// Builder for creating [`Room`] instances.
#[derive(Debug)]
pub struct RoomBuilder {
    id: Option<i64>,
    number: String,
    capacity: u32,
    nightly_rate: Decimal,
    sea_view: bool,
    balcony: bool,
    air_conditioning: bool,
    status: RoomStatus,
}

impl RoomBuilder {
    /// Sets the store-assigned id (used when loading from the database).
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the sea-view flag.
    #[must_use]
    pub const fn sea_view(mut self, sea_view: bool) -> Self {
        self.sea_view = sea_view;
        self
    }

    /// Sets the balcony flag.
    #[must_use]
    pub const fn balcony(mut self, balcony: bool) -> Self {
        self.balcony = balcony;
        self
    }

    /// Sets the air-conditioning flag.
    #[must_use]
    pub const fn air_conditioning(mut self, air_conditioning: bool) -> Self {
        self.air_conditioning = air_conditioning;
        self
    }

    /// Sets the physical status.
    #[must_use]
    pub const fn status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the room.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the room number is empty after trimming whitespace
    /// - the capacity is zero
    /// - the nightly rate is negative
    pub fn build(self) -> Result<Room, crate::reservation::ValidationError> {
        let number = self.number.trim().to_string();
        if number.is_empty() {
            return Err(crate::reservation::ValidationError {
                field: "number".into(),
                message: "room number must be non-empty after trimming whitespace".into(),
            });
        }
        if self.capacity == 0 {
            return Err(crate::reservation::ValidationError {
                field: "capacity".into(),
                message: "capacity must be at least 1".into(),
            });
        }
        if self.nightly_rate < Decimal::ZERO {
            return Err(crate::reservation::ValidationError {
                field: "nightly_rate".into(),
                message: "nightly rate must not be negative".into(),
            });
        }

        Ok(Room {
            id: self.id,
            number,
            capacity: self.capacity,
            nightly_rate: self.nightly_rate,
            sea_view: self.sea_view,
            balcony: self.balcony,
            air_conditioning: self.air_conditioning,
            status: self.status,
        })
    }
}
