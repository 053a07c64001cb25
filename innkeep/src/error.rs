//! Error types for the innkeep library.
//!
//! This module provides the error hierarchy for all operations in the
//! innkeep library, using `thiserror` for ergonomic error handling.
//!
//! Errors fall into four classes, and callers can branch on them without
//! string matching:
//!
//! - validation (`Validation`): malformed input, rejected before any state
//!   change
//! - not found (`RoomNotFound`, `GuestNotFound`, `ReservationNotFound`)
//! - conflict (`RoomUnavailable`, `InvalidTransition`, `StaleUpdate`,
//!   `DeletionBlocked`): the request was well-formed but lost to current
//!   state; callers can offer alternatives
//! - infrastructure (`Database`, `Io`, `LockTimeout`): retryable, never a
//!   domain failure

use std::path::PathBuf;

use thiserror::Error;

use crate::reservation::ReservationStatus;
use crate::stay::StayRange;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
#[derive(Debug, Error)]
pub enum Error {
    /// A field failed validation; nothing was written.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// No room exists with the given id.
    #[error("room {id} not found")]
    RoomNotFound {
        /// The unknown room id.
        id: i64,
    },

    /// No guest exists with the given id.
    #[error("guest {id} not found")]
    GuestNotFound {
        /// The unknown guest id.
        id: i64,
    },

    /// No reservation exists with the given id.
    #[error("reservation {id} not found")]
    ReservationNotFound {
        /// The unknown reservation id.
        id: i64,
    },

    /// The room already has an active reservation overlapping the window.
    #[error("room {room_id} unavailable for {window}: {details}")]
    RoomUnavailable {
        /// The contested room.
        room_id: i64,
        /// The requested stay window.
        window: StayRange,
        /// Details about the conflicting reservation(s).
        details: String,
    },

    /// The requested status transition does not exist in the lifecycle.
    #[error("reservation {id}: cannot transition from {from} to {to}")]
    InvalidTransition {
        /// The reservation the transition was attempted on.
        id: i64,
        /// The state the reservation is currently in.
        from: ReservationStatus,
        /// The state the transition targeted.
        to: ReservationStatus,
    },

    /// A concurrent writer got there first; the expected state was gone.
    #[error("reservation {id} was modified concurrently; expected status {expected}")]
    StaleUpdate {
        /// The contested reservation.
        id: i64,
        /// The status the operation expected to find.
        expected: ReservationStatus,
    },

    /// Deletion would orphan money already taken for the reservation.
    #[error("cannot delete reservation {id}: {details}")]
    DeletionBlocked {
        /// The reservation deletion was attempted on.
        id: i64,
        /// Why the deletion is blocked.
        details: String,
    },

    /// The reservation reached a terminal state and takes no further
    /// changes.
    #[error("reservation {id} is {status} and can no longer be modified")]
    ReservationClosed {
        /// The closed reservation.
        id: i64,
        /// The terminal status it is in.
        status: ReservationStatus,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Returns a stable machine-readable kind for this error.
    ///
    /// The kind never changes across releases even when display messages
    /// are reworded, so callers and logs can key on it.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Error;
    ///
    /// let err = Error::RoomNotFound { id: 7 };
    /// assert_eq!(err.kind(), "not_found");
    /// ```
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::RoomNotFound { .. }
            | Self::GuestNotFound { .. }
            | Self::ReservationNotFound { .. } => "not_found",
            Self::RoomUnavailable { .. }
            | Self::InvalidTransition { .. }
            | Self::StaleUpdate { .. }
            | Self::DeletionBlocked { .. }
            | Self::ReservationClosed { .. } => "conflict",
            Self::Database(_) | Self::Io(_) | Self::LockTimeout { .. } => "infrastructure",
            Self::Configuration(_) => "configuration",
            Self::DataDirectoryNotFound { .. } => "data_directory_not_found",
            Self::UnsupportedSchemaVersion { .. } => "unsupported_schema_version",
        }
    }

    /// Check if the error means a referenced record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound { .. }
                | Self::GuestNotFound { .. }
                | Self::ReservationNotFound { .. }
        )
    }

    /// Check if the error is a conflict the caller can respond to, such as
    /// offering alternative dates or refreshing state.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::RoomUnavailable { .. }
                | Self::InvalidTransition { .. }
                | Self::StaleUpdate { .. }
                | Self::DeletionBlocked { .. }
                | Self::ReservationClosed { .. }
        )
    }

    /// Check if the error is transient infrastructure trouble worth one
    /// transparent retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::LockTimeout { .. } => true,
            Self::Database(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}

impl From<crate::stay::InvalidStayRangeError> for Error {
    fn from(err: crate::stay::InvalidStayRangeError) -> Self {
        Self::Validation {
            field: "stay".into(),
            message: err.to_string(),
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}
