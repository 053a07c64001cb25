//! Calendar-date interval arithmetic for stays.
//!
//! Reservations occupy half-open date ranges `[check_in, check_out)`: a
//! guest leaving on the 13th frees the room for a guest arriving on the
//! 13th. All conflict and occupancy reasoning in the crate is built on the
//! operations defined here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A half-open calendar-date interval `[check_in, check_out)`.
///
/// The check-out date is excluded, so adjacent stays share a boundary date
/// without overlapping, and `nights()` is always at least 1.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::StayRange;
///
/// let june = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
/// let stay = StayRange::new(june(10), june(13)).unwrap();
///
/// assert_eq!(stay.nights(), 3);
/// assert!(stay.contains(june(12)));
/// assert!(!stay.contains(june(13))); // half-open
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// Creates a new stay range.
    ///
    /// # Errors
    ///
    /// Returns an error unless `check_in < check_out`; a valid stay always
    /// spans at least one night.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::StayRange;
    ///
    /// let june = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
    /// assert!(StayRange::new(june(10), june(11)).is_ok());
    /// assert!(StayRange::new(june(10), june(10)).is_err()); // zero nights
    /// assert!(StayRange::new(june(11), june(10)).is_err()); // reversed
    /// ```
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidStayRangeError> {
        if check_in >= check_out {
            return Err(InvalidStayRangeError {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in date (inclusive).
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date (exclusive).
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights covered, always at least 1.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Returns true if the two ranges share at least one night.
    ///
    /// Ranges that merely touch at a boundary date do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::StayRange;
    ///
    /// let june = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
    /// let a = StayRange::new(june(10), june(13)).unwrap();
    ///
    /// assert!(a.overlaps(&StayRange::new(june(11), june(14)).unwrap()));
    /// assert!(!a.overlaps(&StayRange::new(june(13), june(15)).unwrap()));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Intersects this range with a window, returning `None` if disjoint.
    ///
    /// Used by period aggregation to count only the nights of a stay that
    /// fall inside the reporting window.
    #[must_use]
    pub fn clip(&self, window: &Self) -> Option<Self> {
        let start = self.check_in.max(window.check_in);
        let end = self.check_out.min(window.check_out);
        if start < end {
            Some(Self {
                check_in: start,
                check_out: end,
            })
        } else {
            None
        }
    }

    /// Returns true if `date` falls within the range (check-out excluded).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Iterates the nights of the stay: every date in `[check_in, check_out)`.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.check_out;
        self.check_in.iter_days().take_while(move |d| *d < end)
    }
}

impl std::fmt::Display for StayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}

/// Error type for a stay range whose dates are out of order or equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStayRangeError {
    /// The offending check-in date.
    pub check_in: NaiveDate,
    /// The offending check-out date.
    pub check_out: NaiveDate,
}

impl std::fmt::Display for InvalidStayRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid stay range {}..{}: check-in must precede check-out",
            self.check_in, self.check_out
        )
    }
}

impl std::error::Error for InvalidStayRangeError {}
