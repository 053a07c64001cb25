//! Financial records read by the revenue aggregation.
//!
//! Payments and expenses are written by the surrounding platform; this
//! core only reads them when computing revenue, breakdowns and net profit.
//! Amounts are exact decimals throughout, never floating point.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Cash at the desk.
    Cash,
    /// Card, in person or online.
    Card,
    /// Bank transfer.
    Transfer,
}

impl PaymentMethod {
    /// All methods, in breakdown display order.
    pub const ALL: [Self; 3] = [Self::Cash, Self::Card, Self::Transfer];

    /// The canonical storage string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "transfer" => Ok(Self::Transfer),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// What a payment was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentKind {
    /// Payment against a reservation.
    Reservation,
    /// Payment for a point-of-sale item.
    Sale,
    /// A deposit held against a future stay.
    Deposit,
    /// Money returned to a guest; amounts are negative.
    Refund,
    /// Anything else.
    Other,
}

impl PaymentKind {
    /// The canonical storage string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reservation => "reservation",
            Self::Sale => "sale",
            Self::Deposit => "deposit",
            Self::Refund => "refund",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reservation" => Ok(Self::Reservation),
            "sale" => Ok(Self::Sale),
            "deposit" => Ok(Self::Deposit),
            "refund" => Ok(Self::Refund),
            "other" => Ok(Self::Other),
            _ => Err(format!("invalid payment kind: {s}")),
        }
    }
}

/// Settlement state of a payment.
///
/// A completed payment is immutable apart from moving to `Refunded` or
/// `Cancelled`; only `Completed` payments count as revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    /// Money changed hands.
    Completed,
    /// Voided before settling.
    Cancelled,
    /// Settled, then returned.
    Refunded,
}

impl PaymentStatus {
    /// The canonical storage string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            _ => Err(format!("invalid payment status: {s}")),
        }
    }
}

/// A single money movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Store-assigned id, if persisted.
    pub id: Option<i64>,
    /// The reservation this payment settles, if any.
    pub reservation_id: Option<i64>,
    /// The sale item this payment settles, if any.
    pub sale_id: Option<i64>,
    /// The paying guest.
    pub guest_id: i64,
    /// Signed amount; negative means money returned.
    pub amount: Decimal,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// What the payment was for.
    pub kind: PaymentKind,
    /// Settlement state.
    pub status: PaymentStatus,
    /// When the payment was taken.
    pub paid_at: NaiveDateTime,
}

impl Payment {
    /// Creates a completed payment. Tests and seeding use this; production
    /// payments arrive through the platform's payment recording.
    #[must_use]
    pub fn completed(
        guest_id: i64,
        amount: Decimal,
        method: PaymentMethod,
        kind: PaymentKind,
        paid_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            reservation_id: None,
            sale_id: None,
            guest_id,
            amount,
            method,
            kind,
            status: PaymentStatus::Completed,
            paid_at,
        }
    }

    /// Attaches a reservation reference.
    #[must_use]
    pub const fn for_reservation(mut self, reservation_id: i64) -> Self {
        self.reservation_id = Some(reservation_id);
        self
    }

    /// Attaches a sale reference.
    #[must_use]
    pub const fn for_sale(mut self, sale_id: i64) -> Self {
        self.sale_id = Some(sale_id);
        self
    }

    /// Overrides the settlement state.
    #[must_use]
    pub const fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }
}

/// Approval state of an expense. Only `Paid` expenses reduce net profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseStatus {
    /// Recorded, awaiting approval.
    Pending,
    /// Approved but not yet paid.
    Approved,
    /// Rejected; will not be paid.
    Rejected,
    /// Money left the property.
    Paid,
    /// Withdrawn.
    Cancelled,
}

impl ExpenseStatus {
    /// The canonical storage string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid expense status: {s}")),
        }
    }
}

/// A cost of running the property; input to net-profit aggregation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned id, if persisted.
    pub id: Option<i64>,
    /// Free-form category, e.g. "laundry" or "utilities".
    pub category: String,
    /// Cost; always non-negative.
    pub amount: Decimal,
    /// Approval state.
    pub status: ExpenseStatus,
    /// When the expense falls due, if known.
    pub due_date: Option<NaiveDate>,
    /// When the expense was actually paid.
    pub paid_date: Option<NaiveDate>,
}

impl Expense {
    /// Creates an expense in the given state.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is empty after trimming or the
    /// amount is negative.
    pub fn new(
        category: impl Into<String>,
        amount: Decimal,
        status: ExpenseStatus,
    ) -> Result<Self, crate::reservation::ValidationError> {
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(crate::reservation::ValidationError {
                field: "category".into(),
                message: "category must be non-empty after trimming whitespace".into(),
            });
        }
        if amount < Decimal::ZERO {
            return Err(crate::reservation::ValidationError {
                field: "amount".into(),
                message: "expense amount must not be negative".into(),
            });
        }
        Ok(Self {
            id: None,
            category,
            amount,
            status,
            due_date: None,
            paid_date: None,
        })
    }

    /// Sets the due date.
    #[must_use]
    pub const fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Marks the expense paid on a date.
    #[must_use]
    pub const fn paid_on(mut self, date: NaiveDate) -> Self {
        self.paid_date = Some(date);
        self.status = ExpenseStatus::Paid;
        self
    }
}
