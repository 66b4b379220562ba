//! Domain types for the CineSeat booking core.
//!
//! Value objects and entities shared by the inventory, selection, pricing
//! and submission modules. Entity identifiers are opaque `i64` handles
//! matching the backend wire format; a seat id is scoped to one show
//! instance and is not the physical seat's permanent id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw backend identifier.
            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Identifier of a scheduled show (one screening with its own seat
    /// inventory).
    ShowId
}

entity_id! {
    /// Identifier of an authenticated user. Always passed in explicitly;
    /// the booking core reads no ambient auth state.
    UserId
}

entity_id! {
    /// Identifier of one seat within one show's inventory.
    SeatId
}

entity_id! {
    /// Identifier of a booking record on the backend.
    BookingId
}

/// Correlation id for one submit attempt.
///
/// Generated client-side when an attempt starts and used to key log
/// events and to match effect completions to the attempt they belong to.
/// Never sent as a booking field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttemptId(Uuid);

impl AttemptId {
    /// Generate a fresh attempt id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Seats
// ============================================================================

/// Human-readable seat label (row plus number, e.g. `A7`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatNumber(String);

impl SeatNumber {
    /// Creates a new `SeatNumber`.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pricing/comfort tier of a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatCategory {
    /// Recliner tier
    Recliner,
    /// Premium tier
    Premium,
    /// Executive tier
    Executive,
    /// Normal tier
    Normal,
}

impl SeatCategory {
    /// Display precedence for grouped seat maps, most expensive first.
    pub const PRECEDENCE: [Self; 4] = [Self::Recliner, Self::Premium, Self::Executive, Self::Normal];

    /// Rank within [`Self::PRECEDENCE`]; lower sorts first.
    #[must_use]
    pub fn precedence(self) -> usize {
        Self::PRECEDENCE
            .iter()
            .position(|c| *c == self)
            .unwrap_or(Self::PRECEDENCE.len())
    }
}

impl fmt::Display for SeatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Recliner => "Recliner",
            Self::Premium => "Premium",
            Self::Executive => "Executive",
            Self::Normal => "Normal",
        };
        write!(f, "{label}")
    }
}

/// Availability of a seat, as last reported by the backend.
///
/// The client never invents a status: it only copies what the server
/// returned, either from an inventory fetch or from conflict
/// reconciliation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    /// Free to select
    Available,
    /// Sold to another user
    Booked,
    /// Held server-side by an in-flight booking
    Locked,
}

impl SeatStatus {
    /// Whether the seat can be selected.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// One seat of one show's inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Show-scoped seat identifier
    pub id: SeatId,
    /// Human-readable label
    pub number: SeatNumber,
    /// Pricing tier
    pub category: SeatCategory,
    /// Price, category-determined
    pub price: Money,
    /// Server-reported availability
    pub status: SeatStatus,
}

impl Seat {
    /// Creates a new `Seat`.
    #[must_use]
    pub const fn new(
        id: SeatId,
        number: SeatNumber,
        category: SeatCategory,
        price: Money,
        status: SeatStatus,
    ) -> Self {
        Self {
            id,
            number,
            category,
            price,
            status,
        }
    }

    /// Whether the seat can currently be selected.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

// ============================================================================
// Money (paise-based to avoid floating point errors)
// ============================================================================

/// Represents money in paise to avoid floating-point arithmetic errors.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(u64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from paise.
    #[must_use]
    pub const fn from_paise(paise: u64) -> Self {
        Self(paise)
    }

    /// Creates a `Money` value from whole rupees.
    ///
    /// # Panics
    ///
    /// Panics if the conversion would overflow (`rupees * 100 > u64::MAX`).
    /// Use [`Self::checked_from_rupees`] for a non-panicking conversion.
    #[must_use]
    #[allow(clippy::panic)]
    pub const fn from_rupees(rupees: u64) -> Self {
        match rupees.checked_mul(100) {
            Some(paise) => Self(paise),
            None => panic!("Money::from_rupees overflow"),
        }
    }

    /// Creates a `Money` value from whole rupees with overflow checking.
    #[must_use]
    pub const fn checked_from_rupees(rupees: u64) -> Option<Self> {
        match rupees.checked_mul(100) {
            Some(paise) => Some(Self(paise)),
            None => None,
        }
    }

    /// The amount in paise.
    #[must_use]
    pub const fn paise(self) -> u64 {
        self.0
    }

    /// The amount in whole rupees (rounded down).
    #[must_use]
    pub const fn rupees(self) -> u64 {
        self.0 / 100
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts with overflow checking.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(paise) => Some(Self(paise)),
            None => None,
        }
    }

    /// Adds two amounts, saturating at the representable maximum.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}.{:02}", self.rupees(), self.0 % 100)
    }
}

// ============================================================================
// Booking request / outcome
// ============================================================================

/// Payment instrument chosen by the user.
///
/// Payment execution is simulated by the surrounding UI; the flow only
/// forwards the chosen method to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// UPI transfer
    Upi,
    /// Debit/credit card
    Card,
    /// Net banking
    NetBanking,
    /// Wallet balance
    Wallet,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::NetBanking => "Net banking",
            Self::Wallet => "Wallet",
        };
        write!(f, "{label}")
    }
}

/// Immutable snapshot sent to the backend for one submit attempt.
///
/// Built once when the attempt starts; the selection may change afterwards
/// without affecting the request already in flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Authenticated user placing the booking
    pub user_id: UserId,
    /// Show being booked
    pub show_id: ShowId,
    /// Selected seats, in selection order
    pub seat_ids: Vec<SeatId>,
    /// Chosen payment instrument
    pub payment_method: PaymentMethod,
}

/// The subset of a confirmed backend booking record the flow needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingConfirmation {
    /// Backend-assigned booking number
    pub booking_number: String,
    /// Amount charged
    pub total_amount: Money,
    /// Backend booking timestamp, when reported
    pub booked_at: Option<DateTime<Utc>>,
}

/// Why a submit attempt failed.
///
/// `Conflict` is deliberately not part of this taxonomy: seats taken by
/// another user are an expected, recoverable outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Submit was called with no seats selected; no request was issued.
    #[error("no seats selected")]
    EmptySelection,

    /// Another attempt on this flow is still in flight; no request was
    /// issued. Indicates a double-trigger in the UI, not a user-facing
    /// condition.
    #[error("a booking attempt is already in progress")]
    AlreadyInProgress,

    /// The backend did not answer within the configured submit timeout.
    #[error("the booking backend did not answer in time")]
    Timeout,

    /// The backend rejected the request or errored without naming seats.
    #[error("booking backend error: {0}")]
    ServerError(String),

    /// The request could not be completed for any other reason.
    #[error("booking failed: {0}")]
    Unknown(String),
}

/// Outcome of one submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookingResult {
    /// The booking was created; the selection has been cleared.
    Confirmed(BookingConfirmation),

    /// Some selected seats were taken before the attempt was processed.
    /// The inventory has been reconciled and the named seats removed from
    /// the selection; the user may retry with what remains.
    Conflict {
        /// Seats that are no longer available
        unavailable: Vec<SeatId>,
    },

    /// The attempt failed; nothing was mutated and the identical request
    /// may be retried explicitly.
    Failed {
        /// Failure reason
        error: SubmitError,
    },
}

impl BookingResult {
    /// Whether the attempt confirmed a booking.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Whether the attempt ended in a seat conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
