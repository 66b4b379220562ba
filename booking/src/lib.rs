//! # CineSeat Booking
//!
//! The seat-inventory and booking-submission core of the CineSeat movie
//! ticketing frontend.
//!
//! # Architecture
//!
//! ```text
//! GET /shows/{id} → SeatInventory (server-authoritative seat statuses)
//!                    ↓
//! User toggles seats → SelectionState (pure, in-memory)
//!                    ↓
//! pricing::total recomputed on every mutation
//!                    ↓
//! BookingStore::submit → BookingReducer (Idle → Submitting → outcome)
//!                    ↓
//! POST /bookings via the BookingBackend port
//!                    ↓
//! Confirmed → selection cleared
//! Conflict  → inventory reconciled, conflicting seats dropped from selection
//! Failed    → nothing mutated, explicit user retry only
//! ```
//!
//! The backend is the sole source of truth for seat status. Client-side
//! availability checks only avoid obviously-doomed requests; every
//! authoritative conflict is resolved through the `Conflict` path, never
//! by trusting the local inventory.
//!
//! Submission is guarded per store instance: while one attempt is in
//! flight a second `submit` is rejected without a network call. Retries
//! are never automatic — a payment-adjacent request must not be reissued
//! behind the user's back.

pub mod backend;
pub mod flow;
pub mod inventory;
pub mod pricing;
pub mod selection;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod types;

pub use backend::{BookingBackend, CreateBookingError, FetchError, SeatRef};
pub use flow::{
    BookingAction, BookingEnvironment, BookingReducer, BookingState, BookingStore, SubmitPhase,
};
pub use inventory::SeatInventory;
pub use selection::SelectionState;
pub use types::{
    AttemptId, BookingConfirmation, BookingId, BookingRequest, BookingResult, Money,
    PaymentMethod, Seat, SeatCategory, SeatId, SeatNumber, SeatStatus, ShowId, SubmitError,
    UserId,
};
