//! The booking-submission flow.
//!
//! One `BookingStore` instance drives one show's booking UI: it owns the
//! seat inventory, the user's selection and the submit state machine
//!
//! ```text
//! Idle → Submitting → { Confirmed, Conflict, Failed }
//! ```
//!
//! `Idle` is the entry state. `Confirmed` and `Failed` end the attempt; a
//! new attempt starts a fresh `Idle → Submitting` cycle. `Conflict` also
//! ends the attempt, but the reducer reconciles the inventory and the
//! selection before the phase becomes observable, so a retry can never
//! resubmit a selection that is known to be partially invalid.
//!
//! The guard against double submission is the `Submitting` phase itself:
//! the store checks and transitions it under a single write-lock
//! acquisition, so a second `submit` while one is in flight is rejected
//! without a network call and without touching the in-flight attempt.
//! Separate stores are independent; the guard is per instance, not
//! global.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod state;
pub mod store;

pub use actions::BookingAction;
pub use environment::{BookingEnvironment, DEFAULT_SUBMIT_TIMEOUT};
pub use reducer::BookingReducer;
pub use state::{BookingState, SubmitPhase};
pub use store::BookingStore;
