//! Actions processed by the booking flow.

use crate::backend::SeatRef;
use crate::types::{AttemptId, BookingConfirmation, PaymentMethod, Seat, SeatId, SubmitError};

/// Every input the booking flow can process.
///
/// User intents come from the UI; the `Submit*` completions are fed back
/// by the effect the reducer returned for [`BookingAction::Submit`].
#[derive(Clone, Debug)]
pub enum BookingAction {
    /// Toggle a seat in the selection.
    ///
    /// Ignored while a submit is in flight — the request snapshot is
    /// already taken and the UI is expected to block edits until the
    /// attempt resolves.
    ToggleSeat {
        /// Seat to toggle
        seat_id: SeatId,
    },

    /// Drop the whole selection (booking panel closed or reset).
    ClearSelection,

    /// Overwrite seats with server-supplied truth, e.g. from a re-fetch.
    ///
    /// Seats that come back no longer available are removed from the
    /// selection in the same step.
    ReconcileSeats {
        /// Server-returned seats
        seats: Vec<Seat>,
    },

    /// Start a submit attempt with the current selection.
    Submit {
        /// Payment instrument to forward to the backend
        payment_method: PaymentMethod,
    },

    /// The backend confirmed the booking.
    SubmitSucceeded {
        /// Attempt this completion belongs to
        attempt_id: AttemptId,
        /// Confirmed booking record subset
        confirmation: BookingConfirmation,
    },

    /// The backend reported specific seats as taken.
    SubmitConflicted {
        /// Attempt this completion belongs to
        attempt_id: AttemptId,
        /// Backend references to the conflicting seats
        seats: Vec<SeatRef>,
    },

    /// The attempt failed without seat information.
    SubmitFailed {
        /// Attempt this completion belongs to
        attempt_id: AttemptId,
        /// Failure reason
        error: SubmitError,
    },
}
