//! State for the booking flow.

use crate::inventory::SeatInventory;
use crate::pricing;
use crate::selection::SelectionState;
use crate::types::{
    AttemptId, BookingConfirmation, BookingResult, Money, SeatId, ShowId, SubmitError, UserId,
};
use chrono::{DateTime, Utc};

/// Where the current (or most recent) submit attempt stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    /// No attempt has run since the last selection change.
    Idle,

    /// A request is in flight; further submits are rejected.
    Submitting {
        /// Attempt being processed
        attempt_id: AttemptId,
        /// When the request was issued
        started_at: DateTime<Utc>,
    },

    /// The booking was created.
    Confirmed {
        /// Attempt that completed
        attempt_id: AttemptId,
        /// Confirmed booking record subset
        confirmation: BookingConfirmation,
        /// When the outcome was applied
        completed_at: DateTime<Utc>,
    },

    /// Some seats were taken by another user; inventory and selection
    /// have already been reconciled.
    Conflict {
        /// Attempt that completed
        attempt_id: AttemptId,
        /// Seats that are no longer available
        unavailable: Vec<SeatId>,
        /// When the outcome was applied
        completed_at: DateTime<Utc>,
    },

    /// The attempt failed; nothing was mutated.
    Failed {
        /// Attempt that completed
        attempt_id: AttemptId,
        /// Failure reason
        error: SubmitError,
        /// When the outcome was applied
        completed_at: DateTime<Utc>,
    },
}

impl SubmitPhase {
    /// Whether a request is currently in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// Whether this phase is the in-flight state of the given attempt.
    #[must_use]
    pub fn is_attempt(&self, id: AttemptId) -> bool {
        matches!(self, Self::Submitting { attempt_id, .. } if *attempt_id == id)
    }
}

/// The complete state of one show's booking flow.
///
/// Inventory, selection and submit phase live together so that conflict
/// reconciliation — patch the inventory, shrink the selection, record the
/// outcome — is one atomic state transition with respect to every reader.
#[derive(Clone, Debug)]
pub struct BookingState {
    pub(crate) show_id: ShowId,
    pub(crate) user_id: UserId,
    pub(crate) inventory: SeatInventory,
    pub(crate) selection: SelectionState,
    pub(crate) phase: SubmitPhase,
}

impl BookingState {
    /// Create a fresh flow state over a loaded inventory, with an empty
    /// selection.
    #[must_use]
    pub fn new(show_id: ShowId, user_id: UserId, inventory: SeatInventory) -> Self {
        Self {
            show_id,
            user_id,
            inventory,
            selection: SelectionState::new(),
            phase: SubmitPhase::Idle,
        }
    }

    /// The show this flow books seats for.
    #[must_use]
    pub const fn show_id(&self) -> ShowId {
        self.show_id
    }

    /// The user this flow books seats for.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The last known seat state.
    #[must_use]
    pub const fn inventory(&self) -> &SeatInventory {
        &self.inventory
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The submit phase.
    #[must_use]
    pub const fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    /// Total price of the current selection.
    #[must_use]
    pub fn total(&self) -> Money {
        pricing::total(&self.selection, &self.inventory)
    }

    /// The outcome of the most recent attempt, if one has completed.
    #[must_use]
    pub fn outcome(&self) -> Option<BookingResult> {
        match &self.phase {
            SubmitPhase::Idle | SubmitPhase::Submitting { .. } => None,
            SubmitPhase::Confirmed { confirmation, .. } => {
                Some(BookingResult::Confirmed(confirmation.clone()))
            }
            SubmitPhase::Conflict { unavailable, .. } => Some(BookingResult::Conflict {
                unavailable: unavailable.clone(),
            }),
            SubmitPhase::Failed { error, .. } => Some(BookingResult::Failed {
                error: error.clone(),
            }),
        }
    }
}
