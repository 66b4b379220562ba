//! Reducer for the booking flow.

use crate::backend::{CreateBookingError, SeatRef};
use crate::flow::{BookingAction, BookingEnvironment, BookingState, SubmitPhase};
use crate::inventory::SeatInventory;
use crate::types::{
    AttemptId, BookingRequest, PaymentMethod, Seat, SeatId, SeatStatus, SubmitError,
};
use cineseat_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Reducer for one show's booking flow.
///
/// Pure: every transition mutates [`BookingState`] in place and describes
/// the backend call, when one is needed, as an effect. Retries are never
/// scheduled here — each attempt traces back to an explicit user submit.
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn begin_submit(
        state: &mut BookingState,
        payment_method: PaymentMethod,
        env: &BookingEnvironment,
    ) -> SmallVec<[Effect<BookingAction>; 4]> {
        // State-layer guard; the store rejects duplicates before they get
        // here, but the reducer must not rely on that.
        if state.phase.is_submitting() {
            tracing::warn!("submit ignored, an attempt is already in flight");
            return SmallVec::new();
        }

        let now = env.clock.now();
        let attempt_id = AttemptId::new();

        if state.selection.is_empty() {
            state.phase = SubmitPhase::Failed {
                attempt_id,
                error: SubmitError::EmptySelection,
                completed_at: now,
            };
            return SmallVec::new();
        }

        // Pre-check against the local inventory. This only avoids a call
        // that is certain to fail; the backend remains the authority.
        let stale: Vec<SeatId> = state
            .selection
            .iter()
            .filter(|&id| !state.inventory.is_available(id))
            .collect();
        if !stale.is_empty() {
            tracing::info!(attempt = %attempt_id, seats = ?stale, "selection went stale before submit");
            state.selection.remove_ids(&stale);
            state.phase = SubmitPhase::Conflict {
                attempt_id,
                unavailable: stale,
                completed_at: now,
            };
            return SmallVec::new();
        }

        let request = BookingRequest {
            user_id: state.user_id,
            show_id: state.show_id,
            seat_ids: state.selection.seat_ids(),
            payment_method,
        };
        state.phase = SubmitPhase::Submitting {
            attempt_id,
            started_at: now,
        };
        tracing::info!(
            attempt = %attempt_id,
            show = %state.show_id,
            seats = request.seat_ids.len(),
            total = %state.total(),
            "submitting booking"
        );

        let backend = Arc::clone(&env.backend);
        let timeout = env.submit_timeout;
        smallvec![Effect::future(async move {
            let outcome = tokio::time::timeout(timeout, backend.create_booking(request)).await;
            Some(match outcome {
                Err(_) => BookingAction::SubmitFailed {
                    attempt_id,
                    error: SubmitError::Timeout,
                },
                Ok(Ok(confirmation)) => BookingAction::SubmitSucceeded {
                    attempt_id,
                    confirmation,
                },
                Ok(Err(CreateBookingError::SeatsUnavailable(seats))) => {
                    BookingAction::SubmitConflicted { attempt_id, seats }
                }
                Ok(Err(CreateBookingError::Server { message })) => BookingAction::SubmitFailed {
                    attempt_id,
                    error: SubmitError::ServerError(message),
                },
                Ok(Err(CreateBookingError::Unreachable(message))) => {
                    BookingAction::SubmitFailed {
                        attempt_id,
                        error: SubmitError::Unknown(message),
                    }
                }
            })
        })]
    }

    fn apply_conflict(
        state: &mut BookingState,
        attempt_id: AttemptId,
        seats: &[SeatRef],
        env: &BookingEnvironment,
    ) {
        let now = env.clock.now();
        let resolved = resolve_seat_refs(&state.inventory, seats);
        if resolved.is_empty() {
            tracing::warn!(
                attempt = %attempt_id,
                "conflict reported but no seat matched the inventory"
            );
            state.phase = SubmitPhase::Failed {
                attempt_id,
                error: SubmitError::ServerError(
                    "seats were reported unavailable but could not be identified".to_owned(),
                ),
                completed_at: now,
            };
            return;
        }

        // Conflicting seats get the server's transitional LOCKED status;
        // the next full fetch brings their final state.
        let updates: Vec<Seat> = resolved
            .iter()
            .filter_map(|&id| state.inventory.get(id))
            .map(|seat| Seat {
                status: SeatStatus::Locked,
                ..seat.clone()
            })
            .collect();
        let lost = state.inventory.reconcile(updates);
        state.selection.remove_ids(&lost);
        tracing::info!(attempt = %attempt_id, seats = ?lost, "booking conflict, seats reconciled");
        state.phase = SubmitPhase::Conflict {
            attempt_id,
            unavailable: lost,
            completed_at: now,
        };
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BookingAction::ToggleSeat { seat_id } => {
                if state.phase.is_submitting() {
                    tracing::debug!(%seat_id, "toggle ignored while a submit is in flight");
                } else {
                    state.selection.toggle(seat_id, &state.inventory);
                }
                SmallVec::new()
            }

            BookingAction::ClearSelection => {
                if state.phase.is_submitting() {
                    tracing::debug!("clear ignored while a submit is in flight");
                } else {
                    state.selection.clear();
                }
                SmallVec::new()
            }

            BookingAction::ReconcileSeats { seats } => {
                let lost = state.inventory.reconcile(seats);
                state.selection.remove_ids(&lost);
                SmallVec::new()
            }

            BookingAction::Submit { payment_method } => {
                Self::begin_submit(state, payment_method, env)
            }

            BookingAction::SubmitSucceeded {
                attempt_id,
                confirmation,
            } => {
                if !state.phase.is_attempt(attempt_id) {
                    tracing::warn!(attempt = %attempt_id, "success for a superseded attempt ignored");
                    return SmallVec::new();
                }
                tracing::info!(
                    attempt = %attempt_id,
                    booking = %confirmation.booking_number,
                    amount = %confirmation.total_amount,
                    "booking confirmed"
                );
                state.selection.clear();
                state.phase = SubmitPhase::Confirmed {
                    attempt_id,
                    confirmation,
                    completed_at: env.clock.now(),
                };
                SmallVec::new()
            }

            BookingAction::SubmitConflicted { attempt_id, seats } => {
                if !state.phase.is_attempt(attempt_id) {
                    tracing::warn!(attempt = %attempt_id, "conflict for a superseded attempt ignored");
                    return SmallVec::new();
                }
                Self::apply_conflict(state, attempt_id, &seats, env);
                SmallVec::new()
            }

            BookingAction::SubmitFailed { attempt_id, error } => {
                if !state.phase.is_attempt(attempt_id) {
                    tracing::warn!(attempt = %attempt_id, "failure for a superseded attempt ignored");
                    return SmallVec::new();
                }
                tracing::warn!(attempt = %attempt_id, %error, "booking attempt failed");
                state.phase = SubmitPhase::Failed {
                    attempt_id,
                    error,
                    completed_at: env.clock.now(),
                };
                SmallVec::new()
            }
        }
    }
}

/// Resolve backend seat references against the loaded inventory.
///
/// References that match nothing are dropped; duplicates collapse to one
/// id.
fn resolve_seat_refs(inventory: &SeatInventory, refs: &[SeatRef]) -> Vec<SeatId> {
    let mut resolved = Vec::new();
    for seat_ref in refs {
        let id = match seat_ref {
            SeatRef::Id(id) => inventory.get(*id).map(|seat| seat.id),
            SeatRef::Number(number) => inventory
                .seats()
                .iter()
                .find(|seat| seat.number == *number)
                .map(|seat| seat.id),
        };
        match id {
            Some(id) if !resolved.contains(&id) => resolved.push(id),
            Some(_) => {}
            None => tracing::debug!(seat = %seat_ref, "conflict reference matches no inventory seat"),
        }
    }
    resolved
}
