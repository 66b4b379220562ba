//! Store for the booking flow.

use crate::backend::FetchError;
use crate::flow::{BookingAction, BookingEnvironment, BookingReducer, BookingState, SubmitPhase};
use crate::inventory::SeatInventory;
use crate::types::{BookingResult, Money, PaymentMethod, Seat, SeatId, ShowId, SubmitError, UserId};
use cineseat_core::effect::Effect;
use cineseat_core::reducer::Reducer;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Drives one show's booking flow.
///
/// The store is the imperative shell around [`BookingReducer`]: it owns
/// the state behind a read-write lock, reduces actions under the write
/// lock, and executes the returned effects with the lock released, so
/// concurrent readers (seat map rendering, price display) are never
/// blocked by an in-flight backend call.
///
/// Effects run on detached tasks: dropping a `submit` future — the user
/// closed the booking panel mid-request — neither cancels the request
/// nor leaves the submit guard held.
///
/// Clones share the same state; independent shows get independent stores.
#[derive(Clone)]
pub struct BookingStore {
    state: Arc<RwLock<BookingState>>,
    reducer: BookingReducer,
    env: BookingEnvironment,
}

impl BookingStore {
    /// Create a store over an already-loaded inventory.
    #[must_use]
    pub fn new(
        show_id: ShowId,
        user_id: UserId,
        inventory: SeatInventory,
        env: BookingEnvironment,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(BookingState::new(show_id, user_id, inventory))),
            reducer: BookingReducer::new(),
            env,
        }
    }

    /// Fetch the show's inventory through the environment's backend and
    /// open a flow over it.
    ///
    /// # Errors
    ///
    /// Propagates [`FetchError`] from the inventory load; the caller
    /// renders it rather than showing an empty seat map.
    pub async fn open(
        show_id: ShowId,
        user_id: UserId,
        env: BookingEnvironment,
    ) -> Result<Self, FetchError> {
        let inventory = SeatInventory::load(env.backend.as_ref(), show_id).await?;
        Ok(Self::new(show_id, user_id, inventory, env))
    }

    /// Toggle a seat in the selection.
    pub async fn toggle_seat(&self, seat_id: SeatId) {
        self.send(BookingAction::ToggleSeat { seat_id }).await;
    }

    /// Drop the whole selection.
    pub async fn clear_selection(&self) {
        self.send(BookingAction::ClearSelection).await;
    }

    /// Overwrite seats with server-supplied truth (e.g. from a re-fetch),
    /// removing lost seats from the selection.
    pub async fn reconcile(&self, seats: Vec<Seat>) {
        self.send(BookingAction::ReconcileSeats { seats }).await;
    }

    /// Run one submit attempt to completion and return its outcome.
    ///
    /// Only one attempt may be in flight per store: a second call while
    /// the first is submitting returns
    /// [`SubmitError::AlreadyInProgress`] without issuing a request and
    /// without disturbing the in-flight attempt. Nothing here retries —
    /// every retry is a fresh, explicit call.
    pub async fn submit(&self, payment_method: PaymentMethod) -> BookingResult {
        let effects = {
            let mut state = self.state.write().await;
            if state.phase().is_submitting() {
                // Double-trigger from the UI; reject before reducing so the
                // in-flight attempt's phase is never overwritten.
                tracing::debug!("submit rejected, attempt already in progress");
                return BookingResult::Failed {
                    error: SubmitError::AlreadyInProgress,
                };
            }
            self.reducer
                .reduce(&mut state, BookingAction::Submit { payment_method }, &self.env)
        };

        self.run_effects(effects).await;

        self.state
            .read()
            .await
            .outcome()
            .unwrap_or(BookingResult::Failed {
                error: SubmitError::Unknown("submission did not complete".to_owned()),
            })
    }

    /// Total price of the current selection.
    pub async fn total(&self) -> Money {
        self.state.read().await.total()
    }

    /// The currently selected seat ids.
    pub async fn selected_seats(&self) -> Vec<SeatId> {
        self.state.read().await.selection().seat_ids()
    }

    /// The current submit phase.
    pub async fn phase(&self) -> SubmitPhase {
        self.state.read().await.phase().clone()
    }

    /// A snapshot of the full flow state.
    pub async fn snapshot(&self) -> BookingState {
        self.state.read().await.clone()
    }

    /// Reduce an action and drive its effects (and their feedback
    /// actions) to completion.
    async fn send(&self, action: BookingAction) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut state, action, &self.env)
            };
            for effect in effects {
                if let Effect::Future(future) = effect {
                    if let Some(next) = future.await {
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    /// Execute effects on a detached task and wait for them.
    ///
    /// The spawned task keeps running if the caller's future is dropped,
    /// so an abandoned submit still applies its completion and releases
    /// the guard.
    async fn run_effects(&self, effects: cineseat_core::SmallVec<[Effect<BookingAction>; 4]>) {
        for effect in effects {
            if let Effect::Future(future) = effect {
                let store = self.clone();
                let handle = tokio::spawn(async move {
                    if let Some(next) = future.await {
                        store.send(next).await;
                    }
                });
                if handle.await.is_err() {
                    tracing::error!("booking effect task failed");
                }
            }
        }
    }
}
