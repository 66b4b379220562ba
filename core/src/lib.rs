//! # CineSeat Core
//!
//! The architecture vocabulary shared by the CineSeat crates.
//!
//! CineSeat keeps its booking logic in the *functional core, imperative
//! shell* style:
//!
//! - **State**: owned, `Clone`-able domain state for one flow
//! - **Action**: every input a flow can process (user intents and
//!   completions of side effects)
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: a side effect described as a value, executed by a store
//! - **Environment**: injected dependencies behind traits
//!
//! Reducers never perform I/O. A store drives the loop: it reduces an
//! action under its state lock, releases the lock, executes the returned
//! effects, and feeds any resulting actions back into the reducer.

// Re-export the effect-list types so downstream reducers don't need a
// direct smallvec dependency for their signatures.
pub use smallvec::{SmallVec, smallvec};

/// The `Reducer` trait — the single home for a flow's transition logic.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// A pure state-transition function over one flow's state.
    ///
    /// Implementations must not perform I/O: anything that touches the
    /// outside world is returned as an [`Effect`] description and executed
    /// by the store that owns the state.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effect descriptions.
        ///
        /// Called with exclusive access to the state; the returned effects
        /// are executed after the state lock is released.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Side effects described as values.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// A boxed future an effect resolves, optionally feeding an action
    /// back into the reducer.
    pub type EffectFuture<Action> = Pin<Box<dyn Future<Output = Option<Action>> + Send>>;

    /// A side effect returned by a reducer.
    ///
    /// Effects are not executed where they are created. The store runs
    /// them once the reducer has returned and the state lock is free, and
    /// dispatches any action the effect resolves to.
    pub enum Effect<Action> {
        /// No side effect
        None,

        /// An async computation; `Some(action)` re-enters the reducer
        Future(EffectFuture<Action>),
    }

    impl<Action> Effect<Action> {
        /// Wrap a future as an effect.
        pub fn future<F>(f: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Self::Future(Box::pin(f))
        }
    }

    // Manual Debug implementation since the boxed future has none.
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }
}

/// Dependency-injection traits shared across environments.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Abstracts time so flows can be tested deterministically.
    ///
    /// Production environments use [`SystemClock`]; tests use a fixed
    /// clock from the testing crate.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// The production clock, backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, SystemClock};
    use super::reducer::Reducer;
    use smallvec::{SmallVec, smallvec};

    #[derive(Clone, Debug)]
    struct CounterState {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        Ping,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                CounterAction::Increment => {
                    state.count += 1;
                    smallvec![Effect::None]
                }
                CounterAction::Ping => {
                    smallvec![Effect::future(async { Some(CounterAction::Increment) })]
                }
            }
        }
    }

    #[test]
    fn reduce_mutates_state_in_place() {
        let mut state = CounterState { count: 0 };
        let effects = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
        assert_eq!(state.count, 1);
        assert!(matches!(effects.as_slice(), [Effect::None]));
    }

    #[test]
    fn future_effects_carry_feedback_actions() {
        let mut state = CounterState { count: 0 };
        let effects = CounterReducer.reduce(&mut state, CounterAction::Ping, &());
        assert_eq!(state.count, 0);
        assert!(matches!(effects.as_slice(), [Effect::Future(_)]));
    }

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let earlier = clock.now();
        assert!(clock.now() >= earlier);
    }

    #[test]
    fn effect_debug_is_opaque_for_futures() {
        let effect: Effect<CounterAction> = Effect::future(async { None });
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }
}
