//! Given/When/Then harness for reducer unit tests.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use cineseat_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Declarative reducer test: seed a state, feed one or more actions,
/// assert on the final state and on the effects of the last action.
///
/// Earlier actions in a sequence are applied for their state changes
/// only; their effects are discarded, since a unit test has no runtime
/// to execute them against.
///
/// ```ignore
/// ReducerTest::new(BookingReducer::new())
///     .with_env(test_env())
///     .given_state(BookingState::new(show_id, user_id, inventory))
///     .when_action(BookingAction::ToggleSeat { seat_id })
///     .then_state(|state| assert!(state.selection().contains(seat_id)))
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    checks: Vec<Check<S, A>>,
}

/// A deferred assertion, kept in declaration order.
enum Check<S, A> {
    State(Box<dyn FnOnce(&S)>),
    Effects(Box<dyn FnOnce(&[Effect<A>])>),
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Start a test around the given reducer.
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Inject the environment the reducer runs against.
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Given: the state before any action.
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// When: an action to reduce. May be called repeatedly to build a
    /// sequence; effect assertions apply to the last action only.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Then: assert on the state after the whole sequence.
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.checks.push(Check::State(Box::new(assertion)));
        self
    }

    /// Then: assert on the effects of the last action.
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.checks.push(Check::Effects(Box::new(assertion)));
        self
    }

    /// Reduce the sequence and run every assertion in order.
    ///
    /// # Panics
    ///
    /// Panics if the state, the environment or at least one action is
    /// missing, or if an assertion fails.
    #[allow(clippy::expect_used)] // Test harness
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("given_state() must seed a state");
        let env = self.environment.expect("with_env() must inject an environment");
        assert!(
            !self.actions.is_empty(),
            "when_action() must provide at least one action"
        );

        let mut last_effects: SmallVec<[Effect<A>; 4]> = SmallVec::new();
        for action in self.actions {
            last_effects = self.reducer.reduce(&mut state, action, &env);
        }

        for check in self.checks {
            match check {
                Check::State(assertion) => assertion(&state),
                Check::Effects(assertion) => assertion(&last_effects),
            }
        }
    }
}

/// Common effect assertions.
pub mod assertions {
    use cineseat_core::effect::Effect;

    /// The action must have produced no effects (an empty list and a
    /// lone `Effect::None` both qualify).
    ///
    /// # Panics
    ///
    /// Panics if any real effect is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(|e| matches!(e, Effect::None)),
            "expected no effects, found {}",
            effects.len(),
        );
    }

    /// The action must have produced exactly `expected` effects.
    ///
    /// # Panics
    ///
    /// Panics on a count mismatch.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "expected {expected} effects, found {}",
            effects.len()
        );
    }

    /// At least one effect must be an async computation.
    ///
    /// # Panics
    ///
    /// Panics if no `Effect::Future` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "expected a Future effect, found none"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cineseat_core::reducer::Reducer;
    use cineseat_core::smallvec;

    #[derive(Clone, Debug)]
    struct Tally {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum TallyAction {
        Add(i32),
        Announce,
    }

    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = Tally;
        type Action = TallyAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TallyAction::Add(n) => {
                    state.count += n;
                    SmallVec::new()
                }
                TallyAction::Announce => {
                    smallvec![Effect::future(async { None })]
                }
            }
        }
    }

    #[test]
    fn applies_a_sequence_and_checks_the_final_state() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Tally { count: 0 })
            .when_action(TallyAction::Add(2))
            .when_action(TallyAction::Add(3))
            .then_state(|state| assert_eq!(state.count, 5))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn effect_assertions_see_the_last_action_only() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Tally { count: 0 })
            .when_action(TallyAction::Add(1))
            .when_action(TallyAction::Announce)
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn helpers_accept_empty_and_none_effect_lists() {
        assertions::assert_no_effects::<TallyAction>(&[Effect::None]);
        assertions::assert_no_effects::<TallyAction>(&[]);
        assertions::assert_effects_count::<TallyAction>(&[], 0);
    }
}
