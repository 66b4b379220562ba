//! # CineSeat Testing
//!
//! Testing utilities shared by the CineSeat crates' suites:
//!
//! - [`ReducerTest`] — a Given/When/Then harness for reducer unit tests
//! - [`FixedClock`] / [`test_clock`] — deterministic time
//! - [`MockBackend`] — a scriptable [`cineseat_booking::BookingBackend`]
//!   with call recording and optional latency
//!
//! ## Example
//!
//! ```ignore
//! use cineseat_testing::{MockBackend, test_clock};
//!
//! #[tokio::test]
//! async fn confirms_a_booking() {
//!     let backend = Arc::new(MockBackend::new());
//!     backend.script_booking(Ok(confirmation("BK-1", 300)));
//!
//!     let env = BookingEnvironment::new(backend.clone(), Arc::new(test_clock()));
//!     let store = BookingStore::new(show_id, user_id, inventory, env);
//!
//!     let result = store.submit(PaymentMethod::Upi).await;
//!     assert!(result.is_confirmed());
//!     assert_eq!(backend.create_calls(), 1);
//! }
//! ```

mod reducer_test;

/// Mock implementations of environment traits.
pub mod mocks {
    use chrono::{DateTime, Utc};
    use cineseat_core::environment::Clock;

    /// Fixed clock for deterministic tests.
    ///
    /// Always returns the same time, making tests reproducible.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time.
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// The time this clock is pinned to.
        #[must_use]
        pub const fn time(&self) -> DateTime<Utc> {
            self.time
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC).
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot
    /// happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

pub use cineseat_booking::test_support::MockBackend;
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use cineseat_core::environment::Clock;

    #[test]
    fn fixed_clock_never_advances() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), clock.time());
    }
}
