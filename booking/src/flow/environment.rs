//! Environment for the booking flow.

use crate::backend::BookingBackend;
use cineseat_core::environment::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on one backend booking call.
///
/// The call would otherwise be allowed to hang, which keeps the submit
/// guard held forever; expiry surfaces as a timeout failure and releases
/// the guard.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(20);

/// Injected dependencies for the booking flow.
///
/// Production wires the HTTP adapter and the system clock; tests inject a
/// scripted backend and a fixed clock. The flow reads no ambient state —
/// user identity and credentials arrive through the backend and the
/// store constructor.
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Port to the booking backend
    pub backend: Arc<dyn BookingBackend>,
    /// Clock for attempt timestamps
    pub clock: Arc<dyn Clock>,
    /// Bound on one backend booking call
    pub submit_timeout: Duration,
}

impl BookingEnvironment {
    /// Creates an environment with the default submit timeout.
    #[must_use]
    pub fn new(backend: Arc<dyn BookingBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Override the submit timeout.
    #[must_use]
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }
}
