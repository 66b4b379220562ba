//! Scriptable mock of the booking backend port.
//!
//! Lives in this crate (behind the `test-support` feature, and always
//! available under `cfg(test)`) so the crate's own unit tests can use it
//! without the dev-dependency cycle that would arise from importing it
//! back from a crate that itself depends on `cineseat-booking`. The
//! `cineseat-testing` crate re-exports [`MockBackend`] so downstream
//! suites keep using `cineseat_testing::MockBackend` unchanged.

use crate::backend::{BackendFuture, BookingBackend, CreateBookingError, FetchError};
use crate::types::{BookingConfirmation, BookingRequest, Seat, ShowId};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

/// A `BookingBackend` that replays scripted responses.
///
/// Responses are consumed in FIFO order; an unscripted `fetch_seats`
/// answers `Unreachable` and an unscripted `create_booking` answers a
/// server error, so a test that forgets to script a call fails loudly
/// instead of hanging.
///
/// Every booking request is recorded before the optional latency is
/// applied — the double-submit guard test asserts on the number of
/// requests actually issued while one is still "on the wire".
#[derive(Debug, Default)]
pub struct MockBackend {
    seats: Mutex<VecDeque<Result<Vec<Seat>, FetchError>>>,
    bookings: Mutex<VecDeque<Result<BookingConfirmation, CreateBookingError>>>,
    requests: Mutex<Vec<BookingRequest>>,
    fetches: Mutex<Vec<ShowId>>,
    booking_delay: Option<Duration>,
}

impl MockBackend {
    /// Create a mock with no scripted responses and no latency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every `create_booking` response, simulating a slow backend.
    #[must_use]
    pub fn with_booking_delay(mut self, delay: Duration) -> Self {
        self.booking_delay = Some(delay);
        self
    }

    /// Queue the next `fetch_seats` response.
    pub fn script_seats(&self, response: Result<Vec<Seat>, FetchError>) {
        lock(&self.seats).push_back(response);
    }

    /// Queue the next `create_booking` response.
    pub fn script_booking(&self, response: Result<BookingConfirmation, CreateBookingError>) {
        lock(&self.bookings).push_back(response);
    }

    /// Number of booking requests issued so far.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of inventory fetches issued so far.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        lock(&self.fetches).len()
    }

    /// The booking requests issued so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<BookingRequest> {
        lock(&self.requests).clone()
    }
}

impl BookingBackend for MockBackend {
    fn fetch_seats(&self, show_id: ShowId) -> BackendFuture<'_, Result<Vec<Seat>, FetchError>> {
        Box::pin(async move {
            lock(&self.fetches).push(show_id);
            lock(&self.seats).pop_front().unwrap_or_else(|| {
                Err(FetchError::Unreachable(
                    "no scripted seats response".to_owned(),
                ))
            })
        })
    }

    fn create_booking(
        &self,
        request: BookingRequest,
    ) -> BackendFuture<'_, Result<BookingConfirmation, CreateBookingError>> {
        Box::pin(async move {
            lock(&self.requests).push(request);
            if let Some(delay) = self.booking_delay {
                tokio::time::sleep(delay).await;
            }
            lock(&self.bookings).pop_front().unwrap_or_else(|| {
                Err(CreateBookingError::Server {
                    message: "no scripted booking response".to_owned(),
                })
            })
        })
    }
}

// The mutexes are held for single push/pop operations only; a poisoned
// lock can still hand out its data safely.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
