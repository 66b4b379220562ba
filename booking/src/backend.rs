//! The port to the booking backend.
//!
//! The flow talks to the backend only through [`BookingBackend`], so the
//! HTTP adapter and test mocks are interchangeable. The trait returns
//! boxed futures instead of `async fn` to stay dyn-compatible — flow
//! environments hold it as `Arc<dyn BookingBackend>`.

use crate::types::{BookingConfirmation, BookingRequest, Seat, SeatId, SeatNumber, ShowId};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by port methods.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Failure to load a show's seat inventory.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The show does not exist or has no seats.
    #[error("show has no seat inventory")]
    NotFound,

    /// The backend could not be reached.
    #[error("booking backend unreachable: {0}")]
    Unreachable(String),
}

/// A backend reference to a seat in a conflict report.
///
/// Conflict bodies are backend-defined; depending on the shape the
/// adapter managed to parse, a seat may be named by id or only by its
/// label. The flow resolves either form against the loaded inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatRef {
    /// Referenced by show-scoped seat id
    Id(SeatId),
    /// Referenced by seat label
    Number(SeatNumber),
}

impl fmt::Display for SeatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Failure to create a booking.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CreateBookingError {
    /// The backend reported specific seats as already taken.
    #[error("seats no longer available: {}", format_refs(.0))]
    SeatsUnavailable(Vec<SeatRef>),

    /// The backend rejected the request without naming seats.
    #[error("booking backend error: {message}")]
    Server {
        /// Backend-provided message
        message: String,
    },

    /// The backend could not be reached.
    #[error("booking backend unreachable: {0}")]
    Unreachable(String),
}

fn format_refs(refs: &[SeatRef]) -> String {
    refs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Operations the booking flow needs from the backend.
pub trait BookingBackend: Send + Sync {
    /// Fetch the current seat state of a show.
    ///
    /// # Errors
    ///
    /// [`FetchError::NotFound`] when the show is unknown,
    /// [`FetchError::Unreachable`] on transport failure.
    fn fetch_seats(&self, show_id: ShowId) -> BackendFuture<'_, Result<Vec<Seat>, FetchError>>;

    /// Create a booking for the given request.
    ///
    /// # Errors
    ///
    /// [`CreateBookingError::SeatsUnavailable`] when the backend names
    /// conflicting seats, [`CreateBookingError::Server`] for other
    /// rejections, [`CreateBookingError::Unreachable`] on transport
    /// failure.
    fn create_booking(
        &self,
        request: BookingRequest,
    ) -> BackendFuture<'_, Result<BookingConfirmation, CreateBookingError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_refs_display_ids_and_numbers() {
        assert_eq!(SeatRef::Id(SeatId::new(4)).to_string(), "#4");
        assert_eq!(SeatRef::Number(SeatNumber::new("A7")).to_string(), "A7");
    }

    #[test]
    fn seats_unavailable_lists_all_refs() {
        let error = CreateBookingError::SeatsUnavailable(vec![
            SeatRef::Number(SeatNumber::new("A1")),
            SeatRef::Id(SeatId::new(9)),
        ]);
        assert_eq!(error.to_string(), "seats no longer available: A1, #9");
    }
}
