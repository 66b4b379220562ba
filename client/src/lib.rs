//! # CineSeat Client
//!
//! The reqwest-based HTTP adapter to the booking backend.
//!
//! [`BookingApiClient`] implements the
//! [`BookingBackend`](cineseat_booking::BookingBackend) port over the
//! backend's REST API:
//!
//! - `GET /shows/{id}` — seat inventory for one show
//! - `POST /bookings` — create a booking
//! - `PUT /bookings/cancel/{id}` — cancel a booking
//! - `GET /bookings/user/{id}` — a user's booking history
//!
//! Credentials are a transport concern: an optional bearer token is
//! attached to every request, while the booking flow itself only ever
//! sees an already-authenticated `UserId`.
//!
//! The backend does not commit to a wire shape for seat conflicts, so
//! the adapter parses conflict bodies best-effort (a structured id list
//! when present, otherwise `"Seat <label> is not available"` phrases)
//! and degrades to a generic server error when nothing can be
//! identified.

mod client;
mod dto;
mod error;

pub use client::BookingApiClient;
pub use dto::{BookingResponse, SeatDetailDto, ShowResponse, ShowSeatDto};
pub use error::ApiError;
