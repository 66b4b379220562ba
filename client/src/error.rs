//! Error types and conflict parsing for the booking API client.

use cineseat_booking::backend::{FetchError, SeatRef};
use cineseat_booking::types::{SeatId, SeatNumber};
use serde_json::Value;
use thiserror::Error;

/// Errors from plain API calls (inventory, cancellation, history).
///
/// Booking creation has its own classification — see
/// [`CreateBookingError`](cineseat_booking::backend::CreateBookingError) —
/// because conflicts there are an expected outcome, not an error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Response body did not match the expected shape
    #[error("response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// The resource does not exist
    #[error("resource not found")]
    NotFound,

    /// Credentials missing, expired or insufficient
    #[error("unauthorized")]
    Unauthorized,

    /// Any other API error
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body, as returned
        message: String,
    },
}

impl From<ApiError> for FetchError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::NotFound => Self::NotFound,
            other => Self::Unreachable(other.to_string()),
        }
    }
}

/// Best-effort extraction of conflicting seats from an error body.
///
/// Tried in order: a JSON `unavailableSeatIds` array, then seat phrases
/// in a JSON `message`/`error`/`detail` field, then seat phrases in the
/// raw body. An empty result means the caller should fall back to a
/// generic server error.
pub(crate) fn parse_unavailable_seats(body: &str) -> Vec<SeatRef> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let mut refs = Vec::new();
        if let Some(ids) = value.get("unavailableSeatIds").and_then(Value::as_array) {
            refs.extend(
                ids.iter()
                    .filter_map(Value::as_i64)
                    .map(|id| SeatRef::Id(SeatId::new(id))),
            );
        }
        if refs.is_empty() {
            for key in ["message", "error", "detail"] {
                if let Some(message) = value.get(key).and_then(Value::as_str) {
                    refs.extend(seat_refs_from_message(message));
                }
            }
        }
        if !refs.is_empty() {
            return refs;
        }
    }
    seat_refs_from_message(body)
}

/// Scan free text for `"Seat <label> is not available"` phrases, the
/// message shape the backend produces for seat conflicts.
fn seat_refs_from_message(message: &str) -> Vec<SeatRef> {
    let mut refs = Vec::new();
    let mut rest = message;
    while let Some(start) = rest.find("Seat ") {
        rest = &rest[start + "Seat ".len()..];
        let label_end = rest
            .find(char::is_whitespace)
            .unwrap_or(rest.len());
        let (label, tail) = rest.split_at(label_end);
        let label = label.trim_matches(|c: char| !c.is_alphanumeric());
        if !label.is_empty() && tail.trim_start().starts_with("is not available") {
            refs.push(SeatRef::Number(SeatNumber::new(label)));
        }
        rest = tail;
    }
    refs
}
