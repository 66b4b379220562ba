//! Booking API client implementation.

use crate::dto::{BookingResponse, ShowResponse, ShowSeatDto};
use crate::error::{ApiError, parse_unavailable_seats};
use cineseat_booking::backend::{
    BackendFuture, BookingBackend, CreateBookingError, FetchError,
};
use cineseat_booking::types::{BookingConfirmation, BookingId, BookingRequest, Seat, ShowId, UserId};
use reqwest::{Client, Method, RequestBuilder, StatusCode};

/// HTTP client for the booking backend.
#[derive(Clone)]
pub struct BookingApiClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl BookingApiClient {
    /// Create a client for the given API base URL (e.g.
    /// `http://localhost:8080/api`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client: Client::new(),
            base_url,
            bearer_token: None,
        }
    }

    /// Attach a bearer token to every request.
    ///
    /// Authentication is purely a transport concern here; the flow passes
    /// an already-authenticated [`UserId`] separately.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Fetch one show with its seat inventory.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown show, [`ApiError`] variants
    /// for transport, auth and decoding failures.
    pub async fn show(&self, show_id: ShowId) -> Result<ShowResponse, ApiError> {
        let response = self
            .request(Method::GET, &format!("/shows/{show_id}"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<ShowResponse>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string())),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }

    /// Create a booking.
    ///
    /// The backend does not commit to a status code or body shape for
    /// seat conflicts, so every non-success response is scanned for seat
    /// references; when none can be identified the error degrades to a
    /// generic server error carrying the raw body.
    ///
    /// # Errors
    ///
    /// [`CreateBookingError::SeatsUnavailable`] when the body names
    /// seats, [`CreateBookingError::Server`] for other rejections,
    /// [`CreateBookingError::Unreachable`] for transport failures.
    pub async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingResponse, CreateBookingError> {
        let response = self
            .request(Method::POST, "/bookings")
            .json(request)
            .send()
            .await
            .map_err(|e| CreateBookingError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response.json::<BookingResponse>().await.map_err(|e| {
                CreateBookingError::Server {
                    message: format!("malformed booking response: {e}"),
                }
            });
        }

        let body = response.text().await.unwrap_or_default();
        let seats = parse_unavailable_seats(&body);
        if seats.is_empty() {
            Err(CreateBookingError::Server {
                message: if body.is_empty() {
                    format!("status {status}")
                } else {
                    body
                },
            })
        } else {
            tracing::info!(status = status.as_u16(), seats = seats.len(), "booking conflict reported");
            Err(CreateBookingError::SeatsUnavailable(seats))
        }
    }

    /// Cancel a booking. Used by the surrounding bookings UI, not by the
    /// submission flow.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown booking, [`ApiError`]
    /// variants for transport, auth and decoding failures.
    pub async fn cancel_booking(&self, booking_id: BookingId) -> Result<BookingResponse, ApiError> {
        let response = self
            .request(Method::PUT, &format!("/bookings/cancel/{booking_id}"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<BookingResponse>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string())),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }

    /// A user's booking history, most recent first as the backend
    /// returns it.
    ///
    /// # Errors
    ///
    /// [`ApiError`] variants for transport, auth and decoding failures.
    pub async fn bookings_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BookingResponse>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/bookings/user/{user_id}"))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Vec<BookingResponse>>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

impl BookingBackend for BookingApiClient {
    fn fetch_seats(&self, show_id: ShowId) -> BackendFuture<'_, Result<Vec<Seat>, FetchError>> {
        Box::pin(async move {
            let show = self.show(show_id).await.map_err(FetchError::from)?;
            Ok(show
                .available_seats
                .into_iter()
                .map(ShowSeatDto::into_seat)
                .collect())
        })
    }

    fn create_booking(
        &self,
        request: BookingRequest,
    ) -> BackendFuture<'_, Result<BookingConfirmation, CreateBookingError>> {
        Box::pin(async move {
            let response = self.create_booking(&request).await?;
            Ok(response.into_confirmation())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_the_base_url() {
        let client = BookingApiClient::new("http://localhost:8080/api/");
        assert_eq!(client.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn bearer_token_is_optional() {
        let client = BookingApiClient::new("http://localhost:8080/api");
        assert!(client.bearer_token.is_none());
        let client = client.with_bearer_token("jwt");
        assert_eq!(client.bearer_token.as_deref(), Some("jwt"));
    }
}
