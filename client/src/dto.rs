//! Wire DTOs for the booking backend's REST API.
//!
//! Field names mirror the backend's camelCase JSON. Monetary amounts
//! arrive as floating-point rupees and are converted to integer paise at
//! the boundary; timestamps arrive as zone-less local datetimes and are
//! treated as UTC.

use cineseat_booking::types::{
    BookingConfirmation, BookingId, Money, Seat, SeatCategory, SeatId, SeatNumber, SeatStatus,
    ShowId,
};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// `GET /shows/{id}` response, reduced to what the booking flow needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowResponse {
    /// Show identifier
    pub id: ShowId,
    /// Seat inventory for this show
    #[serde(default)]
    pub available_seats: Vec<ShowSeatDto>,
    /// Scheduled start, when reported
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    /// Scheduled end, when reported
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
}

/// One seat of a show, as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowSeatDto {
    /// Show-scoped seat id (this is what bookings reference)
    pub id: SeatId,
    /// The underlying physical seat
    pub seat: SeatDetailDto,
    /// Server-authoritative status
    pub status: SeatStatus,
    /// Price in rupees
    pub price: f64,
}

impl ShowSeatDto {
    /// Convert to the domain seat model.
    #[must_use]
    pub fn into_seat(self) -> Seat {
        Seat::new(
            self.id,
            self.seat.seat_number,
            self.seat.seat_type,
            money_from_rupees(self.price),
            self.status,
        )
    }
}

/// The physical-seat part of a show seat.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatDetailDto {
    /// Row-plus-number label
    pub seat_number: SeatNumber,
    /// Pricing tier
    pub seat_type: SeatCategory,
}

/// Booking record returned by `POST /bookings`, `PUT /bookings/cancel/…`
/// and `GET /bookings/user/…`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Backend record id, when reported
    #[serde(default)]
    pub id: Option<BookingId>,
    /// Backend-assigned booking number
    pub booking_number: String,
    /// Amount charged, in rupees
    pub total_amount: f64,
    /// Record status (`CONFIRMED`, `CANCELLED`, …)
    #[serde(default)]
    pub status: Option<String>,
    /// When the booking was created
    #[serde(default)]
    pub booking_time: Option<NaiveDateTime>,
}

impl BookingResponse {
    /// Convert to the confirmation subset the booking flow consumes.
    #[must_use]
    pub fn into_confirmation(self) -> BookingConfirmation {
        BookingConfirmation {
            booking_number: self.booking_number,
            total_amount: money_from_rupees(self.total_amount),
            booked_at: self.booking_time.map(|t| t.and_utc()),
        }
    }
}

// Wire amounts are floating-point rupees; paise precision is all the
// domain keeps.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn money_from_rupees(amount: f64) -> Money {
    Money::from_paise((amount.max(0.0) * 100.0).round() as u64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn show_seat_maps_to_the_domain_model() {
        let dto: ShowSeatDto = serde_json::from_str(
            r#"{
                "id": 11,
                "seat": { "seatNumber": "R1", "seatType": "RECLINER", "basePrice": 400.0 },
                "status": "AVAILABLE",
                "price": 450.0
            }"#,
        )
        .unwrap();

        let seat = dto.into_seat();
        assert_eq!(seat.id, SeatId::new(11));
        assert_eq!(seat.number, SeatNumber::new("R1"));
        assert_eq!(seat.category, SeatCategory::Recliner);
        assert_eq!(seat.price, Money::from_rupees(450));
        assert!(seat.is_available());
    }

    #[test]
    fn booking_response_maps_to_a_confirmation() {
        let dto: BookingResponse = serde_json::from_str(
            r#"{
                "id": 5,
                "bookingNumber": "9f2c",
                "totalAmount": 300.0,
                "status": "CONFIRMED",
                "bookingTime": "2026-01-02T18:30:00"
            }"#,
        )
        .unwrap();

        let confirmation = dto.into_confirmation();
        assert_eq!(confirmation.booking_number, "9f2c");
        assert_eq!(confirmation.total_amount, Money::from_rupees(300));
        assert!(confirmation.booked_at.is_some());
    }

    #[test]
    fn fractional_rupees_round_to_paise() {
        assert_eq!(money_from_rupees(150.505), Money::from_paise(15_051));
        assert_eq!(money_from_rupees(-1.0), Money::ZERO);
    }

    #[test]
    fn missing_optional_fields_default() {
        let dto: BookingResponse =
            serde_json::from_str(r#"{"bookingNumber": "x", "totalAmount": 0.0}"#).unwrap();
        assert!(dto.id.is_none());
        assert!(dto.booking_time.is_none());
        assert!(dto.into_confirmation().booked_at.is_none());
    }
}
