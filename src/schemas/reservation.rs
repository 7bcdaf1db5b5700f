use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::booking::BookingWindow;
use crate::models::{Reservation, ReservationState};

/// Request to book a venue
///
/// `start_time` is submitted as `YYYY-MM-DD HH:MM` text and validated by
/// [`booking::validate_booking`](crate::booking::validate_booking)
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
	pub venue_name: String,
	pub start_time: String,
	pub hours:      i32,
}

/// Request to rebook an existing reservation
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
	pub venue_name: String,
	pub start_time: String,
	pub hours:      i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:         i32,
	pub venue_id:   i32,
	pub venue_name: String,
	pub state:      ReservationState,
	pub start_time: NaiveDateTime,
	pub end_time:   NaiveDateTime,
	pub hours:      i32,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl From<(Reservation, String)> for ReservationResponse {
	fn from(value: (Reservation, String)) -> Self {
		let (reservation, venue_name) = value;

		let window =
			BookingWindow::new(reservation.start_time, reservation.hours);

		Self {
			id: reservation.id,
			venue_id: reservation.venue_id,
			venue_name,
			state: reservation.state,
			start_time: window.start,
			end_time: window.end,
			hours: reservation.hours,
			created_at: reservation.created_at,
			updated_at: reservation.updated_at,
		}
	}
}
