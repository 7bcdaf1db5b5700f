//! Controllers for placing and managing [`Reservation`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::booking::validate_booking;
use crate::error::AuditError;
use crate::models::{
	NewReservation,
	Reservation,
	ReservationState,
	Venue,
};
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::schemas::reservation::{
	CreateReservationRequest,
	ReservationResponse,
	UpdateReservationRequest,
};
use crate::session::Session;
use crate::{DbPool, Error};

/// Reservations are listed five at a time, newest first
const PAGE_SIZE: i64 = 5;

/// Get one page of the caller's own reservations
#[instrument(skip(pool))]
pub(crate) async fn get_own_reservations(
	State(pool): State<DbPool>,
	session: Session,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let page = PageRequest::strict(param.page, PAGE_SIZE)?;

	let conn = pool.get().await?;

	let (total, records) =
		Reservation::for_user_page(session.data.user_id, page, &conn).await?;
	let records: Vec<ReservationResponse> =
		records.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(page.paginate(total, records))))
}

/// Place a new reservation; it awaits an admin audit
#[instrument(skip(pool))]
pub(crate) async fn create_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let venue = Venue::get_by_name(request.venue_name.clone(), &conn).await?;
	let taken = match &venue {
		Some(venue) => {
			Reservation::active_windows(venue.id, None, &conn).await?
		},
		None => vec![],
	};

	let booking = validate_booking(
		&request.venue_name,
		venue.as_ref(),
		&taken,
		&request.start_time,
		request.hours,
		Utc::now().naive_utc(),
	)?;

	let new_reservation = NewReservation {
		user_id:    session.data.user_id,
		venue_id:   booking.venue_id,
		start_time: booking.window.start,
		hours:      booking.hours,
		state:      ReservationState::Pending,
	};

	let reservation = new_reservation.insert(&conn).await?;
	let response =
		ReservationResponse::from((reservation, request.venue_name));

	Ok((StatusCode::CREATED, Json(response)))
}

/// Get a single reservation; allowed for its owner and for admins
#[instrument(skip(pool))]
pub(crate) async fn get_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (reservation, venue_name) =
		Reservation::get_with_venue(id, &conn).await?;

	if reservation.user_id != session.data.user_id && !session.data.is_admin {
		return Err(Error::Forbidden);
	}

	let response = ReservationResponse::from((reservation, venue_name));

	Ok((StatusCode::OK, Json(response)))
}

/// Rebook one of the caller's own pending reservations
///
/// The request goes through the same validation as a new booking; the
/// reservation's current window is left out of the conflict scan so it
/// cannot collide with itself
#[instrument(skip(pool))]
pub(crate) async fn update_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = Reservation::get_by_id(id, &conn).await?;

	if reservation.user_id != session.data.user_id {
		return Err(Error::Forbidden);
	}

	if reservation.state != ReservationState::Pending {
		return Err(AuditError::NotAwaitingAudit.into());
	}

	let venue = Venue::get_by_name(request.venue_name.clone(), &conn).await?;
	let taken = match &venue {
		Some(venue) => {
			Reservation::active_windows(venue.id, Some(id), &conn).await?
		},
		None => vec![],
	};

	let booking = validate_booking(
		&request.venue_name,
		venue.as_ref(),
		&taken,
		&request.start_time,
		request.hours,
		Utc::now().naive_utc(),
	)?;

	let reservation = Reservation::update_booking(
		id,
		booking.venue_id,
		booking.window.start,
		booking.hours,
		&conn,
	)
	.await?;

	let response =
		ReservationResponse::from((reservation, request.venue_name));

	Ok((StatusCode::OK, Json(response)))
}

/// Mark one of the caller's confirmed reservations as finished
#[instrument(skip(pool))]
pub(crate) async fn finish_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = Reservation::get_by_id(id, &conn).await?;

	if reservation.user_id != session.data.user_id && !session.data.is_admin {
		return Err(Error::Forbidden);
	}

	Reservation::finish(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Delete a reservation; allowed for its owner and for admins
#[instrument(skip(pool))]
pub(crate) async fn delete_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = Reservation::get_by_id(id, &conn).await?;

	if reservation.user_id != session.data.user_id && !session.data.is_admin {
		return Err(Error::Forbidden);
	}

	Reservation::delete_by_id(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
