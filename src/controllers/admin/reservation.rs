//! Admin controllers for auditing [`Reservation`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::models::Reservation;
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::schemas::reservation::ReservationResponse;
use crate::session::AdminSession;
use crate::{DbPool, Error};

use super::PAGE_SIZE;

/// Get one page of reservations awaiting audit, oldest first
#[instrument(skip(pool))]
pub(crate) async fn get_pending_reservations(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let page = PageRequest::strict(param.page, PAGE_SIZE)?;

	let conn = pool.get().await?;

	let (total, records) = Reservation::pending_page(page, &conn).await?;
	let records: Vec<ReservationResponse> =
		records.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(page.paginate(total, records))))
}

/// Confirm a pending reservation
#[instrument(skip(pool))]
pub(crate) async fn confirm_reservation(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Reservation::confirm(id, &conn).await?;

	info!("admin {} confirmed reservation {}", session.data.user_id, id);

	Ok(StatusCode::NO_CONTENT)
}

/// Reject a pending reservation
#[instrument(skip(pool))]
pub(crate) async fn reject_reservation(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Reservation::reject(id, &conn).await?;

	info!("admin {} rejected reservation {}", session.data.user_id, id);

	Ok(StatusCode::NO_CONTENT)
}
