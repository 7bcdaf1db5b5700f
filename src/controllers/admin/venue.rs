//! Admin controllers for managing [`Venue`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::Venue;
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::schemas::venue::{CreateVenueRequest, UpdateVenueRequest};
use crate::session::AdminSession;
use crate::{DbPool, Error};

use super::PAGE_SIZE;

/// Get one page of venues for the management view
#[instrument(skip(pool))]
pub(crate) async fn get_venues(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let page = PageRequest::strict(param.page, PAGE_SIZE)?;

	let conn = pool.get().await?;

	let (total, venues) = Venue::get_page(page, &conn).await?;

	Ok((StatusCode::OK, Json(page.paginate(total, venues))))
}

/// Create a new venue
#[instrument(skip(pool))]
pub(crate) async fn create_venue(
	State(pool): State<DbPool>,
	session: AdminSession,
	Json(request): Json<CreateVenueRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let venue = request.to_insertable().insert(&conn).await?;

	info!(
		"admin {} created venue {} ({})",
		session.data.user_id, venue.id, venue.name
	);

	Ok((StatusCode::CREATED, Json(venue)))
}

/// Update a venue
#[instrument(skip(pool))]
pub(crate) async fn update_venue(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Path(id): Path<i32>,
	Json(request): Json<UpdateVenueRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let venue = request.to_changeset().apply_to(id, &conn).await?;

	Ok((StatusCode::OK, Json(venue)))
}

/// Delete a venue
#[instrument(skip(pool))]
pub(crate) async fn delete_venue(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Venue::delete_by_id(id, &conn).await?;

	info!("admin {} deleted venue {}", session.data.user_id, id);

	Ok(StatusCode::NO_CONTENT)
}
