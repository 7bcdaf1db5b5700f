//! Controllers for browsing [`Venue`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::models::Venue;
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::{DbPool, Error};

/// Venues are listed five at a time, ordered by id
const PAGE_SIZE: i64 = 5;

/// Get a venue from the database
#[instrument(skip(pool))]
pub(crate) async fn get_venue(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let venue = Venue::get_by_id(id, &conn).await?;

	Ok((StatusCode::OK, Json(venue)))
}

/// Get one page of venues
///
/// Public listing: an out-of-range page clamps to the nearest valid page
#[instrument(skip(pool))]
pub(crate) async fn get_venues(
	State(pool): State<DbPool>,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let total = Venue::count(&conn).await?;
	let page = PageRequest::lenient(param.page, PAGE_SIZE, total);

	let (total, venues) = Venue::get_page(page, &conn).await?;
	let response = page.paginate(total, venues);

	Ok((StatusCode::OK, Json(response)))
}
