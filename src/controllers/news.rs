//! Controllers for reading [`News`]

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::models::News;
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::{DbPool, Error};

/// News items are listed five at a time, newest first
const PAGE_SIZE: i64 = 5;

/// Get a news item from the database
#[instrument(skip(pool))]
pub(crate) async fn get_news_item(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let news = News::get_by_id(id, &conn).await?;

	Ok((StatusCode::OK, Json(news)))
}

/// Get one page of news
///
/// Public listing: an out-of-range page clamps to the nearest valid page
#[instrument(skip(pool))]
pub(crate) async fn get_news(
	State(pool): State<DbPool>,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let total = News::count(&conn).await?;
	let page = PageRequest::lenient(param.page, PAGE_SIZE, total);

	let (total, news) = News::get_page(page, &conn).await?;
	let response = page.paginate(total, news);

	Ok((StatusCode::OK, Json(response)))
}
