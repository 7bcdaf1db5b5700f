//! Admin controllers for managing [`News`]

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use validator::Validate;

use crate::models::{NewNews, News};
use crate::schemas::news::{CreateNewsRequest, UpdateNewsRequest};
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::session::AdminSession;
use crate::{DbPool, Error};

use super::PAGE_SIZE;

/// Get one page of news for the management view
#[instrument(skip(pool))]
pub(crate) async fn get_news(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let page = PageRequest::strict(param.page, PAGE_SIZE)?;

	let conn = pool.get().await?;

	let (total, news) = News::get_page(page, &conn).await?;

	Ok((StatusCode::OK, Json(page.paginate(total, news))))
}

/// Publish a news item
#[instrument(skip(pool))]
pub(crate) async fn create_news(
	State(pool): State<DbPool>,
	session: AdminSession,
	Json(request): Json<CreateNewsRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let new_news = NewNews {
		title:        request.title,
		content:      request.content,
		published_at: Utc::now().naive_utc(),
	};

	let conn = pool.get().await?;
	let news = new_news.insert(&conn).await?;

	info!(
		"admin {} published news {} ({})",
		session.data.user_id, news.id, news.title
	);

	Ok((StatusCode::CREATED, Json(news)))
}

/// Update a news item
#[instrument(skip(pool))]
pub(crate) async fn update_news(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Path(id): Path<i32>,
	Json(request): Json<UpdateNewsRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let news = request.to_changeset().apply_to(id, &conn).await?;

	Ok((StatusCode::OK, Json(news)))
}

/// Delete a news item
#[instrument(skip(pool))]
pub(crate) async fn delete_news(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	News::delete_by_id(id, &conn).await?;

	info!("admin {} deleted news {}", session.data.user_id, id);

	Ok(StatusCode::NO_CONTENT)
}
