//! Admin controllers for moderating [`Message`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::models::Message;
use crate::schemas::message::MessageResponse;
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::session::AdminSession;
use crate::{DbPool, Error};

use super::PAGE_SIZE;

/// Get one page of messages awaiting moderation, oldest first
#[instrument(skip(pool))]
pub(crate) async fn get_pending_messages(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let page = PageRequest::strict(param.page, PAGE_SIZE)?;

	let conn = pool.get().await?;

	let (total, records) = Message::pending_page(page, &conn).await?;
	let records: Vec<MessageResponse> =
		records.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(page.paginate(total, records))))
}

/// Approve a pending message for public listing
#[instrument(skip(pool))]
pub(crate) async fn pass_message(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Message::pass(id, &conn).await?;

	info!("admin {} passed message {}", session.data.user_id, id);

	Ok(StatusCode::NO_CONTENT)
}

/// Reject a pending message
#[instrument(skip(pool))]
pub(crate) async fn reject_message(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Message::reject(id, &conn).await?;

	info!("admin {} rejected message {}", session.data.user_id, id);

	Ok(StatusCode::NO_CONTENT)
}
