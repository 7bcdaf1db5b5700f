//! Controllers for the moderated message board

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use validator::Validate;

use crate::models::{Message, MessageState, NewMessage};
use crate::schemas::message::{
	CreateMessageRequest,
	MessageResponse,
	UpdateMessageRequest,
};
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::session::Session;
use crate::{DbPool, Error};

/// Messages are listed five at a time, newest first
const PAGE_SIZE: i64 = 5;

/// Get one page of passed messages
///
/// Public listing: an out-of-range page clamps to the nearest valid page
#[instrument(skip(pool))]
pub(crate) async fn get_messages(
	State(pool): State<DbPool>,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let total = Message::count_passed(&conn).await?;
	let page = PageRequest::lenient(param.page, PAGE_SIZE, total);

	let (total, records) = Message::passed_page(page, &conn).await?;
	let records: Vec<MessageResponse> =
		records.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(page.paginate(total, records))))
}

/// Get one page of the caller's own messages, whatever their state
#[instrument(skip(pool))]
pub(crate) async fn get_own_messages(
	State(pool): State<DbPool>,
	session: Session,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let page = PageRequest::strict(param.page, PAGE_SIZE)?;

	let conn = pool.get().await?;

	let (total, records) =
		Message::for_user_page(session.data.user_id, page, &conn).await?;

	Ok((StatusCode::OK, Json(page.paginate(total, records))))
}

/// Post a new message; it stays hidden until an admin passes it
#[instrument(skip(pool))]
pub(crate) async fn create_message(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let new_message = NewMessage {
		user_id:   session.data.user_id,
		content:   request.content,
		posted_at: Utc::now().naive_utc(),
		state:     MessageState::Pending,
	};

	let conn = pool.get().await?;
	let message = new_message.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(message)))
}

/// Edit one of the caller's own messages; the edit goes back to moderation
#[instrument(skip(pool))]
pub(crate) async fn update_message(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateMessageRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let message = Message::get_by_id(id, &conn).await?;

	if message.user_id != session.data.user_id {
		return Err(Error::Forbidden);
	}

	let message = Message::update_content(id, request.content, &conn).await?;

	Ok((StatusCode::OK, Json(message)))
}

/// Delete a message; allowed for its author and for admins
#[instrument(skip(pool))]
pub(crate) async fn delete_message(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let message = Message::get_by_id(id, &conn).await?;

	if message.user_id != session.data.user_id && !session.data.is_admin {
		return Err(Error::Forbidden);
	}

	Message::delete_by_id(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
