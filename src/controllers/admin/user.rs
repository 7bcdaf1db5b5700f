//! Admin controllers for managing [`User`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::{NewUser, User};
use crate::schemas::pagination::{PageParam, PageRequest};
use crate::schemas::user::{CreateUserRequest, UpdateUserRequest};
use crate::session::AdminSession;
use crate::{DbPool, Error};

use super::PAGE_SIZE;

/// Get one page of users for the management view
#[instrument(skip(pool))]
pub(crate) async fn get_users(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, Error> {
	let page = PageRequest::strict(param.page, PAGE_SIZE)?;

	let conn = pool.get().await?;

	let (total, users) = User::get_page(page, &conn).await?;

	Ok((StatusCode::OK, Json(page.paginate(total, users))))
}

/// Get a single user
#[instrument(skip(pool))]
pub(crate) async fn get_user(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let user = User::get_by_id(id, &conn).await?;

	Ok((StatusCode::OK, Json(user)))
}

/// Create a user account directly
#[instrument(skip_all)]
pub(crate) async fn create_user(
	State(pool): State<DbPool>,
	session: AdminSession,
	Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let password_hash = User::hash_password(&request.password)?;

	let new_user = NewUser {
		username: request.username,
		nickname: request.nickname,
		password_hash,
		email: request.email,
		phone: request.phone,
		admin: request.admin,
		picture: request.picture,
	};

	let conn = pool.get().await?;
	let user = new_user.insert(&conn).await?;

	info!(
		"admin {} created user {} ({})",
		session.data.user_id, user.id, user.username
	);

	Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user account
#[instrument(skip_all)]
pub(crate) async fn update_user(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Path(id): Path<i32>,
	Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let password_hash = match &request.password {
		Some(password) => Some(User::hash_password(password)?),
		None => None,
	};

	let conn = pool.get().await?;
	let user = request
		.into_changeset(password_hash)
		.apply_to(id, &conn)
		.await?;

	Ok((StatusCode::OK, Json(user)))
}

/// Delete a user account
#[instrument(skip(pool))]
pub(crate) async fn delete_user(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	User::delete_by_id(id, &conn).await?;

	info!("admin {} deleted user {}", session.data.user_id, id);

	Ok(StatusCode::NO_CONTENT)
}
