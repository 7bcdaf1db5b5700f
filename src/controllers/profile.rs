//! Controllers for the caller's own profile

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::models::User;
use crate::schemas::user::UpdateProfileRequest;
use crate::session::Session;
use crate::{DbPool, Error};

/// Get the profile of the logged-in user
#[instrument(skip(pool))]
pub(crate) async fn get_current_profile(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let user = User::get_by_id(session.data.user_id, &conn).await?;

	Ok((StatusCode::OK, Json(user)))
}

/// Update the profile of the logged-in user
#[instrument(skip_all)]
pub(crate) async fn update_current_profile(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let password_hash = match &request.password {
		Some(password) => Some(User::hash_password(password)?),
		None => None,
	};

	let conn = pool.get().await?;

	let user = request
		.into_changeset(password_hash)
		.apply_to(session.data.user_id, &conn)
		.await?;

	Ok((StatusCode::OK, Json(user)))
}
