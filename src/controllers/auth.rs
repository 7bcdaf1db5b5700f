//! Controllers for registration, login and logout

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::models::{NewUser, User};
use crate::schemas::auth::{LoginRequest, RegisterRequest};
use crate::session::{Session, SessionData, SessionStore};
use crate::{Config, DbPool, Error, LoginError};

#[instrument(skip_all)]
pub(crate) async fn register(
	State(pool): State<DbPool>,
	Json(register_data): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
	register_data.validate()?;

	let password_hash = User::hash_password(&register_data.password)?;

	let new_user = NewUser {
		username: register_data.username,
		nickname: register_data.nickname,
		password_hash,
		email: register_data.email,
		phone: register_data.phone,
		admin: false,
		picture: None,
	};

	let conn = pool.get().await?;
	let user = new_user.insert(&conn).await?;

	info!(
		"registered new user id: {} username: {}",
		user.id, user.username
	);

	Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip_all)]
pub(crate) async fn login(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	State(session_store): State<SessionStore>,
	jar: PrivateCookieJar,
	Json(login_data): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let user = User::get_by_username(login_data.username.clone(), &conn)
		.await?
		.ok_or(LoginError::UnknownUsername(login_data.username))?;

	user.verify_password(&login_data.password)?;

	let session = session_store.create(SessionData::from(&user));
	let access_token_cookie = session.to_access_token_cookie(
		config.access_token_name.clone(),
		config.access_token_lifetime,
		config.production,
	);

	let jar = jar.add(access_token_cookie);

	info!("logged in user {} ({})", user.id, user.username);

	Ok((StatusCode::OK, jar, Json(user)))
}

#[instrument(skip_all)]
pub(crate) async fn logout(
	State(config): State<Config>,
	State(session_store): State<SessionStore>,
	session: Session,
	jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, NoContent), Error> {
	session_store.destroy(session.id);

	let access_token = Cookie::build(config.access_token_name).path("/");
	let jar = jar.remove(access_token);

	info!("logged out user {}", session.data.user_id);

	Ok((jar, NoContent))
}
