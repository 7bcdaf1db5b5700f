//! User sessions and the in-memory session store

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use crate::AppState;
use crate::error::{Error, InternalServerError};
use crate::models::User;

/// A session for any authenticated user
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.data.user_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
	pub id:   Uuid,
	pub data: SessionData,
}

/// A session for any admin user
///
/// ```rs
/// pub async fn foo_route(session: AdminSession) -> impl IntoResponse {
///     println!("{:?}", session.data.user_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AdminSession {
	pub id:   Uuid,
	pub data: SessionData,
}

/// The principal recorded for a logged-in client
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionData {
	pub user_id:  i32,
	pub username: String,
	pub is_admin: bool,
}

impl From<&User> for SessionData {
	fn from(user: &User) -> Self {
		Self {
			user_id:  user.id,
			username: user.username.clone(),
			is_admin: user.admin,
		}
	}
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &AppState,
	) -> Result<Self, Self::Rejection> {
		match parts.extensions.get::<Session>() {
			Some(session) => Ok(session.clone()),
			None => Err(InternalServerError::SessionWithoutAuthError.into()),
		}
	}
}

impl FromRequestParts<AppState> for AdminSession {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session =
			Session::from_request_parts(parts, state).await?;

		if !session.data.is_admin {
			return Err(Error::Forbidden);
		}

		Ok(Self { id: session.id, data: session.data })
	}
}

impl Session {
	/// Convert this [`Session`] into an access token cookie
	#[must_use]
	pub fn to_access_token_cookie(
		&self,
		name: String,
		lifetime: Duration,
		secure: bool,
	) -> Cookie<'static> {
		Cookie::build((name, self.id.to_string()))
			.http_only(true)
			.max_age(lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(secure)
			.into()
	}
}

/// Process-local store mapping session ids to their principals
///
/// Sessions live exactly as long as the process; restarting the server logs
/// everyone out
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
	sessions: Arc<RwLock<HashMap<Uuid, SessionData>>>,
}

impl SessionStore {
	/// Create and store a new [`Session`] for a given principal
	pub fn create(&self, data: SessionData) -> Session {
		let id = Uuid::new_v4();

		self.sessions.write().insert(id, data.clone());

		debug!("stored session {} for user {}", id, data.user_id);

		Session { id, data }
	}

	/// Get a session from the store
	#[must_use]
	pub fn get(&self, id: Uuid) -> Option<Session> {
		let data = self.sessions.read().get(&id).cloned()?;

		Some(Session { id, data })
	}

	/// Remove a session given its id
	pub fn destroy(&self, id: Uuid) {
		self.sessions.write().remove(&id);

		debug!("destroyed session {id}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_principal(admin: bool) -> SessionData {
		SessionData {
			user_id:  7,
			username: "test".to_string(),
			is_admin: admin,
		}
	}

	#[test]
	fn created_sessions_can_be_retrieved() {
		let store = SessionStore::default();

		let session = store.create(test_principal(false));
		let found = store.get(session.id).unwrap();

		assert_eq!(found.data.user_id, 7);
		assert_eq!(found.data.username, "test");
		assert!(!found.data.is_admin);
	}

	#[test]
	fn unknown_ids_are_absent() {
		let store = SessionStore::default();

		assert!(store.get(Uuid::new_v4()).is_none());
	}

	#[test]
	fn destroyed_sessions_are_gone() {
		let store = SessionStore::default();

		let session = store.create(test_principal(true));
		store.destroy(session.id);

		assert!(store.get(session.id).is_none());
	}

	#[test]
	fn sessions_are_independent() {
		let store = SessionStore::default();

		let first = store.create(test_principal(false));
		let second = store.create(test_principal(true));

		store.destroy(first.id);

		assert!(store.get(first.id).is_none());
		assert!(store.get(second.id).is_some());
	}
}
