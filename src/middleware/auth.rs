//! Middleware to authorize users and attach their session to the request

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::RequestExt;
use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use tower::{Layer, Service};
use uuid::Uuid;

use crate::AppState;
use crate::error::{Error, TokenError};

/// Middleware layer that guarantees a request carries a valid access token
/// with a live session behind it
///
/// The resolved session is stored as an [`Extension`](axum::Extension);
/// controllers that need it ask for a [`Session`](crate::Session) or
/// [`AdminSession`](crate::session::AdminSession) in their arguments
#[derive(Clone)]
pub struct AuthLayer {
	state: AppState,
}

impl AuthLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AuthLayer {
	type Service = AuthMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
	inner: S,
	state: AppState,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let jar = req
				.extract_parts_with_state::<PrivateCookieJar, _>(&state)
				.await
				.unwrap();

			let Some(access_token) = jar.get(&state.config.access_token_name)
			else {
				info!("got request without valid access token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let Ok(session_id) = Uuid::parse_str(access_token.value()) else {
				info!("got request with malformed access token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let Some(session) = state.session_store.get(session_id) else {
				warn!("attempted to authorize unknown session {session_id}");

				return Ok(
					Error::from(TokenError::MissingSession).into_response()
				);
			};

			req.extensions_mut().insert(session);

			inner.call(req).await
		})
	}
}
