use std::pin::Pin;

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};

use crate::Error;
use crate::session::Session;

/// Middleware layer that rejects sessions without the admin flag
///
/// Must sit inside an [`AuthLayer`](crate::middleware::AuthLayer) so the
/// session extension is present
#[derive(Clone, Copy, Debug, Default)]
pub struct AdminLayer;

impl AdminLayer {
	#[must_use]
	pub fn new() -> Self { Self }
}

impl<S> Layer<S> for AdminLayer {
	type Service = AdminMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service { AdminMiddleware { inner } }
}

#[derive(Clone)]
pub struct AdminMiddleware<S> {
	inner: S,
}

impl<S> Service<Request<Body>> for AdminMiddleware<S>
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
		cx: &mut std::task::Context<'_>,
	) -> std::task::Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		Box::pin(async move {
			let Some(session) = req.extensions().get::<Session>() else {
				debug!("session not found in request extensions");

				return Ok(Error::Forbidden.into_response());
			};

			if !session.data.is_admin {
				debug!("user {} is not an admin", session.data.user_id);

				return Ok(Error::Forbidden.into_response());
			}

			inner.call(req).await
		})
	}
}
