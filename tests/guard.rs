//! The auth middleware must reject unauthenticated callers before any
//! persistence access happens; the pool below points at nothing and is
//! never touched

use axum::http::StatusCode;
use axum_extra::extract::cookie::Key;
use axum_test::TestServer;
use time::Duration;
use venuebook::{AppState, Config, SessionStore, routes};

fn test_app() -> TestServer {
	let config = Config {
		database_url:          "postgres://localhost:5432/venuebook_unused"
			.to_string(),
		access_token_name:     "venuebook_access_token".to_string(),
		access_token_lifetime: Duration::minutes(30),
		production:            false,
	};

	// Pool creation is lazy, no connection is ever opened
	let database_pool = config.create_database_pool();

	let state = AppState {
		config,
		database_pool,
		session_store: SessionStore::default(),
		cookie_jar_key: Key::from(&[0u8; 64]),
	};

	TestServer::new(routes::get_app_router(state)).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_reservations_requires_a_session() {
	let app = test_app();

	let response = app.get("/reservations").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

	let body = response.json::<serde_json::Value>();

	assert_eq!(body["message"], "missing or invalid access token");
}

#[tokio::test(flavor = "multi_thread")]
async fn placing_a_reservation_requires_a_session() {
	let app = test_app();

	let response = app
		.post("/reservations")
		.json(&serde_json::json!({
			"venueName": "Court A",
			"startTime": "2030-06-01 10:00",
			"hours": 2,
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_requires_a_session() {
	let app = test_app();

	let response = app.post("/auth/logout").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn personal_message_listing_requires_a_session() {
	let app = test_app();

	let response = app.get("/messages/mine").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_routes_require_a_session() {
	let app = test_app();

	let response = app.get("/admin/reservations").await;
	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

	let response = app.post("/admin/venues").await;
	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

	let response = app.post("/admin/reservations/1/confirm").await;
	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
