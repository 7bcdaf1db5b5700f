use std::time::Duration;

use axum::Router;
use axum::routing::{get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::admin;
use crate::controllers::auth::{login, logout, register};
use crate::controllers::healthcheck;
use crate::controllers::message::{
	create_message,
	delete_message,
	get_messages,
	get_own_messages,
	update_message,
};
use crate::controllers::news::{get_news, get_news_item};
use crate::controllers::profile::{
	get_current_profile,
	update_current_profile,
};
use crate::controllers::reservation::{
	create_reservation,
	delete_reservation,
	finish_reservation,
	get_own_reservations,
	get_reservation,
	update_reservation,
};
use crate::controllers::venue::{get_venue, get_venues};
use crate::middleware::{AdminLayer, AuthLayer};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/venues", venue_routes())
		.nest("/news", news_routes())
		.nest("/messages", message_routes(&state))
		.nest("/reservations", reservation_routes(&state))
		.nest("/profile", profile_routes(&state))
		.nest("/admin", admin_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/register", post(register))
		.route("/login", post(login))
		.route(
			"/logout",
			post(logout).route_layer(AuthLayer::new(state.clone())),
		)
}

/// Public venue browsing routes
fn venue_routes() -> Router<AppState> {
	Router::new().route("/", get(get_venues)).route("/{id}", get(get_venue))
}

/// Public news routes
fn news_routes() -> Router<AppState> {
	Router::new().route("/", get(get_news)).route("/{id}", get(get_news_item))
}

/// Message board routes; posting and personal listings require a session
fn message_routes(state: &AppState) -> Router<AppState> {
	let authenticated = Router::new()
		.route("/", post(create_message))
		.route("/mine", get(get_own_messages))
		.route("/{id}", patch(update_message).delete(delete_message))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new().route("/", get(get_messages)).merge(authenticated)
}

/// Reservation routes, all session-gated
fn reservation_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_own_reservations).post(create_reservation))
		.route(
			"/{id}",
			get(get_reservation)
				.patch(update_reservation)
				.delete(delete_reservation),
		)
		.route("/{id}/finish", post(finish_reservation))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Profile routes for the logged-in user
fn profile_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/me", get(get_current_profile).patch(update_current_profile))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Admin management routes
fn admin_routes(state: &AppState) -> Router<AppState> {
	let venues = Router::new()
		.route(
			"/",
			get(admin::venue::get_venues).post(admin::venue::create_venue),
		)
		.route(
			"/{id}",
			patch(admin::venue::update_venue)
				.delete(admin::venue::delete_venue),
		);

	let news = Router::new()
		.route("/", get(admin::news::get_news).post(admin::news::create_news))
		.route(
			"/{id}",
			patch(admin::news::update_news).delete(admin::news::delete_news),
		);

	let users = Router::new()
		.route("/", get(admin::user::get_users).post(admin::user::create_user))
		.route(
			"/{id}",
			get(admin::user::get_user)
				.patch(admin::user::update_user)
				.delete(admin::user::delete_user),
		);

	let messages = Router::new()
		.route("/", get(admin::message::get_pending_messages))
		.route("/{id}/pass", post(admin::message::pass_message))
		.route("/{id}/reject", post(admin::message::reject_message));

	let reservations = Router::new()
		.route("/", get(admin::reservation::get_pending_reservations))
		.route(
			"/{id}/confirm",
			post(admin::reservation::confirm_reservation),
		)
		.route(
			"/{id}/reject",
			post(admin::reservation::reject_reservation),
		);

	Router::new()
		.nest("/venues", venues)
		.nest("/news", news)
		.nest("/users", users)
		.nest("/messages", messages)
		.nest("/reservations", reservations)
		.route_layer(AdminLayer::new())
		.route_layer(AuthLayer::new(state.clone()))
}
