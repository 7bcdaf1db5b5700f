#[macro_use]
extern crate tracing;

pub mod booking;
mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod schemas;
pub mod session;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use deadpool_diesel::postgres::{Object, Pool};

pub type DbPool = Pool;
pub type DbConn = Object;

pub use config::Config;
pub use error::{
	AuditError,
	BookingError,
	Error,
	LoginError,
	PaginationError,
	TokenError,
};
pub use session::{Session, SessionStore};

/// Shared application state
#[derive(Clone, FromRef)]
pub struct AppState {
	pub config:         Config,
	pub database_pool:  DbPool,
	pub session_store:  SessionStore,
	pub cookie_jar_key: Key,
}
