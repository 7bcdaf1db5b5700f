//! Library-wide error types and [`From`] impls

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("{0}")]
	NotFound(String),
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Invalid or missing session token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Any error related to placing or editing a booking
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// Invalid lifecycle transition on an audited resource
	#[error(transparent)]
	AuditError(#[from] AuditError),
	/// Invalid pagination parameters
	#[error(transparent)]
	PaginationError(#[from] PaginationError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function an error code should only ever increase;
	/// a code must never be reused once assigned to avoid unexpectedly
	/// breaking API consumers
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::NotFound(_) => 5,
			Self::LoginError(e) => {
				match e {
					LoginError::UnknownUsername(_) => 6,
					LoginError::InvalidPassword => 7,
				}
			},
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 8,
					TokenError::MissingSession => 9,
				}
			},
			Self::BookingError(e) => {
				match e {
					BookingError::UnknownVenue(_) => 10,
					BookingError::MalformedStartTime { .. } => 11,
					BookingError::NegativeDuration(_) => 12,
					BookingError::StartTimeNotInFuture(_) => 13,
					BookingError::WindowTaken { .. } => 14,
				}
			},
			Self::AuditError(e) => {
				match e {
					AuditError::NotAwaitingAudit => 15,
					AuditError::NotConfirmed => 16,
					AuditError::AlreadyFinished => 17,
				}
			},
			Self::PaginationError(e) => {
				match e {
					PaginationError::PageIndexNegative(_) => 18,
				}
			},
			Self::ValidationError(_) => 19,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::LoginError(LoginError::UnknownUsername(m))
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::UnknownVenue(venue) => {
						Some(serde_json::json!({ "venue": venue }).to_string())
					},
					BookingError::MalformedStartTime { text, source } => Some(
						serde_json::json!({
							"text": text,
							"reason": source.to_string(),
						})
						.to_string(),
					),
					BookingError::NegativeDuration(hours) => {
						Some(serde_json::json!({ "hours": hours }).to_string())
					},
					BookingError::StartTimeNotInFuture(start) => {
						Some(serde_json::json!({ "start": start }).to_string())
					},
					BookingError::WindowTaken { start, end } => Some(
						serde_json::json!({ "start": start, "end": end })
							.to_string(),
					),
				}
			},
			Self::PaginationError(PaginationError::PageIndexNegative(page)) => {
				Some(serde_json::json!({ "page": page }).to_string())
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_) => StatusCode::CONFLICT,
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::LoginError(_) => StatusCode::FORBIDDEN,
			Self::BookingError(_)
			| Self::AuditError(_)
			| Self::PaginationError(_) => StatusCode::BAD_REQUEST,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("no user with username '{0}' was found")]
	UnknownUsername(String),
	#[error("invalid password")]
	InvalidPassword,
}

/// Any error related to a session token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing or invalid access token")]
	MissingAccessToken,
	#[error("missing session")]
	MissingSession,
}

/// Any error related to placing or editing a booking
#[derive(Debug, Error)]
pub enum BookingError {
	/// The requested venue does not exist
	#[error("venue '{0}' was not found")]
	UnknownVenue(String),
	/// The submitted start time did not match the expected
	/// `YYYY-MM-DD HH:MM` shape
	#[error("could not parse start time '{text}'")]
	MalformedStartTime {
		text:   String,
		#[source]
		source: chrono::format::ParseError,
	},
	/// The requested duration was negative
	#[error("duration must not be negative")]
	NegativeDuration(i32),
	/// The requested window precedes current time
	#[error("requested window precedes current time")]
	StartTimeNotInFuture(NaiveDateTime),
	/// The requested window overlaps an existing booking for the venue
	#[error("the venue is already booked during the requested window")]
	WindowTaken { start: NaiveDateTime, end: NaiveDateTime },
}

/// Invalid lifecycle transitions on audited resources
#[derive(Debug, Error)]
pub enum AuditError {
	#[error("not awaiting audit")]
	NotAwaitingAudit,
	#[error("reservation is not confirmed")]
	NotConfirmed,
	#[error("reservation already finished")]
	AlreadyFinished,
}

/// Any error related to pagination parameters
#[derive(Debug, Error)]
pub enum PaginationError {
	#[error("page index must not be less than zero")]
	PageIndexNegative(i64),
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map database result errors to application errors
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by a query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("not found".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				// Unwrap is safe as constraint_name is guaranteed to exist
				// for postgres
				let constraint_name = info.constraint_name().unwrap();

				// Standard constraint names in postgres are
				// {tablename}_{columnname}_{suffix}
				let Some(field) = constraint_name.split('_').nth(1) else {
					return InternalServerError::ConstraintError(
						constraint_name.to_string(),
					)
					.into();
				};

				Self::Duplicate(format!("'{field}' is already in use"))
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

#[cfg(test)]
mod tests {
	use axum::http::StatusCode;
	use axum::response::IntoResponse;

	use super::*;

	#[test]
	fn unauthenticated_maps_to_401() {
		let response =
			Error::from(TokenError::MissingAccessToken).into_response();
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

		let response = Error::from(TokenError::MissingSession).into_response();
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	}

	#[test]
	fn forbidden_maps_to_403() {
		let response = Error::Forbidden.into_response();
		assert_eq!(response.status(), StatusCode::FORBIDDEN);
	}

	#[test]
	fn booking_errors_map_to_400() {
		let response =
			Error::from(BookingError::NegativeDuration(-1)).into_response();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);

		let response =
			Error::from(BookingError::UnknownVenue("gym".to_string()))
				.into_response();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);

		let response =
			Error::from(PaginationError::PageIndexNegative(-1)).into_response();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn not_found_maps_to_404() {
		let response =
			Error::NotFound("venue not found".to_string()).into_response();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}
}
