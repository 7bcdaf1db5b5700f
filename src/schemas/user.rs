use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::UpdateUser;

static USERNAME_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-_]*$").unwrap());

/// Admin-side request to create a user account directly
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
	#[validate(regex(
		path = *USERNAME_REGEX,
		message = "username must start with a letter and only contain letters, numbers, dashes, or underscores",
		code = "username-regex"
	))]
	#[validate(length(
		min = 2,
		max = 32,
		message = "username must be between 2 and 32 characters long",
		code = "username-length"
	))]
	pub username: String,
	#[validate(length(
		min = 1,
		max = 32,
		message = "nickname must be between 1 and 32 characters long",
		code = "nickname-length"
	))]
	pub nickname: String,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password: String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:    String,
	pub phone:    Option<String>,
	#[serde(default)]
	pub admin:    bool,
	pub picture:  Option<String>,
}

/// Self-service profile update
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
	#[validate(length(
		min = 1,
		max = 32,
		message = "nickname must be between 1 and 32 characters long",
		code = "nickname-length"
	))]
	pub nickname: Option<String>,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password: Option<String>,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:    Option<String>,
	pub phone:    Option<String>,
	pub picture:  Option<String>,
}

impl UpdateProfileRequest {
	/// Build the changeset, with the password already hashed by the caller
	#[must_use]
	pub fn into_changeset(self, password_hash: Option<String>) -> UpdateUser {
		UpdateUser {
			nickname: self.nickname,
			password_hash,
			email: self.email,
			phone: self.phone,
			admin: None,
			picture: self.picture,
		}
	}
}

/// Admin-side user update, may flip the admin flag
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
	#[validate(length(
		min = 1,
		max = 32,
		message = "nickname must be between 1 and 32 characters long",
		code = "nickname-length"
	))]
	pub nickname: Option<String>,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password: Option<String>,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:    Option<String>,
	pub phone:    Option<String>,
	pub admin:    Option<bool>,
	pub picture:  Option<String>,
}

impl UpdateUserRequest {
	/// Build the changeset, with the password already hashed by the caller
	#[must_use]
	pub fn into_changeset(self, password_hash: Option<String>) -> UpdateUser {
		UpdateUser {
			nickname: self.nickname,
			password_hash,
			email: self.email,
			phone: self.phone,
			admin: self.admin,
			picture: self.picture,
		}
	}
}
