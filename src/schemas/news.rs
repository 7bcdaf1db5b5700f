use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::UpdateNews;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "title must be between 1 and 128 characters long",
		code = "title-length"
	))]
	pub title:   String,
	pub content: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "title must be between 1 and 128 characters long",
		code = "title-length"
	))]
	pub title:   Option<String>,
	pub content: Option<String>,
}

impl UpdateNewsRequest {
	#[must_use]
	pub fn to_changeset(self) -> UpdateNews {
		UpdateNews { title: self.title, content: self.content }
	}
}
