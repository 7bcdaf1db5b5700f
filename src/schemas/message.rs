use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{Message, MessageState};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
	#[validate(length(
		min = 1,
		max = 500,
		message = "message must be between 1 and 500 characters long",
		code = "message-length"
	))]
	pub content: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
	#[validate(length(
		min = 1,
		max = 500,
		message = "message must be between 1 and 500 characters long",
		code = "message-length"
	))]
	pub content: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
	pub id:        i32,
	pub username:  String,
	pub content:   String,
	pub posted_at: NaiveDateTime,
	pub state:     MessageState,
}

impl From<(Message, String)> for MessageResponse {
	fn from(value: (Message, String)) -> Self {
		let (message, username) = value;

		Self {
			id: message.id,
			username,
			content: message.content,
			posted_at: message.posted_at,
			state: message.state,
		}
	}
}
