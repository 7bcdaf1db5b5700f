use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{NewVenue, UpdateVenue};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueRequest {
	#[validate(length(
		min = 1,
		max = 64,
		message = "venue name must be between 1 and 64 characters long",
		code = "venue-name-length"
	))]
	pub name:        String,
	pub description: String,
	#[validate(range(
		min = 0,
		message = "price must not be negative",
		code = "price-range"
	))]
	pub price:       i32,
	pub picture:     Option<String>,
	pub address:     String,
	pub open_time:   NaiveTime,
	pub close_time:  NaiveTime,
}

impl CreateVenueRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewVenue {
		NewVenue {
			name:        self.name,
			description: self.description,
			price:       self.price,
			picture:     self.picture,
			address:     self.address,
			open_time:   self.open_time,
			close_time:  self.close_time,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVenueRequest {
	#[validate(length(
		min = 1,
		max = 64,
		message = "venue name must be between 1 and 64 characters long",
		code = "venue-name-length"
	))]
	pub name:        Option<String>,
	pub description: Option<String>,
	#[validate(range(
		min = 0,
		message = "price must not be negative",
		code = "price-range"
	))]
	pub price:       Option<i32>,
	pub picture:     Option<String>,
	pub address:     Option<String>,
	pub open_time:   Option<NaiveTime>,
	pub close_time:  Option<NaiveTime>,
}

impl UpdateVenueRequest {
	#[must_use]
	pub fn to_changeset(self) -> UpdateVenue {
		UpdateVenue {
			name:        self.name,
			description: self.description,
			price:       self.price,
			picture:     self.picture,
			address:     self.address,
			open_time:   self.open_time,
			close_time:  self.close_time,
		}
	}
}
