use chrono::{NaiveDateTime, NaiveTime};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::venue;
use crate::schemas::pagination::PageRequest;
use crate::{DbConn, Error};

/// A bookable venue with fixed operating hours and price
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = venue)]
#[diesel(check_for_backend(Pg))]
pub struct Venue {
	pub id:          i32,
	pub name:        String,
	pub description: String,
	pub price:       i32,
	pub picture:     Option<String>,
	pub address:     String,
	pub open_time:   NaiveTime,
	pub close_time:  NaiveTime,
	pub created_at:  NaiveDateTime,
}

impl Venue {
	/// Get a [`Venue`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(v_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let venue = conn
			.interact(move |conn| {
				use crate::schema::venue::dsl::*;

				venue
					.find(v_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound("venue not found".to_string()))?;

		Ok(venue)
	}

	/// Look up a [`Venue`] by its unique name
	#[instrument(skip(conn))]
	pub async fn get_by_name(
		v_name: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let venue = conn
			.interact(move |conn| {
				use crate::schema::venue::dsl::*;

				venue
					.filter(name.eq(v_name))
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(venue)
	}

	/// Count all venues
	#[instrument(skip(conn))]
	pub async fn count(conn: &DbConn) -> Result<i64, Error> {
		let total = conn
			.interact(|conn| {
				use crate::schema::venue::dsl::*;

				venue.count().get_result(conn)
			})
			.await??;

		Ok(total)
	}

	/// Get one page of venues ordered by id
	#[instrument(skip(conn))]
	pub async fn get_page(
		page: PageRequest,
		conn: &DbConn,
	) -> Result<(i64, Vec<Self>), Error> {
		let records = conn
			.interact(move |conn| {
				use crate::schema::venue::dsl::*;

				let total = venue.count().get_result(conn)?;
				let records = venue
					.order(id.asc())
					.limit(page.limit())
					.offset(page.offset())
					.select(Self::as_select())
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, records))
			})
			.await??;

		Ok(records)
	}

	/// Delete a [`Venue`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(v_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use crate::schema::venue::dsl::*;

				diesel::delete(venue.find(v_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound("venue not found".to_string()));
		}

		info!("deleted venue with id {v_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = venue)]
#[diesel(check_for_backend(Pg))]
pub struct NewVenue {
	pub name:        String,
	pub description: String,
	pub price:       i32,
	pub picture:     Option<String>,
	pub address:     String,
	pub open_time:   NaiveTime,
	pub close_time:  NaiveTime,
}

impl NewVenue {
	/// Insert this [`NewVenue`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Venue, Error> {
		let venue = conn
			.interact(|conn| {
				use crate::schema::venue::dsl::*;

				diesel::insert_into(venue)
					.values(self)
					.returning(Venue::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created venue {} ({})", venue.id, venue.name);

		Ok(venue)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = venue)]
pub struct UpdateVenue {
	pub name:        Option<String>,
	pub description: Option<String>,
	pub price:       Option<i32>,
	pub picture:     Option<String>,
	pub address:     Option<String>,
	pub open_time:   Option<NaiveTime>,
	pub close_time:  Option<NaiveTime>,
}

impl UpdateVenue {
	/// Apply this changeset to the venue with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		v_id: i32,
		conn: &DbConn,
	) -> Result<Venue, Error> {
		let venue = conn
			.interact(move |conn| {
				use crate::schema::venue::dsl::*;

				diesel::update(venue.find(v_id))
					.set(self)
					.returning(Venue::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound("venue not found".to_string()))?;

		info!("updated venue {} ({})", venue.id, venue.name);

		Ok(venue)
	}
}
