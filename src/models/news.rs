use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::news;
use crate::schemas::pagination::PageRequest;
use crate::{DbConn, Error};

/// An admin-authored news item
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = news)]
#[diesel(check_for_backend(Pg))]
pub struct News {
	pub id:           i32,
	pub title:        String,
	pub content:      String,
	pub published_at: NaiveDateTime,
}

impl News {
	/// Get a [`News`] item by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(n_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let news = conn
			.interact(move |conn| {
				use crate::schema::news::dsl::*;

				news.find(n_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound("news not found".to_string()))?;

		Ok(news)
	}

	/// Count all news items
	#[instrument(skip(conn))]
	pub async fn count(conn: &DbConn) -> Result<i64, Error> {
		let total = conn
			.interact(|conn| {
				use crate::schema::news::dsl::*;

				news.count().get_result(conn)
			})
			.await??;

		Ok(total)
	}

	/// Get one page of news, newest first
	#[instrument(skip(conn))]
	pub async fn get_page(
		page: PageRequest,
		conn: &DbConn,
	) -> Result<(i64, Vec<Self>), Error> {
		let records = conn
			.interact(move |conn| {
				use crate::schema::news::dsl::*;

				let total = news.count().get_result(conn)?;
				let records = news
					.order(published_at.desc())
					.limit(page.limit())
					.offset(page.offset())
					.select(Self::as_select())
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, records))
			})
			.await??;

		Ok(records)
	}

	/// Delete a [`News`] item given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(n_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use crate::schema::news::dsl::*;

				diesel::delete(news.find(n_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound("news not found".to_string()));
		}

		info!("deleted news with id {n_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = news)]
#[diesel(check_for_backend(Pg))]
pub struct NewNews {
	pub title:        String,
	pub content:      String,
	pub published_at: NaiveDateTime,
}

impl NewNews {
	/// Insert this [`NewNews`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<News, Error> {
		let news = conn
			.interact(|conn| {
				use crate::schema::news::dsl::*;

				diesel::insert_into(news)
					.values(self)
					.returning(News::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created news {} ({})", news.id, news.title);

		Ok(news)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = news)]
pub struct UpdateNews {
	pub title:   Option<String>,
	pub content: Option<String>,
}

impl UpdateNews {
	/// Apply this changeset to the news item with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		n_id: i32,
		conn: &DbConn,
	) -> Result<News, Error> {
		let news = conn
			.interact(move |conn| {
				use crate::schema::news::dsl::*;

				diesel::update(news.find(n_id))
					.set(self)
					.returning(News::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound("news not found".to_string()))?;

		info!("updated news {} ({})", news.id, news.title);

		Ok(news)
	}
}
