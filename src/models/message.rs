use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::schema::{app_user, message};
use crate::schemas::pagination::PageRequest;
use crate::{DbConn, Error};

/// Moderation state of a message board post
#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::MessageState"]
pub enum MessageState {
	#[default]
	Pending,
	Passed,
	Rejected,
}

/// A message board post
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = message)]
#[diesel(check_for_backend(Pg))]
pub struct Message {
	pub id:        i32,
	pub user_id:   i32,
	pub content:   String,
	pub posted_at: NaiveDateTime,
	pub state:     MessageState,
}

impl Message {
	/// Get a [`Message`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(m_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let message = conn
			.interact(move |conn| {
				use crate::schema::message::dsl::*;

				message
					.find(m_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound("message not found".to_string()))?;

		Ok(message)
	}

	/// Count the publicly visible (passed) messages
	#[instrument(skip(conn))]
	pub async fn count_passed(conn: &DbConn) -> Result<i64, Error> {
		let total = conn
			.interact(|conn| {
				use crate::schema::message::dsl::*;

				message
					.filter(state.eq(MessageState::Passed))
					.count()
					.get_result(conn)
			})
			.await??;

		Ok(total)
	}

	/// Get one page of passed messages with their author names, newest first
	#[instrument(skip(conn))]
	pub async fn passed_page(
		page: PageRequest,
		conn: &DbConn,
	) -> Result<(i64, Vec<(Self, String)>), Error> {
		let records = conn
			.interact(move |conn| {
				let total = message::table
					.filter(message::state.eq(MessageState::Passed))
					.count()
					.get_result(conn)?;
				let records = message::table
					.inner_join(app_user::table)
					.filter(message::state.eq(MessageState::Passed))
					.order(message::posted_at.desc())
					.limit(page.limit())
					.offset(page.offset())
					.select((Self::as_select(), app_user::username))
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, records))
			})
			.await??;

		Ok(records)
	}

	/// Get one page of a user's own messages regardless of state, newest
	/// first
	#[instrument(skip(conn))]
	pub async fn for_user_page(
		u_id: i32,
		page: PageRequest,
		conn: &DbConn,
	) -> Result<(i64, Vec<Self>), Error> {
		let records = conn
			.interact(move |conn| {
				use crate::schema::message::dsl::*;

				let total = message
					.filter(user_id.eq(u_id))
					.count()
					.get_result(conn)?;
				let records = message
					.filter(user_id.eq(u_id))
					.order(posted_at.desc())
					.limit(page.limit())
					.offset(page.offset())
					.select(Self::as_select())
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, records))
			})
			.await??;

		Ok(records)
	}

	/// Get one page of messages awaiting moderation, oldest first
	#[instrument(skip(conn))]
	pub async fn pending_page(
		page: PageRequest,
		conn: &DbConn,
	) -> Result<(i64, Vec<(Self, String)>), Error> {
		let records = conn
			.interact(move |conn| {
				let total = message::table
					.filter(message::state.eq(MessageState::Pending))
					.count()
					.get_result(conn)?;
				let records = message::table
					.inner_join(app_user::table)
					.filter(message::state.eq(MessageState::Pending))
					.order(message::posted_at.asc())
					.limit(page.limit())
					.offset(page.offset())
					.select((Self::as_select(), app_user::username))
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, records))
			})
			.await??;

		Ok(records)
	}

	/// Replace the content of a message and send it back to moderation
	#[instrument(skip(conn))]
	pub async fn update_content(
		m_id: i32,
		new_content: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use crate::schema::message::dsl::*;

				diesel::update(message.find(m_id))
					.set((
						content.eq(new_content),
						state.eq(MessageState::Pending),
					))
					.returning(Self::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound("message not found".to_string()))?;

		info!("updated message {m_id}");

		Ok(updated)
	}

	/// Atomically move a pending message to a moderation verdict
	async fn moderate(
		m_id: i32,
		verdict: MessageState,
		conn: &DbConn,
	) -> Result<(), Error> {
		let updated = conn
			.interact(move |conn| {
				use crate::schema::message::dsl::*;

				diesel::update(
					message.find(m_id).filter(state.eq(MessageState::Pending)),
				)
				.set(state.eq(verdict))
				.execute(conn)
			})
			.await??;

		if updated == 0 {
			// NotFound if the id is unknown, otherwise the state was wrong
			Self::get_by_id(m_id, conn).await?;

			return Err(AuditError::NotAwaitingAudit.into());
		}

		Ok(())
	}

	/// Approve a pending message for public listing
	#[instrument(skip(conn))]
	pub async fn pass(m_id: i32, conn: &DbConn) -> Result<(), Error> {
		Self::moderate(m_id, MessageState::Passed, conn).await?;

		info!("passed message {m_id}");

		Ok(())
	}

	/// Reject a pending message
	#[instrument(skip(conn))]
	pub async fn reject(m_id: i32, conn: &DbConn) -> Result<(), Error> {
		Self::moderate(m_id, MessageState::Rejected, conn).await?;

		info!("rejected message {m_id}");

		Ok(())
	}

	/// Delete a [`Message`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(m_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use crate::schema::message::dsl::*;

				diesel::delete(message.find(m_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound("message not found".to_string()));
		}

		info!("deleted message with id {m_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = message)]
#[diesel(check_for_backend(Pg))]
pub struct NewMessage {
	pub user_id:   i32,
	pub content:   String,
	pub posted_at: NaiveDateTime,
	pub state:     MessageState,
}

impl NewMessage {
	/// Insert this [`NewMessage`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Message, Error> {
		let message = conn
			.interact(|conn| {
				use crate::schema::message::dsl::*;

				diesel::insert_into(message)
					.values(self)
					.returning(Message::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created message {}", message.id);

		Ok(message)
	}
}
