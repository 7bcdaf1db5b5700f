use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::app_user;
use crate::schemas::pagination::PageRequest;
use crate::{DbConn, Error};

/// A registered user
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = app_user)]
#[diesel(check_for_backend(Pg))]
pub struct User {
	pub id:            i32,
	pub username:      String,
	pub nickname:      String,
	#[serde(skip)]
	pub password_hash: String,
	pub email:         String,
	pub phone:         Option<String>,
	pub admin:         bool,
	pub picture:       Option<String>,
	pub created_at:    NaiveDateTime,
}

impl User {
	/// Hash a password for storage
	pub fn hash_password(password: &str) -> Result<String, Error> {
		let salt = SaltString::generate(&mut OsRng);
		let hash = Argon2::default()
			.hash_password(password.as_bytes(), &salt)?
			.to_string();

		Ok(hash)
	}

	/// Check a password attempt against the stored hash
	pub fn verify_password(&self, password: &str) -> Result<(), Error> {
		let hash = PasswordHash::new(&self.password_hash)?;

		Argon2::default().verify_password(password.as_bytes(), &hash)?;

		Ok(())
	}

	/// Get a [`User`] by their id
	#[instrument(skip(conn))]
	pub async fn get_by_id(u_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let user = conn
			.interact(move |conn| {
				use crate::schema::app_user::dsl::*;

				app_user
					.find(u_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound("user not found".to_string()))?;

		Ok(user)
	}

	/// Look up a [`User`] by their unique username
	#[instrument(skip(conn))]
	pub async fn get_by_username(
		uname: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let user = conn
			.interact(move |conn| {
				use crate::schema::app_user::dsl::*;

				app_user
					.filter(username.eq(uname))
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(user)
	}

	/// Get one page of users ordered by id
	#[instrument(skip(conn))]
	pub async fn get_page(
		page: PageRequest,
		conn: &DbConn,
	) -> Result<(i64, Vec<Self>), Error> {
		let records = conn
			.interact(move |conn| {
				use crate::schema::app_user::dsl::*;

				let total = app_user.count().get_result(conn)?;
				let records = app_user
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

	/// Delete a [`User`] given their id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(u_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use crate::schema::app_user::dsl::*;

				diesel::delete(app_user.find(u_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound("user not found".to_string()));
		}

		info!("deleted user with id {u_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = app_user)]
#[diesel(check_for_backend(Pg))]
pub struct NewUser {
	pub username:      String,
	pub nickname:      String,
	#[serde(skip)]
	pub password_hash: String,
	pub email:         String,
	pub phone:         Option<String>,
	pub admin:         bool,
	pub picture:       Option<String>,
}

impl NewUser {
	/// Insert this [`NewUser`]
	#[instrument(skip_all)]
	pub async fn insert(self, conn: &DbConn) -> Result<User, Error> {
		let user = conn
			.interact(|conn| {
				use crate::schema::app_user::dsl::*;

				diesel::insert_into(app_user)
					.values(self)
					.returning(User::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created user {} ({})", user.id, user.username);

		Ok(user)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = app_user)]
pub struct UpdateUser {
	pub nickname:      Option<String>,
	#[serde(skip)]
	pub password_hash: Option<String>,
	pub email:         Option<String>,
	pub phone:         Option<String>,
	pub admin:         Option<bool>,
	pub picture:       Option<String>,
}

impl UpdateUser {
	/// Apply this changeset to the user with the given id
	#[instrument(skip_all)]
	pub async fn apply_to(
		self,
		u_id: i32,
		conn: &DbConn,
	) -> Result<User, Error> {
		let user = conn
			.interact(move |conn| {
				use crate::schema::app_user::dsl::*;

				diesel::update(app_user.find(u_id))
					.set(self)
					.returning(User::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound("user not found".to_string()))?;

		info!("updated user {} ({})", user.id, user.username);

		Ok(user)
	}
}
