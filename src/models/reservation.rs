use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::booking::BookingWindow;
use crate::error::AuditError;
use crate::schema::{reservation, venue};
use crate::schemas::pagination::PageRequest;
use crate::{DbConn, Error};

/// Lifecycle of a reservation
///
/// Pending reservations await an admin audit and either get confirmed or
/// rejected; the owner finishes a confirmed reservation once the visit is
/// over. Rejected and finished are terminal.
#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReservationState"]
pub enum ReservationState {
	#[default]
	Pending,
	Confirmed,
	Rejected,
	Finished,
}

/// A user's claim on a venue for a specific time window
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct Reservation {
	pub id:         i32,
	pub user_id:    i32,
	pub venue_id:   i32,
	pub start_time: NaiveDateTime,
	pub hours:      i32,
	pub state:      ReservationState,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl Reservation {
	/// Get a [`Reservation`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use crate::schema::reservation::dsl::*;

				reservation
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| {
				Error::NotFound("reservation not found".to_string())
			})?;

		Ok(reservation)
	}

	/// Get a [`Reservation`] by its id along with its venue name
	#[instrument(skip(conn))]
	pub async fn get_with_venue(
		r_id: i32,
		conn: &DbConn,
	) -> Result<(Self, String), Error> {
		let reservation = conn
			.interact(move |conn| {
				reservation::table
					.inner_join(venue::table)
					.filter(reservation::id.eq(r_id))
					.select((Self::as_select(), venue::name))
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| {
				Error::NotFound("reservation not found".to_string())
			})?;

		Ok(reservation)
	}

	/// Get one page of a user's reservations, newest first
	#[instrument(skip(conn))]
	pub async fn for_user_page(
		u_id: i32,
		page: PageRequest,
		conn: &DbConn,
	) -> Result<(i64, Vec<(Self, String)>), Error> {
		let records = conn
			.interact(move |conn| {
				let total = reservation::table
					.filter(reservation::user_id.eq(u_id))
					.count()
					.get_result(conn)?;
				let records = reservation::table
					.inner_join(venue::table)
					.filter(reservation::user_id.eq(u_id))
					.order(reservation::created_at.desc())
					.limit(page.limit())
					.offset(page.offset())
					.select((Self::as_select(), venue::name))
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, records))
			})
			.await??;

		Ok(records)
	}

	/// Get one page of reservations awaiting audit, oldest first
	#[instrument(skip(conn))]
	pub async fn pending_page(
		page: PageRequest,
		conn: &DbConn,
	) -> Result<(i64, Vec<(Self, String)>), Error> {
		let records = conn
			.interact(move |conn| {
				let total = reservation::table
					.filter(
						reservation::state.eq(ReservationState::Pending),
					)
					.count()
					.get_result(conn)?;
				let records = reservation::table
					.inner_join(venue::table)
					.filter(
						reservation::state.eq(ReservationState::Pending),
					)
					.order(reservation::created_at.asc())
					.limit(page.limit())
					.offset(page.offset())
					.select((Self::as_select(), venue::name))
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, records))
			})
			.await??;

		Ok(records)
	}

	/// Get the windows taken by the active (pending or confirmed)
	/// reservations of a venue
	///
	/// `exclude` leaves one reservation out of the scan, so that an edit
	/// does not collide with its own previous window
	#[instrument(skip(conn))]
	pub async fn active_windows(
		v_id: i32,
		exclude: Option<i32>,
		conn: &DbConn,
	) -> Result<Vec<BookingWindow>, Error> {
		let spans: Vec<(NaiveDateTime, i32)> = conn
			.interact(move |conn| {
				use crate::schema::reservation::dsl::*;

				let mut query = reservation
					.filter(venue_id.eq(v_id))
					.filter(state.eq_any(vec![
						ReservationState::Pending,
						ReservationState::Confirmed,
					]))
					.select((start_time, hours))
					.into_boxed();

				if let Some(r_id) = exclude {
					query = query.filter(id.ne(r_id));
				}

				query.load(conn)
			})
			.await??;

		Ok(spans
			.into_iter()
			.map(|(start, len)| BookingWindow::new(start, len))
			.collect())
	}

	/// Replace the booked window of a reservation and send it back to audit
	#[instrument(skip(conn))]
	pub async fn update_booking(
		r_id: i32,
		v_id: i32,
		start: NaiveDateTime,
		len: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use crate::schema::reservation::dsl::*;

				diesel::update(reservation.find(r_id))
					.set((
						venue_id.eq(v_id),
						start_time.eq(start),
						hours.eq(len),
						state.eq(ReservationState::Pending),
						updated_at.eq(diesel::dsl::now),
					))
					.returning(Self::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| {
				Error::NotFound("reservation not found".to_string())
			})?;

		info!("rebooked reservation {r_id}");

		Ok(updated)
	}

	/// Atomically move a reservation from one state to another
	///
	/// Returns false when no row matched, either because the id is unknown
	/// or because the reservation is not in the expected state
	async fn transition(
		r_id: i32,
		from: ReservationState,
		to: ReservationState,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let updated = conn
			.interact(move |conn| {
				use crate::schema::reservation::dsl::*;

				diesel::update(reservation.find(r_id).filter(state.eq(from)))
					.set((state.eq(to), updated_at.eq(diesel::dsl::now)))
					.execute(conn)
			})
			.await??;

		Ok(updated == 1)
	}

	/// Confirm a pending reservation
	#[instrument(skip(conn))]
	pub async fn confirm(r_id: i32, conn: &DbConn) -> Result<(), Error> {
		let moved = Self::transition(
			r_id,
			ReservationState::Pending,
			ReservationState::Confirmed,
			conn,
		)
		.await?;

		if !moved {
			// NotFound if the id is unknown, otherwise the state was wrong
			Self::get_by_id(r_id, conn).await?;

			return Err(AuditError::NotAwaitingAudit.into());
		}

		info!("confirmed reservation {r_id}");

		Ok(())
	}

	/// Reject a pending reservation
	#[instrument(skip(conn))]
	pub async fn reject(r_id: i32, conn: &DbConn) -> Result<(), Error> {
		let moved = Self::transition(
			r_id,
			ReservationState::Pending,
			ReservationState::Rejected,
			conn,
		)
		.await?;

		if !moved {
			Self::get_by_id(r_id, conn).await?;

			return Err(AuditError::NotAwaitingAudit.into());
		}

		info!("rejected reservation {r_id}");

		Ok(())
	}

	/// Finish a confirmed reservation
	#[instrument(skip(conn))]
	pub async fn finish(r_id: i32, conn: &DbConn) -> Result<(), Error> {
		let moved = Self::transition(
			r_id,
			ReservationState::Confirmed,
			ReservationState::Finished,
			conn,
		)
		.await?;

		if !moved {
			let current = Self::get_by_id(r_id, conn).await?;

			if current.state == ReservationState::Finished {
				return Err(AuditError::AlreadyFinished.into());
			}

			return Err(AuditError::NotConfirmed.into());
		}

		info!("finished reservation {r_id}");

		Ok(())
	}

	/// Delete a [`Reservation`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(r_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use crate::schema::reservation::dsl::*;

				diesel::delete(reservation.find(r_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(
				"reservation not found".to_string(),
			));
		}

		info!("deleted reservation with id {r_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct NewReservation {
	pub user_id:    i32,
	pub venue_id:   i32,
	pub start_time: NaiveDateTime,
	pub hours:      i32,
	pub state:      ReservationState,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Reservation, Error> {
		let reservation = conn
			.interact(|conn| {
				use crate::schema::reservation::dsl::*;

				diesel::insert_into(reservation)
					.values(self)
					.returning(Reservation::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created reservation {reservation:?}");

		Ok(reservation)
	}
}
