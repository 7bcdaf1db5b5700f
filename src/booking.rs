//! Booking validation for venue reservations
//!
//! A booking claims the half-open window `[start, start + hours)` of a
//! single venue. Validation runs against a snapshot of the venue and its
//! currently active bookings; under concurrent submissions the database
//! exclusion constraint remains the authority, this module only gives the
//! caller a fast answer.

use chrono::{Duration, NaiveDateTime};

use crate::error::{BookingError, Error};
use crate::models::Venue;

/// Bookings are submitted with minute precision; a canonical seconds
/// component is appended before parsing
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A half-open `[start, end)` claim on a venue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingWindow {
	pub start: NaiveDateTime,
	pub end:   NaiveDateTime,
}

impl BookingWindow {
	#[must_use]
	pub fn new(start: NaiveDateTime, hours: i32) -> Self {
		Self { start, end: start + Duration::hours(i64::from(hours)) }
	}

	/// Check whether two windows have a non-empty intersection
	///
	/// A zero-hour window is degenerate and never overlaps anything
	#[must_use]
	pub fn overlaps(&self, other: &Self) -> bool {
		self.start.max(other.start) < self.end.min(other.end)
	}
}

/// A booking that passed every check and is ready to persist
#[derive(Clone, Copy, Debug)]
pub struct ValidBooking {
	pub venue_id: i32,
	pub window:   BookingWindow,
	pub hours:    i32,
}

/// Parse a `YYYY-MM-DD HH:MM` booking start time
pub fn parse_start_time(text: &str) -> Result<NaiveDateTime, BookingError> {
	NaiveDateTime::parse_from_str(&format!("{text}:00"), START_TIME_FORMAT)
		.map_err(|source| BookingError::MalformedStartTime {
			text: text.to_owned(),
			source,
		})
}

/// Validate a requested booking against a snapshot of the venue and the
/// windows already taken by its pending and confirmed reservations
///
/// Checks run in a fixed order so callers can rely on which failure is
/// reported first:
/// 1. the venue must exist (`venue_label` names it in the error),
/// 2. `start_time_text` must parse as `YYYY-MM-DD HH:MM`,
/// 3. `hours` must not be negative,
/// 4. the start must lie strictly after `now`,
/// 5. the window must not overlap any taken window.
pub fn validate_booking(
	venue_label: &str,
	venue: Option<&Venue>,
	taken: &[BookingWindow],
	start_time_text: &str,
	hours: i32,
	now: NaiveDateTime,
) -> Result<ValidBooking, Error> {
	let Some(venue) = venue else {
		return Err(BookingError::UnknownVenue(venue_label.to_owned()).into());
	};

	let start = parse_start_time(start_time_text)?;

	if hours < 0 {
		return Err(BookingError::NegativeDuration(hours).into());
	}

	if start <= now {
		return Err(BookingError::StartTimeNotInFuture(start).into());
	}

	let window = BookingWindow::new(start, hours);

	if taken.iter().any(|t| window.overlaps(t)) {
		return Err(BookingError::WindowTaken {
			start: window.start,
			end:   window.end,
		}
		.into());
	}

	Ok(ValidBooking { venue_id: venue.id, window, hours })
}

#[cfg(test)]
mod tests {
	use chrono::{NaiveDate, NaiveTime};

	use super::*;

	fn court_a() -> Venue {
		Venue {
			id:          1,
			name:        "Court A".to_string(),
			description: "indoor court".to_string(),
			price:       100,
			picture:     None,
			address:     "1 Main St".to_string(),
			open_time:   NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
			close_time:  NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
			created_at:  datetime("2024-01-01 00:00"),
		}
	}

	fn datetime(text: &str) -> NaiveDateTime {
		NaiveDateTime::parse_from_str(
			&format!("{text}:00"),
			"%Y-%m-%d %H:%M:%S",
		)
		.unwrap()
	}

	fn now() -> NaiveDateTime { datetime("2024-05-01 00:00") }

	#[test]
	fn accepts_a_free_window() {
		let venue = court_a();

		let booking = validate_booking(
			"Court A",
			Some(&venue),
			&[],
			"2024-06-01 10:00",
			2,
			now(),
		)
		.unwrap();

		assert_eq!(booking.venue_id, 1);
		assert_eq!(booking.window.start, datetime("2024-06-01 10:00"));
		assert_eq!(booking.window.end, datetime("2024-06-01 12:00"));
	}

	#[test]
	fn unknown_venue_wins_over_malformed_time() {
		// Missing venue must be reported even when the timestamp is also
		// unparseable
		let result =
			validate_booking("Court Z", None, &[], "not a time", 1, now());

		assert!(matches!(
			result,
			Err(Error::BookingError(BookingError::UnknownVenue(name)))
				if name == "Court Z"
		));
	}

	#[test]
	fn date_without_time_is_malformed() {
		let venue = court_a();

		let result = validate_booking(
			"Court A",
			Some(&venue),
			&[],
			"2021-01-01",
			1,
			now(),
		);

		assert!(matches!(
			result,
			Err(Error::BookingError(BookingError::MalformedStartTime {
				text,
				..
			})) if text == "2021-01-01"
		));
	}

	#[test]
	fn trailing_seconds_are_malformed() {
		let venue = court_a();

		let result = validate_booking(
			"Court A",
			Some(&venue),
			&[],
			"2024-06-01 10:00:00",
			1,
			now(),
		);

		assert!(matches!(
			result,
			Err(Error::BookingError(BookingError::MalformedStartTime { .. }))
		));
	}

	#[test]
	fn negative_hours_are_rejected() {
		let venue = court_a();

		let result = validate_booking(
			"Court A",
			Some(&venue),
			&[],
			"2024-06-01 10:00",
			-1,
			now(),
		);

		assert!(matches!(
			result,
			Err(Error::BookingError(BookingError::NegativeDuration(-1)))
		));
	}

	#[test]
	fn past_and_present_starts_are_rejected() {
		let venue = court_a();

		let result = validate_booking(
			"Court A",
			Some(&venue),
			&[],
			"2024-04-30 10:00",
			1,
			now(),
		);

		assert!(matches!(
			result,
			Err(Error::BookingError(BookingError::StartTimeNotInFuture(_)))
		));

		// A start exactly equal to `now` is also too late
		let result = validate_booking(
			"Court A",
			Some(&venue),
			&[],
			"2024-05-01 00:00",
			1,
			now(),
		);

		assert!(matches!(
			result,
			Err(Error::BookingError(BookingError::StartTimeNotInFuture(_)))
		));
	}

	#[test]
	fn overlapping_window_conflicts() {
		let venue = court_a();
		let taken = [BookingWindow::new(datetime("2024-06-01 10:00"), 2)];

		// [11, 12) falls inside [10, 12)
		let result = validate_booking(
			"Court A",
			Some(&venue),
			&taken,
			"2024-06-01 11:00",
			1,
			now(),
		);

		assert!(matches!(
			result,
			Err(Error::BookingError(BookingError::WindowTaken { .. }))
		));
	}

	#[test]
	fn adjacent_window_is_free() {
		let venue = court_a();
		let taken = [BookingWindow::new(datetime("2024-06-01 10:00"), 2)];

		// [12, 13) touches [10, 12) without overlapping it
		let booking = validate_booking(
			"Court A",
			Some(&venue),
			&taken,
			"2024-06-01 12:00",
			1,
			now(),
		)
		.unwrap();

		assert_eq!(booking.window.start, datetime("2024-06-01 12:00"));
	}

	#[test]
	fn disjoint_windows_validate_in_either_order() {
		let venue = court_a();
		let first = BookingWindow::new(datetime("2024-06-01 09:00"), 1);
		let second = BookingWindow::new(datetime("2024-06-01 14:00"), 2);

		assert!(
			validate_booking(
				"Court A",
				Some(&venue),
				&[second],
				"2024-06-01 09:00",
				1,
				now(),
			)
			.is_ok()
		);
		assert!(
			validate_booking(
				"Court A",
				Some(&venue),
				&[first],
				"2024-06-01 14:00",
				2,
				now(),
			)
			.is_ok()
		);
	}

	#[test]
	fn zero_hour_window_never_conflicts() {
		let venue = court_a();
		let taken = [BookingWindow::new(datetime("2024-06-01 10:00"), 2)];

		// [11, 11) is empty even though it sits inside a taken window
		let booking = validate_booking(
			"Court A",
			Some(&venue),
			&taken,
			"2024-06-01 11:00",
			0,
			now(),
		)
		.unwrap();

		assert_eq!(booking.window.start, booking.window.end);
	}

	#[test]
	fn validation_is_idempotent() {
		let venue = court_a();
		let taken = [BookingWindow::new(datetime("2024-06-01 10:00"), 2)];

		let first = validate_booking(
			"Court A",
			Some(&venue),
			&taken,
			"2024-06-01 15:00",
			1,
			now(),
		)
		.unwrap();
		let second = validate_booking(
			"Court A",
			Some(&venue),
			&taken,
			"2024-06-01 15:00",
			1,
			now(),
		)
		.unwrap();

		assert_eq!(first.window, second.window);
		assert_eq!(first.venue_id, second.venue_id);
		assert_eq!(first.hours, second.hours);
	}

	#[test]
	fn overlap_is_symmetric() {
		let a = BookingWindow::new(
			NaiveDate::from_ymd_opt(2024, 6, 1)
				.unwrap()
				.and_hms_opt(10, 0, 0)
				.unwrap(),
			2,
		);
		let b = BookingWindow::new(a.start + Duration::hours(1), 3);

		assert!(a.overlaps(&b));
		assert!(b.overlaps(&a));
	}
}
