//! Database models

mod message;
mod news;
mod reservation;
mod user;
mod venue;

pub use message::{Message, MessageState, NewMessage};
pub use news::{NewNews, News, UpdateNews};
pub use reservation::{NewReservation, Reservation, ReservationState};
pub use user::{NewUser, UpdateUser, User};
pub use venue::{NewVenue, UpdateVenue, Venue};
