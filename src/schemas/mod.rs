//! Request and response schemas

pub mod auth;
pub mod message;
pub mod news;
pub mod pagination;
pub mod reservation;
pub mod user;
pub mod venue;
