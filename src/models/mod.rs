pub mod booking;
pub mod service;

pub use booking::{Booking, BookingStatus};
pub use service::{NewService, Service};
