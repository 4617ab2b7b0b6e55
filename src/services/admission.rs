use chrono::{NaiveDateTime, Timelike, Utc};
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Booking, BookingStatus};
use crate::services::slots;

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub service_id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub date_time: NaiveDateTime,
}

#[derive(Debug)]
pub enum AdmissionError {
    ServiceNotFound(i64),
    OutOfHours,
    MisalignedSlot,
    SlotTaken,
    Store(rusqlite::Error),
}

impl std::fmt::Display for AdmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdmissionError::ServiceNotFound(id) => {
                write!(f, "service {id} not found")
            }
            AdmissionError::OutOfHours => {
                write!(f, "bookings are only available between 09:00 and 18:00")
            }
            AdmissionError::MisalignedSlot => {
                write!(
                    f,
                    "please pick a time in 15-minute intervals (e.g., 09:00, 09:15, 09:30)"
                )
            }
            AdmissionError::SlotTaken => {
                write!(
                    f,
                    "sorry, that time slot is already booked; please pick a different time"
                )
            }
            AdmissionError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for AdmissionError {}

impl From<rusqlite::Error> for AdmissionError {
    fn from(e: rusqlite::Error) -> Self {
        AdmissionError::Store(e)
    }
}

/// Validate a booking request and reserve its slot. The availability check
/// and the insert run under the caller's connection guard, and the partial
/// unique index on active slots arbitrates any raced insert, so at most one
/// request wins a given (date, time) pair.
pub fn admit(conn: &Connection, request: &BookingRequest) -> Result<Booking, AdmissionError> {
    if queries::get_service(conn, request.service_id)?.is_none() {
        return Err(AdmissionError::ServiceNotFound(request.service_id));
    }

    if !slots::within_business_hours(&request.date_time) {
        return Err(AdmissionError::OutOfHours);
    }

    if !slots::aligned_to_slot(&request.date_time) {
        return Err(AdmissionError::MisalignedSlot);
    }

    if queries::slot_taken(conn, &request.date_time)? {
        return Err(AdmissionError::SlotTaken);
    }

    // Stored at second precision; keep the returned value identical.
    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        service_id: request.service_id,
        customer_name: request.customer_name.clone(),
        phone_number: request.phone_number.clone(),
        date_time: request.date_time,
        status: BookingStatus::Pending,
        seen: false,
        suggested_date: None,
        admin_notes: None,
        created_at: now.with_nanosecond(0).unwrap_or(now),
    };

    match queries::create_booking(conn, &booking) {
        Ok(()) => {
            tracing::info!(
                booking_id = %booking.id,
                slot = %booking.date_time,
                "booking admitted"
            );
            Ok(booking)
        }
        Err(e) if is_slot_conflict(&e) => Err(AdmissionError::SlotTaken),
        Err(e) => Err(AdmissionError::Store(e)),
    }
}

fn is_slot_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
