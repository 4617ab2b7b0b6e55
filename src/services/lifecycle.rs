use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Booking, BookingStatus};

/// Staff-side changes to an existing booking. Every field is optional; the
/// seen flag is an acknowledgment orthogonal to the primary status.
#[derive(Debug, Default, Clone)]
pub struct StatusUpdate {
    pub status: Option<BookingStatus>,
    pub suggested_date: Option<NaiveDateTime>,
    pub admin_notes: Option<String>,
    pub seen: Option<bool>,
}

#[derive(Debug)]
pub enum LifecycleError {
    BookingNotFound(String),
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    Store(rusqlite::Error),
}

impl std::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleError::BookingNotFound(id) => write!(f, "booking {id} not found"),
            LifecycleError::InvalidTransition { from, to } if from == to => {
                write!(f, "booking is {} and can no longer be modified", from.as_str())
            }
            LifecycleError::InvalidTransition { from, to } => {
                write!(
                    f,
                    "invalid status transition: {} -> {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            LifecycleError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for LifecycleError {}

impl From<rusqlite::Error> for LifecycleError {
    fn from(e: rusqlite::Error) -> Self {
        LifecycleError::Store(e)
    }
}

/// Apply a staff update to one booking. An illegal transition rejects the
/// whole update and leaves the row untouched. Callers hold the connection
/// guard across the read-modify-write, so the transition check always runs
/// against the current status.
pub fn apply_update(
    conn: &Connection,
    id: &str,
    update: &StatusUpdate,
) -> Result<Booking, LifecycleError> {
    let mut booking = queries::get_booking_by_id(conn, id)?
        .ok_or_else(|| LifecycleError::BookingNotFound(id.to_string()))?;

    if let Some(next) = update.status {
        if !booking.status.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                from: booking.status,
                to: next,
            });
        }
        booking.status = next;
    } else if booking.status.is_terminal()
        && (update.suggested_date.is_some() || update.admin_notes.is_some())
    {
        // Notes and alternate dates only attach while the booking is live.
        return Err(LifecycleError::InvalidTransition {
            from: booking.status,
            to: booking.status,
        });
    }

    if let Some(suggested) = update.suggested_date {
        booking.suggested_date = Some(suggested);
    }
    if let Some(notes) = &update.admin_notes {
        booking.admin_notes = Some(notes.clone());
    }
    if let Some(seen) = update.seen {
        booking.seen = seen;
    }

    queries::update_booking(conn, &booking)?;

    tracing::info!(
        booking_id = %booking.id,
        status = booking.status.as_str(),
        "booking updated"
    );

    Ok(booking)
}
