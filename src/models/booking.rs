use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub service_id: i64,
    pub customer_name: String,
    pub phone_number: String,
    #[serde(rename = "date")]
    pub date_time: NaiveDateTime,
    pub status: BookingStatus,
    pub seen: bool,
    pub suggested_date: Option<NaiveDateTime>,
    pub admin_notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => BookingStatus::Approved,
            "rejected" => BookingStatus::Rejected,
            "completed" => BookingStatus::Completed,
            _ => BookingStatus::Pending,
        }
    }

    /// Wire form as sent by clients in PATCH bodies ("Approved", "Rejected", ...).
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(BookingStatus::Pending),
            "Approved" => Some(BookingStatus::Approved),
            "Rejected" => Some(BookingStatus::Rejected),
            "Completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Rejected | BookingStatus::Completed)
    }

    /// The only legal edges: Pending→Approved, Pending→Rejected, Approved→Completed.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Approved)
                | (BookingStatus::Pending, BookingStatus::Rejected)
                | (BookingStatus::Approved, BookingStatus::Completed)
        )
    }
}
