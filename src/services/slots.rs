use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::models::Booking;

pub const OPEN_HOUR: u32 = 9;
pub const CLOSE_HOUR: u32 = 18;
pub const SLOT_MINUTES: u32 = 15;

#[derive(Debug, Clone)]
pub struct SlotAvailability {
    pub time: NaiveTime,
    pub available: bool,
}

/// The bookable grid for any day: 09:00 through 17:45 at 15-minute spacing,
/// ascending. Date independent, always 36 entries.
pub fn canonical_slots() -> Vec<NaiveTime> {
    (0..)
        .map(|i| OPEN_HOUR * 60 + i * SLOT_MINUTES)
        .take_while(|minutes| *minutes < CLOSE_HOUR * 60)
        .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
        .collect()
}

/// Mark each canonical slot free or taken given the day's non-rejected
/// bookings. A booking blocks exactly the slot whose hour and minute it
/// matches; times that align to no slot mark nothing.
pub fn day_availability(bookings: &[Booking]) -> Vec<SlotAvailability> {
    canonical_slots()
        .into_iter()
        .map(|slot| {
            let taken = bookings.iter().any(|b| {
                let t = b.date_time.time();
                t.hour() == slot.hour() && t.minute() == slot.minute()
            });
            SlotAvailability {
                time: slot,
                available: !taken,
            }
        })
        .collect()
}

pub fn within_business_hours(dt: &NaiveDateTime) -> bool {
    (OPEN_HOUR..CLOSE_HOUR).contains(&dt.hour())
}

pub fn aligned_to_slot(dt: &NaiveDateTime) -> bool {
    dt.minute() % SLOT_MINUTES == 0 && dt.second() == 0
}
