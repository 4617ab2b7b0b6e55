use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, NewService, Service};

// ── Services ──

pub fn create_service(conn: &Connection, svc: &NewService) -> rusqlite::Result<Service> {
    conn.execute(
        "INSERT INTO services (title, price, duration_minutes, description, image_url)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            svc.title,
            svc.price,
            svc.duration_minutes,
            svc.description,
            svc.image_url,
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_service(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn get_service(conn: &Connection, id: i64) -> rusqlite::Result<Option<Service>> {
    let result = conn.query_row(
        "SELECT id, title, price, duration_minutes, description, image_url, created_at
         FROM services WHERE id = ?1",
        params![id],
        parse_service_row,
    );

    match result {
        Ok(service) => Ok(Some(service)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn list_services(conn: &Connection) -> rusqlite::Result<Vec<Service>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, price, duration_minutes, description, image_url, created_at
         FROM services ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], parse_service_row)?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}

pub fn service_booking_count(conn: &Connection, id: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE service_id = ?1",
        params![id],
        |row| row.get(0),
    )
}

pub fn delete_service(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let count = conn.execute("DELETE FROM services WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

// ── Bookings ──

pub fn create_booking(conn: &Connection, booking: &Booking) -> rusqlite::Result<()> {
    let date_time = booking.date_time.format("%Y-%m-%d %H:%M:%S").to_string();
    let suggested = booking
        .suggested_date
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string());
    let created_at = booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string();

    conn.execute(
        "INSERT INTO bookings (id, service_id, customer_name, phone_number, date_time, status, seen, suggested_date, admin_notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            booking.id,
            booking.service_id,
            booking.customer_name,
            booking.phone_number,
            date_time,
            booking.status.as_str(),
            booking.seen as i32,
            suggested,
            booking.admin_notes,
            created_at,
        ],
    )?;
    Ok(())
}

/// Indexed point lookup: is the exact slot held by a non-rejected booking?
pub fn slot_taken(conn: &Connection, dt: &NaiveDateTime) -> rusqlite::Result<bool> {
    let dt_str = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM bookings WHERE date_time = ?1 AND status != 'rejected')",
        params![dt_str],
        |row| row.get(0),
    )
}

/// All non-rejected bookings whose slot falls on the given date.
pub fn get_bookings_for_date(conn: &Connection, date: &NaiveDate) -> rusqlite::Result<Vec<Booking>> {
    let day_start = format!("{} 00:00:00", date.format("%Y-%m-%d"));
    let day_end = format!("{} 23:59:59", date.format("%Y-%m-%d"));

    let mut stmt = conn.prepare(
        "SELECT id, service_id, customer_name, phone_number, date_time, status, seen, suggested_date, admin_notes, created_at
         FROM bookings
         WHERE date_time >= ?1 AND date_time <= ?2 AND status != 'rejected'
         ORDER BY date_time ASC",
    )?;
    let rows = stmt.query_map(params![day_start, day_end], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_all_bookings_with_services(
    conn: &Connection,
) -> rusqlite::Result<Vec<(Booking, Service)>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.service_id, b.customer_name, b.phone_number, b.date_time, b.status, b.seen, b.suggested_date, b.admin_notes, b.created_at,
                s.id, s.title, s.price, s.duration_minutes, s.description, s.image_url, s.created_at
         FROM bookings b
         INNER JOIN services s ON s.id = b.service_id
         ORDER BY b.created_at DESC, b.rowid DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        let booking = parse_booking_row(row)?;
        let service = Service {
            id: row.get(10)?,
            title: row.get(11)?,
            price: row.get(12)?,
            duration_minutes: row.get(13)?,
            description: row.get(14)?,
            image_url: row.get(15)?,
            created_at: parse_date_time(&row.get::<_, String>(16)?),
        };
        Ok((booking, service))
    })?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, service_id, customer_name, phone_number, date_time, status, seen, suggested_date, admin_notes, created_at
         FROM bookings WHERE id = ?1",
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn update_booking(conn: &Connection, booking: &Booking) -> rusqlite::Result<bool> {
    let suggested = booking
        .suggested_date
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string());

    let count = conn.execute(
        "UPDATE bookings
         SET status = ?1, seen = ?2, suggested_date = ?3, admin_notes = ?4
         WHERE id = ?5",
        params![
            booking.status.as_str(),
            booking.seen as i32,
            suggested,
            booking.admin_notes,
            booking.id,
        ],
    )?;
    Ok(count > 0)
}

// ── Row parsing ──

fn parse_service_row(row: &rusqlite::Row) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        duration_minutes: row.get(3)?,
        description: row.get(4)?,
        image_url: row.get(5)?,
        created_at: parse_date_time(&row.get::<_, String>(6)?),
    })
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let status_str: String = row.get(5)?;
    let suggested: Option<String> = row.get(7)?;

    Ok(Booking {
        id: row.get(0)?,
        service_id: row.get(1)?,
        customer_name: row.get(2)?,
        phone_number: row.get(3)?,
        date_time: parse_date_time(&row.get::<_, String>(4)?),
        status: BookingStatus::parse(&status_str),
        seen: row.get::<_, i32>(6)? != 0,
        suggested_date: suggested.as_deref().map(parse_date_time),
        admin_notes: row.get(8)?,
        created_at: parse_date_time(&row.get::<_, String>(9)?),
    })
}

fn parse_date_time(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc())
}
