use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, Service};
use crate::services::{admission, lifecycle, slots};
use crate::state::AppState;

fn parse_instant(raw: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| {
            AppError::Validation(format!(
                "invalid date: {raw}, expected YYYY-MM-DDTHH:MM:SS"
            ))
        })
}

// GET /api/bookings/slots?date=YYYY-MM-DD
#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct SlotResponse {
    pub time: String,
    pub available: bool,
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let raw = query
        .date
        .ok_or_else(|| AppError::Validation("missing `date` query parameter".to_string()))?;
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date: {raw}, expected YYYY-MM-DD")))?;

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_bookings_for_date(&db, &date)?
    };

    let grid = slots::day_availability(&bookings)
        .into_iter()
        .map(|slot| SlotResponse {
            time: slot.time.format("%H:%M").to_string(),
            available: slot.available,
        })
        .collect();

    Ok(Json(grid))
}

// POST /api/bookings
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub date: String,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    if req.customer_name.trim().is_empty() {
        return Err(AppError::Validation(
            "customerName must not be empty".to_string(),
        ));
    }
    if req.phone_number.trim().is_empty() {
        return Err(AppError::Validation(
            "phoneNumber must not be empty".to_string(),
        ));
    }

    let date_time = parse_instant(&req.date)?;

    let booking = {
        let db = state.db.lock().unwrap();
        admission::admit(
            &db,
            &admission::BookingRequest {
                service_id: req.service_id,
                customer_name: req.customer_name.trim().to_string(),
                phone_number: req.phone_number.trim().to_string(),
                date_time,
            },
        )?
    };

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithService {
    #[serde(flatten)]
    pub booking: Booking,
    pub service: Service,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookingWithService>>, AppError> {
    let rows = {
        let db = state.db.lock().unwrap();
        queries::get_all_bookings_with_services(&db)?
    };

    let response = rows
        .into_iter()
        .map(|(booking, service)| BookingWithService { booking, service })
        .collect();

    Ok(Json(response))
}

// PATCH /api/bookings/:id/status
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    pub suggested_date: Option<String>,
    pub admin_notes: Option<String>,
    pub seen: Option<bool>,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let status = match req.status.as_deref() {
        Some(raw) => Some(BookingStatus::from_wire(raw).ok_or_else(|| {
            AppError::Validation(format!("unknown status: {raw}"))
        })?),
        None => None,
    };
    let suggested_date = match req.suggested_date.as_deref() {
        Some(raw) => Some(parse_instant(raw)?),
        None => None,
    };

    let booking = {
        let db = state.db.lock().unwrap();
        lifecycle::apply_update(
            &db,
            &id,
            &lifecycle::StatusUpdate {
                status,
                suggested_date,
                admin_notes: req.admin_notes,
                seen: req.seen,
            },
        )?
    };

    Ok(Json(booking))
}
