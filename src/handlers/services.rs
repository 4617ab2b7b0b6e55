use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{NewService, Service};
use crate::state::AppState;

// GET /api/services
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = {
        let db = state.db.lock().unwrap();
        queries::list_services(&db)?
    };
    Ok(Json(services))
}

// POST /api/services
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub title: String,
    pub price: f64,
    pub duration_minutes: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    if req.price < 0.0 {
        return Err(AppError::Validation(
            "price must not be negative".to_string(),
        ));
    }
    if req.duration_minutes <= 0 {
        return Err(AppError::Validation(
            "durationMinutes must be positive".to_string(),
        ));
    }

    let service = {
        let db = state.db.lock().unwrap();
        queries::create_service(
            &db,
            &NewService {
                title: req.title.trim().to_string(),
                price: req.price,
                duration_minutes: req.duration_minutes,
                description: req.description,
                image_url: req.image_url,
            },
        )?
    };

    Ok((StatusCode::CREATED, Json(service)))
}

// DELETE /api/services/:id
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let db = state.db.lock().unwrap();

    if queries::get_service(&db, id)?.is_none() {
        return Err(AppError::NotFound(format!("service {id}")));
    }

    // Bookings are retained for history, so a referenced service stays.
    if queries::service_booking_count(&db, id)? > 0 {
        return Err(AppError::Validation(
            "service has existing bookings and cannot be deleted".to_string(),
        ));
    }

    queries::delete_service(&db, id)?;
    Ok(Json(serde_json::json!({ "message": "service deleted" })))
}
