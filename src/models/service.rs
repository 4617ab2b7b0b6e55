use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub duration_minutes: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload for creating a catalog entry; the id and timestamp come from the store.
#[derive(Debug, Clone)]
pub struct NewService {
    pub title: String,
    pub price: f64,
    pub duration_minutes: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
