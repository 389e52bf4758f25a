use axum::{extract::State, Json};
use chrono::Datelike;
use serde_json::{json, Value};

use appointment_cell::AppointmentState;
use doctor_cell::models::weekday_name;
use shared_database::JsonDocumentStore;
use shared_models::error::AppError;

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "Clinic Voice Agent Backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Minimal endpoint for external keep-alive pingers.
pub async fn ping() -> Json<Value> {
    Json(json!({ "ok": 1 }))
}

pub async fn today(State(state): State<AppointmentState>) -> Json<Value> {
    let today = state.clock.today();
    Json(json!({
        "day": weekday_name(today.weekday()),
        "date": today.format("%Y-%m-%d").to_string(),
        "formatted_date": today.format("%B %d, %Y").to_string(),
    }))
}

pub async fn knowledge_base(State(state): State<AppointmentState>) -> Result<Json<Value>, AppError> {
    let document = JsonDocumentStore::new(state.config.knowledge_base_path());
    let knowledge_base = document
        .load_value()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    Ok(Json(knowledge_base))
}
