// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{AppointmentError, BookingRequest};
use crate::services::presenter::{availability_message, confirmation_message, rejection_message};
use crate::services::{AppointmentRecordsService, AvailabilityService, BookingService};
use crate::state::AppointmentState;

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound { .. } => AppError::NotFound(err.to_string()),
            AppointmentError::StoreUnavailable { .. } => AppError::Database(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

/// User-correctable outcomes are answered with 200 and a structured body the
/// voice agent can read out; store failures become server errors.
fn rejection_response(err: AppointmentError) -> Result<Json<Value>, AppError> {
    if !err.is_rejection() {
        return Err(err.into());
    }

    let mut body = serde_json::to_value(&err).map_err(|e| AppError::Internal(e.to_string()))?;
    if let Value::Object(fields) = &mut body {
        fields.insert("status".to_string(), json!("rejected"));
        fields.insert("response".to_string(), json!(rejection_message(&err)));
    }
    Ok(Json(body))
}

// ==============================================================================
// AVAILABILITY & BOOKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<AppointmentState>,
    Path(day): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&state);

    match service.available_slots(&day, state.clock.today()).await {
        Ok(availability) => Ok(Json(json!({
            "response": availability_message(&availability),
            "doctor": availability.doctor,
            "day": doctor_cell::models::weekday_name(availability.day),
            "date": availability.date,
            "available_slots": availability.available_slots,
        }))),
        Err(err) => rejection_response(err),
    }
}

#[axum::debug_handler]
pub async fn log_booking(
    State(state): State<AppointmentState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);

    match service.book(request, state.clock.today()).await {
        Ok(confirmation) => Ok(Json(json!({
            "response": confirmation_message(&confirmation),
            "status": "success",
            "appointment": confirmation.appointment,
        }))),
        Err(err) => rejection_response(err),
    }
}

// ==============================================================================
// ADMINISTRATIVE HANDLERS
// ==============================================================================

pub async fn list_appointments(
    State(state): State<AppointmentState>,
) -> Result<Json<Value>, AppError> {
    let appointments = AppointmentRecordsService::new(&state).list().await?;
    Ok(Json(json!(appointments)))
}

pub async fn delete_appointment(
    State(state): State<AppointmentState>,
    Path(index): Path<usize>,
) -> Result<Json<Value>, AppError> {
    let deleted = AppointmentRecordsService::new(&state).delete_at(index).await?;
    Ok(Json(json!({
        "status": "success",
        "deleted": deleted,
    })))
}

pub async fn clear_appointments(
    State(state): State<AppointmentState>,
) -> Result<Json<Value>, AppError> {
    AppointmentRecordsService::new(&state).clear().await?;
    Ok(Json(json!({
        "status": "success",
        "message": "All appointments cleared",
    })))
}
