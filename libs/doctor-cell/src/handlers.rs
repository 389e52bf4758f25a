use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{parse_weekday, weekday_name, WeeklySchedule};
use crate::services::SharedScheduleStore;

/// Full weekly roster, keyed by weekday name.
pub async fn get_schedules(
    State(store): State<SharedScheduleStore>,
) -> Result<Json<WeeklySchedule>, AppError> {
    let week = store.weekly_schedule().await?;
    Ok(Json(week))
}

pub async fn get_day_schedule(
    State(store): State<SharedScheduleStore>,
    Path(day): Path<String>,
) -> Result<Json<Value>, AppError> {
    let weekday = parse_weekday(&day)?;

    match store.get_schedule(weekday).await? {
        Some(schedule) => Ok(Json(json!({
            "day": weekday_name(weekday),
            "schedule": schedule,
        }))),
        None => Err(AppError::NotFound(format!(
            "The clinic is closed on {}",
            weekday_name(weekday)
        ))),
    }
}
