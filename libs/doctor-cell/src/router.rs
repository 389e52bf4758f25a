use axum::{routing::get, Router};

use crate::handlers;
use crate::services::SharedScheduleStore;

pub fn schedule_routes(store: SharedScheduleStore) -> Router {
    Router::new()
        .route("/schedules", get(handlers::get_schedules))
        .route("/schedules/{day}", get(handlers::get_day_schedule))
        .with_state(store)
}
