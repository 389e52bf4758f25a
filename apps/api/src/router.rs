use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use appointment_cell::AppointmentState;
use doctor_cell::router::schedule_routes;

use crate::handlers;

pub fn create_router(state: AppointmentState) -> Router {
    let service_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/ping", get(handlers::ping))
        .route("/today", get(handlers::today))
        .route("/knowledge_base", get(handlers::knowledge_base))
        .with_state(state.clone());

    Router::new()
        .merge(service_routes)
        .merge(schedule_routes(state.schedules.clone()))
        .merge(appointment_routes(state))
}
