// libs/appointment-cell/src/router.rs
use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::state::AppointmentState;

pub fn appointment_routes(state: AppointmentState) -> Router {
    Router::new()
        // Voice agent endpoints
        .route("/get_slots/{day}", get(handlers::get_slots))
        .route("/log_booking", post(handlers::log_booking))

        // Administrative ledger access
        .route("/appointments", get(handlers::list_appointments))
        .route("/appointments/clear", delete(handlers::clear_appointments))
        .route("/appointments/{index}", delete(handlers::delete_appointment))
        .with_state(state)
}
