use std::sync::Arc;

use tokio::sync::Mutex;

use doctor_cell::services::{JsonScheduleStore, SharedScheduleStore};
use shared_config::AppConfig;
use shared_utils::clock::{Clock, SystemClock};

use crate::models::SchedulingPolicy;
use crate::services::store::{JsonAppointmentStore, SharedAppointmentStore};

/// Everything an appointment request needs, shared across handlers.
#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub schedules: SharedScheduleStore,
    pub appointments: SharedAppointmentStore,
    pub clock: Arc<dyn Clock>,
    pub policy: SchedulingPolicy,
    booking_lock: Arc<Mutex<()>>,
}

impl AppointmentState {
    pub fn new(
        config: Arc<AppConfig>,
        schedules: SharedScheduleStore,
        appointments: SharedAppointmentStore,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            schedules,
            appointments,
            clock,
            policy: SchedulingPolicy::default(),
            booking_lock: Arc::new(Mutex::new(())),
        }
    }

    /// JSON-document stores under the configured data directory, system clock.
    pub fn from_config(config: AppConfig) -> Self {
        let schedules: SharedScheduleStore = Arc::new(JsonScheduleStore::new(&config));
        let appointments: SharedAppointmentStore = Arc::new(JsonAppointmentStore::new(&config));
        Self::new(Arc::new(config), schedules, appointments, Arc::new(SystemClock))
    }

    /// Serialises every conflict-check-then-append cycle against the store.
    pub fn shared_booking_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.booking_lock)
    }
}
