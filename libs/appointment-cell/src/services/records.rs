use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::models::{Appointment, AppointmentError};
use crate::services::store::SharedAppointmentStore;
use crate::state::AppointmentState;

/// Administrative access to the appointment ledger.
pub struct AppointmentRecordsService {
    appointments: SharedAppointmentStore,
    booking_lock: Arc<Mutex<()>>,
}

impl AppointmentRecordsService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            appointments: state.appointments.clone(),
            booking_lock: state.shared_booking_lock(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.appointments.list().await?)
    }

    pub async fn delete_at(&self, position: usize) -> Result<Appointment, AppointmentError> {
        let _guard = self.booking_lock.lock().await;

        let removed = self
            .appointments
            .delete_at(position)
            .await?
            .ok_or(AppointmentError::NotFound { position })?;

        info!(
            position,
            patient = %removed.patient_name,
            start = %removed.start,
            "Appointment deleted"
        );
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<(), AppointmentError> {
        let _guard = self.booking_lock.lock().await;
        self.appointments.clear().await?;
        info!("All appointments cleared");
        Ok(())
    }
}
