use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{JsonDocumentStore, StoreError};

use crate::models::Appointment;

pub type SharedAppointmentStore = Arc<dyn AppointmentStore>;

/// Ordered appointment ledger. Positions are list indices and stay stable for
/// every record other than the one removed.
///
/// Individual operations are atomic. Callers that need read-then-append to be
/// atomic (the booking path) must hold the shared booking lock around both.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Appointment>, StoreError>;

    async fn append(&self, appointment: Appointment) -> Result<Appointment, StoreError>;

    /// `Ok(None)` when `position` is out of range.
    async fn delete_at(&self, position: usize) -> Result<Option<Appointment>, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;

    async fn list_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError> {
        let appointments = self.list().await?;
        Ok(appointments.into_iter().filter(|a| a.date() == date).collect())
    }
}

/// Appointments persisted as a JSON array in `appointments.json`. A missing
/// document is an empty ledger.
pub struct JsonAppointmentStore {
    document: JsonDocumentStore,
    write_lock: Mutex<()>,
}

impl JsonAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            document: JsonDocumentStore::new(config.appointments_path()),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl AppointmentStore for JsonAppointmentStore {
    async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        self.document.load_or_default().await
    }

    async fn append(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut appointments: Vec<Appointment> = self.document.load_or_default().await?;
        appointments.push(appointment.clone());
        self.document.save(&appointments).await?;

        debug!("Appended appointment, ledger now holds {}", appointments.len());
        Ok(appointment)
    }

    async fn delete_at(&self, position: usize) -> Result<Option<Appointment>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut appointments: Vec<Appointment> = self.document.load_or_default().await?;
        if position >= appointments.len() {
            return Ok(None);
        }

        let removed = appointments.remove(position);
        self.document.save(&appointments).await?;
        Ok(Some(removed))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.document.save(&Vec::<Appointment>::new()).await
    }
}

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: RwLock::new(appointments),
        }
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.appointments.read().await.clone())
    }

    async fn append(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        self.appointments.write().await.push(appointment.clone());
        Ok(appointment)
    }

    async fn delete_at(&self, position: usize) -> Result<Option<Appointment>, StoreError> {
        let mut appointments = self.appointments.write().await;
        if position >= appointments.len() {
            return Ok(None);
        }
        Ok(Some(appointments.remove(position)))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.appointments.write().await.clear();
        Ok(())
    }
}
