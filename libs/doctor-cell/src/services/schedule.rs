use std::sync::Arc;

use async_trait::async_trait;
use chrono::Weekday;
use tokio::sync::RwLock;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::JsonDocumentStore;

use crate::models::{weekday_name, DaySchedule, ScheduleError, WeeklySchedule};

pub type SharedScheduleStore = Arc<dyn ScheduleStore>;

/// Read side of the clinic's weekly doctor roster.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn weekly_schedule(&self) -> Result<WeeklySchedule, ScheduleError>;

    /// `Ok(None)` means the clinic is closed that day.
    async fn get_schedule(&self, day: Weekday) -> Result<Option<DaySchedule>, ScheduleError> {
        let week = self.weekly_schedule().await?;
        let schedule = week.get(day).cloned();
        debug!("Schedule lookup for {}: {:?}", weekday_name(day), schedule);
        Ok(schedule)
    }

    async fn open_days(&self) -> Result<Vec<Weekday>, ScheduleError> {
        Ok(self.weekly_schedule().await?.open_days())
    }
}

/// Schedule backed by the `schedules.json` document. Re-read on every call so
/// edits to the file are picked up without a restart.
pub struct JsonScheduleStore {
    document: JsonDocumentStore,
}

impl JsonScheduleStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            document: JsonDocumentStore::new(config.schedules_path()),
        }
    }
}

#[async_trait]
impl ScheduleStore for JsonScheduleStore {
    async fn weekly_schedule(&self) -> Result<WeeklySchedule, ScheduleError> {
        Ok(self.document.load::<WeeklySchedule>().await?)
    }
}

#[derive(Default)]
pub struct InMemoryScheduleStore {
    schedule: RwLock<WeeklySchedule>,
}

impl InMemoryScheduleStore {
    pub fn new(schedule: WeeklySchedule) -> Self {
        Self {
            schedule: RwLock::new(schedule),
        }
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn weekly_schedule(&self) -> Result<WeeklySchedule, ScheduleError> {
        Ok(self.schedule.read().await.clone())
    }
}
