use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};
use tempfile::TempDir;

use shared_config::AppConfig;

use crate::clock::FixedClock;

/// Monday 2026-10-19, 08:00.
pub fn reference_monday() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid reference date")
}

pub fn fixed_clock() -> FixedClock {
    FixedClock::new(reference_monday())
}

pub struct MockClinicData;

impl MockClinicData {
    /// Monday to Saturday open, Sunday closed.
    pub fn schedules() -> Value {
        json!({
            "Monday": { "doctor": "Dr. A", "start_time": "09:00", "end_time": "17:00" },
            "Tuesday": { "doctor": "Dr. B", "start_time": "09:00", "end_time": "17:00" },
            "Wednesday": { "doctor": "Dr. A", "start_time": "10:00", "end_time": "18:00" },
            "Thursday": { "doctor": "Dr. C", "start_time": "09:00", "end_time": "17:00" },
            "Friday": { "doctor": "Dr. B", "start_time": "09:00", "end_time": "15:00" },
            "Saturday": { "doctor": "Dr. C", "start_time": "10:00", "end_time": "13:00" }
        })
    }

    pub fn knowledge_base() -> Value {
        json!({
            "clinic_name": "Test Clinic",
            "address": "1 High Street",
            "services": ["General consultation", "Vaccinations"]
        })
    }
}

/// A throwaway data directory populated with the mock clinic documents.
pub struct TestConfig {
    pub dir: TempDir,
}

impl TestConfig {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        write_json(&dir.path().join("schedules.json"), &MockClinicData::schedules())?;
        write_json(&dir.path().join("knowledge_base.json"), &MockClinicData::knowledge_base())?;
        Ok(Self { dir })
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::with_data_dir(self.dir.path())
    }
}

fn write_json(path: &Path, value: &Value) -> std::io::Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, bytes)
}
