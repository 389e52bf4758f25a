#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use appointment_cell::services::store::{InMemoryAppointmentStore, JsonAppointmentStore, SharedAppointmentStore};
use appointment_cell::{AppointmentState, BookingRequest, SlotLabel};
use doctor_cell::models::WeeklySchedule;
use doctor_cell::services::{InMemoryScheduleStore, JsonScheduleStore, SharedScheduleStore};
use shared_utils::clock::FixedClock;
use shared_utils::test_utils::{fixed_clock, MockClinicData, TestConfig};

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday of the reference week used by every fixture clock.
pub fn monday() -> NaiveDate {
    date(2026, 10, 19)
}

pub fn labels(slots: &[SlotLabel]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

pub fn booking(patient: &str, doctor: &str, day: &str, slot: &str) -> BookingRequest {
    BookingRequest::new(patient, doctor, day, slot)
}

pub fn mock_schedule() -> WeeklySchedule {
    serde_json::from_value(MockClinicData::schedules()).unwrap()
}

/// In-memory stores over the mock clinic week, clock frozen on the reference Monday.
pub fn in_memory_state() -> (AppointmentState, FixedClock) {
    let clock = fixed_clock();
    let schedules: SharedScheduleStore = Arc::new(InMemoryScheduleStore::new(mock_schedule()));
    let appointments: SharedAppointmentStore = Arc::new(InMemoryAppointmentStore::new());
    let state = AppointmentState::new(
        Arc::new(shared_config::AppConfig::default()),
        schedules,
        appointments,
        Arc::new(clock.clone()),
    );
    (state, clock)
}

/// JSON document stores in a temp directory. Keep the returned `TestConfig`
/// alive for as long as the state is used.
pub fn json_state() -> (AppointmentState, TestConfig) {
    let test_config = TestConfig::new().unwrap();
    let config = test_config.to_app_config();
    let schedules: SharedScheduleStore = Arc::new(JsonScheduleStore::new(&config));
    let appointments: SharedAppointmentStore = Arc::new(JsonAppointmentStore::new(&config));
    let state = AppointmentState::new(Arc::new(config), schedules, appointments, Arc::new(fixed_clock()));
    (state, test_config)
}
