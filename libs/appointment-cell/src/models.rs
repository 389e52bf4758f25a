// libs/appointment-cell/src/models.rs
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use doctor_cell::models::{time_format, weekday_name, ScheduleError};
use shared_database::StoreError;

// ==============================================================================
// SCHEDULING POLICY
// ==============================================================================

pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// Clinic-wide rules that apply to every day: slot length and the lunch closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingPolicy {
    pub slot_minutes: i64,
    pub lunch_start: NaiveTime,
    pub lunch_end: NaiveTime,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_SLOT_MINUTES,
            lunch_start: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or_default(),
            lunch_end: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default(),
        }
    }
}

impl SchedulingPolicy {
    pub fn slot_length(&self) -> Duration {
        Duration::minutes(self.slot_minutes)
    }
}

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow<T> {
    pub start: T,
    pub end: T,
}

impl<T: PartialOrd + Copy> TimeWindow<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TimeWindow<T>) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ==============================================================================
// SLOTS
// ==============================================================================

/// Start time of a slot, written `HH:MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotLabel(NaiveTime);

impl SlotLabel {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Start and end instants of this slot on `date`.
    pub fn window_on(&self, date: NaiveDate, policy: &SchedulingPolicy) -> TimeWindow<NaiveDateTime> {
        let start = date.and_time(self.0);
        TimeWindow::new(start, start + policy.slot_length())
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(time_format::FORMAT))
    }
}

impl FromStr for SlotLabel {
    type Err = chrono::ParseError;

    /// 24-hour `HH:MM`; a single-digit hour such as `9:30` is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), time_format::FORMAT).map(Self)
    }
}

impl Serialize for SlotLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A committed booking. `end` is always `start` plus one slot length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "name")]
    pub patient_name: String,
    #[serde(rename = "start_time")]
    pub start: NaiveDateTime,
    #[serde(rename = "end_time")]
    pub end: NaiveDateTime,
}

impl Appointment {
    pub fn new(patient_name: impl Into<String>, start: NaiveDateTime, policy: &SchedulingPolicy) -> Self {
        Self {
            patient_name: patient_name.into(),
            start,
            end: start + policy.slot_length(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn window(&self) -> TimeWindow<NaiveDateTime> {
        TimeWindow::new(self.start, self.end)
    }
}

/// Inbound booking as sent by the voice agent. Absent or null fields read as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "name", default, deserialize_with = "lenient_string")]
    pub patient_name: String,
    #[serde(rename = "doctor", default, deserialize_with = "lenient_string")]
    pub doctor_name: String,
    #[serde(rename = "day", default, deserialize_with = "lenient_string")]
    pub day_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slot: String,
}

impl BookingRequest {
    pub fn new(patient: &str, doctor: &str, day: &str, slot: &str) -> Self {
        Self {
            patient_name: patient.to_string(),
            doctor_name: doctor.to_string(),
            day_name: day.to_string(),
            slot: slot.to_string(),
        }
    }

    /// Names of the fields that are empty after trimming, in wire order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.patient_name),
            ("doctor", &self.doctor_name),
            ("day", &self.day_name),
            ("slot", &self.slot),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Absent or null reads as empty; a non-string value keeps its JSON text so
/// the validator can reject it (`"slot": 900` becomes a malformed time).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

#[allow(clippy::ptr_arg)]
fn serialize_weekdays<S: Serializer>(days: &Vec<Weekday>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(days.iter().map(|d| weekday_name(*d)))
}

/// Open slots for one resolved day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    pub doctor: String,
    #[serde(serialize_with = "serialize_weekday")]
    pub day: Weekday,
    pub date: NaiveDate,
    pub available_slots: Vec<SlotLabel>,
}

impl DayAvailability {
    pub fn is_fully_booked(&self) -> bool {
        self.available_slots.is_empty()
    }
}

/// A successful commit together with the context the presentation layer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub appointment: Appointment,
    pub doctor: String,
    #[serde(serialize_with = "serialize_weekday")]
    pub day: Weekday,
    pub slot: SlotLabel,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Every outcome other than success. All but `StoreUnavailable` are expected,
/// user-correctable conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AppointmentError {
    #[error("'{day}' is not a day of the week")]
    InvalidDayName { day: String },

    #[error("The clinic is closed on {day}")]
    ClinicClosed {
        day: String,
        #[serde(serialize_with = "serialize_weekdays")]
        open_days: Vec<Weekday>,
    },

    #[error("Booking request is missing: {}", .missing.join(", "))]
    IncompleteRequest { missing: Vec<&'static str> },

    #[error("{requested} does not work on {day}; {scheduled_doctor} does")]
    DoctorDayMismatch {
        requested: String,
        day: String,
        scheduled_doctor: String,
    },

    #[error("'{slot}' is not a 24-hour HH:MM time")]
    MalformedTime { slot: String },

    #[error("{slot} on {day} is outside working hours")]
    OutsideWorkingHours {
        doctor: String,
        day: String,
        slot: SlotLabel,
        #[serde(serialize_with = "time_format::serialize")]
        work_start: NaiveTime,
        #[serde(serialize_with = "time_format::serialize")]
        work_end: NaiveTime,
    },

    #[error("{slot} on {day} falls in the lunch break")]
    LunchBreak {
        doctor: String,
        day: String,
        slot: SlotLabel,
        #[serde(serialize_with = "time_format::serialize")]
        lunch_start: NaiveTime,
        #[serde(serialize_with = "time_format::serialize")]
        lunch_end: NaiveTime,
    },

    #[error("{slot} on {day} ({date}) is already booked")]
    SlotTaken {
        doctor: String,
        day: String,
        date: NaiveDate,
        slot: SlotLabel,
    },

    #[error("Appointment not found")]
    NotFound { position: usize },

    #[error("Appointment store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl AppointmentError {
    /// Stable reason code, identical to the serialized `reason` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            AppointmentError::InvalidDayName { .. } => "invalid_day_name",
            AppointmentError::ClinicClosed { .. } => "clinic_closed",
            AppointmentError::IncompleteRequest { .. } => "incomplete_request",
            AppointmentError::DoctorDayMismatch { .. } => "doctor_day_mismatch",
            AppointmentError::MalformedTime { .. } => "malformed_time",
            AppointmentError::OutsideWorkingHours { .. } => "outside_working_hours",
            AppointmentError::LunchBreak { .. } => "lunch_break",
            AppointmentError::SlotTaken { .. } => "slot_taken",
            AppointmentError::NotFound { .. } => "not_found",
            AppointmentError::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    /// True for validation outcomes the caller can fix by changing the request.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            AppointmentError::NotFound { .. } | AppointmentError::StoreUnavailable { .. }
        )
    }
}

impl From<StoreError> for AppointmentError {
    fn from(err: StoreError) -> Self {
        AppointmentError::StoreUnavailable { message: err.to_string() }
    }
}

impl From<ScheduleError> for AppointmentError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::InvalidDayName { day } => AppointmentError::InvalidDayName { day },
            ScheduleError::StoreUnavailable(source) => source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_time_window_is_half_open() {
        let a = TimeWindow::new(hm(9, 0), hm(9, 30));
        let b = TimeWindow::new(hm(9, 30), hm(10, 0));
        let c = TimeWindow::new(hm(9, 15), hm(9, 45));

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c) && c.overlaps(&b));
    }

    #[test]
    fn test_slot_label_parsing() {
        assert_eq!("14:00".parse::<SlotLabel>().unwrap().time(), hm(14, 0));
        assert_eq!("9:30".parse::<SlotLabel>().unwrap().to_string(), "09:30");
        assert!("2pm".parse::<SlotLabel>().is_err());
        assert!("25:00".parse::<SlotLabel>().is_err());
        assert!("14:00:00".parse::<SlotLabel>().is_err());
        assert!("".parse::<SlotLabel>().is_err());
    }

    #[test]
    fn test_appointment_wire_format() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let appointment = Appointment::new("Jane Doe", start, &SchedulingPolicy::default());

        assert_eq!(appointment.end - appointment.start, Duration::minutes(30));
        assert_eq!(
            serde_json::to_value(&appointment).unwrap(),
            json!({
                "name": "Jane Doe",
                "start_time": "2026-10-19T09:00:00",
                "end_time": "2026-10-19T09:30:00"
            })
        );
    }

    #[test]
    fn test_booking_request_tolerates_missing_and_null_fields() {
        let request: BookingRequest =
            serde_json::from_value(json!({ "name": "Jane", "doctor": null, "slot": "  " })).unwrap();

        assert_eq!(request.missing_fields(), vec!["doctor", "day", "slot"]);
    }

    #[test]
    fn test_booking_request_keeps_non_string_values_as_text() {
        let request: BookingRequest =
            serde_json::from_value(json!({ "name": "Jane", "doctor": "Dr. A", "day": "Monday", "slot": 900 })).unwrap();

        assert_eq!(request.slot, "900");
        assert!(request.missing_fields().is_empty());
        assert!(request.slot.parse::<SlotLabel>().is_err());
    }

    #[test]
    fn test_error_serializes_with_reason_tag() {
        let err = AppointmentError::ClinicClosed {
            day: "Sunday".to_string(),
            open_days: vec![Weekday::Mon, Weekday::Tue],
        };
        let value = serde_json::to_value(&err).unwrap();

        assert_eq!(value["reason"], err.kind());
        assert_eq!(value["open_days"], json!(["Monday", "Tuesday"]));
        assert!(err.is_rejection());
        assert!(!AppointmentError::StoreUnavailable { message: "disk".into() }.is_rejection());
    }

    #[test]
    fn test_lunch_break_error_times_are_hhmm() {
        let err = AppointmentError::LunchBreak {
            doctor: "Dr. A".into(),
            day: "Monday".into(),
            slot: SlotLabel::new(hm(13, 30)),
            lunch_start: hm(13, 0),
            lunch_end: hm(14, 0),
        };
        let value = serde_json::to_value(&err).unwrap();

        assert_eq!(value["slot"], "13:30");
        assert_eq!(value["lunch_start"], "13:00");
        assert_eq!(value["reason"], "lunch_break");
    }
}
