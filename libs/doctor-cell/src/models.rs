use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

/// The seven weekdays in calendar order, Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a full English weekday name, ignoring case and surrounding whitespace.
pub fn parse_weekday(name: &str) -> Result<Weekday, ScheduleError> {
    let trimmed = name.trim();
    WEEK.iter()
        .copied()
        .find(|day| weekday_name(*day).eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| ScheduleError::InvalidDayName { day: trimmed.to_string() })
}

/// `HH:MM` serde representation for times of day.
pub mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

// ==============================================================================
// SCHEDULE MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(rename = "doctor")]
    pub doctor_name: String,
    #[serde(rename = "start_time", with = "time_format")]
    pub work_start: NaiveTime,
    #[serde(rename = "end_time", with = "time_format")]
    pub work_end: NaiveTime,
}

impl DaySchedule {
    pub fn new(doctor_name: impl Into<String>, work_start: NaiveTime, work_end: NaiveTime) -> Self {
        Self {
            doctor_name: doctor_name.into(),
            work_start,
            work_end,
        }
    }
}

/// The clinic's week: at most one doctor schedule per weekday.
///
/// Stored as a JSON object keyed by capitalized weekday name; days missing from
/// the document are closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, DaySchedule>")]
pub struct WeeklySchedule {
    days: [Option<DaySchedule>; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: Weekday, schedule: DaySchedule) -> Self {
        self.set(day, schedule);
        self
    }

    pub fn set(&mut self, day: Weekday, schedule: DaySchedule) {
        self.days[day.num_days_from_monday() as usize] = Some(schedule);
    }

    pub fn get(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days[day.num_days_from_monday() as usize].as_ref()
    }

    pub fn open_days(&self) -> Vec<Weekday> {
        WEEK.iter().copied().filter(|day| self.get(*day).is_some()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        WEEK.iter()
            .copied()
            .filter_map(move |day| self.get(day).map(|schedule| (day, schedule)))
    }
}

impl TryFrom<BTreeMap<String, DaySchedule>> for WeeklySchedule {
    type Error = ScheduleError;

    fn try_from(document: BTreeMap<String, DaySchedule>) -> Result<Self, Self::Error> {
        let mut week = WeeklySchedule::new();
        for (name, schedule) in document {
            week.set(parse_weekday(&name)?, schedule);
        }
        Ok(week)
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let open = self.open_days();
        let mut map = serializer.serialize_map(Some(open.len()))?;
        for (day, schedule) in self.iter() {
            map.serialize_entry(weekday_name(day), schedule)?;
        }
        map.end()
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("'{day}' is not a day of the week")]
    InvalidDayName { day: String },

    #[error("Schedule store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::InvalidDayName { .. } => AppError::BadRequest(err.to_string()),
            ScheduleError::StoreUnavailable(_) => AppError::Database(err.to_string()),
        }
    }
}

/// Renders weekdays the way a receptionist would say them: a contiguous run
/// becomes "Monday through Saturday", anything else is enumerated.
pub struct DayList<'a>(pub &'a [Weekday]);

impl fmt::Display for DayList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0;
        match days {
            [] => write!(f, "no days"),
            [only] => write!(f, "{}", weekday_name(*only)),
            [first, .., last]
                if days.len() > 2
                    && days.windows(2).all(|pair| pair[0].succ() == pair[1]) =>
            {
                write!(f, "{} through {}", weekday_name(*first), weekday_name(*last))
            }
            [init @ .., last] => {
                let head: Vec<&str> = init.iter().map(|d| weekday_name(*d)).collect();
                write!(f, "{} and {}", head.join(", "), weekday_name(*last))
            }
        }
    }
}
