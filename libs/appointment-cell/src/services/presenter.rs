//! Sentences read out by the voice agent. Everything here is derived from the
//! structured results of the availability and booking services.

use chrono::{Datelike, NaiveDate};

use doctor_cell::models::{time_format, weekday_name, DayList};

use crate::models::{AppointmentError, BookingConfirmation, DayAvailability};

/// `1st`, `2nd`, `3rd`, `4th`, ... with `11th`, `12th`, `13th`.
pub fn ordinal(n: u32) -> String {
    let suffix = if (10..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

/// e.g. `4th Nov 2025`.
pub fn format_date_ordinal(date: NaiveDate) -> String {
    format!("{} {} {}", ordinal(date.day()), date.format("%b"), date.year())
}

pub fn availability_message(availability: &DayAvailability) -> String {
    let day = weekday_name(availability.day);
    match (availability.available_slots.first(), availability.available_slots.last()) {
        (Some(first), Some(last)) => format!(
            "{} is available on {} from {} to {}. What time would you like to book?",
            availability.doctor, day, first, last
        ),
        _ => format!(
            "I'm sorry, {} is fully booked on {}. Would you like to try another day?",
            availability.doctor, day
        ),
    }
}

pub fn confirmation_message(confirmation: &BookingConfirmation) -> String {
    format!(
        "Perfect! I've booked your appointment with {} on {} at {}. Is there anything else I can help you with?",
        confirmation.doctor,
        format_date_ordinal(confirmation.appointment.date()),
        confirmation.slot
    )
}

pub fn rejection_message(err: &AppointmentError) -> String {
    match err {
        AppointmentError::InvalidDayName { day } => format!(
            "Sorry, I didn't catch which day you meant by '{}'. Which day of the week would you like?",
            day
        ),
        AppointmentError::ClinicClosed { day, open_days } => format!(
            "Sorry, the clinic is closed on {}. We're open {}.",
            day,
            DayList(open_days)
        ),
        AppointmentError::IncompleteRequest { .. } => {
            "I need your name, the doctor, day, and time slot to book the appointment. Let's start over."
                .to_string()
        }
        AppointmentError::DoctorDayMismatch { requested, day, scheduled_doctor } => format!(
            "{} is not available on {}. {} is available that day.",
            requested, day, scheduled_doctor
        ),
        AppointmentError::MalformedTime { slot } => format!(
            "I couldn't understand the time '{}'. Please provide it in 24-hour format like 14:00.",
            slot
        ),
        AppointmentError::OutsideWorkingHours { doctor, day, slot, work_start, work_end } => format!(
            "Sorry, {} is not available at {} on {}. That's outside of working hours ({} to {}). Would you like another time?",
            doctor,
            slot,
            day,
            work_start.format(time_format::FORMAT),
            work_end.format(time_format::FORMAT)
        ),
        AppointmentError::LunchBreak { doctor, day, slot, lunch_start, lunch_end } => format!(
            "Sorry, {} is not available at {} on {}. That falls during our lunch break ({} to {}). Would you like a time before or after lunch?",
            doctor,
            slot,
            day,
            lunch_start.format(time_format::FORMAT),
            lunch_end.format(time_format::FORMAT)
        ),
        AppointmentError::SlotTaken { doctor, day, slot, .. } => format!(
            "Sorry, {} already has an appointment at {} on {} (the 30-minute slot is taken). Would you like a different time?",
            doctor, slot, day
        ),
        AppointmentError::NotFound { .. } => "Appointment not found".to_string(),
        AppointmentError::StoreUnavailable { .. } => {
            "I'm having trouble with the appointment book right now. Please try again or call us directly."
                .to_string()
        }
    }
}
