// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use doctor_cell::models::weekday_name;
use doctor_cell::services::SharedScheduleStore;

use crate::models::{
    Appointment, AppointmentError, BookingConfirmation, BookingRequest, SchedulingPolicy, SlotLabel,
};
use crate::services::availability::clinic_closed;
use crate::services::calendar::resolve_day_name;
use crate::services::slots::{lunch_window, within_working_hours, working_window};
use crate::services::store::SharedAppointmentStore;
use crate::state::AppointmentState;

/// Validates a booking request and commits it. Checks run in a fixed order and
/// the first failure is returned.
pub struct BookingService {
    schedules: SharedScheduleStore,
    appointments: SharedAppointmentStore,
    policy: SchedulingPolicy,
    booking_lock: Arc<Mutex<()>>,
}

impl BookingService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            schedules: state.schedules.clone(),
            appointments: state.appointments.clone(),
            policy: state.policy,
            booking_lock: state.shared_booking_lock(),
        }
    }

    #[instrument(skip(self, request), fields(day = %request.day_name, slot = %request.slot))]
    pub async fn book(
        &self,
        request: BookingRequest,
        today: NaiveDate,
    ) -> Result<BookingConfirmation, AppointmentError> {
        let result = self.validate_and_commit(request, today).await;
        if let Err(err) = &result {
            if err.is_rejection() {
                warn!("Booking rejected ({}): {}", err.kind(), err);
            }
        }
        result
    }

    async fn validate_and_commit(
        &self,
        request: BookingRequest,
        today: NaiveDate,
    ) -> Result<BookingConfirmation, AppointmentError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(AppointmentError::IncompleteRequest { missing });
        }

        let patient_name = request.patient_name.trim();
        let doctor_name = request.doctor_name.trim();
        let raw_slot = request.slot.trim();

        let (day, date) = resolve_day_name(&request.day_name, today)?;
        let day_label = weekday_name(day).to_string();

        let schedule = match self.schedules.get_schedule(day).await? {
            Some(schedule) => schedule,
            None => return Err(clinic_closed(&self.schedules, day).await),
        };

        if schedule.doctor_name != doctor_name {
            return Err(AppointmentError::DoctorDayMismatch {
                requested: doctor_name.to_string(),
                day: day_label,
                scheduled_doctor: schedule.doctor_name,
            });
        }

        let slot: SlotLabel = raw_slot.parse().map_err(|_| AppointmentError::MalformedTime {
            slot: raw_slot.to_string(),
        })?;

        let window = slot.window_on(date, &self.policy);

        let hours = working_window(date, schedule.work_start, schedule.work_end);
        if !within_working_hours(&window, &hours) {
            return Err(AppointmentError::OutsideWorkingHours {
                doctor: schedule.doctor_name,
                day: day_label,
                slot,
                work_start: schedule.work_start,
                work_end: schedule.work_end,
            });
        }

        if window.overlaps(&lunch_window(date, &self.policy)) {
            return Err(AppointmentError::LunchBreak {
                doctor: schedule.doctor_name,
                day: day_label,
                slot,
                lunch_start: self.policy.lunch_start,
                lunch_end: self.policy.lunch_end,
            });
        }

        // Conflict check and append must not interleave with another booking.
        let _guard = self.booking_lock.lock().await;

        let booked = self.appointments.list_on(date).await?;
        if booked.iter().any(|existing| existing.window().overlaps(&window)) {
            return Err(AppointmentError::SlotTaken {
                doctor: schedule.doctor_name,
                day: day_label,
                date,
                slot,
            });
        }

        let appointment = self
            .appointments
            .append(Appointment::new(patient_name, window.start, &self.policy))
            .await?;

        info!(
            patient = %appointment.patient_name,
            doctor = %schedule.doctor_name,
            day = %day_label,
            slot = %slot,
            date = %date,
            duration_minutes = self.policy.slot_minutes,
            "New appointment booked"
        );

        Ok(BookingConfirmation {
            appointment,
            doctor: schedule.doctor_name,
            day,
            slot,
        })
    }
}
