use chrono::{NaiveDate, Weekday};
use tracing::{debug, instrument};

use doctor_cell::models::weekday_name;
use doctor_cell::services::SharedScheduleStore;

use crate::models::{AppointmentError, DayAvailability, SchedulingPolicy, SlotLabel};
use crate::services::calendar::resolve_day_name;
use crate::services::slots::{generate_slots, lunch_window, within_working_hours, working_window};
use crate::services::store::SharedAppointmentStore;
use crate::state::AppointmentState;

/// Read-only discovery of bookable slots. Takes no lock: a booking committed
/// concurrently may be missed, but the booking path re-checks under its lock.
pub struct AvailabilityService {
    schedules: SharedScheduleStore,
    appointments: SharedAppointmentStore,
    policy: SchedulingPolicy,
}

impl AvailabilityService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            schedules: state.schedules.clone(),
            appointments: state.appointments.clone(),
            policy: state.policy,
        }
    }

    /// Open slots for the next occurrence of `day_name` on or after `today`.
    #[instrument(skip(self))]
    pub async fn available_slots(
        &self,
        day_name: &str,
        today: NaiveDate,
    ) -> Result<DayAvailability, AppointmentError> {
        let (day, date) = resolve_day_name(day_name, today)?;

        let schedule = match self.schedules.get_schedule(day).await? {
            Some(schedule) => schedule,
            None => return Err(clinic_closed(&self.schedules, day).await),
        };

        let hours = working_window(date, schedule.work_start, schedule.work_end);
        let lunch = lunch_window(date, &self.policy);

        let mut available: Vec<SlotLabel> =
            generate_slots(schedule.work_start, schedule.work_end, self.policy.slot_length())
                .into_iter()
                .filter(|slot| {
                    let window = slot.window_on(date, &self.policy);
                    within_working_hours(&window, &hours) && !window.overlaps(&lunch)
                })
                .collect();

        let booked = self.appointments.list_on(date).await?;
        for appointment in &booked {
            let taken = appointment.window();
            available.retain(|slot| !slot.window_on(date, &self.policy).overlaps(&taken));
        }

        debug!(
            "{} has {} open slots on {} ({} booked)",
            schedule.doctor_name,
            available.len(),
            date,
            booked.len()
        );

        Ok(DayAvailability {
            doctor: schedule.doctor_name,
            day,
            date,
            available_slots: available,
        })
    }
}

/// `ClinicClosed` for `day`, listing the days the clinic does open.
pub(crate) async fn clinic_closed(schedules: &SharedScheduleStore, day: Weekday) -> AppointmentError {
    match schedules.open_days().await {
        Ok(open_days) => AppointmentError::ClinicClosed {
            day: weekday_name(day).to_string(),
            open_days,
        },
        Err(err) => err.into(),
    }
}
