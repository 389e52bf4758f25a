pub mod availability;
pub mod booking;
pub mod calendar;
pub mod presenter;
pub mod records;
pub mod slots;
pub mod store;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use records::AppointmentRecordsService;
pub use store::{AppointmentStore, InMemoryAppointmentStore, JsonAppointmentStore, SharedAppointmentStore};
