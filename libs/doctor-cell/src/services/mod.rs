pub mod schedule;

pub use schedule::{InMemoryScheduleStore, JsonScheduleStore, ScheduleStore, SharedScheduleStore};
