use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{SchedulingPolicy, SlotLabel, TimeWindow};

/// Slot starts from `work_start` in steps of `interval`, each strictly before
/// `work_end`. Whether the last slot also ends by `work_end` is not checked here.
pub fn generate_slots(work_start: NaiveTime, work_end: NaiveTime, interval: Duration) -> Vec<SlotLabel> {
    let mut slots = Vec::new();
    if interval <= Duration::zero() {
        return slots;
    }

    let mut current = work_start;
    while current < work_end {
        slots.push(SlotLabel::new(current));

        let (next, wrapped) = current.overflowing_add_signed(interval);
        if wrapped != 0 {
            break;
        }
        current = next;
    }

    slots
}

/// The lunch closure anchored on `date`.
pub fn lunch_window(date: NaiveDate, policy: &SchedulingPolicy) -> TimeWindow<NaiveDateTime> {
    TimeWindow::new(date.and_time(policy.lunch_start), date.and_time(policy.lunch_end))
}

/// Working hours anchored on `date`.
pub fn working_window(date: NaiveDate, work_start: NaiveTime, work_end: NaiveTime) -> TimeWindow<NaiveDateTime> {
    TimeWindow::new(date.and_time(work_start), date.and_time(work_end))
}

/// Start and end both fall within working hours: `start` in `[open, close)`, `end` in `(open, close]`.
pub fn within_working_hours(slot: &TimeWindow<NaiveDateTime>, hours: &TimeWindow<NaiveDateTime>) -> bool {
    hours.start <= slot.start && slot.start < hours.end && hours.start < slot.end && slot.end <= hours.end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn labels(slots: &[SlotLabel]) -> Vec<String> {
        slots.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_full_day_grid() {
        let slots = generate_slots(hm(9, 0), hm(17, 0), Duration::minutes(30));

        assert_eq!(slots.len(), 16);
        assert_eq!(slots.first().unwrap().to_string(), "09:00");
        assert_eq!(slots.last().unwrap().to_string(), "16:30");
    }

    #[test]
    fn test_slots_strictly_increasing_and_before_close() {
        for (start, end, step) in [
            (hm(9, 0), hm(17, 0), 30),
            (hm(8, 15), hm(12, 40), 30),
            (hm(10, 0), hm(10, 45), 15),
            (hm(0, 0), hm(23, 59), 60),
        ] {
            let slots = generate_slots(start, end, Duration::minutes(step));
            assert!(slots.windows(2).all(|w| w[0] < w[1]));
            assert!(slots.iter().all(|s| s.time() < end));
            assert_eq!(slots.first().map(|s| s.time()), Some(start));
        }
    }

    #[test]
    fn test_last_slot_may_overrun_close() {
        let slots = generate_slots(hm(9, 0), hm(10, 15), Duration::minutes(30));
        assert_eq!(labels(&slots), vec!["09:00", "09:30", "10:00"]);
    }

    #[test]
    fn test_empty_when_start_not_before_end() {
        assert!(generate_slots(hm(17, 0), hm(9, 0), Duration::minutes(30)).is_empty());
        assert!(generate_slots(hm(9, 0), hm(9, 0), Duration::minutes(30)).is_empty());
        assert!(generate_slots(hm(9, 0), hm(17, 0), Duration::zero()).is_empty());
    }

    #[test]
    fn test_generation_stops_at_midnight() {
        let slots = generate_slots(hm(22, 0), hm(23, 59), Duration::minutes(30));
        assert_eq!(labels(&slots), vec!["22:00", "22:30", "23:00", "23:30"]);
    }

    #[test]
    fn test_working_hours_boundaries() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let policy = SchedulingPolicy::default();
        let hours = working_window(date, hm(9, 0), hm(17, 0));
        let at = |h, m| SlotLabel::new(hm(h, m)).window_on(date, &policy);

        assert!(within_working_hours(&at(9, 0), &hours));
        assert!(within_working_hours(&at(16, 30), &hours));
        assert!(!within_working_hours(&at(17, 0), &hours));
        assert!(!within_working_hours(&at(16, 45), &hours));
        assert!(!within_working_hours(&at(8, 45), &hours));
        assert!(!within_working_hours(&at(23, 45), &hours));
    }

    #[test]
    fn test_lunch_overlap() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let policy = SchedulingPolicy::default();
        let lunch = lunch_window(date, &policy);
        let at = |h, m| SlotLabel::new(hm(h, m)).window_on(date, &policy);

        assert!(!at(12, 30).overlaps(&lunch));
        assert!(at(12, 45).overlaps(&lunch));
        assert!(at(13, 0).overlaps(&lunch));
        assert!(at(13, 30).overlaps(&lunch));
        assert!(!at(14, 0).overlaps(&lunch));
    }
}
