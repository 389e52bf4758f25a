use chrono::{Datelike, Days, NaiveDate, Weekday};

use doctor_cell::models::parse_weekday;

use crate::models::AppointmentError;

/// Days from `from` forward to the next `target`, in `0..=6`.
pub fn days_until(from: Weekday, target: Weekday) -> u32 {
    (7 + target.num_days_from_monday() - from.num_days_from_monday()) % 7
}

/// Next occurrence of `day` on or after `today`. Today itself counts.
pub fn resolve_date(day: Weekday, today: NaiveDate) -> NaiveDate {
    let offset = days_until(today.weekday(), day);
    today + Days::new(u64::from(offset))
}

/// Parses a weekday name and anchors it to a calendar date.
pub fn resolve_day_name(name: &str, today: NaiveDate) -> Result<(Weekday, NaiveDate), AppointmentError> {
    let day = parse_weekday(name)?;
    Ok((day, resolve_date(day, today)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use doctor_cell::models::WEEK;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_weekday_resolves_to_today() {
        let monday = date(2026, 10, 19);
        assert_eq!(resolve_date(Weekday::Mon, monday), monday);
    }

    #[test]
    fn test_earlier_weekday_wraps_to_next_week() {
        let wednesday = date(2026, 10, 21);
        assert_eq!(resolve_date(Weekday::Mon, wednesday), date(2026, 10, 26));
        assert_eq!(resolve_date(Weekday::Tue, wednesday), date(2026, 10, 27));
        assert_eq!(resolve_date(Weekday::Sun, wednesday), date(2026, 10, 25));
    }

    #[test]
    fn test_offsets_stay_within_a_week() {
        for today in (0..7).map(|n| date(2026, 10, 19 + n)) {
            for day in WEEK {
                let resolved = resolve_date(day, today);
                let offset = (resolved - today).num_days();
                assert!((0..=6).contains(&offset));
                assert_eq!(resolved.weekday(), day);
            }
        }
    }

    #[test]
    fn test_resolves_across_month_and_year_boundaries() {
        assert_eq!(resolve_date(Weekday::Mon, date(2026, 12, 31)), date(2027, 1, 4));
    }

    #[test]
    fn test_resolve_day_name() {
        let today = date(2026, 10, 19);
        assert_eq!(resolve_day_name("friday", today).unwrap(), (Weekday::Fri, date(2026, 10, 23)));
        assert_matches!(
            resolve_day_name("Someday", today),
            Err(AppointmentError::InvalidDayName { day }) if day == "Someday"
        );
    }
}
