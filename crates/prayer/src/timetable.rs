//! Multi-day timetables and day-offset navigation.

use chrono::{Days, NaiveDate};

use crate::engine::{PrayerHours, PrayerTimesResult, calculate, calculate_hours};
use crate::rules::CalculationConfig;

/// The date `offset` days from `today` (negative goes back), or `None` outside chrono's range.
pub fn day_with_offset(today: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        today.checked_add_days(magnitude)
    } else {
        today.checked_sub_days(magnitude)
    }
}

/// Unwrapped hours for `days` consecutive dates starting at `start`.
///
/// Stops early if the calendar runs out of representable dates.
pub fn timetable_hours(
    latitude: f64,
    longitude: f64,
    start: NaiveDate,
    days: u32,
    timezone_hours: f64,
    config: &CalculationConfig,
) -> Vec<(NaiveDate, PrayerHours)> {
    start
        .iter_days()
        .take(days as usize)
        .map(|date| {
            let hours = calculate_hours(latitude, longitude, date, timezone_hours, config);
            (date, hours)
        })
        .collect()
}

/// Prayer times for `days` consecutive dates starting at `start`.
pub fn timetable(
    latitude: f64,
    longitude: f64,
    start: NaiveDate,
    days: u32,
    timezone_hours: f64,
    config: &CalculationConfig,
) -> Vec<PrayerTimesResult> {
    timetable_hours(latitude, longitude, start, days, timezone_hours, config)
        .into_iter()
        .map(|(date, hours)| hours.to_result(date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_move_both_ways() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            day_with_offset(today, 1),
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert_eq!(
            day_with_offset(today, -1),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(day_with_offset(today, 0), Some(today));
    }

    #[test]
    fn timetable_covers_consecutive_days() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let table = timetable(
            40.4093,
            49.8671,
            start,
            4,
            4.0,
            &CalculationConfig::default(),
        );
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].date, start);
        assert_eq!(table[3].date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(table[1], calculate(40.4093, 49.8671, table[1].date, 4.0, &CalculationConfig::default()));
    }

    #[test]
    fn zero_days_is_empty() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(timetable(0.0, 0.0, start, 0, 0.0, &CalculationConfig::default()).is_empty());
    }

    #[test]
    fn hours_flag_each_unordered_day() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 19).unwrap();
        let config = CalculationConfig::default();
        let polar = timetable_hours(89.9, 0.0, start, 3, 0.0, &config);
        assert_eq!(polar.len(), 3);
        assert!(polar.iter().all(|(_, hours)| !hours.is_ordered()));

        let baku = timetable_hours(40.4093, 49.8671, start, 3, 4.0, &config);
        assert!(baku.iter().all(|(_, hours)| hours.is_ordered()));
        assert_eq!(baku[2].0, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());
        assert_eq!(
            baku[2].1.to_result(baku[2].0),
            timetable(40.4093, 49.8671, start, 3, 4.0, &config)[2]
        );
    }
}
