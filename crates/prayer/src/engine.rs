//! Daily prayer-time calculation.

use chrono::NaiveDate;
use namaz_core::constants::{DEGREES_PER_HOUR, HORIZON_ALTITUDE_DEG, HOURS_PER_DAY};
use namaz_core::geo::GeoCoordinate;
use namaz_core::time::TimeOfDay;
use serde::Serialize;

use crate::rules::CalculationConfig;
use crate::search::{DayHalf, SunTrack};

/// Event times as fractional local hours, before wrapping into a 24 hour clock.
///
/// Fajr and Isha may fall on a search window edge (0 or 24) when the twilight
/// angle is never reached and the angle-based rule is in force.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrayerHours {
    pub fajr: f64,
    pub sunrise: f64,
    pub dhuhr: f64,
    pub asr: f64,
    pub sunset: f64,
    pub maghrib: f64,
    pub isha: f64,
    /// Midpoint between sunset and the following Fajr; may exceed 24.
    pub midnight: f64,
}

impl PrayerHours {
    /// Length of the night, `24 - (sunset - sunrise)`.
    pub fn night_length(&self) -> f64 {
        HOURS_PER_DAY - (self.sunset - self.sunrise)
    }

    /// `fajr <= sunrise <= dhuhr <= asr <= maghrib <= isha`.
    pub fn is_ordered(&self) -> bool {
        let sequence = [
            self.fajr,
            self.sunrise,
            self.dhuhr,
            self.asr,
            self.maghrib,
            self.isha,
        ];
        sequence.windows(2).all(|pair| pair[0] <= pair[1])
    }

    pub fn to_result(&self, date: NaiveDate) -> PrayerTimesResult {
        PrayerTimesResult {
            date,
            fajr: TimeOfDay::from_fractional_hours(self.fajr),
            sunrise: TimeOfDay::from_fractional_hours(self.sunrise),
            dhuhr: TimeOfDay::from_fractional_hours(self.dhuhr),
            asr: TimeOfDay::from_fractional_hours(self.asr),
            sunset: TimeOfDay::from_fractional_hours(self.sunset),
            maghrib: TimeOfDay::from_fractional_hours(self.maghrib),
            isha: TimeOfDay::from_fractional_hours(self.isha),
            midnight: TimeOfDay::from_fractional_hours(self.midnight),
        }
    }
}

/// Prayer times for one calendar day at one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrayerTimesResult {
    pub date: NaiveDate,
    pub fajr: TimeOfDay,
    pub sunrise: TimeOfDay,
    pub dhuhr: TimeOfDay,
    pub asr: TimeOfDay,
    pub sunset: TimeOfDay,
    pub maghrib: TimeOfDay,
    pub isha: TimeOfDay,
    pub midnight: TimeOfDay,
}

impl PrayerTimesResult {
    /// Named entries in display order.
    pub fn entries(&self) -> [(&'static str, TimeOfDay); 8] {
        [
            ("Fajr", self.fajr),
            ("Sunrise", self.sunrise),
            ("Dhuhr", self.dhuhr),
            ("Asr", self.asr),
            ("Sunset", self.sunset),
            ("Maghrib", self.maghrib),
            ("Isha", self.isha),
            ("Midnight", self.midnight),
        ]
    }
}

/// Compute the prayer times for `date` at (`latitude`, `longitude`) in a zone
/// `timezone_hours` ahead of UTC.
pub fn calculate(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    timezone_hours: f64,
    config: &CalculationConfig,
) -> PrayerTimesResult {
    calculate_hours(latitude, longitude, date, timezone_hours, config).to_result(date)
}

/// [`calculate`] for a validated coordinate.
pub fn calculate_for(
    coordinate: &GeoCoordinate,
    date: NaiveDate,
    timezone_hours: f64,
    config: &CalculationConfig,
) -> PrayerTimesResult {
    calculate(
        coordinate.latitude,
        coordinate.longitude,
        date,
        timezone_hours,
        config,
    )
}

/// Same as [`calculate`] but returning the unwrapped fractional hours.
pub fn calculate_hours(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    timezone_hours: f64,
    config: &CalculationConfig,
) -> PrayerHours {
    let track = SunTrack::new(latitude, longitude, date, timezone_hours);

    let sunrise = track.time_for_altitude(HORIZON_ALTITUDE_DEG, DayHalf::Morning);
    let sunset = track.time_for_altitude(HORIZON_ALTITUDE_DEG, DayHalf::Evening);
    let dhuhr = track.transit();
    let night = HOURS_PER_DAY - (sunset - sunrise);

    let rule = config.high_latitude_rule;
    let fajr = rule.clamp_fajr(
        track.time_for_altitude(-config.fajr_angle, DayHalf::Morning),
        sunrise,
        night,
    );
    let isha = rule.clamp_isha(
        track.time_for_altitude(-config.isha_angle, DayHalf::Evening),
        sunset,
        night,
    );

    let maghrib = sunset + config.maghrib_angle / DEGREES_PER_HOUR;
    let asr = track.asr_between(dhuhr, sunset, config.asr_shadow_factor);
    let midnight = sunset + (fajr + HOURS_PER_DAY - sunset) / 2.0;

    PrayerHours {
        fajr,
        sunrise,
        dhuhr,
        asr,
        sunset,
        maghrib,
        isha,
        midnight,
    }
}
