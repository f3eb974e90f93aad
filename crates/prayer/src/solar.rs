//! Low-precision solar position (Meeus, chapter 25 series).
//!
//! Accurate to roughly 0.01° in declination and a few seconds in the equation of
//! time over several centuries around J2000, which is well inside the resolution
//! prayer times are displayed at.

use chrono::NaiveDate;
use namaz_core::angle::{asin_d, cos_d, normalize_degrees, sin_d, tan_d};
use namaz_core::constants::DEGREES_PER_HOUR;
use namaz_core::time::julian_century;

/// Sun declination and equation of time at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Declination in degrees.
    pub declination_deg: f64,
    /// Apparent minus mean solar time, in minutes.
    pub equation_of_time_min: f64,
}

/// Solar position for `date` at the fractional local-clock hour `hour`.
pub fn solar_position(date: NaiveDate, hour: f64) -> SolarPosition {
    let t = julian_century(date, hour);

    let mean_longitude = normalize_degrees(280.46646 + 36000.76983 * t + 0.0003032 * t * t);
    let mean_anomaly = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
    let eccentricity = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

    let equation_of_center = (1.914602 - 0.004817 * t - 0.000014 * t * t) * sin_d(mean_anomaly)
        + (0.019993 - 0.000101 * t) * sin_d(2.0 * mean_anomaly)
        + 0.000289 * sin_d(3.0 * mean_anomaly);
    let true_longitude = mean_longitude + equation_of_center;

    let omega = 125.04 - 1934.136 * t;
    let apparent_longitude = true_longitude - 0.00569 - 0.00478 * sin_d(omega);

    let mean_obliquity = 23.439291 - 0.0130042 * t - 1.64e-7 * t * t + 5.04e-7 * t * t * t;
    let obliquity = mean_obliquity + 0.00256 * cos_d(omega);

    let declination_deg = asin_d(sin_d(obliquity) * sin_d(apparent_longitude));

    let y = tan_d(obliquity / 2.0).powi(2);
    let l0 = mean_longitude.to_radians();
    let m = mean_anomaly.to_radians();
    let e = eccentricity;
    let equation_of_time_min = 4.0
        * (y * (2.0 * l0).sin() - 2.0 * e * m.sin() + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
            - 0.5 * y * y * (4.0 * l0).sin()
            - 1.25 * e * e * (2.0 * m).sin())
        .to_degrees();

    SolarPosition {
        declination_deg,
        equation_of_time_min,
    }
}

/// Local clock hour of solar transit given an equation-of-time value.
#[inline]
pub fn solar_noon(timezone_hours: f64, longitude: f64, equation_of_time_min: f64) -> f64 {
    12.0 + timezone_hours - longitude / DEGREES_PER_HOUR - equation_of_time_min / 60.0
}

/// Altitude (degrees) of a body with declination `declination` at hour angle `hour_angle`.
#[inline]
pub fn altitude(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    asin_d(
        sin_d(latitude) * sin_d(declination)
            + cos_d(latitude) * cos_d(declination) * cos_d(hour_angle),
    )
}
