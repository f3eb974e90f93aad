//! Core constants, angle helpers, and shared value types for the namaz_shia workspace.

/// Astronomical and geographic constants.
pub mod constants {
    /// Julian day of the J2000.0 epoch.
    pub const J2000_JD: f64 = 2_451_545.0;
    /// Julian day number of the Unix epoch day (1970-01-01), before the half-day shift.
    pub const UNIX_EPOCH_JDN: f64 = 2_440_588.0;
    /// Days per Julian century.
    pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
    /// `NaiveDate::num_days_from_ce` of 1970-01-01.
    pub const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;
    /// Degrees of hour angle per hour of time.
    pub const DEGREES_PER_HOUR: f64 = 15.0;
    /// Hours per civil day.
    pub const HOURS_PER_DAY: f64 = 24.0;
    /// Apparent altitude of the solar upper limb at sunrise/sunset (refraction + semi-diameter).
    pub const HORIZON_ALTITUDE_DEG: f64 = -0.833;
    /// Latitude of the Arctic/Antarctic circles (degrees).
    pub const POLAR_CIRCLE_LATITUDE_DEG: f64 = 66.5;
    /// Mean Earth radius (km).
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Kaaba latitude (degrees).
    pub const KAABA_LATITUDE_DEG: f64 = 21.4225;
    /// Kaaba longitude (degrees).
    pub const KAABA_LONGITUDE_DEG: f64 = 39.8262;
}

/// Trigonometry on degrees.
///
/// Inverse functions clamp their argument into `[-1, 1]` first so floating-point
/// overshoot never produces `NaN`.
pub mod angle {
    #[inline]
    pub fn sin_d(deg: f64) -> f64 {
        deg.to_radians().sin()
    }

    #[inline]
    pub fn cos_d(deg: f64) -> f64 {
        deg.to_radians().cos()
    }

    #[inline]
    pub fn tan_d(deg: f64) -> f64 {
        deg.to_radians().tan()
    }

    #[inline]
    pub fn asin_d(x: f64) -> f64 {
        x.clamp(-1.0, 1.0).asin().to_degrees()
    }

    #[inline]
    pub fn acos_d(x: f64) -> f64 {
        x.clamp(-1.0, 1.0).acos().to_degrees()
    }

    #[inline]
    pub fn atan_d(x: f64) -> f64 {
        x.atan().to_degrees()
    }

    #[inline]
    pub fn atan2_d(y: f64, x: f64) -> f64 {
        y.atan2(x).to_degrees()
    }

    /// Wrap an angle into `[0, 360)`.
    #[inline]
    pub fn normalize_degrees(deg: f64) -> f64 {
        ((deg % 360.0) + 360.0) % 360.0
    }
}

/// Calendar and time-of-day helpers.
pub mod time {
    use std::fmt;

    use chrono::{Datelike, NaiveDate, NaiveTime};
    use serde::{Serialize, Serializer};

    use super::constants::{
        DAYS_PER_JULIAN_CENTURY, HOURS_PER_DAY, J2000_JD, UNIX_EPOCH_DAYS_FROM_CE, UNIX_EPOCH_JDN,
    };

    /// Days elapsed since 1970-01-01 (negative before).
    #[inline]
    pub fn epoch_day(date: NaiveDate) -> i64 {
        i64::from(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
    }

    /// Julian day of `date` at fractional local-clock hour `hour`.
    #[inline]
    pub fn julian_day(date: NaiveDate, hour: f64) -> f64 {
        (epoch_day(date) as f64 + UNIX_EPOCH_JDN) + hour / HOURS_PER_DAY + 0.5
    }

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_century(date: NaiveDate, hour: f64) -> f64 {
        (julian_day(date, hour) - J2000_JD) / DAYS_PER_JULIAN_CENTURY
    }

    /// Wall-clock time of day with whole-second resolution.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct TimeOfDay {
        pub hour: u8,
        pub minute: u8,
        pub second: u8,
    }

    impl TimeOfDay {
        /// Convert a fractional hour into a time of day, wrapping the hour into `0..24`.
        ///
        /// Minutes and seconds are truncated, never rounded.
        pub fn from_fractional_hours(hours: f64) -> Self {
            let whole = hours.floor();
            let fraction = hours - whole;
            let minutes = (fraction * 60.0).floor();
            let seconds = ((fraction * 60.0 - minutes) * 60.0).floor();
            let hour = (whole as i64).rem_euclid(24);
            Self {
                hour: hour as u8,
                minute: (minutes as u8).min(59),
                second: (seconds as u8).min(59),
            }
        }

        /// Seconds since midnight.
        pub fn seconds_of_day(self) -> u32 {
            u32::from(self.hour) * 3_600 + u32::from(self.minute) * 60 + u32::from(self.second)
        }

        pub fn to_naive_time(self) -> Option<NaiveTime> {
            NaiveTime::from_hms_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
            )
        }
    }

    /// Serialized as its `HH:MM:SS` display form.
    impl Serialize for TimeOfDay {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl fmt::Display for TimeOfDay {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
        }
    }
}

/// Geographic coordinates.
pub mod geo {
    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    use super::constants::POLAR_CIRCLE_LATITUDE_DEG;

    /// Latitude/longitude pair in degrees (north and east positive).
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct GeoCoordinate {
        pub latitude: f64,
        pub longitude: f64,
    }

    #[derive(Debug, Error, PartialEq)]
    pub enum CoordinateError {
        #[error("latitude {0} is outside [-90, 90]")]
        Latitude(f64),
        #[error("longitude {0} is outside [-180, 180]")]
        Longitude(f64),
    }

    impl GeoCoordinate {
        pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(CoordinateError::Latitude(latitude));
            }
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(CoordinateError::Longitude(longitude));
            }
            Ok(Self {
                latitude,
                longitude,
            })
        }
    }

    /// True when `latitude` lies beyond the polar circles, where twilight and even
    /// sunrise may never occur on some dates.
    pub fn is_within_polar_circle(latitude: f64) -> bool {
        latitude.abs() > POLAR_CIRCLE_LATITUDE_DEG
    }
}
