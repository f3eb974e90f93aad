//! Fixed-step bisection for the hours at which the sun reaches a given altitude.
//!
//! Convergence is governed by the step counts alone: 40 halvings of a 12 hour window
//! resolve to ~4e-11 h, 35 halvings of the Asr window to well under a millisecond.
//! When the sun never reaches the target the search settles on a window edge.

use chrono::NaiveDate;
use namaz_core::angle::{atan_d, tan_d};
use namaz_core::constants::DEGREES_PER_HOUR;

use crate::solar::{altitude, solar_noon, solar_position};

/// Halvings used for horizon and twilight crossings.
pub const ALTITUDE_SEARCH_STEPS: usize = 40;
/// Halvings used for the Asr shadow condition.
pub const ASR_SEARCH_STEPS: usize = 35;

/// Which half of the civil day a crossing is searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHalf {
    /// `[0, 12]`, the sun rising through the target.
    Morning,
    /// `[12, 24]`, the sun setting through the target.
    Evening,
}

impl DayHalf {
    fn window(self) -> (f64, f64) {
        match self {
            Self::Morning => (0.0, 12.0),
            Self::Evening => (12.0, 24.0),
        }
    }
}

/// Sun path over one local civil day for a fixed observer.
#[derive(Debug, Clone, Copy)]
pub struct SunTrack {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone_hours: f64,
    pub date: NaiveDate,
}

impl SunTrack {
    pub fn new(latitude: f64, longitude: f64, date: NaiveDate, timezone_hours: f64) -> Self {
        Self {
            latitude,
            longitude,
            timezone_hours,
            date,
        }
    }

    /// Local hour of solar transit, with the equation of time taken at 12:00.
    pub fn transit(&self) -> f64 {
        let position = solar_position(self.date, 12.0);
        solar_noon(
            self.timezone_hours,
            self.longitude,
            position.equation_of_time_min,
        )
    }

    /// Sun altitude (degrees) at local hour `hour`.
    pub fn altitude_at(&self, hour: f64) -> f64 {
        let position = solar_position(self.date, hour);
        let noon = solar_noon(
            self.timezone_hours,
            self.longitude,
            position.equation_of_time_min,
        );
        let hour_angle = (hour - noon) * DEGREES_PER_HOUR;
        altitude(self.latitude, position.declination_deg, hour_angle)
    }

    /// Hour in `half` at which the sun altitude crosses `target_altitude` degrees.
    pub fn time_for_altitude(&self, target_altitude: f64, half: DayHalf) -> f64 {
        let (lo, hi) = half.window();
        bisect(lo, hi, ALTITUDE_SEARCH_STEPS, |mid| {
            let above = self.altitude_at(mid) > target_altitude;
            match half {
                DayHalf::Morning => !above,
                DayHalf::Evening => above,
            }
        })
    }

    /// Hour in `[start, end]` at which the shadow condition for `shadow_factor` is met.
    pub fn asr_between(&self, start: f64, end: f64, shadow_factor: u32) -> f64 {
        bisect(start, end, ASR_SEARCH_STEPS, |mid| {
            self.altitude_at(mid) > self.asr_target(mid, shadow_factor)
        })
    }

    /// Target altitude of the Asr condition at `hour`; depends on the declination at that hour.
    fn asr_target(&self, hour: f64, shadow_factor: u32) -> f64 {
        let declination = solar_position(self.date, hour).declination_deg;
        let noon_zenith = (self.latitude - declination).abs();
        -atan_d(1.0 / (f64::from(shadow_factor) + tan_d(noon_zenith)))
    }
}

/// Halve `[lo, hi]` `steps` times; `go_later(mid)` keeps the upper half.
fn bisect(mut lo: f64, mut hi: f64, steps: usize, mut go_later: impl FnMut(f64) -> bool) -> f64 {
    for _ in 0..steps {
        let mid = (lo + hi) / 2.0;
        if go_later(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baku_solstice() -> SunTrack {
        SunTrack::new(
            40.4093,
            49.8671,
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            4.0,
        )
    }

    #[test]
    fn bisect_finds_linear_root() {
        let root = bisect(0.0, 12.0, 40, |x| x < 7.25);
        assert!((root - 7.25).abs() < 1e-9);
    }

    #[test]
    fn bisect_settles_on_edge_when_unreachable() {
        let root = bisect(12.0, 24.0, 40, |_| true);
        assert!((root - 24.0).abs() < 1e-9);
    }

    #[test]
    fn crossings_land_on_target_altitude() {
        let track = baku_solstice();
        let sunrise = track.time_for_altitude(-0.833, DayHalf::Morning);
        let sunset = track.time_for_altitude(-0.833, DayHalf::Evening);
        assert!((track.altitude_at(sunrise) + 0.833).abs() < 1e-6);
        assert!((track.altitude_at(sunset) + 0.833).abs() < 1e-6);
        assert!(sunrise < track.transit() && track.transit() < sunset);
    }

    #[test]
    fn transit_is_the_altitude_peak() {
        let track = baku_solstice();
        let noon = track.transit();
        let peak = track.altitude_at(noon);
        assert!(peak > track.altitude_at(noon - 0.25));
        assert!(peak > track.altitude_at(noon + 0.25));
        // 90 - |40.41 - 23.43|
        assert!((peak - 73.02).abs() < 0.05, "peak {peak}");
    }
}
