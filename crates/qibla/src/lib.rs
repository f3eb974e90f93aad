//! Qibla direction: the initial great-circle bearing from an observer to the Kaaba.

use namaz_core::angle::{atan2_d, cos_d, normalize_degrees, sin_d};
use namaz_core::constants::{EARTH_RADIUS_KM, KAABA_LATITUDE_DEG, KAABA_LONGITUDE_DEG};
use namaz_core::geo::GeoCoordinate;
use serde::Serialize;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Bearing in `[0, 360)` degrees clockwise from true north toward the Kaaba.
pub fn qibla_bearing(latitude: f64, longitude: f64) -> f64 {
    let delta_lon = KAABA_LONGITUDE_DEG - longitude;
    let y = sin_d(delta_lon) * cos_d(KAABA_LATITUDE_DEG);
    let x = cos_d(latitude) * sin_d(KAABA_LATITUDE_DEG)
        - sin_d(latitude) * cos_d(KAABA_LATITUDE_DEG) * cos_d(delta_lon);
    normalize_degrees(atan2_d(y, x))
}

/// Haversine distance to the Kaaba on a sphere of mean Earth radius.
pub fn distance_to_kaaba_km(latitude: f64, longitude: f64) -> f64 {
    let half_dlat = (KAABA_LATITUDE_DEG - latitude) / 2.0;
    let half_dlon = (KAABA_LONGITUDE_DEG - longitude) / 2.0;
    let a = sin_d(half_dlat).powi(2)
        + cos_d(latitude) * cos_d(KAABA_LATITUDE_DEG) * sin_d(half_dlon).powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).max(0.0).sqrt())
}

/// Nearest of the 16 compass points for a bearing in degrees.
pub fn compass_point(bearing: f64) -> &'static str {
    let index = (normalize_degrees(bearing) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Rotation in `[0, 360)` to apply to an arrow so it points at the Qibla when the
/// device faces `device_heading` degrees.
pub fn relative_heading(qibla_bearing: f64, device_heading: f64) -> f64 {
    normalize_degrees(qibla_bearing - device_heading)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QiblaDirection {
    pub latitude: f64,
    pub longitude: f64,
    pub bearing_deg: f64,
    pub compass: &'static str,
    pub distance_km: f64,
}

impl QiblaDirection {
    pub fn from_coordinate(coordinate: &GeoCoordinate) -> Self {
        let bearing_deg = qibla_bearing(coordinate.latitude, coordinate.longitude);
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            bearing_deg,
            compass: compass_point(bearing_deg),
            distance_km: distance_to_kaaba_km(coordinate.latitude, coordinate.longitude),
        }
    }

    /// See [`relative_heading`].
    pub fn arrow_rotation(&self, device_heading: f64) -> f64 {
        relative_heading(self.bearing_deg, device_heading)
    }
}
