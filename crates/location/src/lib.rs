//! Where the user is: location providers and the fallback used when none answers.

use namaz_config::CityConfig;
use namaz_core::geo::GeoCoordinate;
use namaz_store::{SettingsStore, StoreError};
use serde::Serialize;
use tracing::{debug, info};

pub const USER_CITY_KEY: &str = "user_city";
pub const USER_LATITUDE_KEY: &str = "user_latitude";
pub const USER_LONGITUDE_KEY: &str = "user_longitude";

/// City name used when a fix lies outside every catalog box.
pub const DEFAULT_CITY: &str = "Istanbul";
pub const FALLBACK_CITY: &str = "Baku";
pub const FALLBACK_LATITUDE: f64 = 40.4093;
pub const FALLBACK_LONGITUDE: f64 = 49.8671;
pub const FALLBACK_TIMEZONE_HOURS: f64 = 4.0;

/// A resolved position with a human-readable label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationFix {
    pub coordinate: GeoCoordinate,
    pub city: String,
}

impl LocationFix {
    pub fn new(coordinate: GeoCoordinate, city: impl Into<String>) -> Self {
        Self {
            coordinate,
            city: city.into(),
        }
    }

    /// Baku, used when no provider can supply a position.
    pub fn fallback() -> Self {
        Self::new(
            GeoCoordinate {
                latitude: FALLBACK_LATITUDE,
                longitude: FALLBACK_LONGITUDE,
            },
            FALLBACK_CITY,
        )
    }
}

pub trait LocationProvider {
    fn has_permission(&self) -> bool;
    /// `None` when the position is unavailable.
    fn current_location(&self) -> Option<LocationFix>;
}

/// Provider answering with a fixed position, e.g. from command-line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLocation {
    fix: Option<LocationFix>,
    permitted: bool,
}

impl FixedLocation {
    pub fn new(fix: LocationFix) -> Self {
        Self {
            fix: Some(fix),
            permitted: true,
        }
    }

    /// A provider whose permission was refused.
    pub fn denied() -> Self {
        Self {
            fix: None,
            permitted: false,
        }
    }

    /// Permission granted but no position available.
    pub fn unavailable() -> Self {
        Self {
            fix: None,
            permitted: true,
        }
    }
}

impl LocationProvider for FixedLocation {
    fn has_permission(&self) -> bool {
        self.permitted
    }

    fn current_location(&self) -> Option<LocationFix> {
        self.fix.clone()
    }
}

/// Last location the user saved, kept in a settings store.
#[derive(Debug)]
pub struct StoredLocation<S> {
    store: S,
}

impl<S: SettingsStore> StoredLocation<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save_location(&mut self, fix: &LocationFix) -> Result<(), StoreError> {
        self.store.set_string(USER_CITY_KEY, &fix.city)?;
        self.store
            .set_float(USER_LATITUDE_KEY, fix.coordinate.latitude)?;
        self.store
            .set_float(USER_LONGITUDE_KEY, fix.coordinate.longitude)?;
        debug!(city = %fix.city, "saved user location");
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: SettingsStore> LocationProvider for StoredLocation<S> {
    fn has_permission(&self) -> bool {
        true
    }

    fn current_location(&self) -> Option<LocationFix> {
        if !self.store.contains(USER_LATITUDE_KEY) || !self.store.contains(USER_LONGITUDE_KEY) {
            return None;
        }
        let latitude = self.store.get_float(USER_LATITUDE_KEY, FALLBACK_LATITUDE);
        let longitude = self.store.get_float(USER_LONGITUDE_KEY, FALLBACK_LONGITUDE);
        let coordinate = GeoCoordinate::new(latitude, longitude).ok()?;
        let city = self
            .store
            .get_string(USER_CITY_KEY, Some(DEFAULT_CITY))
            .unwrap_or_else(|| DEFAULT_CITY.to_string());
        Some(LocationFix::new(coordinate, city))
    }
}

/// Ask `provider` for a position, falling back to Baku on refusal or failure.
pub fn resolve_location(provider: &dyn LocationProvider) -> LocationFix {
    if !provider.has_permission() {
        info!("location permission not granted, using {FALLBACK_CITY}");
        return LocationFix::fallback();
    }
    match provider.current_location() {
        Some(fix) => fix,
        None => {
            info!("no location available, using {FALLBACK_CITY}");
            LocationFix::fallback()
        }
    }
}

/// Label a coordinate with the first catalog city whose box contains it.
pub fn city_for(catalog: &[CityConfig], latitude: f64, longitude: f64) -> String {
    catalog
        .iter()
        .find(|city| {
            city.bounds
                .is_some_and(|bounds| bounds.contains(latitude, longitude))
        })
        .map(|city| city.name.clone())
        .unwrap_or_else(|| DEFAULT_CITY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use namaz_config::BoundsConfig;
    use namaz_store::MemoryStore;

    fn catalog() -> Vec<CityConfig> {
        vec![
            CityConfig {
                name: "Baku".into(),
                latitude: 40.4093,
                longitude: 49.8671,
                timezone_hours: 4.0,
                bounds: Some(BoundsConfig {
                    latitude_min: 40.3,
                    latitude_max: 40.5,
                    longitude_min: 49.8,
                    longitude_max: 50.0,
                }),
            },
            CityConfig {
                name: "Ankara".into(),
                latitude: 39.9334,
                longitude: 32.8597,
                timezone_hours: 3.0,
                bounds: Some(BoundsConfig {
                    latitude_min: 39.8,
                    latitude_max: 40.0,
                    longitude_min: 32.7,
                    longitude_max: 32.9,
                }),
            },
            CityConfig {
                name: "Nowhere".into(),
                latitude: 0.0,
                longitude: 0.0,
                timezone_hours: 0.0,
                bounds: None,
            },
        ]
    }

    #[test]
    fn city_lookup_uses_bounds_and_default() {
        let catalog = catalog();
        assert_eq!(city_for(&catalog, 40.41, 49.87), "Baku");
        assert_eq!(city_for(&catalog, 39.93, 32.86), "Ankara");
        assert_eq!(city_for(&catalog, 0.0, 0.0), DEFAULT_CITY);
    }

    #[test]
    fn resolve_falls_back_to_baku() {
        let denied = resolve_location(&FixedLocation::denied());
        assert_eq!(denied, LocationFix::fallback());
        let unavailable = resolve_location(&FixedLocation::unavailable());
        assert_eq!(unavailable.city, "Baku");

        let istanbul = LocationFix::new(GeoCoordinate::new(41.0, 29.0).unwrap(), "Istanbul");
        assert_eq!(
            resolve_location(&FixedLocation::new(istanbul.clone())),
            istanbul
        );
    }

    #[test]
    fn stored_location_round_trips_through_store() {
        let mut stored = StoredLocation::new(MemoryStore::new());
        assert!(stored.current_location().is_none());

        let ankara = LocationFix::new(GeoCoordinate::new(39.9334, 32.8597).unwrap(), "Ankara");
        stored.save_location(&ankara).unwrap();
        assert_eq!(resolve_location(&stored), ankara);

        let store = stored.into_inner();
        assert_eq!(store.get_string(USER_CITY_KEY, None).as_deref(), Some("Ankara"));
    }

    #[test]
    fn stored_location_ignores_out_of_range_values() {
        let mut store = MemoryStore::new();
        store.set_float(USER_LATITUDE_KEY, 123.0).unwrap();
        store.set_float(USER_LONGITUDE_KEY, 0.0).unwrap();
        let stored = StoredLocation::new(store);
        assert!(stored.current_location().is_none());
        assert_eq!(resolve_location(&stored).city, FALLBACK_CITY);
    }
}
