//! Configuration models and loaders for calculation profiles and the city catalog.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Angle and rule parameters for the prayer-time engine, as written in profile files.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CalculationProfile {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_fajr_angle")]
    pub fajr_angle: f64,
    #[serde(default = "default_isha_angle")]
    pub isha_angle: f64,
    #[serde(default = "default_maghrib_angle")]
    pub maghrib_angle: f64,
    #[serde(default = "default_asr_shadow_factor")]
    pub asr_shadow_factor: u32,
    #[serde(default)]
    pub high_latitude_rule: HighLatitudeRuleConfig,
}

impl Default for CalculationProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            fajr_angle: default_fajr_angle(),
            isha_angle: default_isha_angle(),
            maghrib_angle: default_maghrib_angle(),
            asr_shadow_factor: default_asr_shadow_factor(),
            high_latitude_rule: HighLatitudeRuleConfig::default(),
        }
    }
}

/// High-latitude fallback named in profile files.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HighLatitudeRuleConfig {
    #[default]
    MiddleOfNight,
    SeventhOfNight,
    AngleBased,
}

/// A named city with its coordinates and civil time offset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CityConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone_hours: f64,
    /// Coordinate box used to label a raw location fix with this city.
    #[serde(default)]
    pub bounds: Option<BoundsConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct BoundsConfig {
    pub latitude_min: f64,
    pub latitude_max: f64,
    pub longitude_min: f64,
    pub longitude_max: f64,
}

impl BoundsConfig {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.latitude_min..=self.latitude_max).contains(&latitude)
            && (self.longitude_min..=self.longitude_max).contains(&longitude)
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no calculation profile found in {0}")]
    EmptyProfile(PathBuf),
}

/// Load the city catalog from a directory of TOML files, a single TOML file, or a YAML list.
pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<Vec<CityConfig>, ConfigError> {
    load_records(path)
}

/// Load a single calculation profile. A directory or YAML list yields its first entry.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<CalculationProfile, ConfigError> {
    let path = path.as_ref();
    load_records(path)?
        .into_iter()
        .next()
        .ok_or_else(|| ConfigError::EmptyProfile(path.to_path_buf()))
}

/// Load every calculation profile found at `path`.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<CalculationProfile>, ConfigError> {
    load_records(path)
}

/// Case-insensitive city lookup by name.
pub fn find_city<'a>(cities: &'a [CityConfig], name: &str) -> Option<&'a CityConfig> {
    let upper = name.to_uppercase();
    cities.iter().find(|c| c.name.to_uppercase() == upper)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn default_name() -> String {
    "default".to_string()
}

fn default_fajr_angle() -> f64 {
    16.0
}

fn default_isha_angle() -> f64 {
    14.0
}

fn default_maghrib_angle() -> f64 {
    4.0
}

fn default_asr_shadow_factor() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_profile_fills_defaults() {
        let profile: CalculationProfile =
            toml::from_str("fajr_angle = 18.0\nhigh_latitude_rule = \"seventh_of_night\"\n")
                .unwrap();
        assert_eq!(profile.fajr_angle, 18.0);
        assert_eq!(profile.isha_angle, 14.0);
        assert_eq!(profile.maghrib_angle, 4.0);
        assert_eq!(profile.asr_shadow_factor, 1);
        assert_eq!(
            profile.high_latitude_rule,
            HighLatitudeRuleConfig::SeventhOfNight
        );
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let parsed: Result<CalculationProfile, _> =
            toml::from_str("high_latitude_rule = \"nearest_day\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn cities_load_from_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for (file, name) in [("b.toml", "Istanbul"), ("a.toml", "Baku")] {
            let mut f = File::create(dir.path().join(file)).unwrap();
            writeln!(
                f,
                "name = \"{name}\"\nlatitude = 1.0\nlongitude = 2.0\ntimezone_hours = 3.0"
            )
            .unwrap();
        }
        File::create(dir.path().join("notes.txt")).unwrap();

        let cities = load_cities(dir.path()).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "Baku");
        assert!(cities[0].bounds.is_none());
        assert_eq!(find_city(&cities, "istanbul").unwrap().name, "Istanbul");
        assert!(find_city(&cities, "ankara").is_none());
    }

    #[test]
    fn yaml_profile_list_yields_first_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.yaml");
        std::fs::write(
            &path,
            "- name: jafari\n  fajr_angle: 16.0\n  isha_angle: 14.0\n- name: strict\n  fajr_angle: 18.0\n",
        )
        .unwrap();
        assert_eq!(load_profile(&path).unwrap().name, "jafari");
        assert_eq!(load_profiles(&path).unwrap().len(), 2);

        let empty = dir.path().join("empty.yaml");
        std::fs::write(&empty, "[]\n").unwrap();
        assert!(matches!(
            load_profile(&empty),
            Err(ConfigError::EmptyProfile(_))
        ));
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = BoundsConfig {
            latitude_min: 40.3,
            latitude_max: 40.5,
            longitude_min: 49.8,
            longitude_max: 50.0,
        };
        assert!(bounds.contains(40.4093, 49.8671));
        assert!(bounds.contains(40.3, 50.0));
        assert!(!bounds.contains(41.0, 49.9));
    }
}
