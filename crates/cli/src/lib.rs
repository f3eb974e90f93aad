//! Helpers shared by the command-line binaries.

use std::path::Path;

use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDate};
use namaz_shia::config::{CityConfig, find_city, load_cities};
use namaz_shia::store::JsonFileStore;
use tracing_subscriber::EnvFilter;

/// Default city catalog, relative to the working directory.
pub const DEFAULT_CITIES_DIR: &str = "configs/cities";
/// Default settings file for counters.
pub const DEFAULT_STORE_PATH: &str = "namaz_settings.json";

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD ({err})"))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Look up `name` in the catalog at `dir`.
pub fn lookup_city(dir: &Path, name: &str) -> anyhow::Result<CityConfig> {
    let cities = load_cities(dir)
        .with_context(|| format!("loading city catalog from {}", dir.display()))?;
    find_city(&cities, name)
        .cloned()
        .ok_or_else(|| anyhow!("unknown city '{name}' (catalog: {})", dir.display()))
}

pub fn open_store(path: &Path) -> anyhow::Result<JsonFileStore> {
    JsonFileStore::open(path).with_context(|| format!("opening settings at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_iso_only() {
        assert_eq!(
            parse_date("2024-06-21"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
        );
        assert!(parse_date("21/06/2024").is_err());
    }

    #[test]
    fn bundled_catalog_has_baku() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs/cities");
        let baku = lookup_city(&dir, "baku").unwrap();
        assert_eq!(baku.timezone_hours, 4.0);
        assert!(lookup_city(&dir, "atlantis").is_err());
    }
}
