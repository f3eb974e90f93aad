use std::path::PathBuf;

use chrono::NaiveDate;
use namaz_shia::config::{find_city, load_cities, load_profile};
use namaz_shia::location::city_for;
use namaz_shia::prayer::{CalculationConfig, calculate, from_profile};

fn configs() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs")
}

#[test]
fn bundled_profile_is_the_default_config() {
    let profile = load_profile(configs().join("calculation.toml")).expect("profile");
    assert_eq!(profile.name, "jafari");
    assert_eq!(
        from_profile(&profile).expect("valid profile"),
        CalculationConfig::default()
    );
}

#[test]
fn bundled_cities_label_their_own_coordinates() {
    let cities = load_cities(configs().join("cities")).expect("cities");
    assert_eq!(cities.len(), 3);
    for city in &cities {
        assert_eq!(city_for(&cities, city.latitude, city.longitude), city.name);
    }
    assert_eq!(city_for(&cities, 48.85, 2.35), "Istanbul");
}

#[test]
fn city_timezone_feeds_the_engine() {
    let cities = load_cities(configs().join("cities")).expect("cities");
    let baku = find_city(&cities, "Baku").expect("baku");
    let result = calculate(
        baku.latitude,
        baku.longitude,
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
        baku.timezone_hours,
        &CalculationConfig::default(),
    );
    assert_eq!(result.dhuhr.to_string(), "12:42:40");
}
