use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use namaz_cli::{DEFAULT_CITIES_DIR, init_tracing, lookup_city};
use namaz_shia::core::geo::GeoCoordinate;
use namaz_shia::location::{FixedLocation, resolve_location};
use namaz_shia::qibla::QiblaDirection;

/// Direction and distance to the Kaaba.
#[derive(Parser, Debug)]
#[command(author, version, about = "Qibla bearing from a location")]
struct Cli {
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true, requires = "lon", conflicts_with = "city")]
    lat: Option<f64>,

    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true, requires = "lat", conflicts_with = "city")]
    lon: Option<f64>,

    /// City from the catalog (case-insensitive)
    #[arg(long)]
    city: Option<String>,

    #[arg(long, default_value = DEFAULT_CITIES_DIR)]
    cities: PathBuf,

    /// Current device heading in degrees clockwise from north
    #[arg(long, allow_negative_numbers = true)]
    heading: Option<f64>,

    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (label, coordinate) = match (&cli.city, cli.lat, cli.lon) {
        (Some(name), _, _) => {
            let city = lookup_city(&cli.cities, name)?;
            let coordinate = GeoCoordinate::new(city.latitude, city.longitude)
                .with_context(|| format!("catalog entry for {}", city.name))?;
            (city.name, coordinate)
        }
        (None, Some(lat), Some(lon)) => (
            "Custom location".to_string(),
            GeoCoordinate::new(lat, lon)?,
        ),
        _ => {
            let fix = resolve_location(&FixedLocation::unavailable());
            (fix.city, fix.coordinate)
        }
    };

    let direction = QiblaDirection::from_coordinate(&coordinate);
    let rotation = cli.heading.map(|heading| direction.arrow_rotation(heading));

    if cli.json {
        let mut value = serde_json::to_value(&direction)?;
        if let Some(rotation) = rotation {
            value["arrow_rotation_deg"] = serde_json::json!(rotation);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{label} ({:.4}, {:.4})",
        coordinate.latitude, coordinate.longitude
    );
    println!(
        "Qibla bearing    : {:.2}° ({})",
        direction.bearing_deg, direction.compass
    );
    println!("Distance to Kaaba: {:.0} km", direction.distance_km);
    if let Some(rotation) = rotation {
        println!("Turn clockwise   : {rotation:.2}°");
    }
    Ok(())
}
