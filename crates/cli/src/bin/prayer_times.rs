use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use namaz_cli::{DEFAULT_CITIES_DIR, init_tracing, lookup_city, parse_date, today};
use namaz_shia::config::{CalculationProfile, HighLatitudeRuleConfig, load_profile};
use namaz_shia::core::geo::{GeoCoordinate, is_within_polar_circle};
use namaz_shia::export::{json as export_json, timetable as export_csv, writer_for_path};
use namaz_shia::location::{FALLBACK_TIMEZONE_HOURS, FixedLocation, resolve_location};
use namaz_shia::prayer::{
    CalculationConfig, PrayerTimesResult, day_with_offset, from_profile, timetable_hours,
};
use tracing::{info, warn};

/// Compute prayer times for a place and a run of days.
#[derive(Parser, Debug)]
#[command(author, version, about = "Prayer times from solar position")]
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

    /// City catalog directory or file
    #[arg(long, default_value = DEFAULT_CITIES_DIR)]
    cities: PathBuf,

    /// First date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Days to move from the date, e.g. -1 for yesterday
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    /// Number of consecutive days
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=366))]
    days: u32,

    /// Hours ahead of UTC; defaults to the city's zone, else longitude / 15
    #[arg(long, allow_negative_numbers = true)]
    tz: Option<f64>,

    /// Calculation profile (TOML or YAML)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Sun depression at Fajr in degrees
    #[arg(long)]
    fajr_angle: Option<f64>,

    /// Sun depression at Isha in degrees
    #[arg(long)]
    isha_angle: Option<f64>,

    /// Maghrib delay after sunset, in degrees of hour angle
    #[arg(long)]
    maghrib_angle: Option<f64>,

    /// Asr shadow-length multiplier
    #[arg(long)]
    asr_factor: Option<u32>,

    #[arg(long, value_enum)]
    high_lat_rule: Option<HighLatRule>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Output file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum HighLatRule {
    MiddleOfNight,
    SeventhOfNight,
    AngleBased,
}

impl From<HighLatRule> for HighLatitudeRuleConfig {
    fn from(rule: HighLatRule) -> Self {
        match rule {
            HighLatRule::MiddleOfNight => Self::MiddleOfNight,
            HighLatRule::SeventhOfNight => Self::SeventhOfNight,
            HighLatRule::AngleBased => Self::AngleBased,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

struct Place {
    label: Option<String>,
    coordinate: GeoCoordinate,
    timezone_hours: f64,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let place = resolve_place(&cli)?;
    let (profile_name, config) = build_config(&cli)?;
    let start = day_with_offset(cli.date.unwrap_or_else(today), cli.offset)
        .ok_or_else(|| anyhow!("date offset {} is out of range", cli.offset))?;

    let GeoCoordinate {
        latitude,
        longitude,
    } = place.coordinate;
    let hours = timetable_hours(
        latitude,
        longitude,
        start,
        cli.days,
        place.timezone_hours,
        &config,
    );
    if is_within_polar_circle(latitude) {
        warn!(
            latitude,
            "location is inside a polar circle; twilight and sunrise may not occur and \
             times can settle on the day boundaries"
        );
    } else {
        let unordered: Vec<NaiveDate> = hours
            .iter()
            .filter(|(_, day)| !day.is_ordered())
            .map(|(date, _)| *date)
            .collect();
        if let (Some(first), Some(last)) = (unordered.first(), unordered.last()) {
            warn!(
                days = unordered.len(),
                %first,
                %last,
                "prayer times are out of order for some dates at this location"
            );
        }
    }

    let days: Vec<PrayerTimesResult> = hours
        .into_iter()
        .map(|(date, day)| day.to_result(date))
        .collect();
    info!(
        days = days.len(),
        rule = config.high_latitude_rule.label(),
        "computed prayer times"
    );

    let mut out = writer_for_path(&cli.output)
        .with_context(|| format!("opening {}", cli.output.display()))?;
    match cli.format {
        OutputFormat::Table => write_table(&mut *out, &place, &days)?,
        OutputFormat::Csv => export_csv::write_all(&mut *out, &days)?,
        OutputFormat::Json => {
            let meta = export_json::Metadata {
                city: place.label.as_deref(),
                latitude,
                longitude,
                timezone_hours: place.timezone_hours,
                profile: &profile_name,
            };
            export_json::write_timetable(&mut *out, &meta, &config, &days)?;
        }
    }
    Ok(())
}

fn resolve_place(cli: &Cli) -> anyhow::Result<Place> {
    if let Some(name) = &cli.city {
        let city = lookup_city(&cli.cities, name)?;
        let coordinate = GeoCoordinate::new(city.latitude, city.longitude)
            .with_context(|| format!("catalog entry for {}", city.name))?;
        return Ok(Place {
            timezone_hours: cli.tz.unwrap_or(city.timezone_hours),
            label: Some(city.name),
            coordinate,
        });
    }
    match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => {
            let coordinate = GeoCoordinate::new(lat, lon)?;
            let timezone_hours = cli.tz.unwrap_or_else(|| {
                let guess = (lon / 15.0).round();
                info!(timezone_hours = guess, "no --tz given, using longitude / 15");
                guess
            });
            Ok(Place {
                label: None,
                coordinate,
                timezone_hours,
            })
        }
        _ => {
            let fix = resolve_location(&FixedLocation::unavailable());
            Ok(Place {
                label: Some(fix.city),
                coordinate: fix.coordinate,
                timezone_hours: cli.tz.unwrap_or(FALLBACK_TIMEZONE_HOURS),
            })
        }
    }
}

/// Profile file (or defaults) with command-line overrides, validated as a whole.
fn build_config(cli: &Cli) -> anyhow::Result<(String, CalculationConfig)> {
    let mut profile = match &cli.profile {
        Some(path) => load_profile(path)
            .with_context(|| format!("loading profile from {}", path.display()))?,
        None => CalculationProfile::default(),
    };
    if let Some(angle) = cli.fajr_angle {
        profile.fajr_angle = angle;
    }
    if let Some(angle) = cli.isha_angle {
        profile.isha_angle = angle;
    }
    if let Some(angle) = cli.maghrib_angle {
        profile.maghrib_angle = angle;
    }
    if let Some(factor) = cli.asr_factor {
        profile.asr_shadow_factor = factor;
    }
    if let Some(rule) = cli.high_lat_rule {
        profile.high_latitude_rule = rule.into();
    }
    let config = from_profile(&profile)
        .with_context(|| format!("invalid calculation profile '{}'", profile.name))?;
    Ok((profile.name, config))
}

fn write_table(out: &mut dyn Write, place: &Place, days: &[PrayerTimesResult]) -> io::Result<()> {
    writeln!(
        out,
        "{} ({:.4}, {:.4}), UTC{:+}",
        place.label.as_deref().unwrap_or("Custom location"),
        place.coordinate.latitude,
        place.coordinate.longitude,
        place.timezone_hours
    )?;
    for day in days {
        writeln!(out)?;
        writeln!(out, "{}", day.date.format("%A, %d %B %Y"))?;
        for (name, time) in day.entries() {
            writeln!(out, "  {name:<9}{time}")?;
        }
    }
    out.flush()
}
