use std::path::PathBuf;

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use namaz_cli::{DEFAULT_STORE_PATH, init_tracing, open_store, parse_date, today};
use namaz_shia::store::SettingsStore;
use namaz_shia::tracker::{
    AutoCalculation, Gender, QazaPrayer, QazaTracker, SafarPrayer, estimate_missed,
};

/// Track missed (Qaza) and travel (Safar) prayers.
#[derive(Parser, Debug)]
#[command(author, version, about = "Missed-prayer tracker")]
struct Cli {
    /// Settings file holding the counters
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every counter
    Show,
    /// Set a counter to an exact value
    Set {
        prayer: String,
        count: u32,
        /// Address the Safar counter of that prayer
        #[arg(long)]
        safar: bool,
    },
    /// Add to a counter
    Add {
        prayer: String,
        #[arg(default_value_t = 1)]
        count: u32,
        #[arg(long)]
        safar: bool,
    },
    /// Mark prayers as made up; never goes below zero
    Remove {
        prayer: String,
        #[arg(default_value_t = 1)]
        count: u32,
        #[arg(long)]
        safar: bool,
    },
    /// Zero every counter
    Reset,
    /// Estimate missed prayers since the age of obligation
    Estimate {
        /// Birth date (YYYY-MM-DD); the start date follows from gender
        #[arg(long, value_parser = parse_date, required_unless_present = "start")]
        birth_date: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = GenderArg::Male)]
        gender: GenderArg,
        /// Explicit start date (YYYY-MM-DD), overriding the birth date
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// Reference date; defaults to today
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
        /// Replace the counters with the estimate
        #[arg(long)]
        apply: bool,
    },
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

enum Counter {
    Qaza(QazaPrayer),
    Safar(SafarPrayer),
}

fn counter(name: &str, safar: bool) -> anyhow::Result<Counter> {
    if safar {
        SafarPrayer::from_name(name)
            .map(Counter::Safar)
            .ok_or_else(|| anyhow!("'{name}' is not a Safar prayer (dhuhr, asr, isha)"))
    } else {
        QazaPrayer::from_name(name)
            .map(Counter::Qaza)
            .ok_or_else(|| anyhow!("'{name}' is not one of fajr, dhuhr, asr, maghrib, isha, ramadan"))
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut tracker = QazaTracker::new(open_store(&cli.store)?);

    match cli.command {
        Command::Show => {}
        Command::Set {
            prayer,
            count,
            safar,
        } => match counter(&prayer, safar)? {
            Counter::Qaza(prayer) => tracker.set_count(prayer, count)?,
            Counter::Safar(prayer) => tracker.set_safar_count(prayer, count)?,
        },
        Command::Add {
            prayer,
            count,
            safar,
        } => match counter(&prayer, safar)? {
            Counter::Qaza(prayer) => {
                let total = tracker.count(prayer).saturating_add(count);
                tracker.set_count(prayer, total)?;
            }
            Counter::Safar(prayer) => {
                let total = tracker.safar_count(prayer).saturating_add(count);
                tracker.set_safar_count(prayer, total)?;
            }
        },
        Command::Remove {
            prayer,
            count,
            safar,
        } => match counter(&prayer, safar)? {
            Counter::Qaza(prayer) => {
                let total = tracker.count(prayer).saturating_sub(count);
                tracker.set_count(prayer, total)?;
            }
            Counter::Safar(prayer) => {
                let total = tracker.safar_count(prayer).saturating_sub(count);
                tracker.set_safar_count(prayer, total)?;
            }
        },
        Command::Reset => tracker.reset_all()?,
        Command::Estimate {
            birth_date,
            gender,
            start,
            today: reference,
            apply,
        } => {
            let gender = Gender::from(gender);
            let record = match (start, birth_date) {
                (Some(start), birth_date) => AutoCalculation {
                    gender,
                    birth_date,
                    prayer_start_date: Some(start),
                },
                (None, Some(birth)) => AutoCalculation::from_birth_date(gender, birth),
                (None, None) => bail!("either --birth-date or --start is required"),
            };
            let start = record
                .prayer_start_date
                .ok_or_else(|| anyhow!("obligation start date is out of range"))?;
            let estimate = estimate_missed(start, reference.unwrap_or_else(today))?;

            let mut store = tracker.into_inner();
            record.save(&mut store)?;
            tracker = QazaTracker::new(store);

            println!("Prayers owed since {start}");
            println!("  days          {}", estimate.days);
            for (prayer, count) in estimate.counts() {
                println!("  {:<14}{count}", prayer.name());
            }
            println!("  total prayers {}", estimate.total_prayers);
            if !apply {
                return Ok(());
            }
            tracker.apply_estimate(&estimate)?;
            println!();
        }
    }

    print_counts(&tracker);
    Ok(())
}

fn print_counts<S: SettingsStore>(tracker: &QazaTracker<S>) {
    println!("Qaza");
    for (prayer, count) in tracker.all_counts() {
        println!("  {:<14}{count}", prayer.name());
    }
    println!("Safar");
    for (prayer, count) in tracker.all_safar_counts() {
        println!("  {:<14}{count}", prayer.name());
    }
    println!("Total           {}", tracker.total());
}
