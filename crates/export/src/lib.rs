//! Export helpers for CSV and JSON timetables.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod timetable {
    use std::io::{self, Write};

    use namaz_prayer::PrayerTimesResult;

    pub const HEADER: &str = "date,fajr,sunrise,dhuhr,asr,sunset,maghrib,isha,midnight";

    /// Write the standard timetable CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row for one day, columns in header order.
    #[derive(Debug, Clone, Copy)]
    pub struct Row<'a>(pub &'a PrayerTimesResult);

    impl Row<'_> {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let day = self.0;
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{}",
                day.date.format("%Y-%m-%d"),
                day.fajr,
                day.sunrise,
                day.dhuhr,
                day.asr,
                day.sunset,
                day.maghrib,
                day.isha,
                day.midnight,
            )
        }
    }

    /// Header followed by one row per day.
    pub fn write_all(writer: &mut dyn Write, days: &[PrayerTimesResult]) -> io::Result<()> {
        write_header(writer)?;
        for day in days {
            Row(day).write_to(writer)?;
        }
        writer.flush()
    }
}

pub mod json {
    use std::io::{self, Write};

    use namaz_prayer::{CalculationConfig, PrayerTimesResult};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Where and how a timetable was computed.
    #[derive(Debug, Clone, Serialize)]
    pub struct Metadata<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub city: Option<&'a str>,
        pub latitude: f64,
        pub longitude: f64,
        pub timezone_hours: f64,
        pub profile: &'a str,
    }

    #[derive(Serialize)]
    struct TimetableDocument<'a> {
        #[serde(flatten)]
        location: &'a Metadata<'a>,
        config: &'a CalculationConfig,
        days: &'a [PrayerTimesResult],
    }

    pub fn write_timetable(
        writer: &mut dyn Write,
        meta: &Metadata<'_>,
        config: &CalculationConfig,
        days: &[PrayerTimesResult],
    ) -> io::Result<()> {
        let document = TimetableDocument {
            location: meta,
            config,
            days,
        };
        to_writer_pretty(&mut *writer, &document)?;
        writeln!(writer)?;
        writer.flush()
    }
}
