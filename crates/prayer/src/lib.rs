//! Prayer-time engine crate: solar position, altitude search, and the daily calculator.

pub mod engine;
pub mod profile;
pub mod rules;
pub mod search;
pub mod solar;
pub mod timetable;

pub use engine::{PrayerHours, PrayerTimesResult, calculate, calculate_for, calculate_hours};
pub use profile::{ProfileError, from_profile};
pub use rules::{CalculationConfig, HighLatitudeRule};
pub use timetable::{day_with_offset, timetable, timetable_hours};
