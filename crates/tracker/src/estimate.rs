//! Automatic estimate of missed prayers since the age of religious obligation.

use std::fmt;

use chrono::{Months, NaiveDate};
use namaz_store::{SettingsStore, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::qaza::QazaPrayer;

pub const GENDER_KEY: &str = "auto_calc_gender";
pub const BIRTH_DATE_KEY: &str = "auto_calc_birth_date";
pub const START_DATE_KEY: &str = "auto_calc_prayer_start_date";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("prayer start date {start} is in the future (today is {today})")]
    StartInFuture { start: NaiveDate, today: NaiveDate },
    #[error("prayer start date cannot be today")]
    StartIsToday,
    #[error("{0} days is too long a span to count")]
    SpanTooLong(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Age in years at which daily prayers become obligatory.
    pub fn obligation_age(self) -> u32 {
        match self {
            Self::Male => 15,
            Self::Female => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First day of obligation. A February 29 birthday lands on February 28 in common years.
pub fn obligation_start(birth_date: NaiveDate, gender: Gender) -> Option<NaiveDate> {
    birth_date.checked_add_months(Months::new(gender.obligation_age() * 12))
}

/// Missed-prayer counts for every day in `[start, today)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QazaEstimate {
    pub start: NaiveDate,
    pub today: NaiveDate,
    pub days: u32,
    pub fajr: u32,
    pub dhuhr: u32,
    pub asr: u32,
    pub maghrib: u32,
    pub isha: u32,
    pub ramadan: u32,
    pub total_prayers: u64,
}

impl QazaEstimate {
    pub fn counts(&self) -> [(QazaPrayer, u32); 6] {
        [
            (QazaPrayer::Fajr, self.fajr),
            (QazaPrayer::Dhuhr, self.dhuhr),
            (QazaPrayer::Asr, self.asr),
            (QazaPrayer::Maghrib, self.maghrib),
            (QazaPrayer::Isha, self.isha),
            (QazaPrayer::Ramadan, self.ramadan),
        ]
    }
}

/// Count one of each daily prayer per elapsed day. Missed fasts are not estimated.
pub fn estimate_missed(start: NaiveDate, today: NaiveDate) -> Result<QazaEstimate, EstimateError> {
    if start > today {
        return Err(EstimateError::StartInFuture { start, today });
    }
    if start == today {
        return Err(EstimateError::StartIsToday);
    }
    let span = (today - start).num_days();
    let days = u32::try_from(span).map_err(|_| EstimateError::SpanTooLong(span))?;
    Ok(QazaEstimate {
        start,
        today,
        days,
        fajr: days,
        dhuhr: days,
        asr: days,
        maghrib: days,
        isha: days,
        ramadan: 0,
        total_prayers: u64::from(days) * 5,
    })
}

/// Inputs of the last automatic estimate, kept so the form can be pre-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AutoCalculation {
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub prayer_start_date: Option<NaiveDate>,
}

impl AutoCalculation {
    /// Record for a birth date, with the start date derived from the gender.
    pub fn from_birth_date(gender: Gender, birth_date: NaiveDate) -> Self {
        Self {
            gender,
            birth_date: Some(birth_date),
            prayer_start_date: obligation_start(birth_date, gender),
        }
    }

    /// Missing or unparsable entries load as defaults.
    pub fn load<S: SettingsStore>(store: &S) -> Self {
        let gender = store
            .get_string(GENDER_KEY, None)
            .and_then(|label| Gender::from_label(&label))
            .unwrap_or_default();
        Self {
            gender,
            birth_date: read_date(store, BIRTH_DATE_KEY),
            prayer_start_date: read_date(store, START_DATE_KEY),
        }
    }

    pub fn save<S: SettingsStore>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set_string(GENDER_KEY, self.gender.label())?;
        write_date(store, BIRTH_DATE_KEY, self.birth_date)?;
        write_date(store, START_DATE_KEY, self.prayer_start_date)?;
        debug!(gender = %self.gender, "saved auto-calculation inputs");
        Ok(())
    }
}

fn read_date<S: SettingsStore>(store: &S, key: &str) -> Option<NaiveDate> {
    let text = store.get_string(key, None)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).ok()
}

fn write_date<S: SettingsStore>(
    store: &mut S,
    key: &str,
    date: Option<NaiveDate>,
) -> Result<(), StoreError> {
    match date {
        Some(date) => store.set_string(key, &date.format(DATE_FORMAT).to_string()),
        None => store.remove(key).map(|_| ()),
    }
}
