//! Missed (Qaza) and travel (Safar) prayer counters.

use std::fmt;

use namaz_store::{SettingsStore, StoreError};
use serde::Serialize;
use tracing::{debug, info};

use crate::estimate::QazaEstimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum QazaPrayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    /// Missed Ramadan fasts.
    Ramadan,
}

impl QazaPrayer {
    pub const ALL: [QazaPrayer; 6] = [
        Self::Fajr,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
        Self::Ramadan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
            Self::Ramadan => "Ramadan",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|prayer| prayer.name().eq_ignore_ascii_case(name))
    }

    fn key(self) -> String {
        format!("qaza_{}", self.name())
    }
}

impl fmt::Display for QazaPrayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shortened prayers owed from travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SafarPrayer {
    Dhuhr,
    Asr,
    Isha,
}

impl SafarPrayer {
    pub const ALL: [SafarPrayer; 3] = [Self::Dhuhr, Self::Asr, Self::Isha];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dhuhr => "Safar Dhuhr",
            Self::Asr => "Safar Asr",
            Self::Isha => "Safar Isha",
        }
    }

    /// Accepts either `"Safar Asr"` or plain `"asr"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::ALL.into_iter().find(|prayer| {
            prayer.name().eq_ignore_ascii_case(trimmed)
                || prayer.name()["Safar ".len()..].eq_ignore_ascii_case(trimmed)
        })
    }

    fn key(self) -> String {
        format!("safar_{}", self.name())
    }
}

impl fmt::Display for SafarPrayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counter set persisted under `qaza_<Name>` and `safar_<Name>` keys.
#[derive(Debug)]
pub struct QazaTracker<S> {
    store: S,
}

impl<S: SettingsStore> QazaTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn count(&self, prayer: QazaPrayer) -> u32 {
        read_count(&self.store, &prayer.key())
    }

    pub fn set_count(&mut self, prayer: QazaPrayer, count: u32) -> Result<(), StoreError> {
        debug!(%prayer, count, "set qaza count");
        self.store.set_int(&prayer.key(), i64::from(count))
    }

    pub fn increment(&mut self, prayer: QazaPrayer) -> Result<u32, StoreError> {
        let next = self.count(prayer).saturating_add(1);
        self.set_count(prayer, next)?;
        Ok(next)
    }

    /// Never goes below zero.
    pub fn decrement(&mut self, prayer: QazaPrayer) -> Result<u32, StoreError> {
        let next = self.count(prayer).saturating_sub(1);
        self.set_count(prayer, next)?;
        Ok(next)
    }

    pub fn safar_count(&self, prayer: SafarPrayer) -> u32 {
        read_count(&self.store, &prayer.key())
    }

    pub fn set_safar_count(&mut self, prayer: SafarPrayer, count: u32) -> Result<(), StoreError> {
        debug!(%prayer, count, "set safar count");
        self.store.set_int(&prayer.key(), i64::from(count))
    }

    pub fn increment_safar(&mut self, prayer: SafarPrayer) -> Result<u32, StoreError> {
        let next = self.safar_count(prayer).saturating_add(1);
        self.set_safar_count(prayer, next)?;
        Ok(next)
    }

    pub fn decrement_safar(&mut self, prayer: SafarPrayer) -> Result<u32, StoreError> {
        let next = self.safar_count(prayer).saturating_sub(1);
        self.set_safar_count(prayer, next)?;
        Ok(next)
    }

    pub fn all_counts(&self) -> Vec<(QazaPrayer, u32)> {
        QazaPrayer::ALL
            .into_iter()
            .map(|prayer| (prayer, self.count(prayer)))
            .collect()
    }

    pub fn all_safar_counts(&self) -> Vec<(SafarPrayer, u32)> {
        SafarPrayer::ALL
            .into_iter()
            .map(|prayer| (prayer, self.safar_count(prayer)))
            .collect()
    }

    /// Sum of every Qaza and Safar counter.
    pub fn total(&self) -> u64 {
        let qaza: u64 = self.all_counts().iter().map(|(_, n)| u64::from(*n)).sum();
        let safar: u64 = self
            .all_safar_counts()
            .iter()
            .map(|(_, n)| u64::from(*n))
            .sum();
        qaza + safar
    }

    /// Zero every Qaza and Safar counter. Other keys are left alone.
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        for prayer in QazaPrayer::ALL {
            self.set_count(prayer, 0)?;
        }
        for prayer in SafarPrayer::ALL {
            self.set_safar_count(prayer, 0)?;
        }
        info!("qaza counters reset");
        Ok(())
    }

    /// Replace the six Qaza counters with an estimate's values.
    pub fn apply_estimate(&mut self, estimate: &QazaEstimate) -> Result<(), StoreError> {
        for (prayer, count) in estimate.counts() {
            self.set_count(prayer, count)?;
        }
        info!(
            days = estimate.days,
            total = estimate.total_prayers,
            "applied qaza estimate"
        );
        Ok(())
    }
}

fn read_count<S: SettingsStore>(store: &S, key: &str) -> u32 {
    u32::try_from(store.get_int(key, 0).max(0)).unwrap_or(u32::MAX)
}
