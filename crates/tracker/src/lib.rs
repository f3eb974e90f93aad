//! Persistent worship counters built on a [`namaz_store::SettingsStore`].

pub mod estimate;
pub mod qaza;
pub mod tasbeeh;

pub use estimate::{AutoCalculation, EstimateError, Gender, QazaEstimate, estimate_missed};
pub use qaza::{QazaPrayer, QazaTracker, SafarPrayer};
pub use tasbeeh::{PHASES, TapOutcome, TasbeehCounter, TasbeehPhase};
