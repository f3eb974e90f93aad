//! Prayer-time engine and companion tools for Shia daily worship.
//!
//! The focused crates under `crates/` are re-exported here so front-ends can
//! depend on a single library.

pub use namaz_config as config;
pub use namaz_core as core;
pub use namaz_export as export;
pub use namaz_location as location;
pub use namaz_prayer as prayer;
pub use namaz_qibla as qibla;
pub use namaz_quran as quran;
pub use namaz_store as store;
pub use namaz_tracker as tracker;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
