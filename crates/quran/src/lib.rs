//! Quran content: chapter list, Arabic text, and English translation.
//!
//! [`AlQuranCloudClient`] talks to the public alquran.cloud API. [`BundledContent`]
//! serves a handful of chapters offline, and [`WithFallback`] combines the two.

pub mod bundled;
pub mod client;
pub mod model;

pub use bundled::BundledContent;
pub use client::{AlQuranCloudClient, DEFAULT_BASE_URL};
pub use model::{Chapter, Verse};

use thiserror::Error;
use tracing::warn;

/// Number of chapters (surahs) in the Quran.
pub const CHAPTER_COUNT: u32 = 114;

#[derive(Debug, Error)]
pub enum QuranError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API returned {code}: {status}")]
    Api { code: u16, status: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("chapter {0} does not exist (expected 1-114)")]
    InvalidChapter(u32),
}

pub type Result<T> = std::result::Result<T, QuranError>;

pub trait QuranContentProvider {
    fn list_chapters(&self) -> Result<Vec<Chapter>>;
    fn chapter_text(&self, chapter: u32) -> Result<Vec<Verse>>;
    fn chapter_translation(&self, chapter: u32) -> Result<Vec<Verse>>;
}

pub fn check_chapter(chapter: u32) -> Result<u32> {
    if (1..=CHAPTER_COUNT).contains(&chapter) {
        Ok(chapter)
    } else {
        Err(QuranError::InvalidChapter(chapter))
    }
}

/// Serves from `primary`, answering from [`BundledContent`] whenever it fails.
///
/// Invalid chapter numbers are reported rather than papered over.
#[derive(Debug)]
pub struct WithFallback<P> {
    primary: P,
    bundled: BundledContent,
}

impl<P: QuranContentProvider> WithFallback<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            bundled: BundledContent,
        }
    }
}

impl<P: QuranContentProvider> QuranContentProvider for WithFallback<P> {
    fn list_chapters(&self) -> Result<Vec<Chapter>> {
        self.primary.list_chapters().or_else(|err| {
            warn!(error = %err, "chapter list unavailable, using bundled chapters");
            self.bundled.list_chapters()
        })
    }

    fn chapter_text(&self, chapter: u32) -> Result<Vec<Verse>> {
        check_chapter(chapter)?;
        self.primary.chapter_text(chapter).or_else(|err| {
            warn!(chapter, error = %err, "chapter text unavailable, using bundled text");
            self.bundled.chapter_text(chapter)
        })
    }

    fn chapter_translation(&self, chapter: u32) -> Result<Vec<Verse>> {
        check_chapter(chapter)?;
        self.primary.chapter_translation(chapter).or_else(|err| {
            warn!(chapter, error = %err, "translation unavailable, using bundled translation");
            self.bundled.chapter_translation(chapter)
        })
    }
}
