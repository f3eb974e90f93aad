//! Blocking HTTP client for api.alquran.cloud.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::model::{Chapter, Verse, parse_chapters, parse_verses};
use crate::{QuranContentProvider, QuranError, Result, check_chapter};

pub const DEFAULT_BASE_URL: &str = "https://api.alquran.cloud/v1";
pub const ARABIC_EDITION: &str = "quran-uthmani";
pub const TRANSLATION_EDITION: &str = "en.sahih";

const TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "NamazShia/1.0";

#[derive(Debug, Clone)]
pub struct AlQuranCloudClient {
    client: Client,
    base_url: String,
}

impl AlQuranCloudClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(TIMEOUT)
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use a preconfigured client, e.g. one with custom proxy settings.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "requesting quran content");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuranError::Api {
                code: status.as_u16(),
                status: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }
        Ok(response.text()?)
    }

    fn edition(&self, chapter: u32, edition: &str) -> Result<Vec<Verse>> {
        let chapter = check_chapter(chapter)?;
        let verses = parse_verses(&self.fetch(&format!("surah/{chapter}/{edition}"))?)?;
        debug!(chapter, edition, verses = verses.len(), "loaded chapter");
        Ok(verses)
    }
}

impl QuranContentProvider for AlQuranCloudClient {
    fn list_chapters(&self) -> Result<Vec<Chapter>> {
        let chapters = parse_chapters(&self.fetch("meta")?)?;
        debug!(chapters = chapters.len(), "loaded chapter list");
        Ok(chapters)
    }

    fn chapter_text(&self, chapter: u32) -> Result<Vec<Verse>> {
        self.edition(chapter, ARABIC_EDITION)
    }

    fn chapter_translation(&self, chapter: u32) -> Result<Vec<Verse>> {
        self.edition(chapter, TRANSLATION_EDITION)
    }
}
