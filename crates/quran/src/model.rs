//! Chapter and verse records plus the alquran.cloud response envelope.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{QuranError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    /// Arabic name.
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    /// `Meccan` or `Medinan`.
    pub revelation_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// Position in the whole Quran.
    pub number: u32,
    pub text: String,
    pub number_in_surah: u32,
    #[serde(default)]
    pub juz: Option<u32>,
    #[serde(default)]
    pub manzil: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub ruku: Option<u32>,
    #[serde(default)]
    pub hizb_quarter: Option<u32>,
    /// The API sends `false` or a detail object for prostration verses.
    #[serde(default, deserialize_with = "sajda_flag")]
    pub sajda: bool,
}

impl Verse {
    pub(crate) fn bare(number: u32, text: &str) -> Self {
        Self {
            number,
            text: text.to_string(),
            number_in_surah: number,
            juz: None,
            manzil: None,
            page: None,
            ruku: None,
            hizb_quarter: None,
            sajda: false,
        }
    }
}

fn sajda_flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Null => false,
        _ => true,
    })
}

#[derive(Debug, Deserialize)]
struct Envelope {
    code: u16,
    status: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct Meta {
    surahs: MetaChapters,
}

#[derive(Debug, Deserialize)]
struct MetaChapters {
    references: Vec<Chapter>,
}

#[derive(Debug, Deserialize)]
struct ChapterBody {
    ayahs: Vec<Verse>,
}

fn unwrap_envelope(body: &str) -> Result<Value> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.code != 200 {
        return Err(QuranError::Api {
            code: envelope.code,
            status: envelope.status,
        });
    }
    Ok(envelope.data)
}

/// Decode a `/meta` response into the chapter list.
pub fn parse_chapters(body: &str) -> Result<Vec<Chapter>> {
    let meta: Meta = serde_json::from_value(unwrap_envelope(body)?)?;
    Ok(meta.surahs.references)
}

/// Decode a `/surah/{n}/{edition}` response into its verses.
pub fn parse_verses(body: &str) -> Result<Vec<Verse>> {
    let chapter: ChapterBody = serde_json::from_value(unwrap_envelope(body)?)?;
    Ok(chapter.ayahs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = r#"{
        "code": 200,
        "status": "OK",
        "data": {
            "ayahs": {"count": 6236},
            "surahs": {
                "count": 114,
                "references": [
                    {"number": 1, "name": "سُورَةُ ٱلْفَاتِحَةِ", "englishName": "Al-Faatiha",
                     "englishNameTranslation": "The Opening", "numberOfAyahs": 7, "revelationType": "Meccan"},
                    {"number": 2, "name": "سُورَةُ البَقَرَةِ", "englishName": "Al-Baqara",
                     "englishNameTranslation": "The Cow", "numberOfAyahs": 286, "revelationType": "Medinan"}
                ]
            }
        }
    }"#;

    const SURAH: &str = r#"{
        "code": 200,
        "status": "OK",
        "data": {
            "number": 96,
            "englishName": "Al-Alaq",
            "ayahs": [
                {"number": 6107, "text": "In the name of Allah", "numberInSurah": 1, "juz": 30,
                 "manzil": 7, "page": 597, "ruku": 538, "hizbQuarter": 240, "sajda": false},
                {"number": 6125, "text": "No! Do not obey him.", "numberInSurah": 19, "juz": 30,
                 "manzil": 7, "page": 598, "ruku": 538, "hizbQuarter": 240,
                 "sajda": {"id": 15, "recommended": false, "obligatory": true}}
            ]
        }
    }"#;

    #[test]
    fn chapter_list_parses_references() {
        let chapters = parse_chapters(META).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1].english_name, "Al-Baqara");
        assert_eq!(chapters[1].number_of_ayahs, 286);
    }

    #[test]
    fn sajda_accepts_flag_or_object() {
        let verses = parse_verses(SURAH).unwrap();
        assert!(!verses[0].sajda);
        assert!(verses[1].sajda);
        assert_eq!(verses[1].number_in_surah, 19);
        assert_eq!(verses[1].hizb_quarter, Some(240));
    }

    #[test]
    fn non_200_code_is_an_api_error() {
        let body = r#"{"code": 404, "status": "NOT FOUND", "data": "Surah not found"}"#;
        match parse_verses(body) {
            Err(QuranError::Api { code, status }) => {
                assert_eq!(code, 404);
                assert_eq!(status, "NOT FOUND");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(parse_chapters("<html>"), Err(QuranError::Decode(_))));
    }
}
