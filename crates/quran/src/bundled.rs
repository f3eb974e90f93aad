//! Offline content shipped with the crate.

use crate::model::{Chapter, Verse};
use crate::{QuranContentProvider, Result, check_chapter};

const BISMILLAH_AR: &str = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";
const BISMILLAH_EN: &str = "In the name of Allah, the Entirely Merciful, the Especially Merciful.";

const CHAPTERS: [(u32, &str, &str, &str, u32, &str); 6] = [
    (1, "سُورَةُ ٱلْفَاتِحَةِ", "Al-Faatiha", "The Opening", 7, "Meccan"),
    (2, "سُورَةُ البَقَرَةِ", "Al-Baqara", "The Cow", 286, "Medinan"),
    (3, "سُورَةُ آلِ عِمْرَانَ", "Aal-i-Imraan", "The Family of Imraan", 200, "Medinan"),
    (112, "سُورَةُ الإِخْلاصِ", "Al-Ikhlaas", "Sincerity", 4, "Meccan"),
    (113, "سُورَةُ الفَلَقِ", "Al-Falaq", "The Dawn", 5, "Meccan"),
    (114, "سُورَةُ النَّاسِ", "An-Naas", "Mankind", 6, "Meccan"),
];

const FATIHA_AR: [&str; 7] = [
    BISMILLAH_AR,
    "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ",
    "الرَّحْمَٰنِ الرَّحِيمِ",
    "مَالِكِ يَوْمِ الدِّينِ",
    "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ",
    "اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ",
    "صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ",
];

const FATIHA_EN: [&str; 7] = [
    BISMILLAH_EN,
    "[All] praise is [due] to Allah, Lord of the worlds -",
    "The Entirely Merciful, the Especially Merciful,",
    "Sovereign of the Day of Recompense.",
    "It is You we worship and You we ask for help.",
    "Guide us to the straight path -",
    "The path of those upon whom You have bestowed favor, not of those who have evoked [Your] anger or of those who are astray.",
];

const IKHLAS_AR: [&str; 4] = [
    "قُلْ هُوَ اللَّهُ أَحَدٌ",
    "اللَّهُ الصَّمَدُ",
    "لَمْ يَلِدْ وَلَمْ يُولَدْ",
    "وَلَمْ يَكُن لَّهُ كُفُوًا أَحَدٌ",
];

const IKHLAS_EN: [&str; 4] = [
    "Say, \"He is Allah, [who is] One,",
    "Allah, the Eternal Refuge.",
    "He neither begets nor is born,",
    "Nor is there to Him any equivalent.\"",
];

/// Al-Fatiha and Al-Ikhlas in full; any other chapter yields the Bismillah alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledContent;

fn verses(lines: &[&str]) -> Vec<Verse> {
    lines
        .iter()
        .zip(1..)
        .map(|(text, number)| Verse::bare(number, text))
        .collect()
}

impl QuranContentProvider for BundledContent {
    fn list_chapters(&self) -> Result<Vec<Chapter>> {
        Ok(CHAPTERS
            .iter()
            .map(
                |&(number, name, english_name, translation, ayahs, revelation)| Chapter {
                    number,
                    name: name.to_string(),
                    english_name: english_name.to_string(),
                    english_name_translation: translation.to_string(),
                    number_of_ayahs: ayahs,
                    revelation_type: revelation.to_string(),
                },
            )
            .collect())
    }

    fn chapter_text(&self, chapter: u32) -> Result<Vec<Verse>> {
        Ok(match check_chapter(chapter)? {
            1 => verses(&FATIHA_AR),
            112 => verses(&IKHLAS_AR),
            _ => verses(&[BISMILLAH_AR]),
        })
    }

    fn chapter_translation(&self, chapter: u32) -> Result<Vec<Verse>> {
        Ok(match check_chapter(chapter)? {
            1 => verses(&FATIHA_EN),
            112 => verses(&IKHLAS_EN),
            _ => verses(&[BISMILLAH_EN]),
        })
    }
}
