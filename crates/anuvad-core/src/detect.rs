//! Language detection: whatlang first, Unicode script ranges as the
//! deterministic fallback. Never fails on non-empty input.

use anuvad_types::Language;
use whatlang::{Detector, Lang};

/// Fixed confidence for the script-range path, kept below the statistical
/// range so the two paths stay distinguishable in logs and tests.
pub const SCRIPT_FALLBACK_CONFIDENCE: f32 = 0.5;

const ENGLISH_STOP_WORDS: [&str; 10] = [
    "the", "and", "is", "in", "to", "of", "for", "with", "on", "at",
];

/// Script blocks checked in fixed priority order.
const SCRIPT_RANGES: [(char, char, Language); 10] = [
    ('\u{0900}', '\u{097F}', Language::Hi), // Devanagari
    ('\u{0980}', '\u{09FF}', Language::Bn), // Bengali
    ('\u{0A00}', '\u{0A7F}', Language::Pa), // Gurmukhi
    ('\u{0A80}', '\u{0AFF}', Language::Gu), // Gujarati
    ('\u{0B00}', '\u{0B7F}', Language::Or), // Oriya
    ('\u{0B80}', '\u{0BFF}', Language::Ta), // Tamil
    ('\u{0C00}', '\u{0C7F}', Language::Te), // Telugu
    ('\u{0C80}', '\u{0CFF}', Language::Kn), // Kannada
    ('\u{0D00}', '\u{0D7F}', Language::Ml), // Malayalam
    ('\u{0600}', '\u{06FF}', Language::Ur), // Arabic
];

#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("cannot detect language of empty text")]
    EmptyText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    Statistical,
    Script,
}

#[derive(Debug, Clone)]
pub struct Detection {
    pub language: Language,
    pub confidence: f32,
    pub method: DetectionMethod,
}

pub struct LanguageDetector {
    detector: Option<Detector>,
}

impl LanguageDetector {
    pub fn new() -> Self {
        tracing::info!("initializing statistical language detector");
        Self {
            detector: Some(Detector::new()),
        }
    }

    /// Script heuristics only. Used when the statistical backend is disabled
    /// and to pin down the fallback path in tests.
    pub fn script_only() -> Self {
        Self { detector: None }
    }

    pub fn detect(&self, text: &str) -> Result<Detection, DetectError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DetectError::EmptyText);
        }

        if let Some(detector) = &self.detector
            && let Some(info) = detector.detect(text)
            && let Some(language) = map_lang(info.lang())
        {
            return Ok(Detection {
                language,
                confidence: info.confidence() as f32,
                method: DetectionMethod::Statistical,
            });
        }

        let language = script_detect(text);
        tracing::debug!(%language, "statistical detection unavailable, using script ranges");
        Ok(Detection {
            language,
            confidence: SCRIPT_FALLBACK_CONFIDENCE,
            method: DetectionMethod::Script,
        })
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Map whatlang output onto the supported set. Assamese and Sanskrit are not
/// in whatlang's inventory, they come out of the script fallback as bn/hi.
fn map_lang(lang: Lang) -> Option<Language> {
    match lang {
        Lang::Eng => Some(Language::En),
        Lang::Hin => Some(Language::Hi),
        Lang::Ben => Some(Language::Bn),
        Lang::Guj => Some(Language::Gu),
        Lang::Kan => Some(Language::Kn),
        Lang::Mal => Some(Language::Ml),
        Lang::Mar => Some(Language::Mr),
        Lang::Ori => Some(Language::Or),
        Lang::Pan => Some(Language::Pa),
        Lang::Tam => Some(Language::Ta),
        Lang::Tel => Some(Language::Te),
        Lang::Urd => Some(Language::Ur),
        Lang::Nep => Some(Language::Ne),
        _ => None,
    }
}

fn script_detect(text: &str) -> Language {
    let lower = text.to_lowercase();
    if lower
        .split_whitespace()
        .any(|word| ENGLISH_STOP_WORDS.contains(&word))
    {
        return Language::En;
    }

    for (start, end, language) in SCRIPT_RANGES {
        if text
            .chars()
            .any(|c| (start..=end).contains(&c) && !is_shared_punctuation(c))
        {
            return language;
        }
    }

    Language::En
}

/// Danda and double danda sit in the Devanagari block but terminate
/// sentences in Bengali, Odia and most other Indic scripts too. They carry
/// no signal for the priority scan.
fn is_shared_punctuation(c: char) -> bool {
    c == '\u{0964}' || c == '\u{0965}'
}
