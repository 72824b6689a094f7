use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the translation models can route.
///
/// The set is fixed: Indic languages covered by the IndicTrans2 model pair
/// plus English, which doubles as the pivot for Indic-to-Indic requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Bn,
    Gu,
    Kn,
    Ml,
    Mr,
    Or,
    Pa,
    Ta,
    Te,
    Ur,
    As,
    Ne,
    Sa,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LanguageError {
    #[error("unsupported language code: {0}")]
    Unsupported(String),
}

impl Language {
    pub const ALL: [Language; 15] = [
        Language::En,
        Language::Hi,
        Language::Bn,
        Language::Gu,
        Language::Kn,
        Language::Ml,
        Language::Mr,
        Language::Or,
        Language::Pa,
        Language::Ta,
        Language::Te,
        Language::Ur,
        Language::As,
        Language::Ne,
        Language::Sa,
    ];

    /// ISO 639-1 code (639-2 where no two-letter code exists).
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
            Language::Gu => "gu",
            Language::Kn => "kn",
            Language::Ml => "ml",
            Language::Mr => "mr",
            Language::Or => "or",
            Language::Pa => "pa",
            Language::Ta => "ta",
            Language::Te => "te",
            Language::Ur => "ur",
            Language::As => "as",
            Language::Ne => "ne",
            Language::Sa => "sa",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Bn => "Bengali",
            Language::Gu => "Gujarati",
            Language::Kn => "Kannada",
            Language::Ml => "Malayalam",
            Language::Mr => "Marathi",
            Language::Or => "Odia",
            Language::Pa => "Punjabi",
            Language::Ta => "Tamil",
            Language::Te => "Telugu",
            Language::Ur => "Urdu",
            Language::As => "Assamese",
            Language::Ne => "Nepali",
            Language::Sa => "Sanskrit",
        }
    }

    /// Flores-200 tag used by the IndicTrans2 checkpoints.
    pub fn flores(self) -> &'static str {
        match self {
            Language::En => "eng_Latn",
            Language::Hi => "hin_Deva",
            Language::Bn => "ben_Beng",
            Language::Gu => "guj_Gujr",
            Language::Kn => "kan_Knda",
            Language::Ml => "mal_Mlym",
            Language::Mr => "mar_Deva",
            Language::Or => "ory_Orya",
            Language::Pa => "pan_Guru",
            Language::Ta => "tam_Taml",
            Language::Te => "tel_Telu",
            Language::Ur => "urd_Arab",
            Language::As => "asm_Beng",
            Language::Ne => "nep_Deva",
            Language::Sa => "san_Deva",
        }
    }

    pub fn is_english(self) -> bool {
        self == Language::En
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| LanguageError::Unsupported(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
