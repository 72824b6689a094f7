use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Which pathway produced a translation. Serialized as a lowercase string so
/// stored rows and API payloads stay greppable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelLabel {
    /// Source equals target, no model invoked.
    Identity,
    /// Single direct hop through the primary model.
    Primary,
    /// Two-hop English pivot through the primary model.
    Pivot,
    /// Fixed-dictionary hit after the primary model failed.
    Fallback,
    /// Deterministic placeholder, the cascade's last resort.
    Mock,
}

impl ModelLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelLabel::Identity => "identity",
            ModelLabel::Primary => "primary",
            ModelLabel::Pivot => "pivot",
            ModelLabel::Fallback => "fallback",
            ModelLabel::Mock => "mock",
        }
    }
}

impl FromStr for ModelLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" => Ok(ModelLabel::Identity),
            "primary" => Ok(ModelLabel::Primary),
            "pivot" => Ok(ModelLabel::Pivot),
            "fallback" => Ok(ModelLabel::Fallback),
            "mock" => Ok(ModelLabel::Mock),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

impl fmt::Display for ModelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown model label: {0}")]
pub struct UnknownLabel(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    /// Detection runs first when absent.
    #[serde(default)]
    pub source: Option<Language>,
    pub target: Language,
}

/// Output of the routing/cascade core. Confidence is always populated,
/// degraded pathways get their fixed per-label constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub source: Language,
    pub target: Language,
    pub confidence: f32,
    pub model_label: ModelLabel,
}

/// API-facing translation response, result plus the persisted row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translated_text: String,
    pub source_language: Language,
    pub target_language: Language,
    pub confidence: f32,
    pub model_label: ModelLabel,
    pub translation_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResponse {
    pub language: Language,
    pub confidence: f32,
    pub language_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionReceipt {
    pub correction_id: i64,
    pub status: String,
}

/// A persisted translation with its correction, if one was submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub id: i64,
    pub original_text: String,
    pub translated_text: String,
    pub source_language: Language,
    pub target_language: Language,
    pub model_confidence: f32,
    pub model_label: ModelLabel,
    pub created_at: DateTime<Utc>,
    pub corrected_text: Option<String>,
    pub correction_feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagePairCount {
    pub source: Language,
    pub target: Language,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    pub total_translations: u64,
    pub total_corrections: u64,
    /// Translations created in the last seven days.
    pub recent_translations: u64,
    pub language_pairs: Vec<LanguagePairCount>,
}

/// Corrected pair suitable for model fine-tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    pub original_text: String,
    pub source_language: Language,
    pub target_language: Language,
    pub corrected_text: String,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Seller-facing product entry with translatable text fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub seller_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedCatalogItem {
    pub original_item: CatalogItem,
    pub translated_title: String,
    pub translated_description: String,
    pub translated_category: Option<String>,
    pub source_language: Language,
    pub target_language: Language,
    /// Field name to stored translation id, for later correction.
    pub translation_ids: HashMap<String, i64>,
}
