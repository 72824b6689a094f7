//! Translation engine interface and the mock implementation used for
//! development and as the cascade's guaranteed last resort.

use std::collections::HashMap;

use anuvad_types::{Language, ModelLabel};
use async_trait::async_trait;

/// Fixed confidence attached to mock results.
pub const MOCK_CONFIDENCE: f32 = 0.75;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine api error: {0}")]
    Api(String),

    #[error("engine unavailable: {0}")]
    Unavailable(String),

    // Field must not be named `source`, thiserror would treat it as the
    // error's source() and require Language: std::error::Error
    #[error("invalid hop {from} -> {to}: one side must be English")]
    InvalidHop { from: Language, to: Language },
}

/// One model invocation: text out, confidence out.
#[derive(Debug, Clone)]
pub struct Hop {
    pub text: String,
    pub confidence: f32,
}

/// A single en↔X model direction. The router owns language-pair logic and
/// only ever asks an engine for hops with English on one side.
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    async fn translate_hop(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Hop, EngineError>;

    /// Short identifier for logs.
    fn label(&self) -> &'static str;

    /// Label a direct hop through this engine should carry in stored results.
    /// Engines that do not run a real model override this so persisted rows
    /// stay distinguishable from model output.
    fn result_label(&self) -> ModelLabel {
        ModelLabel::Primary
    }
}

/// Deterministic placeholder for texts no dictionary entry covers.
pub fn placeholder(text: &str, target: Language) -> String {
    format!("[{} translation] {}", target.name(), text)
}

/// Typed mapping from (text, source, target) to a canned translation.
#[derive(Debug, Default)]
pub struct MockDictionary {
    entries: HashMap<(String, Language, Language), String>,
}

impl MockDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo entries covering the en↔hi, en↔bn and en↔ta sample sentences.
    pub fn with_builtin() -> Self {
        let mut dict = Self::new();
        dict.insert(
            "Hello, this is a test translation.",
            Language::En,
            Language::Hi,
            "नमस्ते, यह एक परीक्षण अनुवाद है।",
        );
        dict.insert(
            "नमस्ते, यह एक परीक्षण अनुवाद है।",
            Language::Hi,
            Language::En,
            "Hello, this is a test translation.",
        );
        dict.insert(
            "Hello, this is a test translation.",
            Language::En,
            Language::Bn,
            "হ্যালো, এটি একটি পরীক্ষা অনুবাদ।",
        );
        dict.insert(
            "হ্যালো, এটি একটি পরীক্ষা অনুবাদ।",
            Language::Bn,
            Language::En,
            "Hello, this is a test translation.",
        );
        dict.insert(
            "Hello, this is a test translation.",
            Language::En,
            Language::Ta,
            "வணக்கம், இது ஒரு சோதனை மொழிபெயர்ப்பு.",
        );
        dict.insert(
            "வணக்கம், இது ஒரு சோதனை மொழிபெயர்ப்பு.",
            Language::Ta,
            Language::En,
            "Hello, this is a test translation.",
        );
        dict
    }

    pub fn insert(&mut self, text: &str, source: Language, target: Language, translation: &str) {
        self.entries
            .insert((text.to_string(), source, target), translation.to_string());
    }

    pub fn lookup(&self, text: &str, source: Language, target: Language) -> Option<&str> {
        self.entries
            .get(&(text.to_string(), source, target))
            .map(String::as_str)
    }
}

/// Development engine: dictionary hit when available, placeholder otherwise.
/// Never fails.
pub struct MockEngine {
    dictionary: MockDictionary,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            dictionary: MockDictionary::with_builtin(),
        }
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    async fn translate_hop(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Hop, EngineError> {
        if !source.is_english() && !target.is_english() {
            return Err(EngineError::InvalidHop {
                from: source,
                to: target,
            });
        }

        let text = match self.dictionary.lookup(text, source, target) {
            Some(hit) => hit.to_string(),
            None => placeholder(text, target),
        };

        Ok(Hop {
            text,
            confidence: MOCK_CONFIDENCE,
        })
    }

    fn label(&self) -> &'static str {
        "mock"
    }

    fn result_label(&self) -> ModelLabel {
        ModelLabel::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_engine_uses_dictionary_hits() {
        let engine = MockEngine::new();
        let hop = engine
            .translate_hop(
                "Hello, this is a test translation.",
                Language::En,
                Language::Hi,
            )
            .await
            .unwrap();
        assert_eq!(hop.text, "नमस्ते, यह एक परीक्षण अनुवाद है।");
        assert_eq!(hop.confidence, MOCK_CONFIDENCE);
    }

    #[tokio::test]
    async fn mock_engine_formats_placeholder_on_miss() {
        let engine = MockEngine::new();
        let hop = engine
            .translate_hop("Pure cotton saree", Language::En, Language::Hi)
            .await
            .unwrap();
        assert_eq!(hop.text, "[Hindi translation] Pure cotton saree");
    }

    #[tokio::test]
    async fn mock_engine_rejects_indic_to_indic_hops() {
        let engine = MockEngine::new();
        let err = engine
            .translate_hop("text", Language::Hi, Language::Ta)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidHop {
                from: Language::Hi,
                to: Language::Ta,
            }
        ));
        assert_eq!(err.to_string(), "invalid hop hi -> ta: one side must be English");
        // InvalidHop carries no underlying cause
        assert!(std::error::Error::source(&err).is_none());
    }
}
