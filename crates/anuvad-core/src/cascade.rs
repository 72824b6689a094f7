//! Fallback cascade: primary model, then the fixed dictionary, then the
//! deterministic placeholder. Always yields a result, never an error.

use std::sync::Arc;

use anuvad_types::{Language, ModelLabel, TranslationResult};

use crate::engine::{MOCK_CONFIDENCE, MockDictionary, TranslationEngine, placeholder};
use crate::route::TranslationRouter;

/// Fixed confidence for dictionary hits, between the primary model's range
/// and the mock constant.
pub const DICTIONARY_CONFIDENCE: f32 = 0.85;

/// Attempt ladder. Each call walks it at most once, top to bottom; there is
/// no retry of an earlier rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Primary,
    Dictionary,
    Mock,
}

pub struct FallbackCascade {
    router: TranslationRouter,
    dictionary: MockDictionary,
}

impl FallbackCascade {
    pub fn new(engine: Arc<dyn TranslationEngine>) -> Self {
        Self {
            router: TranslationRouter::new(engine),
            dictionary: MockDictionary::with_builtin(),
        }
    }

    pub fn with_dictionary(engine: Arc<dyn TranslationEngine>, dictionary: MockDictionary) -> Self {
        Self {
            router: TranslationRouter::new(engine),
            dictionary,
        }
    }

    /// Translate with degradation instead of failure. The returned label
    /// names the rung that produced the result.
    pub async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> TranslationResult {
        let mut attempt = Attempt::Primary;

        loop {
            match attempt {
                Attempt::Primary => match self.router.route(text, source, target).await {
                    Ok(result) => return result,
                    Err(err) => {
                        tracing::warn!(%source, %target, error = %err, "primary model failed, trying dictionary");
                        attempt = Attempt::Dictionary;
                    }
                },
                Attempt::Dictionary => match self.dictionary.lookup(text, source, target) {
                    Some(hit) => {
                        return TranslationResult {
                            translated_text: hit.to_string(),
                            source,
                            target,
                            confidence: DICTIONARY_CONFIDENCE,
                            model_label: ModelLabel::Fallback,
                        };
                    }
                    None => attempt = Attempt::Mock,
                },
                Attempt::Mock => {
                    tracing::warn!(%source, %target, "no dictionary entry, returning placeholder");
                    return TranslationResult {
                        translated_text: placeholder(text, target),
                        source,
                        target,
                        confidence: MOCK_CONFIDENCE,
                        model_label: ModelLabel::Mock,
                    };
                }
            }
        }
    }
}
