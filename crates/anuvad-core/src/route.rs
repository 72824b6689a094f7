//! Direction routing: identity, direct en↔X hops, and the English pivot for
//! Indic-to-Indic pairs.

use std::sync::Arc;

use anuvad_types::{Language, ModelLabel, TranslationResult};

use crate::engine::{EngineError, TranslationEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source equals target.
    Identity,
    /// One side is English, single hop.
    Direct,
    /// Neither side is English, two hops through English.
    Pivot,
}

impl Direction {
    pub fn of(source: Language, target: Language) -> Direction {
        if source == target {
            Direction::Identity
        } else if source.is_english() || target.is_english() {
            Direction::Direct
        } else {
            Direction::Pivot
        }
    }
}

pub struct TranslationRouter {
    engine: Arc<dyn TranslationEngine>,
}

impl TranslationRouter {
    pub fn new(engine: Arc<dyn TranslationEngine>) -> Self {
        Self { engine }
    }

    /// Route a translation through the engine. No persistence here, the
    /// caller owns storing the result.
    pub async fn route(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<TranslationResult, EngineError> {
        match Direction::of(source, target) {
            Direction::Identity => Ok(TranslationResult {
                translated_text: text.to_string(),
                source,
                target,
                confidence: 1.0,
                model_label: ModelLabel::Identity,
            }),
            Direction::Direct => {
                let hop = self.engine.translate_hop(text, source, target).await?;
                Ok(TranslationResult {
                    translated_text: hop.text,
                    source,
                    target,
                    confidence: hop.confidence,
                    model_label: self.engine.result_label(),
                })
            }
            Direction::Pivot => {
                tracing::debug!(%source, %target, engine = self.engine.label(), "pivoting through English");
                let first = self.engine.translate_hop(text, source, Language::En).await?;
                let second = self
                    .engine
                    .translate_hop(&first.text, Language::En, target)
                    .await?;
                // A mock engine's pivot is still mock output
                let model_label = match self.engine.result_label() {
                    ModelLabel::Primary => ModelLabel::Pivot,
                    other => other,
                };
                // Compounded uncertainty: take the weaker hop, never either
                // hop's confidence alone.
                Ok(TranslationResult {
                    translated_text: second.text,
                    source,
                    target,
                    confidence: first.confidence.min(second.confidence),
                    model_label,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::engine::Hop;

    /// Scripted engine recording every hop it is asked for.
    struct ScriptedEngine {
        hops: Mutex<Vec<(Language, Language)>>,
        confidences: Mutex<Vec<f32>>,
    }

    impl ScriptedEngine {
        fn new(confidences: Vec<f32>) -> Self {
            Self {
                hops: Mutex::new(Vec::new()),
                confidences: Mutex::new(confidences),
            }
        }
    }

    #[async_trait]
    impl TranslationEngine for ScriptedEngine {
        async fn translate_hop(
            &self,
            text: &str,
            source: Language,
            target: Language,
        ) -> Result<Hop, EngineError> {
            self.hops.lock().unwrap().push((source, target));
            let confidence = self.confidences.lock().unwrap().remove(0);
            Ok(Hop {
                text: format!("{text}::{target}"),
                confidence,
            })
        }

        fn label(&self) -> &'static str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn identity_returns_text_unchanged_without_engine_call() {
        let engine = Arc::new(ScriptedEngine::new(vec![]));
        let router = TranslationRouter::new(engine.clone());

        for lang in Language::ALL {
            let result = router.route("unchanged", lang, lang).await.unwrap();
            assert_eq!(result.translated_text, "unchanged");
            assert_eq!(result.confidence, 1.0);
            assert_eq!(result.model_label, ModelLabel::Identity);
        }
        assert!(engine.hops.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn direct_route_is_a_single_hop() {
        let engine = Arc::new(ScriptedEngine::new(vec![0.9]));
        let router = TranslationRouter::new(engine.clone());

        let result = router.route("hello", Language::En, Language::Hi).await.unwrap();
        assert_eq!(result.model_label, ModelLabel::Primary);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(
            *engine.hops.lock().unwrap(),
            vec![(Language::En, Language::Hi)]
        );
    }

    #[tokio::test]
    async fn pivot_runs_two_hops_and_takes_final_text() {
        let engine = Arc::new(ScriptedEngine::new(vec![0.9, 0.8]));
        let router = TranslationRouter::new(engine.clone());

        let result = router.route("text", Language::Hi, Language::Ta).await.unwrap();
        assert_eq!(
            *engine.hops.lock().unwrap(),
            vec![
                (Language::Hi, Language::En),
                (Language::En, Language::Ta),
            ]
        );
        // Final hop's text, weaker hop's confidence
        assert_eq!(result.translated_text, "text::en::ta");
        assert_eq!(result.model_label, ModelLabel::Pivot);
        assert!(result.confidence <= 0.8);
    }

    #[tokio::test]
    async fn mock_engine_results_are_labeled_mock() {
        use crate::engine::MockEngine;

        let router = TranslationRouter::new(Arc::new(MockEngine::new()));

        let direct = router
            .route("Pure cotton saree", Language::En, Language::Hi)
            .await
            .unwrap();
        assert_eq!(direct.model_label, ModelLabel::Mock);

        let pivoted = router.route("पाठ", Language::Hi, Language::Ta).await.unwrap();
        assert_eq!(pivoted.model_label, ModelLabel::Mock);

        // Identity still never touches the engine
        let identity = router.route("same", Language::Hi, Language::Hi).await.unwrap();
        assert_eq!(identity.model_label, ModelLabel::Identity);
    }

    #[tokio::test]
    async fn pivot_confidence_never_exceeds_either_hop() {
        for (a, b) in [(0.3_f32, 0.95_f32), (0.95, 0.3), (0.5, 0.5)] {
            let engine = Arc::new(ScriptedEngine::new(vec![a, b]));
            let router = TranslationRouter::new(engine);
            let result = router.route("t", Language::Bn, Language::Te).await.unwrap();
            assert!(result.confidence <= a.min(b));
        }
    }
}
