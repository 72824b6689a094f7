//! The translation service: detector, cascade and store wired together.
//! Constructed once at startup and shared by reference; there is no global
//! instance.

use std::collections::HashMap;
use std::sync::Arc;

use anuvad_core::{
    DefaultPreprocessor, DetectError, FallbackCascade, LanguageDetector, Preprocessor,
    TranslationEngine,
};
use anuvad_store::{HistoryFilter, StoreError, TranslationStore};
use anuvad_types::{
    CatalogItem, CorrectionReceipt, DetectionResponse, Language, Statistics, TranslatedCatalogItem,
    TranslationRecord, TranslationRequest, TranslationResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("text must not be empty")]
    EmptyText,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DetectError> for ServiceError {
    fn from(err: DetectError) -> Self {
        match err {
            DetectError::EmptyText => ServiceError::EmptyText,
        }
    }
}

pub struct TranslationService {
    detector: LanguageDetector,
    cascade: FallbackCascade,
    store: TranslationStore,
    preprocessor: DefaultPreprocessor,
}

impl TranslationService {
    pub fn new(
        detector: LanguageDetector,
        engine: Arc<dyn TranslationEngine>,
        store: TranslationStore,
    ) -> Self {
        Self {
            detector,
            cascade: FallbackCascade::new(engine),
            store,
            preprocessor: DefaultPreprocessor,
        }
    }

    /// Detect when no source is given, translate through the cascade,
    /// persist, and hand back the stored id with the result.
    pub async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, ServiceError> {
        let text = self.preprocessor.process(&request.text);
        if text.is_empty() {
            return Err(ServiceError::EmptyText);
        }

        let source = match request.source {
            Some(source) => source,
            None => self.detector.detect(&text)?.language,
        };

        let result = self.cascade.translate(&text, source, request.target).await;
        let translation_id = self.store.store(&result, &text).await?;

        Ok(TranslationResponse {
            translated_text: result.translated_text,
            source_language: result.source,
            target_language: result.target,
            confidence: result.confidence,
            model_label: result.model_label,
            translation_id,
        })
    }

    /// Translate several texts, all or nothing: the whole batch is validated
    /// before the first item is stored.
    pub async fn batch_translate(
        &self,
        texts: Vec<String>,
        source: Option<Language>,
        target: Language,
    ) -> Result<Vec<TranslationResponse>, ServiceError> {
        if texts
            .iter()
            .any(|text| self.preprocessor.process(text).is_empty())
        {
            return Err(ServiceError::EmptyText);
        }

        let mut responses = Vec::with_capacity(texts.len());
        for text in texts {
            responses.push(
                self.translate(TranslationRequest {
                    text,
                    source,
                    target,
                })
                .await?,
            );
        }
        Ok(responses)
    }

    /// Per-field translation of a catalog entry. Each field gets its own
    /// stored translation so sellers can correct them independently.
    pub async fn translate_item(
        &self,
        item: CatalogItem,
        source: Option<Language>,
        target: Language,
    ) -> Result<TranslatedCatalogItem, ServiceError> {
        let mut translation_ids = HashMap::new();

        let title = self
            .translate(TranslationRequest {
                text: item.title.clone(),
                source,
                target,
            })
            .await?;
        translation_ids.insert("title".to_string(), title.translation_id);

        let description = self
            .translate(TranslationRequest {
                text: item.description.clone(),
                source,
                target,
            })
            .await?;
        translation_ids.insert("description".to_string(), description.translation_id);

        let translated_category = match &item.category {
            Some(category) => {
                let response = self
                    .translate(TranslationRequest {
                        text: category.clone(),
                        source,
                        target,
                    })
                    .await?;
                translation_ids.insert("category".to_string(), response.translation_id);
                Some(response.translated_text)
            }
            None => None,
        };

        let source_language = title.source_language;
        Ok(TranslatedCatalogItem {
            original_item: item,
            translated_title: title.translated_text,
            translated_description: description.translated_text,
            translated_category,
            source_language,
            target_language: target,
            translation_ids,
        })
    }

    pub fn detect(&self, text: &str) -> Result<DetectionResponse, ServiceError> {
        let text = self.preprocessor.process(text);
        let detection = self.detector.detect(&text)?;
        Ok(DetectionResponse {
            language: detection.language,
            confidence: detection.confidence,
            language_name: detection.language.name().to_string(),
        })
    }

    pub async fn correct(
        &self,
        translation_id: i64,
        corrected_text: &str,
        feedback: Option<&str>,
    ) -> Result<CorrectionReceipt, ServiceError> {
        if corrected_text.trim().is_empty() {
            return Err(ServiceError::EmptyText);
        }
        let correction_id = self
            .store
            .correct(translation_id, corrected_text, feedback)
            .await?;
        Ok(CorrectionReceipt {
            correction_id,
            status: "success".to_string(),
        })
    }

    pub async fn history(
        &self,
        filter: HistoryFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TranslationRecord>, ServiceError> {
        Ok(self.store.history(filter, limit, offset).await?)
    }

    pub async fn statistics(&self) -> Result<Statistics, ServiceError> {
        Ok(self.store.statistics().await?)
    }

    pub async fn cleanup(&self, older_than_days: u32) -> Result<usize, ServiceError> {
        Ok(self.store.cleanup(older_than_days).await?)
    }

    /// Read-only code to human-readable name mapping.
    pub fn supported_languages(&self) -> Vec<(&'static str, &'static str)> {
        Language::ALL
            .iter()
            .map(|lang| (lang.code(), lang.name()))
            .collect()
    }
}
