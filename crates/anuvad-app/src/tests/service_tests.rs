use std::sync::Arc;

use anuvad_core::engine::{EngineError, Hop, TranslationEngine};
use anuvad_core::{LanguageDetector, MockEngine};
use anuvad_store::{HistoryFilter, TranslationStore};
use anuvad_types::{CatalogItem, Language, ModelLabel, TranslationRequest};
use async_trait::async_trait;

use crate::service::{ServiceError, TranslationService};

struct DeadEngine;

#[async_trait]
impl TranslationEngine for DeadEngine {
    async fn translate_hop(
        &self,
        _text: &str,
        _source: Language,
        _target: Language,
    ) -> Result<Hop, EngineError> {
        Err(EngineError::Unavailable("model not loaded".to_string()))
    }

    fn label(&self) -> &'static str {
        "dead"
    }
}

fn mock_service() -> TranslationService {
    TranslationService::new(
        LanguageDetector::script_only(),
        Arc::new(MockEngine::new()),
        TranslationStore::open_in_memory().unwrap(),
    )
}

#[tokio::test]
async fn translate_detects_source_and_persists() {
    let service = mock_service();
    let response = service
        .translate(TranslationRequest {
            text: "यह एक अच्छी किताब है।".to_string(),
            source: None,
            target: Language::En,
        })
        .await
        .unwrap();

    assert_eq!(response.source_language, Language::Hi);
    assert_eq!(response.target_language, Language::En);
    assert!(response.translation_id > 0);

    let records = service
        .history(HistoryFilter::default(), 10, 0)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, response.translation_id);
}

#[tokio::test]
async fn empty_text_is_rejected_before_translation() {
    let service = mock_service();
    let err = service
        .translate(TranslationRequest {
            text: "   \n".to_string(),
            source: Some(Language::En),
            target: Language::Hi,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::EmptyText));
}

#[tokio::test]
async fn dead_engine_still_yields_a_stored_mock_result() {
    let service = TranslationService::new(
        LanguageDetector::script_only(),
        Arc::new(DeadEngine),
        TranslationStore::open_in_memory().unwrap(),
    );
    let response = service
        .translate(TranslationRequest {
            text: "Hello".to_string(),
            source: Some(Language::En),
            target: Language::Hi,
        })
        .await
        .unwrap();

    assert_eq!(response.model_label, ModelLabel::Mock);
    assert_eq!(response.confidence, 0.75);
    assert_eq!(response.translated_text, "[Hindi translation] Hello");
    assert!(response.translation_id > 0);
}

#[tokio::test]
async fn correction_round_trip_through_history() {
    let service = mock_service();
    let response = service
        .translate(TranslationRequest {
            text: "शुद्ध कपास की साड़ी".to_string(),
            source: Some(Language::Hi),
            target: Language::En,
        })
        .await
        .unwrap();

    let receipt = service
        .correct(
            response.translation_id,
            "Pure cotton saree",
            Some("product term"),
        )
        .await
        .unwrap();
    assert_eq!(receipt.status, "success");

    let records = service
        .history(HistoryFilter::default(), 10, 0)
        .await
        .unwrap();
    assert_eq!(
        records[0].corrected_text.as_deref(),
        Some("Pure cotton saree")
    );
}

#[tokio::test]
async fn correcting_unknown_id_surfaces_not_found() {
    let service = mock_service();
    let err = service.correct(9999, "text", None).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Store(anuvad_store::StoreError::NotFound(9999))
    ));
}

#[tokio::test]
async fn catalog_item_gets_per_field_translation_ids() {
    let service = mock_service();
    let item = CatalogItem {
        title: "शुद्ध कपास की साड़ी".to_string(),
        description: "यह एक सुंदर पारंपरिक साड़ी है।".to_string(),
        category: Some("वस्त्र".to_string()),
        price: Some("₹2500".to_string()),
        seller_id: Some("seller_123".to_string()),
    };

    let translated = service
        .translate_item(item, Some(Language::Hi), Language::En)
        .await
        .unwrap();

    assert_eq!(translated.translation_ids.len(), 3);
    assert!(translated.translation_ids.contains_key("title"));
    assert!(translated.translation_ids.contains_key("description"));
    assert!(translated.translation_ids.contains_key("category"));
    assert_eq!(translated.source_language, Language::Hi);

    let stats = service.statistics().await.unwrap();
    assert_eq!(stats.total_translations, 3);
}

#[tokio::test]
async fn batch_translate_stores_each_text() {
    let service = mock_service();
    let responses = service
        .batch_translate(
            vec!["one".to_string(), "two".to_string(), "three".to_string()],
            Some(Language::En),
            Language::Ta,
        )
        .await
        .unwrap();

    assert_eq!(responses.len(), 3);
    let ids: Vec<i64> = responses.iter().map(|r| r.translation_id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn batch_with_an_empty_text_stores_nothing() {
    let service = mock_service();
    let err = service
        .batch_translate(
            vec!["one".to_string(), "   ".to_string(), "three".to_string()],
            Some(Language::En),
            Language::Hi,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::EmptyText));

    // No partial batch in the store
    let records = service
        .history(HistoryFilter::default(), 10, 0)
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn detect_reports_language_name() {
    let service = mock_service();
    let detection = service.detect("இது ஒரு நல்ல புத்தகம்.").unwrap();
    assert_eq!(detection.language, Language::Ta);
    assert_eq!(detection.language_name, "Tamil");
}

#[test]
fn supported_languages_is_the_full_fixed_set() {
    let service = mock_service();
    let languages = service.supported_languages();
    assert_eq!(languages.len(), 15);
    assert!(languages.contains(&("hi", "Hindi")));
    assert!(languages.contains(&("en", "English")));
}

#[tokio::test]
async fn concurrent_translations_all_persist() {
    let service = Arc::new(mock_service());
    let mut handles = Vec::new();
    for i in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .translate(TranslationRequest {
                    text: format!("item number {i}"),
                    source: Some(Language::En),
                    target: Language::Hi,
                })
                .await
                .unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().translation_id);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}
