//! IndicTrans2 engine over HTTP. Talks to an inference server exposing the
//! en-indic and indic-en checkpoints; the cascade absorbs every failure this
//! crate reports.

use std::time::Duration;

use anuvad_core::engine::{EngineError, Hop, TranslationEngine};
use anuvad_types::Language;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fixed confidence for a successful remote hop.
pub const REMOTE_CONFIDENCE: f32 = 0.92;

#[derive(Serialize)]
struct HopRequest<'a> {
    text: &'a str,
    /// Flores-200 tags, e.g. `hin_Deva`.
    source_language: &'static str,
    target_language: &'static str,
}

#[derive(Deserialize)]
struct HopResponse {
    translated_text: String,
}

#[derive(Clone)]
pub struct IndicTransEngine {
    client: reqwest::Client,
    api_url: String,
}

impl IndicTransEngine {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Unavailable(e.to_string()))?;
        tracing::info!(%api_url, "indictrans2 engine configured");
        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl TranslationEngine for IndicTransEngine {
    async fn translate_hop(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Hop, EngineError> {
        // The checkpoints only cover en->indic and indic->en
        if !source.is_english() && !target.is_english() {
            return Err(EngineError::InvalidHop {
                from: source,
                to: target,
            });
        }

        let request = HopRequest {
            text,
            source_language: source.flores(),
            target_language: target.flores(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EngineError::Api(format!("HTTP {}", response.status())));
        }

        let body: HopResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Api(format!("failed to parse response: {e}")))?;

        Ok(Hop {
            text: body.translated_text,
            confidence: REMOTE_CONFIDENCE,
        })
    }

    fn label(&self) -> &'static str {
        "indictrans2"
    }
}
