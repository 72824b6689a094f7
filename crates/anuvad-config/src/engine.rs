use std::env;

use serde::{Deserialize, Serialize};

fn default_mode() -> String {
    "mock".to_string()
}

fn default_api_url() -> String {
    "http://localhost:8000/translate".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    /// "mock" or "remote".
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl EngineConfig {
    pub fn new() -> Self {
        let mode = env::var("ANUVAD_ENGINE").unwrap_or_else(|_| default_mode());
        let api_url = env::var("ANUVAD_ENGINE_URL").unwrap_or_else(|_| default_api_url());
        let timeout_seconds = env::var("ANUVAD_ENGINE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        EngineConfig {
            mode,
            api_url,
            timeout_seconds,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
