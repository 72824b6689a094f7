use std::env;

use serde::{Deserialize, Serialize};

use self::detect::DetectConfig;
use self::engine::EngineConfig;
use self::store::StoreConfig;

pub mod detect;
pub mod engine;
pub mod store;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub store: StoreConfig,
    pub detect: DetectConfig,

    /// Upper bound in days for the retention cleanup.
    pub retention_days: u32,
}

impl Config {
    pub fn new() -> Self {
        let retention_days = env::var("ANUVAD_RETENTION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30); // keep a month of history by default

        Config {
            engine: EngineConfig::new(),
            store: StoreConfig::new(),
            detect: DetectConfig::new(),

            retention_days,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
