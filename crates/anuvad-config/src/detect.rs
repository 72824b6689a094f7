use std::env;

use serde::{Deserialize, Serialize};

fn default_statistical() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DetectConfig {
    /// When false the detector runs script heuristics only.
    #[serde(default = "default_statistical")]
    pub statistical: bool,
}

impl DetectConfig {
    pub fn new() -> Self {
        let statistical = env::var("ANUVAD_STATISTICAL_DETECT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_statistical);

        DetectConfig { statistical }
    }
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            statistical: default_statistical(),
        }
    }
}
