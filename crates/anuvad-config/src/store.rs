use std::env;

use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    "data/translations.db".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl StoreConfig {
    pub fn new() -> Self {
        let db_path = env::var("ANUVAD_DB_PATH").unwrap_or_else(|_| default_db_path());

        StoreConfig { db_path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}
