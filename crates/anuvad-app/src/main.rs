use std::sync::Arc;
use std::time::Duration;

use anuvad_config::Config;
use anuvad_core::{LanguageDetector, MockEngine, TranslationEngine};
use anuvad_engine_indictrans::IndicTransEngine;
use anuvad_store::{HistoryFilter, TranslationStore};
use anuvad_types::{CatalogItem, Language, TranslationRequest};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod service;

#[cfg(test)]
mod tests;

use self::service::TranslationService;

#[derive(Parser)]
#[command(name = "anuvad", about = "Product-catalog translation for Indic languages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate text, auto-detecting the source language when omitted
    Translate {
        text: String,
        #[arg(long)]
        to: Language,
        #[arg(long)]
        from: Option<Language>,
    },
    /// Translate several texts in one go
    Batch {
        texts: Vec<String>,
        #[arg(long)]
        to: Language,
        #[arg(long)]
        from: Option<Language>,
    },
    /// Translate a product catalog entry field by field
    TranslateItem {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        to: Language,
        #[arg(long)]
        from: Option<Language>,
    },
    /// Detect the language of a piece of text
    Detect { text: String },
    /// Attach a human correction to a stored translation
    Correct {
        id: i64,
        corrected_text: String,
        #[arg(long)]
        feedback: Option<String>,
    },
    /// Show stored translations, newest first
    History {
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long)]
        from: Option<Language>,
        #[arg(long)]
        to: Option<Language>,
    },
    /// Aggregate translation statistics
    Stats,
    /// Delete records older than the retention window
    Cleanup {
        #[arg(long)]
        days: Option<u32>,
    },
    /// List supported language codes
    Languages,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::new();

    let engine: Arc<dyn TranslationEngine> = match config.engine.mode.as_str() {
        "remote" => Arc::new(IndicTransEngine::new(
            config.engine.api_url.clone(),
            Duration::from_secs(config.engine.timeout_seconds),
        )?),
        _ => Arc::new(MockEngine::new()),
    };
    let detector = if config.detect.statistical {
        LanguageDetector::new()
    } else {
        LanguageDetector::script_only()
    };
    let store = TranslationStore::open(&config.store.db_path)?;
    tracing::info!(
        engine = engine.label(),
        db_path = %config.store.db_path,
        "translation service starting"
    );
    let service = Arc::new(TranslationService::new(detector, engine, store));

    match cli.command {
        Command::Translate { text, to, from } => {
            let response = service
                .translate(TranslationRequest {
                    text,
                    source: from,
                    target: to,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Batch { texts, to, from } => {
            let responses = service.batch_translate(texts, from, to).await?;
            println!("{}", serde_json::to_string_pretty(&responses)?);
        }
        Command::TranslateItem {
            title,
            description,
            category,
            to,
            from,
        } => {
            let item = CatalogItem {
                title,
                description,
                category,
                price: None,
                seller_id: None,
            };
            let translated = service.translate_item(item, from, to).await?;
            println!("{}", serde_json::to_string_pretty(&translated)?);
        }
        Command::Detect { text } => {
            let response = service.detect(&text)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Correct {
            id,
            corrected_text,
            feedback,
        } => {
            let receipt = service
                .correct(id, &corrected_text, feedback.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Command::History {
            limit,
            offset,
            from,
            to,
        } => {
            let records = service
                .history(
                    HistoryFilter {
                        source: from,
                        target: to,
                    },
                    limit,
                    offset,
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Stats => {
            let stats = service.statistics().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Cleanup { days } => {
            let days = days.unwrap_or(config.retention_days);
            let removed = service.cleanup(days).await?;
            println!("removed {removed} translations older than {days} days");
        }
        Command::Languages => {
            for (code, name) in service.supported_languages() {
                println!("{code}\t{name}");
            }
        }
    }

    Ok(())
}
