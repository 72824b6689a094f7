//! SQLite persistence for translations and their human corrections.
//!
//! Two tables: `translations` is an append-only log, `corrections` references
//! it with at most one row per translation (last write wins). Writes are
//! serialized behind a single async lock; that is the only shared mutable
//! state in the system.

use std::path::Path;
use std::str::FromStr;

use anuvad_types::{
    Language, LanguagePairCount, ModelLabel, Statistics, TrainingExample, TranslationRecord,
    TranslationResult,
};
use chrono::{DateTime, Duration, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("translation {0} not found")]
    NotFound(i64),

    #[error("storage unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
}

/// Optional language filters for history queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryFilter {
    pub source: Option<Language>,
    pub target: Option<Language>,
}

pub struct TranslationStore {
    conn: Mutex<Connection>,
}

impl TranslationStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(&conn)?;
        tracing::info!(path = %path.display(), "translation store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                original_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                source_language TEXT NOT NULL,
                target_language TEXT NOT NULL,
                model_confidence REAL NOT NULL DEFAULT 0.0,
                model_label TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS corrections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                translation_id INTEGER NOT NULL UNIQUE
                    REFERENCES translations (id),
                corrected_text TEXT NOT NULL,
                feedback TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_translations_languages
                ON translations (source_language, target_language);
            CREATE INDEX IF NOT EXISTS idx_translations_created
                ON translations (created_at);
            CREATE INDEX IF NOT EXISTS idx_corrections_translation
                ON corrections (translation_id);
            "#,
        )
    }

    /// Append a translation. Identical content twice gives two distinct ids.
    pub async fn store(
        &self,
        result: &TranslationResult,
        original_text: &str,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO translations
                (original_text, translated_text, source_language, target_language,
                 model_confidence, model_label, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                original_text,
                result.translated_text,
                result.source.code(),
                result.target.code(),
                result.confidence as f64,
                result.model_label.as_str(),
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, source = %result.source, target = %result.target, "translation stored");
        Ok(id)
    }

    /// Attach a correction to an existing translation. A second correction
    /// for the same translation replaces the first.
    pub async fn correct(
        &self,
        translation_id: i64,
        corrected_text: &str,
        feedback: Option<&str>,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;

        let exists: Option<i64> = conn
            .query_row(
                "SELECT id FROM translations WHERE id = ?1",
                params![translation_id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::NotFound(translation_id));
        }

        conn.execute(
            r#"
            INSERT INTO corrections (translation_id, corrected_text, feedback, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (translation_id) DO UPDATE SET
                corrected_text = excluded.corrected_text,
                feedback = excluded.feedback,
                created_at = excluded.created_at
            "#,
            params![translation_id, corrected_text, feedback, Utc::now()],
        )?;

        let correction_id: i64 = conn.query_row(
            "SELECT id FROM corrections WHERE translation_id = ?1",
            params![translation_id],
            |row| row.get(0),
        )?;
        tracing::info!(translation_id, correction_id, "correction stored");
        Ok(correction_id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<TranslationRecord>, StoreError> {
        let conn = self.conn.lock().await;
        let record = conn
            .query_row(
                &format!("{RECORD_SELECT} WHERE t.id = ?1"),
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Newest first, restartable via offset.
    pub async fn history(
        &self,
        filter: HistoryFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        let conn = self.conn.lock().await;

        let mut sql = format!("{RECORD_SELECT} WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(source) = filter.source {
            sql.push_str(&format!(" AND t.source_language = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(source.code()));
        }
        if let Some(target) = filter.target {
            sql.push_str(&format!(" AND t.target_language = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(target.code()));
        }

        sql.push_str(&format!(
            " ORDER BY t.created_at DESC, t.id DESC LIMIT ?{} OFFSET ?{}",
            params_vec.len() + 1,
            params_vec.len() + 2
        ));
        params_vec.push(Box::new(limit));
        params_vec.push(Box::new(offset));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();
        let rows = stmt.query_map(params_refs.as_slice(), row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub async fn statistics(&self) -> Result<Statistics, StoreError> {
        let conn = self.conn.lock().await;

        let total_translations: u64 =
            conn.query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))?;
        let total_corrections: u64 =
            conn.query_row("SELECT COUNT(*) FROM corrections", [], |row| row.get(0))?;

        let week_ago = Utc::now() - Duration::days(7);
        let recent_translations: u64 = conn.query_row(
            "SELECT COUNT(*) FROM translations WHERE created_at >= ?1",
            params![week_ago],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            r#"
            SELECT source_language, target_language, COUNT(*) as count
            FROM translations
            GROUP BY source_language, target_language
            ORDER BY count DESC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LanguagePairCount {
                source: parse_language(row, 0)?,
                target: parse_language(row, 1)?,
                count: row.get(2)?,
            })
        })?;

        let mut language_pairs = Vec::new();
        for row in rows {
            language_pairs.push(row?);
        }

        Ok(Statistics {
            total_translations,
            total_corrections,
            recent_translations,
            language_pairs,
        })
    }

    /// Corrected pairs usable as fine-tuning data, newest first.
    pub async fn corrections_for_training(
        &self,
        limit: u32,
    ) -> Result<Vec<TrainingExample>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT t.original_text, t.source_language, t.target_language,
                   c.corrected_text, c.feedback, c.created_at
            FROM corrections c
            JOIN translations t ON c.translation_id = t.id
            ORDER BY c.created_at DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(TrainingExample {
                original_text: row.get(0)?,
                source_language: parse_language(row, 1)?,
                target_language: parse_language(row, 2)?,
                corrected_text: row.get(3)?,
                feedback: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut examples = Vec::new();
        for row in rows {
            examples.push(row?);
        }
        Ok(examples)
    }

    /// Drop records older than the cutoff, corrections first so the foreign
    /// key holds at every step. Returns the number of translations removed.
    pub async fn cleanup(&self, older_than_days: u32) -> Result<usize, StoreError> {
        let conn = self.conn.lock().await;
        let cutoff = Utc::now() - Duration::days(i64::from(older_than_days));

        let removed_corrections = conn.execute(
            r#"
            DELETE FROM corrections
            WHERE translation_id IN (
                SELECT id FROM translations WHERE created_at < ?1
            )
            "#,
            params![cutoff],
        )?;
        let removed_translations = conn.execute(
            "DELETE FROM translations WHERE created_at < ?1",
            params![cutoff],
        )?;

        tracing::info!(
            removed_translations,
            removed_corrections,
            older_than_days,
            "retention cleanup finished"
        );
        Ok(removed_translations)
    }
}

const RECORD_SELECT: &str = r#"
    SELECT t.id, t.original_text, t.translated_text, t.source_language,
           t.target_language, t.model_confidence, t.model_label, t.created_at,
           c.corrected_text, c.feedback
    FROM translations t
    LEFT JOIN corrections c ON t.id = c.translation_id
"#;

fn row_to_record(row: &Row<'_>) -> Result<TranslationRecord, rusqlite::Error> {
    let confidence: f64 = row.get(5)?;
    let label: String = row.get(6)?;
    Ok(TranslationRecord {
        id: row.get(0)?,
        original_text: row.get(1)?,
        translated_text: row.get(2)?,
        source_language: parse_language(row, 3)?,
        target_language: parse_language(row, 4)?,
        model_confidence: confidence as f32,
        model_label: ModelLabel::from_str(&label)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
        created_at: row.get::<_, DateTime<Utc>>(7)?,
        corrected_text: row.get(8)?,
        correction_feedback: row.get(9)?,
    })
}

fn parse_language(row: &Row<'_>, idx: usize) -> Result<Language, rusqlite::Error> {
    let code: String = row.get(idx)?;
    Language::from_str(&code)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
