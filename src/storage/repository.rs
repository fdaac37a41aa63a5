//! Repository abstraction for mood entry persistence
//!
//! Business logic talks to the `MoodRepository` trait; SQLite backs it in
//! production and an in-memory implementation backs tests and ephemeral
//! deployments.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, RwLock};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::{MoodEntry, Sentiment, SentimentLabel};

/// Repository for mood entry operations
pub trait MoodRepository: Send + Sync {
    /// Persist one entry
    fn append(&self, entry: &MoodEntry) -> Result<()>;

    /// Entries for a user within the last `days`, ascending by time
    fn history(&self, user_id: &str, days: u32) -> Result<Vec<MoodEntry>>;

    /// Most recent entry for a user
    fn latest(&self, user_id: &str) -> Result<Option<MoodEntry>>;

    /// Total stored entries
    fn count(&self) -> Result<usize>;

    /// Distinct users with at least one entry
    fn user_count(&self) -> Result<usize>;
}

// ============================================================================
// SQLite Implementation
// ============================================================================

/// SQLite implementation of MoodRepository
///
/// Uses `Mutex` to ensure thread-safety for the SQLite connection.
pub struct SqliteMoodRepository {
    conn: Mutex<Connection>,
}

impl SqliteMoodRepository {
    /// Open or create a repository at the given path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).context("Failed to open SQLite database")?;

        // WAL for better concurrency under the mutex
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;

        tracing::info!(path = %path.display(), "SQLite mood repository initialized");
        Ok(repo)
    }

    /// Create in-memory repository (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory SQLite")?;
        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;
        Ok(repo)
    }

    fn create_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
                CREATE TABLE IF NOT EXISTS mood_entries (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    recorded_at TEXT NOT NULL,
                    mood_score REAL NOT NULL,
                    sentiment_label TEXT NOT NULL,
                    sentiment_confidence REAL NOT NULL,
                    emotions TEXT NOT NULL,
                    source_text TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_mood_entries_user
                    ON mood_entries(user_id);

                CREATE INDEX IF NOT EXISTS idx_mood_entries_user_time
                    ON mood_entries(user_id, recorded_at);
                "#,
        )
        .context("Failed to create SQLite schema")?;

        Ok(())
    }

    fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<MoodEntry> {
        let id: String = row.get(0)?;
        let user_id: String = row.get(1)?;
        let recorded_at: String = row.get(2)?;
        let mood_score: f64 = row.get(3)?;
        let label: String = row.get(4)?;
        let confidence: f64 = row.get(5)?;
        let emotions_json: String = row.get(6)?;
        let source_text: String = row.get(7)?;

        // Corrupt stored JSON degrades to no emotions, never to a read error
        let emotions: HashMap<String, f64> =
            serde_json::from_str(&emotions_json).unwrap_or_default();

        Ok(MoodEntry {
            id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::new_v4()),
            user_id,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at)
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            mood_score,
            sentiment: Sentiment {
                label: SentimentLabel::from_model_label(&label),
                confidence,
            },
            emotions,
            source_text,
        })
    }
}

impl MoodRepository for SqliteMoodRepository {
    fn append(&self, entry: &MoodEntry) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let emotions_json =
            serde_json::to_string(&entry.emotions).context("Failed to encode emotions")?;

        conn.execute(
            r#"
                INSERT INTO mood_entries
                    (id, user_id, recorded_at, mood_score, sentiment_label,
                     sentiment_confidence, emotions, source_text)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            params![
                entry.id.to_string(),
                entry.user_id,
                entry.recorded_at.to_rfc3339(),
                entry.mood_score,
                entry.sentiment.label.as_str(),
                entry.sentiment.confidence,
                emotions_json,
                entry.source_text,
            ],
        )
        .context("Failed to insert mood entry")?;

        Ok(())
    }

    fn history(&self, user_id: &str, days: u32) -> Result<Vec<MoodEntry>> {
        let conn = self.conn.lock().unwrap();
        let cutoff = (Utc::now() - Duration::days(days as i64)).to_rfc3339();

        let mut stmt = conn
            .prepare(
                r#"
                    SELECT id, user_id, recorded_at, mood_score, sentiment_label,
                           sentiment_confidence, emotions, source_text
                    FROM mood_entries
                    WHERE user_id = ?1 AND recorded_at >= ?2
                    ORDER BY recorded_at ASC
                    "#,
            )
            .context("Failed to prepare history query")?;

        let entries = stmt
            .query_map(params![user_id, cutoff], Self::row_to_entry)
            .context("Failed to query history")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read history rows")?;

        Ok(entries)
    }

    fn latest(&self, user_id: &str) -> Result<Option<MoodEntry>> {
        let conn = self.conn.lock().unwrap();
        let entry = conn
            .query_row(
                r#"
                    SELECT id, user_id, recorded_at, mood_score, sentiment_label,
                           sentiment_confidence, emotions, source_text
                    FROM mood_entries
                    WHERE user_id = ?1
                    ORDER BY recorded_at DESC
                    LIMIT 1
                    "#,
                params![user_id],
                Self::row_to_entry,
            )
            .optional()
            .context("Failed to query latest entry")?;

        Ok(entry)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: usize = conn
            .query_row("SELECT COUNT(*) FROM mood_entries", [], |row| row.get(0))
            .context("Failed to count entries")?;
        Ok(count)
    }

    fn user_count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: usize = conn
            .query_row(
                "SELECT COUNT(DISTINCT user_id) FROM mood_entries",
                [],
                |row| row.get(0),
            )
            .context("Failed to count users")?;
        Ok(count)
    }
}

// ============================================================================
// In-Memory Implementation
// ============================================================================

/// In-memory implementation of MoodRepository for tests and ephemeral runs
#[derive(Default)]
pub struct InMemoryMoodRepository {
    entries: RwLock<HashMap<String, Vec<MoodEntry>>>,
}

impl InMemoryMoodRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoodRepository for InMemoryMoodRepository {
    fn append(&self, entry: &MoodEntry) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries
            .entry(entry.user_id.clone())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    fn history(&self, user_id: &str, days: u32) -> Result<Vec<MoodEntry>> {
        let cutoff = Utc::now() - Duration::days(days as i64);
        let entries = self.entries.read().unwrap();

        let mut result: Vec<MoodEntry> = entries
            .get(user_id)
            .map(|list| {
                list.iter()
                    .filter(|e| e.recorded_at >= cutoff)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        result.sort_by_key(|e| e.recorded_at);
        Ok(result)
    }

    fn latest(&self, user_id: &str) -> Result<Option<MoodEntry>> {
        let entries = self.entries.read().unwrap();
        Ok(entries
            .get(user_id)
            .and_then(|list| list.iter().max_by_key(|e| e.recorded_at).cloned()))
    }

    fn count(&self) -> Result<usize> {
        let entries = self.entries.read().unwrap();
        Ok(entries.values().map(Vec::len).sum())
    }

    fn user_count(&self) -> Result<usize> {
        let entries = self.entries.read().unwrap();
        Ok(entries.len())
    }
}
