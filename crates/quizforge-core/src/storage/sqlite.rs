//! SQLite Question Bank
//!
//! Persists registered questions and their review schedules, and rehydrates
//! the in-memory detector and scheduler at startup. Separate reader/writer
//! connections behind mutexes keep all methods `&self`, so the bank is
//! `Send + Sync` and shareable via `Arc`.

use chrono::{DateTime, NaiveDate, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::dedup::{canonical_hash, DetectorConfig, DuplicateDetector};
use crate::embeddings::{Embedding, Encoder};
use crate::scheduler::{ReviewScheduler, ReviewState};
use crate::search::IndexBackend;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Question not found
    #[error("Question not found: {0}")]
    NotFound(String),
    /// Insert collided with a stored question
    #[error("Already stored: {0}")]
    AlreadyExists(String),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
    /// Detector rehydration failed
    #[error("Rebuild error: {0}")]
    Rebuild(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

// ============================================================================
// RECORD TYPES
// ============================================================================

/// A question as stored in the bank
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    /// Unique question id
    pub id: String,
    /// Question text
    pub text: String,
    /// Topic, if assigned
    pub topic: Option<String>,
    /// Difficulty label, if assigned
    pub difficulty: Option<String>,
    /// Curriculum week, if assigned
    pub week: Option<i64>,
    /// Canonical hash of the text
    pub canonical_hash: String,
    /// Embedding, if one was computed at registration
    pub embedding: Option<Embedding>,
    /// Model that produced the embedding
    pub embedding_model: Option<String>,
    /// Registration sequence number (semantic tie-break order)
    pub insertion_order: i64,
    /// When the question was stored
    pub created_at: DateTime<Utc>,
}

/// Input for storing a question
#[derive(Debug, Clone, Default)]
pub struct NewQuestion {
    /// Unique question id
    pub id: String,
    /// Question text
    pub text: String,
    /// Topic, if any
    pub topic: Option<String>,
    /// Difficulty label, if any
    pub difficulty: Option<String>,
    /// Curriculum week, if any
    pub week: Option<i64>,
    /// Embedding, if one was computed
    pub embedding: Option<Embedding>,
    /// Model that produced the embedding
    pub embedding_model: Option<String>,
}

impl NewQuestion {
    /// Create an input with just an id and text
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// QUESTION BANK
// ============================================================================

/// SQLite-backed question bank
pub struct QuestionBank {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
}

impl QuestionBank {
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    /// Open (or create) a question bank. `None` uses the platform data
    /// directory.
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(p) => p,
            None => {
                let proj_dirs = ProjectDirs::from("com", "quizforge", "core").ok_or_else(|| {
                    StorageError::Init("Could not determine project directories".to_string())
                })?;

                let data_dir = proj_dirs.data_dir();
                std::fs::create_dir_all(data_dir)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let perms = std::fs::Permissions::from_mode(0o700);
                    let _ = std::fs::set_permissions(data_dir, perms);
                }
                data_dir.join("quizforge.db")
            }
        };

        let writer_conn = Connection::open(&path)?;

        #[cfg(unix)]
        if path.exists() {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&path, perms);
        }

        Self::configure_connection(&writer_conn)?;
        super::migrations::apply_migrations(&writer_conn)?;

        let reader_conn = Connection::open(&path)?;
        Self::configure_connection(&reader_conn)?;

        Ok(Self {
            writer: Mutex::new(writer_conn),
            reader: Mutex::new(reader_conn),
        })
    }

    fn writer(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.writer
            .lock()
            .map_err(|_| StorageError::Init("writer lock poisoned".to_string()))
    }

    fn reader(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.reader
            .lock()
            .map_err(|_| StorageError::Init("reader lock poisoned".to_string()))
    }

    // ========================================================================
    // QUESTIONS
    // ========================================================================

    /// Store a question, assigning the next insertion-order slot
    pub fn insert_question(&self, input: &NewQuestion) -> Result<QuestionRecord> {
        let hash = canonical_hash(&input.text);
        let created_at = Utc::now();

        let conn = self.writer()?;

        let id_taken: Option<String> = conn
            .query_row(
                "SELECT id FROM questions WHERE id = ?1",
                params![input.id],
                |row| row.get(0),
            )
            .optional()?;
        if id_taken.is_some() {
            return Err(StorageError::AlreadyExists(format!("id {}", input.id)));
        }

        let hash_taken: Option<String> = conn
            .query_row(
                "SELECT id FROM questions WHERE canonical_hash = ?1",
                params![hash],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(existing) = hash_taken {
            return Err(StorageError::AlreadyExists(format!(
                "text (canonical hash {}) under id {}",
                hash, existing
            )));
        }

        let insertion_order: i64 = conn.query_row(
            "SELECT COALESCE(MAX(insertion_order), 0) + 1 FROM questions",
            [],
            |row| row.get(0),
        )?;

        conn.execute(
            "INSERT INTO questions
                 (id, text, topic, difficulty, week, canonical_hash,
                  embedding, embedding_model, insertion_order, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                input.id,
                input.text,
                input.topic,
                input.difficulty,
                input.week,
                hash,
                input.embedding.as_ref().map(Embedding::to_bytes),
                input.embedding_model,
                insertion_order,
                created_at,
            ],
        )?;

        Ok(QuestionRecord {
            id: input.id.clone(),
            text: input.text.clone(),
            topic: input.topic.clone(),
            difficulty: input.difficulty.clone(),
            week: input.week,
            canonical_hash: hash,
            embedding: input.embedding.clone(),
            embedding_model: input.embedding_model.clone(),
            insertion_order,
            created_at,
        })
    }

    /// Fetch one question by id
    pub fn get_question(&self, id: &str) -> Result<Option<QuestionRecord>> {
        let conn = self.reader()?;
        let record = conn
            .query_row(
                "SELECT id, text, topic, difficulty, week, canonical_hash,
                        embedding, embedding_model, insertion_order, created_at
                 FROM questions WHERE id = ?1",
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// All questions in insertion order
    pub fn all_questions(&self) -> Result<Vec<QuestionRecord>> {
        let conn = self.reader()?;
        let mut stmt = conn.prepare(
            "SELECT id, text, topic, difficulty, week, canonical_hash,
                    embedding, embedding_model, insertion_order, created_at
             FROM questions ORDER BY insertion_order",
        )?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Number of stored questions
    pub fn question_count(&self) -> Result<i64> {
        let conn = self.reader()?;
        let count = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count)
    }

    // ========================================================================
    // REVIEW SCHEDULE
    // ========================================================================

    /// Insert or replace a question's review state
    pub fn upsert_review(&self, question_id: &str, state: &ReviewState) -> Result<()> {
        let conn = self.writer()?;
        conn.execute(
            "INSERT OR REPLACE INTO review_schedule
                 (question_id, last_seen, interval_days, ease_factor, next_due)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                question_id,
                state.last_seen,
                i64::from(state.interval_days),
                state.ease_factor,
                state.next_due,
            ],
        )?;
        Ok(())
    }

    /// Review state for one question, if scheduled
    pub fn review_state(&self, question_id: &str) -> Result<Option<ReviewState>> {
        let conn = self.reader()?;
        let state = conn
            .query_row(
                "SELECT last_seen, interval_days, ease_factor, next_due
                 FROM review_schedule WHERE question_id = ?1",
                params![question_id],
                row_to_review_state,
            )
            .optional()?;
        Ok(state)
    }

    /// Ids of questions due on or before `on`, soonest first
    pub fn due_questions(&self, on: NaiveDate) -> Result<Vec<String>> {
        let conn = self.reader()?;
        let mut stmt = conn.prepare(
            "SELECT question_id FROM review_schedule
             WHERE next_due <= ?1 ORDER BY next_due, question_id",
        )?;
        let ids = stmt
            .query_map(params![on], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }

    // ========================================================================
    // REHYDRATION
    // ========================================================================

    /// Rebuild a duplicate detector from stored questions.
    ///
    /// Stored embeddings are restored as-is; nothing is re-encoded. The
    /// encoder is only used for texts registered after the rebuild.
    pub fn rebuild_detector(
        &self,
        encoder: Encoder,
        backend: IndexBackend,
        config: DetectorConfig,
    ) -> Result<DuplicateDetector> {
        let detector = DuplicateDetector::with_config(encoder, backend, config);

        let rows: Vec<(String, String, Option<Vec<u8>>)> = {
            let conn = self.reader()?;
            let mut stmt = conn.prepare(
                "SELECT id, canonical_hash, embedding
                 FROM questions ORDER BY insertion_order",
            )?;
            stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?
        };

        let total = rows.len();
        for (id, hash, embedding_bytes) in rows {
            let embedding = match embedding_bytes {
                Some(bytes) => {
                    let parsed = Embedding::from_bytes(&bytes);
                    if parsed.is_none() {
                        tracing::warn!(question_id = %id, "stored embedding is malformed, restoring hash only");
                    }
                    parsed
                }
                None => None,
            };
            detector
                .restore(&id, &hash, embedding)
                .map_err(|e| StorageError::Rebuild(e.to_string()))?;
        }

        tracing::debug!(total, "detector rebuilt from question bank");
        Ok(detector)
    }

    /// Rebuild a review scheduler from the stored schedule
    pub fn load_scheduler(&self) -> Result<ReviewScheduler> {
        let mut scheduler = ReviewScheduler::new();

        let conn = self.reader()?;
        let mut stmt = conn.prepare(
            "SELECT question_id, last_seen, interval_days, ease_factor, next_due
             FROM review_schedule",
        )?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let state = ReviewState {
                last_seen: row.get(1)?,
                interval_days: row.get::<_, i64>(2)?.max(1) as u32,
                ease_factor: row.get(3)?,
                next_due: row.get(4)?,
            };
            Ok((id, state))
        })?;

        for row in rows {
            let (id, state) = row?;
            scheduler.restore(id, state);
        }

        Ok(scheduler)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<QuestionRecord> {
    let embedding_bytes: Option<Vec<u8>> = row.get(6)?;
    Ok(QuestionRecord {
        id: row.get(0)?,
        text: row.get(1)?,
        topic: row.get(2)?,
        difficulty: row.get(3)?,
        week: row.get(4)?,
        canonical_hash: row.get(5)?,
        embedding: embedding_bytes.and_then(|bytes| Embedding::from_bytes(&bytes)),
        embedding_model: row.get(7)?,
        insertion_order: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn row_to_review_state(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReviewState> {
    Ok(ReviewState {
        last_seen: row.get(0)?,
        interval_days: row.get::<_, i64>(1)?.max(1) as u32,
        ease_factor: row.get(2)?,
        next_due: row.get(3)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
