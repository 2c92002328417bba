//! Database Migrations
//!
//! Schema migration definitions for the question bank.

/// Migration definitions
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema: question bank with canonical hashes and embeddings",
        up: MIGRATION_V1_UP,
    },
    Migration {
        version: 2,
        description: "Spaced repetition review schedule",
        up: MIGRATION_V2_UP,
    },
];

/// A database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Version number
    pub version: u32,
    /// Description
    pub description: &'static str,
    /// SQL to apply
    pub up: &'static str,
}

/// V1: Question bank
const MIGRATION_V1_UP: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL
);

INSERT INTO schema_version (version, applied_at)
SELECT 0, datetime('now')
WHERE NOT EXISTS (SELECT 1 FROM schema_version);

CREATE TABLE IF NOT EXISTS questions (
    id TEXT PRIMARY KEY,
    text TEXT NOT NULL,
    topic TEXT,
    difficulty TEXT,
    week INTEGER,

    -- exact-duplicate lookup key
    canonical_hash TEXT NOT NULL UNIQUE,

    -- embedding vector as little-endian f32 bytes; NULL when registered
    -- without an encoder
    embedding BLOB,
    embedding_model TEXT,

    -- defines semantic tie-break order
    insertion_order INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_questions_canonical_hash ON questions(canonical_hash);
CREATE UNIQUE INDEX IF NOT EXISTS idx_questions_insertion_order ON questions(insertion_order);

UPDATE schema_version SET version = 1, applied_at = datetime('now');
"#;

/// V2: Review schedule
const MIGRATION_V2_UP: &str = r#"
CREATE TABLE IF NOT EXISTS review_schedule (
    question_id TEXT PRIMARY KEY REFERENCES questions(id),
    last_seen TEXT NOT NULL,
    interval_days INTEGER NOT NULL,
    ease_factor REAL NOT NULL,
    next_due TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_review_schedule_next_due ON review_schedule(next_due);

UPDATE schema_version SET version = 2, applied_at = datetime('now');
"#;

/// Get current schema version from database
pub fn get_current_version(conn: &rusqlite::Connection) -> rusqlite::Result<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .or(Ok(0))
}

/// Apply pending migrations
pub fn apply_migrations(conn: &rusqlite::Connection) -> rusqlite::Result<u32> {
    let current_version = get_current_version(conn)?;
    let mut applied = 0;

    for migration in MIGRATIONS {
        if migration.version > current_version {
            tracing::info!(
                "Applying migration v{}: {}",
                migration.version,
                migration.description
            );

            conn.execute_batch(migration.up)?;
            applied += 1;
        }
    }

    Ok(applied)
}

// ============================================================================
// TESTS
// ============================================================================
