//! Storage Module
//!
//! SQLite persistence for the question bank:
//! - Versioned schema migrations
//! - Question records with canonical hashes and embedding bytes
//! - Review schedule persistence
//! - Detector/scheduler rehydration at startup

mod migrations;
mod sqlite;

pub use migrations::{apply_migrations, get_current_version, Migration, MIGRATIONS};
pub use sqlite::{NewQuestion, QuestionBank, QuestionRecord, Result, StorageError};
