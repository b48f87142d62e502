//! Database module for Embellisher
//!
//! Persists the per-user conversation state.

mod schema;

pub use schema::*;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get the stored state for a user, if any
    pub fn get_state(&self, user_id: &str) -> DbResult<Option<ConversationState>> {
        let conn = self.conn.lock().unwrap();
        let state = conn
            .query_row(
                "SELECT last_response, last_emoji_level, active_room_id
                 FROM conversation_state WHERE user_id = ?1",
                params![user_id],
                |row| {
                    let level: i64 = row.get(1)?;
                    Ok(ConversationState {
                        last_response: row.get(0)?,
                        last_emoji_level: u8::try_from(level.clamp(0, 100)).unwrap_or_default(),
                        active_room_id: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(state)
    }

    /// Insert or replace the state for a user (last write wins)
    pub fn put_state(&self, user_id: &str, state: &ConversationState) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO conversation_state (user_id, last_response, last_emoji_level, active_room_id, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id) DO UPDATE SET
                last_response = excluded.last_response,
                last_emoji_level = excluded.last_emoji_level,
                active_room_id = excluded.active_room_id,
                updated_at = excluded.updated_at",
            params![
                user_id,
                state.last_response,
                i64::from(state.last_emoji_level),
                state.active_room_id,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}
