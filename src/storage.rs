//! Key-value device store: SQLite table for the app, HashMap for tests and previews.

use crate::errors::{ColorTapError, Result};
use crate::rust_log;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub const DB_FILE_NAME: &str = "colortap.db";

/// String keys to string values. Implementations serialize writes to the same key in call order.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

fn lock<'a, T>(m: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>> {
    m.lock()
        .map_err(|_| ColorTapError::StoreUnavailable(format!("{} lock poisoned", what)))
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) `colortap.db` inside `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let db_path = dir.join(DB_FILE_NAME);
        rust_log!("[colortap_rs] storage::open dir={:?} db={:?}", dir, db_path);
        let conn = Connection::open(&db_path)?;
        create_tables(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// RFC 3339 time of the last write to `key`.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        let conn = lock(&self.conn, "sqlite")?;
        let ts = conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(ts)
    }
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = lock(&self.conn, "sqlite")?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        let conn = lock(&self.conn, "sqlite")?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, updated_at],
        )?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.items, "memory store")?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.items, "memory store")?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
