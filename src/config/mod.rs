//! Key-value configuration storage backed by SQLite, plus server resolution.
//!
//! Only a handful of keys exist today (see [`SERVER_KEY`]); the table is
//! generic so new settings need no migration.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

use crate::consts::DEFAULT_SERVER;
use crate::evaluator::http::endpoint_url;

/// Config key holding the default server base URL.
pub const SERVER_KEY: &str = "server";

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a config value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a config key.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// Pick the server URL: explicit override, then stored config, then default.
pub fn resolve_server(explicit: Option<&str>, config: &Config) -> Result<String> {
    if let Some(server) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(server.to_string());
    }
    Ok(config
        .get(SERVER_KEY)?
        .unwrap_or_else(|| DEFAULT_SERVER.to_string()))
}

/// Validate and persist the default server.
///
/// Shared by the `evalpad server <url>` subcommand and the `/server` REPL
/// command. Returns the normalized URL that was stored.
pub fn save_server(db_path: &Path, server: &str) -> Result<String> {
    let server = server.trim();
    endpoint_url(server)?;
    let config = Config::open(db_path)?;
    config
        .set(SERVER_KEY, server)
        .context("failed to save server")?;
    Ok(server.to_string())
}

/// Forget the saved server. Returns the server now in effect.
pub fn reset_server(db_path: &Path) -> Result<String> {
    let config = Config::open(db_path)?;
    config
        .remove(SERVER_KEY)
        .context("failed to clear saved server")?;
    resolve_server(None, &config)
}
