//! The single write connection. All mutations are serialized through it.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use matchbook_core::errors::{MatchbookError, MatchbookResult, StorageError};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Owns the one connection allowed to write. SQLite permits a single writer
/// under WAL; serializing through a mutex keeps batch jobs from tripping
/// over `SQLITE_BUSY`.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> MatchbookResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> MatchbookResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Execute a closure with the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> MatchbookResult<T>
    where
        F: FnOnce(&Connection) -> MatchbookResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            MatchbookError::Storage(StorageError::PoolPoisoned { message: e.to_string() })
        })?;
        f(&guard)
    }
}
