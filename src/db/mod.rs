// src/db/mod.rs

//! SQLite database layer
//!
//! All persistent state lives in a single SQLite database. The helpers
//! here open connections with the pragmas the rest of the crate relies
//! on and run the schema migrations on startup.

pub mod models;
pub mod schema;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

/// Create (or open) the database at `path` and bring it to the current
/// schema version
///
/// Parent directories are created as needed, so `init` works against a
/// path like `/var/lib/gourmet/gourmet.db` on a fresh host. Calling it
/// against an already-initialized database is a no-op.
pub fn init<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!("Initializing database at {}", path.display());

    let conn = Connection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    schema::migrate(&conn)?;

    Ok(conn)
}

/// Open an existing database without running migrations
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    debug!("Opening database at {}", path.display());

    let conn = Connection::open(path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    Ok(conn)
}

/// Run `f` inside a transaction, committing on success
///
/// If `f` returns an error the transaction is dropped, which rolls it
/// back.
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&rusqlite::Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}
