// src/db/models/user.rs

//! User model - registered accounts

use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};

/// A registered user
///
/// Only the Argon2 hash of the password is ever stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub password_hash: String,
    pub created_at: Option<String>,
}

impl User {
    /// Create a new User
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: None,
            username,
            password_hash,
            created_at: None,
        }
    }

    /// Insert this user into the database
    ///
    /// The UNIQUE constraint on username is the only uniqueness check:
    /// a violation maps to [`Error::Conflict`], so two concurrent
    /// registrations of the same name cannot both succeed.
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        let result = conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
            params![&self.username, &self.password_hash],
        );

        match result {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                self.id = Some(id);
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(Error::Conflict("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find a user by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?1",
        )?;

        let user = stmt.query_row([id], Self::from_row).optional()?;

        Ok(user)
    }

    /// Find a user by username
    pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
        )?;

        let user = stmt.query_row([username], Self::from_row).optional()?;

        Ok(user)
    }

    /// Convert a database row to a User
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            username: row.get(1)?,
            password_hash: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}
