// src/lib.rs

//! Gourmet Recipe Catalog
//!
//! A recipe-catalog web service: user registration and login with JWT
//! bearer tokens, and create/list/update management of recipe records.
//!
//! # Architecture
//!
//! - Database-first: all state in SQLite, opened per operation
//! - Auth: Argon2 password hashes, HMAC-signed tokens carrying the user id
//! - One shared validation routine guards every write to a recipe
//! - Server state (database path + signing key) built once at startup
//!   and passed explicitly to handlers

pub mod auth;
pub mod db;
mod error;
pub mod server;

pub use error::{Error, FieldError, Result};
