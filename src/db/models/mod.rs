// src/db/models/mod.rs

//! Data models for Gourmet database entities
//!
//! This module defines Rust structs that correspond to database tables
//! and provides methods for creating, reading, and updating records.

mod recipe;
mod user;

pub use recipe::{Recipe, RecipeFilter};
pub use user::User;
