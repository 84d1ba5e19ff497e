// src/auth/mod.rs

//! Authentication primitives
//!
//! Two concerns live here: storing passwords safely (Argon2 hashes,
//! never plaintext) and issuing/verifying the bearer tokens that guard
//! the recipe routes.

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenSigner};
