// tests/integration_test.rs

//! Integration tests for Gourmet
//!
//! These tests verify end-to-end functionality across modules.

use gourmet::db;
use gourmet::db::models::{Recipe, RecipeFilter, User};
use tempfile::NamedTempFile;

#[test]
fn test_database_lifecycle() {
    // Create a temporary database
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();

    // Remove the temp file so init can create it
    drop(temp_file);

    // Initialize the database
    let init_result = db::init(&db_path);
    assert!(
        init_result.is_ok(),
        "Database initialization should succeed"
    );

    // Verify database file exists
    assert!(
        std::path::Path::new(&db_path).exists(),
        "Database file should exist after initialization"
    );

    // Open the database
    let conn_result = db::open(&db_path);
    assert!(conn_result.is_ok(), "Opening database should succeed");

    // Verify we can execute a simple query
    let conn = conn_result.unwrap();
    let result: Result<i32, _> = conn.query_row("SELECT 1", [], |row| row.get(0));
    assert_eq!(result.unwrap(), 1, "Should be able to execute queries");
}

#[test]
fn test_database_init_creates_parent_directories() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("nested/path/to/gourmet.db")
        .to_str()
        .unwrap()
        .to_string();

    let result = db::init(&db_path);
    assert!(result.is_ok(), "Should create parent directories");
    assert!(
        std::path::Path::new(&db_path).exists(),
        "Database should exist in nested path"
    );
}

#[test]
fn test_database_init_is_idempotent() {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    drop(temp_file);

    db::init(&db_path).unwrap();

    // Seed a row, then init again; the data must survive
    let conn = db::open(&db_path).unwrap();
    let mut user = User::new("alice".to_string(), "$argon2id$fake".to_string());
    user.insert(&conn).unwrap();
    drop(conn);

    db::init(&db_path).unwrap();

    let conn = db::open(&db_path).unwrap();
    let found = User::find_by_username(&conn, "alice").unwrap();
    assert!(found.is_some(), "Existing rows should survive re-init");
}

#[test]
fn test_database_pragmas_are_set() {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    drop(temp_file);

    db::init(&db_path).unwrap();
    let conn = db::open(&db_path).unwrap();

    // Verify foreign keys are enabled
    let foreign_keys: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1, "Foreign keys should be enabled");

    // Verify WAL mode (on a fresh init)
    let journal_mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(
        journal_mode.to_lowercase(),
        "wal",
        "Journal mode should be WAL"
    );
}

#[test]
fn test_full_catalog_workflow_with_transaction() {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    drop(temp_file);

    // Initialize database with schema
    db::init(&db_path).unwrap();
    let mut conn = db::open(&db_path).unwrap();

    // Register a user and build up a small catalog atomically
    let result = db::transaction(&mut conn, |tx| {
        let mut user = User::new("alice".to_string(), "$argon2id$fake".to_string());
        user.insert(tx)?;

        let mut omelette = Recipe::new("Omelette".to_string(), "eggs, butter".to_string(), 10);
        omelette.insert(tx)?;

        let mut pancakes =
            Recipe::new("Pancakes".to_string(), "flour, eggs, milk".to_string(), 20);
        pancakes.insert(tx)?;

        Ok(())
    });

    assert!(result.is_ok(), "Transaction should succeed");

    // Verify the data was committed
    let user = User::find_by_username(&conn, "alice").unwrap();
    assert!(user.is_some());

    let recipes = Recipe::list_filtered(&conn, &RecipeFilter::default()).unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].title, "Omelette");
}

#[test]
fn test_transaction_rollback_on_error() {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    drop(temp_file);

    db::init(&db_path).unwrap();
    let mut conn = db::open(&db_path).unwrap();

    let mut existing = User::new("alice".to_string(), "$argon2id$fake".to_string());
    existing.insert(&conn).unwrap();

    // Try a transaction that will fail halfway through
    let result = db::transaction(&mut conn, |tx| {
        let mut recipe = Recipe::new("Omelette".to_string(), "eggs".to_string(), 10);
        recipe.insert(tx)?;

        // Duplicate username violates the UNIQUE constraint
        let mut duplicate = User::new("alice".to_string(), "$argon2id$other".to_string());
        duplicate.insert(tx)?;

        Ok(())
    });

    assert!(result.is_err(), "Transaction should fail on duplicate");

    // Verify nothing from the transaction was committed
    let recipes = Recipe::list_filtered(&conn, &RecipeFilter::default()).unwrap();
    assert_eq!(
        recipes.len(),
        0,
        "No recipes should be in database after rollback"
    );
}

#[test]
fn test_duplicate_registration_races_resolve_in_the_store() {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    drop(temp_file);

    db::init(&db_path).unwrap();

    // Two connections inserting the same username; exactly one wins
    let conn_a = db::open(&db_path).unwrap();
    let conn_b = db::open(&db_path).unwrap();

    let mut first = User::new("alice".to_string(), "$argon2id$one".to_string());
    first.insert(&conn_a).unwrap();

    let mut second = User::new("alice".to_string(), "$argon2id$two".to_string());
    let err = second.insert(&conn_b).unwrap_err();
    assert!(matches!(err, gourmet::Error::Conflict(_)));

    let conn = db::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM users WHERE username = 'alice'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1, "Exactly one registration should win");
}
