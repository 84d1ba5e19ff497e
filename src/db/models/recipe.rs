// src/db/models/recipe.rs

//! Recipe model - catalog entries

use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};

/// Optional filters for listing recipes
///
/// Filters are combined with AND. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Case-insensitive substring match against the ingredients text
    pub ingredient: Option<String>,
    /// Inclusive upper bound on time_minutes
    pub max_time: Option<i64>,
}

/// A recipe in the catalog
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: Option<i64>,
    pub title: String,
    pub ingredients: String,
    pub time_minutes: i64,
    pub created_at: Option<String>,
}

impl Recipe {
    /// Create a new Recipe
    pub fn new(title: String, ingredients: String, time_minutes: i64) -> Self {
        Self {
            id: None,
            title,
            ingredients,
            time_minutes,
            created_at: None,
        }
    }

    /// Insert this recipe into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO recipes (title, ingredients, time_minutes) VALUES (?1, ?2, ?3)",
            params![&self.title, &self.ingredients, self.time_minutes],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Find a recipe by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, ingredients, time_minutes, created_at FROM recipes WHERE id = ?1",
        )?;

        let recipe = stmt.query_row([id], Self::from_row).optional()?;

        Ok(recipe)
    }

    /// Persist the current field values for an existing recipe
    pub fn update(&self, conn: &Connection) -> Result<()> {
        let id = match self.id {
            Some(id) => id,
            None => {
                return Err(Error::Internal(
                    "Cannot update a recipe without an id".to_string(),
                ));
            }
        };

        let changed = conn.execute(
            "UPDATE recipes SET title = ?1, ingredients = ?2, time_minutes = ?3 WHERE id = ?4",
            params![&self.title, &self.ingredients, self.time_minutes, id],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(format!("Recipe {id}")));
        }

        Ok(())
    }

    /// List recipes matching the given filter, ordered by ascending id
    ///
    /// The ingredient filter uses SQL LIKE, which compares ASCII
    /// characters case-insensitively.
    pub fn list_filtered(conn: &Connection, filter: &RecipeFilter) -> Result<Vec<Self>> {
        let mut sql = String::from(
            "SELECT id, title, ingredients, time_minutes, created_at FROM recipes",
        );
        let pattern;
        let mut clauses: Vec<&str> = Vec::new();
        let mut params: Vec<&dyn ToSql> = Vec::new();

        if let Some(ref ingredient) = filter.ingredient {
            pattern = format!("%{ingredient}%");
            clauses.push("ingredients LIKE ?");
            params.push(&pattern);
        }

        if let Some(ref max_time) = filter.max_time {
            clauses.push("time_minutes <= ?");
            params.push(max_time);
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = conn.prepare(&sql)?;
        let recipes = stmt
            .query_map(&params[..], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Convert a database row to a Recipe
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            ingredients: row.get(2)?,
            time_minutes: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}
