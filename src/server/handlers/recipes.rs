// src/server/handlers/recipes.rs
//! Recipe catalog handlers for the Gourmet server

use crate::db::models::{Recipe, RecipeFilter};
use crate::error::FieldError;
use crate::server::handlers::{ApiError, ApiResult, MessageResponse, SharedState, authenticate};
use crate::{Error, db};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Json, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request body for creating a recipe
///
/// Fields are optional at the deserialization layer so that missing and
/// empty values get reported through the same validation path.
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub time_minutes: Option<i64>,
}

/// Request body for a partial recipe update
///
/// Only the supplied fields are changed; the rest keep their stored
/// values.
#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub time_minutes: Option<i64>,
}

/// Query parameters for listing recipes
#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    /// Case-insensitive substring match on ingredients
    pub ingredient: Option<String>,
    /// Inclusive upper bound on preparation time
    pub max_time: Option<i64>,
}

/// One recipe in a listing response
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub ingredients: String,
    pub time_minutes: i64,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.unwrap_or_default(),
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            time_minutes: recipe.time_minutes,
        }
    }
}

/// Validate recipe fields, collecting every violation
///
/// Creation and update both come through here, so the rules cannot
/// drift apart. Returns one entry per failed field.
fn validate_recipe(title: &str, ingredients: &str, time_minutes: i64) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push(FieldError::new("title", "title must not be empty"));
    }
    if ingredients.trim().is_empty() {
        errors.push(FieldError::new("ingredients", "ingredients must not be empty"));
    }
    if time_minutes <= 0 {
        errors.push(FieldError::new(
            "time_minutes",
            "time_minutes must be a positive integer",
        ));
    }

    errors
}

/// Create a recipe
///
/// POST /recipes
pub async fn create_recipe(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<CreateRecipeRequest>,
) -> ApiResult<Response> {
    authenticate(&state, &headers)?;

    let title = request.title.unwrap_or_default();
    let ingredients = request.ingredients.unwrap_or_default();
    let time_minutes = request.time_minutes.unwrap_or_default();

    let errors = validate_recipe(&title, &ingredients, time_minutes);
    if !errors.is_empty() {
        return Err(ApiError(Error::Validation(errors)));
    }

    let result: Result<i64, crate::Error> = tokio::task::spawn_blocking(move || {
        let conn = state.open_db()?;

        let mut recipe = Recipe::new(title, ingredients, time_minutes);
        recipe.insert(&conn)
    })
    .await
    .map_err(|e| ApiError(Error::Internal(format!("Task join error: {e}"))))?;

    let recipe_id = result?;
    info!("Recipe {} created", recipe_id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            msg: "Recipe created".to_string(),
        }),
    )
        .into_response())
}

/// List recipes, optionally filtered
///
/// GET /recipes?ingredient=<substring>&max_time=<minutes>
///
/// Both filters are optional and combine with AND. Results are always
/// ordered by ascending id.
pub async fn list_recipes(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<RecipeListQuery>,
) -> ApiResult<Json<Vec<RecipeSummary>>> {
    authenticate(&state, &headers)?;

    let filter = RecipeFilter {
        ingredient: query.ingredient,
        max_time: query.max_time,
    };

    let result: Result<Vec<Recipe>, crate::Error> = tokio::task::spawn_blocking(move || {
        let conn = state.open_db()?;
        Recipe::list_filtered(&conn, &filter)
    })
    .await
    .map_err(|e| ApiError(Error::Internal(format!("Task join error: {e}"))))?;

    let recipes = result?;
    let summaries: Vec<RecipeSummary> = recipes.iter().map(RecipeSummary::from).collect();
    Ok(Json(summaries))
}

/// Update an existing recipe
///
/// PUT /recipes/:id
///
/// Loads the stored recipe, merges the supplied fields over it, and
/// validates the merged result before anything is written.
pub async fn update_recipe(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateRecipeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    authenticate(&state, &headers)?;

    let result: Result<(), crate::Error> = tokio::task::spawn_blocking(move || {
        let mut conn = state.open_db()?;

        db::transaction(&mut conn, |tx| {
            let mut recipe = match Recipe::find_by_id(tx, id)? {
                Some(recipe) => recipe,
                None => return Err(Error::NotFound(format!("Recipe {id}"))),
            };

            if let Some(title) = request.title {
                recipe.title = title;
            }
            if let Some(ingredients) = request.ingredients {
                recipe.ingredients = ingredients;
            }
            if let Some(time_minutes) = request.time_minutes {
                recipe.time_minutes = time_minutes;
            }

            let errors = validate_recipe(&recipe.title, &recipe.ingredients, recipe.time_minutes);
            if !errors.is_empty() {
                return Err(Error::Validation(errors));
            }

            recipe.update(tx)?;
            Ok(())
        })
    })
    .await
    .map_err(|e| ApiError(Error::Internal(format!("Task join error: {e}"))))?;

    result?;
    info!("Recipe {} updated", id);

    Ok(Json(MessageResponse {
        msg: "Recipe updated".to_string(),
    }))
}
