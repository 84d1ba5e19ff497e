// src/server/routes.rs
//! Axum router configuration for the Gourmet server

use crate::server::handlers::{SharedState, auth, recipes};
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

/// Create the main application router
pub fn create_router(state: SharedState) -> Router {
    // CORS configuration - permissive for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new();

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Account endpoints
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Probe route for checking a token
        .route("/protected", get(auth::protected))
        // Recipe catalog
        .route("/recipes", get(recipes::list_recipes))
        .route("/recipes", post(recipes::create_recipe))
        .route("/recipes/:id", put(recipes::update_recipe))
        .layer(compression)
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = crate::server::ServerConfig::default();
        let state = Arc::new(crate::server::ServerState::new(config));
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_requires_token() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_recipe_listing_requires_token() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/recipes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
