use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{CatalogService, RecommendationEngine},
};

pub mod recipes;
pub mod recommendations;

/// Shared handler state
pub struct AppState {
    pub catalog: CatalogService,
    pub recommender: RecommendationEngine,
}

impl AppState {
    pub fn new(catalog: CatalogService, recommender: RecommendationEngine) -> Self {
        Self {
            catalog,
            recommender,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/recipes", get(recipes::search).post(recipes::create))
        .route("/recipes/popular", get(recipes::popular))
        .route("/recipes/:id", get(recipes::get))
        .route("/recipes/:id/rate", post(recipes::rate))
        .route("/recommendations", get(recommendations::recommend))
        .with_state(Arc::new(state))
        // Outermost first: the request id must exist before the trace span is made
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Recipe Recommendation API",
        "docs": "/recipes, /recipes/popular, /recommendations",
        "health": "/health"
    }))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
