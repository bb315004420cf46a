use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::RecipeRecommendation,
    routes::AppState,
    services::recommendations::DEFAULT_SKILL_LEVEL,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub ingredients: String,
    pub dietary_preferences: Option<String>,
    pub skill_level: Option<String>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<RecipeRecommendation>>> {
    let skill_level = params
        .skill_level
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SKILL_LEVEL);

    tracing::info!(
        request_id = %request_id,
        skill_level = %skill_level,
        ai_enabled = state.recommender.is_ai_enabled(),
        "Processing recommendation request"
    );

    let recommendations = state
        .recommender
        .recommend(
            &params.ingredients,
            params.dietary_preferences.as_deref(),
            skill_level,
        )
        .await?;

    Ok(Json(recommendations))
}
