use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{NewRating, NewRecipe, Rating, Recipe},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    ingredients: Option<String>,
    dietary_restriction: Option<String>,
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    limit: Option<usize>,
}

/// Handler for recipe search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    let recipes = state
        .catalog
        .search(
            params.ingredients.as_deref(),
            params.dietary_restriction.as_deref(),
            params.difficulty.as_deref(),
        )
        .await?;
    Ok(Json(recipes))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(recipe): Json<NewRecipe>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    let recipe = state.catalog.create(recipe).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(state.catalog.get_by_id(id).await?))
}

/// Handler for rating a recipe
pub async fn rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(rating): Json<NewRating>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    let rating = state.catalog.rate(id, rating).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// Handler for the popularity ranking
pub async fn popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PopularQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.catalog.popular(params.limit).await?))
}
