pub mod memory;
pub mod postgres;

pub use memory::MemoryRecipeRepository;
pub use postgres::{create_pool, PgRecipeRepository};

use crate::{
    error::AppResult,
    models::{NewRating, NewRecipe, Rating, Recipe},
    services::catalog::RecipeFilter,
};

/// Storage for recipes and their ratings
///
/// Every method is a single logical read or write; nothing spans calls.
/// Returned recipes always carry a freshly computed `average_rating`.
#[async_trait::async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Recipes matching every active filter, in insertion order, at most `limit`
    async fn search(&self, filter: &RecipeFilter, limit: usize) -> AppResult<Vec<Recipe>>;

    async fn get(&self, id: i64) -> AppResult<Option<Recipe>>;

    async fn insert(&self, recipe: NewRecipe) -> AppResult<Recipe>;

    /// Appends a rating. Fails with `NotFound` when the recipe does not exist.
    async fn insert_rating(&self, recipe_id: i64, rating: NewRating) -> AppResult<Rating>;

    /// Recipes with at least `min_ratings` ratings, best average first.
    /// Equal averages keep insertion order.
    async fn popular(&self, min_ratings: usize, limit: usize) -> AppResult<Vec<Recipe>>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
