use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{NewRating, NewRecipe, Rating, Recipe},
    services::catalog::{rank_by_average, RecipeFilter},
};

use super::RecipeRepository;

/// Process-local recipe store
///
/// Used when no database is configured, and by tests. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryRecipeRepository {
    inner: Arc<RwLock<MemoryStore>>,
}

#[derive(Default)]
struct MemoryStore {
    /// Kept in insertion order, `average_rating` left at 0
    recipes: Vec<Recipe>,
    ratings: Vec<Rating>,
    last_recipe_id: i64,
    last_rating_id: i64,
}

impl MemoryStore {
    /// (average, count) over the recipe's ratings
    fn rating_stats(&self, recipe_id: i64) -> (f64, usize) {
        let (sum, count) = self
            .ratings
            .iter()
            .filter(|r| r.recipe_id == recipe_id)
            .fold((0i64, 0usize), |(sum, count), r| {
                (sum + i64::from(r.rating), count + 1)
            });

        if count == 0 {
            (0.0, 0)
        } else {
            (sum as f64 / count as f64, count)
        }
    }

    fn with_average(&self, recipe: &Recipe) -> Recipe {
        let (average, _) = self.rating_stats(recipe.id);
        Recipe {
            average_rating: average,
            ..recipe.clone()
        }
    }
}

impl MemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn search(&self, filter: &RecipeFilter, limit: usize) -> AppResult<Vec<Recipe>> {
        let store = self.inner.read().await;
        Ok(store
            .recipes
            .iter()
            .filter(|recipe| filter.matches(recipe))
            .take(limit)
            .map(|recipe| store.with_average(recipe))
            .collect())
    }

    async fn get(&self, id: i64) -> AppResult<Option<Recipe>> {
        let store = self.inner.read().await;
        Ok(store
            .recipes
            .iter()
            .find(|recipe| recipe.id == id)
            .map(|recipe| store.with_average(recipe)))
    }

    async fn insert(&self, recipe: NewRecipe) -> AppResult<Recipe> {
        let mut store = self.inner.write().await;
        store.last_recipe_id += 1;
        let recipe = recipe.into_recipe(store.last_recipe_id, Utc::now());
        store.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn insert_rating(&self, recipe_id: i64, rating: NewRating) -> AppResult<Rating> {
        let mut store = self.inner.write().await;

        if !store.recipes.iter().any(|recipe| recipe.id == recipe_id) {
            return Err(AppError::NotFound(format!(
                "Recipe {} not found",
                recipe_id
            )));
        }

        store.last_rating_id += 1;
        let user_name = rating.user_name_or_default();
        let rating = Rating {
            id: store.last_rating_id,
            recipe_id,
            rating: rating.rating,
            comment: rating.comment,
            user_name,
            created_at: Utc::now(),
        };
        store.ratings.push(rating.clone());

        Ok(rating)
    }

    async fn popular(&self, min_ratings: usize, limit: usize) -> AppResult<Vec<Recipe>> {
        let store = self.inner.read().await;
        let rated = store
            .recipes
            .iter()
            .map(|recipe| {
                let (average, count) = store.rating_stats(recipe.id);
                (
                    Recipe {
                        average_rating: average,
                        ..recipe.clone()
                    },
                    count,
                )
            })
            .collect();

        Ok(rank_by_average(rated, min_ratings, limit))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
