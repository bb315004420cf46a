use std::sync::Arc;

use crate::{
    db::RecipeRepository,
    error::{AppError, AppResult},
    models::{NewRating, NewRecipe, Rating, Recipe},
};

/// Maximum number of recipes returned by a search
pub const SEARCH_LIMIT: usize = 20;
pub const DEFAULT_POPULAR_LIMIT: usize = 10;
pub const MAX_POPULAR_LIMIT: usize = 50;
/// A single outlier rating cannot make a recipe popular
pub const MIN_RATINGS_FOR_POPULAR: usize = 2;

const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

/// Conjunctive recipe filter built from search parameters
///
/// Empty parameters are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    ingredient_tokens: Vec<String>,
    dietary_restriction: Option<String>,
    difficulty: Option<String>,
}

impl RecipeFilter {
    /// `ingredients` is comma separated; each token is trimmed and lowercased
    pub fn new(
        ingredients: Option<&str>,
        dietary_restriction: Option<&str>,
        difficulty: Option<&str>,
    ) -> Self {
        let ingredient_tokens: Vec<String> = ingredients
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').map(|t| t.trim().to_lowercase()).collect())
            .unwrap_or_default();

        Self {
            ingredient_tokens,
            dietary_restriction: non_empty(dietary_restriction),
            difficulty: non_empty(difficulty),
        }
    }

    pub fn ingredient_tokens(&self) -> &[String] {
        &self.ingredient_tokens
    }

    pub fn dietary_restriction(&self) -> Option<&str> {
        self.dietary_restriction.as_deref()
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    /// Substring match on ingredients (every token) and dietary restrictions,
    /// exact match on difficulty. Matching is case sensitive against stored text.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let ingredients_match = self
            .ingredient_tokens
            .iter()
            .all(|token| recipe.ingredients.contains(token.as_str()));

        let dietary_match = match &self.dietary_restriction {
            Some(wanted) => recipe
                .dietary_restrictions
                .as_deref()
                .is_some_and(|stored| stored.contains(wanted.as_str())),
            None => true,
        };

        let difficulty_match = match &self.difficulty {
            Some(wanted) => recipe.difficulty.as_deref() == Some(wanted.as_str()),
            None => true,
        };

        ingredients_match && dietary_match && difficulty_match
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Ranks `(recipe, rating_count)` pairs by descending average rating
///
/// Drops recipes rated fewer than `min_ratings` times. The sort is stable, so
/// equal averages keep the input order.
pub fn rank_by_average(
    rated: Vec<(Recipe, usize)>,
    min_ratings: usize,
    limit: usize,
) -> Vec<Recipe> {
    let mut eligible: Vec<Recipe> = rated
        .into_iter()
        .filter(|(_, count)| *count >= min_ratings)
        .map(|(recipe, _)| recipe)
        .collect();

    eligible.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
    eligible.truncate(limit);
    eligible
}

/// Recipe search, lookup, creation, rating and popularity ranking
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn RecipeRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    /// Finds up to 20 recipes matching every given filter
    pub async fn search(
        &self,
        ingredients: Option<&str>,
        dietary_restriction: Option<&str>,
        difficulty: Option<&str>,
    ) -> AppResult<Vec<Recipe>> {
        let filter = RecipeFilter::new(ingredients, dietary_restriction, difficulty);
        let recipes = self.repository.search(&filter, SEARCH_LIMIT).await?;

        tracing::debug!(
            tokens = filter.ingredient_tokens().len(),
            results = recipes.len(),
            "Recipe search completed"
        );

        Ok(recipes)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Recipe> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
    }

    pub async fn create(&self, recipe: NewRecipe) -> AppResult<Recipe> {
        for (field, value) in [
            ("title", &recipe.title),
            ("ingredients", &recipe.ingredients),
            ("instructions", &recipe.instructions),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!("{} cannot be empty", field)));
            }
        }

        let recipe = self.repository.insert(recipe).await?;
        tracing::info!(recipe_id = recipe.id, title = %recipe.title, "Recipe created");
        Ok(recipe)
    }

    /// Appends a rating to an existing recipe
    pub async fn rate(&self, recipe_id: i64, rating: NewRating) -> AppResult<Rating> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating.rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let rating = self.repository.insert_rating(recipe_id, rating).await?;
        tracing::info!(recipe_id, rating = rating.rating, "Recipe rated");
        Ok(rating)
    }

    /// Best-rated recipes having at least two ratings
    pub async fn popular(&self, limit: Option<usize>) -> AppResult<Vec<Recipe>> {
        let limit = limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
        if limit > MAX_POPULAR_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "limit must be at most {}",
                MAX_POPULAR_LIMIT
            )));
        }

        self.repository
            .popular(MIN_RATINGS_FOR_POPULAR, limit)
            .await
    }
}
