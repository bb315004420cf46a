use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored recipe as returned to clients
///
/// `average_rating` is computed from the recipe's ratings on every read and is
/// 0 when the recipe has not been rated yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Comma or line separated ingredient list, stored as free text
    pub ingredients: String,
    pub instructions: String,
    /// Minutes
    pub prep_time: Option<i32>,
    /// Minutes
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    /// One of easy/medium/hard by convention; not enforced
    pub difficulty: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub cuisine_type: Option<String>,
    pub calories_per_serving: Option<i32>,
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a recipe
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewRecipe {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    #[serde(default)]
    pub prep_time: Option<i32>,
    #[serde(default)]
    pub cook_time: Option<i32>,
    #[serde(default)]
    pub servings: Option<i32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub calories_per_serving: Option<i32>,
}

impl NewRecipe {
    /// Builds the stored representation once the store has assigned identity
    pub fn into_recipe(self, id: i64, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            title: self.title,
            description: self.description,
            ingredients: self.ingredients,
            instructions: self.instructions,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            dietary_restrictions: self.dietary_restrictions,
            cuisine_type: self.cuisine_type,
            calories_per_serving: self.calories_per_serving,
            average_rating: 0.0,
            created_at,
        }
    }
}
