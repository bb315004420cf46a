use serde::{Deserialize, Serialize};

/// A suggested recipe produced by the recommendation engine. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeRecommendation {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    /// Ordered steps
    pub instructions: Vec<String>,
    /// Minutes
    pub prep_time: u32,
    pub difficulty: String,
    /// Why the recipe suits the requested ingredients
    pub why_recommended: String,
}
