mod rating;
mod recipe;
mod recommendation;

pub use rating::{NewRating, Rating, DEFAULT_USER_NAME};
pub use recipe::{NewRecipe, Recipe};
pub use recommendation::RecipeRecommendation;
