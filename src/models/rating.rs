use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_NAME: &str = "Anonymous";

/// A single score left on a recipe. Ratings are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Rating {
    pub id: i64,
    pub recipe_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for rating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRating {
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl NewRating {
    pub fn new(rating: i32) -> Self {
        Self {
            rating,
            comment: None,
            user_name: None,
        }
    }

    /// The label stored with the rating, "Anonymous" when none was given
    pub fn user_name_or_default(&self) -> String {
        self.user_name
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string())
    }
}
