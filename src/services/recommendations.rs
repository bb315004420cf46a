use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::RecipeRecommendation,
    services::providers::{CompletionProvider, CompletionRequest, OpenAiProvider},
};

pub const DEFAULT_SKILL_LEVEL: &str = "beginner";

const SYSTEM_PROMPT: &str =
    "You are a helpful cooking assistant that suggests creative recipes.";

/// Whether recommendations may call out to a language model
///
/// Resolved once from configuration when the engine is built.
#[derive(Clone)]
pub enum AiMode {
    Enabled(Arc<dyn CompletionProvider>),
    FallbackOnly,
}

/// Generation parameters for the completion call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Bounded wait on the provider; the fallback is used once it elapses
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1500,
            temperature: 0.8,
            timeout: Duration::from_secs(10),
        }
    }
}

/// The model's reply could not be read as a list of recommendations
#[derive(thiserror::Error, Debug)]
#[error("Malformed recommendation payload: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Produces recipe suggestions for a set of available ingredients
///
/// With AI enabled, one completion call is made per request. Any provider
/// error, timeout or malformed reply yields the built-in suggestions instead;
/// callers never see a provider failure.
#[derive(Clone)]
pub struct RecommendationEngine {
    mode: AiMode,
    settings: GenerationSettings,
}

impl RecommendationEngine {
    pub fn new(mode: AiMode, settings: GenerationSettings) -> Self {
        Self { mode, settings }
    }

    pub fn fallback_only() -> Self {
        Self::new(AiMode::FallbackOnly, GenerationSettings::default())
    }

    /// Builds an OpenAI-backed engine when an API key is configured
    pub fn from_config(config: &Config) -> Self {
        let settings = GenerationSettings {
            max_tokens: config.ai_max_tokens,
            temperature: config.ai_temperature,
            timeout: Duration::from_secs(config.ai_timeout_secs),
        };

        let mode = match config.ai_api_key() {
            Some(api_key) => AiMode::Enabled(Arc::new(OpenAiProvider::new(
                api_key.to_string(),
                config.openai_api_url.clone(),
                config.openai_model.clone(),
            ))),
            None => AiMode::FallbackOnly,
        };

        Self::new(mode, settings)
    }

    pub fn is_ai_enabled(&self) -> bool {
        matches!(self.mode, AiMode::Enabled(_))
    }

    /// Suggests recipes for the comma separated `ingredients`
    ///
    /// Only fails when `ingredients` is blank.
    pub async fn recommend(
        &self,
        ingredients: &str,
        dietary_preferences: Option<&str>,
        skill_level: &str,
    ) -> AppResult<Vec<RecipeRecommendation>> {
        if ingredients.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "ingredients cannot be empty".to_string(),
            ));
        }

        let provider = match &self.mode {
            AiMode::Enabled(provider) => provider,
            AiMode::FallbackOnly => {
                tracing::info!("No AI credentials configured, using fallback recommendations");
                return Ok(fallback_recommendations(ingredients));
            }
        };

        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_prompt(ingredients, dietary_preferences, skill_level),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let reply =
            match tokio::time::timeout(self.settings.timeout, provider.complete(&request)).await {
                Ok(Ok(reply)) => reply,
                Ok(Err(e)) => {
                    tracing::warn!(
                        error = %e,
                        provider = provider.name(),
                        "AI recommendation failed, using fallback"
                    );
                    return Ok(fallback_recommendations(ingredients));
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = self.settings.timeout.as_secs_f64(),
                        provider = provider.name(),
                        "AI recommendation timed out, using fallback"
                    );
                    return Ok(fallback_recommendations(ingredients));
                }
            };

        match parse_recommendations(&reply) {
            Ok(recommendations) => {
                tracing::info!(
                    count = recommendations.len(),
                    provider = provider.name(),
                    "AI recommendations generated"
                );
                Ok(recommendations)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable AI reply, using fallback");
                Ok(fallback_recommendations(ingredients))
            }
        }
    }
}

/// User message asking for exactly three recipes as a JSON array
pub fn build_prompt(
    ingredients: &str,
    dietary_preferences: Option<&str>,
    skill_level: &str,
) -> String {
    format!(
        r#"Based on these available ingredients: {ingredients}
Dietary preferences: {dietary}
Cooking skill level: {skill_level}

Suggest 3 creative and practical recipes. For each recipe, provide:
- Title
- Brief description
- List of ingredients (including the ones provided)
- Step-by-step instructions
- Estimated prep time in minutes
- Difficulty level (easy/medium/hard)
- Why this recipe is recommended for these ingredients

Respond with only a JSON array of exactly 3 objects with this structure:
[{{
    "title": "Recipe Name",
    "description": "Brief description",
    "ingredients": ["ingredient1", "ingredient2"],
    "instructions": ["step1", "step2"],
    "prep_time": 30,
    "difficulty": "easy",
    "why_recommended": "Explanation"
}}]"#,
        dietary = dietary_preferences.unwrap_or("None"),
    )
}

/// Strictly decodes a model reply into recommendations
///
/// The reply must be a JSON array whose elements carry every recommendation
/// field with the right type. The number of elements is not checked.
pub fn parse_recommendations(reply: &str) -> Result<Vec<RecipeRecommendation>, ParseError> {
    Ok(serde_json::from_str(reply.trim())?)
}

/// The two built-in suggestions used when the model is unavailable
///
/// Pure: the same ingredient string always yields the same result.
pub fn fallback_recommendations(ingredients: &str) -> Vec<RecipeRecommendation> {
    let items: Vec<String> = ingredients
        .split(',')
        .map(|item| item.trim().to_string())
        .collect();
    let first = items.first().map(String::as_str).unwrap_or_default();

    let with_extras = |extras: &[&str]| -> Vec<String> {
        items
            .iter()
            .cloned()
            .chain(extras.iter().map(|extra| extra.to_string()))
            .collect()
    };

    vec![
        RecipeRecommendation {
            title: format!("Simple {} Stir-fry", title_case(first)),
            description: format!("A quick and easy stir-fry featuring {}", first),
            ingredients: with_extras(&["soy sauce", "garlic", "oil"]),
            instructions: vec![
                "Heat oil in a pan".to_string(),
                format!("Add {} and cook for 5 minutes", first),
                "Add garlic and soy sauce".to_string(),
                "Stir-fry for 3 more minutes".to_string(),
                "Serve hot".to_string(),
            ],
            prep_time: 15,
            difficulty: "easy".to_string(),
            why_recommended: format!("Perfect for using {} in a simple, healthy dish", first),
        },
        RecipeRecommendation {
            title: "Mixed Ingredient Soup".to_string(),
            description: "A hearty soup using your available ingredients".to_string(),
            ingredients: with_extras(&["broth", "onion", "salt", "pepper"]),
            instructions: vec![
                "Sauté onion until soft".to_string(),
                "Add your ingredients and broth".to_string(),
                "Simmer for 20 minutes".to_string(),
                "Season with salt and pepper".to_string(),
                "Serve warm".to_string(),
            ],
            prep_time: 30,
            difficulty: "easy".to_string(),
            why_recommended: "Great way to combine multiple ingredients into a comforting meal"
                .to_string(),
        },
    ]
}

/// Uppercases the first letter of every word and lowercases the rest.
/// Any non-alphabetic character starts a new word.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}
