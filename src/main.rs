use std::sync::Arc;

use recipe_api::{
    config::Config,
    db::{create_pool, MemoryRecipeRepository, PgRecipeRepository, RecipeRepository},
    routes::{create_router, AppState},
    services::{CatalogService, RecommendationEngine},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recipe_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let repository: Arc<dyn RecipeRepository> = match config.database_url() {
        Some(url) => Arc::new(PgRecipeRepository::new(create_pool(url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set, recipes are kept in memory only");
            Arc::new(MemoryRecipeRepository::new())
        }
    };

    let recommender = RecommendationEngine::from_config(&config);
    if !recommender.is_ai_enabled() {
        tracing::warn!("OPENAI_API_KEY not set, recommendations use built-in suggestions");
    }

    tracing::info!(
        storage = repository.name(),
        ai_enabled = recommender.is_ai_enabled(),
        "Application state initialized"
    );

    let state = AppState::new(CatalogService::new(repository), recommender);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
