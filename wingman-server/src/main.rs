use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wingman_server::{config::Config, llm::LlmService, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        "Using model {} (max {} completion tokens)",
        cfg.generation.model, cfg.generation.max_completion_tokens
    );

    let generator = Arc::new(LlmService::new(cfg.api_key.clone(), cfg.api_base.clone()));
    let state = AppState::new(generator, cfg.generation.clone());
    let app = router(state);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
