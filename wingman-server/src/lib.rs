//! Prompt proxy: turns structured coaching requests into a single model
//! completion and hands back schema-conformant JSON.

pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod output;
pub mod prompt;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use wingman_shared::{
    ADJUST_REPLY_PATH, ANALYZE_CHAT_PATH, GENERATE_BIO_PATH, GENERATE_OPENER_PATH,
    GENERATE_REPLY_PATH,
};

use config::GenerationSettings;
use llm::{CompletionRequest, TextGenerator};
use prompt::Prompt;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn TextGenerator>,
    settings: Arc<GenerationSettings>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// One awaited completion call, no retries.
    pub async fn complete(&self, prompt: Prompt) -> anyhow::Result<String> {
        self.generator
            .complete(CompletionRequest {
                model: self.settings.model.clone(),
                system: prompt.system,
                user: prompt.user,
                max_completion_tokens: self.settings.max_completion_tokens,
            })
            .await
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(GENERATE_REPLY_PATH, post(routes::generate_reply))
        .route(ADJUST_REPLY_PATH, post(routes::adjust_reply))
        .route(ANALYZE_CHAT_PATH, post(routes::analyze_chat))
        .route(GENERATE_OPENER_PATH, post(routes::generate_opener))
        .route(GENERATE_BIO_PATH, post(routes::generate_bio))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
