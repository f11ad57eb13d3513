use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;
use url::Url;
use wingman_server::{
    AppState,
    config::GenerationSettings,
    llm::{CompletionRequest, TextGenerator},
    router,
};

use crate::client::BackendClient;

struct FnGenerator<F>(F);

#[async_trait]
impl<F> TextGenerator for FnGenerator<F>
where
    F: Fn(&CompletionRequest) -> anyhow::Result<String> + Send + Sync,
{
    async fn complete(&self, request: CompletionRequest) -> anyhow::Result<String> {
        (self.0)(&request)
    }
}

/// Serve the real proxy on an ephemeral port with a scripted generator.
pub async fn spawn_backend<F>(respond: F) -> BackendClient
where
    F: Fn(&CompletionRequest) -> anyhow::Result<String> + Send + Sync + 'static,
{
    let state = AppState::new(Arc::new(FnGenerator(respond)), GenerationSettings::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    BackendClient::new(Url::parse(&format!("http://{addr}")).unwrap())
}

/// A client pointed at a port nothing listens on.
pub async fn unreachable_backend() -> BackendClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    BackendClient::new(Url::parse(&format!("http://{addr}")).unwrap())
}
