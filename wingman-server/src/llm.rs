use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, info};

/// One completion call: a system instruction plus a single user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_completion_tokens: u32,
}

/// The external text-generation capability. Returns the raw completion text,
/// which may be empty.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

pub struct LlmService {
    client: Client<OpenAIConfig>,
}

impl LlmService {
    pub fn new(api_key: String, api_base: Option<String>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            info!("Using OpenAI-compatible API at {}", base);
            config = config.with_api_base(base);
        }
        let client = Client::with_config(config);
        Self { client }
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(request.system)
                    .build()?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(request.user)
                    .build()?,
            ),
        ];

        let body = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .max_completion_tokens(request.max_completion_tokens)
            .build()?;

        debug!(
            "Sending completion request to {} (max {} tokens)",
            request.model, request.max_completion_tokens
        );

        let response = self.client.chat().create(body).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!("Completion returned {} chars", content.len());
        Ok(content)
    }
}
