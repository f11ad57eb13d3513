use anyhow::{Context, Result, bail};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};
use url::Url;
use wingman_shared::{
    ADJUST_REPLY_PATH, ANALYZE_CHAT_PATH, AdjustRequest, AdjustResponse, AnalysisResponse,
    AnalyzeRequest, BioRequest, BioResponse, GENERATE_BIO_PATH, GENERATE_OPENER_PATH,
    GENERATE_REPLY_PATH, OpenerRequest, OpenerResponse, ReplyRequest, ReplyResponse,
};

/// Talks to the prompt proxy. One request per call, no retries.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn generate_reply(&self, request: &ReplyRequest) -> Result<ReplyResponse> {
        self.post(GENERATE_REPLY_PATH, request).await
    }

    pub async fn adjust_reply(&self, request: &AdjustRequest) -> Result<AdjustResponse> {
        self.post(ADJUST_REPLY_PATH, request).await
    }

    pub async fn analyze_chat(&self, request: &AnalyzeRequest) -> Result<AnalysisResponse> {
        self.post(ANALYZE_CHAT_PATH, request).await
    }

    pub async fn generate_opener(&self, request: &OpenerRequest) -> Result<OpenerResponse> {
        self.post(GENERATE_OPENER_PATH, request).await
    }

    pub async fn generate_bio(&self, request: &BioRequest) -> Result<BioResponse> {
        self.post(GENERATE_BIO_PATH, request).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("Failed to resolve {path} against {}", self.base_url))?;

        info!("POST {}", url);
        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {path} failed"))?;

        let status = res.status();
        if !status.is_success() {
            let body = res
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            bail!("{path} failed with status {status}: {body}");
        }

        debug!("{} returned {}", path, status);
        res.json::<R>()
            .await
            .with_context(|| format!("Failed to parse {path} response"))
    }
}
