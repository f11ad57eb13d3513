use axum::{extract::State, Json};
use tracing::info;
use wingman_shared::{
    AdjustRequest, AdjustResponse, AnalysisResponse, AnalyzeRequest, BioRequest, BioResponse,
    OpenerRequest, OpenerResponse, ReplyRequest, ReplyResponse,
};

use crate::{error::ApiError, output, prompt, AppState};

pub async fn health() -> &'static str {
    "OK"
}

pub async fn generate_reply(
    State(state): State<AppState>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let (Some(message), Some(tone)) = (present(request.message), present(request.tone)) else {
        return Err(ApiError::Validation("Message and tone are required"));
    };
    info!("Generating {} replies ({} chars)", tone, message.len());

    let raw = state
        .complete(prompt::reply(&message, &tone))
        .await
        .map_err(|e| ApiError::upstream("Failed to generate replies", e))?;

    Ok(Json(ReplyResponse {
        replies: output::parse_replies(&raw),
    }))
}

pub async fn adjust_reply(
    State(state): State<AppState>,
    Json(request): Json<AdjustRequest>,
) -> Result<Json<AdjustResponse>, ApiError> {
    let (Some(reply), Some(direction)) = (present(request.reply), present(request.direction))
    else {
        return Err(ApiError::Validation("Reply and direction are required"));
    };
    info!("Adjusting reply ({})", direction);

    let raw = state
        .complete(prompt::adjust(&reply, &direction))
        .await
        .map_err(|e| ApiError::upstream("Failed to adjust reply", e))?;

    Ok(Json(AdjustResponse {
        reply: output::adjusted_reply(&raw, &reply),
    }))
}

pub async fn analyze_chat(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Some(chat) = present(request.chat) else {
        return Err(ApiError::Validation("Chat text is required"));
    };
    info!("Analyzing chat ({} chars)", chat.len());

    let raw = state
        .complete(prompt::analysis(&chat))
        .await
        .map_err(|e| ApiError::upstream("Failed to analyze chat", e))?;

    Ok(Json(output::parse_analysis(&raw)))
}

pub async fn generate_opener(
    State(state): State<AppState>,
    Json(request): Json<OpenerRequest>,
) -> Result<Json<OpenerResponse>, ApiError> {
    let Some(platform) = present(request.platform) else {
        return Err(ApiError::Validation("Platform is required"));
    };
    info!("Generating openers for {}", platform);

    let raw = state
        .complete(prompt::opener(&platform))
        .await
        .map_err(|e| ApiError::upstream("Failed to generate openers", e))?;

    Ok(Json(output::parse_opener(&raw)))
}

pub async fn generate_bio(
    State(state): State<AppState>,
    Json(request): Json<BioRequest>,
) -> Result<Json<BioResponse>, ApiError> {
    let hobbies = present(request.hobbies);
    let vibe = present(request.vibe);
    if hobbies.is_none() && vibe.is_none() {
        return Err(ApiError::Validation("Hobbies or vibe are required"));
    }
    info!("Generating bios");

    let raw = state
        .complete(prompt::bio(hobbies.as_deref(), vibe.as_deref()))
        .await
        .map_err(|e| ApiError::upstream("Failed to generate bios", e))?;

    Ok(Json(output::parse_bio(&raw)))
}

/// Absent, null and empty all count as missing.
fn present<T: AsRef<str>>(field: Option<T>) -> Option<T> {
    field.filter(|value| !value.as_ref().is_empty())
}
