//! Turning raw completions into schema-conformant responses.
//!
//! Every parser here is total: text that does not parse into the expected
//! shape is replaced by a fixed fallback value, so callers always get a
//! well-formed body.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use wingman_shared::{AnalysisResponse, BioResponse, OpenerResponse};

use crate::extract::{extract_json, quoted_strings};

pub const REPLY_COUNT: usize = 3;

/// Used to fill the reply list when the model gave us fewer than three.
pub const FALLBACK_REPLIES: [&str; REPLY_COUNT] = [
    "Haha, okay, you've got my attention.",
    "I like where this is going. Tell me more?",
    "You're trouble, aren't you?",
];

pub fn fallback_analysis() -> AnalysisResponse {
    AnalysisResponse {
        interest_level: 5,
        investing_more: "Unclear".to_string(),
        is_dry: false,
        analysis: "Could not fully analyze the conversation.".to_string(),
        suggestion: "Try being more engaging and ask open-ended questions.".to_string(),
    }
}

pub fn fallback_opener() -> OpenerResponse {
    OpenerResponse {
        safe: "Hey! How's your day going?".to_string(),
        funny: "I'm running out of clever things to say, so... hi!".to_string(),
        bold: "I had to message you. Something about your vibe is magnetic.".to_string(),
    }
}

pub fn fallback_bio() -> BioResponse {
    BioResponse {
        attractive: "Living life one adventure at a time.".to_string(),
        confident: "Building something bigger than myself.".to_string(),
        funny: "Professional overthinker, amateur chef.".to_string(),
    }
}

/// Exactly [`REPLY_COUNT`] replies, from the parsed array if there is one,
/// otherwise from quoted strings found anywhere in the raw text.
pub fn parse_replies(raw: &str) -> Vec<String> {
    let raw = or_empty_json(raw, "[]");
    let mut replies = match serde_json::from_str::<Value>(extract_json(raw)) {
        Ok(Value::Array(items)) => items.into_iter().map(value_text).collect(),
        Ok(other) => vec![value_text(other)],
        Err(err) => {
            warn!("Reply completion was not JSON ({}), scanning for quoted text", err);
            quoted_strings(raw)
                .take(REPLY_COUNT)
                .map(str::to_string)
                .collect()
        }
    };

    replies.truncate(REPLY_COUNT);
    let have = replies.len();
    if have < REPLY_COUNT {
        warn!("Padding reply list with {} fallback replies", REPLY_COUNT - have);
        replies.extend(FALLBACK_REPLIES[have..].iter().map(|reply| reply.to_string()));
    }
    replies
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    interest_level: f64,
    investing_more: String,
    is_dry: bool,
    analysis: String,
    suggestion: String,
}

impl From<RawAnalysis> for AnalysisResponse {
    fn from(raw: RawAnalysis) -> Self {
        Self {
            interest_level: raw.interest_level.round().clamp(1.0, 10.0) as u8,
            investing_more: raw.investing_more,
            is_dry: raw.is_dry,
            analysis: raw.analysis,
            suggestion: raw.suggestion,
        }
    }
}

pub fn parse_analysis(raw: &str) -> AnalysisResponse {
    parse_object::<RawAnalysis>(raw, "analysis")
        .map(AnalysisResponse::from)
        .unwrap_or_else(fallback_analysis)
}

pub fn parse_opener(raw: &str) -> OpenerResponse {
    parse_object(raw, "opener").unwrap_or_else(fallback_opener)
}

pub fn parse_bio(raw: &str) -> BioResponse {
    parse_object(raw, "bio").unwrap_or_else(fallback_bio)
}

/// The adjusted reply, or the original when the model returned nothing.
pub fn adjusted_reply(raw: &str, original: &str) -> String {
    match raw.trim() {
        "" => original.to_string(),
        adjusted => adjusted.to_string(),
    }
}

fn parse_object<T: for<'de> Deserialize<'de>>(raw: &str, kind: &str) -> Option<T> {
    let raw = or_empty_json(raw, "{}");
    match serde_json::from_str::<T>(extract_json(raw)) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("Unusable {} completion ({}), using fallback", kind, err);
            None
        }
    }
}

fn or_empty_json<'a>(raw: &'a str, empty: &'a str) -> &'a str {
    if raw.trim().is_empty() {
        empty
    } else {
        raw
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
