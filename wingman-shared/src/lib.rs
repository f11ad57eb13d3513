use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const GENERATE_REPLY_PATH: &str = "/api/generate-reply";
pub const ADJUST_REPLY_PATH: &str = "/api/adjust-reply";
pub const ANALYZE_CHAT_PATH: &str = "/api/analyze-chat";
pub const GENERATE_OPENER_PATH: &str = "/api/generate-opener";
pub const GENERATE_BIO_PATH: &str = "/api/generate-bio";

/// Categorical wire values. Known values get their own variant, anything else
/// is carried verbatim in `Other` so the server can fall back to a generic
/// description instead of rejecting the request.
macro_rules! categorical {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(value) => value,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical!(Tone {
    Smooth => "smooth",
    Playful => "playful",
    Calm => "calm",
    Savage => "savage",
});

categorical!(Direction {
    Bolder => "bolder",
    Safer => "safer",
});

categorical!(Platform {
    Instagram => "instagram",
    Whatsapp => "whatsapp",
    Dating => "dating",
    InPerson => "inperson",
});

/// Vibes offered when writing a bio. The server treats vibe as free text, so
/// this only constrains what the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vibe {
    Chill,
    Adventurous,
    Intellectual,
    Creative,
    Ambitious,
    Funny,
}

impl Vibe {
    pub const ALL: [Vibe; 6] = [
        Vibe::Chill,
        Vibe::Adventurous,
        Vibe::Intellectual,
        Vibe::Creative,
        Vibe::Ambitious,
        Vibe::Funny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::Chill => "chill",
            Vibe::Adventurous => "adventurous",
            Vibe::Intellectual => "intellectual",
            Vibe::Creative => "creative",
            Vibe::Ambitious => "ambitious",
            Vibe::Funny => "funny",
        }
    }
}

impl FromStr for Vibe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Vibe::ALL
            .into_iter()
            .find(|vibe| vibe.as_str() == s)
            .ok_or_else(|| format!("unknown vibe '{s}'"))
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Request fields are optional on the wire: a missing field must reach the
// server's validation and come back as a 400, not as a JSON rejection.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tone: Option<Tone>,
}

impl ReplyRequest {
    pub fn new(message: impl Into<String>, tone: Tone) -> Self {
        Self {
            message: Some(message.into()),
            tone: Some(tone),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjustRequest {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl AdjustRequest {
    pub fn new(reply: impl Into<String>, direction: Direction) -> Self {
        Self {
            reply: Some(reply.into()),
            direction: Some(direction),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub chat: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(chat: impl Into<String>) -> Self {
        Self {
            chat: Some(chat.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenerRequest {
    #[serde(default)]
    pub platform: Option<Platform>,
}

impl OpenerRequest {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BioRequest {
    #[serde(default)]
    pub hobbies: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub replies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustResponse {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// 1 (not interested) to 10 (very interested).
    pub interest_level: u8,
    pub investing_more: String,
    pub is_dry: bool,
    pub analysis: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenerResponse {
    pub safe: String,
    pub funny: String,
    pub bold: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioResponse {
    pub attractive: String,
    pub confident: String,
    pub funny: String,
}

/// Body of every 4xx/5xx response from the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_tone_survives_the_wire() {
        let request: ReplyRequest =
            serde_json::from_value(json!({"message": "hey", "tone": "mysterious"})).unwrap();
        assert_eq!(request.tone, Some(Tone::Other("mysterious".to_string())));

        let back = serde_json::to_value(&request).unwrap();
        assert_eq!(back["tone"], "mysterious");
    }

    #[test]
    fn known_values_map_to_variants() {
        assert_eq!("inperson".parse::<Platform>().unwrap(), Platform::InPerson);
        assert_eq!("bolder".parse::<Direction>().unwrap(), Direction::Bolder);
        assert_eq!(Tone::Savage.to_string(), "savage");
    }

    #[test]
    fn missing_and_null_fields_deserialize_as_none() {
        let request: BioRequest = serde_json::from_value(json!({"vibe": null})).unwrap();
        assert!(request.hobbies.is_none());
        assert!(request.vibe.is_none());
    }

    #[test]
    fn analysis_uses_camel_case_keys() {
        let analysis = AnalysisResponse {
            interest_level: 7,
            investing_more: "Them".to_string(),
            is_dry: false,
            analysis: "Going well.".to_string(),
            suggestion: "Ask them out.".to_string(),
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["interestLevel"], 7);
        assert_eq!(value["investingMore"], "Them");
        assert_eq!(value["isDry"], false);
    }

    #[test]
    fn vibe_parsing_is_strict() {
        assert_eq!("creative".parse::<Vibe>().unwrap(), Vibe::Creative);
        assert!("sleepy".parse::<Vibe>().is_err());
    }
}
