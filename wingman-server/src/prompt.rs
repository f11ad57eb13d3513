//! Fixed prompt templates. Each endpoint gets a system instruction and a
//! single user message; categorical inputs select a fixed description.

use wingman_shared::{Direction, Platform, Tone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const NOT_SPECIFIED: &str = "not specified";

pub fn tone_description(tone: &Tone) -> &'static str {
    match tone {
        Tone::Smooth => {
            "confident, charming, and suave - like someone who knows exactly what to say"
        }
        Tone::Playful => "fun, teasing, flirty, and lighthearted - using wit and humor",
        Tone::Calm => "cool, collected, and effortlessly chill - not trying too hard",
        Tone::Savage => {
            "bold, witty, slightly edgy with clever comebacks - confidently provocative but not mean"
        }
        Tone::Other(_) => "smooth and charming",
    }
}

pub fn platform_description(platform: &Platform) -> &'static str {
    match platform {
        Platform::Instagram => "Instagram DMs",
        Platform::Whatsapp => "WhatsApp messaging",
        Platform::Dating => "a dating app like Tinder or Hinge",
        Platform::InPerson => "in-person conversation",
        Platform::Other(_) => "texting",
    }
}

/// Anything that is not explicitly "bolder" softens the reply.
pub fn direction_instruction(direction: &Direction) -> &'static str {
    match direction {
        Direction::Bolder => {
            "Make this reply more bold, confident, and daring while keeping it natural"
        }
        Direction::Safer | Direction::Other(_) => {
            "Make this reply safer, friendlier, and more approachable while keeping it natural"
        }
    }
}

pub fn reply(message: &str, tone: &Tone) -> Prompt {
    Prompt {
        system: format!(
            "You are a texting expert. Generate exactly 3 reply options that are {}. \
             Each reply: 1-2 sentences, natural, no excessive emojis. \
             Return ONLY a JSON array of 3 strings. Example: [\"reply 1\", \"reply 2\", \"reply 3\"]",
            tone_description(tone)
        ),
        user: format!("Generate 3 {} replies to: \"{}\"", tone, message),
    }
}

pub fn adjust(reply: &str, direction: &Direction) -> Prompt {
    Prompt {
        system: format!(
            "{}. Return ONLY the adjusted reply text, nothing else. Keep it concise (1-2 sentences).",
            direction_instruction(direction)
        ),
        user: reply.to_string(),
    }
}

pub fn analysis(chat: &str) -> Prompt {
    Prompt {
        system: "You are a conversation analyst. Analyze the chat and return a JSON object with these exact fields:\n\
                 - \"interestLevel\": number 1-10\n\
                 - \"investingMore\": string (who is investing more)\n\
                 - \"isDry\": boolean\n\
                 - \"analysis\": string (2-3 sentence analysis)\n\
                 - \"suggestion\": string (actionable next move)\n\
                 Return ONLY the JSON object."
            .to_string(),
        user: format!("Analyze this conversation:\n{}", chat),
    }
}

pub fn opener(platform: &Platform) -> Prompt {
    Prompt {
        system: format!(
            "You are a conversation starter expert. Generate 3 opening lines for {}. Return a JSON object with:\n\
             - \"safe\": string (friendly, low-risk opener)\n\
             - \"funny\": string (witty, humorous opener)\n\
             - \"bold\": string (confident, attention-grabbing opener)\n\
             Each 1-2 sentences, natural. Return ONLY the JSON object.",
            platform_description(platform)
        ),
        user: format!("Generate opening lines for {}", platform),
    }
}

pub fn bio(hobbies: Option<&str>, vibe: Option<&str>) -> Prompt {
    Prompt {
        system: "You are a profile bio expert. Generate 3 bio options. Return a JSON object with:\n\
                 - \"attractive\": string (sophisticated, intriguing bio)\n\
                 - \"confident\": string (self-assured bio showing ambition)\n\
                 - \"funny\": string (witty, humorous bio)\n\
                 Each 2-3 lines max. Return ONLY the JSON object."
            .to_string(),
        user: format!(
            "Create bios.\nHobbies: {}\nVibe: {}",
            hobbies.unwrap_or(NOT_SPECIFIED),
            vibe.unwrap_or(NOT_SPECIFIED)
        ),
    }
}
