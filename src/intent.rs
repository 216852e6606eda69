//! Intent classification for incoming chat text
//!
//! Decides which handler answers a message. Matching is case-insensitive
//! substring search over fixed tables; image triggers always win over
//! wellness keywords.

#[cfg(test)]
mod proptests;

/// Words that turn a message into an image request
pub const IMAGE_TRIGGERS: &[&str] = &["draw", "picture", "image", "generate", "show me"];

/// Appended to the user's text before it is sent to the image model
pub const IMAGE_PROMPT_SUFFIX: &str = ". Make it calming, peaceful, and mental-health friendly.";

/// Wellness content categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Quote,
    Breathing,
    Affirmation,
    Journal,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Quote => "quote",
            Topic::Breathing => "breathing",
            Topic::Affirmation => "affirmation",
            Topic::Journal => "journal",
        }
    }
}

/// Keyword table, scanned in order. The first keyword found in the
/// message decides the topic.
pub const WELLNESS_KEYWORDS: &[(&str, Topic)] = &[
    ("quote", Topic::Quote),
    ("inspire", Topic::Quote),
    ("breathing", Topic::Breathing),
    ("breath", Topic::Breathing),
    ("relax", Topic::Breathing),
    ("affirmation", Topic::Affirmation),
    ("affirm", Topic::Affirmation),
    ("journal", Topic::Journal),
    ("reflect", Topic::Journal),
];

/// What a message is asking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Generate an image from the decorated prompt
    Image { prompt: String },
    /// Answer from local wellness content
    Wellness(Topic),
    /// Forward to the chat model
    GeneralChat,
}

impl Intent {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::Image { .. } => "image",
            Intent::Wellness(_) => "wellness",
            Intent::GeneralChat => "general_chat",
        }
    }
}

/// Classify raw user text. Total: every input maps to some intent, and
/// empty input falls through to [`Intent::GeneralChat`].
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();

    if IMAGE_TRIGGERS.iter().any(|word| lowered.contains(word)) {
        return Intent::Image {
            prompt: format!("{text}{IMAGE_PROMPT_SUFFIX}"),
        };
    }

    WELLNESS_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(Intent::GeneralChat, |&(_, topic)| Intent::Wellness(topic))
}
