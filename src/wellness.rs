//! Local wellness content: quotes, breathing guidance, affirmations and
//! journal prompts.

use crate::intent::Topic;
use rand::seq::SliceRandom;

/// Source of wellness replies, one per topic
pub trait WellnessProvider: Send + Sync {
    /// Produce a reply for the topic. Never fails.
    fn provide(&self, topic: Topic) -> String;
}

const QUOTES: &[&str] = &[
    "\"You don't have to control your thoughts. You just have to stop letting them control you.\" - Dan Millman",
    "\"Almost everything will work again if you unplug it for a few minutes, including you.\" - Anne Lamott",
    "\"There is hope, even when your brain tells you there isn't.\" - John Green",
    "\"Self-care is how you take your power back.\" - Lalah Delia",
    "\"You are allowed to be both a masterpiece and a work in progress simultaneously.\" - Sophia Bush",
    "\"Healing takes time, and asking for help is a courageous step.\" - Mariska Hargitay",
];

const BREATHING: &[&str] = &[
    "Let's try box breathing: breathe in for 4 counts, hold for 4, breathe out for 4, and hold for 4. Repeat this four times.",
    "Try the 4-7-8 technique: inhale quietly through your nose for 4 seconds, hold for 7, then exhale slowly through your mouth for 8.",
    "Place one hand on your chest and one on your belly. Breathe in slowly so only your belly rises, then let the air out even more slowly. Do this five times.",
    "Take a deep breath in, and as you breathe out, let your shoulders drop. Notice three things you can see and two things you can hear.",
];

const AFFIRMATIONS: &[&str] = &[
    "I am doing the best I can, and that is enough.",
    "My feelings are valid, and I allow myself to feel them.",
    "I deserve kindness, especially from myself.",
    "I am stronger than the hard moments I am going through.",
    "It's okay to rest. Rest is part of healing.",
];

const JOURNAL_PROMPTS: &[&str] = &[
    "What is one thing that made you smile today, even a little?",
    "Write about a feeling you've been carrying lately. Where do you notice it in your body?",
    "What would you say to a close friend who was going through what you're going through?",
    "List three small things you are grateful for right now.",
    "What is one gentle thing you can do for yourself tomorrow?",
];

/// Built-in curated content, picking one entry at random per request
#[derive(Debug, Default, Clone, Copy)]
pub struct CuratedWellness;

impl CuratedWellness {
    pub fn new() -> Self {
        Self
    }

    fn entries(topic: Topic) -> &'static [&'static str] {
        match topic {
            Topic::Quote => QUOTES,
            Topic::Breathing => BREATHING,
            Topic::Affirmation => AFFIRMATIONS,
            Topic::Journal => JOURNAL_PROMPTS,
        }
    }
}

impl WellnessProvider for CuratedWellness {
    fn provide(&self, topic: Topic) -> String {
        let entries = Self::entries(topic);
        entries
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
            .to_string()
    }
}
