//! Property-based tests for intent classification
//!
//! - Any text containing an image trigger is an image request
//! - Without triggers, the earliest table keyword present decides the topic
//! - Text with no keywords at all is general chat

use super::{classify, Intent, IMAGE_PROMPT_SUFFIX, IMAGE_TRIGGERS, WELLNESS_KEYWORDS};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Filler with no letters, so it can never form a keyword by itself
fn arb_filler() -> impl Strategy<Value = String> {
    "[0-9 ,.!?]{0,20}"
}

fn arb_trigger() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(IMAGE_TRIGGERS)
}

fn arb_keyword() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(WELLNESS_KEYWORDS.iter().map(|(k, _)| *k).collect::<Vec<_>>())
}

/// Randomly upper-case some characters
fn arb_recased(word: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |flags| {
        word.chars()
            .zip(flags)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

/// Separator with at least one non-letter, so adjacent keywords cannot
/// run together into a different keyword
fn arb_separator() -> impl Strategy<Value = String> {
    "[0-9 ,.!?]{1,20}"
}

/// Separator-joined wellness keywords in arbitrary order, along with the
/// keywords that were placed
fn arb_keyword_parts() -> impl Strategy<Value = (String, Vec<&'static str>)> {
    proptest::collection::vec((arb_separator(), arb_keyword()), 1..4).prop_map(|parts| {
        let keywords = parts.iter().map(|&(_, keyword)| keyword).collect();
        let text = parts
            .into_iter()
            .fold(String::new(), |mut text, (separator, keyword)| {
                text.push_str(&separator);
                text.push_str(keyword);
                text
            });
        (text, keywords)
    })
}

fn arb_keyword_text() -> impl Strategy<Value = String> {
    arb_keyword_parts().prop_map(|(text, _)| text)
}

/// Table row of a keyword the generator placed
fn table_index(keyword: &str) -> usize {
    WELLNESS_KEYWORDS
        .iter()
        .position(|&(k, _)| k == keyword)
        .unwrap_or(usize::MAX)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Image triggers always produce an image intent with the decorated prompt
    #[test]
    fn prop_trigger_means_image(
        prefix in arb_keyword_text(),
        trigger in arb_trigger().prop_flat_map(arb_recased),
        suffix in arb_filler(),
    ) {
        let text = format!("{prefix} {trigger}{suffix}");
        prop_assert_eq!(
            classify(&text),
            Intent::Image { prompt: format!("{text}{IMAGE_PROMPT_SUFFIX}") }
        );
    }

    /// Earliest keyword in table order wins, regardless of position in the text
    #[test]
    fn prop_table_order_decides_topic((text, placed) in arb_keyword_parts()) {
        // A keyword nested inside a placed one ("breath" in "breathing") sits
        // lower in the table than its host, so the placed keywords alone
        // decide the winner.
        let winner = placed.iter().copied().map(table_index).min().unwrap_or(usize::MAX);
        prop_assert!(winner < WELLNESS_KEYWORDS.len());

        let (_, topic) = WELLNESS_KEYWORDS[winner];
        prop_assert_eq!(classify(&text), Intent::Wellness(topic));
    }

    /// Case never changes the outcome
    #[test]
    fn prop_case_insensitive(keyword in arb_keyword().prop_flat_map(arb_recased)) {
        prop_assert_eq!(classify(&keyword), classify(&keyword.to_lowercase()));
    }

    /// No letters, no keywords: always general chat
    #[test]
    fn prop_no_keywords_means_general_chat(text in arb_filler()) {
        prop_assert_eq!(classify(&text), Intent::GeneralChat);
    }
}
