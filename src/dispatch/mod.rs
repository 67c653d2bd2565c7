//! Emergency-response dispatch: keyword scope checks, ordered category
//! detection and template rendering for the offline chat assistant.
//!
//! Understands English plus the common Filipino disaster words (bagyo,
//! lindol, baha, sunog).  Everything here is pure: the tables are statics
//! compiled once, so the functions are safe to call from any thread.
#[cfg(test)]
mod dispatch_tests;
pub mod category;
pub mod keywords;
pub mod templates;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

pub use crate::dispatch::category::Category;
pub use crate::dispatch::keywords::{is_emergency_related, is_non_emergency_topic};
use crate::dispatch::keywords::CATEGORY_TRIGGERS;
use crate::dispatch::templates::template_for;

// ───────────────────────────── Detection ─────────────────────────────────

/// One compiled detector per category, in priority order.
static DETECTORS: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    CATEGORY_TRIGGERS
        .iter()
        .map(|&(category, phrases)| (category, word_pattern(phrases)))
        .collect()
});

/// `\b(?:a|b|c)\b`, case-insensitive.  Multi-word phrases keep their
/// inner spaces.
fn word_pattern(phrases: &[&str]) -> Regex {
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("trigger phrases form a valid regex")
}

/// Pick the first category (in priority order) whose triggers appear in the
/// utterance, or `Unmatched`.
pub fn classify(utterance: &str) -> Category {
    let lower = utterance.to_lowercase();
    let category = DETECTORS
        .iter()
        .find(|(_, re)| re.is_match(&lower))
        .map(|&(category, _)| category)
        .unwrap_or(Category::Unmatched);
    debug!("Dispatch: {category:?} for {} chars", utterance.len());
    category
}

// ───────────────────────────── Responses ─────────────────────────────────

/// Main entry point: classify `utterance` and render the matching guide.
/// The greeting mentions `location`; the fallback quotes the utterance
/// exactly as typed.
pub fn get_emergency_response(utterance: &str, location: &str) -> String {
    let category = classify(utterance);
    render(category, utterance, location)
}

/// Render the response for an already-chosen category.
pub fn render(category: Category, utterance: &str, location: &str) -> String {
    match template_for(category) {
        Some(template) => template.render(location),
        None => templates::unmatched(utterance),
    }
}

/// "I can't help with …" – for utterances already judged off-topic.
pub fn get_decline_response(utterance: &str) -> String {
    templates::decline(utterance)
}

/// "I didn't recognize … as an emergency" – for in-scope chatter that
/// names no specific emergency.
pub fn get_redirect_response(utterance: &str, location: &str) -> String {
    templates::redirect(utterance, location)
}
