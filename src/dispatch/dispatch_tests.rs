// ─────────────────────────────── Tests ───────────────────────────────────

use crate::dispatch::keywords::{CATEGORY_TRIGGERS, EMERGENCY_KEYWORDS, NON_EMERGENCY_TOPICS};
use crate::dispatch::templates::{UNKNOWN_LOCATION, template_for};
use crate::dispatch::*;

fn template_text(category: Category) -> String {
    template_for(category)
        .expect("routable category has a template")
        .render("Cebu")
}

// ── Scope vocabulary ──

#[test]
fn first_aid_is_emergency_related() {
    assert!(is_emergency_related("I need first aid"));
}

#[test]
fn recipe_is_non_emergency_topic() {
    assert!(is_non_emergency_topic("what's a good recipe"));
}

#[test]
fn empty_utterance_is_not_emergency_related() {
    assert!(!is_emergency_related(""));
    assert!(!is_non_emergency_topic(""));
}

#[test]
fn scope_checks_ignore_case() {
    assert!(is_emergency_related("THERE IS A FIRE"));
    assert!(is_non_emergency_topic("Any good MOVIE tonight?"));
}

#[test]
fn scope_checks_match_inside_words() {
    // Substring policy, unlike the word-boundary matcher.
    assert!(is_non_emergency_topic("my classroom is noisy"));
    assert!(is_emergency_related("we need to evacuate"));
    assert!(is_emergency_related("evacuation center"));
}

#[test]
fn greeting_counts_as_emergency_related() {
    assert!(is_emergency_related("hello"));
    assert!(is_emergency_related("good morning"));
    // Greeting words are substrings too: "hi" sits inside "which".
    assert!(is_emergency_related("which movie should I watch"));
    assert!(!is_emergency_related("help me with my homework"));
}

#[test]
fn off_topic_chatter_is_not_emergency_related() {
    assert!(!is_emergency_related("talk about movies"));
    assert!(is_non_emergency_topic("talk about movies"));
}

#[test]
fn vocabularies_are_lowercase() {
    for kw in EMERGENCY_KEYWORDS.iter().chain(NON_EMERGENCY_TOPICS) {
        assert_eq!(*kw, kw.to_lowercase(), "keyword {kw:?} must be lowercase");
    }
    for (_, phrases) in CATEGORY_TRIGGERS {
        for p in *phrases {
            assert_eq!(*p, p.to_lowercase(), "trigger {p:?} must be lowercase");
        }
    }
}

// ── Category detection ──

#[test]
fn detects_each_category() {
    assert_eq!(classify("hello"), Category::Greeting);
    assert_eq!(classify("signal no. 3 typhoon coming"), Category::Typhoon);
    assert_eq!(classify("malakas na lindol"), Category::Earthquake);
    assert_eq!(classify("baha na sa kalsada"), Category::Flood);
    assert_eq!(classify("may sunog sa kapitbahay"), Category::Fire);
    assert_eq!(classify("my father has chest pain"), Category::Medical);
    assert_eq!(classify("what should be in my go bag"), Category::Preparedness);
    assert_eq!(classify("xyzzy"), Category::Unmatched);
}

#[test]
fn every_trigger_alone_resolves_to_its_own_category() {
    for &(category, phrases) in CATEGORY_TRIGGERS {
        for phrase in phrases {
            assert_eq!(
                classify(phrase),
                category,
                "trigger {phrase:?} should route to {category:?}"
            );
            assert_eq!(
                get_emergency_response(phrase, "Cebu"),
                template_text(category),
                "trigger {phrase:?} rendered the wrong template"
            );
        }
    }
}

#[test]
fn typhoon_beats_flood() {
    assert_eq!(classify("typhoon caused a flood"), Category::Typhoon);
    assert_eq!(
        get_emergency_response("typhoon caused a flood", "Cebu"),
        template_text(Category::Typhoon)
    );
}

#[test]
fn greeting_beats_any_disaster() {
    let r = get_emergency_response("hello, there's a fire", "Cebu");
    assert_eq!(r, template_text(Category::Greeting));
    assert!(!r.contains("Fire Safety Guide"));
}

#[test]
fn precedence_follows_table_order() {
    assert_eq!(classify("earthquake then flood"), Category::Earthquake);
    assert_eq!(classify("flood water near the fire"), Category::Flood);
    assert_eq!(classify("smoke and bleeding"), Category::Fire);
    assert_eq!(classify("bleeding, need supplies"), Category::Medical);
    // Position in the sentence does not matter, only table order.
    assert_eq!(classify("fire after the earthquake"), Category::Earthquake);
}

#[test]
fn triggers_need_word_boundaries() {
    // "hi" inside "this", "rain" inside "training", "fire" inside "firewall".
    assert_eq!(classify("this is a test"), Category::Unmatched);
    assert_eq!(classify("training schedule"), Category::Unmatched);
    assert_eq!(classify("firewall settings"), Category::Unmatched);
    assert_eq!(classify("the fire started"), Category::Fire);
}

#[test]
fn multi_word_triggers_match_as_phrases() {
    assert_eq!(classify("I think it's a heart attack"), Category::Medical);
    assert_eq!(classify("my heart is fine, no attack"), Category::Unmatched);
    assert_eq!(classify("Good Morning!"), Category::Greeting);
}

#[test]
fn matching_ignores_case() {
    assert_eq!(
        get_emergency_response("EARTHQUAKE!!", "Cebu"),
        get_emergency_response("earthquake!!", "Cebu")
    );
    assert_eq!(classify("FlOoD"), Category::Flood);
}

#[test]
fn responses_are_deterministic() {
    for text in ["hi", "bagyo", "help me", "", "xyzzy random text"] {
        assert_eq!(
            get_emergency_response(text, "Tacloban"),
            get_emergency_response(text, "Tacloban")
        );
    }
}

// ── Rendering ──

#[test]
fn greeting_mentions_location() {
    let r = get_emergency_response("hi", "Barangay Luz");
    assert!(r.contains("Barangay Luz"));
}

#[test]
fn greeting_without_location_uses_placeholder() {
    let r = get_emergency_response("hi", "");
    assert!(r.contains(UNKNOWN_LOCATION));
    let r = get_emergency_response("hi", "   ");
    assert!(r.contains(UNKNOWN_LOCATION));
}

#[test]
fn static_templates_ignore_location() {
    assert_eq!(
        get_emergency_response("flood", "Cebu"),
        get_emergency_response("flood", "Marikina")
    );
}

#[test]
fn fallback_echoes_original_text() {
    let r = get_emergency_response("xyzzy random text", "Cebu");
    assert!(r.contains("\"xyzzy random text\""));

    let r = get_emergency_response("Xyzzy RANDOM Text", "Cebu");
    assert!(r.contains("Xyzzy RANDOM Text"), "casing must be kept: {r}");
}

#[test]
fn empty_and_whitespace_fall_back() {
    assert_eq!(classify(""), Category::Unmatched);
    assert_eq!(classify("   \n\t"), Category::Unmatched);
    assert!(get_emergency_response("", "").starts_with("## 🤔"));
}

#[test]
fn unicode_input_does_not_panic() {
    let r = get_emergency_response("Сильний вітер 🌪️ 台風", "Cebu");
    assert!(r.contains("Сильний вітер 🌪️ 台風"));
}

#[test]
fn every_response_has_header_and_closing_line() {
    for category in Category::ALL {
        let r = render(category, "something", "Cebu");
        assert!(r.starts_with("## "), "{category:?} header: {r}");
        let last = r.lines().last().unwrap_or_default();
        assert!(
            last.starts_with("**") && last.ends_with("**"),
            "{category:?} must close with a bold line, got {last:?}"
        );
    }
}

// ── Decline / redirect ──

#[test]
fn decline_quotes_utterance() {
    let r = get_decline_response("talk about movies");
    assert!(r.contains("talk about movies"));
    assert_eq!(r.matches("talk about movies").count(), 1);
}

#[test]
fn decline_accepts_empty_input() {
    let r = get_decline_response("");
    assert!(r.contains("\"\""));
}

#[test]
fn redirect_quotes_utterance_and_location() {
    let r = get_redirect_response("Can you Check This?", "Barangay Luz");
    assert!(r.contains("Can you Check This?"));
    assert!(r.contains("Barangay Luz"));
    assert_ne!(r, get_decline_response("Can you Check This?"));
}

#[test]
fn redirect_without_location_uses_placeholder() {
    let r = get_redirect_response("", "");
    assert!(r.contains(UNKNOWN_LOCATION));
}

// ── Category names ──

#[test]
fn variant_names_are_unique() {
    let mut names: Vec<_> = Category::ALL.iter().map(|c| c.variant_name()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), Category::ALL.len());
}
