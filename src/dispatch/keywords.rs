use crate::dispatch::Category;

/// Trigger phrases for each category.  **Order matters** – the matcher
/// walks this table top to bottom and the first category whose pattern
/// matches wins, so a greeting always beats a disaster word and a typhoon
/// always beats a flood.
///
/// Phrases are lowercase and matched on word boundaries.  Filipino terms
/// (bagyo, lindol, baha, sunog) sit next to their English equivalents.
pub const CATEGORY_TRIGGERS: &[(Category, &[&str])] = &[
    (
        Category::Greeting,
        &[
            "hello",
            "hi",
            "hey",
            "good morning",
            "good afternoon",
            "start",
            "begin",
        ],
    ),
    (
        Category::Typhoon,
        &[
            "typhoon",
            "storm",
            "cyclone",
            "hurricane",
            "bagyo",
            "wind",
            "weather",
            "rain",
        ],
    ),
    (
        Category::Earthquake,
        &["earthquake", "tremor", "shake", "quake", "lindol", "seismic"],
    ),
    (
        Category::Flood,
        &["flood", "flooding", "water", "baha", "inundation"],
    ),
    (
        Category::Fire,
        &["fire", "smoke", "burn", "burning", "flame", "sunog", "blaze"],
    ),
    (
        Category::Medical,
        &[
            "heart attack",
            "chest pain",
            "stroke",
            "unconscious",
            "bleeding",
            "injury",
            "medical",
            "first aid",
            "ambulance",
            "hospital",
        ],
    ),
    (
        Category::Preparedness,
        &[
            "supplies",
            "kit",
            "prepare",
            "preparation",
            "emergency bag",
            "go bag",
        ],
    ),
];

// ───────────────────────── Scope vocabulary ──────────────────────────────

/// Opening words.  Counted as in-scope so that "hi" is never declined.
/// Matched as substrings like the rest of the scope vocabulary, so "hi"
/// also hits "this" and "which": the off-topic check lets those through.
pub const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "start",
    "begin",
];

/// Phrases that make an utterance plausibly emergency-related.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    // storms
    "typhoon",
    "storm",
    "cyclone",
    "hurricane",
    "bagyo",
    "wind",
    "weather",
    "rain",
    "signal no",
    "landslide",
    "storm surge",
    // earthquakes
    "earthquake",
    "tremor",
    "shake",
    "quake",
    "lindol",
    "seismic",
    "aftershock",
    "tsunami",
    // floods
    "flood",
    "water",
    "baha",
    "inundation",
    // fire
    "fire",
    "smoke",
    "burn",
    "flame",
    "sunog",
    "blaze",
    "explosion",
    // medical
    "heart attack",
    "chest pain",
    "stroke",
    "unconscious",
    "bleeding",
    "injury",
    "injured",
    "medical",
    "first aid",
    "ambulance",
    "hospital",
    "cpr",
    "choking",
    "breathing",
    "fracture",
    "wound",
    // preparedness / general
    "supplies",
    "kit",
    "prepare",
    "preparation",
    "emergency",
    "go bag",
    "evacuat", // evacuate, evacuation, evacuation center
    "shelter",
    "rescue",
    "disaster",
    "danger",
    "trapped",
    "missing",
];

/// Out-of-scope topics.  Matched as plain substrings, so "classroom"
/// hits "class" and "movies" hits "movie".
pub const NON_EMERGENCY_TOPICS: &[&str] = &[
    // entertainment
    "movie",
    "film",
    "netflix",
    "tv show",
    "series",
    "anime",
    "celebrity",
    "video game",
    "gaming",
    // sports
    "basketball",
    "football",
    "soccer",
    "volleyball",
    "boxing",
    "nba",
    "sports",
    // politics
    "politic",
    "election",
    "president",
    "senator",
    "vote",
    // finance
    "stock market",
    "stocks",
    "crypto",
    "bitcoin",
    "invest",
    "loan",
    "salary",
    // school
    "homework",
    "assignment",
    "exam",
    "class",
    "essay",
    "math",
    // relationships
    "girlfriend",
    "boyfriend",
    "dating",
    "crush",
    "breakup",
    "marriage",
    // travel
    "vacation",
    "tourist",
    "hotel",
    "travel",
    "flight",
    // technology
    "iphone",
    "android",
    "laptop",
    "programming",
    "coding",
    "gadget",
    // music
    "song",
    "music",
    "concert",
    "singer",
    "lyrics",
    "k-pop",
    "kpop",
    // food
    "recipe",
    "cooking",
    "restaurant",
];

/// Returns `true` when the utterance contains any emergency or greeting
/// keyword as a substring.
pub fn is_emergency_related(utterance: &str) -> bool {
    let lower = utterance.to_lowercase();
    EMERGENCY_KEYWORDS
        .iter()
        .chain(GREETING_KEYWORDS)
        .any(|kw| lower.contains(kw))
}

/// Returns `true` when the utterance contains any out-of-scope topic as a
/// substring.
pub fn is_non_emergency_topic(utterance: &str) -> bool {
    let lower = utterance.to_lowercase();
    NON_EMERGENCY_TOPICS.iter().any(|kw| lower.contains(kw))
}
