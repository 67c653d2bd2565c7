// ───────────────────────────── Categories ────────────────────────────────

/// Emergency classifications an utterance can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Greeting,
    Typhoon,      // bagyo
    Earthquake,   // lindol
    Flood,        // baha
    Fire,         // sunog
    Medical,
    Preparedness, // go-bag / emergency kit
    Unmatched,    // nothing matched – "didn't understand" fallback
}

impl Category {
    /// Every category, in dispatch priority order.
    pub const ALL: [Category; 8] = [
        Self::Greeting,
        Self::Typhoon,
        Self::Earthquake,
        Self::Flood,
        Self::Fire,
        Self::Medical,
        Self::Preparedness,
        Self::Unmatched,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Greeting => "👋",
            Self::Typhoon => "🌀",
            Self::Earthquake => "🌍",
            Self::Flood => "🌊",
            Self::Fire => "🔥",
            Self::Medical => "🏥",
            Self::Preparedness => "🎒",
            Self::Unmatched => "🤔",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "Greeting",
            Self::Typhoon => "Typhoon / storm",
            Self::Earthquake => "Earthquake",
            Self::Flood => "Flood",
            Self::Fire => "Fire",
            Self::Medical => "Medical emergency",
            Self::Preparedness => "Preparedness",
            Self::Unmatched => "Not understood",
        }
    }

    /// Stable name used in the transcript DB and JSONL dumps.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Greeting => "Greeting",
            Self::Typhoon => "Typhoon",
            Self::Earthquake => "Earthquake",
            Self::Flood => "Flood",
            Self::Fire => "Fire",
            Self::Medical => "Medical",
            Self::Preparedness => "Preparedness",
            Self::Unmatched => "Unmatched",
        }
    }
}
