//! Language selection and the static phrase tables behind Report and
//! DoctorOpinion events.
//!
//! Translation lives in one lookup table keyed by `Language`, mapping to
//! template functions — control flow never branches on language strings.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════
// Language
// ═══════════════════════════════════════════

/// Display language for generated phrases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    /// BCP-47-style tag, used for logging and external interop.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
        }
    }

    /// Parse a user-supplied selector. Accepts full names and tags,
    /// case-insensitive. Returns `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "hindi" | "hi" => Some(Self::Hindi),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::English => write!(f, "English"),
            Self::Hindi => write!(f, "Hindi"),
        }
    }
}

// ═══════════════════════════════════════════
// Phrase table
// ═══════════════════════════════════════════

/// Fixed user-facing warning shown when the advice service fails.
/// Deliberately language-independent.
pub const ADVICE_UNAVAILABLE: &str =
    "⚠️ Error: AI could not respond. Please try again later.";

/// Template functions for one language.
pub struct PhraseSet {
    pub report_uploaded: fn(file_name: &str) -> String,
    pub doctor_opinion: fn() -> String,
}

/// Look up the phrase set for a language.
pub fn phrases(lang: Language) -> &'static PhraseSet {
    match lang {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
    }
}

static ENGLISH: PhraseSet = PhraseSet {
    report_uploaded: |file_name| {
        format!("Report {file_name} uploaded. Creatinine: 2.1 mg/dL (high).")
    },
    doctor_opinion: || "Doctor's opinion: Monitor blood pressure and send updates.".to_string(),
};

static HINDI: PhraseSet = PhraseSet {
    report_uploaded: |file_name| {
        format!("रिपोर्ट {file_name} अपलोड हो गई है। Creatinine स्तर: 2.1 mg/dL (उच्च)।")
    },
    doctor_opinion: || "डॉक्टर की सलाह: रक्तचाप की निगरानी करें और रिपोर्ट भेजें।".to_string(),
};

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
