//! Static state → language-code table
//!
//! Maps Indian state names to the two-letter language code used when
//! querying the upstream provider. Matching is exact and case-sensitive;
//! anything not in the table falls back to English. This mirrors how
//! regional outlets publish: Hindi-belt states get "hi", the rest get
//! their dominant regional language.

use std::collections::HashMap;

/// Fallback language for states not in the table
pub const DEFAULT_LANGUAGE: &str = "en";

/// State name → language code, one entry per state served
const STATE_LANGUAGES: &[(&str, &str)] = &[
    ("Andhra Pradesh", "te"),
    ("Arunachal Pradesh", "en"),
    ("Assam", "as"),
    ("Bihar", "hi"),
    ("Chhattisgarh", "hi"),
    ("Delhi", "hi"),
    ("Goa", "en"),
    ("Gujarat", "gu"),
    ("Haryana", "hi"),
    ("Himachal Pradesh", "hi"),
    ("Jammu and Kashmir", "en"),
    ("Jharkhand", "hi"),
    ("Karnataka", "kn"),
    ("Kerala", "ml"),
    ("Madhya Pradesh", "hi"),
    ("Maharashtra", "mr"),
    ("Manipur", "en"),
    ("Meghalaya", "en"),
    ("Mizoram", "en"),
    ("Nagaland", "en"),
    ("Odisha", "or"),
    ("Punjab", "pa"),
    ("Rajasthan", "hi"),
    ("Sikkim", "en"),
    ("Tamil Nadu", "ta"),
    ("Telangana", "te"),
    ("Tripura", "en"),
    ("Uttar Pradesh", "hi"),
    ("Uttarakhand", "hi"),
    ("West Bengal", "bn"),
];

/// Immutable lookup table from state name to upstream language code
#[derive(Debug, Clone)]
pub struct LanguageTable {
    languages: HashMap<&'static str, &'static str>,
}

impl LanguageTable {
    /// Build the table from the static entries
    pub fn new() -> Self {
        Self {
            languages: STATE_LANGUAGES.iter().copied().collect(),
        }
    }

    /// Resolve the language code for a state, defaulting to English
    /// for unknown (or misspelled) state names
    pub fn resolve(&self, state: &str) -> &'static str {
        self.languages.get(state).copied().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Number of states in the table
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the table is empty (never, in practice)
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new()
    }
}
