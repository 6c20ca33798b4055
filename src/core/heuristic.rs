//! Local Heuristic Analyzer
//!
//! Last line of defence when the provider tier is unavailable. Pure and
//! deterministic: lower-cases the message and checks every lexicon entry as a
//! plain substring. No word boundaries, so "diet" matches "die". Recall and
//! predictability win over precision here.
//!
//! Suggestions are fixed templates. This tier never tries to rephrase the
//! actual message.

use crate::models::types::{AnalysisResult, ProviderTag, Suggestions};
use crate::utils::constants::{
    HEURISTIC_FUNNY_TEMPLATE, HEURISTIC_KIND_TEMPLATE, HEURISTIC_PROFESSIONAL_TEMPLATE,
    TOXIC_LEXICON,
};

/// Lexicon-based toxicity check
#[derive(Debug, Clone)]
pub struct HeuristicAnalyzer {
    /// Lower-cased entries, declaration order preserved
    lexicon: Vec<String>,
}

impl Default for HeuristicAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicAnalyzer {
    /// Analyzer over the built-in lexicon
    pub fn new() -> Self {
        Self::with_lexicon(TOXIC_LEXICON)
    }

    /// Analyzer over a custom lexicon. Entries are lower-cased and blank
    /// entries dropped.
    pub fn with_lexicon<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lexicon = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &[String] {
        &self.lexicon
    }

    /// Lexicon entries found in `text`, in lexicon order
    pub fn find_matches(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.lexicon
            .iter()
            .filter(|entry| lowered.contains(entry.as_str()))
            .cloned()
            .collect()
    }

    /// Analyze a message. Never fails.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let matches = self.find_matches(text);
        AnalysisResult::from_tier(
            ProviderTag::LocalHeuristic,
            matches,
            Suggestions::new(
                HEURISTIC_KIND_TEMPLATE,
                HEURISTIC_FUNNY_TEMPLATE,
                HEURISTIC_PROFESSIONAL_TEMPLATE,
            ),
        )
    }
}
