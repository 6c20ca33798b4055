//! Type definitions for the Detoxify mediator
//! The analysis result every tier produces and the transport layer returns

use serde::{Deserialize, Serialize};

/// Which tier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderTag {
    /// Contextual analysis by the Groq-hosted model
    #[serde(rename = "groq")]
    Groq,
    /// Lexicon substring match, no network
    #[serde(rename = "local_heuristic")]
    LocalHeuristic,
}

impl ProviderTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderTag::Groq => "groq",
            ProviderTag::LocalHeuristic => "local_heuristic",
        }
    }
}

/// Three non-toxic rephrasings of the same message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    /// Polite, empathetic wording
    pub kind: String,
    /// Lighthearted wording that defuses the situation
    pub funny: String,
    /// Formal, workplace-appropriate wording
    pub professional: String,
}

impl Suggestions {
    pub fn new(
        kind: impl Into<String>,
        funny: impl Into<String>,
        professional: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            funny: funny.into(),
            professional: professional.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty() && self.funny.is_empty() && self.professional.is_empty()
    }
}

/// Canonical analysis result, serialized verbatim as the response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_toxic: bool,
    /// Lexicon entries or toxicity categories that triggered detection
    pub matches: Vec<String>,
    pub suggestions: Suggestions,
    /// Mirror of `suggestions.kind` for older extension builds
    pub kind_suggestion: String,
    /// None only for the neutral result, where no tier ran
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub provider: Option<ProviderTag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Build a tier result.
    ///
    /// Toxicity is derived from `matches`. Suggestions are cleared when
    /// nothing matched, and `kind_suggestion` always mirrors `suggestions.kind`.
    pub fn from_tier(provider: ProviderTag, matches: Vec<String>, suggestions: Suggestions) -> Self {
        let is_toxic = !matches.is_empty();
        let suggestions = if is_toxic { suggestions } else { Suggestions::default() };

        Self {
            is_toxic,
            kind_suggestion: suggestions.kind.clone(),
            matches,
            suggestions,
            provider: Some(provider),
            error: None,
        }
    }

    /// Non-toxic result with empty suggestions and no tier tag
    pub fn neutral() -> Self {
        Self {
            is_toxic: false,
            matches: Vec::new(),
            suggestions: Suggestions::default(),
            kind_suggestion: String::new(),
            provider: None,
            error: None,
        }
    }

    /// Neutral result annotated with an error, for unexpected failures
    pub fn neutral_with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::neutral()
        }
    }

    /// Short one-line description for logs
    pub fn summary(&self) -> String {
        format!(
            "toxic={} matches={:?} provider={}",
            self.is_toxic,
            self.matches,
            self.provider.map(|p| p.as_str()).unwrap_or("none")
        )
    }
}
