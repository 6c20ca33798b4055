//! Providers Module - External Analysis Tiers
//!
//! The orchestrator talks to the hosted model only through
//! [`ToxicityProvider`], so the fallback chain can be exercised without a
//! network.

pub mod groq;
pub mod prompt;

use async_trait::async_trait;

use crate::models::errors::AppResult;
use crate::models::types::AnalysisResult;

pub use groq::GroqClient;

/// A remote tier that can analyze a message
#[async_trait]
pub trait ToxicityProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Analyze `text`, optionally with a caller-supplied credential.
    ///
    /// Every failure comes back as `Err`; callers fall back on it.
    async fn analyze(&self, text: &str, caller_key: Option<&str>) -> AppResult<AnalysisResult>;
}
