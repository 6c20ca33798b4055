//! Analysis Orchestrator
//!
//! Per-request fallback chain:
//!
//! ```text
//! Start ─ empty text ──────────────────────────────► Neutral
//!   └──► ProviderAttempt ─ Ok ─────────────────────► Success (groq)
//!              └─ Err / timeout ─► HeuristicAttempt ► Success (local_heuristic)
//! ```
//!
//! No state survives a request. Provider failures are logged and absorbed,
//! never returned to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::heuristic::HeuristicAnalyzer;
use crate::models::errors::AppError;
use crate::models::types::AnalysisResult;
use crate::providers::ToxicityProvider;

pub struct AnalysisOrchestrator {
    provider: Option<Arc<dyn ToxicityProvider>>,
    heuristic: HeuristicAnalyzer,
    provider_timeout: Duration,
}

impl AnalysisOrchestrator {
    pub fn new(
        provider: Arc<dyn ToxicityProvider>,
        heuristic: HeuristicAnalyzer,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            provider: Some(provider),
            heuristic,
            provider_timeout,
        }
    }

    /// Orchestrator that only ever runs the local tier
    pub fn heuristic_only(heuristic: HeuristicAnalyzer) -> Self {
        Self {
            provider: None,
            heuristic,
            provider_timeout: Duration::ZERO,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Analyze one message. Always produces a result.
    pub async fn handle_analysis_request(
        &self,
        text: Option<&str>,
        caller_key: Option<&str>,
    ) -> AnalysisResult {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                debug!("Empty message, returning neutral result");
                return AnalysisResult::neutral();
            }
        };

        let start = Instant::now();

        if let Some(provider) = &self.provider {
            match self.attempt_provider(provider.as_ref(), text, caller_key).await {
                Ok(result) => return result,
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        code = e.code_str(),
                        error = %e,
                        elapsed_ms = %start.elapsed().as_millis(),
                        "Provider failed or limit reached, using local heuristic"
                    );
                }
            }
        }

        let result = self.heuristic.analyze(text);
        info!(result = %result.summary(), "Local heuristic analysis complete");
        result
    }

    /// Single bounded attempt, no retries
    async fn attempt_provider(
        &self,
        provider: &dyn ToxicityProvider,
        text: &str,
        caller_key: Option<&str>,
    ) -> Result<AnalysisResult, AppError> {
        timeout(self.provider_timeout, provider.analyze(text, caller_key))
            .await
            .map_err(|_| AppError::provider_timeout(self.provider_timeout))?
    }
}
