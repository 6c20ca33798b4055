//! API Request/Response Types

use serde::{Deserialize, Serialize};

/// Envelope for auxiliary endpoints. `/analyze` answers with the bare
/// `AnalysisResult` instead, which is what the extension parses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

// ============================================
// Analysis
// ============================================

/// Body of `POST /analyze`.
///
/// Both fields are optional on the wire: a missing `text` yields the neutral
/// result rather than a rejection.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Caller-supplied Groq key, used when it looks valid
    #[serde(default)]
    pub groq_key: Option<String>,
}

impl std::fmt::Debug for AnalyzeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzeRequest")
            .field("text_len", &self.text.as_ref().map(|t| t.chars().count()))
            .field("groq_key", &self.groq_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Whether a default `GROQ_API_KEY` is loaded
    pub provider_configured: bool,
}
