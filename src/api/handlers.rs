//! API Request Handlers

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use super::types::*;
use crate::core::{AnalysisOrchestrator, HeuristicAnalyzer};
use crate::models::config::MediatorConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::AnalysisResult;
use crate::providers::GroqClient;
use crate::utils::constants::APP_VERSION;

/// Shared application state. Read-only after start-up.
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub provider_configured: bool,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>, provider_configured: bool) -> Self {
        Self {
            orchestrator,
            provider_configured,
            start_time: Instant::now(),
        }
    }

    /// Wire the Groq tier and the local tier from configuration
    pub fn from_config(config: &MediatorConfig) -> AppResult<Self> {
        let groq = GroqClient::new(config.provider.clone())?;
        let orchestrator = AnalysisOrchestrator::new(
            Arc::new(groq),
            HeuristicAnalyzer::new(),
            config.provider.timeout,
        );

        Ok(Self::new(
            Arc::new(orchestrator),
            config.provider.has_default_key(),
        ))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        provider_configured: state.provider_configured,
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// Analysis
// ============================================

/// `POST /analyze`
///
/// Provider failures never reach this level. Only a malformed payload or a
/// panic inside the pipeline turns into an error response, and even then the
/// body keeps the neutral result shape.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> (StatusCode, Json<AnalysisResult>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return failure_response(AppError::bad_payload(rejection.body_text()));
        }
    };

    let pipeline = state
        .orchestrator
        .handle_analysis_request(req.text.as_deref(), req.groq_key.as_deref());

    match AssertUnwindSafe(pipeline).catch_unwind().await {
        Ok(result) => {
            info!(result = %result.summary(), "Analysis served");
            (StatusCode::OK, Json(result))
        }
        Err(_) => failure_response(AppError::internal("Analysis pipeline panicked")),
    }
}

fn failure_response(err: AppError) -> (StatusCode, Json<AnalysisResult>) {
    error!(code = err.code_str(), error = %err, "Server error");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(AnalysisResult::neutral_with_error(err.message)))
}
