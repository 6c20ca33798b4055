//! Detoxify Mediator Library
//!
//! Two-tier toxicity analysis for short messages:
//! - Groq-hosted model: contextual detection plus polite, humorous and
//!   professional rephrasings in the message's own language
//! - Local lexicon heuristic: deterministic fallback whenever the provider
//!   is unreachable, slow, unauthorized or off-schema
//!
//! The orchestrator always produces a result. Provider failures are logged
//! and absorbed.

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{AnalysisOrchestrator, HeuristicAnalyzer};
pub use api::{create_router, AppState};
pub use models::{
    AnalysisResult, AppError, AppResult, ErrorCode, MediatorConfig, ProviderConfig, ProviderTag,
    Suggestions,
};
pub use providers::{GroqClient, ToxicityProvider};
