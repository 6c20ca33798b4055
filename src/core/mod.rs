//! Core Module - Analysis Pipeline
//!
//! The local heuristic tier and the orchestrator that chains it behind the
//! provider tier.

pub mod heuristic;
pub mod orchestrator;

pub use heuristic::*;
pub use orchestrator::*;
