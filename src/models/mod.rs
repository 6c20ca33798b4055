//! Models Module - Data Structures & Configuration
//!
//! The analysis result, the error model and the start-up configuration.

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
