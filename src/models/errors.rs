//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so the logs tell apart a missing
//! key, a slow provider and a model that ignored the JSON contract.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - PROVIDER_xxx: provider tier failures (all recovered by the local tier)
//! - API_xxx: transport failures surfaced to the caller
//! - CFG_xxx: configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Provider Errors (1xx)
    // ============================================
    /// Neither a valid caller key nor a default key is available
    ProviderMissingKey,
    /// Connection to the provider failed
    ProviderConnectionFailed,
    /// Provider call exceeded the timeout
    ProviderTimeout,
    /// Provider rejected the credential (HTTP 401/403)
    ProviderUnauthorized,
    /// Provider rate limited or out of quota (HTTP 429)
    ProviderRateLimited,
    /// Provider returned another non-success status
    ProviderHttpStatus,
    /// Reply did not match the expected verdict schema
    ProviderInvalidResponse,

    // ============================================
    // API Errors (3xx)
    // ============================================
    /// Caller payload could not be decoded
    ApiBadPayload,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Configuration Errors (4xx)
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            // Provider Errors
            Self::ProviderMissingKey => "PROVIDER_MISSING_KEY",
            Self::ProviderConnectionFailed => "PROVIDER_CONNECTION_FAILED",
            Self::ProviderTimeout => "PROVIDER_TIMEOUT",
            Self::ProviderUnauthorized => "PROVIDER_UNAUTHORIZED",
            Self::ProviderRateLimited => "PROVIDER_RATE_LIMITED",
            Self::ProviderHttpStatus => "PROVIDER_HTTP_STATUS",
            Self::ProviderInvalidResponse => "PROVIDER_INVALID_RESPONSE",

            // API Errors
            Self::ApiBadPayload => "API_BAD_PAYLOAD",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            // Configuration Errors
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    /// True for failures the local tier recovers from
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::ProviderMissingKey
                | Self::ProviderConnectionFailed
                | Self::ProviderTimeout
                | Self::ProviderUnauthorized
                | Self::ProviderRateLimited
                | Self::ProviderHttpStatus
                | Self::ProviderInvalidResponse
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// No usable credential
    pub fn missing_api_key() -> Self {
        Self::new(
            ErrorCode::ProviderMissingKey,
            "No valid caller key and no default GROQ_API_KEY configured",
        )
    }

    /// Provider timeout
    pub fn provider_timeout(timeout: std::time::Duration) -> Self {
        Self::new(
            ErrorCode::ProviderTimeout,
            format!("Provider did not answer within {}ms", timeout.as_millis()),
        )
    }

    /// Non-success HTTP status from the provider
    pub fn provider_status(status: u16) -> Self {
        let code = match status {
            401 | 403 => ErrorCode::ProviderUnauthorized,
            429 => ErrorCode::ProviderRateLimited,
            _ => ErrorCode::ProviderHttpStatus,
        };
        Self::new(code, format!("Provider returned HTTP {}", status))
    }

    /// Reply does not match the verdict schema
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderInvalidResponse, msg)
    }

    /// Caller payload could not be decoded
    pub fn bad_payload(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadPayload, msg)
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::ProviderTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::ProviderConnectionFailed, "Connection failed")
        } else if let Some(status) = err.status() {
            Self::provider_status(status.as_u16())
        } else if err.is_decode() {
            Self::with_source(ErrorCode::ProviderInvalidResponse, "Undecodable reply", err)
        } else {
            Self::with_source(ErrorCode::ProviderConnectionFailed, "Request failed", err)
        }
    }
}
