//! Constants Module - Single Source of Truth
//!
//! Every default, lexicon entry and template string the mediator uses lives
//! here. Other modules reference these instead of hardcoding values.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "Detoxify";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for provider requests
pub const USER_AGENT: &str = concat!("Detoxify/", env!("CARGO_PKG_VERSION"));

// ============================================
// SERVER DEFAULTS
// ============================================

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port (the browser extension points at :5000)
pub const DEFAULT_PORT: u16 = 5000;

// ============================================
// GROQ PROVIDER
// ============================================

/// OpenAI-compatible Groq endpoint
pub const GROQ_DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat model used for analysis and rephrasing
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Every Groq API key starts with this prefix
pub const GROQ_KEY_PREFIX: &str = "gsk_";

/// Sampling temperature. Slightly above deterministic so rephrasings read
/// naturally while the JSON envelope stays stable.
pub const GROQ_DEFAULT_TEMPERATURE: f32 = 0.4;

/// Output token budget per completion
pub const GROQ_DEFAULT_MAX_TOKENS: u32 = 512;

/// Upper bound for a single provider attempt (seconds)
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Category reported when the model flags toxicity without naming any
pub const GENERIC_TOXICITY_MATCH: &str = "toxicity";

// ============================================
// LOCAL HEURISTIC
// ============================================

/// Toxic surface forms, matched as lower-case substrings in this order
pub const TOXIC_LEXICON: [&str; 10] = [
    "stupid", "idiot", "shut up", "hate", "kill", "die", "ugly", "loser", "trash", "dumb",
];

/// Fixed suggestions returned by the local tier
pub const HEURISTIC_KIND_TEMPLATE: &str = "Let's keep our language polite and respectful.";
pub const HEURISTIC_FUNNY_TEMPLATE: &str = "I'm sure we can express that more positively! 😄";
pub const HEURISTIC_PROFESSIONAL_TEMPLATE: &str = "Please rephrase this to be more professional.";

// ============================================
// HELPER FUNCTIONS
// ============================================

/// Cheap syntactic check for a Groq credential.
///
/// Does not prove the key is live: revoked or quota-exhausted keys only show
/// up as a failed call.
#[inline]
pub fn is_groq_key(key: &str) -> bool {
    key.starts_with(GROQ_KEY_PREFIX) && key.len() > GROQ_KEY_PREFIX.len()
}
