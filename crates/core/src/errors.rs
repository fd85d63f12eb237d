use thiserror::Error;

/// Unified error type for the entire finance-chat-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The message formatter and the visualization dispatcher are total and
/// never produce one of these.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Payload / Wire ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid chart payload for {kind}: {message}")]
    InvalidPayload {
        kind: String,
        message: String,
    },

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({endpoint}): {message}")]
    Api {
        endpoint: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Rendering ───────────────────────────────────────────────────
    #[error("Figure rendering failed ({engine}): {message}")]
    Render {
        engine: String,
        message: String,
    },

    // ── Input / Configuration ───────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors often carry the full request URL; keep the query out of logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
