use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Client configuration.
///
/// Every field has a default, so a partial JSON document (or none at all)
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root URL of the assistant backend (the `/chat` and `/data/all` routes hang off it)
    pub base_url: String,

    /// Per-request timeout for the HTTP transport, in seconds (ignored on wasm)
    pub request_timeout_secs: u64,

    /// Placeholder text shown while a reply is in flight
    pub loading_text: String,

    /// Message shown in the log when a round-trip fails
    pub error_message: String,

    /// Notice shown in the visualization region for an unknown chart kind
    pub no_visualization_notice: String,

    /// File name offered for the full-state export
    pub export_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            loading_text: "Thinking...".to_string(),
            error_message:
                "Sorry, I encountered an error processing your request. Please try again."
                    .to_string(),
            no_visualization_notice: "No visualization available for this query.".to_string(),
            export_file_name: "fi_money_mcp_data.json".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidSettings(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults with environment variable overrides applied.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut settings = Self::default();
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Override fields from `FINCHAT_BASE_URL`, `FINCHAT_TIMEOUT_SECS` and
    /// `FINCHAT_EXPORT_FILE` when set. Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FINCHAT_BASE_URL") {
            self.base_url = url;
        }

        if let Ok(timeout) = std::env::var("FINCHAT_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => tracing::warn!(value = %timeout, "Ignoring invalid FINCHAT_TIMEOUT_SECS"),
            }
        }

        if let Ok(name) = std::env::var("FINCHAT_EXPORT_FILE") {
            self.export_file_name = name;
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::InvalidSettings(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidSettings(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(CoreError::InvalidSettings(
                "export_file_name must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// `base_url` joined with a route, without doubling the slash.
    pub fn endpoint(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }
}
