use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::ChatTransport;
use crate::errors::CoreError;
use crate::models::chat::ChatReply;
use crate::models::settings::Settings;

/// HTTP transport for the assistant backend.
///
/// - `POST /chat` with `{"query": ...}` returns a chat reply
/// - `GET /data/all` returns the full state for export
///
/// Error responses carry `{"error": "..."}`; that message is surfaced in
/// `CoreError::Api`.
pub struct HttpChatTransport {
    client: Client,
    chat_url: String,
    export_url: String,
}

impl HttpChatTransport {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            chat_url: settings.endpoint("chat"),
            export_url: settings.endpoint("data/all"),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub fn export_url(&self) -> &str {
        &self.export_url
    }
}

impl Default for HttpChatTransport {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

// ── Backend request/response types ──────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turn a non-2xx response into `CoreError::Api`, preferring the backend's
/// own error message over the bare status.
async fn check_status(resp: Response, endpoint: &str) -> Result<Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => format!("HTTP {status}"),
    };
    Err(CoreError::Api {
        endpoint: endpoint.to_string(),
        message,
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatTransport for HttpChatTransport {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn send_query(&self, query: &str) -> Result<ChatReply, CoreError> {
        tracing::debug!(url = %self.chat_url, "Sending chat query");

        let resp = self
            .client
            .post(&self.chat_url)
            .json(&ChatRequest { query })
            .send()
            .await?;
        let resp = check_status(resp, "chat").await?;

        let body: serde_json::Value = resp.json().await.map_err(|e| CoreError::Api {
            endpoint: "chat".into(),
            message: format!("Failed to parse chat reply: {e}"),
        })?;

        ChatReply::from_value(body)
    }

    async fn fetch_export(&self) -> Result<serde_json::Value, CoreError> {
        let resp = self.client.get(&self.export_url).send().await?;
        let resp = check_status(resp, "data/all").await?;

        resp.json().await.map_err(|e| CoreError::Api {
            endpoint: "data/all".into(),
            message: format!("Failed to parse export data: {e}"),
        })
    }
}
