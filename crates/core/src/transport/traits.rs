use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::chat::ChatReply;

/// Trait abstraction for the backend the chat client talks to.
///
/// The core only consumes replies; how they are fetched (HTTP, IPC, a test
/// double) is up to the implementation. One query is in flight at a time;
/// overlapping sends are the implementation's to serialize or reject.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatTransport: Send + Sync {
    /// Human-readable name of this transport (for logs/errors).
    fn name(&self) -> &str;

    /// Send one user query and wait for the assistant's reply.
    async fn send_query(&self, query: &str) -> Result<ChatReply, CoreError>;

    /// Fetch the complete financial state for export.
    async fn fetch_export(&self) -> Result<serde_json::Value, CoreError>;
}
