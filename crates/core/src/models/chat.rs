use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chart::{ChartKind, ChartPayload};
use crate::errors::CoreError;

/// Who authored a message in the conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// CSS class used on the message container.
    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "ai",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "User"),
            Sender::Assistant => write!(f, "Assistant"),
        }
    }
}

// ── Wire shape ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ReplyWire {
    #[serde(default)]
    response: String,
    #[serde(default)]
    has_visualization: bool,
    #[serde(default)]
    chart_type: Option<String>,
    #[serde(default)]
    chart_data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// What the chat transport hands back for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Assistant text in the markdown subset
    pub response: String,

    /// Present only when the backend attached a visualization
    pub visualization: Option<ChartPayload>,
}

impl ChatReply {
    /// A text-only reply.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            visualization: None,
        }
    }

    pub fn with_visualization(response: impl Into<String>, payload: ChartPayload) -> Self {
        Self {
            response: response.into(),
            visualization: Some(payload),
        }
    }

    pub fn has_visualization(&self) -> bool {
        self.visualization.is_some()
    }

    pub fn chart_kind(&self) -> Option<ChartKind> {
        self.visualization.as_ref().map(ChartPayload::kind)
    }

    /// Decode a backend reply object.
    ///
    /// `chart_data` is only looked at when `has_visualization` is true. A body
    /// carrying an `error` field is reported as `CoreError::Api`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        let wire: ReplyWire = serde_json::from_value(value)?;

        if let Some(message) = wire.error {
            return Err(CoreError::Api {
                endpoint: "chat".into(),
                message,
            });
        }

        let visualization = if wire.has_visualization {
            let kind = wire
                .chart_type
                .as_deref()
                .map(ChartKind::from_tag)
                .unwrap_or(ChartKind::Unknown);
            let data = wire.chart_data.unwrap_or(serde_json::Value::Null);
            Some(ChartPayload::from_value(kind, data)?)
        } else {
            None
        };

        Ok(Self {
            response: wire.response,
            visualization,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Encode in the backend's reply shape.
    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        let mut body = serde_json::json!({
            "response": self.response,
            "has_visualization": self.has_visualization(),
            "chart_type": self.chart_kind().map(|k| k.tag()),
        });
        if let Some(payload) = &self.visualization {
            body["chart_data"] = payload.to_value()?;
        }
        Ok(body)
    }
}

// ── History ─────────────────────────────────────────────────────────

/// One completed round-trip. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    id: Uuid,
    query: String,
    reply: ChatReply,
    completed_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Record a turn. The query is stored trimmed and must not be empty.
    pub fn new(query: &str, reply: ChatReply) -> Result<Self, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::ValidationError(
                "Chat query must not be empty".into(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            query: query.to_string(),
            reply,
            completed_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn response(&self) -> &str {
        &self.reply.response
    }

    pub fn has_visualization(&self) -> bool {
        self.reply.has_visualization()
    }

    pub fn chart_kind(&self) -> Option<ChartKind> {
        self.reply.chart_kind()
    }

    pub fn chart_payload(&self) -> Option<&ChartPayload> {
        self.reply.visualization.as_ref()
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

/// An entry in the conversation log, already rendered to markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub html: String,
    /// True for the "thinking" placeholder shown while a reply is in flight
    pub pending: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, html: String, pending: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            html,
            pending,
            created_at: Utc::now(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"message {}\"><div class=\"message-content\">{}</div></div>",
            self.sender.css_class(),
            self.html
        )
    }
}
