use uuid::Uuid;

use crate::format::markdown::format_message;
use crate::models::chat::{ChatMessage, Sender};

/// The ordered list of messages shown in the chat pane.
#[derive(Debug, Default)]
pub struct ConversationLog {
    messages: Vec<ChatMessage>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message authored by the user. The text is formatted.
    pub fn push_user(&mut self, text: &str) -> Uuid {
        self.push(Sender::User, format_message(text), false)
    }

    /// Append an assistant message. The text is formatted.
    pub fn push_assistant(&mut self, text: &str) -> Uuid {
        self.push(Sender::Assistant, format_message(text), false)
    }

    /// Append the in-flight placeholder. The text is shown as-is, followed by
    /// animated loading dots.
    pub fn push_pending(&mut self, text: &str) -> Uuid {
        let html = format!(
            "<p>{text} <span class=\"loading-dots\"><span>.</span><span>.</span><span>.</span></span></p>"
        );
        self.push(Sender::Assistant, html, true)
    }

    /// Remove a message by id, returning it if it was present.
    pub fn remove(&mut self, id: Uuid) -> Option<ChatMessage> {
        let idx = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(idx))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.messages.iter().any(|m| m.pending)
    }

    pub fn to_html(&self) -> String {
        self.messages.iter().map(ChatMessage::to_html).collect()
    }

    fn push(&mut self, sender: Sender, html: String, pending: bool) -> Uuid {
        let message = ChatMessage::new(sender, html, pending);
        let id = message.id;
        self.messages.push(message);
        id
    }
}
