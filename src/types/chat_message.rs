use serde::{Deserialize, Serialize};

/// Role of a message in a chat-completions request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Fixed instruction placed first in every request.
    System,

    /// Text typed by the player.
    User,

    /// Text produced by the model.
    Assistant,
}

/// One `{role, content}` entry of the `messages` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// The role of the message.
    pub role: ChatRole,

    /// The text of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a new `ChatMessage` with the given role and content.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn chat_message_serialization() {
        let message = ChatMessage::user("مرحبا");
        assert_eq!(
            to_value(&message).unwrap(),
            json!({
                "role": "user",
                "content": "مرحبا"
            })
        );
    }

    #[test]
    fn roles_are_lowercase() {
        assert_eq!(to_value(ChatRole::System).unwrap(), json!("system"));
        assert_eq!(to_value(ChatRole::Assistant).unwrap(), json!("assistant"));
    }
}
