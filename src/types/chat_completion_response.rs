use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Body of a successful chat-completions response.
///
/// Only the fields the chat session reads are modelled; anything else the
/// endpoint sends is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    /// Generated alternatives; the session uses the first.
    pub choices: Vec<Choice>,

    /// Model that produced the reply, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// One generated alternative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,

    /// Why generation stopped, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The message inside a [`Choice`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    /// Reply text.
    pub content: String,
}

impl ChatCompletionResponse {
    /// Builds a single-choice response; handy for stub backends.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: ChoiceMessage {
                    content: content.into(),
                },
                finish_reason: None,
            }],
            model: None,
        }
    }

    /// Returns `choices[0].message.content`.
    pub fn reply_text(&self) -> Result<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| Error::serialization("response contained no choices", None))
    }
}
