use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, Model};

/// Sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Nucleus sampling value sent with every request.
pub const DEFAULT_TOP_P: f64 = 1.0;

/// Body of a `POST chat/completions` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// The model that will complete the conversation.
    pub model: Model,

    /// Ordered messages; the first is always the system instruction.
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature.
    pub temperature: f64,

    /// Nucleus sampling value.
    pub top_p: f64,

    /// Always false; replies are read in one piece.
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Creates a non-streaming request with the default sampling parameters.
    pub fn new(model: Model, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            stream: false,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the top-p value.
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn request_serialization() {
        let request = ChatCompletionRequest::new(
            Model::default(),
            vec![
                ChatMessage::system("أنت مساعد ذكي ومفيد"),
                ChatMessage::user("مرحبا"),
            ],
        );

        assert_eq!(
            to_value(&request).unwrap(),
            json!({
                "model": "deepseek-chat",
                "messages": [
                    {"role": "system", "content": "أنت مساعد ذكي ومفيد"},
                    {"role": "user", "content": "مرحبا"}
                ],
                "temperature": 0.7,
                "top_p": 1.0,
                "stream": false
            })
        );
    }

    #[test]
    fn builder_overrides_sampling() {
        let request = ChatCompletionRequest::new(Model::default(), Vec::new())
            .with_temperature(0.2)
            .with_top_p(0.9);
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.top_p, 0.9);
        assert!(!request.stream);
    }
}
