//! Configuration for the chat side-session.

use std::fmt;
use std::time::Duration;

use crate::client::{ChatClient, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::types::{DEFAULT_TEMPERATURE, DEFAULT_TOP_P, Model};

/// Number of turns the transcript keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Instruction sent as the first message of every request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "أنت مساعد ذكي ومفيد";

/// Assistant turn recorded when the chat opens.
pub const DEFAULT_GREETING: &str = "مرحباً! كيف يمكنني مساعدتك اليوم؟";

/// Configuration for a chat session.
///
/// Holds the credential and endpoint as well as the request parameters; it is
/// built once at startup and handed to the session constructor.
#[derive(Clone)]
pub struct ChatConfig {
    /// Bearer credential.  `None` falls back to the environment.
    pub api_key: Option<String>,

    /// Base URL of the endpoint.  `None` uses the hosted default.
    pub base_url: Option<String>,

    /// The model to use for generating responses.
    pub model: Model,

    /// Instruction prepended to every request.
    pub system_prompt: String,

    /// Sampling temperature.
    pub temperature: f64,

    /// Top-p nucleus sampling value.
    pub top_p: f64,

    /// Maximum number of turns kept in the transcript (at least 1).
    pub history_limit: usize,

    /// Assistant turn shown when the session opens.
    pub greeting: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: deepseek-chat
    /// - Temperature 0.7, top-p 1
    /// - History: 10 turns
    /// - Greeting: enabled
    /// - Timeout: 60 seconds
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: Model::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            history_limit: DEFAULT_HISTORY_LIMIT,
            greeting: Some(DEFAULT_GREETING.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
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

    /// Sets the transcript capacity.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Sets or disables the opening greeting.
    pub fn with_greeting(mut self, greeting: Option<String>) -> Self {
        self.greeting = greeting;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks the values a session cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(Error::validation(
                "history limit must be at least 1",
                Some("history_limit".to_string()),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::validation(
                "temperature must be between 0 and 2",
                Some("temperature".to_string()),
            ));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(Error::validation(
                "top_p must be between 0 and 1",
                Some("top_p".to_string()),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::validation(
                "timeout must be positive",
                Some("timeout".to_string()),
            ));
        }
        Ok(())
    }

    /// Builds an HTTP client for the configured endpoint.
    pub fn build_client(&self) -> Result<ChatClient> {
        self.validate()?;
        ChatClient::with_options(
            self.api_key.clone(),
            self.base_url.clone(),
            Some(self.timeout),
        )
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("history_limit", &self.history_limit)
            .field("greeting", &self.greeting)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::DeepseekChat));
        assert_eq!(config.system_prompt, "أنت مساعد ذكي ومفيد");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.greeting.as_deref(), Some(DEFAULT_GREETING));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_api_key("k")
            .with_base_url("http://localhost:9/v1/")
            .with_model(Model::Custom("local".to_string()))
            .with_system_prompt("Be brief.")
            .with_temperature(0.2)
            .with_top_p(0.5)
            .with_history_limit(4)
            .with_greeting(None)
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9/v1/"));
        assert_eq!(config.model, Model::Custom("local".to_string()));
        assert_eq!(config.system_prompt, "Be brief.");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.top_p, 0.5);
        assert_eq!(config.history_limit, 4);
        assert!(config.greeting.is_none());
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(ChatConfig::new().with_history_limit(0).validate().is_err());
        assert!(ChatConfig::new().with_temperature(3.0).validate().is_err());
        assert!(ChatConfig::new().with_top_p(1.5).validate().is_err());
        assert!(
            ChatConfig::new()
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn debug_redacts_key() {
        let config = ChatConfig::new().with_api_key("sk-very-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn build_client_uses_config() {
        let client = ChatConfig::new()
            .with_api_key("k")
            .with_base_url("http://127.0.0.1:1/v1")
            .with_timeout(Duration::from_secs(2))
            .build_client()
            .unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://127.0.0.1:1/v1/chat/completions"
        );
        assert_eq!(client.timeout(), Duration::from_secs(2));
    }
}
