//! Configuration for the game binary.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! [`GameConfig`] handed to the sessions at startup.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::chat::ChatConfig;
use crate::error::Result;
use crate::riddle::RiddleBank;
use crate::types::Model;

/// Command-line arguments for the alghaz binary.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct GameArgs {
    /// YAML file with riddles to use instead of the built-in ones.
    #[arrrg(optional, "YAML file of {question, answer} riddles", "FILE")]
    pub riddles: Option<String>,

    /// Credential for the chat endpoint.
    #[arrrg(optional, "API key (default: $DEEPSEEK_API_KEY)", "KEY")]
    pub api_key: Option<String>,

    /// Base URL of the chat endpoint.
    #[arrrg(optional, "Endpoint base URL (default: https://api.deepseek.com/v1/)", "URL")]
    pub base_url: Option<String>,

    /// Model to chat with.
    #[arrrg(optional, "Model to use (default: deepseek-chat)", "MODEL")]
    pub model: Option<String>,

    /// System instruction for the chat.
    #[arrrg(optional, "System prompt for the chat", "PROMPT")]
    pub system: Option<String>,

    /// Transcript capacity.
    #[arrrg(optional, "Turns kept in the chat history (default: 10)", "TURNS")]
    pub history: Option<u32>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log every request and response to stderr.
    #[arrrg(flag, "Log chat requests and responses to stderr")]
    pub verbose: bool,
}

/// Resolved configuration for the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Riddle file, if any.
    pub riddles_path: Option<PathBuf>,

    /// Settings for the chat side-session.
    pub chat: ChatConfig,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to log chat exchanges.
    pub verbose: bool,
}

impl GameConfig {
    /// Creates a configuration using the built-in riddles and chat defaults.
    pub fn new() -> Self {
        Self {
            riddles_path: None,
            chat: ChatConfig::new(),
            use_color: true,
            verbose: false,
        }
    }

    /// Loads the riddle bank this configuration names.
    pub fn load_bank(&self) -> Result<RiddleBank> {
        match &self.riddles_path {
            Some(path) => RiddleBank::from_file(path),
            None => Ok(RiddleBank::builtin()),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GameArgs> for GameConfig {
    fn from(args: GameArgs) -> Self {
        let mut chat = ChatConfig::new();
        chat.api_key = args.api_key;
        chat.base_url = args.base_url;
        if let Some(model) = args.model {
            chat.model = Model::from(model);
        }
        if let Some(system) = args.system {
            chat.system_prompt = system;
        }
        if let Some(history) = args.history {
            chat.history_limit = history as usize;
        }
        if let Some(timeout) = args.timeout {
            chat.timeout = Duration::from_secs(u64::from(timeout));
        }

        GameConfig {
            riddles_path: args.riddles.map(PathBuf::from),
            chat,
            use_color: !args.no_color,
            verbose: args.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    #[test]
    fn config_from_args_defaults() {
        let config = GameConfig::from(GameArgs::default());
        assert!(config.riddles_path.is_none());
        assert!(config.use_color);
        assert!(!config.verbose);
        assert_eq!(config.chat.model, Model::Known(KnownModel::DeepseekChat));
        assert_eq!(config.chat.history_limit, 10);
        assert_eq!(config.load_bank().unwrap(), RiddleBank::builtin());
    }

    #[test]
    fn config_from_args_custom() {
        let args = GameArgs {
            riddles: Some("riddles.yaml".to_string()),
            api_key: Some("k".to_string()),
            base_url: Some("http://localhost:8000/v1/".to_string()),
            model: Some("local-model".to_string()),
            system: Some("Answer in one line.".to_string()),
            history: Some(4),
            timeout: Some(5),
            no_color: true,
            verbose: true,
        };
        let config = GameConfig::from(args);
        assert_eq!(config.riddles_path, Some(PathBuf::from("riddles.yaml")));
        assert_eq!(config.chat.api_key.as_deref(), Some("k"));
        assert_eq!(
            config.chat.base_url.as_deref(),
            Some("http://localhost:8000/v1/")
        );
        assert_eq!(config.chat.model, Model::Custom("local-model".to_string()));
        assert_eq!(config.chat.system_prompt, "Answer in one line.");
        assert_eq!(config.chat.history_limit, 4);
        assert_eq!(config.chat.timeout, Duration::from_secs(5));
        assert!(!config.use_color);
        assert!(config.verbose);
    }

    #[test]
    fn missing_riddle_file_fails_to_load() {
        let config = GameConfig {
            riddles_path: Some(PathBuf::from("/no/such/riddles.yaml")),
            ..GameConfig::new()
        };
        assert!(config.load_bank().is_err());
    }
}
