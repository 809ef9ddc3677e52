//! Slash command parsing for the terminal front-end.
//!
//! Lines that start with `/` control the game; anything else is an answer to
//! the current riddle, or a chat message while the chat is open.

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    /// Show a new random riddle.
    Next,

    /// Open the chat side-session.
    Chat,

    /// Close the chat and return to the riddle.
    Back,

    /// Clear the chat transcript.
    Clear,

    /// Display score or chat statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(GameCommand)` if the input is a command, or `None` if it
/// should be treated as an answer or chat message.
///
/// # Examples
///
/// ```
/// # use alghaz::commands::{GameCommand, parse_command};
/// assert_eq!(parse_command("/next"), Some(GameCommand::Next));
/// assert!(parse_command("الساعة").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<GameCommand> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "next" | "n" => GameCommand::Next,
        "chat" => GameCommand::Chat,
        "back" | "close" => GameCommand::Back,
        "clear" => GameCommand::Clear,
        "stats" | "score" => GameCommand::Stats,
        "help" | "?" => GameCommand::Help,
        "quit" | "exit" | "q" => GameCommand::Quit,
        "" => GameCommand::Invalid("empty command".to_string()),
        _ => GameCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    match (result, argument) {
        (GameCommand::Invalid(message), _) => Some(GameCommand::Invalid(message)),
        (_, Some(_)) => Some(GameCommand::Invalid(format!(
            "/{} does not take an argument",
            command
        ))),
        (cmd, None) => Some(cmd),
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  <answer>     Check an answer to the current riddle
  /next        Show a new riddle
  /chat        Open the chat with the assistant
  /back        Close the chat (its history is discarded)
  /clear       Clear the chat history
  /stats       Show score or chat statistics
  /help        Show this help message
  /quit        Exit"#
}
