//! Output rendering for the game and the chat side-session.
//!
//! This module provides the [`Renderer`] trait and a plain-text
//! implementation that writes to stdout with optional ANSI styling.

use std::io::{self, Stdout, Write};

use crate::chat::{ChatState, Speaker, Turn};
use crate::riddle::Verdict;

/// ANSI escape code for bold text (used for questions).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for the waiting marker).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the assistant).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for the player).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for correct answers).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors and wrong answers).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering game and chat output.
///
/// The chat session calls [`Renderer::print_turn`] for every turn it appends,
/// and reports each [`ChatState`] transition around a network call through
/// [`Renderer::state_changed`].
pub trait Renderer: Send {
    /// Print a transcript turn as `label: text`.
    fn print_turn(&mut self, turn: &Turn);

    /// Print a riddle question.
    fn print_question(&mut self, question: &str);

    /// Print the result of an answer check.
    fn print_verdict(&mut self, verdict: &Verdict);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Called when the chat session enters `state`.
    fn state_changed(&mut self, _state: ChatState) {}
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    waiting: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            waiting: false,
        }
    }

    /// Returns true if ANSI styling is enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_color {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    /// Formats a turn as `label: text`, colouring the label by speaker.
    fn format_turn(&self, turn: &Turn) -> String {
        let color = match turn.speaker {
            Speaker::User => ANSI_YELLOW,
            Speaker::Assistant => ANSI_CYAN,
            Speaker::Error => ANSI_RED,
        };
        format!("{}: {}", self.paint(color, turn.speaker.label()), turn.text)
    }

    fn clear_waiting(&mut self) {
        if self.waiting {
            // Erase the marker line.
            if self.use_color {
                print!("\r\x1b[2K");
            } else {
                println!();
            }
            self.waiting = false;
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_turn(&mut self, turn: &Turn) {
        self.clear_waiting();
        println!("{}\n", self.format_turn(turn));
        self.flush();
    }

    fn print_question(&mut self, question: &str) {
        println!("{}", self.paint(ANSI_BOLD, question));
        self.flush();
    }

    fn print_verdict(&mut self, verdict: &Verdict) {
        if verdict.correct {
            println!("{}", self.paint(ANSI_GREEN, "🎉 أحسنت! إجابتك صحيحة."));
        } else {
            let text = format!("❌ الإجابة الصحيحة هي: {}", verdict.answer);
            println!("{}", self.paint(ANSI_RED, &text));
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.clear_waiting();
        eprintln!("{}", self.paint(ANSI_RED, &format!("Error: {error}")));
    }

    fn print_info(&mut self, info: &str) {
        self.clear_waiting();
        println!("{info}");
        self.flush();
    }

    fn state_changed(&mut self, state: ChatState) {
        match state {
            ChatState::AwaitingReply => {
                print!("{}", self.paint(ANSI_DIM, "..."));
                self.waiting = true;
            }
            ChatState::Idle => self.clear_waiting(),
        }
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color());
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color());
        assert_eq!(renderer.paint(ANSI_RED, "x"), "x");
    }

    #[test]
    fn paint_wraps_with_reset() {
        let renderer = PlainTextRenderer::with_color(true);
        assert_eq!(renderer.paint(ANSI_GREEN, "ok"), "\x1b[32mok\x1b[0m");
    }

    #[test]
    fn turn_format_uses_speaker_label() {
        let renderer = PlainTextRenderer::with_color(false);
        let turn = Turn::new(Speaker::Error, "حدث خطأ: boom");
        assert_eq!(renderer.format_turn(&turn), "خطأ: حدث خطأ: boom");
    }

    #[test]
    fn turn_format_colours_only_the_label() {
        let renderer = PlainTextRenderer::with_color(true);
        let turn = Turn::user("الساعة");
        assert_eq!(renderer.format_turn(&turn), "\x1b[33mأنت\x1b[0m: الساعة");
    }

    #[test]
    fn waiting_marker_follows_chat_state() {
        let mut renderer = PlainTextRenderer::with_color(true);
        renderer.state_changed(ChatState::AwaitingReply);
        assert!(renderer.waiting);
        renderer.state_changed(ChatState::Idle);
        assert!(!renderer.waiting);
    }
}
