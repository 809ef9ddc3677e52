//! Turns and the capped transcript that holds them.
//!
//! The same capped list feeds both the display and the context sent with each
//! request; there is no separate, longer display history.

use std::collections::VecDeque;

use crate::chat::config::DEFAULT_HISTORY_LIMIT;
use crate::types::ChatRole;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// The player.
    User,
    /// The remote model.
    Assistant,
    /// A failed exchange, shown in place of a reply.
    Error,
}

impl Speaker {
    /// Label shown in front of the turn text.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "أنت",
            Speaker::Assistant => "مساعد",
            Speaker::Error => "خطأ",
        }
    }
}

/// Maps a speaker onto the two conversational roles of the request schema.
///
/// Anything that is not the player, error turns included, goes out as
/// `assistant`.
pub fn outbound_role(speaker: Speaker) -> ChatRole {
    match speaker {
        Speaker::User => ChatRole::User,
        Speaker::Assistant | Speaker::Error => ChatRole::Assistant,
    }
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Who produced it.
    pub speaker: Speaker,
    /// What was said.
    pub text: String,
}

impl Turn {
    /// Creates a turn.
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    /// Creates a player turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    /// Creates a model turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }

    /// Creates an error turn.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Speaker::Error, text)
    }
}

/// Ordered, append-only turns with FIFO eviction past `capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Transcript {
    /// Creates an empty transcript holding at most `capacity` turns.
    ///
    /// A capacity of zero is raised to one so the newest turn always survives.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends a turn, then drops the oldest turns until the cap holds.
    /// Returns how many turns were dropped.
    pub fn push(&mut self, turn: Turn) -> usize {
        self.turns.push_back(turn);
        let mut evicted = 0;
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Number of turns held.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if there are no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Maximum number of turns held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Turn> + ExactSizeIterator {
        self.turns.iter()
    }

    /// The newest turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.back()
    }

    /// Removes every turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(Speaker::User.label(), "أنت");
        assert_eq!(Speaker::Assistant.label(), "مساعد");
        assert_eq!(Speaker::Error.label(), "خطأ");
    }

    #[test]
    fn error_turns_go_out_as_assistant() {
        assert_eq!(outbound_role(Speaker::User), ChatRole::User);
        assert_eq!(outbound_role(Speaker::Assistant), ChatRole::Assistant);
        assert_eq!(outbound_role(Speaker::Error), ChatRole::Assistant);
    }

    #[test]
    fn never_exceeds_capacity_and_drops_oldest_first() {
        let mut transcript = Transcript::default();
        for i in 0..25 {
            transcript.push(Turn::user(format!("turn {i}")));
            assert!(transcript.len() <= 10);
        }
        let texts: Vec<_> = transcript.iter().map(|t| t.text.as_str()).collect();
        let expected: Vec<_> = (15..25).map(|i| format!("turn {i}")).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn push_reports_evictions() {
        let mut transcript = Transcript::with_capacity(2);
        assert_eq!(transcript.push(Turn::user("a")), 0);
        assert_eq!(transcript.push(Turn::assistant("b")), 0);
        assert_eq!(transcript.push(Turn::error("c")), 1);
        assert_eq!(transcript.iter().next().unwrap().text, "b");
        assert_eq!(transcript.last().unwrap().speaker, Speaker::Error);
    }

    #[test]
    fn zero_capacity_keeps_newest() {
        let mut transcript = Transcript::with_capacity(0);
        transcript.push(Turn::user("a"));
        transcript.push(Turn::user("b"));
        assert_eq!(transcript.capacity(), 1);
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last().unwrap().text, "b");
    }

    #[test]
    fn clear_empties() {
        let mut transcript = Transcript::default();
        transcript.push(Turn::user("a"));
        transcript.clear();
        assert!(transcript.is_empty());
        assert_eq!(transcript.capacity(), 10);
    }
}
