//! The chat side-session.
//!
//! A [`ConversationSession`] holds a capped [`Transcript`] of turns and sends
//! each line the player submits to a chat-completions endpoint, recording the
//! reply (or the failure) as the next turn.
//!
//! # Architecture
//!
//! - [`config`]: endpoint, credential and request parameters
//! - [`transcript`]: turns, speakers and the capped transcript
//! - [`session`]: the submit cycle and session statistics

mod config;
mod session;
mod transcript;

pub use config::{ChatConfig, DEFAULT_GREETING, DEFAULT_HISTORY_LIMIT, DEFAULT_SYSTEM_PROMPT};
pub use session::{
    ChatState, ConversationSession, FAILED_PREFIX, REJECTED_PREFIX, SessionStats,
    describe_failure,
};
pub use transcript::{Speaker, Transcript, Turn, outbound_role};
