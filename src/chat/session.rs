//! Core chat session management.
//!
//! This module provides the [`ConversationSession`] which owns a transcript
//! and turns each submitted line into exactly one request to the completion
//! endpoint.

use crate::chat::config::ChatConfig;
use crate::chat::transcript::{Speaker, Transcript, Turn, outbound_role};
use crate::client::{ChatClient, CompletionBackend};
use crate::error::{Error, Result};
use crate::observability::{CHAT_ERROR_TURNS, CHAT_EVICTIONS, CHAT_SUBMITS};
use crate::render::Renderer;
use crate::types::{ChatCompletionRequest, ChatMessage, Model};

/// Prefix of the error turn recorded when the endpoint rejects a request.
pub const REJECTED_PREFIX: &str = "خطأ في الاتصال: ";

/// Prefix of the error turn recorded when the exchange itself fails.
pub const FAILED_PREFIX: &str = "حدث خطأ: ";

/// Whether a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    /// Ready for the next submission.
    #[default]
    Idle,
    /// A request has been sent and its reply is pending.
    AwaitingReply,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// Turns currently held in the transcript.
    pub turn_count: usize,
    /// Maximum turns held.
    pub history_limit: usize,
    /// Total number of requests sent.
    pub total_requests: u64,
    /// Requests that ended in an error turn.
    pub failed_requests: u64,
}

/// A chat session that owns the transcript and talks to the endpoint.
///
/// [`submit`](Self::submit) takes `&mut self`, so a second submission cannot
/// start until the first has recorded its outcome.
pub struct ConversationSession<B: CompletionBackend> {
    backend: B,
    config: ChatConfig,
    transcript: Transcript,
    state: ChatState,
    request_count: u64,
    failure_count: u64,
}

impl ConversationSession<ChatClient> {
    /// Creates a session talking to the endpoint named in `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or no credential is available.
    pub fn connect(config: ChatConfig) -> Result<Self> {
        let client = config.build_client()?;
        Ok(Self::new(client, config))
    }
}

impl<B: CompletionBackend> ConversationSession<B> {
    /// Creates a session with an empty transcript.
    pub fn new(backend: B, config: ChatConfig) -> Self {
        let transcript = Transcript::with_capacity(config.history_limit);
        Self {
            backend,
            config,
            transcript,
            state: ChatState::Idle,
            request_count: 0,
            failure_count: 0,
        }
    }

    /// Records and renders the configured greeting, if any.
    ///
    /// Does nothing once the transcript holds a turn.
    pub fn open(&mut self, renderer: &mut dyn Renderer) {
        if !self.transcript.is_empty() {
            return;
        }
        if let Some(greeting) = self.config.greeting.clone() {
            self.append(Turn::assistant(greeting), renderer);
        }
    }

    /// Sends a line of player text and records the outcome.
    ///
    /// Returns false, recording nothing, when `user_text` is blank.
    /// Otherwise the player turn is appended and rendered before the request
    /// goes out, and exactly one further turn is appended afterwards: the
    /// reply, or an error turn describing why there is none.  Failures never
    /// escape this method.
    pub async fn submit(&mut self, user_text: &str, renderer: &mut dyn Renderer) -> bool {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return false;
        }
        CHAT_SUBMITS.click();

        self.append(Turn::user(user_text), renderer);
        let request = self.build_request();

        self.set_state(ChatState::AwaitingReply, renderer);
        let outcome = self.backend.complete(&request).await;
        self.set_state(ChatState::Idle, renderer);
        self.request_count += 1;

        let reply = outcome.and_then(|response| response.reply_text().map(str::to_string));
        let turn = match reply {
            Ok(text) => Turn::assistant(text),
            Err(err) => {
                self.failure_count += 1;
                CHAT_ERROR_TURNS.click();
                Turn::error(describe_failure(&err))
            }
        };
        self.append(turn, renderer);
        true
    }

    /// Builds the request for the newest transcript turn.
    ///
    /// The system instruction comes first, then every earlier turn in the
    /// transcript, then the newest (player) turn.
    fn build_request(&self) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        messages.push(ChatMessage::system(self.config.system_prompt.clone()));
        messages.extend(
            self.transcript
                .iter()
                .map(|turn| ChatMessage::new(outbound_role(turn.speaker), turn.text.clone())),
        );
        ChatCompletionRequest::new(self.config.model.clone(), messages)
            .with_temperature(self.config.temperature)
            .with_top_p(self.config.top_p)
    }

    fn set_state(&mut self, state: ChatState, renderer: &mut dyn Renderer) {
        self.state = state;
        renderer.state_changed(state);
    }

    fn append(&mut self, turn: Turn, renderer: &mut dyn Renderer) {
        renderer.print_turn(&turn);
        let evicted = self.transcript.push(turn);
        if evicted > 0 {
            CHAT_EVICTIONS.count(evicted as u64);
        }
    }

    /// Clears the conversation history.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// The current transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether a request is in flight.
    ///
    /// `submit` holds `&mut self` while awaiting, so this reads `Idle` from
    /// outside; renderers see every transition through
    /// [`Renderer::state_changed`].
    pub fn state(&self) -> ChatState {
        self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// The backend requests go through.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.config.model.clone(),
            turn_count: self.transcript.len(),
            history_limit: self.transcript.capacity(),
            total_requests: self.request_count,
            failed_requests: self.failure_count,
        }
    }

    /// Number of error turns currently in the transcript.
    pub fn error_turns(&self) -> usize {
        self.transcript
            .iter()
            .filter(|turn| turn.speaker == Speaker::Error)
            .count()
    }
}

/// Text of the error turn recorded for a failed exchange.
pub fn describe_failure(err: &Error) -> String {
    match err {
        Error::Api { body, .. } => format!("{REJECTED_PREFIX}{body}"),
        other => format!("{FAILED_PREFIX}{other}"),
    }
}
