//! Logging trait for chat-completions client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows callers to
//! capture every exchange passing through the [`ChatClient`](crate::ChatClient).

use std::io::{self, Write};

use crate::error::Error;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse};

/// A trait for logging chat-completions client operations.
///
/// Each call to [`ChatClient::complete`](crate::CompletionBackend::complete)
/// reports its request and then exactly one of a response or an error.
///
/// # Example
///
/// ```rust,ignore
/// use alghaz::{ChatCompletionRequest, ChatCompletionResponse, ClientLogger, Error};
/// use std::sync::Mutex;
///
/// struct CountingLogger {
///     requests: Mutex<usize>,
/// }
///
/// impl ClientLogger for CountingLogger {
///     fn log_request(&self, _: &ChatCompletionRequest) {
///         *self.requests.lock().unwrap() += 1;
///     }
///
///     fn log_response(&self, _: &ChatCompletionResponse) {}
///
///     fn log_error(&self, _: &Error) {}
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log an outgoing request just before it is sent.
    fn log_request(&self, request: &ChatCompletionRequest);

    /// Log a successfully decoded response.
    fn log_response(&self, response: &ChatCompletionResponse);

    /// Log a failed exchange: a rejected status, transport failure or bad body.
    fn log_error(&self, error: &Error);
}

/// Writes one JSON line per event to standard error.
#[derive(Debug, Default)]
pub struct StderrLogger;

impl StderrLogger {
    fn write_line(&self, kind: &str, payload: serde_json::Value) {
        let line = serde_json::json!({ "event": kind, "payload": payload });
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }
}

impl ClientLogger for StderrLogger {
    fn log_request(&self, request: &ChatCompletionRequest) {
        match serde_json::to_value(request) {
            Ok(value) => self.write_line("request", value),
            Err(err) => self.write_line("request", err.to_string().into()),
        }
    }

    fn log_response(&self, response: &ChatCompletionResponse) {
        match serde_json::to_value(response) {
            Ok(value) => self.write_line("response", value),
            Err(err) => self.write_line("response", err.to_string().into()),
        }
    }

    fn log_error(&self, error: &Error) {
        self.write_line("error", error.to_string().into());
    }
}
