// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod commands;
pub mod config;
pub mod error;
pub mod observability;
pub mod render;
pub mod riddle;
pub mod types;

// Re-exports
pub use client::{ChatClient, CompletionBackend};
pub use client_logger::{ClientLogger, StderrLogger};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer};
pub use riddle::{Riddle, RiddleBank, RiddleSession, Verdict};
pub use types::*;
