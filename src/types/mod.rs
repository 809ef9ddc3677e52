// Public modules
pub mod chat_completion_request;
pub mod chat_completion_response;
pub mod chat_message;
pub mod model;

// Re-exports
pub use chat_completion_request::{ChatCompletionRequest, DEFAULT_TEMPERATURE, DEFAULT_TOP_P};
pub use chat_completion_response::{ChatCompletionResponse, Choice, ChoiceMessage};
pub use chat_message::{ChatMessage, ChatRole};
pub use model::{KnownModel, Model};
