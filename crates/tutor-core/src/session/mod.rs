//! Session domain module.
//!
//! This module contains the chat session state and the controller that
//! drives it.
//!
//! # Module Structure
//!
//! - `mode`: Conversation mode (`ChatMode`)
//! - `message`: Chat message types (`MessageOrigin`, `ChatMessage`)
//! - `log`: Append-only message log (`MessageLog`)
//! - `state`: Ephemeral session state (`SessionState`, `StaleReplyPolicy`)
//! - `controller`: User actions (`ChatController`)
//!
//! # Usage
//!
//! ```ignore
//! use tutor_core::session::{ChatController, ChatMode, SendOutcome};
//! ```

mod controller;
mod log;
mod message;
mod mode;
mod state;


pub use controller::{
    CHAT_ERROR_MESSAGE, CONNECTION_ERROR_MESSAGE, ChatController, QUESTION_UNAVAILABLE,
    QuestionOutcome, STATUS_CONNECTION_ERROR, STATUS_ERROR, STATUS_LISTENING, STATUS_READY,
    STATUS_THINKING, SendOutcome, VOICE_UNSUPPORTED_MESSAGE, format_question,
};
pub use log::{AppendOutcome, DEFAULT_WELCOME, MessageLog};
pub use message::{ChatMessage, MessageOrigin};
pub use mode::ChatMode;
pub use state::{SessionState, StaleReplyPolicy};
