//! Core domain of the Tutor chat client.
//!
//! The chat session controller and the seams it talks through: the backend
//! contract, the rendering surface and the speech capabilities.

pub mod backend;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod speech;

// Re-export common types
pub use error::{Result, TutorError};
pub use render::ChatRenderer;
pub use session::{ChatController, ChatMessage, ChatMode, MessageOrigin};
