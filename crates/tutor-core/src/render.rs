//! Rendering surface for the chat.
//!
//! The controller never touches a concrete UI. Front-ends (terminal, web,
//! tests) implement [`ChatRenderer`] and decide how each call looks.

use crate::session::{ChatMessage, ChatMode};

/// The surface the controller draws on.
///
/// All calls are fire-and-forget; a renderer has no way to report failure
/// back to the controller.
pub trait ChatRenderer: Send + Sync {
    /// Removes everything currently shown in the message list.
    fn clear_messages(&self);

    /// Appends one message to the message list.
    fn render_message(&self, message: &ChatMessage);

    /// Replaces the status line under the avatar.
    fn set_status(&self, status: &str);

    /// Updates the header style for the active mode.
    fn set_mode_indicator(&self, mode: ChatMode);

    /// Shows or hides the "listening" state of the voice button.
    fn set_listening_indicator(&self, listening: bool);

    /// Blocking, user-visible notice (used when a capability is missing).
    fn alert(&self, message: &str);
}
