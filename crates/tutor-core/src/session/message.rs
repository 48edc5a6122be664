//! Chat message types.
//!
//! This module contains types for representing messages shown in the chat,
//! including their origin and the time they were rendered.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who a message in the chat came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    /// Message typed (or spoken) by the student.
    User,
    /// Centered status line, not a chat bubble.
    System,
    /// Reply or question from the virtual teacher.
    Assistant,
}

/// A single message in the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The text of the message.
    pub text: String,
    /// Who the message came from.
    pub origin: MessageOrigin,
    /// When the message was appended (and therefore rendered).
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// Creates a message stamped with the current local time.
    pub fn new(origin: MessageOrigin, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin,
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageOrigin::User, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageOrigin::System, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageOrigin::Assistant, text)
    }

    /// Display time in the `hh:mm AM/PM` form used under chat bubbles.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%I:%M %p").to_string()
    }

    pub fn is_user(&self) -> bool {
        self.origin == MessageOrigin::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_constructors_set_origin() {
        assert_eq!(ChatMessage::user("hi").origin, MessageOrigin::User);
        assert_eq!(ChatMessage::system("hi").origin, MessageOrigin::System);
        assert_eq!(ChatMessage::assistant("hi").origin, MessageOrigin::Assistant);
        assert!(ChatMessage::user("hi").is_user());
    }

    #[test]
    fn test_display_time_format() {
        let mut message = ChatMessage::assistant("Hi!");
        message.timestamp = Local.with_ymd_and_hms(2024, 5, 1, 14, 7, 0).unwrap();
        assert_eq!(message.display_time(), "02:07 PM");
    }
}
