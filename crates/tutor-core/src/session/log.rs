//! Append-only message log with a one-shot welcome placeholder.

use super::message::ChatMessage;

/// Default placeholder shown before anything has been said.
pub const DEFAULT_WELCOME: &str =
    "Welcome! I'm your virtual teacher. Pick a mode or ask me anything to get started.";

/// Result of appending to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// True when this append removed the welcome placeholder. The renderer
    /// must clear its surface before drawing the new message.
    pub cleared_placeholder: bool,
}

/// Ordered, in-memory sequence of chat messages.
///
/// Messages are never removed, except for the placeholder welcome entry which
/// is dropped the first time a real message is appended.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    placeholder: Option<String>,
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    /// Creates an empty log without a placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log showing `welcome` until the first append.
    pub fn with_placeholder(welcome: impl Into<String>) -> Self {
        Self {
            placeholder: Some(welcome.into()),
            messages: Vec::new(),
        }
    }

    /// The placeholder text, if it is still showing.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn append(&mut self, message: ChatMessage) -> AppendOutcome {
        let cleared_placeholder = self.placeholder.take().is_some();
        self.messages.push(message);
        AppendOutcome {
            cleared_placeholder,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_cleared_once() {
        let mut log = MessageLog::with_placeholder(DEFAULT_WELCOME);
        assert_eq!(log.placeholder(), Some(DEFAULT_WELCOME));

        let first = log.append(ChatMessage::system("Normal Chat Mode: Ask me anything!"));
        assert!(first.cleared_placeholder);
        assert!(log.placeholder().is_none());

        let second = log.append(ChatMessage::user("Hello"));
        assert!(!second.cleared_placeholder);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = MessageLog::new();
        assert!(log.is_empty());

        log.append(ChatMessage::user("first"));
        log.append(ChatMessage::assistant("second"));
        log.append(ChatMessage::user("third"));

        let texts: Vec<&str> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(log.last().map(|m| m.text.as_str()), Some("third"));
    }

    #[test]
    fn test_log_without_placeholder_never_clears() {
        let mut log = MessageLog::new();
        assert!(!log.append(ChatMessage::user("hi")).cleared_placeholder);
    }
}
