//! Conversation mode of the active session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TutorError;

/// One of the three fixed conversation styles.
///
/// The mode only changes the request payload and the copy shown to the
/// student; it carries no behaviour of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Free-form questions (default).
    #[default]
    Normal,
    /// Practice questions and skill checks.
    Practice,
    /// Goals, motivation and career guidance.
    Counseling,
}

impl ChatMode {
    /// All modes, in display order.
    pub const ALL: [ChatMode; 3] = [ChatMode::Normal, ChatMode::Practice, ChatMode::Counseling];

    /// Wire name, as sent in the `mode` field of a chat request.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Normal => "normal",
            ChatMode::Practice => "practice",
            ChatMode::Counseling => "counseling",
        }
    }

    /// Fixed system-message text announced when the mode is selected.
    pub fn description(&self) -> &'static str {
        match self {
            ChatMode::Normal => "Normal Chat Mode: Ask me anything!",
            ChatMode::Practice => "Practice Mode: Get questions and test your skills!",
            ChatMode::Counseling => "Counseling Mode: Let's talk about your goals and challenges.",
        }
    }

    /// Name of the visual indicator (header style) for this mode.
    pub fn indicator_class(&self) -> &'static str {
        match self {
            ChatMode::Normal => "mode-normal",
            ChatMode::Practice => "mode-practice",
            ChatMode::Counseling => "mode-counseling",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatMode {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ChatMode::Normal),
            "practice" => Ok(ChatMode::Practice),
            "counseling" => Ok(ChatMode::Counseling),
            _ => Err(TutorError::UnknownMode(s.to_string())),
        }
    }
}
