//! Ephemeral session state owned by the controller.

use serde::{Deserialize, Serialize};

use super::log::MessageLog;
use super::mode::ChatMode;

/// What to do with a chat reply that arrives after a newer message was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleReplyPolicy {
    /// Append every reply in arrival order (replies may interleave).
    #[default]
    Append,
    /// Drop replies whose request token is no longer the latest.
    Discard,
}

/// Mutable state of the single active chat session.
///
/// Nothing here is persisted; a new controller starts from scratch.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: ChatMode,
    pub listening: bool,
    pub sound_enabled: bool,
    pub log: MessageLog,
    /// Token handed to the most recent chat request.
    pub latest_request: u64,
}

impl SessionState {
    pub fn new(log: MessageLog, sound_enabled: bool) -> Self {
        Self {
            mode: ChatMode::default(),
            listening: false,
            sound_enabled,
            log,
            latest_request: 0,
        }
    }

    /// Issues the next request token and marks it as the latest.
    pub fn next_request_token(&mut self) -> u64 {
        self.latest_request += 1;
        self.latest_request
    }

    pub fn is_latest(&self, token: u64) -> bool {
        self.latest_request == token
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(MessageLog::new(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tokens_increase() {
        let mut state = SessionState::default();
        let first = state.next_request_token();
        let second = state.next_request_token();

        assert!(second > first);
        assert!(state.is_latest(second));
        assert!(!state.is_latest(first));
    }

    #[test]
    fn test_default_state() {
        let state = SessionState::default();
        assert_eq!(state.mode, ChatMode::Normal);
        assert!(!state.listening);
        assert!(!state.sound_enabled);
    }
}
