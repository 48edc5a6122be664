//! Configuration model.
//!
//! Loaded from `config.toml` by `tutor-infrastructure`. Every field has a
//! default, so an empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::backend::Difficulty;
use crate::session::{DEFAULT_WELCOME, StaleReplyPolicy};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SUBJECT: &str = "Programming";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_SPEECH_OUTPUT: &str = "espeak";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub speech: SpeechConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL the `/api/...` paths are appended to.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Speak assistant replies aloud.
    pub sound_enabled: bool,
    pub stale_replies: StaleReplyPolicy,
    pub question_subject: String,
    pub question_difficulty: Difficulty,
    /// Placeholder shown until the first message.
    pub welcome: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sound_enabled: false,
            stale_replies: StaleReplyPolicy::default(),
            question_subject: DEFAULT_SUBJECT.to_string(),
            question_difficulty: Difficulty::default(),
            welcome: DEFAULT_WELCOME.to_string(),
        }
    }
}

/// External programs used for speech.
///
/// Arguments may contain `{text}`, `{rate}`, `{pitch}`, `{volume}` and
/// `{lang}` placeholders.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    /// Text-to-speech program; an empty string disables speech output.
    pub output_command: Option<String>,
    pub output_args: Vec<String>,
    /// Speech-to-text program; voice input is unavailable when unset.
    /// It must print the transcript on stdout and exit.
    pub input_command: Option<String>,
    pub input_args: Vec<String>,
    pub language: String,
}

impl SpeechConfig {
    /// The TTS program to run, if speech output is enabled.
    pub fn output_program(&self) -> Option<&str> {
        self.output_command
            .as_deref()
            .map(str::trim)
            .filter(|program| !program.is_empty())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            output_command: Some(DEFAULT_SPEECH_OUTPUT.to_string()),
            output_args: Vec::new(),
            input_command: None,
            input_args: Vec::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speech_output_is_espeak() {
        let config = SpeechConfig::default();
        assert_eq!(config.output_program(), Some("espeak"));
        assert!(config.input_command.is_none());
    }

    #[test]
    fn test_blank_output_command_disables_speech() {
        for command in [None, Some(String::new()), Some("  ".to_string())] {
            let config = SpeechConfig {
                output_command: command,
                ..SpeechConfig::default()
            };
            assert_eq!(config.output_program(), None);
        }
    }
}
