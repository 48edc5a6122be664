//! Speech capability interfaces.
//!
//! Speech input reports back asynchronously: implementations push
//! [`SpeechEvent`]s into a channel, and the front-end feeds them to
//! `ChatController::on_speech_result` / `ChatController::on_speech_end`.

use tokio::sync::mpsc;

use crate::error::Result;

/// Callback events from a speech recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Final transcript of a single utterance.
    Result(String),
    /// Recognition ended (after a result, a stop, or a failure).
    End,
}

pub type SpeechEventSender = mpsc::UnboundedSender<SpeechEvent>;
pub type SpeechEventReceiver = mpsc::UnboundedReceiver<SpeechEvent>;

/// Creates the channel a recognizer reports through.
pub fn speech_channel() -> (SpeechEventSender, SpeechEventReceiver) {
    mpsc::unbounded_channel()
}

/// Speech-to-text capability (single utterance, final results only).
pub trait SpeechInput: Send + Sync {
    fn start(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
}

/// A piece of text to synthesize.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    /// Creates an utterance at normal rate, pitch and volume.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Text-to-speech capability.
pub trait SpeechOutput: Send + Sync {
    fn is_speaking(&self) -> bool;
    fn speak(&self, utterance: &Utterance) -> Result<()>;
    fn cancel(&self);
}

/// Speech output for environments without a synthesizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSpeechOutput;

impl SpeechOutput for NoopSpeechOutput {
    fn is_speaking(&self) -> bool {
        false
    }

    fn speak(&self, utterance: &Utterance) -> Result<()> {
        tracing::trace!("Speech output disabled, dropping {} chars", utterance.text.len());
        Ok(())
    }

    fn cancel(&self) {}
}
