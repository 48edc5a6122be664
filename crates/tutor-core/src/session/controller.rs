//! Chat session controller.
//!
//! Owns the session state and turns user actions (send, switch mode, voice,
//! practice question) into rendering calls and backend requests. Every
//! failure is degraded into something the student can see; nothing is
//! retried and no error escapes an action.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::log::MessageLog;
use super::message::ChatMessage;
use super::mode::ChatMode;
use super::state::{SessionState, StaleReplyPolicy};
use crate::backend::{ChatRequest, PracticeQuestion, QuestionKind, QuestionRequest, TutorBackend};
use crate::config::SessionConfig;
use crate::error::Result;
use crate::render::ChatRenderer;
use crate::speech::{
    NoopSpeechOutput, SpeechEvent, SpeechEventReceiver, SpeechInput, SpeechOutput, Utterance,
};

pub const CHAT_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";
pub const CONNECTION_ERROR_MESSAGE: &str = "Sorry, I could not connect. Please try again.";
pub const VOICE_UNSUPPORTED_MESSAGE: &str = "Voice recognition is not supported in this environment.";
pub const QUESTION_UNAVAILABLE: &str = "Question not available";

pub const STATUS_THINKING: &str = "Thinking...";
pub const STATUS_READY: &str = "Ready to help!";
pub const STATUS_ERROR: &str = "Error occurred";
pub const STATUS_CONNECTION_ERROR: &str = "Connection error";
pub const STATUS_LISTENING: &str = "Listening...";

/// What became of a `send_message` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; nothing was rendered or sent.
    Ignored,
    /// The assistant replied with this text.
    Replied(String),
    /// The backend answered with `success: false`.
    Rejected,
    /// No usable reply was received.
    ConnectionFailed,
    /// A newer message was sent meanwhile and the reply was dropped.
    Stale,
}

/// What became of a `get_practice_question` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionOutcome {
    /// The question was rendered with this text.
    Rendered(String),
    Rejected,
    ConnectionFailed,
}

/// Controller for a single chat session.
///
/// Shared behind an `Arc` by the front-end so that several actions can be in
/// flight at once. The state lock is only held for synchronous work and
/// never across a backend call.
pub struct ChatController {
    state: Mutex<SessionState>,
    settings: SessionConfig,
    backend: Arc<dyn TutorBackend>,
    renderer: Arc<dyn ChatRenderer>,
    speech_input: Option<Arc<dyn SpeechInput>>,
    speech_output: Arc<dyn SpeechOutput>,
}

impl ChatController {
    /// Creates a controller without voice input and with silent speech output.
    pub fn new(
        backend: Arc<dyn TutorBackend>,
        renderer: Arc<dyn ChatRenderer>,
        settings: SessionConfig,
    ) -> Self {
        let log = MessageLog::with_placeholder(settings.welcome.clone());
        Self {
            state: Mutex::new(SessionState::new(log, settings.sound_enabled)),
            settings,
            backend,
            renderer,
            speech_input: None,
            speech_output: Arc::new(NoopSpeechOutput),
        }
    }

    /// Enables voice input through the given recognizer.
    pub fn with_speech_input(mut self, input: Arc<dyn SpeechInput>) -> Self {
        self.speech_input = Some(input);
        self
    }

    pub fn with_speech_output(mut self, output: Arc<dyn SpeechOutput>) -> Self {
        self.speech_output = output;
        self
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn mode(&self) -> ChatMode {
        self.state().mode
    }

    pub fn is_listening(&self) -> bool {
        self.state().listening
    }

    pub fn sound_enabled(&self) -> bool {
        self.state().sound_enabled
    }

    pub fn has_voice_input(&self) -> bool {
        self.speech_input.is_some()
    }

    /// Snapshot of the messages appended so far.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state().log.messages().to_vec()
    }

    // ============================================================================
    // Rendering helpers
    // ============================================================================

    /// Draws the initial view: mode indicator plus the welcome placeholder.
    pub fn show_welcome(&self) {
        let state = self.state();
        self.renderer.set_mode_indicator(state.mode);
        self.renderer.set_listening_indicator(state.listening);
        if let Some(welcome) = state.log.placeholder() {
            self.renderer.render_message(&ChatMessage::system(welcome));
        }
    }

    /// Appends to the log and renders, in log order.
    fn append(&self, message: ChatMessage) {
        let mut state = self.state();
        let outcome = state.log.append(message.clone());
        if outcome.cleared_placeholder {
            self.renderer.clear_messages();
        }
        self.renderer.render_message(&message);
    }

    // ============================================================================
    // User actions
    // ============================================================================

    pub fn switch_mode(&self, mode: ChatMode) {
        self.state().mode = mode;
        tracing::debug!(%mode, "Switched chat mode");

        self.renderer.set_mode_indicator(mode);
        self.append(ChatMessage::system(mode.description()));
        self.renderer.set_status(&format!("Switched to {mode} mode"));
    }

    /// Switches to a mode given by name.
    ///
    /// Unknown names leave the session untouched and render nothing.
    pub fn switch_mode_named(&self, name: &str) -> Result<ChatMode> {
        match name.parse::<ChatMode>() {
            Ok(mode) => {
                self.switch_mode(mode);
                Ok(mode)
            }
            Err(err) => {
                tracing::warn!("Ignoring mode switch: {}", err);
                Err(err)
            }
        }
    }

    pub fn set_sound_enabled(&self, enabled: bool) {
        self.state().sound_enabled = enabled;
    }

    /// Sends the trimmed input to the chat endpoint.
    ///
    /// The user message is rendered before the request is issued. Replies
    /// are rendered in arrival order unless the session discards stale ones.
    pub async fn send_message(&self, input: &str) -> SendOutcome {
        let message = input.trim();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }

        self.append(ChatMessage::user(message));
        self.renderer.set_status(STATUS_THINKING);

        let (token, mode) = {
            let mut state = self.state();
            (state.next_request_token(), state.mode)
        };
        let request = ChatRequest {
            message: message.to_string(),
            mode,
        };

        tracing::debug!(token, %mode, "Sending chat request");
        let result = self.backend.chat(&request).await;

        if self.settings.stale_replies == StaleReplyPolicy::Discard && !self.state().is_latest(token) {
            tracing::debug!(token, "Discarding reply to superseded chat request");
            return SendOutcome::Stale;
        }

        match result {
            Ok(reply) if reply.success => {
                let text = reply.response.unwrap_or_default();
                self.append(ChatMessage::assistant(text.as_str()));
                self.renderer.set_status(STATUS_READY);

                if self.sound_enabled() {
                    self.speak(&text);
                }
                SendOutcome::Replied(text)
            }
            Ok(_) => {
                tracing::warn!(token, "Chat backend reported failure");
                self.append(ChatMessage::assistant(CHAT_ERROR_MESSAGE));
                self.renderer.set_status(STATUS_ERROR);
                SendOutcome::Rejected
            }
            Err(err) => {
                tracing::error!(token, "Chat request failed: {}", err);
                self.append(ChatMessage::assistant(CONNECTION_ERROR_MESSAGE));
                self.renderer.set_status(STATUS_CONNECTION_ERROR);
                SendOutcome::ConnectionFailed
            }
        }
    }

    /// Starts or stops voice recognition and returns the new listening flag.
    ///
    /// Without a recognizer this only raises an alert.
    pub fn toggle_voice(&self) -> bool {
        let Some(input) = self.speech_input.as_ref() else {
            self.renderer.alert(VOICE_UNSUPPORTED_MESSAGE);
            return self.is_listening();
        };

        let listening = if self.is_listening() {
            if let Err(err) = input.stop() {
                tracing::warn!("Failed to stop speech recognition: {}", err);
            }
            false
        } else {
            match input.start() {
                Ok(()) => {
                    self.renderer.set_status(STATUS_LISTENING);
                    true
                }
                Err(err) => {
                    tracing::warn!("Failed to start speech recognition: {}", err);
                    self.renderer
                        .alert(&format!("Could not start voice recognition: {err}"));
                    false
                }
            }
        };

        self.state().listening = listening;
        self.renderer.set_listening_indicator(listening);
        listening
    }

    /// Recognizer produced a transcript: send it as if typed.
    pub async fn on_speech_result(&self, transcript: &str) -> SendOutcome {
        self.send_message(transcript).await
    }

    /// Recognizer finished.
    pub fn on_speech_end(&self) {
        self.state().listening = false;
        self.renderer.set_listening_indicator(false);
    }

    /// Feeds recognizer events into the session until the channel closes.
    ///
    /// Each transcript is sent on its own task, so an `End` queued behind it
    /// resets the listening flag without waiting for the reply.
    pub async fn run_speech_events(self: Arc<Self>, mut events: SpeechEventReceiver) {
        while let Some(event) = events.recv().await {
            match event {
                SpeechEvent::Result(transcript) => {
                    let controller = Arc::clone(&self);
                    tokio::spawn(async move {
                        controller.on_speech_result(&transcript).await;
                    });
                }
                SpeechEvent::End => self.on_speech_end(),
            }
        }
        tracing::debug!("Speech event channel closed");
    }

    /// Requests a practice question and renders it.
    ///
    /// Failures are logged only; the chat shows nothing.
    pub async fn get_practice_question(&self, kind: QuestionKind) -> QuestionOutcome {
        let request = QuestionRequest {
            subject: self.settings.question_subject.clone(),
            kind,
            difficulty: self.settings.question_difficulty,
        };

        tracing::debug!(%kind, subject = %request.subject, "Requesting practice question");
        match self.backend.get_question(&request).await {
            Ok(reply) if reply.success => {
                let question = reply.question.unwrap_or_default();
                let text = format_question(kind, &question);
                self.append(ChatMessage::assistant(text.as_str()));
                QuestionOutcome::Rendered(text)
            }
            Ok(_) => {
                tracing::warn!(%kind, "Question backend reported failure");
                QuestionOutcome::Rejected
            }
            Err(err) => {
                tracing::error!(%kind, "Error getting question: {}", err);
                QuestionOutcome::ConnectionFailed
            }
        }
    }

    /// Speaks `text`, interrupting anything currently being spoken.
    pub fn speak(&self, text: &str) {
        if self.speech_output.is_speaking() {
            self.speech_output.cancel();
        }
        if let Err(err) = self.speech_output.speak(&Utterance::new(text)) {
            tracing::warn!("Speech synthesis failed: {}", err);
        }
    }
}

/// Text shown for a practice question.
///
/// Multiple-choice questions get their options appended, one per line.
pub fn format_question(kind: QuestionKind, question: &PracticeQuestion) -> String {
    let mut text = question
        .question
        .clone()
        .unwrap_or_else(|| QUESTION_UNAVAILABLE.to_string());

    if kind == QuestionKind::Mcq {
        if let Some(options) = &question.options {
            text.push_str("\n\nOptions:\n");
            text.push_str(&options.join("\n"));
        }
    }
    text
}
