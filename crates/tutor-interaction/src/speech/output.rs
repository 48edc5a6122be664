//! Text-to-speech through an external program (espeak, say, ...).

use std::process::Stdio;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::process::{Child, Command};
use tokio::runtime::Handle;
use tutor_core::error::{Result, TutorError};
use tutor_core::speech::{SpeechOutput, Utterance};

use super::command::SpeechCommand;

/// Speaks by spawning one process per utterance.
///
/// The text is passed through the `{text}` placeholder, or appended as the
/// last argument when no argument uses it. `cancel` kills the running
/// process; the runtime reaps it, so no call here blocks on the child.
pub struct CommandSpeechOutput {
    command: SpeechCommand,
    language: String,
    current: Mutex<Option<Child>>,
}

impl CommandSpeechOutput {
    pub fn new(command: SpeechCommand, language: impl Into<String>) -> Self {
        Self {
            command,
            language: language.into(),
            current: Mutex::new(None),
        }
    }

    fn current(&self) -> MutexGuard<'_, Option<Child>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn arguments(&self, utterance: &Utterance) -> Vec<String> {
        let rate = utterance.rate.to_string();
        let pitch = utterance.pitch.to_string();
        let volume = utterance.volume.to_string();
        let mut args = self.command.expand_args(&[
            ("text", utterance.text.as_str()),
            ("rate", rate.as_str()),
            ("pitch", pitch.as_str()),
            ("volume", volume.as_str()),
            ("lang", self.language.as_str()),
        ]);
        if !self.command.uses("text") {
            args.push(utterance.text.clone());
        }
        args
    }
}

impl SpeechOutput for CommandSpeechOutput {
    fn is_speaking(&self) -> bool {
        let mut current = self.current();
        match current.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(_) => {
                *current = None;
                false
            }
            None => false,
        }
    }

    fn speak(&self, utterance: &Utterance) -> Result<()> {
        Handle::try_current()
            .map_err(|e| TutorError::speech(format!("Speech output needs a tokio runtime: {e}")))?;

        let args = self.arguments(utterance);
        tracing::debug!("Speaking {} chars with {}", utterance.text.len(), self.command.program);

        let child = Command::new(&self.command.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                TutorError::speech(format!("Failed to spawn {}: {}", self.command.program, e))
            })?;

        // Uncancelled leftovers are killed, never overlapped.
        if let Some(mut previous) = self.current().replace(child) {
            let _ = previous.start_kill();
        }
        Ok(())
    }

    fn cancel(&self) {
        if let Some(mut child) = self.current().take() {
            if let Err(e) = child.start_kill() {
                tracing::debug!("Speech process already finished: {}", e);
            }
        }
    }
}
