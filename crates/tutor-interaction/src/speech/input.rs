//! Speech-to-text through an external program.
//!
//! The program records a single utterance and prints the final transcript on
//! stdout. The first non-empty line becomes a `SpeechEvent::Result`; an
//! `SpeechEvent::End` follows once the program exits or is stopped.

use std::process::Stdio;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{ChildStdout, Command};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tutor_core::error::{Result, TutorError};
use tutor_core::speech::{SpeechEvent, SpeechEventSender, SpeechInput};

use super::command::SpeechCommand;

/// Recognizer backed by a command such as a whisper or vosk wrapper script.
pub struct CommandSpeechInput {
    command: SpeechCommand,
    language: String,
    events: SpeechEventSender,
    stop: Mutex<Option<oneshot::Sender<()>>>,
}

impl CommandSpeechInput {
    pub fn new(command: SpeechCommand, language: impl Into<String>, events: SpeechEventSender) -> Self {
        Self {
            command,
            language: language.into(),
            events,
            stop: Mutex::new(None),
        }
    }

    fn stop_handle(&self) -> MutexGuard<'_, Option<oneshot::Sender<()>>> {
        self.stop.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SpeechInput for CommandSpeechInput {
    fn start(&self) -> Result<()> {
        let runtime = Handle::try_current()
            .map_err(|e| TutorError::speech(format!("Speech input needs a tokio runtime: {e}")))?;

        let args = self.command.expand_args(&[("lang", self.language.as_str())]);
        let mut child = Command::new(&self.command.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                TutorError::speech(format!("Failed to spawn {}: {}", self.command.program, e))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TutorError::speech("Speech input produced no stdout handle"))?;

        let (stop_tx, stop_rx) = oneshot::channel();
        if let Some(previous) = self.stop_handle().replace(stop_tx) {
            let _ = previous.send(());
        }

        tracing::debug!("Listening with {}", self.command.program);
        let events = self.events.clone();
        runtime.spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            tokio::select! {
                transcript = first_transcript(&mut lines) => {
                    if let Some(transcript) = transcript {
                        let _ = events.send(SpeechEvent::Result(transcript));
                    }
                    let _ = child.wait().await;
                }
                _ = stop_rx => {
                    if let Err(e) = child.kill().await {
                        tracing::debug!("Recognizer already exited: {}", e);
                    }
                }
            }
            let _ = events.send(SpeechEvent::End);
        });

        Ok(())
    }

    fn stop(&self) -> Result<()> {
        if let Some(stop) = self.stop_handle().take() {
            // The recognizer may have finished on its own already.
            let _ = stop.send(());
        }
        Ok(())
    }
}

async fn first_transcript(lines: &mut Lines<BufReader<ChildStdout>>) -> Option<String> {
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if !line.trim().is_empty() => return Some(line.trim().to_string()),
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read transcript: {}", e);
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::speech::speech_channel;

    fn input(program: &str, args: Vec<&str>) -> (CommandSpeechInput, tutor_core::speech::SpeechEventReceiver) {
        let (tx, rx) = speech_channel();
        let args = args.into_iter().map(String::from).collect();
        (CommandSpeechInput::new(SpeechCommand::new(program, args), "en-US", tx), rx)
    }

    #[test]
    fn test_start_without_runtime_fails() {
        let (input, _rx) = input("echo", vec!["hello"]);
        let err = input.start().unwrap_err();
        assert!(matches!(err, TutorError::Speech(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcript_then_end() {
        let (input, mut rx) = input("printf", vec!["\\n  \\nexplain closures\\n"]);
        input.start().unwrap();

        assert_eq!(
            rx.recv().await,
            Some(SpeechEvent::Result("explain closures".to_string()))
        );
        assert_eq!(rx.recv().await, Some(SpeechEvent::End));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stop_ends_without_result() {
        let (input, mut rx) = input("sleep", vec!["5"]);
        input.start().unwrap();
        input.stop().unwrap();

        assert_eq!(rx.recv().await, Some(SpeechEvent::End));
    }

    #[tokio::test]
    async fn test_missing_program_is_speech_error() {
        let (input, _rx) = input("definitely-not-an-stt-program", vec![]);
        assert!(matches!(input.start(), Err(TutorError::Speech(_))));
    }
}
