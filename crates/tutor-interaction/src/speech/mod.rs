//! Speech adapters backed by external programs.
//!
//! - `command`: program + argument templates (`SpeechCommand`)
//! - `output`: text-to-speech (`CommandSpeechOutput`)
//! - `input`: speech-to-text (`CommandSpeechInput`)

mod command;
mod input;
mod output;

use std::sync::Arc;

use tutor_core::config::SpeechConfig;
use tutor_core::speech::{NoopSpeechOutput, SpeechEventSender, SpeechInput, SpeechOutput};

pub use command::SpeechCommand;
pub use input::CommandSpeechInput;
pub use output::CommandSpeechOutput;

/// Speech output for the configured TTS program, or a silent one.
pub fn speech_output_from_config(config: &SpeechConfig) -> Arc<dyn SpeechOutput> {
    match config.output_program() {
        Some(program) => Arc::new(CommandSpeechOutput::new(
            SpeechCommand::new(program, config.output_args.clone()),
            config.language.clone(),
        )),
        None => Arc::new(NoopSpeechOutput),
    }
}

/// Recognizer for the configured STT program, if any.
pub fn speech_input_from_config(
    config: &SpeechConfig,
    events: SpeechEventSender,
) -> Option<Arc<dyn SpeechInput>> {
    let program = config.input_command.as_ref()?;
    let recognizer = CommandSpeechInput::new(
        SpeechCommand::new(program.clone(), config.input_args.clone()),
        config.language.clone(),
        events,
    );
    Some(Arc::new(recognizer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::speech::{Utterance, speech_channel};

    #[test]
    fn test_no_input_command_means_no_recognizer() {
        let (tx, _rx) = speech_channel();
        assert!(speech_input_from_config(&SpeechConfig::default(), tx).is_none());
    }

    #[test]
    fn test_input_command_builds_recognizer() {
        let (tx, _rx) = speech_channel();
        let config = SpeechConfig {
            input_command: Some("whisper-listen".to_string()),
            ..SpeechConfig::default()
        };
        assert!(speech_input_from_config(&config, tx).is_some());
    }

    #[test]
    fn test_disabled_output_is_silent() {
        let config = SpeechConfig {
            output_command: Some(String::new()),
            ..SpeechConfig::default()
        };
        let output = speech_output_from_config(&config);
        assert!(!output.is_speaking());
        assert!(output.speak(&Utterance::new("hello")).is_ok());
    }
}
