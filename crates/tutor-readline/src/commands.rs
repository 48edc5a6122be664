//! Parsing of REPL input lines.

use tutor_core::backend::QuestionKind;

/// Slash commands offered for completion, in help order.
pub const SLASH_COMMANDS: [&str; 6] = ["/mode", "/question", "/voice", "/sound", "/speak", "/help"];

pub const HELP_TEXT: &str = "\
Type a message and press Enter to chat.
  /mode <normal|practice|counseling>   switch conversation mode
  /question [coding|mcq|subjective]    get a practice question (default: coding)
  /voice                               start or stop voice input
  /sound [on|off]                      speak replies aloud (no argument toggles)
  /speak <text>                        read text aloud
  /help                                show this help
  quit | exit                          leave";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Whitespace only.
    Empty,
    /// Plain text to send to the tutor.
    Send(String),
    /// Mode name as typed; validated by the controller.
    Mode(String),
    Question(QuestionKind),
    Voice,
    /// `None` toggles.
    Sound(Option<bool>),
    Speak(String),
    Help,
    Quit,
    /// Malformed command, with a hint for the user.
    Invalid(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return ReplCommand::Quit;
    }
    if !trimmed.starts_with('/') {
        return ReplCommand::Send(trimmed.to_string());
    }

    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (trimmed, ""),
    };

    match command {
        "/mode" if arg.is_empty() => {
            ReplCommand::Invalid("Usage: /mode <normal|practice|counseling>".to_string())
        }
        "/mode" => ReplCommand::Mode(arg.to_string()),
        "/question" if arg.is_empty() => ReplCommand::Question(QuestionKind::default()),
        "/question" => match arg.parse::<QuestionKind>() {
            Ok(kind) => ReplCommand::Question(kind),
            Err(err) => ReplCommand::Invalid(format!("{err}. Use coding, mcq or subjective.")),
        },
        "/voice" => ReplCommand::Voice,
        "/sound" => match arg.to_ascii_lowercase().as_str() {
            "" => ReplCommand::Sound(None),
            "on" => ReplCommand::Sound(Some(true)),
            "off" => ReplCommand::Sound(Some(false)),
            _ => ReplCommand::Invalid("Usage: /sound [on|off]".to_string()),
        },
        "/speak" if arg.is_empty() => ReplCommand::Invalid("Usage: /speak <text>".to_string()),
        "/speak" => ReplCommand::Speak(arg.to_string()),
        "/help" => ReplCommand::Help,
        other => ReplCommand::Invalid(format!("Unknown command {other}. Type /help for a list.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_sent_trimmed() {
        assert_eq!(parse_line("  Hello  "), ReplCommand::Send("Hello".to_string()));
        assert_eq!(parse_line("   "), ReplCommand::Empty);
        assert_eq!(parse_line("exit"), ReplCommand::Quit);
    }

    #[test]
    fn test_mode_command() {
        assert_eq!(parse_line("/mode practice"), ReplCommand::Mode("practice".to_string()));
        // Unknown names are passed through for the controller to reject
        assert_eq!(parse_line("/mode debate"), ReplCommand::Mode("debate".to_string()));
        assert!(matches!(parse_line("/mode"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_question_command() {
        assert_eq!(parse_line("/question"), ReplCommand::Question(QuestionKind::Coding));
        assert_eq!(parse_line("/question mcq"), ReplCommand::Question(QuestionKind::Mcq));
        assert!(matches!(parse_line("/question essay"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_sound_command() {
        assert_eq!(parse_line("/sound"), ReplCommand::Sound(None));
        assert_eq!(parse_line("/sound ON"), ReplCommand::Sound(Some(true)));
        assert_eq!(parse_line("/sound off"), ReplCommand::Sound(Some(false)));
        assert!(matches!(parse_line("/sound loud"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_speak_and_unknown() {
        assert_eq!(
            parse_line("/speak good morning class"),
            ReplCommand::Speak("good morning class".to_string())
        );
        assert!(matches!(parse_line("/speak"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_line("/plan"), ReplCommand::Invalid(_)));
        assert_eq!(parse_line("/voice"), ReplCommand::Voice);
        assert_eq!(parse_line("/help"), ReplCommand::Help);
    }
}
