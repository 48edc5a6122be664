//! Terminal rendering of the chat.

use std::io::{IsTerminal, Write};

use colored::{ColoredString, Colorize};
use tutor_core::{ChatMessage, ChatMode, ChatRenderer, MessageOrigin};

/// Draws chat events as colored lines on stdout.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Header line for a message: author tag plus time.
pub fn message_header(message: &ChatMessage) -> String {
    let author = match message.origin {
        MessageOrigin::User => "You",
        MessageOrigin::Assistant => "Tutor",
        MessageOrigin::System => "System",
    };
    format!("[{}] {}", author, message.display_time())
}

fn paint(origin: MessageOrigin, text: &str) -> ColoredString {
    match origin {
        MessageOrigin::User => text.green(),
        MessageOrigin::Assistant => text.bright_blue(),
        MessageOrigin::System => text.bright_black(),
    }
}

/// Banner shown when the mode changes.
pub fn mode_banner(mode: ChatMode) -> String {
    let name = mode.as_str();
    let mut chars = name.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("=== {} Mode ===", title)
}

pub fn listening_line(listening: bool) -> &'static str {
    if listening {
        "Voice input: listening (/voice to stop)"
    } else {
        "Voice input: off"
    }
}

impl ChatRenderer for TerminalRenderer {
    fn clear_messages(&self) {
        if std::io::stdout().is_terminal() {
            print!("\x1B[2J\x1B[1;1H");
            let _ = std::io::stdout().flush();
        }
    }

    fn render_message(&self, message: &ChatMessage) {
        println!("{}", paint(message.origin, &message_header(message)).bold());
        for line in message.text.lines() {
            println!("{}", paint(message.origin, line));
        }
        println!();
    }

    fn set_status(&self, status: &str) {
        println!("{}", format!("({})", status).bright_black().italic());
    }

    fn set_mode_indicator(&self, mode: ChatMode) {
        let banner = mode_banner(mode);
        let banner = match mode {
            ChatMode::Normal => banner.bright_magenta(),
            ChatMode::Practice => banner.bright_yellow(),
            ChatMode::Counseling => banner.bright_cyan(),
        };
        println!("{}", banner.bold());
    }

    fn set_listening_indicator(&self, listening: bool) {
        let line = listening_line(listening);
        if listening {
            println!("{}", line.bright_red());
        } else {
            println!("{}", line.bright_black());
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", format!("! {}", message).yellow().bold());
    }
}
