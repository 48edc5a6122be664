mod commands;
mod helper;
mod renderer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_subscriber::EnvFilter;

use tutor_core::{ChatController, ChatMode};
use tutor_core::config::RootConfig;
use tutor_core::speech::speech_channel;
use tutor_infrastructure::ConfigService;
use tutor_infrastructure::paths::{TutorPaths, write_default_config};
use tutor_interaction::{HttpTutorBackend, speech_input_from_config, speech_output_from_config};

use crate::commands::{HELP_TEXT, ReplCommand, parse_line};
use crate::helper::CliHelper;
use crate::renderer::TerminalRenderer;

/// Terminal client for the virtual teacher.
#[derive(Debug, Parser)]
#[command(name = "tutor", version, about)]
struct Cli {
    /// Config file to read instead of ~/.config/tutor/config.toml
    #[arg(long, env = "TUTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and TUTOR_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Speak tutor replies aloud
    #[arg(long)]
    sound: bool,

    /// Mode to start in
    #[arg(long, value_parser = parse_mode)]
    mode: Option<ChatMode>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn parse_mode(value: &str) -> Result<ChatMode, String> {
    value.parse::<ChatMode>().map_err(|e| e.to_string())
}

impl Cli {
    fn apply_overrides(&self, config: &mut RootConfig) {
        if let Some(base_url) = &self.base_url {
            config.backend.base_url = base_url.clone();
        }
        if self.sound {
            config.session.sound_enabled = true;
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tutor=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn init_config(cli: &Cli) -> Result<()> {
    let path = match &cli.config {
        Some(path) => {
            write_default_config(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            path.clone()
        }
        None => TutorPaths::ensure_config_file().context("failed to write default config")?,
    };
    println!("{}", format!("Config file: {}", path.display()).bright_green());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if cli.init_config {
        return init_config(&cli);
    }

    // ===== Configuration =====
    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let mut config = config_service.get_config()?;
    cli.apply_overrides(&mut config);
    tracing::info!("Using backend at {}", config.backend.base_url);

    // ===== Session Initialization =====
    let backend = Arc::new(HttpTutorBackend::from_config(&config.backend)?);
    let renderer = Arc::new(TerminalRenderer::new());
    let (speech_tx, speech_rx) = speech_channel();

    let mut controller = ChatController::new(backend, renderer, config.session.clone())
        .with_speech_output(speech_output_from_config(&config.speech));
    if let Some(input) = speech_input_from_config(&config.speech, speech_tx) {
        controller = controller.with_speech_input(input);
    }
    let controller = Arc::new(controller);

    let speech_pump = tokio::spawn(Arc::clone(&controller).run_speech_events(speech_rx));

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Virtual Teacher ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a message to chat, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    if !controller.has_voice_input() {
        println!(
            "{}",
            "Voice input is off; set speech.input_command in the config to enable /voice."
                .bright_black()
        );
    }
    println!();

    controller.show_welcome();
    if let Some(mode) = cli.mode {
        controller.switch_mode(mode);
    }

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let command = parse_line(&line);
                if !matches!(command, ReplCommand::Empty) {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match command {
                    ReplCommand::Empty => {}
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Send(text) => {
                        let controller = Arc::clone(&controller);
                        tokio::spawn(async move {
                            controller.send_message(&text).await;
                        });
                    }
                    ReplCommand::Mode(name) => {
                        if let Err(err) = controller.switch_mode_named(&name) {
                            println!("{}", err.to_string().red());
                        }
                    }
                    ReplCommand::Question(kind) => {
                        let controller = Arc::clone(&controller);
                        tokio::spawn(async move {
                            controller.get_practice_question(kind).await;
                        });
                    }
                    ReplCommand::Voice => {
                        controller.toggle_voice();
                    }
                    ReplCommand::Sound(setting) => {
                        let enabled = setting.unwrap_or(!controller.sound_enabled());
                        controller.set_sound_enabled(enabled);
                        let state = if enabled { "on" } else { "off" };
                        println!("{}", format!("Sound {}", state).bright_black());
                    }
                    ReplCommand::Speak(text) => controller.speak(&text),
                    ReplCommand::Help => println!("{}", HELP_TEXT.bright_black()),
                    ReplCommand::Invalid(hint) => println!("{}", hint.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    if controller.is_listening() {
        controller.toggle_voice();
    }
    speech_pump.abort();

    Ok(())
}
