//! Interactive prompt for voicing and playing progressions

use crate::commands::{create_registry, CommandContext, CommandResult};
use crate::playback::{PlaybackEngine, PrintSink};
use anyhow::Result;
use colored::*;
use log::info;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::sync::Arc;

/// Interactive REPL
pub struct Repl {
    editor: DefaultEditor,
    playback_engine: Arc<PlaybackEngine>,
}

impl Repl {
    /// Create a new REPL instance; playback starts on the terminal sink
    pub fn new() -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        let playback_engine = Arc::new(PlaybackEngine::new(Box::new(PrintSink)));

        Ok(Repl {
            editor,
            playback_engine,
        })
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎵".bright_yellow(),
            "Chordwalk - diatonic voice leading".bright_cyan().bold()
        );
        println!(
            "Try: {}, {}, {}",
            "chords".cyan(),
            "voice 1 4 5 1".cyan(),
            "play".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        let registry = create_registry();
        let mut ctx = CommandContext::new(self.playback_engine.clone());
        info!("REPL started");

        loop {
            let prompt = format!("{} ", "chordwalk>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(line.to_owned())?;

                    match registry.execute(line, &mut ctx) {
                        CommandResult::Success => {}
                        CommandResult::Message(msg) => {
                            println!("{}", msg);
                        }
                        CommandResult::Exit => {
                            println!("{} 🎵", "Goodbye!".bright_cyan());
                            break;
                        }
                        CommandResult::Error(e) => {
                            println!("{} {}", "Error:".bright_red().bold(), e.red());
                        }
                        CommandResult::NotACommand => {
                            println!(
                                "{} {}",
                                "Unknown command:".bright_red().bold(),
                                format!("'{}'. Type 'help' for the list of commands", line).red()
                            );
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{} 🎵", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    println!(
                        "{} {}",
                        "Error reading input:".bright_red().bold(),
                        err.to_string().red()
                    );
                }
            }
        }

        self.playback_engine.stop()?;
        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start() -> Result<()> {
    let mut repl = Repl::new().map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}
