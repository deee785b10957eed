//! Command registry for REPL commands
//!
//! Every line typed at the prompt is matched against the registered
//! command prefixes, longest first.

pub mod general;
pub mod midi;
pub mod playback;
pub mod progression;

use crate::playback::{PlaybackConfig, PlaybackEngine};
use chordwalk_core::types::{PositionedChordProgression, TonalityName};
use std::sync::Arc;

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No registered command matches the input
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Session state shared by the command handlers
pub struct CommandContext {
    pub tonality: TonalityName,
    /// Most recently voiced progression, replayed by `play`
    pub progression: Option<PositionedChordProgression>,
    pub config: PlaybackConfig,
    pub engine: Arc<PlaybackEngine>,
}

impl CommandContext {
    pub fn new(engine: Arc<PlaybackEngine>) -> Self {
        Self {
            tonality: TonalityName::Ionian,
            progression: None,
            config: PlaybackConfig::default(),
            engine,
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Harmony
    registry.register("tonality", progression::cmd_tonality);
    registry.register("tonalities", progression::cmd_tonalities);
    registry.register("chords", progression::cmd_chords);
    registry.register("voice", progression::cmd_voice);

    // Playback
    registry.register("play", playback::cmd_play);
    registry.register("stop", playback::cmd_stop);
    registry.register("root", playback::cmd_root);
    registry.register("delay", playback::cmd_delay);

    // MIDI
    registry.register("midi ports", midi::cmd_midi_ports);
    registry.register("midi connect", midi::cmd_midi_connect);
    registry.register("midi disconnect", midi::cmd_midi_disconnect);

    // General
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::playback::PrintSink;

    pub(crate) fn test_context() -> CommandContext {
        CommandContext::new(Arc::new(PlaybackEngine::new(Box::new(PrintSink))))
    }

    #[test]
    fn test_longest_prefix_wins() {
        fn short(_: &str, _: &mut CommandContext) -> CommandResult {
            CommandResult::Message("short".to_string())
        }
        fn long(args: &str, _: &mut CommandContext) -> CommandResult {
            CommandResult::Message(format!("long:{}", args))
        }

        let mut registry = CommandRegistry::new();
        registry.register("midi", short);
        registry.register("midi ports", long);
        let mut ctx = test_context();

        match registry.execute("midi ports  extra", &mut ctx) {
            CommandResult::Message(msg) => assert_eq!(msg, "long:extra"),
            other => panic!("unexpected result: {:?}", other),
        }
        match registry.execute("midi", &mut ctx) {
            CommandResult::Message(msg) => assert_eq!(msg, "short"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_prefix_must_end_at_word_boundary() {
        let registry = create_registry();
        let mut ctx = test_context();
        assert!(matches!(
            registry.execute("tonalityx", &mut ctx),
            CommandResult::NotACommand
        ));
        assert!(matches!(
            registry.execute("tonalities", &mut ctx),
            CommandResult::Message(_)
        ));
    }

    #[test]
    fn test_registry_lists_commands() {
        let registry = create_registry();
        let commands = registry.list_commands();
        assert!(commands.contains(&"voice"));
        assert!(commands.contains(&"midi connect"));
        assert_eq!(commands.first().map(|c| c.len()), Some("midi disconnect".len()));
    }
}
