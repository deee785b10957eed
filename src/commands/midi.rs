//! MIDI REPL commands

use crate::commands::{CommandContext, CommandResult};
use crate::playback::{list_ports, PrintSink};
use colored::*;

/// Handle `midi ports` command - list available MIDI output ports
pub fn cmd_midi_ports(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    match list_ports() {
        Ok(ports) => {
            if ports.is_empty() {
                CommandResult::Message(
                    "No MIDI output ports found. Connect a MIDI device or a virtual port."
                        .yellow()
                        .to_string(),
                )
            } else {
                let mut output = format!("{}\n", "🎹 Available MIDI Output Ports:".bold());
                for (i, port) in ports.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, port.cyan()));
                }
                output.push_str(&format!(
                    "\n{} {}",
                    "Use".dimmed(),
                    "midi connect <port name>".green()
                ));
                CommandResult::Message(output)
            }
        }
        Err(e) => CommandResult::Error(format!("Failed to list MIDI ports: {}", e)),
    }
}

/// Handle `midi connect <port>` command - send chords to a MIDI output port
pub fn cmd_midi_connect(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error(
            "Usage: midi connect <port name>\nUse 'midi ports' to see available ports".to_string(),
        );
    }

    match ctx.engine.connect_midi(args) {
        Ok(name) => {
            CommandResult::Message(format!("🎹 Connected to MIDI port: {}", name.green()))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `midi disconnect` command - fall back to printing chords
pub fn cmd_midi_disconnect(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.engine.use_sink(Box::new(PrintSink)) {
        Ok(()) => CommandResult::Message("🎹 Disconnected from MIDI".to_string()),
        Err(e) => CommandResult::Error(format!("Failed to disconnect: {}", e)),
    }
}
