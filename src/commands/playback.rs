//! Playback commands (play, stop, root, delay)

use crate::commands::{CommandContext, CommandResult};
use crate::display::note_name;
use colored::*;
use std::time::Duration;

const MIN_DELAY_MS: u64 = 50;
const MAX_DELAY_MS: u64 = 10_000;

/// Handle `play` command - replay the last voiced progression
pub fn cmd_play(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(progression) = &ctx.progression else {
        return CommandResult::Error(
            "Nothing to play yet. Voice a progression first, e.g. 'voice 1 4 5 1'".to_string(),
        );
    };

    match ctx.engine.play_progression(progression, ctx.config.clone()) {
        Ok(()) => CommandResult::Message(format!("🔊 Playing {} chords", progression.len())),
        Err(e) => CommandResult::Error(format!("Playback error: {}", e)),
    }
}

/// Handle `stop` command
pub fn cmd_stop(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.engine.stop() {
        Ok(()) => CommandResult::Message("⏹ Playback stopped".to_string()),
        Err(e) => CommandResult::Error(format!("Stop error: {}", e)),
    }
}

/// Handle `root [midi]` command - pitch of the tonic
pub fn cmd_root(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current root: {} ({})",
            ctx.config.root,
            note_name(ctx.config.root)
        ));
    }

    // Leave room for a two-octave voicing above the root
    match args.parse::<i32>() {
        Ok(root) if (0..=103).contains(&root) => {
            ctx.config = ctx.config.clone().with_root(root);
            CommandResult::Message(
                format!("🎵 Root set to {} ({})", root, note_name(root))
                    .bright_green()
                    .to_string(),
            )
        }
        _ => CommandResult::Error("Invalid root. Use a MIDI note between 0 and 103".to_string()),
    }
}

/// Handle `delay [ms]` command - time each chord sounds
pub fn cmd_delay(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current delay: {} ms",
            ctx.config.chord_delay.as_millis()
        ));
    }

    match args.trim_end_matches("ms").trim().parse::<u64>() {
        Ok(ms) if (MIN_DELAY_MS..=MAX_DELAY_MS).contains(&ms) => {
            ctx.config = ctx.config.clone().with_delay(Duration::from_millis(ms));
            CommandResult::Message(
                format!("⏱ Delay set to {} ms", ms)
                    .bright_green()
                    .to_string(),
            )
        }
        _ => CommandResult::Error(format!(
            "Invalid delay. Use a value between {}-{} ms",
            MIN_DELAY_MS, MAX_DELAY_MS
        )),
    }
}
