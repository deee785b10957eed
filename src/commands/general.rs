//! General REPL commands (help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Print help information
fn print_help() {
    println!("{}", "🎵 Chordwalk Help".bold());
    println!("{}", "=================".bold());
    println!();
    println!("{}", "Harmony:".green());
    println!(
        "  {}     - Set the tonality (e.g. major, dorian, harmonic minor)",
        "tonality <name>".cyan()
    );
    println!("  {}          - List the available tonalities", "tonalities".cyan());
    println!("  {}              - Show the diatonic triads of the tonality", "chords".cyan());
    println!();
    println!("{}", "Voicing:".green());
    println!(
        "  {}  - Voice a progression",
        "voice <degrees> [first=<n>] [moves=<u|d...>]".cyan()
    );
    println!(
        "      Degrees are 1-7 or Roman numerals. {} is the starting inversion",
        "first".cyan()
    );
    println!(
        "      (-9 to 9; values outside 0-2 shift octaves). Each {} or {} moves the next chord",
        "u".cyan(),
        "d".cyan()
    );
    println!("      above or below the previous one. Omitted values are chosen at random.");
    println!();
    println!("{}", "Playback:".green());
    println!("  {}                - Play the last voiced progression", "play".cyan());
    println!("  {}                - Stop playback", "stop".cyan());
    println!("  {}         - Tonic pitch as a MIDI note (default 60)", "root <midi>".cyan());
    println!("  {}          - Time per chord in milliseconds", "delay <ms>".cyan());
    println!();
    println!("{}", "MIDI:".green());
    println!("  {}          - List MIDI output ports", "midi ports".cyan());
    println!("  {} - Send chords to a MIDI port", "midi connect <name>".cyan());
    println!("  {}     - Print chords to the terminal instead", "midi disconnect".cyan());
    println!();
    println!("{}", "Examples:".green());
    println!("  chordwalk> {}", "voice 1 4 5 1 moves=udu".cyan());
    println!("  chordwalk> {}", "voice I vi IV V first=1".cyan());
    println!("  chordwalk> {}", "tonality dorian".cyan());
    println!();
    println!("Type '{}' or '{}' to leave.", "quit".bright_red(), "exit".bright_red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_context;

    #[test]
    fn test_quit_exits() {
        let mut ctx = test_context();
        assert!(matches!(cmd_quit("", &mut ctx), CommandResult::Exit));
    }
}
