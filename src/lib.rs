//! # Chordwalk
//!
//! Interactive front end for the `chordwalk-core` voicing engine. It voices
//! diatonic triad progressions so that each chord sits close to the one
//! before it, prints them as colored Roman numerals and plays them on a
//! MIDI port (or prints the pitches when no port is connected).
//!
//! ## Modules
//!
//! - `commands`: the REPL commands and their longest-prefix registry.
//! - `display`: note names and chord colors for the terminal.
//! - `playback`: the playback thread and its output sinks.
//! - `repl`: the Read-Eval-Print Loop.

pub mod commands;
pub mod display;
pub mod playback;
pub mod repl;

pub use chordwalk_core::types::{
    ChordMovement, ChordProgression, PositionedChordProgression, ProgressionVoicing, TonalityName,
    VoicedProgression,
};
pub use crate::playback::{PlaybackConfig, PlaybackEngine};
