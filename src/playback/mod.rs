//! Turning positioned chords into sound
//!
//! The engine owns a playback thread; sinks decide what "sounding" means
//! (a MIDI port, or the terminal when nothing is connected).

pub mod config;
pub mod engine;
pub mod midi;
pub mod sink;

pub use config::PlaybackConfig;
pub use engine::{ChordPitches, PlaybackEngine};
pub use midi::{list_ports, MidiSink};
pub use sink::{ChordSink, PrintSink};
