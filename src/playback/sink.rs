use crate::display::pitch_names;
use crate::playback::config::PlaybackConfig;
use anyhow::Result;
use chordwalk_core::types::AbsoluteNote;

/// Something that can sound a chord and silence it again
pub trait ChordSink {
    /// Start `pitches` (sorted low to high), replacing whatever was sounding
    fn play_chord(&mut self, pitches: &[AbsoluteNote], config: &PlaybackConfig) -> Result<()>;

    /// Silence everything
    fn stop(&mut self) -> Result<()>;

    fn name(&self) -> String;
}

/// Prints chords to stdout instead of sounding them
#[derive(Debug, Default)]
pub struct PrintSink;

impl ChordSink for PrintSink {
    fn play_chord(&mut self, pitches: &[AbsoluteNote], _config: &PlaybackConfig) -> Result<()> {
        println!("♪ {}", pitch_names(pitches));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> String {
        "terminal".to_string()
    }
}
