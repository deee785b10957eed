use chordwalk_core::types::AbsoluteNote;
use std::time::Duration;

/// Settings for turning positioned chords into sound
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackConfig {
    /// Pitch of the tonic (60 = middle C)
    pub root: AbsoluteNote,
    /// Time each chord sounds before the next one starts
    pub chord_delay: Duration,
    /// MIDI velocity (0-127)
    pub velocity: u8,
    /// MIDI channel (0-15)
    pub channel: u8,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            root: 60,
            chord_delay: Duration::from_millis(750),
            velocity: 96,
            channel: 0,
        }
    }
}

impl PlaybackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: AbsoluteNote) -> Self {
        self.root = root;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.chord_delay = delay;
        self
    }

    pub fn with_velocity(mut self, velocity: u8) -> Self {
        self.velocity = velocity.min(127);
        self
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel & 0x0F;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlaybackConfig::default();
        assert_eq!(config.root, 60);
        assert_eq!(config.chord_delay, Duration::from_millis(750));
    }

    #[test]
    fn test_builder_clamps_midi_ranges() {
        let config = PlaybackConfig::new()
            .with_root(48)
            .with_delay(Duration::from_millis(200))
            .with_velocity(200)
            .with_channel(17);
        assert_eq!(config.root, 48);
        assert_eq!(config.chord_delay, Duration::from_millis(200));
        assert_eq!(config.velocity, 127);
        assert_eq!(config.channel, 1);
    }
}
