//! MIDI output for chord playback
//!
//! The connection is opened on the playback thread and never leaves it.

use crate::playback::config::PlaybackConfig;
use crate::playback::sink::ChordSink;
use anyhow::{anyhow, Result};
use chordwalk_core::types::AbsoluteNote;
use log::{debug, warn};
use midir::{MidiOutput, MidiOutputConnection};

const CLIENT_NAME: &str = "Chordwalk";

/// Clamp an absolute pitch into the MIDI note range
pub fn to_midi_note(pitch: AbsoluteNote) -> u8 {
    pitch.clamp(0, 127) as u8
}

/// List available MIDI output ports
pub fn list_ports() -> Result<Vec<String>> {
    let midi_out = MidiOutput::new(CLIENT_NAME)?;
    let names = midi_out
        .ports()
        .iter()
        .filter_map(|port| midi_out.port_name(port).ok())
        .collect();
    Ok(names)
}

/// Sounds chords on an external synth through a MIDI output port
pub struct MidiSink {
    connection: MidiOutputConnection,
    port_name: String,
    channel: u8,
    /// Notes currently held, so they can be released before the next chord
    active_notes: Vec<u8>,
}

impl MidiSink {
    /// Connect to the first output port whose name contains `port_name`
    pub fn connect(port_name: &str) -> Result<Self> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;
        let ports = midi_out.ports();

        let (port, full_name) = ports
            .iter()
            .find_map(|p| {
                midi_out
                    .port_name(p)
                    .ok()
                    .filter(|name| name.contains(port_name))
                    .map(|name| (p.clone(), name))
            })
            .ok_or_else(|| anyhow!("MIDI port '{}' not found", port_name))?;

        let connection = midi_out
            .connect(&port, "chordwalk-out")
            .map_err(|e| anyhow!("Failed to connect to '{}': {}", full_name, e))?;
        debug!("connected to MIDI port {}", full_name);

        Ok(Self {
            connection,
            port_name: full_name,
            channel: 0,
            active_notes: Vec::new(),
        })
    }

    fn release_active_notes(&mut self) {
        for note in std::mem::take(&mut self.active_notes) {
            // Note Off: 0x80 + channel, note, velocity 0
            if let Err(e) = self.connection.send(&[0x80 | self.channel, note, 0]) {
                warn!("MIDI note off failed: {}", e);
            }
        }
    }
}

impl ChordSink for MidiSink {
    fn play_chord(&mut self, pitches: &[AbsoluteNote], config: &PlaybackConfig) -> Result<()> {
        self.release_active_notes();
        self.channel = config.channel & 0x0F;

        for &pitch in pitches {
            let note = to_midi_note(pitch);
            // Note On: 0x90 + channel, note, velocity
            self.connection
                .send(&[0x90 | self.channel, note, config.velocity & 0x7F])
                .map_err(|e| anyhow!("MIDI note on failed: {}", e))?;
            self.active_notes.push(note);
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.release_active_notes();
        // All Notes Off: CC 123, value 0
        self.connection
            .send(&[0xB0 | self.channel, 123, 0])
            .map_err(|e| anyhow!("MIDI all notes off failed: {}", e))
    }

    fn name(&self) -> String {
        format!("MIDI ({})", self.port_name)
    }
}

impl Drop for MidiSink {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
