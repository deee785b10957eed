//! Chord progressions and their voicings

use crate::error::{Result, TheoryError};
use crate::types::chord::{ChordFunction, TRIAD_SIZE};
use crate::types::positioned_chord::{ChordPosition, PositionedChord};
use crate::types::tonality::{get_tonality, AbsoluteNote, TonalityName};
use crate::types::voice_leading::{place_chord_with_movement, ChordMovement, VoiceMotion};
use log::debug;
use std::fmt;

/// Separator between chords when a progression is rendered (em space)
const EMSP: char = '\u{2003}';

/// A sequence of chord functions in a tonality, independent of voicing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordProgression {
    pub tonality: TonalityName,
    pub chords: Vec<ChordFunction>,
}

impl ChordProgression {
    pub fn new(tonality: TonalityName, chords: Vec<ChordFunction>) -> Self {
        ChordProgression { tonality, chords }
    }

    /// Build from zero-based scale degrees
    pub fn from_degrees(tonality: TonalityName, degrees: &[i32]) -> Self {
        Self::new(tonality, degrees.iter().copied().map(ChordFunction::new).collect())
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Render as e.g. "Major: I IV V I" (separated by em spaces)
    pub fn render(&self) -> Result<String> {
        let tonality = get_tonality(self.tonality);
        let mut string = format!("{}:", tonality.name());
        for chord in &self.chords {
            string.push(EMSP);
            string.push_str(&chord.to_roman_numeral(tonality)?);
        }
        Ok(string)
    }
}

/// Like [`ChordProgression::render`], but a chord without a numeral is
/// written as its 1-based degree number instead of failing.
impl fmt::Display for ChordProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tonality = get_tonality(self.tonality);
        write!(f, "{}:", tonality.name())?;
        for chord in &self.chords {
            match chord.to_roman_numeral(tonality) {
                Ok(numeral) => write!(f, "{}{}", EMSP, numeral)?,
                Err(_) => write!(f, "{}{}", EMSP, chord.root + 1)?,
            }
        }
        Ok(())
    }
}

/// Compact voicing: a starting position plus one direction per chord change
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionVoicing {
    pub first_chord_position: ChordPosition,
    pub chord_movements: Vec<ChordMovement>,
}

impl ProgressionVoicing {
    pub fn new(first_chord_position: ChordPosition, chord_movements: Vec<ChordMovement>) -> Self {
        ProgressionVoicing {
            first_chord_position,
            chord_movements,
        }
    }
}

/// A chord progression together with the voicing that positions it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicedProgression {
    progression: ChordProgression,
    voicing: ProgressionVoicing,
}

impl VoicedProgression {
    /// Pair a progression with a voicing. Needs exactly one movement per chord change.
    pub fn new(progression: ChordProgression, voicing: ProgressionVoicing) -> Result<Self> {
        let chords = progression.len();
        let movements = voicing.chord_movements.len();
        if movements != chords.saturating_sub(1) {
            return Err(TheoryError::VoicingLengthMismatch { chords, movements });
        }

        Ok(VoicedProgression {
            progression,
            voicing,
        })
    }

    pub fn progression(&self) -> &ChordProgression {
        &self.progression
    }

    pub fn voicing(&self) -> &ProgressionVoicing {
        &self.voicing
    }
}

/// Fold state while positioning a progression
enum Placement {
    Unplaced,
    Placed(PositionedChord),
}

/// A progression whose chords all carry an explicit position
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedChordProgression {
    pub tonality: TonalityName,
    pub chords: Vec<PositionedChord>,
}

impl PositionedChordProgression {
    pub fn new(tonality: TonalityName, chords: Vec<PositionedChord>) -> Self {
        PositionedChordProgression { tonality, chords }
    }

    /// Position every chord of a voiced progression.
    ///
    /// The first chord takes the voicing's starting position; each later
    /// chord is placed against the one before it. Decisions are never
    /// revisited.
    pub fn from_voiced_progression(voiced: &VoicedProgression) -> Self {
        let progression = voiced.progression();
        let voicing = voiced.voicing();
        let mut chords = Vec::with_capacity(progression.len());
        let mut state = Placement::Unplaced;

        for (index, &chord) in progression.chords.iter().enumerate() {
            let placed = match state {
                Placement::Unplaced => PositionedChord::new(chord, voicing.first_chord_position),
                Placement::Placed(previous) => {
                    let movement = voicing.chord_movements[index - 1];
                    place_chord_with_movement(chord, &previous, movement)
                }
            };
            chords.push(placed);
            state = Placement::Placed(placed);
        }

        debug!(
            "positioned {} chords in {:?}: {:?}",
            chords.len(),
            progression.tonality,
            chords.iter().map(|c| c.position).collect::<Vec<_>>()
        );

        PositionedChordProgression::new(progression.tonality, chords)
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Drop the positions, keeping only the chord functions
    pub fn to_chord_progression(&self) -> ChordProgression {
        ChordProgression::new(self.tonality, self.chords.iter().map(|c| c.chord).collect())
    }

    /// Concrete pitches for every chord, relative to `root`
    pub fn realize(&self, root: AbsoluteNote) -> Vec<[AbsoluteNote; TRIAD_SIZE]> {
        let tonality = get_tonality(self.tonality);
        self.chords
            .iter()
            .map(|chord| chord.get_notes(root, tonality))
            .collect()
    }

    /// Outer-voice motion between each pair of consecutive chords
    pub fn voice_motions(&self, root: AbsoluteNote) -> Vec<VoiceMotion> {
        self.realize(root)
            .windows(2)
            .map(|pair| VoiceMotion::analyze(pair[0], pair[1]))
            .collect()
    }

    /// Render as e.g. "Major: I IV/5 V/3" (separated by em spaces)
    pub fn render(&self) -> Result<String> {
        let tonality = get_tonality(self.tonality);
        let mut string = format!("{}:", tonality.name());
        for chord in &self.chords {
            string.push(EMSP);
            string.push_str(&chord.to_roman_numeral(tonality)?);
        }
        Ok(string)
    }
}

/// Like [`PositionedChordProgression::render`], falling back to the 1-based
/// degree number (plus inversion figure) for chords without a numeral.
impl fmt::Display for PositionedChordProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tonality = get_tonality(self.tonality);
        write!(f, "{}:", tonality.name())?;
        for chord in &self.chords {
            match chord.to_roman_numeral(tonality) {
                Ok(numeral) => write!(f, "{}{}", EMSP, numeral)?,
                Err(_) => {
                    let figure = match chord.inversion() {
                        0 => "",
                        1 => "/3",
                        _ => "/5",
                    };
                    write!(f, "{}{}{}", EMSP, chord.chord.root + 1, figure)?
                }
            }
        }
        Ok(())
    }
}
