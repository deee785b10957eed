//! Scales and the scale-degree to semitone mapping

use crate::error::{Result, TheoryError};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// The nth note (zero indexed) of a scale. May be negative or exceed one octave.
pub type ScaleDegree = i32;

/// A note `n` semitones above the tonic of a tonality.
pub type RelativeNote = i32;

/// A note in MIDI numbering. 60 is middle C, each step is one semitone.
pub type AbsoluteNote = i32;

pub const SEMITONES_PER_OCTAVE: i32 = 12;
pub const SCALE_LENGTH: i32 = 7;

const DIATONIC_OFFSETS: [RelativeNote; 7] = [0, 2, 4, 5, 7, 9, 11];
const HARMONIC_MINOR_OFFSETS: [RelativeNote; 7] = [0, 2, 3, 5, 7, 8, 11];

/// The eight predefined tonalities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TonalityName {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    HarmonicMinor,
}

impl TonalityName {
    pub const ALL: [TonalityName; 8] = [
        TonalityName::Ionian,
        TonalityName::Dorian,
        TonalityName::Phrygian,
        TonalityName::Lydian,
        TonalityName::Mixolydian,
        TonalityName::Aeolian,
        TonalityName::Locrian,
        TonalityName::HarmonicMinor,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for TonalityName {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase().replace(['_', ' '], "-");
        match name.as_str() {
            "ionian" | "major" => Ok(TonalityName::Ionian),
            "dorian" => Ok(TonalityName::Dorian),
            "phrygian" => Ok(TonalityName::Phrygian),
            "lydian" => Ok(TonalityName::Lydian),
            "mixolydian" => Ok(TonalityName::Mixolydian),
            "aeolian" | "minor" | "nat.-minor" | "natural-minor" => Ok(TonalityName::Aeolian),
            "locrian" => Ok(TonalityName::Locrian),
            "harmonic-minor" | "harm.-minor" => Ok(TonalityName::HarmonicMinor),
            _ => Err(TheoryError::UnknownTonality(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TonalityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", get_tonality(*self).name())
    }
}

/// A named seven-note scale. Offsets start at 0, strictly increase and stay below 12.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tonality {
    name: &'static str,
    scale: [RelativeNote; 7],
}

static TONALITIES: LazyLock<[Tonality; 8]> = LazyLock::new(|| {
    [
        Tonality::new("Major", modal_scale(0)),
        Tonality::new("Dorian", modal_scale(1)),
        Tonality::new("Phrygian", modal_scale(2)),
        Tonality::new("Lydian", modal_scale(3)),
        Tonality::new("Mixolydian", modal_scale(4)),
        Tonality::new("Nat. Minor", modal_scale(5)),
        Tonality::new("Locrian", modal_scale(6)),
        Tonality::new("Harm. Minor", HARMONIC_MINOR_OFFSETS),
    ]
});

/// Look up one of the predefined tonalities
pub fn get_tonality(name: TonalityName) -> &'static Tonality {
    &TONALITIES[name.index()]
}

/// Look up a tonality by its textual name (see [`TonalityName::from_str`])
pub fn find_tonality(name: &str) -> Result<&'static Tonality> {
    Ok(get_tonality(name.parse()?))
}

impl Tonality {
    fn new(name: &'static str, scale: [RelativeNote; 7]) -> Self {
        Tonality { name, scale }
    }

    /// Display name, e.g. "Major" or "Harm. Minor"
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// One octave of semitone offsets, starting at the tonic
    pub fn scale(&self) -> &[RelativeNote; 7] {
        &self.scale
    }

    /// Convert a scale degree to semitones above the tonic.
    ///
    /// Degrees outside `0..7` wrap into neighbouring octaves, so
    /// `get_note(d + 7) == get_note(d) + 12` for every degree.
    pub fn get_note(&self, degree: ScaleDegree) -> RelativeNote {
        note_from_scale(&self.scale, degree)
    }
}

fn note_from_scale(scale: &[RelativeNote; 7], degree: ScaleDegree) -> RelativeNote {
    let octave = degree.div_euclid(SCALE_LENGTH);
    let index = degree.rem_euclid(SCALE_LENGTH) as usize;
    SEMITONES_PER_OCTAVE * octave + scale[index]
}

/// Rotate the diatonic scale so that mode `mode` starts on 0
fn modal_scale(mode: ScaleDegree) -> [RelativeNote; 7] {
    let tonic = note_from_scale(&DIATONIC_OFFSETS, mode);
    let mut scale = [0; 7];
    for (step, offset) in scale.iter_mut().enumerate() {
        *offset = note_from_scale(&DIATONIC_OFFSETS, step as ScaleDegree + mode) - tonic;
    }
    scale
}
