// chordwalk-core/src/types/mod.rs

pub mod chord;
pub mod positioned_chord;
pub mod progression;
pub mod roman_numeral;
pub mod tonality;
pub mod voice_leading;

pub use chord::{apply_inversion, rotate_chord, ChordFunction, TRIAD_SIZE};
pub use positioned_chord::{ChordPosition, PositionedChord, MAX_CHORD_POSITION};
pub use progression::{
    ChordProgression, PositionedChordProgression, ProgressionVoicing, VoicedProgression,
};
pub use roman_numeral::{ChordQuality, RomanNumeral};
pub use tonality::{
    find_tonality, get_tonality, AbsoluteNote, RelativeNote, ScaleDegree, Tonality, TonalityName,
};
pub use voice_leading::{
    place_above_chord, place_below_chord, place_chord_with_movement, ChordMovement, VoiceMotion,
};
