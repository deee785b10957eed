//! Error types for the Chordwalk engine

use thiserror::Error;

/// Input-validation failures raised by the theory engine.
///
/// None of these are transient: they are raised where detected and returned
/// to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("Unknown tonality: {0}")]
    UnknownTonality(String),
    #[error("Unsupported chord shape: 0, {third}, {fifth}")]
    UnsupportedChordShape { third: i32, fifth: i32 },
    #[error("No notation found for chord root {0}")]
    NoNotationForDegree(i32),
    #[error("Voicing has {movements} movements but the progression has {chords} chords")]
    VoicingLengthMismatch { chords: usize, movements: usize },
}

pub type Result<T> = std::result::Result<T, TheoryError>;
