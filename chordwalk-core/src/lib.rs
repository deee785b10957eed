//! # Chordwalk Core
//!
//! Pure engine for diatonic triad voicing. Given a tonality, a sequence of
//! chord functions (scale-degree roots) and a compact voicing description,
//! it positions every chord close to its predecessor and realizes the
//! result as concrete MIDI pitches.
//!
//! The engine performs no I/O, timing or randomness; every operation is a
//! function over immutable values.
//!
//! ## Features
//!
//! - **serde**: derive `Serialize`/`Deserialize` on the value types
//!
//! ## Example
//!
//! ```
//! use chordwalk_core::types::{
//!     ChordMovement, ChordProgression, PositionedChordProgression, ProgressionVoicing,
//!     TonalityName, VoicedProgression,
//! };
//!
//! let progression = ChordProgression::from_degrees(TonalityName::Ionian, &[0, 3, 4]);
//! let voicing = ProgressionVoicing::new(0, vec![ChordMovement::Up, ChordMovement::Down]);
//! let voiced = VoicedProgression::new(progression, voicing)?;
//! let positioned = PositionedChordProgression::from_voiced_progression(&voiced);
//! assert_eq!(positioned.realize(60)[0], [60, 64, 67]);
//! # Ok::<(), chordwalk_core::TheoryError>(())
//! ```

pub mod error;
pub mod types;

pub use error::{Result, TheoryError};
pub use types::{
    ChordFunction, ChordMovement, ChordProgression, PositionedChord, PositionedChordProgression,
    ProgressionVoicing, Tonality, TonalityName, VoicedProgression,
};
