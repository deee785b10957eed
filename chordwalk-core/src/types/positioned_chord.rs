use crate::error::Result;
use crate::types::chord::{apply_inversion, ChordFunction, TRIAD_SIZE};
use crate::types::roman_numeral::RomanNumeral;
use crate::types::tonality::{AbsoluteNote, RelativeNote, ScaleDegree, Tonality, SCALE_LENGTH};

/// Number of inversions away from the canonical root-position triad.
///
/// `position mod 3` is the inversion and `position div 3` the extra octave,
/// both floor-style so negative positions keep inversions in `0..3`.
///
/// Realization multiplies the octave by 12 in plain `i32` arithmetic, so
/// positions are supported while `|position| <= MAX_CHORD_POSITION`. Callers
/// taking positions from user input should bound them far tighter, to keep
/// pitches inside the MIDI range.
pub type ChordPosition = i32;

/// Largest position magnitude whose realized pitches cannot overflow `i32`
pub const MAX_CHORD_POSITION: ChordPosition = i32::MAX / 8;

/// A chord function placed at a concrete inversion and octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedChord {
    pub chord: ChordFunction,
    pub position: ChordPosition,
}

impl PositionedChord {
    pub fn new(chord: ChordFunction, position: ChordPosition) -> Self {
        PositionedChord { chord, position }
    }

    pub fn inversion(&self) -> i32 {
        self.position.rem_euclid(TRIAD_SIZE as i32)
    }

    pub fn octave(&self) -> i32 {
        self.position.div_euclid(TRIAD_SIZE as i32)
    }

    /// Highest note in scale-degree space, octave included
    pub fn top_note(&self) -> ScaleDegree {
        let inversion = self.inversion();
        let top_index = (2 + inversion as usize) % TRIAD_SIZE;
        let octave = self.octave() + i32::from(inversion > 0);
        SCALE_LENGTH * octave + self.chord.member(top_index)
    }

    /// Lowest note in scale-degree space, octave included
    pub fn bottom_note(&self) -> ScaleDegree {
        SCALE_LENGTH * self.octave() + self.chord.member(self.inversion() as usize)
    }

    /// Semitones above the tonic, in root/third/fifth order
    pub fn relative_notes(&self, tonality: &Tonality) -> [RelativeNote; TRIAD_SIZE] {
        apply_inversion(self.chord.to_triad_notes(tonality), self.position)
    }

    /// Concrete pitches above `root`, in root/third/fifth order
    pub fn get_notes(&self, root: AbsoluteNote, tonality: &Tonality) -> [AbsoluteNote; TRIAD_SIZE] {
        self.relative_notes(tonality).map(|note| root + note)
    }

    /// Roman numeral with inversion figure, e.g. "IV/3"
    pub fn to_roman_numeral(&self, tonality: &Tonality) -> Result<String> {
        Ok(RomanNumeral::analyze(&self.chord, tonality, self.position)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tonality::{get_tonality, TonalityName};

    #[test]
    fn test_position_decomposition() {
        let chord = ChordFunction::new(0);
        let cases = [
            (0, 0, 0),
            (1, 1, 0),
            (2, 2, 0),
            (3, 0, 1),
            (4, 1, 1),
            (-1, 2, -1),
            (-3, 0, -1),
        ];
        for (position, inversion, octave) in cases {
            let positioned = PositionedChord::new(chord, position);
            assert_eq!(positioned.inversion(), inversion, "position {}", position);
            assert_eq!(positioned.octave(), octave, "position {}", position);
        }
    }

    #[test]
    fn test_top_and_bottom_notes() {
        let tonic = ChordFunction::new(0);
        // Root position: C E G
        assert_eq!(PositionedChord::new(tonic, 0).bottom_note(), 0);
        assert_eq!(PositionedChord::new(tonic, 0).top_note(), 4);
        // First inversion: E G C
        assert_eq!(PositionedChord::new(tonic, 1).bottom_note(), 2);
        assert_eq!(PositionedChord::new(tonic, 1).top_note(), 7);
        // Second inversion: G C E
        assert_eq!(PositionedChord::new(tonic, 2).bottom_note(), 4);
        assert_eq!(PositionedChord::new(tonic, 2).top_note(), 9);
        // One octave down, second inversion
        assert_eq!(PositionedChord::new(tonic, -1).bottom_note(), -3);
        assert_eq!(PositionedChord::new(tonic, -1).top_note(), 2);
    }

    #[test]
    fn test_scale_degree_bounds_match_pitches() {
        let major = get_tonality(TonalityName::Ionian);
        for root in 0..7 {
            for position in -6..6 {
                let positioned = PositionedChord::new(ChordFunction::new(root), position);
                let notes = positioned.relative_notes(major);
                assert_eq!(notes.iter().max(), Some(&major.get_note(positioned.top_note())));
                assert_eq!(notes.iter().min(), Some(&major.get_note(positioned.bottom_note())));
            }
        }
    }

    #[test]
    fn test_get_notes() {
        let major = get_tonality(TonalityName::Ionian);
        let tonic = PositionedChord::new(ChordFunction::new(0), 0);
        assert_eq!(tonic.relative_notes(major), [0, 4, 7]);
        assert_eq!(tonic.get_notes(60, major), [60, 64, 67]);

        let subdominant = PositionedChord::new(ChordFunction::new(3), -1);
        assert_eq!(subdominant.get_notes(60, major), [65, 69, 60]);
    }

    #[test]
    fn test_extreme_positions_realize_without_overflow() {
        let major = get_tonality(TonalityName::Ionian);
        for position in [MAX_CHORD_POSITION, -MAX_CHORD_POSITION] {
            let positioned = PositionedChord::new(ChordFunction::new(6), position);
            let notes = positioned.get_notes(127, major);
            let (low, high) = (notes.iter().min().unwrap(), notes.iter().max().unwrap());
            assert!(high - low < 24, "position {}", position);
            assert!(positioned.top_note() > positioned.bottom_note());
        }
    }

    #[test]
    fn test_roman_numeral_with_inversion() {
        let major = get_tonality(TonalityName::Ionian);
        let chord = ChordFunction::new(3);
        assert_eq!(PositionedChord::new(chord, 0).to_roman_numeral(major).unwrap(), "IV");
        assert_eq!(PositionedChord::new(chord, 4).to_roman_numeral(major).unwrap(), "IV/3");
        assert_eq!(PositionedChord::new(chord, -1).to_roman_numeral(major).unwrap(), "IV/5");
    }
}
