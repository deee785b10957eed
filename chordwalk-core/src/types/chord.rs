use crate::error::Result;
use crate::types::roman_numeral::{ChordQuality, RomanNumeral};
use crate::types::tonality::{
    AbsoluteNote, RelativeNote, ScaleDegree, Tonality, SEMITONES_PER_OCTAVE,
};

/// Number of notes in every chord the engine builds.
///
/// The inversion arithmetic (`position mod 3`, `position div 3`) and the
/// voice-leading member scan are both tied to this value.
pub const TRIAD_SIZE: usize = 3;

/// A diatonic triad identified only by the scale degree of its root.
///
/// The triad stacks two scale-degree thirds: `root`, `root + 2`, `root + 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordFunction {
    pub root: ScaleDegree,
}

impl ChordFunction {
    pub fn new(root: ScaleDegree) -> Self {
        ChordFunction { root }
    }

    /// Scale degree of member `index` (0 = root, 1 = third, 2 = fifth)
    pub fn member(&self, index: usize) -> ScaleDegree {
        self.root + 2 * index as ScaleDegree
    }

    /// Scale degrees of root, third and fifth
    pub fn members(&self) -> [ScaleDegree; TRIAD_SIZE] {
        [self.member(0), self.member(1), self.member(2)]
    }

    /// Root-position triad in semitones above the tonic
    pub fn to_triad_notes(&self, tonality: &Tonality) -> [RelativeNote; TRIAD_SIZE] {
        self.members().map(|degree| tonality.get_note(degree))
    }

    /// Classify the triad from its stacked thirds
    pub fn quality(&self, tonality: &Tonality) -> Result<ChordQuality> {
        let notes = self.to_triad_notes(tonality);
        ChordQuality::from_intervals(notes[1] - notes[0], notes[2] - notes[0])
    }

    /// Roman numeral for this chord in `tonality`, e.g. "ii" or "vii⁰"
    pub fn to_roman_numeral(&self, tonality: &Tonality) -> Result<String> {
        Ok(RomanNumeral::analyze(self, tonality, 0)?.to_string())
    }

    /// Realize the triad at `inversion` above `root` with no predecessor to lead from
    pub fn place_canonical(
        &self,
        root: AbsoluteNote,
        tonality: &Tonality,
        inversion: i32,
    ) -> [AbsoluteNote; TRIAD_SIZE] {
        apply_inversion(self.to_triad_notes(tonality), inversion).map(|note| root + note)
    }
}

/// Raise notes by octaves to reach `inversion`.
///
/// Array positions are preserved: index 0 stays the functional root even
/// when it is no longer the lowest pitch. Every full multiple of 3 adds an
/// octave to all notes; the remainder raises that many leading notes by one
/// more octave. Negative inversions lower the chord symmetrically.
pub fn apply_inversion(
    notes: [RelativeNote; TRIAD_SIZE],
    inversion: i32,
) -> [RelativeNote; TRIAD_SIZE] {
    let size = TRIAD_SIZE as i32;
    let octave = inversion.div_euclid(size);
    let normal_inversion = inversion.rem_euclid(size) as usize;
    let mut inverted = notes;
    for (index, note) in inverted.iter_mut().enumerate() {
        let octave_for_note = octave + i32::from(index < normal_inversion);
        *note += SEMITONES_PER_OCTAVE * octave_for_note;
    }
    inverted
}

/// Like [`apply_inversion`], but over the pitches sorted from lowest to highest.
///
/// This reasons about literal bottom and top pitches rather than chord
/// roles: `rotate_chord(notes, 1)` lifts whatever is currently the lowest
/// pitch by an octave.
pub fn rotate_chord(notes: [RelativeNote; TRIAD_SIZE], count: i32) -> [RelativeNote; TRIAD_SIZE] {
    let mut sorted = notes;
    sorted.sort_unstable();
    apply_inversion(sorted, count)
}
