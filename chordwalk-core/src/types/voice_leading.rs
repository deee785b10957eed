//! Voice leading: placing each chord close to its predecessor
//!
//! Placement works in scale-degree space. Moving up, the new chord is
//! inverted so that only its top note rises above the previous chord's top
//! note; moving down, only its bottom note drops below the previous bottom
//! note. The remaining voices sit inside the range the previous chord
//! already covered.

use crate::types::chord::{rotate_chord, ChordFunction, TRIAD_SIZE};
use crate::types::positioned_chord::PositionedChord;
use crate::types::tonality::{AbsoluteNote, SCALE_LENGTH};
use log::trace;
use std::fmt;

/// Direction of the outer voice between two consecutive chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordMovement {
    Up,
    Down,
}

impl ChordMovement {
    pub fn opposite(self) -> Self {
        match self {
            ChordMovement::Up => ChordMovement::Down,
            ChordMovement::Down => ChordMovement::Up,
        }
    }
}

impl fmt::Display for ChordMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordMovement::Up => write!(f, "↑"),
            ChordMovement::Down => write!(f, "↓"),
        }
    }
}

/// Place `chord` next to `previous` in the given direction
pub fn place_chord_with_movement(
    chord: ChordFunction,
    previous: &PositionedChord,
    movement: ChordMovement,
) -> PositionedChord {
    match movement {
        ChordMovement::Up => place_above_chord(chord, previous),
        ChordMovement::Down => place_below_chord(chord, previous),
    }
}

/// Position `chord` so that only its highest note is above the highest note of `target`.
///
/// The chord member closest above the target's top note (a common tone
/// counts as distance 0) becomes the new top note; ties go to the lowest
/// member index. The result may be in any inversion.
pub fn place_above_chord(chord: ChordFunction, target: &PositionedChord) -> PositionedChord {
    let target_note = target.top_note();
    let mut inversion = 0;
    let mut smallest_interval = SCALE_LENGTH;

    for note_index in 0..TRIAD_SIZE {
        let interval = (chord.member(note_index) - target_note).rem_euclid(SCALE_LENGTH);
        if interval < smallest_interval {
            // The member must be rotated into the top slot
            inversion = ((note_index + 1) % TRIAD_SIZE) as i32;
            smallest_interval = interval;
        }
    }

    let top_note = chord.member((2 + inversion as usize) % TRIAD_SIZE);
    let octave = ceil_div(target_note - top_note, SCALE_LENGTH) - i32::from(inversion > 0);
    let placed = PositionedChord::new(chord, TRIAD_SIZE as i32 * octave + inversion);
    trace!(
        "placed degree {} above top {}: position {} (interval {})",
        chord.root,
        target_note,
        placed.position,
        smallest_interval
    );
    placed
}

/// Position `chord` so that only its lowest note is below the lowest note of `target`.
///
/// Mirror image of [`place_above_chord`]: the member closest below the
/// target's bottom note becomes the new bottom note.
pub fn place_below_chord(chord: ChordFunction, target: &PositionedChord) -> PositionedChord {
    let target_note = target.bottom_note();
    let mut inversion = 0;
    let mut smallest_interval = SCALE_LENGTH;

    for note_index in 0..TRIAD_SIZE {
        let interval = (target_note - chord.member(note_index)).rem_euclid(SCALE_LENGTH);
        if interval < smallest_interval {
            inversion = note_index as i32;
            smallest_interval = interval;
        }
    }

    let bottom_note = chord.member(inversion as usize);
    let octave = (target_note - bottom_note).div_euclid(SCALE_LENGTH);
    let placed = PositionedChord::new(chord, TRIAD_SIZE as i32 * octave + inversion);
    trace!(
        "placed degree {} below bottom {}: position {} (interval {})",
        chord.root,
        target_note,
        placed.position,
        smallest_interval
    );
    placed
}

fn ceil_div(numerator: i32, denominator: i32) -> i32 {
    -(-numerator).div_euclid(denominator)
}

/// Motion of the outer voices between two realized chords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMotion {
    /// Semitones moved by the highest pitch (positive = up)
    pub top: i32,
    /// Semitones moved by the lowest pitch (positive = up)
    pub bottom: i32,
    /// Pitches sounding in both chords
    pub common_tones: Vec<AbsoluteNote>,
}

impl VoiceMotion {
    pub fn analyze(from: [AbsoluteNote; TRIAD_SIZE], to: [AbsoluteNote; TRIAD_SIZE]) -> Self {
        let from_sorted = rotate_chord(from, 0);
        let to_sorted = rotate_chord(to, 0);

        let common_tones = to_sorted
            .iter()
            .filter(|note| from_sorted.contains(note))
            .copied()
            .collect();

        VoiceMotion {
            top: to_sorted[TRIAD_SIZE - 1] - from_sorted[TRIAD_SIZE - 1],
            bottom: to_sorted[0] - from_sorted[0],
            common_tones,
        }
    }

    /// Total absolute movement of the outer voices
    pub fn outer_distance(&self) -> i32 {
        self.top.abs() + self.bottom.abs()
    }

    /// The direction the outer voices travelled, if they agree
    pub fn direction(&self) -> Option<ChordMovement> {
        match (self.top.signum(), self.bottom.signum()) {
            (1, b) if b >= 0 => Some(ChordMovement::Up),
            (t, 1) if t >= 0 => Some(ChordMovement::Up),
            (-1, b) if b <= 0 => Some(ChordMovement::Down),
            (t, -1) if t <= 0 => Some(ChordMovement::Down),
            _ => None,
        }
    }
}

impl fmt::Display for VoiceMotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top {:+}, bottom {:+}, {} common",
            self.top,
            self.bottom,
            self.common_tones.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tonality::{get_tonality, ScaleDegree, TonalityName};

    fn positioned(root: ScaleDegree, position: i32) -> PositionedChord {
        PositionedChord::new(ChordFunction::new(root), position)
    }

    #[test]
    fn test_opposite_movement() {
        assert_eq!(ChordMovement::Up.opposite(), ChordMovement::Down);
        assert_eq!(ChordMovement::Down.opposite(), ChordMovement::Up);
    }

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(1, 7), 1);
        assert_eq!(ceil_div(0, 7), 0);
        assert_eq!(ceil_div(-1, 7), 0);
        assert_eq!(ceil_div(-7, 7), -1);
        assert_eq!(ceil_div(-8, 7), -1);
        assert_eq!(ceil_div(7, 7), 1);
    }

    #[test]
    fn test_place_above_tonic_to_subdominant() {
        // C E G -> the closest IV note above G is A, so the chord becomes C F A
        let placed = place_above_chord(ChordFunction::new(3), &positioned(0, 0));
        assert_eq!(placed.position, -1);
        assert_eq!(placed.top_note(), 5);

        let major = get_tonality(TonalityName::Ionian);
        assert_eq!(rotate_chord(placed.get_notes(60, major), 0), [60, 65, 69]);
    }

    #[test]
    fn test_place_above_keeps_common_tone_on_top() {
        // G is shared between I and V: it stays on top, B and D move in beneath it
        let placed = place_above_chord(ChordFunction::new(4), &positioned(0, 0));
        assert_eq!(placed.top_note(), 4);
        assert_eq!(placed.position, -2);

        let major = get_tonality(TonalityName::Ionian);
        assert_eq!(rotate_chord(placed.get_notes(60, major), 0), [59, 62, 67]);
    }

    #[test]
    fn test_place_below_tonic_to_dominant() {
        // C E G -> the closest V note below C is B, giving B D G
        let placed = place_below_chord(ChordFunction::new(4), &positioned(0, 0));
        assert_eq!(placed.bottom_note(), -1);
        assert_eq!(placed.position, -2);

        let major = get_tonality(TonalityName::Ionian);
        assert_eq!(rotate_chord(placed.get_notes(60, major), 0), [59, 62, 67]);
    }

    #[test]
    fn test_place_below_keeps_common_tone_in_bass() {
        // C is shared between I and IV: it stays in the bass under F and A
        let placed = place_below_chord(ChordFunction::new(3), &positioned(0, 0));
        assert_eq!(placed.bottom_note(), 0);
        assert_eq!(placed.position, -1);

        let major = get_tonality(TonalityName::Ionian);
        assert_eq!(rotate_chord(placed.get_notes(60, major), 0), [60, 65, 69]);
    }

    #[test]
    fn test_repeated_chord_stays_put() {
        let tonic = positioned(0, 0);
        assert_eq!(place_above_chord(ChordFunction::new(0), &tonic), tonic);
        assert_eq!(place_below_chord(ChordFunction::new(0), &tonic), tonic);

        let raised = positioned(2, 4);
        assert_eq!(place_above_chord(ChordFunction::new(2), &raised), raised);
        assert_eq!(place_below_chord(ChordFunction::new(2), &raised), raised);
    }

    #[test]
    fn test_above_margin_for_all_pairs() {
        for from_root in -3..10 {
            for position in -5..6 {
                let target = positioned(from_root, position);
                for to_root in -3..10 {
                    let placed = place_above_chord(ChordFunction::new(to_root), &target);
                    let margin = placed.top_note() - target.top_note();
                    assert!((0..SCALE_LENGTH).contains(&margin), "margin {}", margin);
                    let shares_top = ChordFunction::new(to_root)
                        .members()
                        .iter()
                        .any(|m| (m - target.top_note()).rem_euclid(SCALE_LENGTH) == 0);
                    assert_eq!(margin == 0, shares_top);
                }
            }
        }
    }

    #[test]
    fn test_below_margin_for_all_pairs() {
        for from_root in -3..10 {
            for position in -5..6 {
                let target = positioned(from_root, position);
                for to_root in -3..10 {
                    let placed = place_below_chord(ChordFunction::new(to_root), &target);
                    let margin = target.bottom_note() - placed.bottom_note();
                    assert!((0..SCALE_LENGTH).contains(&margin), "margin {}", margin);
                }
            }
        }
    }

    #[test]
    fn test_placement_dispatch() {
        let previous = positioned(0, 0);
        let chord = ChordFunction::new(4);
        assert_eq!(
            place_chord_with_movement(chord, &previous, ChordMovement::Up),
            place_above_chord(chord, &previous)
        );
        assert_eq!(
            place_chord_with_movement(chord, &previous, ChordMovement::Down),
            place_below_chord(chord, &previous)
        );
    }

    #[test]
    fn test_voice_motion() {
        let motion = VoiceMotion::analyze([60, 64, 67], [72, 65, 69]);
        assert_eq!(motion.top, 5);
        assert_eq!(motion.bottom, 5);
        assert!(motion.common_tones.is_empty());
        assert_eq!(motion.direction(), Some(ChordMovement::Up));

        let motion = VoiceMotion::analyze([60, 64, 67], [59, 62, 67]);
        assert_eq!(motion.top, 0);
        assert_eq!(motion.bottom, -1);
        assert_eq!(motion.common_tones, vec![67]);
        assert_eq!(motion.direction(), Some(ChordMovement::Down));
        assert_eq!(motion.outer_distance(), 1);
        assert_eq!(motion.to_string(), "top +0, bottom -1, 1 common");
    }
}
