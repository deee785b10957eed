//! Terminal presentation of notes and chord numerals

use chordwalk_core::types::{get_tonality, AbsoluteNote, PositionedChordProgression, ScaleDegree};
use chordwalk_core::Result;
use colored::{ColoredString, Colorize};

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const CHORD_SATURATION: f32 = 0.65;
const CHORD_LIGHTNESS: f32 = 0.45;

/// Scientific pitch name of a MIDI note, e.g. 60 -> "C4"
pub fn note_name(pitch: AbsoluteNote) -> String {
    let name = NOTE_NAMES[pitch.rem_euclid(12) as usize];
    let octave = pitch.div_euclid(12) - 1;
    format!("{}{}", name, octave)
}

/// Hue (degrees) that identifies a chord by its scale degree
pub fn hue_for_degree(degree: ScaleDegree) -> f32 {
    degree.rem_euclid(7) as f32 * 360.0 / 7.0 + 10.0
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to RGB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = lightness - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

/// Color `text` with the hue of the chord built on `degree`
pub fn chord_color(degree: ScaleDegree, text: &str) -> ColoredString {
    let (r, g, b) = hsl_to_rgb(hue_for_degree(degree), CHORD_SATURATION, CHORD_LIGHTNESS);
    text.truecolor(r, g, b).bold()
}

/// Positioned progression with each numeral in its chord color
pub fn styled_progression(progression: &PositionedChordProgression) -> Result<String> {
    let tonality = get_tonality(progression.tonality);
    let mut numerals = Vec::with_capacity(progression.len());
    for chord in &progression.chords {
        let numeral = chord.to_roman_numeral(tonality)?;
        numerals.push(chord_color(chord.chord.root, &numeral).to_string());
    }
    Ok(format!("{}: {}", tonality.name().bold(), numerals.join("  ")))
}

/// Pitches as note names, e.g. "C4 E4 G4"
pub fn pitch_names(pitches: &[AbsoluteNote]) -> String {
    pitches
        .iter()
        .map(|&p| note_name(p))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordwalk_core::types::{ChordFunction, PositionedChord, TonalityName};

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(59), "B3");
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(-1), "B-2");
        assert_eq!(pitch_names(&[60, 64, 67]), "C4 E4 G4");
    }

    #[test]
    fn test_hue_for_degree() {
        assert_eq!(hue_for_degree(0), 10.0);
        assert!((hue_for_degree(1) - 61.428_57).abs() < 1e-3);
        assert!((hue_for_degree(6) - 318.571_43).abs() < 1e-3);
        assert_eq!(hue_for_degree(7), hue_for_degree(0));
        assert_eq!(hue_for_degree(-1), hue_for_degree(6));
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), (128, 128, 128));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));

        // Tonic color leans red
        let (r, g, b) = hsl_to_rgb(hue_for_degree(0), CHORD_SATURATION, CHORD_LIGHTNESS);
        assert!(r > g && g > b);
    }

    #[test]
    fn test_styled_progression_keeps_numerals() {
        colored::control::set_override(false);
        let progression = PositionedChordProgression::new(
            TonalityName::Ionian,
            vec![
                PositionedChord::new(ChordFunction::new(0), 0),
                PositionedChord::new(ChordFunction::new(6), 1),
            ],
        );
        assert_eq!(styled_progression(&progression).unwrap(), "Major: I  vii⁰/3");
    }
}
