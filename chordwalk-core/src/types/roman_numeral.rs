//! Triad qualities and Roman numeral notation

use crate::error::{Result, TheoryError};
use crate::types::chord::ChordFunction;
use crate::types::tonality::{ScaleDegree, Tonality};
use std::fmt;

/// Quality of a triad, determined by its stacked thirds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordQuality {
    Major,      // I, IV, V
    Minor,      // ii, iii, vi
    Augmented,  // III⁺
    Diminished, // vii⁰
}

impl ChordQuality {
    /// Classify a triad from the semitone distances of its third and fifth above the root
    pub fn from_intervals(third: i32, fifth: i32) -> Result<Self> {
        match (third, fifth) {
            (3, 6) => Ok(ChordQuality::Diminished),
            (3, 7) => Ok(ChordQuality::Minor),
            (4, 7) => Ok(ChordQuality::Major),
            (4, 8) => Ok(ChordQuality::Augmented),
            _ => Err(TheoryError::UnsupportedChordShape { third, fifth }),
        }
    }

    /// Upper-case numerals for major-third chords
    pub fn is_upper_case(&self) -> bool {
        matches!(self, ChordQuality::Major | ChordQuality::Augmented)
    }

    /// Mark appended after the numeral
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Diminished => "⁰",
            ChordQuality::Augmented => "⁺",
            ChordQuality::Major | ChordQuality::Minor => "",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Augmented => "augmented",
            ChordQuality::Diminished => "diminished",
        }
    }
}

const DECIMAL_TO_ROMAN: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Upper-case numeral for a 1-based degree number
pub fn decimal_to_roman(number: i32) -> Option<&'static str> {
    usize::try_from(number - 1)
        .ok()
        .and_then(|index| DECIMAL_TO_ROMAN.get(index))
        .copied()
}

/// Roman numeral analysis of a triad in a tonality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomanNumeral {
    pub degree: ScaleDegree,
    pub quality: ChordQuality,
    /// 0 = root position, 1 = first inversion, 2 = second inversion
    pub inversion: u8,
    numeral: &'static str,
}

impl RomanNumeral {
    /// Analyze `chord` in `tonality` at the given inversion (taken mod 3)
    pub fn analyze(chord: &ChordFunction, tonality: &Tonality, inversion: i32) -> Result<Self> {
        let numeral =
            decimal_to_roman(chord.root + 1).ok_or(TheoryError::NoNotationForDegree(chord.root))?;
        let quality = chord.quality(tonality)?;

        Ok(RomanNumeral {
            degree: chord.root,
            quality,
            inversion: inversion.rem_euclid(3) as u8,
            numeral,
        })
    }

    /// Figure for the inversion: "/3" when the third is in the bass, "/5" for the fifth
    pub fn inversion_suffix(&self) -> String {
        match self.inversion {
            0 => String::new(),
            inversion => format!("/{}", inversion * 2 + 1),
        }
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quality.is_upper_case() {
            write!(f, "{}", self.numeral)?;
        } else {
            write!(f, "{}", self.numeral.to_lowercase())?;
        }
        write!(f, "{}{}", self.quality.suffix(), self.inversion_suffix())
    }
}
