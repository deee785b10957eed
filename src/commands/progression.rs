//! Harmony commands: tonality selection, chord listing and voicing

use crate::commands::{CommandContext, CommandResult};
use crate::display::{chord_color, pitch_names, styled_progression};
use chordwalk_core::types::roman_numeral::decimal_to_roman;
use chordwalk_core::types::{
    get_tonality, ChordFunction, ChordMovement, ChordPosition, ChordProgression,
    PositionedChordProgression, ProgressionVoicing, ScaleDegree, TonalityName, VoicedProgression,
};
use colored::*;
use log::debug;
use rand::Rng;

/// Three octaves either way of the root keeps realized chords inside the MIDI range
const MAX_START_POSITION: ChordPosition = 9;

const VOICE_USAGE: &str =
    "Usage: voice <degrees> [first=<n>] [moves=<u|d...>]\nExample: voice 1 4 5 1 moves=udu";

/// Handle `tonality [name]` command
pub fn cmd_tonality(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Current tonality: {}", ctx.tonality));
    }

    match args.parse::<TonalityName>() {
        Ok(name) => {
            ctx.tonality = name;
            CommandResult::Message(
                format!("🎼 Tonality set to {}", name)
                    .bright_green()
                    .to_string(),
            )
        }
        Err(e) => {
            CommandResult::Error(format!("{}. Use 'tonalities' to see the available ones", e))
        }
    }
}

/// Handle `tonalities` command
pub fn cmd_tonalities(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut output = format!("{}\n", "🎼 Tonalities:".bold());
    for name in TonalityName::ALL {
        let tonality = get_tonality(name);
        let scale: Vec<String> = tonality.scale().iter().map(|s| s.to_string()).collect();
        let marker = if name == ctx.tonality { "*" } else { " " };
        output.push_str(&format!(
            "{} {:<15} {}\n",
            marker,
            tonality.name().cyan(),
            scale.join(" ").dimmed()
        ));
    }
    CommandResult::Message(output.trim_end().to_string())
}

/// Handle `chords` command - the seven diatonic triads of the current tonality
pub fn cmd_chords(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let tonality = get_tonality(ctx.tonality);
    let mut output = format!("{} {}\n", "🎹 Triads in".bold(), tonality.name().bold());

    for degree in 0..7 {
        let chord = ChordFunction::new(degree);
        let numeral = match chord.to_roman_numeral(tonality) {
            Ok(numeral) => numeral,
            Err(e) => return CommandResult::Error(e.to_string()),
        };
        let quality = match chord.quality(tonality) {
            Ok(quality) => quality,
            Err(e) => return CommandResult::Error(e.to_string()),
        };
        let pitches = chord
            .to_triad_notes(tonality)
            .map(|note| ctx.config.root + note);
        output.push_str(&format!(
            "  {}  {:<10} {}\n",
            chord_color(degree, &format!("{:<5}", numeral)),
            quality.name(),
            pitch_names(&pitches)
        ));
    }
    CommandResult::Message(output.trim_end().to_string())
}

/// Handle `voice <degrees> [first=<pos>] [moves=<u|d...>|random]` command
pub fn cmd_voice(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let request = match VoiceRequest::parse(args) {
        Ok(request) => request,
        Err(e) => return CommandResult::Error(e),
    };

    let voicing = request.voicing(&mut rand::thread_rng());
    let progression = ChordProgression::from_degrees(ctx.tonality, &request.degrees);
    let voiced = match VoicedProgression::new(progression, voicing) {
        Ok(voiced) => voiced,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let positioned = PositionedChordProgression::from_voiced_progression(&voiced);
    debug!("voiced {:?}", positioned.chords);

    match describe_voicing(&positioned, &voiced.voicing().chord_movements, ctx) {
        Ok(description) => {
            ctx.progression = Some(positioned);
            CommandResult::Message(description)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn describe_voicing(
    positioned: &PositionedChordProgression,
    movements: &[ChordMovement],
    ctx: &CommandContext,
) -> chordwalk_core::Result<String> {
    let tonality = get_tonality(positioned.tonality);
    let realized = positioned.realize(ctx.config.root);
    let motions = positioned.voice_motions(ctx.config.root);

    let mut output = format!("{}\n", styled_progression(positioned)?);
    for (i, (chord, pitches)) in positioned.chords.iter().zip(&realized).enumerate() {
        let numeral = chord.to_roman_numeral(tonality)?;
        let mut sorted = *pitches;
        sorted.sort_unstable();

        let transition = match i.checked_sub(1) {
            Some(j) => format!("{} ({})", movements[j], motions[j]).dimmed().to_string(),
            None => String::new(),
        };
        output.push_str(&format!(
            "  {} {:<12} {}\n",
            chord_color(chord.chord.root, &format!("{:<6}", numeral)),
            pitch_names(&sorted),
            transition
        ));
    }
    Ok(output.trim_end().to_string())
}

/// Arguments of the `voice` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceRequest {
    /// Zero-based scale degrees
    pub degrees: Vec<ScaleDegree>,
    /// Position of the first chord; random when absent
    pub first: Option<ChordPosition>,
    /// One movement per chord change; random when absent
    pub moves: Option<Vec<ChordMovement>>,
}

impl VoiceRequest {
    pub fn parse(args: &str) -> Result<Self, String> {
        let mut degrees = Vec::new();
        let mut first = None;
        let mut moves: Option<Vec<ChordMovement>> = None;

        let mut tokens = args
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());

        while let Some(token) = tokens.next() {
            if let Some(value) = token.strip_prefix("first=") {
                let position = value
                    .parse::<ChordPosition>()
                    .ok()
                    .filter(|p| (-MAX_START_POSITION..=MAX_START_POSITION).contains(p))
                    .ok_or_else(|| {
                        format!(
                            "Invalid starting position '{}'. Use a value between -{} and {}",
                            value, MAX_START_POSITION, MAX_START_POSITION
                        )
                    })?;
                first = Some(position);
            } else if let Some(value) = token.strip_prefix("moves=") {
                // Everything after `moves=` describes movements
                let rest: Vec<&str> = std::iter::once(value).chain(tokens.by_ref()).collect();
                let rest = rest.concat();
                if rest.eq_ignore_ascii_case("random") {
                    moves = None;
                } else {
                    moves = Some(parse_movements(&rest)?);
                }
            } else {
                degrees.push(parse_degree(token)?);
            }
        }

        if degrees.is_empty() {
            return Err(VOICE_USAGE.to_string());
        }

        Ok(VoiceRequest {
            degrees,
            first,
            moves,
        })
    }

    /// Fill in whatever was left unspecified at random
    pub fn voicing<R: Rng>(&self, rng: &mut R) -> ProgressionVoicing {
        let first = self.first.unwrap_or_else(|| rng.gen_range(0..3));
        let moves = match &self.moves {
            Some(moves) => moves.clone(),
            None => (1..self.degrees.len())
                .map(|_| {
                    if rng.gen_bool(0.5) {
                        ChordMovement::Up
                    } else {
                        ChordMovement::Down
                    }
                })
                .collect(),
        };
        ProgressionVoicing::new(first, moves)
    }
}

/// Parse a 1-based degree number (1-7) or a Roman numeral into a zero-based degree
pub fn parse_degree(token: &str) -> Result<ScaleDegree, String> {
    if let Ok(number) = token.parse::<i32>() {
        return match number {
            1..=7 => Ok(number - 1),
            _ => Err(format!("Degree {} is out of range (1-7)", number)),
        };
    }

    let numeral = token
        .trim_end_matches(['⁰', '°', 'o', '⁺', '+'])
        .to_uppercase();
    (1..=7)
        .find(|&n| decimal_to_roman(n) == Some(numeral.as_str()))
        .map(|n| n - 1)
        .ok_or_else(|| format!("Unknown chord degree '{}'", token))
}

/// Parse movements written as `u`/`d` (or arrows), e.g. "udu"
pub fn parse_movements(text: &str) -> Result<Vec<ChordMovement>, String> {
    text.chars()
        .map(|c| match c {
            'u' | 'U' | '↑' | '+' => Ok(ChordMovement::Up),
            'd' | 'D' | '↓' | '-' => Ok(ChordMovement::Down),
            other => Err(format!("Unknown movement '{}', use 'u' or 'd'", other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_context;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_degree() {
        assert_eq!(parse_degree("1"), Ok(0));
        assert_eq!(parse_degree("7"), Ok(6));
        assert_eq!(parse_degree("IV"), Ok(3));
        assert_eq!(parse_degree("vi"), Ok(5));
        assert_eq!(parse_degree("vii⁰"), Ok(6));
        assert_eq!(parse_degree("III+"), Ok(2));
        assert!(parse_degree("8").is_err());
        assert!(parse_degree("VIII").is_err());
        assert!(parse_degree("x").is_err());
    }

    #[test]
    fn test_parse_movements() {
        use ChordMovement::*;
        assert_eq!(parse_movements("udU↓"), Ok(vec![Up, Down, Up, Down]));
        assert!(parse_movements("ux").is_err());
    }

    #[test]
    fn test_parse_request() {
        use ChordMovement::*;
        let request = VoiceRequest::parse("1, 4 5 1 first=-2 moves=ud u").unwrap();
        assert_eq!(request.degrees, vec![0, 3, 4, 0]);
        assert_eq!(request.first, Some(-2));
        assert_eq!(request.moves, Some(vec![Up, Down, Up]));

        let request = VoiceRequest::parse("I IV moves=random").unwrap();
        assert_eq!(request.moves, None);

        assert!(VoiceRequest::parse("").is_err());
        assert!(VoiceRequest::parse("first=1").is_err());
        assert!(VoiceRequest::parse("1 4 first=x").is_err());
    }

    #[test]
    fn test_starting_position_is_bounded() {
        assert_eq!(VoiceRequest::parse("1 4 first=9").unwrap().first, Some(9));
        assert_eq!(VoiceRequest::parse("1 4 first=-9").unwrap().first, Some(-9));
        assert!(VoiceRequest::parse("1 4 first=10").is_err());
        assert!(VoiceRequest::parse("1 4 first=1000000000 moves=u").is_err());

        let mut ctx = test_context();
        match cmd_voice("1 4 first=1000000000 moves=u", &mut ctx) {
            CommandResult::Error(e) => assert!(e.starts_with("Invalid starting position")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(ctx.progression.is_none());
    }

    #[test]
    fn test_random_voicing_fills_gaps() {
        let request = VoiceRequest::parse("1 6 4 5").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let voicing = request.voicing(&mut rng);
            assert!((0..3).contains(&voicing.first_chord_position));
            assert_eq!(voicing.chord_movements.len(), 3);
        }

        let explicit = VoiceRequest::parse("1 6 first=4 moves=d").unwrap();
        let voicing = explicit.voicing(&mut rng);
        assert_eq!(voicing.first_chord_position, 4);
        assert_eq!(voicing.chord_movements, vec![ChordMovement::Down]);
    }

    #[test]
    fn test_voice_stores_progression() {
        let mut ctx = test_context();
        let result = cmd_voice("1 4 5 first=0 moves=ud", &mut ctx);
        assert!(matches!(result, CommandResult::Message(_)));

        let progression = ctx.progression.expect("progression stored");
        let positions: Vec<i32> = progression.chords.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, -1, -2]);
    }

    #[test]
    fn test_voice_rejects_wrong_movement_count() {
        let mut ctx = test_context();
        match cmd_voice("1 4 5 moves=u", &mut ctx) {
            CommandResult::Error(e) => assert!(e.contains("1 movements")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(ctx.progression.is_none());
    }

    #[test]
    fn test_tonality_command() {
        let mut ctx = test_context();
        assert!(matches!(
            cmd_tonality("harmonic minor", &mut ctx),
            CommandResult::Message(_)
        ));
        assert_eq!(ctx.tonality, TonalityName::HarmonicMinor);

        assert!(matches!(
            cmd_tonality("hungarian", &mut ctx),
            CommandResult::Error(_)
        ));
        assert_eq!(ctx.tonality, TonalityName::HarmonicMinor);
    }

    #[test]
    fn test_chords_lists_all_degrees() {
        let mut ctx = test_context();
        ctx.tonality = TonalityName::HarmonicMinor;
        match cmd_chords("", &mut ctx) {
            CommandResult::Message(msg) => {
                assert!(msg.contains("III⁺"));
                assert!(msg.contains("vii⁰"));
                assert_eq!(msg.lines().count(), 8);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
