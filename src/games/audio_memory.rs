//! Audio memory match: repeat a growing tone sequence on a 2x2 tile grid.
//!
//! Each round plays a sequence of tile highlights with tones, then waits
//! for the player to tap it back in order. The sequence grows with the
//! round (`clamp(2 + round, 3, 8)`), tones are reshuffled over the tiles
//! every round, and "listen again" replays the sequence once per round.

use crate::core::{
    ConfigError, FeedbackCues, LengthCurve, MatchRule, PresentationMode, SessionConfig, SessionRng,
    StepTiming, SymbolId, Tone,
};
use crate::engine::ChallengeEngine;
use crate::rounds::SequenceRecall;

/// Tiles on the locked 2x2 grid.
pub const TILE_COUNT: u16 = 4;

/// Rounds needed to win.
pub const TOTAL_ROUNDS: u32 = 10;

/// Distinct tone frequencies the tiles draw from, in hertz.
pub const TONE_POOL_HZ: [f32; 6] = [220.0, 330.0, 440.0, 550.0, 660.0, 770.0];

/// Duration of a tile's tone during playback and input echo.
pub const STEP_TONE_MS: u32 = 250;

/// Buzzer played on a wrong tap.
pub const FAIL_TONE: Tone = Tone::new(120.0, 400);

/// The tile symbols in grid order.
#[must_use]
pub fn tiles() -> Vec<SymbolId> {
    (0..TILE_COUNT).map(SymbolId::new).collect()
}

/// Sequence length growth: starts at 3, caps at 8.
#[must_use]
pub fn length_curve() -> LengthCurve {
    LengthCurve::new(2, 3, 8)
}

/// Build the game engine.
pub fn engine(rng: SessionRng) -> Result<ChallengeEngine, ConfigError> {
    let config = SessionConfig::new(TOTAL_ROUNDS)
        .with_match_rule(MatchRule::Ordered)
        .with_presentation(PresentationMode::Demonstrate)
        .with_timing(StepTiming {
            highlight_ms: 350,
            gap_ms: 150,
        })
        .with_cues(FeedbackCues {
            correct: None,
            incorrect: Some(FAIL_TONE),
        });
    ChallengeEngine::new(
        config,
        Box::new(SequenceRecall::new(tiles(), length_curve())),
        rng,
    )
}

/// The tones assigned to tiles for one round.
///
/// Reshuffled every round so the same tile doesn't keep the same pitch:
/// the pool is shuffled and the first [`TILE_COUNT`] frequencies are
/// dealt to the tiles in grid order.
#[derive(Clone, Debug, PartialEq)]
pub struct ToneAssignment {
    tones: Vec<Tone>,
}

impl ToneAssignment {
    /// Deal a fresh assignment for a round.
    #[must_use]
    pub fn deal(rng: &mut SessionRng) -> Self {
        let mut pool = TONE_POOL_HZ.to_vec();
        rng.shuffle(&mut pool);
        Self {
            tones: pool
                .into_iter()
                .take(TILE_COUNT as usize)
                .map(|freq| Tone::new(freq, STEP_TONE_MS))
                .collect(),
        }
    }

    /// The tone for a tile, if the tile exists.
    #[must_use]
    pub fn tone(&self, tile: SymbolId) -> Option<Tone> {
        self.tones.get(tile.raw() as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{SessionStatus, SubmitOutcome};
    use crate::presenter::RecordingPresenter;

    #[test]
    fn test_round_one_sequence_length() {
        let mut engine = engine(SessionRng::new(42)).unwrap();
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);

        let round = engine.current_round().unwrap();
        assert_eq!(round.target.len(), 3);
        assert_eq!(round.options, tiles());
        // The whole sequence is demonstrated, timed.
        let plan = presenter.last_plan().unwrap();
        assert_eq!(plan.steps.len(), 3);
        assert_eq!(plan.duration_ms(), 3 * (350 + 150));
    }

    #[test]
    fn test_full_session_win() {
        let mut engine = engine(SessionRng::new(42)).unwrap();
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);

        for round_index in 1..=TOTAL_ROUNDS {
            engine.presentation_complete(presenter.last_ticket().unwrap());
            let round = engine.current_round().unwrap();
            assert_eq!(round.index, round_index);
            assert_eq!(
                round.target.len() as u32,
                length_curve().length_for(round_index)
            );
            let target: Vec<SymbolId> = round.target.symbols().to_vec();
            let mut last = SubmitOutcome::Ignored;
            for step in target {
                last = engine.submit(step, &mut presenter);
            }
            assert_eq!(last, SubmitOutcome::Correct);
        }

        assert_eq!(engine.session().status, SessionStatus::Won);
    }

    #[test]
    fn test_tone_assignment_covers_tiles() {
        let mut rng = SessionRng::new(7);
        let assignment = ToneAssignment::deal(&mut rng);

        let mut freqs: Vec<f32> = tiles()
            .into_iter()
            .map(|tile| assignment.tone(tile).unwrap().freq_hz)
            .collect();
        for freq in &freqs {
            assert!(TONE_POOL_HZ.contains(freq));
        }
        freqs.sort_by(f32::total_cmp);
        freqs.dedup();
        assert_eq!(freqs.len(), TILE_COUNT as usize);

        assert_eq!(assignment.tone(SymbolId::new(TILE_COUNT)), None);
    }

    #[test]
    fn test_tone_assignment_is_seed_deterministic() {
        let a = ToneAssignment::deal(&mut SessionRng::new(9));
        let b = ToneAssignment::deal(&mut SessionRng::new(9));
        assert_eq!(a, b);
    }
}
