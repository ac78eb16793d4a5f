//! Pattern bridge builder: pick the plank that completes the pattern.
//!
//! Ten fixed levels. Each shows a row of planks with one missing and
//! three color choices; picking the right color fills the gap and walks
//! the robot across. Later levels vary plank size and shape, but the
//! answer is always a color.

use crate::core::{
    ConfigError, FeedbackCues, MatchRule, PresentationMode, SessionConfig, SessionRng, SymbolId,
    Tone,
};
use crate::engine::ChallengeEngine;
use crate::rounds::Scripted;

pub const RED: SymbolId = SymbolId::new(0);
pub const BLUE: SymbolId = SymbolId::new(1);
pub const YELLOW: SymbolId = SymbolId::new(2);
pub const GREEN: SymbolId = SymbolId::new(3);
pub const PURPLE: SymbolId = SymbolId::new(4);

/// Rounds needed to win.
pub const TOTAL_ROUNDS: u32 = 10;

/// Choices offered per level.
pub const CHOICES: usize = 3;

/// Cue for a correct pick.
pub const CORRECT_TONE: Tone = Tone::new(700.0, 200);

/// Cue for a wrong pick.
pub const WRONG_TONE: Tone = Tone::new(180.0, 300);

/// One plank in a level's displayed pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plank {
    pub color: SymbolId,
    pub big: bool,
    pub round: bool,
}

impl Plank {
    #[must_use]
    pub const fn plain(color: SymbolId) -> Self {
        Self {
            color,
            big: false,
            round: false,
        }
    }

    #[must_use]
    pub const fn styled(color: SymbolId, big: bool, round: bool) -> Self {
        Self { color, big, round }
    }
}

/// One level: the shown planks (gap at the end) and the answer color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub planks: Vec<Plank>,
    pub answer: SymbolId,
}

/// The color pool decoys are drawn from.
#[must_use]
pub fn colors() -> Vec<SymbolId> {
    vec![RED, BLUE, YELLOW, GREEN, PURPLE]
}

/// The fixed level table.
#[must_use]
pub fn levels() -> Vec<Level> {
    vec![
        Level {
            planks: vec![Plank::plain(RED), Plank::plain(BLUE), Plank::plain(RED)],
            answer: BLUE,
        },
        Level {
            planks: vec![
                Plank::plain(YELLOW),
                Plank::plain(YELLOW),
                Plank::plain(GREEN),
            ],
            answer: GREEN,
        },
        Level {
            planks: vec![Plank::plain(RED), Plank::plain(BLUE), Plank::plain(YELLOW)],
            answer: RED,
        },
        Level {
            planks: vec![
                Plank::plain(GREEN),
                Plank::plain(PURPLE),
                Plank::plain(GREEN),
            ],
            answer: PURPLE,
        },
        Level {
            planks: vec![Plank::plain(BLUE), Plank::plain(GREEN), Plank::plain(BLUE)],
            answer: GREEN,
        },
        Level {
            planks: vec![
                Plank::styled(RED, true, false),
                Plank::plain(BLUE),
                Plank::styled(RED, true, false),
            ],
            answer: BLUE,
        },
        Level {
            planks: vec![
                Plank::styled(YELLOW, false, true),
                Plank::plain(GREEN),
                Plank::styled(YELLOW, false, true),
            ],
            answer: GREEN,
        },
        Level {
            planks: vec![
                Plank::styled(PURPLE, true, true),
                Plank::plain(RED),
                Plank::styled(PURPLE, true, true),
            ],
            answer: RED,
        },
        Level {
            planks: vec![Plank::plain(RED), Plank::plain(YELLOW), Plank::plain(RED)],
            answer: YELLOW,
        },
        Level {
            planks: vec![Plank::plain(BLUE), Plank::plain(PURPLE), Plank::plain(BLUE)],
            answer: PURPLE,
        },
    ]
}

/// Build the game engine.
pub fn engine(rng: SessionRng) -> Result<ChallengeEngine, ConfigError> {
    let answers = levels().into_iter().map(|level| level.answer).collect();
    let config = SessionConfig::new(TOTAL_ROUNDS)
        .with_match_rule(MatchRule::Ordered)
        .with_presentation(PresentationMode::Prompt)
        .with_cues(FeedbackCues {
            correct: Some(CORRECT_TONE),
            incorrect: Some(WRONG_TONE),
        });
    ChallengeEngine::new(config, Box::new(Scripted::new(answers, colors(), CHOICES)), rng)
}
