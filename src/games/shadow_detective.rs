//! Shadow detective: drag each object onto its matching shadow.
//!
//! A round selects `min(2 + round, 6)` items; the objects and their
//! shadows are shuffled independently for display. Each correct drop
//! locks a pair; a wrong drop shakes and leaves earlier matches alone, so
//! the match rule is `UnorderedAny`. The round is won when every pair is
//! locked.

use serde::{Deserialize, Serialize};

use crate::core::{
    ConfigError, FeedbackCues, MatchRule, Pattern, PresentationMode, SessionConfig, SessionRng,
    SymbolId, Tone,
};
use crate::engine::ChallengeEngine;
use crate::geom::Rect;
use crate::rounds::{Round, RoundSource};

/// Rounds needed to win. The selection reaches the full item set at
/// round 4 and stays there.
pub const TOTAL_ROUNDS: u32 = 5;

/// Pop when a pair locks.
pub const POP_TONE: Tone = Tone::new(500.0, 80);

/// Silhouette outline shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Circle,
    Oval,
    Blob,
    Triangle,
    Capsule,
    Hexagon,
}

/// A draggable object and its shadow silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: SymbolId,
    pub name: &'static str,
    pub shape: Shape,
}

/// The full item table.
#[must_use]
pub fn items() -> Vec<Item> {
    vec![
        Item {
            id: SymbolId::new(0),
            name: "cat",
            shape: Shape::Circle,
        },
        Item {
            id: SymbolId::new(1),
            name: "fish",
            shape: Shape::Oval,
        },
        Item {
            id: SymbolId::new(2),
            name: "apple",
            shape: Shape::Blob,
        },
        Item {
            id: SymbolId::new(3),
            name: "bird",
            shape: Shape::Triangle,
        },
        Item {
            id: SymbolId::new(4),
            name: "banana",
            shape: Shape::Capsule,
        },
        Item {
            id: SymbolId::new(5),
            name: "dog",
            shape: Shape::Hexagon,
        },
    ]
}

/// Items in play for a 1-based round index.
#[must_use]
pub fn items_for_round(index: u32, total_items: usize) -> usize {
    ((2 + index) as usize).min(total_items)
}

/// Samples the round's items and shuffles the shadow row.
#[derive(Clone, Debug)]
pub struct ShadowSource {
    ids: Vec<SymbolId>,
}

impl ShadowSource {
    #[must_use]
    pub fn new(items: &[Item]) -> Self {
        Self {
            ids: items.iter().map(|item| item.id).collect(),
        }
    }
}

impl RoundSource for ShadowSource {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.ids.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        Ok(())
    }

    fn round(&mut self, index: u32, rng: &mut SessionRng) -> Round {
        let count = items_for_round(index, self.ids.len());
        // Validation guaranteed a non-empty pool; count never exceeds it.
        let selected = rng.sample_distinct(&self.ids, count).unwrap_or_default();
        let mut shadows = selected.clone();
        rng.shuffle(&mut shadows);
        Round {
            index,
            target: selected.iter().copied().collect::<Pattern>(),
            options: shadows,
            prompt: None,
        }
    }
}

/// Resolve where a dragged object was released: the first shadow its
/// rect overlaps, if any. A release over empty table is no attempt.
#[must_use]
pub fn resolve_drop(dragged: &Rect, shadows: &[(SymbolId, Rect)]) -> Option<SymbolId> {
    shadows
        .iter()
        .find(|(_, rect)| dragged.intersects(rect))
        .map(|(id, _)| *id)
}

/// Build the game engine.
pub fn engine(rng: SessionRng) -> Result<ChallengeEngine, ConfigError> {
    let config = SessionConfig::new(TOTAL_ROUNDS)
        .with_match_rule(MatchRule::UnorderedAny)
        .with_presentation(PresentationMode::Prompt)
        .with_cues(FeedbackCues {
            correct: Some(POP_TONE),
            incorrect: None,
        });
    ChallengeEngine::new(config, Box::new(ShadowSource::new(&items())), rng)
}
