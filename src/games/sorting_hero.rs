//! Sorting hero: drag the shown item into the bin the active rule names.
//!
//! Rules cycle with the round index (color, animal/bird, domestic/wild,
//! swimmer/flier) and the item is drawn at random. The round's options
//! are the active rule's two bins, the target is the bin matching the
//! item's attribute, and the prompt is the item itself.

use rustc_hash::FxHashMap;

use crate::core::{
    ConfigError, MatchRule, Pattern, PresentationMode, SessionConfig, SessionRng, SymbolId,
};
use crate::engine::ChallengeEngine;
use crate::geom::Rect;
use crate::rounds::{Round, RoundSource};

// Bin symbols.
pub const BIN_RED: SymbolId = SymbolId::new(0);
pub const BIN_BLUE: SymbolId = SymbolId::new(1);
pub const BIN_ANIMAL: SymbolId = SymbolId::new(2);
pub const BIN_BIRD: SymbolId = SymbolId::new(3);
pub const BIN_DOMESTIC: SymbolId = SymbolId::new(4);
pub const BIN_WILD: SymbolId = SymbolId::new(5);
pub const BIN_SWIMMER: SymbolId = SymbolId::new(6);
pub const BIN_FLIER: SymbolId = SymbolId::new(7);

// Item symbols, offset past the bins.
pub const ITEM_DOG: SymbolId = SymbolId::new(10);
pub const ITEM_CAT: SymbolId = SymbolId::new(11);
pub const ITEM_LION: SymbolId = SymbolId::new(12);
pub const ITEM_BIRD: SymbolId = SymbolId::new(13);
pub const ITEM_FISH: SymbolId = SymbolId::new(14);

/// Rounds needed to win.
pub const TOTAL_ROUNDS: u32 = 10;

/// One sorting rule: a label for the banner and the two bins it offers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub label: &'static str,
    pub attribute: &'static str,
    pub bins: [SymbolId; 2],
}

/// A sortable item: display emoji plus its attribute values.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: SymbolId,
    pub emoji: &'static str,
    pub attrs: FxHashMap<&'static str, SymbolId>,
}

fn item(
    id: SymbolId,
    emoji: &'static str,
    values: [(&'static str, SymbolId); 4],
) -> Item {
    Item {
        id,
        emoji,
        attrs: values.into_iter().collect(),
    }
}

/// The rule table, cycled by round index.
#[must_use]
pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            label: "SORT BY COLOR",
            attribute: "color",
            bins: [BIN_RED, BIN_BLUE],
        },
        Rule {
            label: "SORT: ANIMAL or BIRD",
            attribute: "kind",
            bins: [BIN_ANIMAL, BIN_BIRD],
        },
        Rule {
            label: "SORT: DOMESTIC or WILD",
            attribute: "habitat",
            bins: [BIN_DOMESTIC, BIN_WILD],
        },
        Rule {
            label: "SORT: SWIMMER or FLIER",
            attribute: "ability",
            bins: [BIN_SWIMMER, BIN_FLIER],
        },
    ]
}

/// The item table.
#[must_use]
pub fn items() -> Vec<Item> {
    vec![
        item(
            ITEM_DOG,
            "\u{1F436}",
            [
                ("kind", BIN_ANIMAL),
                ("habitat", BIN_DOMESTIC),
                ("ability", BIN_SWIMMER),
                ("color", BIN_RED),
            ],
        ),
        item(
            ITEM_CAT,
            "\u{1F431}",
            [
                ("kind", BIN_ANIMAL),
                ("habitat", BIN_DOMESTIC),
                ("ability", BIN_SWIMMER),
                ("color", BIN_BLUE),
            ],
        ),
        item(
            ITEM_LION,
            "\u{1F981}",
            [
                ("kind", BIN_ANIMAL),
                ("habitat", BIN_WILD),
                ("ability", BIN_SWIMMER),
                ("color", BIN_RED),
            ],
        ),
        item(
            ITEM_BIRD,
            "\u{1F426}",
            [
                ("kind", BIN_BIRD),
                ("habitat", BIN_WILD),
                ("ability", BIN_FLIER),
                ("color", BIN_BLUE),
            ],
        ),
        item(
            ITEM_FISH,
            "\u{1F41F}",
            [
                ("kind", BIN_ANIMAL),
                ("habitat", BIN_WILD),
                ("ability", BIN_SWIMMER),
                ("color", BIN_RED),
            ],
        ),
    ]
}

/// Cycles rules and draws a random item each round.
#[derive(Clone, Debug)]
pub struct SortingSource {
    rules: Vec<Rule>,
    items: Vec<Item>,
}

impl SortingSource {
    #[must_use]
    pub fn new(rules: Vec<Rule>, items: Vec<Item>) -> Self {
        Self { rules, items }
    }
}

impl RoundSource for SortingSource {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.is_empty() || self.items.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        // Every item must be sortable under every rule.
        for rule in &self.rules {
            for item in &self.items {
                match item.attrs.get(rule.attribute) {
                    None => {
                        return Err(ConfigError::InconsistentTable(format!(
                            "item {} has no '{}' attribute",
                            item.emoji, rule.attribute
                        )))
                    }
                    Some(value) if !rule.bins.contains(value) => {
                        return Err(ConfigError::InconsistentTable(format!(
                            "item {} has a '{}' value outside the rule's bins",
                            item.emoji, rule.attribute
                        )))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    fn round(&mut self, index: u32, rng: &mut SessionRng) -> Round {
        let rule = &self.rules[index as usize % self.rules.len()];
        let item = rng.choose(&self.items).unwrap_or(&self.items[0]);
        // Validation guaranteed the attribute exists and names a bin.
        let correct = *item.attrs.get(rule.attribute).unwrap_or(&rule.bins[0]);
        Round {
            index,
            target: Pattern::single(correct),
            options: rule.bins.to_vec(),
            prompt: Some(item.id),
        }
    }
}

/// The rule a 1-based round index plays under.
#[must_use]
pub fn rule_for_round(index: u32) -> Rule {
    let table = rules();
    table[index as usize % table.len()].clone()
}

/// Which bin a pointer release landed in, if any. A release outside both
/// bins is a miss the presenter shakes off; no attempt reaches the
/// engine.
#[must_use]
pub fn bin_at(px: f32, py: f32, bins: &[(SymbolId, Rect)]) -> Option<SymbolId> {
    bins.iter()
        .find(|(_, rect)| rect.contains_point(px, py))
        .map(|(id, _)| *id)
}

/// Build the game engine.
pub fn engine(rng: SessionRng) -> Result<ChallengeEngine, ConfigError> {
    let config = SessionConfig::new(TOTAL_ROUNDS)
        .with_match_rule(MatchRule::Ordered)
        .with_presentation(PresentationMode::Prompt);
    ChallengeEngine::new(
        config,
        Box::new(SortingSource::new(rules(), items())),
        rng,
    )
}
