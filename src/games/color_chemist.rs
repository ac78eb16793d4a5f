//! The color chemist: drag two ingredient blobs into the mixer to brew
//! the shown target color.
//!
//! The round target is the recipe's ingredient pair; the prompt is the
//! result color to display over the mixer. Ingredients count in any
//! order, and the attempt is judged only when the mixer holds two blobs,
//! so the match rule is `UnorderedFull`.

use crate::core::{
    ConfigError, FeedbackCues, MatchRule, Pattern, PresentationMode, SessionConfig, SessionRng,
    SymbolId, Tone,
};
use crate::engine::ChallengeEngine;
use crate::rounds::{Round, RoundSource};

pub const RED: SymbolId = SymbolId::new(0);
pub const YELLOW: SymbolId = SymbolId::new(1);
pub const BLUE: SymbolId = SymbolId::new(2);
pub const ORANGE: SymbolId = SymbolId::new(3);
pub const GREEN: SymbolId = SymbolId::new(4);
pub const PURPLE: SymbolId = SymbolId::new(5);

/// Mixes needed to win.
pub const TOTAL_ROUNDS: u32 = 10;

/// Blobs the mixer holds per attempt.
pub const MIXER_CAPACITY: usize = 2;

/// Pop when a blob lands in the mixer.
pub const POP_TONE: Tone = Tone::new(500.0, 80);

/// Cue for a correct mix.
pub const WIN_TONE: Tone = Tone::new(800.0, 150);

/// Cue for a failed mix.
pub const FAIL_TONE: Tone = Tone::new(200.0, 150);

/// A two-ingredient color recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recipe {
    pub inputs: [SymbolId; 2],
    pub result: SymbolId,
}

/// The valid recipes.
#[must_use]
pub fn recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            inputs: [RED, YELLOW],
            result: ORANGE,
        },
        Recipe {
            inputs: [YELLOW, BLUE],
            result: GREEN,
        },
        Recipe {
            inputs: [RED, BLUE],
            result: PURPLE,
        },
    ]
}

/// Draws a recipe uniformly each round. The options are every ingredient
/// appearing in any recipe (the blobs on the bench).
#[derive(Clone, Debug)]
pub struct RecipeSource {
    recipes: Vec<Recipe>,
    ingredients: Vec<SymbolId>,
}

impl RecipeSource {
    #[must_use]
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut ingredients = Vec::new();
        for recipe in &recipes {
            for &input in &recipe.inputs {
                if !ingredients.contains(&input) {
                    ingredients.push(input);
                }
            }
        }
        Self {
            recipes,
            ingredients,
        }
    }
}

impl RoundSource for RecipeSource {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.recipes.is_empty() {
            return Err(ConfigError::EmptyScript);
        }
        for recipe in &self.recipes {
            if recipe.inputs[0] == recipe.inputs[1] {
                return Err(ConfigError::InconsistentTable(format!(
                    "recipe for {} repeats an ingredient",
                    recipe.result
                )));
            }
        }
        Ok(())
    }

    fn round(&mut self, index: u32, rng: &mut SessionRng) -> Round {
        let recipe = *rng.choose(&self.recipes).unwrap_or(&self.recipes[0]);
        Round {
            index,
            target: Pattern::from(&recipe.inputs[..]),
            options: self.ingredients.clone(),
            prompt: Some(recipe.result),
        }
    }
}

/// Build the game engine.
pub fn engine(rng: SessionRng) -> Result<ChallengeEngine, ConfigError> {
    let config = SessionConfig::new(TOTAL_ROUNDS)
        .with_match_rule(MatchRule::UnorderedFull)
        .with_presentation(PresentationMode::Prompt)
        .with_cues(FeedbackCues {
            correct: Some(WIN_TONE),
            incorrect: Some(FAIL_TONE),
        });
    ChallengeEngine::new(config, Box::new(RecipeSource::new(recipes())), rng)
}
