//! Standard round sources.
//!
//! Three production rules cover most games:
//! - [`UniformChoice`]: one random correct symbol plus distinct decoys.
//! - [`SequenceRecall`]: a growing random symbol sequence over a tile set.
//! - [`Scripted`]: answers played from a fixed table, decoys from a pool.
//!
//! Games with richer tables (recipes, sorting rules) implement
//! [`RoundSource`](super::RoundSource) themselves in `crate::games`.

use crate::core::{ConfigError, LengthCurve, Pattern, SessionRng, SymbolId};

use super::{Round, RoundSource};

fn distinct_count(pool: &[SymbolId]) -> usize {
    let mut seen: Vec<SymbolId> = Vec::with_capacity(pool.len());
    for &symbol in pool {
        if !seen.contains(&symbol) {
            seen.push(symbol);
        }
    }
    seen.len()
}

/// Shuffled options around one correct symbol: the correct answer plus
/// `choices - 1` distinct decoys drawn without replacement.
fn options_around(
    correct: SymbolId,
    pool: &[SymbolId],
    choices: usize,
    rng: &mut SessionRng,
) -> Vec<SymbolId> {
    let decoy_pool: Vec<SymbolId> = pool.iter().copied().filter(|&s| s != correct).collect();
    // Validation guaranteed enough distinct symbols.
    let decoys = rng
        .sample_distinct(&decoy_pool, choices.saturating_sub(1))
        .unwrap_or_default();
    let mut options = Vec::with_capacity(choices);
    options.push(correct);
    options.extend(decoys);
    rng.shuffle(&mut options);
    options
}

/// Target drawn uniformly from the pool; options are the target plus
/// distinct decoys, shuffled.
#[derive(Clone, Debug)]
pub struct UniformChoice {
    pool: Vec<SymbolId>,
    choices: usize,
}

impl UniformChoice {
    #[must_use]
    pub fn new(pool: Vec<SymbolId>, choices: usize) -> Self {
        Self { pool, choices }
    }
}

impl RoundSource for UniformChoice {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        let available = distinct_count(&self.pool);
        if available < self.choices {
            return Err(ConfigError::NotEnoughChoices {
                requested: self.choices,
                available,
            });
        }
        Ok(())
    }

    fn round(&mut self, index: u32, rng: &mut SessionRng) -> Round {
        let correct = *rng.choose(&self.pool).unwrap_or(&self.pool[0]);
        let options = options_around(correct, &self.pool, self.choices, rng);
        Round {
            index,
            target: Pattern::single(correct),
            options,
            prompt: None,
        }
    }
}

/// A random symbol sequence over a fixed tile set, growing with the round
/// index as `clamp(base + index, min, max)`. Each step is drawn
/// independently and uniformly, with replacement. The options are the tile
/// set itself, in fixed display order.
#[derive(Clone, Debug)]
pub struct SequenceRecall {
    tiles: Vec<SymbolId>,
    curve: LengthCurve,
}

impl SequenceRecall {
    #[must_use]
    pub fn new(tiles: Vec<SymbolId>, curve: LengthCurve) -> Self {
        Self { tiles, curve }
    }
}

impl RoundSource for SequenceRecall {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tiles.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        if distinct_count(&self.tiles) != self.tiles.len() {
            return Err(ConfigError::InconsistentTable(
                "tile set contains duplicate symbols".to_string(),
            ));
        }
        self.curve.validate()
    }

    fn round(&mut self, index: u32, rng: &mut SessionRng) -> Round {
        let length = self.curve.length_for(index) as usize;
        let target: Pattern = (0..length)
            .map(|_| *rng.choose(&self.tiles).unwrap_or(&self.tiles[0]))
            .collect();
        Round {
            index,
            target,
            options: self.tiles.clone(),
            prompt: None,
        }
    }
}

/// Answers played from a fixed table in round order, cycling if the
/// session outruns the table. Decoys come from the pool around each
/// scripted answer.
#[derive(Clone, Debug)]
pub struct Scripted {
    answers: Vec<SymbolId>,
    pool: Vec<SymbolId>,
    choices: usize,
}

impl Scripted {
    #[must_use]
    pub fn new(answers: Vec<SymbolId>, pool: Vec<SymbolId>, choices: usize) -> Self {
        Self {
            answers,
            pool,
            choices,
        }
    }
}

impl RoundSource for Scripted {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.answers.is_empty() {
            return Err(ConfigError::EmptyScript);
        }
        if self.pool.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        let available = distinct_count(&self.pool);
        if available < self.choices {
            return Err(ConfigError::NotEnoughChoices {
                requested: self.choices,
                available,
            });
        }
        Ok(())
    }

    fn round(&mut self, index: u32, rng: &mut SessionRng) -> Round {
        let correct = self.answers[(index as usize - 1) % self.answers.len()];
        let options = options_around(correct, &self.pool, self.choices, rng);
        Round {
            index,
            target: Pattern::single(correct),
            options,
            prompt: None,
        }
    }
}
