//! Rounds and round production.
//!
//! A round is one present/respond/validate cycle: a target pattern, the
//! choices shown to the player, and an optional prompt symbol (the
//! question displayed when the target itself stays hidden, e.g. the color
//! to mix or the item to sort).
//!
//! Round production is behind the [`RoundSource`] trait; games either use
//! a standard source from [`sources`] or implement the trait for their own
//! tables. The engine enforces the round invariants on every produced
//! round: options hold no duplicates and every target symbol is among
//! them, so the correct choice appears exactly once.

pub mod sources;

use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, Pattern, SessionRng, SymbolId};

pub use sources::{Scripted, SequenceRecall, UniformChoice};

/// One challenge round. Replaced wholesale at round start, never mutated
/// mid-round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number.
    pub index: u32,

    /// The pattern the player must reproduce or identify.
    pub target: Pattern,

    /// The candidate symbols presented to the player.
    pub options: Vec<SymbolId>,

    /// The displayed question, for rounds whose target stays hidden
    /// (a result color to mix, an item to sort). `None` when the options
    /// or the demonstration carry the whole question.
    pub prompt: Option<SymbolId>,
}

impl Round {
    /// True if the round upholds the engine invariants: no duplicate
    /// options, and every target symbol present among the options.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let mut seen = Vec::with_capacity(self.options.len());
        for &option in &self.options {
            if seen.contains(&option) {
                return false;
            }
            seen.push(option);
        }
        self.target
            .symbols()
            .iter()
            .all(|symbol| self.options.contains(symbol))
    }
}

/// Produces rounds for a session.
///
/// Implementations hold their own data tables (pools, scripts, recipes)
/// and draw from the engine's RNG so sessions are reproducible under a
/// pinned seed.
pub trait RoundSource {
    /// Validate tables and pool sizes before a session starts.
    ///
    /// Called once at engine construction; failure is fatal and leaves no
    /// session state behind.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Produce the round for a 1-based index.
    fn round(&mut self, index: u32, rng: &mut SessionRng) -> Round;
}
