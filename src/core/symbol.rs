//! Symbols and patterns.
//!
//! A symbol is the unit of meaning a game presents and compares: a color,
//! a tone tile, a shape, a sorting bin. The engine never interprets symbol
//! IDs - games assign meaning to them.
//!
//! A pattern is the ordered sequence of symbols a round expects the player
//! to reproduce or identify. A single-choice target is a length-1 pattern.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Symbol identifier. Games define what symbols exist.
///
/// The engine doesn't interpret symbol IDs - they're opaque identifiers
/// compared only for equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u16);

impl SymbolId {
    /// Create a new symbol ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// The target of a round: an ordered sequence of symbols.
///
/// Most rounds use short patterns (a single answer, a pair of ingredients,
/// a tone sequence capped at 8 steps), so the backing store is a `SmallVec`
/// that stays on the stack for the common case.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    steps: SmallVec<[SymbolId; 8]>,
}

impl Pattern {
    /// Create an empty pattern.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single-symbol pattern (single-choice rounds).
    #[must_use]
    pub fn single(symbol: SymbolId) -> Self {
        let mut steps = SmallVec::new();
        steps.push(symbol);
        Self { steps }
    }

    /// Number of steps in the pattern.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the pattern has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the symbol at a step, if any.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<SymbolId> {
        self.steps.get(index).copied()
    }

    /// Append a step to the pattern.
    pub fn push(&mut self, symbol: SymbolId) {
        self.steps.push(symbol);
    }

    /// All steps in order.
    #[must_use]
    pub fn symbols(&self) -> &[SymbolId] {
        &self.steps
    }

    /// True if any step equals the symbol.
    #[must_use]
    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.steps.contains(&symbol)
    }

    /// The pattern's canonical (sorted) form.
    ///
    /// Order-insensitive match rules compare canonical forms, so any
    /// unordered submission of the right symbols matches in exactly one
    /// canonical order.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let mut steps = self.steps.clone();
        steps.sort_unstable();
        Self { steps }
    }
}

impl FromIterator<SymbolId> for Pattern {
    fn from_iter<I: IntoIterator<Item = SymbolId>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl From<&[SymbolId]> for Pattern {
    fn from(symbols: &[SymbolId]) -> Self {
        symbols.iter().copied().collect()
    }
}
