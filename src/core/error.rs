//! Configuration errors.
//!
//! The only fatal error surface is session setup: a bad round count,
//! a choice pool too small for the requested decoys, or an inconsistent
//! game table. These fail before any session state is touched.
//!
//! Everything at play time is an ordinary outcome, not an error:
//! a mismatched answer is `SubmitOutcome::Incorrect` and input while the
//! gate is closed is `SubmitOutcome::Ignored`.

use thiserror::Error;

/// Invalid session or round-source setup.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A session must run at least one round.
    #[error("session must have at least one round")]
    ZeroRounds,

    /// The choice pool has no symbols.
    #[error("choice pool is empty")]
    EmptyPool,

    /// Decoy sampling needs at least as many distinct pool symbols as
    /// choices per round.
    #[error("{requested} choices requested but pool has only {available} distinct symbols")]
    NotEnoughChoices { requested: usize, available: usize },

    /// Length growth bounds are unusable.
    #[error("length bounds are invalid: min {min}, max {max}")]
    BadLengthBounds { min: u32, max: u32 },

    /// A scripted round table has no entries.
    #[error("scripted round table is empty")]
    EmptyScript,

    /// A game data table is internally inconsistent.
    #[error("game table is inconsistent: {0}")]
    InconsistentTable(String),
}
