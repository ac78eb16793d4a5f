//! Core engine types: symbols, patterns, RNG, configuration, errors.
//!
//! This module contains the fundamental building blocks that are
//! game-agnostic. Games configure these via `SessionConfig` rather than
//! modifying the core.

pub mod config;
pub mod error;
pub mod rng;
pub mod symbol;

pub use config::{
    FeedbackCues, LengthCurve, MatchRule, PresentationMode, SessionConfig, StepTiming, Tone,
};
pub use error::ConfigError;
pub use rng::SessionRng;
pub use symbol::{Pattern, SymbolId};
