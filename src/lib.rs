//! # challenge-engine
//!
//! A round-based challenge engine for single-screen mini-games: present a
//! target, collect input, validate, advance, win with confetti.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded symbols, tables, or timings.
//!    Games configure these at startup via `SessionConfig` and a
//!    `RoundSource`.
//!
//! 2. **No Globals**: Every counter and flag lives on an engine instance;
//!    each session owns its own engine and RNG.
//!
//! 3. **Narrow Collaborators**: Rendering, audio, and confetti sit behind
//!    the `Presenter` trait; screen/button plumbing sits in the thin
//!    `SessionController`. The engine never touches a widget.
//!
//! 4. **Deterministic Under Test**: Round generation draws from an
//!    injectable seeded RNG with a proper Fisher-Yates shuffle.
//!
//! ## Modules
//!
//! - `core`: Symbols, patterns, RNG, configuration, errors
//! - `rounds`: Round type, the `RoundSource` trait, standard sources
//! - `engine`: The present/validate/advance state machine
//! - `presenter`: Presenter contract and presentation plans
//! - `flow`: Screens and the thin session controller
//! - `geom`: Rect hit testing for drag-and-drop games
//! - `games`: The five shipped mini-game definitions

pub mod core;
pub mod engine;
pub mod flow;
pub mod games;
pub mod geom;
pub mod presenter;
pub mod rounds;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, FeedbackCues, LengthCurve, MatchRule, Pattern, PresentationMode, SessionConfig,
    SessionRng, StepTiming, SymbolId, Tone,
};

pub use crate::rounds::{Round, RoundSource, Scripted, SequenceRecall, UniformChoice};

pub use crate::engine::{
    AttemptRecord, ChallengeEngine, ReplayOutcome, Session, SessionStatus, SubmitOutcome,
};

pub use crate::presenter::{
    Feedback, PresentStep, PresentationPlan, PresentationTicket, Presenter, PresenterCall,
    RecordingPresenter,
};

pub use crate::flow::{ButtonEvent, Screen, SessionController};

pub use crate::geom::Rect;
