//! Presenter contract: the rendering/audio collaborator.
//!
//! The engine owns game state; everything visual or audible goes through
//! this narrow interface. Presentation of a multi-step target is handed
//! over as an explicit [`PresentationPlan`] - an ordered list of timed
//! steps - instead of a chain of nested timer callbacks. The presenter
//! runs the plan on whatever clock it has (requestAnimationFrame, a TUI
//! tick, a test that skips time) and reports completion with the plan's
//! ticket; stale tickets are discarded by the engine, which is what keeps
//! a single presentation in flight per session.

use serde::{Deserialize, Serialize};

use crate::core::{Pattern, PresentationMode, StepTiming, SymbolId, Tone};
use crate::rounds::Round;

/// Identifies one issued presentation. Monotonically increasing per
/// engine; only the latest ticket opens the input gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresentationTicket(pub u64);

/// One presentation step: highlight a symbol, then pause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentStep {
    pub symbol: SymbolId,
    pub highlight_ms: u32,
    pub gap_ms: u32,
}

/// The explicit, ordered step sequence for presenting a round.
///
/// May be empty for rounds whose question is carried entirely by the
/// rendered choices; the presenter still reports completion so the input
/// gate opens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationPlan {
    pub steps: Vec<PresentStep>,
}

impl PresentationPlan {
    /// Build the plan for a round under the configured mode and timing.
    #[must_use]
    pub fn for_round(round: &Round, mode: PresentationMode, timing: StepTiming) -> Self {
        match mode {
            PresentationMode::Demonstrate => Self::for_pattern(&round.target, timing),
            PresentationMode::Prompt => Self {
                steps: round
                    .prompt
                    .map(|symbol| PresentStep {
                        symbol,
                        highlight_ms: timing.highlight_ms,
                        gap_ms: timing.gap_ms,
                    })
                    .into_iter()
                    .collect(),
            },
        }
    }

    /// One timed step per pattern symbol.
    #[must_use]
    pub fn for_pattern(pattern: &Pattern, timing: StepTiming) -> Self {
        Self {
            steps: pattern
                .symbols()
                .iter()
                .map(|&symbol| PresentStep {
                    symbol,
                    highlight_ms: timing.highlight_ms,
                    gap_ms: timing.gap_ms,
                })
                .collect(),
        }
    }

    /// Total scheduled duration of the plan in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        self.steps
            .iter()
            .map(|s| s.highlight_ms + s.gap_ms)
            .sum()
    }
}

/// Outcome feedback sent to the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Feedback {
    /// A full correct answer, with an optional audio cue.
    Correct { tone: Option<Tone> },
    /// A wrong answer, with an optional audio cue.
    Incorrect { tone: Option<Tone> },
    /// The session is won; time for confetti.
    SessionWon,
}

/// The rendering/audio collaborator consumed by the engine.
///
/// Implementations draw tiles, planks, blobs and shadows, synthesize
/// tones, and animate confetti; none of that lives in the engine.
pub trait Presenter {
    /// Run a presentation plan, then report completion via
    /// `ChallengeEngine::presentation_complete` with the same ticket.
    fn present(&mut self, ticket: PresentationTicket, plan: &PresentationPlan);

    /// Render the round's candidate choices.
    fn render_choices(&mut self, options: &[SymbolId]);

    /// Show visual/audio feedback for an outcome.
    fn feedback(&mut self, feedback: &Feedback);

    /// Update the round progress display.
    fn render_progress(&mut self, completed: u32, total: u32);
}

/// A presenter that records every call, for tests and headless drivers.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
}

/// One recorded presenter call.
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterCall {
    Present {
        ticket: PresentationTicket,
        plan: PresentationPlan,
    },
    RenderChoices(Vec<SymbolId>),
    Feedback(Feedback),
    RenderProgress {
        completed: u32,
        total: u32,
    },
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently issued presentation ticket, if any.
    #[must_use]
    pub fn last_ticket(&self) -> Option<PresentationTicket> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::Present { ticket, .. } => Some(*ticket),
            _ => None,
        })
    }

    /// The most recently presented plan, if any.
    #[must_use]
    pub fn last_plan(&self) -> Option<&PresentationPlan> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::Present { plan, .. } => Some(plan),
            _ => None,
        })
    }

    /// All feedback calls, in order.
    #[must_use]
    pub fn feedback_log(&self) -> Vec<Feedback> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Feedback(feedback) => Some(*feedback),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, ticket: PresentationTicket, plan: &PresentationPlan) {
        self.calls.push(PresenterCall::Present {
            ticket,
            plan: plan.clone(),
        });
    }

    fn render_choices(&mut self, options: &[SymbolId]) {
        self.calls.push(PresenterCall::RenderChoices(options.to_vec()));
    }

    fn feedback(&mut self, feedback: &Feedback) {
        self.calls.push(PresenterCall::Feedback(*feedback));
    }

    fn render_progress(&mut self, completed: u32, total: u32) {
        self.calls
            .push(PresenterCall::RenderProgress { completed, total });
    }
}
