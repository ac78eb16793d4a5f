//! Screen flow and button wiring: the thin session controller.
//!
//! Every game shares the same single-screen shape: a home screen, the
//! game screen, a win screen, and a how-to-play dialog over any of them.
//! The controller routes button events into engine calls and screen
//! changes; it holds no game logic of its own.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::SymbolId;
use crate::engine::{ChallengeEngine, ReplayOutcome, SessionStatus, SubmitOutcome};
use crate::presenter::{PresentationTicket, Presenter};

/// The three screens of a mini-game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Home,
    Game,
    Win,
}

/// UI button events a game surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonEvent {
    /// Start a session from the home screen.
    Start,
    /// Restart the session in place.
    Reset,
    /// Back to the home screen, abandoning the session.
    Menu,
    /// Back to the home screen from the win screen.
    PlayAgain,
    /// Re-present the current target ("listen again").
    Replay,
    /// Open the how-to-play dialog.
    HowToPlay,
    /// Close the how-to-play dialog.
    CloseHelp,
}

/// Wires buttons and input to one engine instance.
pub struct SessionController {
    engine: ChallengeEngine,
    screen: Screen,
    help_open: bool,
}

impl SessionController {
    #[must_use]
    pub fn new(engine: ChallengeEngine) -> Self {
        Self {
            engine,
            screen: Screen::Home,
            help_open: false,
        }
    }

    /// The screen currently shown.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// True while the how-to-play dialog is open.
    #[must_use]
    pub fn help_open(&self) -> bool {
        self.help_open
    }

    /// The engine behind this controller.
    #[must_use]
    pub fn engine(&self) -> &ChallengeEngine {
        &self.engine
    }

    /// Route a button event.
    pub fn handle(&mut self, event: ButtonEvent, presenter: &mut dyn Presenter) {
        match event {
            ButtonEvent::Start => {
                self.screen = Screen::Game;
                self.engine.start_session(presenter);
            }
            ButtonEvent::Reset => {
                if self.screen == Screen::Game {
                    self.engine.start_session(presenter);
                }
            }
            ButtonEvent::Menu | ButtonEvent::PlayAgain => {
                debug!(screen = ?self.screen, "returning home");
                self.screen = Screen::Home;
            }
            ButtonEvent::Replay => {
                let outcome = self.engine.replay(presenter);
                if outcome != ReplayOutcome::Replayed {
                    debug!(?outcome, "replay not granted");
                }
            }
            ButtonEvent::HowToPlay => self.help_open = true,
            ButtonEvent::CloseHelp => self.help_open = false,
        }
    }

    /// Forward a submitted symbol; moves to the win screen when the
    /// session is won.
    pub fn submit(&mut self, choice: SymbolId, presenter: &mut dyn Presenter) -> SubmitOutcome {
        let outcome = self.engine.submit(choice, presenter);
        self.sync_screen();
        outcome
    }

    /// Forward a claimed pairing (drag games); moves to the win screen
    /// when the session is won.
    pub fn submit_pair(
        &mut self,
        item: SymbolId,
        choice: SymbolId,
        presenter: &mut dyn Presenter,
    ) -> SubmitOutcome {
        let outcome = self.engine.submit_pair(item, choice, presenter);
        self.sync_screen();
        outcome
    }

    /// Forward presentation completion from the presenter.
    pub fn presentation_complete(&mut self, ticket: PresentationTicket) {
        self.engine.presentation_complete(ticket);
    }

    fn sync_screen(&mut self) {
        if self.screen == Screen::Game && self.engine.session().status == SessionStatus::Won {
            self.screen = Screen::Win;
        }
    }
}
