//! The challenge engine: present, collect input, validate, advance.
//!
//! One engine instance owns one session. All state lives in fields of the
//! instance - no process-wide counters or flags - and every transition
//! happens on a discrete call: a submitted symbol, a completed
//! presentation, a replay request.
//!
//! ## Lifecycle
//!
//! `Idle -> Active` on `start_session`; `Active -> Active` on a correct
//! answer with rounds remaining or on any incorrect answer; `Active ->
//! Won` on a correct answer at the final round. `Won` is terminal until
//! the next `start_session`.
//!
//! ## Input gating
//!
//! Input is accepted only between a completed presentation and the next
//! round. Every issued presentation carries a ticket; only completing the
//! *current* ticket opens the gate, so a superseded presentation (replay
//! during playback, fast round advance) can never open it late.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    ConfigError, MatchRule, Pattern, PresentationMode, SessionConfig, SessionRng, SymbolId,
};
use crate::presenter::{Feedback, PresentationPlan, PresentationTicket, Presenter};
use crate::rounds::{Round, RoundSource};

/// Externally observable session lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
    Won,
}

/// Progress across one run of rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Rounds answered correctly so far. Monotonically non-decreasing,
    /// never exceeds `total_rounds`.
    pub rounds_completed: u32,

    /// Rounds needed to win.
    pub total_rounds: u32,

    /// Lifecycle status. `Won` exactly when
    /// `rounds_completed == total_rounds`.
    pub status: SessionStatus,
}

/// Result of one submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// The full target matched; the session advanced.
    Correct,
    /// The submission mismatched; the attempt reset per match rule.
    Incorrect,
    /// A correct prefix or partial set; awaiting more input.
    Incomplete,
    /// Input arrived while the gate was closed (or after the win).
    /// No state changed.
    Ignored,
}

/// Result of a replay request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayOutcome {
    /// The current target is being re-presented.
    Replayed,
    /// The per-round allowance was already spent.
    AlreadyUsed,
    /// No round is active.
    Unavailable,
}

/// One accepted submission, kept for inspection and telemetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub round: u32,
    pub symbol: SymbolId,
    pub outcome: SubmitOutcome,
}

/// The round-based challenge engine.
///
/// Built from a validated [`SessionConfig`], a [`RoundSource`], and an
/// injectable RNG. The presenter is passed into each call rather than
/// stored, so one engine can drive different frontends.
pub struct ChallengeEngine {
    config: SessionConfig,
    source: Box<dyn RoundSource>,
    rng: SessionRng,
    session: Session,
    round: Option<Round>,
    buffer: SmallVec<[SymbolId; 8]>,
    can_input: bool,
    replay_used: bool,
    ticket: u64,
    history: Vector<AttemptRecord>,
}

impl ChallengeEngine {
    /// Create an engine, validating the configuration and the round
    /// source up front.
    ///
    /// Validation failure is fatal and leaves nothing half-initialized:
    /// no engine, no session.
    pub fn new(
        config: SessionConfig,
        source: Box<dyn RoundSource>,
        rng: SessionRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        source.validate()?;
        let session = Session {
            rounds_completed: 0,
            total_rounds: config.total_rounds,
            status: SessionStatus::Idle,
        };
        Ok(Self {
            config,
            source,
            rng,
            session,
            round: None,
            buffer: SmallVec::new(),
            can_input: false,
            replay_used: false,
            ticket: 0,
            history: Vector::new(),
        })
    }

    /// Current session progress and status.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The round in play, if a session is active.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// True while the engine accepts submissions.
    #[must_use]
    pub fn can_input(&self) -> bool {
        self.can_input
    }

    /// Accepted submissions so far, oldest first. O(1) to clone.
    #[must_use]
    pub fn history(&self) -> &Vector<AttemptRecord> {
        &self.history
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start (or restart) a session: reset progress, generate round 1,
    /// and present it.
    pub fn start_session(&mut self, presenter: &mut dyn Presenter) {
        self.session = Session {
            rounds_completed: 0,
            total_rounds: self.config.total_rounds,
            status: SessionStatus::Active,
        };
        self.history = Vector::new();
        debug!(total_rounds = self.config.total_rounds, "session started");
        presenter.render_progress(0, self.session.total_rounds);
        self.begin_round(1, presenter);
    }

    /// Report that a presentation finished. Opens the input gate only if
    /// the ticket is current; a superseded presentation is ignored.
    pub fn presentation_complete(&mut self, ticket: PresentationTicket) {
        if ticket.0 == self.ticket && self.session.status == SessionStatus::Active {
            self.can_input = true;
        }
    }

    /// Re-present the current target without penalty, at most once per
    /// round. Typed input is preserved.
    pub fn replay(&mut self, presenter: &mut dyn Presenter) -> ReplayOutcome {
        if self.session.status != SessionStatus::Active || self.round.is_none() {
            return ReplayOutcome::Unavailable;
        }
        if self.replay_used {
            debug!("replay rejected, allowance spent");
            return ReplayOutcome::AlreadyUsed;
        }
        self.replay_used = true;
        self.present_current(presenter);
        ReplayOutcome::Replayed
    }

    /// Submit one symbol against the current round.
    ///
    /// Under `MatchRule::UnorderedAny` this is shorthand for
    /// [`ChallengeEngine::submit_pair`] with the symbol paired to itself.
    pub fn submit(&mut self, choice: SymbolId, presenter: &mut dyn Presenter) -> SubmitOutcome {
        if self.config.match_rule == MatchRule::UnorderedAny {
            return self.submit_pair(choice, choice, presenter);
        }
        if !self.gate_open() {
            return SubmitOutcome::Ignored;
        }
        let Some(round) = self.round.as_ref() else {
            return SubmitOutcome::Ignored;
        };
        let target = round.target.clone();
        if self.config.match_rule == MatchRule::Ordered {
            self.submit_ordered(choice, &target, presenter)
        } else {
            self.submit_unordered_full(choice, &target, presenter)
        }
    }

    /// Submit a claimed pairing (dragged item, drop target) under
    /// `MatchRule::UnorderedAny`. A pairing is correct when both sides
    /// are the same not-yet-matched target symbol; a wrong pairing leaves
    /// earlier matches in place. Under other match rules the call is
    /// ignored.
    pub fn submit_pair(
        &mut self,
        item: SymbolId,
        choice: SymbolId,
        presenter: &mut dyn Presenter,
    ) -> SubmitOutcome {
        if self.config.match_rule != MatchRule::UnorderedAny || !self.gate_open() {
            return SubmitOutcome::Ignored;
        }
        let Some(round) = self.round.as_ref() else {
            return SubmitOutcome::Ignored;
        };
        let target = round.target.clone();
        if self.buffer.contains(&item) {
            // Already matched; like dropping a locked piece.
            return SubmitOutcome::Ignored;
        }
        if item == choice && target.contains(item) {
            self.buffer.push(item);
            presenter.feedback(&Feedback::Correct {
                tone: self.config.cues.correct,
            });
            if self.buffer.len() == target.len() {
                self.record(item, SubmitOutcome::Correct);
                self.complete_round(presenter);
                SubmitOutcome::Correct
            } else {
                self.record(item, SubmitOutcome::Incomplete);
                SubmitOutcome::Incomplete
            }
        } else {
            self.record(choice, SubmitOutcome::Incorrect);
            presenter.feedback(&Feedback::Incorrect {
                tone: self.config.cues.incorrect,
            });
            SubmitOutcome::Incorrect
        }
    }

    fn gate_open(&self) -> bool {
        self.can_input && self.session.status == SessionStatus::Active
    }

    fn submit_ordered(
        &mut self,
        choice: SymbolId,
        target: &Pattern,
        presenter: &mut dyn Presenter,
    ) -> SubmitOutcome {
        let step = self.buffer.len();
        if target.step(step) == Some(choice) {
            self.buffer.push(choice);
            if self.buffer.len() == target.len() {
                self.record(choice, SubmitOutcome::Correct);
                presenter.feedback(&Feedback::Correct {
                    tone: self.config.cues.correct,
                });
                self.complete_round(presenter);
                SubmitOutcome::Correct
            } else {
                self.record(choice, SubmitOutcome::Incomplete);
                SubmitOutcome::Incomplete
            }
        } else {
            self.record(choice, SubmitOutcome::Incorrect);
            presenter.feedback(&Feedback::Incorrect {
                tone: self.config.cues.incorrect,
            });
            self.buffer.clear();
            // A demonstrated sequence is replayed after a miss, free of
            // the replay allowance.
            if self.config.presentation == PresentationMode::Demonstrate && target.len() > 1 {
                self.present_current(presenter);
            }
            SubmitOutcome::Incorrect
        }
    }

    fn submit_unordered_full(
        &mut self,
        choice: SymbolId,
        target: &Pattern,
        presenter: &mut dyn Presenter,
    ) -> SubmitOutcome {
        self.buffer.push(choice);
        if self.buffer.len() < target.len() {
            self.record(choice, SubmitOutcome::Incomplete);
            return SubmitOutcome::Incomplete;
        }
        let submitted: Pattern = self.buffer.iter().copied().collect();
        if submitted.canonical() == target.canonical() {
            self.record(choice, SubmitOutcome::Correct);
            presenter.feedback(&Feedback::Correct {
                tone: self.config.cues.correct,
            });
            self.complete_round(presenter);
            SubmitOutcome::Correct
        } else {
            self.record(choice, SubmitOutcome::Incorrect);
            presenter.feedback(&Feedback::Incorrect {
                tone: self.config.cues.incorrect,
            });
            self.buffer.clear();
            SubmitOutcome::Incorrect
        }
    }

    fn record(&mut self, symbol: SymbolId, outcome: SubmitOutcome) {
        let round = self.round.as_ref().map_or(0, |r| r.index);
        self.history.push_back(AttemptRecord {
            round,
            symbol,
            outcome,
        });
    }

    fn complete_round(&mut self, presenter: &mut dyn Presenter) {
        self.session.rounds_completed += 1;
        self.buffer.clear();
        self.can_input = false;
        presenter.render_progress(self.session.rounds_completed, self.session.total_rounds);
        if self.session.rounds_completed == self.session.total_rounds {
            self.session.status = SessionStatus::Won;
            self.round = None;
            debug!(
                rounds = self.session.total_rounds,
                "session won"
            );
            presenter.feedback(&Feedback::SessionWon);
        } else {
            let next = self.session.rounds_completed + 1;
            self.begin_round(next, presenter);
        }
    }

    fn begin_round(&mut self, index: u32, presenter: &mut dyn Presenter) {
        let round = self.source.round(index, &mut self.rng);
        assert!(
            round.invariants_hold(),
            "round source produced an invalid round (duplicate options or target not offered)"
        );
        debug!(round = index, steps = round.target.len(), "round generated");
        self.buffer.clear();
        self.replay_used = false;
        presenter.render_choices(&round.options);
        self.round = Some(round);
        self.present_current(presenter);
    }

    fn present_current(&mut self, presenter: &mut dyn Presenter) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        let plan = PresentationPlan::for_round(round, self.config.presentation, self.config.timing);
        self.ticket += 1;
        self.can_input = false;
        presenter.present(PresentationTicket(self.ticket), &plan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LengthCurve;
    use crate::presenter::RecordingPresenter;
    use crate::rounds::{SequenceRecall, UniformChoice};

    fn sym(id: u16) -> SymbolId {
        SymbolId::new(id)
    }

    fn pool(count: u16) -> Vec<SymbolId> {
        (0..count).map(SymbolId::new).collect()
    }

    fn single_choice_engine(total_rounds: u32) -> ChallengeEngine {
        ChallengeEngine::new(
            SessionConfig::new(total_rounds),
            Box::new(UniformChoice::new(pool(5), 3)),
            SessionRng::new(42),
        )
        .unwrap()
    }

    fn complete_presentation(engine: &mut ChallengeEngine, presenter: &RecordingPresenter) {
        engine.presentation_complete(presenter.last_ticket().unwrap());
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = single_choice_engine(3);
        assert_eq!(engine.session().status, SessionStatus::Idle);
        assert_eq!(engine.session().rounds_completed, 0);
        assert!(engine.current_round().is_none());
        assert!(!engine.can_input());
    }

    #[test]
    fn test_invalid_config_builds_no_engine() {
        let result = ChallengeEngine::new(
            SessionConfig::new(0),
            Box::new(UniformChoice::new(pool(5), 3)),
            SessionRng::new(42),
        );
        assert_eq!(result.err(), Some(ConfigError::ZeroRounds));

        let result = ChallengeEngine::new(
            SessionConfig::new(10),
            Box::new(UniformChoice::new(pool(2), 3)),
            SessionRng::new(42),
        );
        assert_eq!(
            result.err(),
            Some(ConfigError::NotEnoughChoices {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_start_session_presents_round_one() {
        let mut engine = single_choice_engine(3);
        let mut presenter = RecordingPresenter::new();

        engine.start_session(&mut presenter);

        assert_eq!(engine.session().status, SessionStatus::Active);
        let round = engine.current_round().unwrap();
        assert_eq!(round.index, 1);
        assert!(presenter.last_ticket().is_some());
        // Gate stays closed until the presentation completes.
        assert!(!engine.can_input());
        assert_eq!(
            engine.submit(round.options[0], &mut presenter),
            SubmitOutcome::Ignored
        );
    }

    #[test]
    fn test_correct_answer_advances() {
        let mut engine = single_choice_engine(3);
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);
        complete_presentation(&mut engine, &presenter);

        let answer = engine.current_round().unwrap().target.step(0).unwrap();
        assert_eq!(engine.submit(answer, &mut presenter), SubmitOutcome::Correct);
        assert_eq!(engine.session().rounds_completed, 1);
        assert_eq!(engine.current_round().unwrap().index, 2);
    }

    #[test]
    fn test_incorrect_single_choice_self_loops() {
        let mut engine = single_choice_engine(3);
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);
        complete_presentation(&mut engine, &presenter);

        let round = engine.current_round().unwrap();
        let answer = round.target.step(0).unwrap();
        let wrong = *round
            .options
            .iter()
            .find(|&&option| option != answer)
            .unwrap();

        assert_eq!(engine.submit(wrong, &mut presenter), SubmitOutcome::Incorrect);
        assert_eq!(engine.session().rounds_completed, 0);
        assert_eq!(engine.current_round().unwrap().index, 1);
        assert!(engine.can_input());

        // The same round is still winnable.
        assert_eq!(engine.submit(answer, &mut presenter), SubmitOutcome::Correct);
        assert_eq!(engine.session().rounds_completed, 1);
    }

    #[test]
    fn test_win_is_terminal() {
        let mut engine = single_choice_engine(2);
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);

        for _ in 0..2 {
            complete_presentation(&mut engine, &presenter);
            let answer = engine.current_round().unwrap().target.step(0).unwrap();
            engine.submit(answer, &mut presenter);
        }

        assert_eq!(engine.session().status, SessionStatus::Won);
        assert_eq!(engine.session().rounds_completed, 2);
        assert!(engine.current_round().is_none());
        assert!(presenter.feedback_log().contains(&Feedback::SessionWon));

        // Input after the win changes nothing.
        assert_eq!(engine.submit(sym(0), &mut presenter), SubmitOutcome::Ignored);
        assert_eq!(engine.session().status, SessionStatus::Won);

        // A fresh session leaves the terminal state.
        engine.start_session(&mut presenter);
        assert_eq!(engine.session().status, SessionStatus::Active);
        assert_eq!(engine.session().rounds_completed, 0);
    }

    #[test]
    fn test_replay_once_per_round() {
        let mut engine = ChallengeEngine::new(
            SessionConfig::new(3).with_presentation(PresentationMode::Demonstrate),
            Box::new(SequenceRecall::new(pool(4), LengthCurve::new(2, 3, 8))),
            SessionRng::new(42),
        )
        .unwrap();
        let mut presenter = RecordingPresenter::new();

        assert_eq!(engine.replay(&mut presenter), ReplayOutcome::Unavailable);

        engine.start_session(&mut presenter);
        assert_eq!(engine.replay(&mut presenter), ReplayOutcome::Replayed);
        assert_eq!(engine.replay(&mut presenter), ReplayOutcome::AlreadyUsed);

        // Completing the whole sequence advances and resets the allowance.
        complete_presentation(&mut engine, &presenter);
        let target: Vec<SymbolId> = engine
            .current_round()
            .unwrap()
            .target
            .symbols()
            .to_vec();
        for step in target {
            engine.submit(step, &mut presenter);
        }
        assert_eq!(engine.current_round().unwrap().index, 2);
        assert_eq!(engine.replay(&mut presenter), ReplayOutcome::Replayed);
    }

    #[test]
    fn test_stale_ticket_does_not_open_gate() {
        let mut engine = ChallengeEngine::new(
            SessionConfig::new(3).with_presentation(PresentationMode::Demonstrate),
            Box::new(SequenceRecall::new(pool(4), LengthCurve::new(2, 3, 8))),
            SessionRng::new(42),
        )
        .unwrap();
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);

        let stale = presenter.last_ticket().unwrap();
        // A replay supersedes the first presentation.
        engine.replay(&mut presenter);
        engine.presentation_complete(stale);
        assert!(!engine.can_input());

        engine.presentation_complete(presenter.last_ticket().unwrap());
        assert!(engine.can_input());
    }

    #[test]
    fn test_sequence_mismatch_clears_buffer_and_replays() {
        let mut engine = ChallengeEngine::new(
            SessionConfig::new(3).with_presentation(PresentationMode::Demonstrate),
            Box::new(SequenceRecall::new(pool(4), LengthCurve::new(2, 3, 8))),
            SessionRng::new(42),
        )
        .unwrap();
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);
        complete_presentation(&mut engine, &presenter);

        let target: Vec<SymbolId> = engine
            .current_round()
            .unwrap()
            .target
            .symbols()
            .to_vec();
        let wrong = *pool(4)
            .iter()
            .find(|&&tile| tile != target[0])
            .unwrap();

        let presentations_before = presenter
            .calls
            .iter()
            .filter(|c| matches!(c, crate::presenter::PresenterCall::Present { .. }))
            .count();

        assert_eq!(engine.submit(wrong, &mut presenter), SubmitOutcome::Incorrect);
        assert_eq!(engine.current_round().unwrap().index, 1);
        // The sequence is replayed and the gate closes until it finishes.
        assert!(!engine.can_input());
        let presentations_after = presenter
            .calls
            .iter()
            .filter(|c| matches!(c, crate::presenter::PresenterCall::Present { .. }))
            .count();
        assert_eq!(presentations_after, presentations_before + 1);

        // The free replay does not consume the allowance.
        assert_eq!(engine.replay(&mut presenter), ReplayOutcome::Replayed);

        // After the replay the full target still wins the round.
        complete_presentation(&mut engine, &presenter);
        let mut last = SubmitOutcome::Ignored;
        for step in target {
            last = engine.submit(step, &mut presenter);
        }
        assert_eq!(last, SubmitOutcome::Correct);
        assert_eq!(engine.session().rounds_completed, 1);
    }

    #[test]
    fn test_history_records_attempts() {
        let mut engine = single_choice_engine(2);
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);
        complete_presentation(&mut engine, &presenter);

        let answer = engine.current_round().unwrap().target.step(0).unwrap();
        engine.submit(answer, &mut presenter);

        let history = engine.history();
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0],
            AttemptRecord {
                round: 1,
                symbol: answer,
                outcome: SubmitOutcome::Correct
            }
        );

        // Ignored input leaves no record.
        engine.submit(answer, &mut presenter);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_restart_clears_history() {
        let mut engine = single_choice_engine(2);
        let mut presenter = RecordingPresenter::new();
        engine.start_session(&mut presenter);
        complete_presentation(&mut engine, &presenter);
        let answer = engine.current_round().unwrap().target.step(0).unwrap();
        engine.submit(answer, &mut presenter);
        assert_eq!(engine.history().len(), 1);

        engine.start_session(&mut presenter);
        assert!(engine.history().is_empty());
        assert_eq!(engine.session().rounds_completed, 0);
    }
}
