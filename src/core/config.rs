//! Session configuration types.
//!
//! Games configure the engine at startup by providing a `SessionConfig`:
//! how many rounds a session runs, how submissions are judged, how a
//! pattern is shown, and what audio cues accompany outcomes. The engine
//! never hardcodes a game's structure - games define it.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How submitted symbols are judged against the round target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchRule {
    /// Step-by-step prefix equality; a mismatch resets the attempt.
    /// (Tone sequences, and the degenerate single-answer case.)
    #[default]
    Ordered,
    /// Judged only once the buffer reaches target length, compared in
    /// canonical order; a mismatch clears the buffer. (Mix two
    /// ingredients, then press mix.)
    UnorderedFull,
    /// Each submission must pair an unmatched target member with itself;
    /// wrong pairs don't disturb earlier matches. (Drag each object onto
    /// its own shadow.)
    UnorderedAny,
}

/// How a round's target is shown before input opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationMode {
    /// Play the target itself as a timed step sequence (memory games).
    Demonstrate,
    /// Show only the round's prompt symbol; the target stays hidden.
    #[default]
    Prompt,
}

/// Timing for one presented step: highlight, then a gap before the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTiming {
    pub highlight_ms: u32,
    pub gap_ms: u32,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self {
            highlight_ms: 350,
            gap_ms: 150,
        }
    }
}

/// An audio cue: a plain oscillator tone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_ms: u32,
}

impl Tone {
    #[must_use]
    pub const fn new(freq_hz: f32, duration_ms: u32) -> Self {
        Self {
            freq_hz,
            duration_ms,
        }
    }
}

/// Audio cues attached to outcome feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackCues {
    pub correct: Option<Tone>,
    pub incorrect: Option<Tone>,
}

/// Pattern length growth across rounds: `clamp(base + round, min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthCurve {
    pub base: u32,
    pub min: u32,
    pub max: u32,
}

impl LengthCurve {
    #[must_use]
    pub const fn new(base: u32, min: u32, max: u32) -> Self {
        Self { base, min, max }
    }

    /// Pattern length for a 1-based round index.
    #[must_use]
    pub fn length_for(&self, round_index: u32) -> u32 {
        (self.base + round_index).clamp(self.min, self.max)
    }

    /// Check the bounds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min == 0 || self.min > self.max {
            return Err(ConfigError::BadLengthBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Complete session configuration.
///
/// Games provide this when building a [`crate::engine::ChallengeEngine`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Rounds needed to win the session.
    pub total_rounds: u32,

    /// How submissions are judged.
    pub match_rule: MatchRule,

    /// How the target is shown before input opens.
    pub presentation: PresentationMode,

    /// Timing for demonstrated steps.
    pub timing: StepTiming,

    /// Audio cues for outcome feedback.
    pub cues: FeedbackCues,
}

impl SessionConfig {
    /// Create a configuration with the given round count and defaults
    /// (ordered matching, prompt presentation, standard timing, no cues).
    #[must_use]
    pub fn new(total_rounds: u32) -> Self {
        Self {
            total_rounds,
            match_rule: MatchRule::default(),
            presentation: PresentationMode::default(),
            timing: StepTiming::default(),
            cues: FeedbackCues::default(),
        }
    }

    /// Set the match rule.
    #[must_use]
    pub fn with_match_rule(mut self, rule: MatchRule) -> Self {
        self.match_rule = rule;
        self
    }

    /// Set the presentation mode.
    #[must_use]
    pub fn with_presentation(mut self, mode: PresentationMode) -> Self {
        self.presentation = mode;
        self
    }

    /// Set step timing.
    #[must_use]
    pub fn with_timing(mut self, timing: StepTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set outcome cues.
    #[must_use]
    pub fn with_cues(mut self, cues: FeedbackCues) -> Self {
        self.cues = cues;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }
}
