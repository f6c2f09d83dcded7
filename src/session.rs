//! Free play / timed challenge state machine
//!
//! Driven by the 1 Hz session clock. Reads the score, never the ball.

use serde::{Deserialize, Serialize};

use crate::consts::{CHALLENGE_SECONDS, TARGET_SCORE};
use crate::sim::ScoreState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Unlimited shooting with a wall-clock readout
    #[default]
    Free,
    /// Reach `TARGET_SCORE` before the countdown runs out
    TimedChallenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// Current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub mode: GameMode,
    /// Seconds left on the challenge countdown (unused in free play)
    pub seconds_remaining: u32,
    pub target_score: u64,
    /// Latched once the challenge ends
    pub outcome: SessionOutcome,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameMode::Free)
    }
}

impl Session {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            seconds_remaining: CHALLENGE_SECONDS,
            target_score: TARGET_SCORE,
            outcome: SessionOutcome::InProgress,
        }
    }

    /// Restart in `mode`, dropping any countdown in progress
    pub fn enter(&mut self, mode: GameMode) {
        *self = Self::new(mode);
    }

    /// A challenge countdown is running
    pub fn countdown_active(&self) -> bool {
        self.mode == GameMode::TimedChallenge && self.outcome == SessionOutcome::InProgress
    }

    pub fn is_finished(&self) -> bool {
        self.outcome != SessionOutcome::InProgress
    }

    /// One countdown second
    ///
    /// Decrements first, then checks the score before the time: reaching the
    /// target on the last second is still a win. Returns the outcome on the
    /// tick that ends the challenge.
    pub fn countdown_tick(&mut self, score: u64) -> Option<SessionOutcome> {
        if !self.countdown_active() {
            return None;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);

        if score >= self.target_score {
            self.outcome = SessionOutcome::Won;
        } else if self.seconds_remaining == 0 {
            self.outcome = SessionOutcome::Lost;
        } else {
            return None;
        }
        Some(self.outcome)
    }

    /// Seconds the challenge has been running
    pub fn elapsed_secs(&self) -> u32 {
        CHALLENGE_SECONDS.saturating_sub(self.seconds_remaining)
    }
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: GameMode,
    pub outcome: SessionOutcome,
    pub score: u64,
    pub duration_secs: u32,
    pub attempts: u32,
    pub makes: u32,
    /// Fraction of attempts made, in [0, 1]
    pub accuracy: f32,
}

impl SessionSummary {
    pub fn new(session: &Session, score: &ScoreState) -> Self {
        Self {
            mode: session.mode,
            outcome: session.outcome,
            score: score.score,
            duration_secs: session.elapsed_secs(),
            attempts: score.shots_attempted,
            makes: score.shots_scored,
            accuracy: score.accuracy(),
        }
    }
}

/// Notifications from the session side of the controller
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Session (re)started in the given mode
    ModeEntered(GameMode),
    /// Challenge countdown advanced
    Countdown { seconds_remaining: u32 },
    /// Free play: redraw the wall clock
    WallClockRefresh,
    /// Challenge ended
    Finished(SessionSummary),
    /// Score that may be a new record
    HighScoreOffer { score: u64 },
    /// Settle delay elapsed; back to free play
    AutoReset,
}
