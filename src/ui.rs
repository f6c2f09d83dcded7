//! HUD and report text
//!
//! Pure formatting over core state; the host decides where the strings go.

use crate::game::Game;
use crate::session::{GameMode, SessionOutcome, SessionSummary};
use crate::sim::{GameEvent, ScoreState};

/// Transient center-screen message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub text: &'static str,
    /// CSS color name
    pub color: &'static str,
}

impl Feedback {
    const fn new(text: &'static str, color: &'static str) -> Self {
        Self { text, color }
    }
}

/// Message for a simulation event, if it gets one
pub fn feedback_for_event(event: &GameEvent) -> Option<Feedback> {
    match event {
        GameEvent::ShotMade { swish: true, .. } => Some(Feedback::new("SWISH!", "gold")),
        GameEvent::ShotMade { swish: false, .. } => Some(Feedback::new("SHOT MADE!", "lightgreen")),
        GameEvent::ShotMissed => Some(Feedback::new("MISSED SHOT", "tomato")),
        GameEvent::BallReset => Some(Feedback::new("Ball reset", "white")),
        _ => None,
    }
}

/// Message for the end of a challenge
pub fn feedback_for_outcome(outcome: SessionOutcome) -> Option<Feedback> {
    match outcome {
        SessionOutcome::Won => Some(Feedback::new("You won the challenge!", "lime")),
        SessionOutcome::Lost => Some(Feedback::new("Time's Up!", "gold")),
        SessionOutcome::InProgress => None,
    }
}

/// Accuracy with one decimal, e.g. `62.5%`
pub fn accuracy_text(score: &ScoreState) -> String {
    format!("{:.1}%", score.accuracy_percent())
}

pub fn stats_text(score: &ScoreState) -> String {
    format!(
        "Shots: {} | Hits: {} | Accuracy: {}",
        score.shots_attempted,
        score.shots_scored,
        accuracy_text(score)
    )
}

/// Combo banner, only while a streak of two or more is running
pub fn combo_text(combo: u32) -> Option<String> {
    (combo > 1).then(|| {
        let bonus = combo - 1;
        format!("COMBO x{bonus}! +{bonus} Bonus")
    })
}

/// `MM:SS`
pub fn countdown_text(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// `HH:MM:SS` for a Unix timestamp shifted by `utc_offset_secs` (0 for UTC)
pub fn wall_clock_text(unix_secs: u64, utc_offset_secs: i32) -> String {
    let day_secs = (unix_secs as i64 + i64::from(utc_offset_secs)).rem_euclid(86_400);
    format!(
        "{:02}:{:02}:{:02}",
        day_secs / 3600,
        (day_secs / 60) % 60,
        day_secs % 60
    )
}

pub fn power_text(power: f32) -> String {
    format!("Power: {}%", (power * 100.0).round() as u32)
}

pub fn high_score_text(score: u64, stored: u64) -> String {
    format!("High Score: {}", score.max(stored))
}

/// Multi-line end-of-challenge report
pub fn summary_text(summary: &SessionSummary) -> String {
    let headline = match summary.outcome {
        SessionOutcome::Won => format!(
            "Success!\nYou scored {} points in {} seconds.",
            summary.score, summary.duration_secs
        ),
        _ => "Challenge Over!\nYou didn't reach the goal in time.".to_string(),
    };
    format!(
        "{headline}\n\nFinal Score: {}\nShots Attempted: {}\nShots Scored: {}\nAccuracy: {:.1}%",
        summary.score,
        summary.attempts,
        summary.makes,
        summary.accuracy * 100.0
    )
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub mode: GameMode,
    pub score: u64,
    pub stats: String,
    pub combo: Option<String>,
    /// Countdown in a challenge, local wall clock in free play
    pub clock: String,
    pub power: String,
    pub high_score: String,
}

impl HudSnapshot {
    pub fn capture(game: &Game, now_unix_secs: u64) -> Self {
        let score = &game.state.score;
        let clock = match game.session.mode {
            GameMode::Free => wall_clock_text(now_unix_secs, game.utc_offset_secs()),
            GameMode::TimedChallenge => countdown_text(game.session.seconds_remaining),
        };
        Self {
            mode: game.session.mode,
            score: score.score,
            stats: stats_text(score),
            combo: combo_text(score.combo),
            clock,
            power: power_text(game.state.shot_power),
            high_score: high_score_text(score.score, game.high_score()),
        }
    }
}
