//! Session controller
//!
//! Owns the simulation context and the session, and drives them from two
//! logical clocks: the fixed 60 Hz simulation tick and the 1 Hz session clock.
//! Nothing runs until [`Game::mark_ready`] has been called.

use crate::consts::*;
use crate::session::{GameMode, Session, SessionEvent, SessionOutcome, SessionSummary};
use crate::settings::Settings;
use crate::sim::{GameEvent, SimState, TickInput, tick};
use crate::ui::HudSnapshot;

/// Held movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Forward,
    Backward,
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    pub state: SimState,
    pub session: Session,
    input: TickInput,
    ready: bool,
    sim_accumulator: f32,
    clock_accumulator: f32,
    /// Seconds until the automatic return to free play
    settle_timer: Option<f32>,
    /// Best of the stored record and every score offered since
    high_score: u64,
    session_events: Vec<SessionEvent>,
    last_summary: Option<SessionSummary>,
    /// Seconds east of UTC for the free-play clock
    utc_offset_secs: i32,
}

impl Game {
    pub fn new(seed: u64, settings: &Settings, high_score: u64) -> Self {
        let mut game = Self {
            state: SimState::new(seed),
            session: Session::new(GameMode::Free),
            input: TickInput::default(),
            ready: false,
            sim_accumulator: 0.0,
            clock_accumulator: 0.0,
            settle_timer: None,
            high_score,
            session_events: Vec::new(),
            last_summary: None,
            utc_offset_secs: 0,
        };
        game.apply_settings(settings);
        game
    }

    /// Trail and fireworks preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.trail_length = settings.effective_trail_length();
        self.state.fireworks = settings.effective_fireworks();
    }

    /// Open the ready gate; updates before this are skipped
    pub fn mark_ready(&mut self) {
        if !self.ready {
            log::info!("Game ready");
            self.ready = true;
            self.session_events
                .push(SessionEvent::ModeEntered(self.session.mode));
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Post-challenge delay before the automatic reset
    pub fn is_settling(&self) -> bool {
        self.settle_timer.is_some()
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn utc_offset_secs(&self) -> i32 {
        self.utc_offset_secs
    }

    /// Local time zone for the free-play clock (seconds east of UTC)
    pub fn set_utc_offset(&mut self, secs: i32) {
        self.utc_offset_secs = secs;
    }

    /// Summary of the most recently finished challenge
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    // === Commands ===

    pub fn set_move(&mut self, direction: MoveDirection, held: bool) {
        match direction {
            MoveDirection::Left => self.input.move_left = held,
            MoveDirection::Right => self.input.move_right = held,
            MoveDirection::Forward => self.input.move_forward = held,
            MoveDirection::Backward => self.input.move_backward = held,
        }
    }

    /// Request a shot on the next tick (ignored while airborne or settling)
    pub fn launch(&mut self) {
        if !self.ready || self.is_settling() {
            log::debug!("Launch ignored");
            return;
        }
        self.input.launch = true;
    }

    /// Return the ball to center court on the next tick
    pub fn reset_ball(&mut self) {
        if self.ready {
            self.input.reset = true;
        }
    }

    /// Nudge shot power by whole steps
    pub fn adjust_power(&mut self, steps: i32) {
        self.state.adjust_shot_power(steps);
    }

    pub fn set_power(&mut self, power: f32) {
        self.state.set_shot_power(power);
    }

    /// Start a new session, cancelling any countdown or pending auto-reset
    pub fn select_mode(&mut self, mode: GameMode) {
        log::info!("Entering {:?}", mode);
        self.settle_timer = None;
        self.clock_accumulator = 0.0;
        self.input = TickInput::default();
        self.state.reset_session();
        self.session.enter(mode);
        self.session_events.push(SessionEvent::ModeEntered(mode));
        if mode == GameMode::Free {
            self.session_events.push(SessionEvent::WallClockRefresh);
        }
    }

    // === Clocks ===

    /// Advance by one rendered frame
    ///
    /// Runs up to `MAX_SUBSTEPS` fixed simulation ticks, then the session
    /// clock, then the settle timer.
    pub fn update(&mut self, frame_dt: f32) {
        if !self.ready || !frame_dt.is_finite() {
            return;
        }
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);

        self.sim_accumulator += dt;
        let mut substeps = 0;
        while self.sim_accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.tick_sim();
            self.sim_accumulator -= SIM_DT;
            substeps += 1;
        }

        self.clock_accumulator += dt;
        while self.clock_accumulator >= 1.0 {
            self.clock_accumulator -= 1.0;
            self.tick_second();
        }

        self.advance_settle(dt);
    }

    /// One fixed simulation tick
    pub fn tick_sim(&mut self) {
        if !self.ready {
            return;
        }
        let first_new = self.state.events.len();
        tick(&mut self.state, &self.input, SIM_DT);

        // Clear one-shot inputs after processing
        self.input.launch = false;
        self.input.reset = false;
        self.input.cancel_flight = false;

        let made = self.state.events[first_new..]
            .iter()
            .any(|e| matches!(e, GameEvent::ShotMade { .. }));
        if made {
            self.offer_high_score();
        }
    }

    /// One second on the session clock
    pub fn tick_second(&mut self) {
        if !self.ready {
            return;
        }
        match self.session.mode {
            GameMode::Free => self.session_events.push(SessionEvent::WallClockRefresh),
            GameMode::TimedChallenge => {
                if !self.session.countdown_active() {
                    return;
                }
                let outcome = self.session.countdown_tick(self.state.score.score);
                self.session_events.push(SessionEvent::Countdown {
                    seconds_remaining: self.session.seconds_remaining,
                });
                if let Some(outcome) = outcome {
                    self.finish(outcome);
                }
            }
        }
    }

    /// Run down the post-challenge settle delay
    pub fn advance_settle(&mut self, dt: f32) {
        let Some(remaining) = self.settle_timer.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.session_events.push(SessionEvent::AutoReset);
            self.select_mode(GameMode::Free);
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        // The ball only moves on sim ticks; the next one stops the flight
        self.input = TickInput {
            cancel_flight: true,
            ..Default::default()
        };
        self.offer_high_score();

        let summary = SessionSummary::new(&self.session, &self.state.score);
        log::info!(
            "Challenge {:?}: {} points, {}/{} in {}s",
            outcome,
            summary.score,
            summary.makes,
            summary.attempts,
            summary.duration_secs
        );
        self.last_summary = Some(summary.clone());
        self.session_events.push(SessionEvent::Finished(summary));
        self.settle_timer = Some(SETTLE_DELAY_SECS);
    }

    fn offer_high_score(&mut self) {
        let score = self.state.score.score;
        self.high_score = self.high_score.max(score);
        self.session_events
            .push(SessionEvent::HighScoreOffer { score });
    }

    // === Output ===

    pub fn drain_sim_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn drain_session_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.session_events)
    }

    /// HUD values at `now_unix_secs` (wall clock for free play)
    pub fn hud(&self, now_unix_secs: u64) -> HudSnapshot {
        HudSnapshot::capture(self, now_unix_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_game() -> Game {
        let mut game = Game::new(7, &Settings::default(), 0);
        game.mark_ready();
        game.drain_session_events();
        game
    }

    #[test]
    fn test_not_ready_skips_everything() {
        let mut game = Game::new(7, &Settings::default(), 0);
        game.launch();
        game.update(0.1);
        game.tick_sim();
        game.tick_second();
        assert_eq!(game.state.time_ticks, 0);
        assert!(!game.state.ball.airborne);
        assert!(game.drain_session_events().is_empty());
    }

    #[test]
    fn test_update_substeps() {
        let mut game = ready_game();
        game.update(0.06);
        assert_eq!(game.state.time_ticks, 3);
        // Clamped to MAX_FRAME_DT
        game.update(5.0);
        assert_eq!(game.state.time_ticks, 9);
    }

    #[test]
    fn test_launch_is_one_shot() {
        let mut game = ready_game();
        game.launch();
        game.tick_sim();
        assert!(game.state.ball.airborne);
        assert_eq!(game.state.score.shots_attempted, 1);
        game.tick_sim();
        assert_eq!(game.state.score.shots_attempted, 1);
    }

    #[test]
    fn test_movement_held_across_ticks() {
        let mut game = ready_game();
        game.set_move(MoveDirection::Right, true);
        game.tick_sim();
        game.tick_sim();
        assert!((game.state.ball.pos.x - 2.0 * MOVE_SPEED).abs() < 1e-5);
        game.set_move(MoveDirection::Right, false);
        game.tick_sim();
        assert!((game.state.ball.pos.x - 2.0 * MOVE_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_free_mode_refreshes_clock() {
        let mut game = ready_game();
        game.update(0.1);
        assert!(game.drain_session_events().is_empty());
        for _ in 0..10 {
            game.update(0.1);
        }
        assert!(game
            .drain_session_events()
            .contains(&SessionEvent::WallClockRefresh));
    }

    #[test]
    fn test_select_mode_resets_score() {
        let mut game = ready_game();
        game.state.score.score = 12;
        game.state.score.shots_attempted = 8;
        game.select_mode(GameMode::TimedChallenge);
        assert_eq!(game.state.score.score, 0);
        assert_eq!(game.session.seconds_remaining, CHALLENGE_SECONDS);
        assert_eq!(
            game.drain_session_events(),
            vec![SessionEvent::ModeEntered(GameMode::TimedChallenge)]
        );
    }

    #[test]
    fn test_finish_offers_score_and_settles() {
        let mut game = ready_game();
        game.select_mode(GameMode::TimedChallenge);
        game.state.score.score = 50;
        game.tick_second();

        assert_eq!(game.session.outcome, SessionOutcome::Won);
        assert!(game.is_settling());
        assert_eq!(game.high_score(), 50);
        let events = game.drain_session_events();
        assert!(events.contains(&SessionEvent::HighScoreOffer { score: 50 }));
        assert!(events.iter().any(|e| matches!(e, SessionEvent::Finished(_))));

        game.launch();
        game.tick_sim();
        assert!(!game.state.ball.airborne);
    }

    #[test]
    fn test_session_clock_leaves_ball_to_sim_tick() {
        let mut game = ready_game();
        game.select_mode(GameMode::TimedChallenge);
        game.launch();
        for _ in 0..20 {
            game.tick_sim();
        }
        assert!(game.state.ball.airborne);
        let (pos, vel) = (game.state.ball.pos, game.state.ball.vel);

        game.state.score.score = 50;
        game.tick_second();
        assert!(game.is_settling());
        assert_eq!(game.state.ball.pos, pos);
        assert_eq!(game.state.ball.vel, vel);
        assert!(game.state.ball.airborne);
        assert!(game.state.attempt.is_some());

        game.tick_sim();
        assert!(!game.state.ball.airborne);
        assert_eq!(game.state.ball.vel, glam::Vec3::ZERO);
        assert!(game.state.attempt.is_none());
        assert_eq!(game.state.score.shots_attempted, 1);
    }
}
