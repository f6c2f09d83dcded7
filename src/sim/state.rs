//! Simulation state and core types
//!
//! Everything the fixed tick mutates lives in [`SimState`]. Presentation
//! buffers (trail, particles, pending events) are skipped by serde.

use glam::{Quat, Vec3};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::court::{Court, HoopSide};
use super::outcome::Verdict;
use super::score::ScoreState;
use crate::consts::*;

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec3,
    pub speed: f32,
}

/// Default number of trail points to keep
pub const TRAIL_LENGTH: usize = 25;

/// The simulated basketball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Visual orientation (spin), driven by velocity
    pub orientation: Quat,
    /// In post-launch flight
    pub airborne: bool,
    /// A make was awarded during the current flight
    pub scored_this_flight: bool,
    /// Height at the end of the previous tick (rim-plane crossing edge)
    pub prev_y: f32,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    /// Ball resting at center court
    pub fn new() -> Self {
        Self {
            pos: Self::rest_position(),
            vel: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            airborne: false,
            scored_this_flight: false,
            prev_y: BALL_REST_Y,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    pub fn rest_position() -> Vec3 {
        Vec3::new(0.0, BALL_REST_Y, 0.0)
    }

    /// Back to center court, at rest
    pub fn reset(&mut self) {
        self.pos = Self::rest_position();
        self.vel = Vec3::ZERO;
        self.airborne = false;
        self.scored_this_flight = false;
        self.prev_y = BALL_REST_Y;
        self.clear_trail();
    }

    /// Stop the current flight and drop the ball where it is
    pub fn halt(&mut self) {
        self.vel = Vec3::ZERO;
        self.airborne = false;
        self.pos.y = BALL_REST_Y;
        self.prev_y = BALL_REST_Y;
        self.clear_trail();
    }

    /// Record current position to trail (call each airborne tick)
    pub fn record_trail(&mut self, max_len: usize) {
        let speed = self.vel.length();
        self.trail.insert(0, TrailPoint { pos: self.pos, speed });
        self.trail.truncate(max_len);
    }

    /// Clear trail (on landing/reset)
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// One launched shot, alive from launch until the flight ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotAttempt {
    pub target: HoopSide,
    pub launch_velocity: Vec3,
    pub collided_with_rim: bool,
    pub collided_with_backboard: bool,
    /// Per-backboard hit latch (indexed by `HoopSide::index`), re-armed on floor contact
    pub backboard_latch: [bool; 2],
    /// `None` while pending
    pub verdict: Option<Verdict>,
}

impl ShotAttempt {
    pub fn new(target: HoopSide, launch_velocity: Vec3) -> Self {
        Self {
            target,
            launch_velocity,
            collided_with_rim: false,
            collided_with_backboard: false,
            backboard_latch: [false; 2],
            verdict: None,
        }
    }

    #[inline]
    pub fn evaluated(&self) -> bool {
        self.verdict.is_some()
    }

    /// Nothing but net
    pub fn is_swish(&self) -> bool {
        !self.collided_with_rim && !self.collided_with_backboard
    }

    /// Latch a backboard hit; returns true only for the first hit since the last floor contact
    pub fn latch_backboard(&mut self, side: HoopSide) -> bool {
        let latch = &mut self.backboard_latch[side.index()];
        if *latch {
            return false;
        }
        *latch = true;
        self.collided_with_backboard = true;
        true
    }

    pub fn clear_backboard_latches(&mut self) {
        self.backboard_latch = [false; 2];
    }
}

/// Discrete events produced by a tick, consumed by audio/rendering/HUD
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Shot launched toward `target`
    Launched { target: HoopSide, velocity: Vec3 },
    /// First backboard contact since the last floor contact
    BackboardHit { side: HoopSide },
    /// Rim-ring correction applied at the given sphere
    RimBounce { sphere: Vec3 },
    /// Bounced off the floor
    FloorBounce,
    /// Flight ended with the ball at rest
    Landed,
    /// Made basket
    ShotMade {
        swish: bool,
        points: u64,
        bonus: u64,
        combo: u32,
    },
    /// Missed basket
    ShotMissed,
    /// Particle burst trigger at a rim sphere
    Impulse { at: Vec3 },
    /// Ball returned to center court by command
    BallReset,
    /// Shot power changed
    PowerChanged { power: f32 },
}

/// A firework particle (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Hue in degrees
    pub hue: f32,
    /// Seconds left
    pub life: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 1024;

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator on the next stream, so each draw sequence is distinct
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream = self.stream.wrapping_add(1);
        rng
    }
}

/// Complete simulation context (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub seed: u64,
    pub rng_state: RngState,
    pub court: Court,
    pub ball: Ball,
    /// Current flight's attempt, if a shot is in the air
    pub attempt: Option<ShotAttempt>,
    pub score: ScoreState,
    /// Shot power in [0, 1], multiples of `SHOT_POWER_STEP`
    pub shot_power: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Trail cap (from settings)
    pub trail_length: usize,
    /// Spawn firework particles on makes (from settings)
    pub fireworks: bool,
    /// Visual particles
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SimState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            court: Court::default(),
            ball: Ball::new(),
            attempt: None,
            score: ScoreState::default(),
            shot_power: DEFAULT_SHOT_POWER,
            time_ticks: 0,
            trail_length: TRAIL_LENGTH,
            fireworks: true,
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Launch toward the nearest hoop. No-op while a shot is in the air.
    pub fn launch(&mut self) -> bool {
        if self.ball.airborne {
            return false;
        }

        let target = self.court.nearest_hoop(self.ball.pos).side;
        let velocity = self.launch_velocity(self.ball.pos);

        self.ball.vel = velocity;
        self.ball.airborne = true;
        self.ball.scored_this_flight = false;
        self.attempt = Some(ShotAttempt::new(target, velocity));
        self.score.record_attempt();
        self.events.push(GameEvent::Launched { target, velocity });
        log::debug!(
            "Launch toward {:?} at power {:.2}: {:?}",
            target,
            self.shot_power,
            velocity
        );
        true
    }

    /// Velocity a shot from `pos` would leave with at the current power
    pub fn launch_velocity(&self, pos: Vec3) -> Vec3 {
        let hoop = self.court.nearest_hoop(pos);
        let dir = crate::horizontal_direction(pos, hoop.rim_center);
        let horizontal = self.shot_power * LAUNCH_HORIZONTAL_SPEED;
        Vec3::new(
            dir.x * horizontal,
            self.shot_power * LAUNCH_VERTICAL_SPEED,
            dir.z * horizontal,
        )
    }

    /// Set shot power, snapped to the step grid and clamped to [0, 1]
    pub fn set_shot_power(&mut self, power: f32) {
        let steps = (power.clamp(0.0, 1.0) / SHOT_POWER_STEP).round();
        let snapped = (steps * SHOT_POWER_STEP).clamp(0.0, 1.0);
        if (snapped - self.shot_power).abs() > f32::EPSILON {
            self.shot_power = snapped;
            self.events.push(GameEvent::PowerChanged { power: snapped });
        }
    }

    /// Nudge shot power by whole steps (positive = stronger)
    pub fn adjust_shot_power(&mut self, steps: i32) {
        self.set_shot_power(self.shot_power + steps as f32 * SHOT_POWER_STEP);
    }

    /// Ball back to center at rest; an unevaluated attempt is dropped without a verdict
    pub fn reset_ball(&mut self) {
        self.ball.reset();
        self.attempt = None;
        self.set_shot_power(DEFAULT_SHOT_POWER);
        self.events.push(GameEvent::BallReset);
    }

    /// Stop the ball where it is and drop the attempt without a verdict
    pub fn cancel_flight(&mut self) {
        self.ball.halt();
        self.attempt = None;
    }

    /// Cancel any flight and zero the score (mode entry/restart)
    pub fn reset_session(&mut self) {
        self.ball.reset();
        self.attempt = None;
        self.score = ScoreState::default();
        self.particles.clear();
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
