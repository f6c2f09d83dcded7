//! Arcade Hoops - shot simulation and scoring engine for a basketball mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball flight, collisions, make/miss, scoring)
//! - `session`: Free play / timed challenge state machine
//! - `game`: Session controller driving both clocks
//! - `ui`: HUD and report text
//! - `persistence`: Key/value storage for settings and high scores

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use highscores::HighScores;
pub use session::{GameMode, Session, SessionEvent, SessionOutcome, SessionSummary};
pub use settings::Settings;

use glam::{Vec2, Vec3};

/// Game configuration constants
///
/// Thresholds and restitution coefficients are part of the gameplay contract
/// and are intentionally not exposed through `Settings`.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Vertical acceleration (units/s²)
    pub const GRAVITY: f32 = -9.8;
    /// Per-tick multiplicative velocity damping while airborne
    pub const AIR_DAMPING: f32 = 0.999;

    /// Court half extents the ball center may occupy
    pub const COURT_HALF_X: f32 = 14.5;
    pub const COURT_HALF_Z: f32 = 7.1;
    /// Lateral speed of grounded movement (units per tick)
    pub const MOVE_SPEED: f32 = 0.2;
    /// Velocity scale applied to an outward component at a wall
    pub const WALL_RESTITUTION: f32 = 0.6;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.35;
    /// Height of the ball center when resting on the floor
    pub const BALL_REST_Y: f32 = 0.5;

    /// Floor response
    pub const FLOOR_RESTITUTION: f32 = 0.6;
    pub const FLOOR_FRICTION: f32 = 0.5;
    /// Vertical speed above which a floor contact bounces instead of settling
    pub const FLOOR_BOUNCE_MIN_SPEED: f32 = 1.0;

    /// Hoops sit at x = ±HOOP_X
    pub const HOOP_X: f32 = 15.0;
    pub const RIM_HEIGHT: f32 = 3.05;
    pub const RIM_RADIUS: f32 = 0.5;
    /// Distance from the backboard plane to the center of the rim ring
    pub const RIM_RING_OFFSET: f32 = 0.55;
    pub const RIM_SPHERE_COUNT: usize = 45;
    pub const RIM_SPHERE_RADIUS: f32 = 0.04;
    /// Speed kept after a rim contact
    pub const RIM_RESTITUTION: f32 = 0.9;
    /// Vertical impulse added after a rim contact
    pub const RIM_LIFT: f32 = 0.5;

    /// Backboard geometry
    pub const BACKBOARD_CENTER_Y: f32 = 3.7;
    pub const BACKBOARD_HEIGHT: f32 = 1.8;
    pub const BACKBOARD_DEPTH: f32 = 3.5;
    /// Lower part of the board below the hit zone
    pub const BACKBOARD_SKIRT: f32 = 0.8;
    /// Near face sits this far inside x = ±HOOP_X
    pub const BACKBOARD_FACE_INSET: f32 = 0.2;

    /// Make predicate
    pub const MAKE_RADIUS: f32 = 0.7;
    pub const MAKE_HEIGHT_TOLERANCE: f32 = 0.3;
    pub const MAKE_MAX_LATERAL_SPEED: f32 = 6.0;
    /// Descending below this height without a make is a miss
    pub const MISS_HEIGHT: f32 = 1.5;

    /// Shot power
    pub const DEFAULT_SHOT_POWER: f32 = 0.5;
    pub const SHOT_POWER_STEP: f32 = 0.05;
    pub const LAUNCH_HORIZONTAL_SPEED: f32 = 6.0;
    pub const LAUNCH_VERTICAL_SPEED: f32 = 16.0;

    /// Scoring
    pub const BASE_POINTS: u64 = 2;

    /// Timed challenge
    pub const TARGET_SCORE: u64 = 50;
    pub const CHALLENGE_SECONDS: u32 = 60;
    /// Delay between a finished challenge and the automatic return to free play
    pub const SETTLE_DELAY_SECS: f32 = 1.2;

    /// Ball speed below which a flight counts as stalled (trail is dropped)
    pub const STALL_SPEED: f32 = 0.05;
}

/// Distance between two points ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Unit vector from `from` toward `to` in the ground plane (zero if coincident)
#[inline]
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z).normalize_or_zero()
}

/// Axis the ball rolls around when moving with `velocity`
///
/// Perpendicular to both the velocity and the vertical axis. `None` when the
/// ball is at rest or moving straight up/down.
#[inline]
pub fn spin_axis(velocity: Vec3) -> Option<Vec3> {
    velocity.cross(Vec3::Y).try_normalize()
}
