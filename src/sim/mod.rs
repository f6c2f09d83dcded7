//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (fireworks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod court;
pub mod effects;
pub mod outcome;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, FloorContact};
pub use court::{Backboard, Court, Hoop, HoopSide};
pub use outcome::{Verdict, classify};
pub use score::{MakeAward, ScoreState};
pub use state::{Ball, GameEvent, Particle, ShotAttempt, SimState, TrailPoint};
pub use tick::{TickInput, integrate, tick};
