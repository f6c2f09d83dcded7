//! Make/miss adjudication
//!
//! A shot is judged once per flight, only while the ball is descending:
//! - crossing the rim plane downward close to the rim center, low lateral
//!   speed and near rim height is a make
//! - crossing the rim plane any other way is a miss
//! - falling to `MISS_HEIGHT` without a make is a miss (catches shots that
//!   rattle around without a clean crossing)
//!
//! Anything else stays pending and is re-checked next tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Ball, ShotAttempt};
use crate::consts::*;
use crate::horizontal_distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Made,
    Missed,
}

/// Ball center went from above the rim plane to at/below it this tick
#[inline]
pub fn crossed_rim_descending(prev_y: f32, y: f32) -> bool {
    prev_y > RIM_HEIGHT && y <= RIM_HEIGHT
}

/// Judge a descending ball against `rim_center`
///
/// Returns `None` while the shot is still undecided.
pub fn classify(pos: Vec3, vel: Vec3, prev_y: f32, rim_center: Vec3) -> Option<Verdict> {
    let crossed = crossed_rim_descending(prev_y, pos.y);
    let near_center = horizontal_distance(pos, rim_center) < MAKE_RADIUS;
    let at_rim_height = (pos.y - rim_center.y).abs() < MAKE_HEIGHT_TOLERANCE;
    let falling_straight =
        vel.x.abs() < MAKE_MAX_LATERAL_SPEED && vel.z.abs() < MAKE_MAX_LATERAL_SPEED;

    if crossed && near_center && at_rim_height && falling_straight {
        Some(Verdict::Made)
    } else if crossed || pos.y <= MISS_HEIGHT {
        Some(Verdict::Missed)
    } else {
        None
    }
}

/// Evaluate the attempt for this tick; records and returns a fresh verdict
pub fn evaluate(attempt: &mut ShotAttempt, ball: &Ball, rim_center: Vec3) -> Option<Verdict> {
    if !ball.airborne || attempt.evaluated() || ball.vel.y >= 0.0 {
        return None;
    }
    let verdict = classify(ball.pos, ball.vel, ball.prev_y, rim_center)?;
    attempt.verdict = Some(verdict);
    Some(verdict)
}
