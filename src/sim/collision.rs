//! Collision detection and response
//!
//! Applied every tick after integration, in a fixed order:
//! 1. court walls (clamp + inelastic bounce)
//! 2. rim ring (at most one sphere correction per tick)
//! 3. backboards (hit registration only, velocity untouched)
//! 4. floor (bounce or settle)
//!
//! Later steps may re-clamp positions set by earlier ones.

use glam::Vec3;

use super::court::{Court, Hoop, HoopSide};
use super::state::{Ball, ShotAttempt};
use crate::consts::*;

/// Result of a sphere contact check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Center of the obstacle that was hit
    pub point: Vec3,
    /// Unit direction from the obstacle toward the ball center
    pub normal: Vec3,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between the ball and a small fixed sphere
///
/// A ball centered exactly on the sphere is pushed straight up.
pub fn ball_sphere_collision(
    ball_pos: Vec3,
    ball_radius: f32,
    center: Vec3,
    sphere_radius: f32,
) -> CollisionResult {
    let min_dist = ball_radius + sphere_radius;
    let offset = ball_pos - center;
    let dist = offset.length();
    if dist >= min_dist {
        return CollisionResult::miss();
    }
    CollisionResult {
        hit: true,
        point: center,
        normal: offset.try_normalize().unwrap_or(Vec3::Y),
        penetration: min_dist - dist,
    }
}

/// Clamp to the court walls; outward velocity is reflected and damped
///
/// Returns true if any wall was touched.
pub fn resolve_walls(ball: &mut Ball) -> bool {
    let mut touched = false;
    if ball.pos.z < -COURT_HALF_Z {
        ball.pos.z = -COURT_HALF_Z;
        if ball.vel.z < 0.0 {
            ball.vel.z *= -WALL_RESTITUTION;
        }
        touched = true;
    }
    if ball.pos.z > COURT_HALF_Z {
        ball.pos.z = COURT_HALF_Z;
        if ball.vel.z > 0.0 {
            ball.vel.z *= -WALL_RESTITUTION;
        }
        touched = true;
    }
    if ball.pos.x < -COURT_HALF_X {
        ball.pos.x = -COURT_HALF_X;
        if ball.vel.x < 0.0 {
            ball.vel.x *= -WALL_RESTITUTION;
        }
        touched = true;
    }
    if ball.pos.x > COURT_HALF_X {
        ball.pos.x = COURT_HALF_X;
        if ball.vel.x > 0.0 {
            ball.vel.x *= -WALL_RESTITUTION;
        }
        touched = true;
    }
    touched
}

/// Push the ball out of the first overlapping rim sphere and redirect it
///
/// The new velocity points away from the sphere with 90% of the old speed,
/// plus a small upward kick. Only one sphere is resolved per call.
pub fn resolve_rim(ball: &mut Ball, hoops: &[Hoop]) -> CollisionResult {
    let min_dist = BALL_RADIUS + RIM_SPHERE_RADIUS;
    for sphere in hoops.iter().flat_map(|h| h.rim_spheres.iter()) {
        let result = ball_sphere_collision(ball.pos, BALL_RADIUS, *sphere, RIM_SPHERE_RADIUS);
        if result.hit {
            ball.pos = *sphere + result.normal * min_dist;
            ball.vel = result.normal * (ball.vel.length() * RIM_RESTITUTION);
            ball.vel.y += RIM_LIFT;
            return result;
        }
    }
    CollisionResult::miss()
}

/// Register backboard contacts for the current attempt
///
/// Each board latches once until the next floor contact. Returns the boards
/// newly hit this tick.
pub fn resolve_backboards(ball: &Ball, court: &Court, attempt: &mut ShotAttempt) -> Vec<HoopSide> {
    court
        .hoops
        .iter()
        .filter(|hoop| hoop.backboard.overlaps(ball.pos, BALL_RADIUS))
        .filter_map(|hoop| attempt.latch_backboard(hoop.side).then_some(hoop.side))
        .collect()
}

/// Outcome of touching the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorContact {
    /// Vertical speed was high enough to bounce
    Bounce,
    /// Ball settled; velocity zeroed
    Rest,
}

/// Keep the ball on or above the floor
pub fn resolve_floor(ball: &mut Ball) -> Option<FloorContact> {
    if ball.pos.y > BALL_REST_Y {
        return None;
    }
    ball.pos.y = BALL_REST_Y;
    if ball.vel.y.abs() > FLOOR_BOUNCE_MIN_SPEED {
        ball.vel.y *= -FLOOR_RESTITUTION;
        ball.vel.x *= FLOOR_FRICTION;
        ball.vel.z *= FLOOR_FRICTION;
        Some(FloorContact::Bounce)
    } else {
        ball.vel = Vec3::ZERO;
        ball.airborne = false;
        Some(FloorContact::Rest)
    }
}
