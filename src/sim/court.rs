//! Court geometry consumed by the simulation
//!
//! Two hoops at x = ±15. Each hoop has:
//! - a rim center used to adjudicate makes
//! - a ring of small collision spheres standing in for the physical rim
//! - a backboard slab whose near face registers hits
//!
//! Built once at startup and read-only afterwards.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which end of the court a hoop is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoopSide {
    Left,
    Right,
}

impl HoopSide {
    /// +1 for the right hoop, -1 for the left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            HoopSide::Left => -1.0,
            HoopSide::Right => 1.0,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            HoopSide::Left => 0,
            HoopSide::Right => 1,
        }
    }
}

/// Collidable part of a backboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backboard {
    pub side: HoopSide,
    /// x of the face pointing into the court
    pub face_x: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Backboard {
    pub fn new(side: HoopSide) -> Self {
        let half_depth = BACKBOARD_DEPTH / 2.0;
        Self {
            side,
            face_x: side.sign() * (HOOP_X - BACKBOARD_FACE_INSET),
            y_min: BACKBOARD_CENTER_Y - BACKBOARD_HEIGHT / 2.0 + BACKBOARD_SKIRT,
            y_max: BACKBOARD_CENTER_Y + BACKBOARD_HEIGHT / 2.0,
            z_min: -half_depth,
            z_max: half_depth,
        }
    }

    /// Whether a ball's bounding box touches the board face
    pub fn overlaps(&self, center: Vec3, radius: f32) -> bool {
        let in_y = center.y + radius >= self.y_min && center.y - radius <= self.y_max;
        let in_z = center.z + radius >= self.z_min && center.z - radius <= self.z_max;
        let crosses_face = match self.side {
            HoopSide::Left => self.face_x >= center.x - radius,
            HoopSide::Right => center.x + radius >= self.face_x,
        };
        crosses_face && in_y && in_z
    }
}

/// A hoop target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hoop {
    pub side: HoopSide,
    /// Reference point for make adjudication
    pub rim_center: Vec3,
    /// Center of the collision ring
    pub ring_center: Vec3,
    /// Rim collision sphere centers, equal angular steps from +x
    pub rim_spheres: Vec<Vec3>,
    pub backboard: Backboard,
}

impl Hoop {
    pub fn new(side: HoopSide) -> Self {
        let rim_center = Vec3::new(side.sign() * HOOP_X, RIM_HEIGHT, 0.0);
        let ring_center = Vec3::new(
            side.sign() * (HOOP_X - RIM_RING_OFFSET),
            RIM_HEIGHT,
            0.0,
        );
        Self {
            side,
            rim_center,
            ring_center,
            rim_spheres: rim_ring(ring_center, RIM_RADIUS, RIM_SPHERE_COUNT),
            backboard: Backboard::new(side),
        }
    }
}

/// Sample `count` points on a horizontal circle
pub fn rim_ring(center: Vec3, radius: f32, count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
            center + Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
        })
        .collect()
}

/// Both hoops
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Court {
    /// Indexed by `HoopSide::index`
    pub hoops: [Hoop; 2],
}

impl Default for Court {
    fn default() -> Self {
        Self {
            hoops: [Hoop::new(HoopSide::Left), Hoop::new(HoopSide::Right)],
        }
    }
}

impl Court {
    pub fn hoop(&self, side: HoopSide) -> &Hoop {
        &self.hoops[side.index()]
    }

    /// Hoop whose rim center is closest to `pos` (ties go left)
    pub fn nearest_hoop(&self, pos: Vec3) -> &Hoop {
        let left = self.hoop(HoopSide::Left);
        let right = self.hoop(HoopSide::Right);
        if pos.distance(right.rim_center) < pos.distance(left.rim_center) {
            right
        } else {
            left
        }
    }
}
