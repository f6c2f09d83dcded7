//! Firework particles for made shots
//!
//! Purely visual. Spread comes from the seeded RNG so replays look the same.

use glam::Vec3;
use rand::Rng;

use super::court::Hoop;
use super::state::{MAX_PARTICLES, Particle, RngState};
use crate::consts::GRAVITY;

/// Particles per burst (one burst per rim sphere)
pub const BURST_SIZE: usize = 8;
/// Seconds a particle lives
pub const PARTICLE_LIFETIME: f32 = 1.5;

/// Burst origins: every rim sphere of the hoop
pub fn burst_origins(hoop: &Hoop) -> &[Vec3] {
    &hoop.rim_spheres
}

/// Spawn one burst of particles at `origin`
pub fn spawn_burst(particles: &mut Vec<Particle>, rng_state: &mut RngState, origin: Vec3) {
    let mut rng = rng_state.next_rng();
    particles.reserve(BURST_SIZE);
    for _ in 0..BURST_SIZE {
        let vel = Vec3::new(
            rng.random_range(-3.0..3.0),
            rng.random_range(0.0..10.0),
            rng.random_range(-3.0..3.0),
        );
        particles.push(Particle {
            pos: origin,
            vel,
            hue: rng.random_range(0.0..360.0),
            life: PARTICLE_LIFETIME,
        });
    }

    // Over the cap: drop the oldest in one pass
    let excess = particles.len().saturating_sub(MAX_PARTICLES);
    if excess > 0 {
        particles.drain(..excess);
    }
}

/// Advance particles under gravity and drop expired ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.life -= dt;
        particle.vel.y += GRAVITY * dt;
        particle.pos += particle.vel * dt;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Opacity for rendering (1 at spawn, 0 at expiry)
#[inline]
pub fn particle_opacity(particle: &Particle) -> f32 {
    (particle.life / PARTICLE_LIFETIME).clamp(0.0, 1.0)
}
