//! Fixed timestep simulation tick
//!
//! Per tick, strictly in this order:
//! integrate -> resolve collisions -> classify outcome -> update score.

use glam::Quat;

use super::collision::{self, FloorContact};
use super::effects;
use super::outcome::{self, Verdict};
use super::state::{Ball, GameEvent, SimState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys (grounded ball only)
    pub move_left: bool,
    pub move_right: bool,
    pub move_forward: bool,
    pub move_backward: bool,
    /// Launch a shot (ignored while airborne)
    pub launch: bool,
    /// Return the ball to center court
    pub reset: bool,
    /// Stop the current flight where it is (session ended)
    pub cancel_flight: bool,
}

/// Advance ball position/velocity by one step
///
/// Grounded: constant-speed movement from the held keys, clamped to the court.
/// Airborne: gravity, damping, then position.
pub fn integrate(ball: &mut Ball, input: &TickInput, dt: f32) {
    if ball.airborne {
        ball.vel.y += GRAVITY * dt;
        ball.vel *= AIR_DAMPING;
        ball.pos += ball.vel * dt;
    } else {
        if input.move_left {
            ball.pos.x = (ball.pos.x - MOVE_SPEED).max(-COURT_HALF_X);
        }
        if input.move_right {
            ball.pos.x = (ball.pos.x + MOVE_SPEED).min(COURT_HALF_X);
        }
        if input.move_forward {
            ball.pos.z = (ball.pos.z - MOVE_SPEED).max(-COURT_HALF_Z);
        }
        if input.move_backward {
            ball.pos.z = (ball.pos.z + MOVE_SPEED).min(COURT_HALF_Z);
        }
    }
    spin(ball, dt);
}

/// Roll the ball's orientation along its direction of travel
fn spin(ball: &mut Ball, dt: f32) {
    if let Some(axis) = crate::spin_axis(ball.vel) {
        let angle = ball.vel.length() * dt;
        ball.orientation = (ball.orientation * Quat::from_axis_angle(axis, angle)).normalize();
    }
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    if input.cancel_flight {
        state.cancel_flight();
    }
    if input.reset {
        state.reset_ball();
    }
    if input.launch {
        state.launch();
    }

    integrate(&mut state.ball, input, dt);

    if state.ball.airborne {
        state.ball.record_trail(state.trail_length);
    } else {
        state.ball.clear_trail();
    }

    let was_airborne = state.ball.airborne;
    resolve_collisions(state);
    let landed = was_airborne && !state.ball.airborne;

    classify_and_score(state, landed);

    if state.ball.airborne && state.ball.vel.length() < STALL_SPEED {
        state.ball.clear_trail();
    }

    effects::update_particles(&mut state.particles, dt);

    state.ball.prev_y = state.ball.pos.y;
}

fn resolve_collisions(state: &mut SimState) {
    let ball = &mut state.ball;

    collision::resolve_walls(ball);

    let rim = collision::resolve_rim(ball, &state.court.hoops);
    if rim.hit {
        if let Some(attempt) = state.attempt.as_mut() {
            attempt.collided_with_rim = true;
        }
        log::debug!("Rim contact at {:?}", rim.point);
        state.events.push(GameEvent::RimBounce { sphere: rim.point });
        // Push-out can carry the ball past the end lines
        collision::resolve_walls(ball);
    }

    if let Some(attempt) = state.attempt.as_mut() {
        for side in collision::resolve_backboards(ball, &state.court, attempt) {
            log::debug!("Backboard hit ({:?})", side);
            state.events.push(GameEvent::BackboardHit { side });
        }
    }

    let was_airborne = ball.airborne;
    if let Some(contact) = collision::resolve_floor(ball) {
        if let Some(attempt) = state.attempt.as_mut() {
            attempt.clear_backboard_latches();
        }
        ball.clear_trail();
        match contact {
            FloorContact::Bounce => state.events.push(GameEvent::FloorBounce),
            FloorContact::Rest if was_airborne => state.events.push(GameEvent::Landed),
            FloorContact::Rest => {}
        }
    }
}

fn classify_and_score(state: &mut SimState, landed: bool) {
    let Some(attempt) = state.attempt.as_mut() else {
        return;
    };

    let rim_center = state.court.hoop(attempt.target).rim_center;
    let verdict = if landed && !attempt.evaluated() {
        // Flight ended before any verdict: the catch-all miss
        attempt.verdict = Some(Verdict::Missed);
        Some(Verdict::Missed)
    } else {
        outcome::evaluate(attempt, &state.ball, rim_center)
    };

    match verdict {
        Some(Verdict::Made) => {
            let swish = attempt.is_swish();
            let target = attempt.target;
            let award = state.score.record_make();
            state.ball.scored_this_flight = true;
            log::debug!(
                "Made ({}): +{} (combo {})",
                if swish { "swish" } else { "contact" },
                award.points,
                award.combo
            );
            state.events.push(GameEvent::ShotMade {
                swish,
                points: award.points,
                bonus: award.bonus,
                combo: award.combo,
            });

            let hoop = state.court.hoop(target);
            let bursts = if swish { 2 } else { 1 };
            for &origin in effects::burst_origins(hoop) {
                state.events.push(GameEvent::Impulse { at: origin });
                if state.fireworks {
                    for _ in 0..bursts {
                        effects::spawn_burst(&mut state.particles, &mut state.rng_state, origin);
                    }
                }
            }
        }
        Some(Verdict::Missed) => {
            state.score.record_miss();
            log::debug!("Missed at {:?}", state.ball.pos);
            state.events.push(GameEvent::ShotMissed);
        }
        None => {}
    }

    if landed {
        state.attempt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::court::HoopSide;
    use crate::sim::state::ShotAttempt;
    use glam::Vec3;

    fn run_until_landed(state: &mut SimState, max_ticks: usize) -> Vec<GameEvent> {
        let input = TickInput::default();
        let mut events = Vec::new();
        for _ in 0..max_ticks {
            tick(state, &input, SIM_DT);
            events.extend(state.drain_events());
            if !state.ball.airborne {
                break;
            }
        }
        events
    }

    #[test]
    fn test_grounded_movement_clamped() {
        let mut ball = Ball::new();
        ball.pos.x = 14.4;
        let input = TickInput {
            move_right: true,
            move_forward: true,
            ..Default::default()
        };
        integrate(&mut ball, &input, SIM_DT);
        assert_eq!(ball.pos.x, COURT_HALF_X);
        assert!((ball.pos.z - -MOVE_SPEED).abs() < 1e-6);
        assert_eq!(ball.vel, Vec3::ZERO);
    }

    #[test]
    fn test_airborne_integration() {
        let mut ball = Ball::new();
        ball.airborne = true;
        ball.pos = Vec3::new(0.0, 2.0, 0.0);
        ball.vel = Vec3::new(6.0, 0.0, 0.0);
        integrate(&mut ball, &TickInput::default(), SIM_DT);

        let vy = GRAVITY * SIM_DT * AIR_DAMPING;
        assert!((ball.vel.y - vy).abs() < 1e-6);
        assert!((ball.vel.x - 6.0 * AIR_DAMPING).abs() < 1e-6);
        assert!((ball.pos.y - (2.0 + vy * SIM_DT)).abs() < 1e-6);
        assert!(ball.orientation.is_normalized());
    }

    #[test]
    fn test_resting_ball_keeps_orientation() {
        let mut ball = Ball::new();
        integrate(&mut ball, &TickInput::default(), SIM_DT);
        assert_eq!(ball.orientation, Quat::IDENTITY);
    }

    #[test]
    fn test_short_shot_from_center_misses() {
        let mut state = SimState::new(42);
        state.score.combo = 3;
        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &launch, SIM_DT);
        assert_eq!(state.attempt.as_ref().unwrap().target, HoopSide::Left);

        let events = run_until_landed(&mut state, 2000);
        assert!(!state.ball.airborne);
        assert!(state.attempt.is_none());
        assert!(events.contains(&GameEvent::ShotMissed));
        assert!(events.contains(&GameEvent::Landed));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ShotMade { .. })));
        assert_eq!(state.score.combo, 0);
        assert_eq!(state.score.shots_attempted, 1);
        assert_eq!(state.score.shots_scored, 0);
    }

    #[test]
    fn test_zero_power_shot_still_resolves() {
        let mut state = SimState::new(1);
        state.set_shot_power(0.0);
        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &launch, SIM_DT);
        let events = state.drain_events();
        assert!(!state.ball.airborne);
        assert!(events.contains(&GameEvent::ShotMissed));
        assert!(state.attempt.is_none());
    }

    #[test]
    fn test_made_shot_scores_and_fires_impulses() {
        let mut state = SimState::new(5);
        let hoop = state.court.hoop(HoopSide::Right).clone();
        // Just above the ring center, dropping straight through
        state.ball.airborne = true;
        state.ball.pos = hoop.ring_center + Vec3::new(0.0, 0.02, 0.0);
        state.ball.prev_y = state.ball.pos.y;
        state.ball.vel = Vec3::new(0.0, -2.0, 0.0);
        state.attempt = Some(ShotAttempt::new(HoopSide::Right, Vec3::ZERO));
        state.score.record_attempt();

        tick(&mut state, &TickInput::default(), SIM_DT);
        let events = state.drain_events();

        let made = events
            .iter()
            .find(|e| matches!(e, GameEvent::ShotMade { .. }))
            .cloned();
        assert_eq!(
            made,
            Some(GameEvent::ShotMade {
                swish: true,
                points: 2,
                bonus: 0,
                combo: 1
            })
        );
        assert!(events.iter().any(|e| matches!(e, GameEvent::Impulse { .. })));
        assert_eq!(state.score.score, 2);
        assert!(state.ball.scored_this_flight);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_cancel_flight_input_stops_ball() {
        let mut state = SimState::new(2);
        state.launch();
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.ball.airborne);
        let x = state.ball.pos.x;

        let cancel = TickInput {
            cancel_flight: true,
            ..Default::default()
        };
        tick(&mut state, &cancel, SIM_DT);
        assert!(!state.ball.airborne);
        assert_eq!(state.ball.vel, Vec3::ZERO);
        assert_eq!(state.ball.pos.y, BALL_REST_Y);
        assert_eq!(state.ball.pos.x, x);
        assert!(state.attempt.is_none());
        assert!(!state.drain_events().contains(&GameEvent::ShotMissed));
    }

    #[test]
    fn test_rim_contact_make_is_not_a_swish() {
        let mut state = SimState::new(8);
        // Just inside the ring, grazing the sphere on the +z side
        let sphere = state.court.hoop(HoopSide::Right).rim_spheres[11];
        state.ball.airborne = true;
        state.ball.pos = sphere + Vec3::new(0.0, 0.1, -0.33);
        state.ball.prev_y = state.ball.pos.y;
        state.ball.vel = Vec3::new(0.0, -0.5, 0.0);
        state.attempt = Some(ShotAttempt::new(HoopSide::Right, Vec3::ZERO));
        state.score.record_attempt();

        let mut events = Vec::new();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
            if events.iter().any(|e| matches!(e, GameEvent::ShotMade { .. })) {
                break;
            }
        }

        assert!(matches!(events.first(), Some(GameEvent::RimBounce { .. })));
        assert!(state.attempt.as_ref().unwrap().collided_with_rim);
        assert!(events.contains(&GameEvent::ShotMade {
            swish: false,
            points: 2,
            bonus: 0,
            combo: 1
        }));
    }

    #[test]
    fn test_backboard_hit_latches_until_floor_contact() {
        let mut state = SimState::new(4);
        state.attempt = Some(ShotAttempt::new(HoopSide::Right, Vec3::ZERO));
        state.ball.airborne = true;
        let at_board = |state: &mut SimState| {
            state.ball.pos = Vec3::new(COURT_HALF_X, 4.0, 0.0);
            state.ball.prev_y = 4.0;
            state.ball.vel = Vec3::new(0.0, 0.5, 0.0);
        };
        let hits = |events: &[GameEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::BackboardHit { side: HoopSide::Right }))
                .count()
        };

        at_board(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(hits(&state.drain_events()), 1);

        // Bounce off the floor re-arms the latch
        state.ball.pos = Vec3::new(COURT_HALF_X, 0.52, 0.0);
        state.ball.vel = Vec3::new(0.0, -3.0, 0.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::FloorBounce));
        assert_eq!(hits(&events), 0);

        at_board(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(hits(&state.drain_events()), 1);
        assert!(state.attempt.as_ref().unwrap().collided_with_backboard);
    }

    #[test]
    fn test_launched_shot_scores() {
        let mut state = SimState::new(21);
        state.ball.pos = Vec3::new(0.0, BALL_REST_Y, -1.0);
        state.ball.prev_y = BALL_REST_Y;
        state.set_shot_power(0.95);
        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &launch, SIM_DT);

        let events = run_until_landed(&mut state, 2000);
        assert!(!state.ball.airborne);
        assert!(events.iter().any(|e| matches!(e, GameEvent::ShotMade { .. })));
        assert!(!events.contains(&GameEvent::ShotMissed));
        assert_eq!(state.score.score, 2);
        assert_eq!(state.score.shots_scored, 1);
    }
}
