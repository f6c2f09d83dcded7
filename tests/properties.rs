//! Property tests for the physical and scoring invariants

use arcade_hoops::consts::*;
use arcade_hoops::sim::collision::resolve_rim;
use arcade_hoops::sim::{Hoop, HoopSide, ScoreState, SimState, TickInput, Verdict, classify, tick};
use glam::Vec3;
use proptest::prelude::*;

fn arb_vec(range: f32) -> impl Strategy<Value = Vec3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<[bool; 4]>(), any::<bool>()).prop_map(|(keys, launch)| TickInput {
        move_left: keys[0],
        move_right: keys[1],
        move_forward: keys[2],
        move_backward: keys[3],
        launch,
        reset: false,
        cancel_flight: false,
    })
}

proptest! {
    #[test]
    fn ball_stays_on_court(
        x in -COURT_HALF_X..COURT_HALF_X,
        y in BALL_REST_Y..8.0f32,
        z in -COURT_HALF_Z..COURT_HALF_Z,
        vel in arb_vec(25.0),
        power in 0.0f32..1.0,
        inputs in prop::collection::vec(arb_input(), 1..200),
    ) {
        let mut state = SimState::new(3);
        state.ball.pos = Vec3::new(x, y, z);
        state.ball.prev_y = y;
        state.ball.vel = vel;
        state.ball.airborne = true;
        state.set_shot_power(power);

        for input in &inputs {
            tick(&mut state, input, SIM_DT);
            let pos = state.ball.pos;
            prop_assert!(pos.x.abs() <= COURT_HALF_X, "x out of court: {}", pos.x);
            prop_assert!(pos.z.abs() <= COURT_HALF_Z, "z out of court: {}", pos.z);
            prop_assert!(pos.y >= BALL_REST_Y, "below floor: {}", pos.y);
            prop_assert!(state.ball.vel.is_finite());
        }
    }

    #[test]
    fn rim_pushout_leaves_exact_separation(
        sphere in 0..RIM_SPHERE_COUNT,
        right in any::<bool>(),
        dir in arb_vec(1.0),
        dist in 0.01f32..0.38,
        vel in arb_vec(15.0),
    ) {
        let side = if right { HoopSide::Right } else { HoopSide::Left };
        let hoop = Hoop::new(side);
        let mut state = SimState::new(1);
        state.ball.pos = hoop.rim_spheres[sphere] + dir.normalize_or(Vec3::Y) * dist;
        state.ball.vel = vel;
        state.ball.airborne = true;

        let result = resolve_rim(&mut state.ball, std::slice::from_ref(&hoop));
        prop_assert!(result.hit);
        let separation = state.ball.pos.distance(result.point);
        prop_assert!((separation - (BALL_RADIUS + RIM_SPHERE_RADIUS)).abs() < 1e-4);
    }

    #[test]
    fn combo_law(n in 1u64..60) {
        let mut score = ScoreState::default();
        for _ in 0..n {
            score.record_attempt();
            score.record_make();
        }
        prop_assert_eq!(score.score, 2 * n + n * (n - 1) / 2);
    }

    #[test]
    fn miss_resets_streak(shots in prop::collection::vec(any::<bool>(), 0..80)) {
        let mut score = ScoreState::default();
        let mut expected = 0u64;
        let mut streak = 0u64;
        for &made in &shots {
            score.record_attempt();
            if made {
                expected += BASE_POINTS + streak;
                streak += 1;
                score.record_make();
            } else {
                streak = 0;
                score.record_miss();
            }
        }
        prop_assert_eq!(score.score, expected);
        prop_assert_eq!(u64::from(score.combo), streak);
    }

    #[test]
    fn accuracy_is_pure(attempts in 0u32..500, made_frac in 0.0f64..=1.0) {
        let made = (attempts as f64 * made_frac).floor() as u32;
        let score = ScoreState {
            score: 0,
            shots_attempted: attempts,
            shots_scored: made,
            combo: 0,
        };
        let first = score.accuracy();
        prop_assert_eq!(first, score.accuracy());
        prop_assert!((0.0..=1.0).contains(&first));
    }

    #[test]
    fn close_straight_drop_is_made(angle in 0.0f32..std::f32::consts::TAU, d in 0.0f32..0.65) {
        let rim = Vec3::new(HOOP_X, RIM_HEIGHT, 0.0);
        let pos = rim + Vec3::new(angle.cos() * d, -0.05, angle.sin() * d);
        let verdict = classify(pos, Vec3::new(1.0, -3.0, 1.0), RIM_HEIGHT + 0.1, rim);
        prop_assert_eq!(verdict, Some(Verdict::Made));
    }

    #[test]
    fn wide_crossing_is_missed(angle in 0.0f32..std::f32::consts::TAU, d in 0.75f32..5.0) {
        let rim = Vec3::new(-HOOP_X, RIM_HEIGHT, 0.0);
        let pos = rim + Vec3::new(angle.cos() * d, -0.05, angle.sin() * d);
        let verdict = classify(pos, Vec3::new(1.0, -3.0, 1.0), RIM_HEIGHT + 0.1, rim);
        prop_assert_eq!(verdict, Some(Verdict::Missed));
    }
}
