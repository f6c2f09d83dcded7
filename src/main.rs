//! Arcade Hoops headless demo
//!
//! Runs one timed challenge with a seeded autopilot and logs what happens.
//! Settings and high scores live under `ARCADE_HOOPS_DATA` (default
//! `.arcade-hoops`). Set `RUST_LOG=debug` to see every contact, and
//! `ARCADE_HOOPS_UTC_OFFSET` (seconds) for a local clock readout.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use rand::Rng;
    use rand_pcg::Pcg32;

    use arcade_hoops::audio::AudioManager;
    use arcade_hoops::consts::*;
    use arcade_hoops::game::MoveDirection;
    use arcade_hoops::persistence::FileStorage;
    use arcade_hoops::platform;
    use arcade_hoops::{ui, Game, GameMode, HighScores, SessionEvent, Settings};

    /// Frames to give up after (10 simulated minutes)
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Walks for a while, then shoots with a random power
    struct Autopilot {
        rng: Pcg32,
        direction: MoveDirection,
        steps_left: u32,
    }

    impl Autopilot {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::new(seed, 0xa02b_dbf7_bb3c_0a7),
                direction: MoveDirection::Right,
                steps_left: 0,
            }
        }

        fn drive(&mut self, game: &mut Game) {
            if game.state.ball.airborne || game.is_settling() {
                return;
            }
            if self.steps_left > 0 {
                self.steps_left -= 1;
                game.set_move(self.direction, self.steps_left > 0);
                if self.steps_left == 0 {
                    game.set_power(self.rng.random_range(0.35..0.95));
                    game.launch();
                }
                return;
            }
            self.direction = match self.rng.random_range(0..4) {
                0 => MoveDirection::Left,
                1 => MoveDirection::Right,
                2 => MoveDirection::Forward,
                _ => MoveDirection::Backward,
            };
            self.steps_left = self.rng.random_range(1..40);
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let data_dir =
            std::env::var("ARCADE_HOOPS_DATA").unwrap_or_else(|_| ".arcade-hoops".to_string());
        let mut storage = FileStorage::new(data_dir);
        let settings = Settings::load_from(&storage);
        let mut high_scores = HighScores::load_from(&storage);

        let mut audio = AudioManager::default();
        audio.apply_settings(&settings);

        let seed = platform::now_millis() as u64;
        log::info!("Seed: {}", seed);
        let mut game = Game::new(seed, &settings, high_scores.best);
        game.set_utc_offset(platform::utc_offset_secs());
        let mut autopilot = Autopilot::new(seed);

        game.mark_ready();
        game.select_mode(GameMode::TimedChallenge);

        let mut finished = false;
        for _ in 0..MAX_FRAMES {
            autopilot.drive(&mut game);
            game.update(SIM_DT);

            let sim_events = game.drain_sim_events();
            audio.handle_events(&sim_events);
            for feedback in sim_events.iter().filter_map(ui::feedback_for_event) {
                log::info!("{}  [{}]", feedback.text, game.hud(0).stats);
                if let Some(combo) = ui::combo_text(game.state.score.combo) {
                    log::info!("{}", combo);
                }
            }

            for event in game.drain_session_events() {
                match event {
                    SessionEvent::HighScoreOffer { score } => {
                        high_scores.offer(score);
                    }
                    SessionEvent::Countdown { seconds_remaining } if seconds_remaining % 10 == 0 => {
                        log::info!(
                            "{} remaining, score {}",
                            ui::countdown_text(seconds_remaining),
                            game.state.score.score
                        );
                    }
                    SessionEvent::Finished(summary) => {
                        if let Some(feedback) = ui::feedback_for_outcome(summary.outcome) {
                            log::info!("{}", feedback.text);
                        }
                        println!("{}", ui::summary_text(&summary));
                        if let Some(rank) = high_scores.add_session(
                            summary.score,
                            summary.makes,
                            summary.attempts,
                            platform::now_millis(),
                        ) {
                            log::info!("Leaderboard rank #{}", rank);
                        }
                    }
                    SessionEvent::AutoReset => finished = true,
                    _ => {}
                }
            }

            if finished {
                break;
            }
        }

        let hud = game.hud(platform::now_unix_secs());
        log::info!("{} ({})", hud.high_score, hud.clock);

        if let Err(e) = high_scores.save_to(&mut storage) {
            log::warn!("Could not save high scores: {}", e);
        }
        if let Err(e) = settings.save_to(&mut storage) {
            log::warn!("Could not save settings: {}", e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm32
}
