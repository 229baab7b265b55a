//! Flap Remix entry point
//!
//! Native builds run a headless autopilot for a few runs and log the results;
//! the browser build is driven from JS through `platform::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flap_remix::feedback::LogFeedback;
    use flap_remix::persistence::{FileBackend, Storage};
    use flap_remix::platform::LocalClock;
    use flap_remix::sim::{TickInput, seeded_random, system_random};
    use flap_remix::{Game, Phase, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a run after this many simulated seconds
    const RUN_TIME_CAP: f32 = 120.0;
    const DEMO_RUNS: u32 = 3;
    /// Flap once this far below the gate center
    const FLAP_MARGIN: f32 = 12.0;

    /// Flap when sinking below the center of the next unpassed gate
    fn wants_flap(game: &Game) -> bool {
        let body = game.body();
        let target = game
            .run()
            .obstacles
            .iter()
            .find(|o| o.trailing_edge() >= body.back_x())
            .map_or(game.tuning().body.start_y, |o| o.gap_mid());
        body.vel_y >= 0.0 && body.pos.y > target + FLAP_MARGIN
    }

    fn play_one(game: &mut Game, practice: bool) {
        game.start_run(practice, true);
        let mut elapsed = 0.0;
        while game.phase() == Phase::Playing && elapsed < RUN_TIME_CAP {
            if wants_flap(game) {
                game.handle_flap();
            }
            game.tick(FRAME_DT, TickInput::default());
            elapsed += FRAME_DT;
        }

        match game.last_result() {
            Some(result) => log::info!(
                "score {} (best {}) coins {} perfect {} in {:.1}s | {} | mission: {}",
                result.score,
                result.best,
                result.coins,
                result.perfect_passes,
                result.survived,
                result.hint,
                result.mission_text()
            ),
            None => {
                log::info!("Autopilot survived {:.0}s, quitting run", RUN_TIME_CAP);
                game.quit_to_home();
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Flap Remix (native) starting...");

        let path =
            std::env::var("FLAP_REMIX_SAVE").unwrap_or_else(|_| "flap-remix-save.json".to_string());
        let rng = match std::env::var("FLAP_REMIX_SEED").ok().and_then(|s| s.parse().ok()) {
            Some(seed) => {
                log::info!("Using seed {}", seed);
                seeded_random(seed)
            }
            None => system_random(),
        };

        let mut game = Game::new(
            Tuning::default(),
            Storage::open(Box::new(FileBackend::new(&path))),
            Box::new(LogFeedback),
            Box::new(LocalClock),
            rng,
        );

        for mission in game.daily_missions() {
            log::info!("Today's mission: {}", mission.name);
        }

        for _ in 0..DEMO_RUNS {
            play_one(&mut game, false);
        }
        play_one(&mut game, true);

        let stats = game.stats();
        log::info!(
            "Lifetime: {} runs, best {}, total score {}, coins {} (saved to {})",
            stats.runs,
            stats.best,
            stats.total_score,
            stats.coins,
            path
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
