//! Word Runner headless entry point
//!
//! Plays one run on a simulated 60 Hz clock with an autopilot typist.
//!
//! Usage: `word-runner [WORD_LIST] [easy|medium|hard]`
//!
//! Environment:
//! - `WORD_RUNNER_SETTINGS`: settings file (default `word_runner_settings.json`)
//! - `WORD_RUNNER_TOKEN`: session token; runs are saved to a local ledger
//! - `WORD_RUNNER_ACCURACY`: autopilot hit rate in [0, 1] (default 0.9)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use word_runner::consts::FRAME_MS;
    use word_runner::sim::{Difficulty, GameEvent, InputOutcome, RunPhase, WordPool};
    use word_runner::submission::{LocalLedger, SessionToken};
    use word_runner::{Game, HighScores, Settings};

    /// Ticks between autopilot attempts (reaction time)
    const REACTION_TICKS: u64 = 24;
    /// Stop after ten simulated minutes
    const MAX_TICKS: u64 = 60 * 60 * 10;

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let settings_path = std::env::var("WORD_RUNNER_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("word_runner_settings.json"));
        let settings = Settings::load_from(&settings_path);

        let word_list = args.next().map(PathBuf::from).unwrap_or_else(|| settings.word_list.clone());
        let difficulty = match args.next() {
            Some(arg) => Difficulty::from_str(&arg).unwrap_or_else(|| {
                log::warn!("Unknown difficulty '{}', using EASY", arg);
                Difficulty::Easy
            }),
            None => Difficulty::Easy,
        };
        let accuracy = std::env::var("WORD_RUNNER_ACCURACY")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.9)
            .clamp(0.0, 1.0);

        let pool = WordPool::load_or_empty(&word_list);
        let highscores = HighScores::load_from(&settings.highscores_path);
        let mut game = Game::new(settings, pool).with_highscores(highscores);
        let token = std::env::var("WORD_RUNNER_TOKEN").ok().map(SessionToken::new);
        if let Some(token) = token {
            game.set_session(Some(token));
        }

        let mut typist = Pcg32::seed_from_u64(game.state().seed.wrapping_add(1));
        game.start(difficulty, 0.0);

        let mut frame: u64 = 0;
        while game.phase() == RunPhase::Playing && frame < MAX_TICKS {
            frame += 1;
            let now = frame as f64 * FRAME_MS;
            game.tick(now);

            if frame % REACTION_TICKS == 0 {
                autopilot(&mut game, &mut typist, accuracy, now);
            }
            for event in game.drain_events() {
                report(&event);
            }
        }

        if game.phase() == RunPhase::Playing {
            log::info!("Time limit reached, ending session");
        }

        let mut ledger = LocalLedger::new();
        game.flush_submission(&mut ledger);
        for event in game.drain_events() {
            report(&event);
        }

        let state = game.state();
        log::info!(
            "Final score {} on {} | {} words | max combo {} | {:.1} s survived | points {}",
            state.session.score,
            difficulty,
            state.words_typed.len(),
            state.session.max_combo,
            state.time_ms / 1000.0,
            game.points()
        );
        if let Some(rank) = game.last_rank() {
            log::info!("Leaderboard rank #{}", rank);
        }
        if let Err(e) = game.save_highscores() {
            log::warn!("Failed to save high scores: {}", e);
        }
    }

    /// Type at the entity closest to the defense line
    fn autopilot(game: &mut Game, rng: &mut Pcg32, accuracy: f64, now: f64) {
        let target = game
            .state()
            .entities
            .iter()
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|e| e.text.clone());
        let Some(word) = target else {
            return;
        };
        let typed = if rng.random_bool(accuracy) {
            word
        } else {
            format!("{}Q", word)
        };
        if let InputOutcome::NoMatch = game.submit_input(&typed, now) {
            log::debug!("Autopilot fumbled '{}'", typed);
        }
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::SaveRequiresLogin => {
                log::info!("Score not saved: set WORD_RUNNER_TOKEN to save runs")
            }
            other => log::debug!("{:?}", other),
        }
    }
}
