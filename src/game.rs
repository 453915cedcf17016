//! Host-facing run controller
//!
//! `Game` wraps the simulation with the pieces a host needs around it:
//! settings, the word pool, the local leaderboard, and the score
//! submission lifecycle. Submission never blocks the loop; finished runs
//! queue up until the host takes them, sends them however it likes, and
//! reports back later. Restarting never discards a queued run.

use std::collections::VecDeque;

use crate::error::Result;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::settings::Settings;
use crate::sim::{
    self, Arena, Difficulty, GameEvent, GameState, InputOutcome, RunPhase, WordPool,
};
use crate::submission::{RunSubmission, ScoreSubmitter, SessionToken, SubmissionReceipt};

/// A finished run waiting to be sent to the scoring collaborator
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    /// Run this submission belongs to
    pub run_id: u64,
    pub token: SessionToken,
    pub run: RunSubmission,
}

pub struct Game {
    state: GameState,
    pool: WordPool,
    settings: Settings,
    session: Option<SessionToken>,
    /// Points balance shown to the player
    points: u64,
    highscores: HighScores,
    run_id: u64,
    /// Finished runs not yet handed to the host, oldest first
    pending: VecDeque<PendingSubmission>,
    last_rank: Option<usize>,
    save_requires_login: bool,
}

impl Game {
    pub fn new(settings: Settings, pool: WordPool) -> Self {
        let arena = Arena {
            width: settings.viewport_width,
            height: settings.viewport_height,
            boundary_x: settings.boundary_x,
            spawn_margin: settings.spawn_margin,
        };
        let seed = settings.resolve_seed();
        let mut state = GameState::new(seed, arena, settings.theme);
        state.max_visuals = settings.effective_max_visuals();
        state.flash_enabled = settings.effective_damage_flash();

        log::info!(
            "Game ready: {} words, {}x{} arena, theme {}",
            pool.total(),
            arena.width,
            arena.height,
            settings.theme.as_str()
        );

        Self {
            state,
            pool,
            settings,
            session: None,
            points: 0,
            highscores: HighScores::new(),
            run_id: 0,
            pending: VecDeque::new(),
            last_rank: None,
            save_requires_login: false,
        }
    }

    /// Attach an authenticated session
    pub fn with_session(mut self, token: SessionToken) -> Self {
        self.session = Some(token);
        self
    }

    pub fn with_highscores(mut self, highscores: HighScores) -> Self {
        self.highscores = highscores;
        self
    }

    /// Sign in or out; only gates whether runs are submitted
    pub fn set_session(&mut self, token: Option<SessionToken>) {
        self.session = token;
    }

    /// Begin a new run (also used for restart)
    pub fn start(&mut self, difficulty: Difficulty, now: f64) {
        self.run_id += 1;
        self.last_rank = None;
        self.save_requires_login = false;
        sim::start_game(&mut self.state, difficulty, now);
    }

    /// Advance one frame at host timestamp `now`
    pub fn tick(&mut self, now: f64) {
        let before = self.state.phase;
        sim::tick(&mut self.state, &self.pool, now);
        self.after_step(before);
    }

    /// Commit a typed word
    pub fn submit_input(&mut self, text: &str, now: f64) -> InputOutcome {
        let before = self.state.phase;
        let outcome = sim::resolve_input(&mut self.state, text, now);
        self.after_step(before);
        outcome
    }

    pub fn return_to_lobby(&mut self) {
        sim::return_to_lobby(&mut self.state);
    }

    fn after_step(&mut self, before: RunPhase) {
        if before == RunPhase::Playing && self.state.phase == RunPhase::GameOver {
            self.on_game_over();
        }
    }

    fn on_game_over(&mut self) {
        let session = &self.state.session;
        let difficulty = session.difficulty;
        let entry = HighScoreEntry {
            score: session.score,
            words: self.state.words_typed.len() as u32,
            max_combo: session.max_combo,
            timestamp: crate::now_millis(),
        };
        self.last_rank = self.highscores.add_score(difficulty, entry);
        if let Some(rank) = self.last_rank {
            log::info!("New {} high score: rank {}", difficulty, rank);
        }

        match &self.session {
            Some(token) => {
                self.pending.push_back(PendingSubmission {
                    run_id: self.run_id,
                    token: token.clone(),
                    run: RunSubmission {
                        score: self.state.session.score,
                        difficulty,
                        words_typed: self.state.words_typed.clone(),
                    },
                });
            }
            None => {
                self.save_requires_login = true;
                self.state.push_event(GameEvent::SaveRequiresLogin);
            }
        }
    }

    /// Hand the oldest finished run to the host for sending
    pub fn take_pending_submission(&mut self) -> Option<PendingSubmission> {
        self.pending.pop_front()
    }

    /// Runs waiting to be taken
    pub fn pending_submissions(&self) -> usize {
        self.pending.len()
    }

    /// Report the collaborator's answer for `run_id`.
    ///
    /// Awarded points belong to the account, so a receipt is credited even
    /// if a newer run has started since.
    pub fn complete_submission(&mut self, run_id: u64, result: Result<SubmissionReceipt>) {
        match result {
            Ok(receipt) => {
                self.points += receipt.points_awarded;
                log::info!("Score saved for run {}: +{} points", run_id, receipt.points_awarded);
                self.state.push_event(GameEvent::ScoreSaved {
                    points_awarded: receipt.points_awarded,
                });
            }
            Err(e) => {
                log::warn!("Score for run {} not saved: {}", run_id, e);
                self.state.push_event(GameEvent::SubmissionFailed {
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Send every queued run through `submitter` right away.
    /// Returns how many were sent.
    pub fn flush_submission(&mut self, submitter: &mut impl ScoreSubmitter) -> usize {
        let mut sent = 0;
        while let Some(pending) = self.take_pending_submission() {
            let result = submitter.submit(&pending.token, &pending.run);
            self.complete_submission(pending.run_id, result);
            sent += 1;
        }
        sent
    }

    /// Persist the leaderboard to the configured path
    pub fn save_highscores(&self) -> Result<()> {
        self.highscores.save_to(&self.settings.highscores_path)
    }

    /// Take the events recorded since the last call. Hosts should drain
    /// every frame; only the most recent `MAX_EVENTS` are kept.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    /// Leaderboard rank of the last finished run, if it placed
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Last run ended without a session to save it under
    pub fn save_requires_login(&self) -> bool {
        self.save_requires_login
    }
}
