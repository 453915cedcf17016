//! Word Runner - real-time typing combat
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, pacing, input resolution, effects)
//! - `game`: Host-facing run controller with score submission lifecycle
//! - `submission`: Score collaborator contract
//! - `highscores`: Local per-difficulty leaderboard
//! - `settings`: Data-driven viewport and presentation settings
//! - `theme`: Color tokens and background decoration styles

pub mod error;
pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod submission;
pub mod theme;

pub use error::{EngineError, Result};
pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;
pub use theme::Theme;

/// Game configuration constants
pub mod consts {
    /// Frame pacing for hosts that drive the loop themselves (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Pacing
    pub const INITIAL_SPAWN_INTERVAL_MS: u32 = 2500;
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 800;
    pub const MAX_SPEED_THRESHOLD: f32 = 5.0;

    /// Power-up spawn window: fires after 15-20 s (fresh draw each check)
    pub const POWERUP_SPAWN_MIN_MS: f64 = 15_000.0;
    pub const POWERUP_SPAWN_JITTER_MS: f64 = 5_000.0;

    /// Slow-time power-up
    pub const SLOW_FACTOR: f32 = 0.4;
    pub const SLOW_DURATION_MS: f64 = 8_000.0;

    /// Health
    pub const MAX_HEALTH: i32 = 100;
    pub const BREACH_DAMAGE: i32 = 25;
    pub const HEAL_AMOUNT: i32 = 50;

    /// Scoring
    pub const WORD_SCORE: u64 = 100;
    pub const COMBO_STEP: u32 = 5;
    pub const CLEAR_SCORE_PER_HOSTILE: u64 = 50;

    /// Entity kinematics (pixels per tick)
    pub const HOSTILE_BASE_SPEED: f32 = 1.2;
    pub const HOSTILE_SPEED_JITTER: f32 = 0.4;
    pub const POWERUP_SPEED: f32 = 1.5;

    /// Entity geometry (monospace estimate of the label box)
    pub const GLYPH_WIDTH: f32 = 11.0;
    pub const ENTITY_PADDING: f32 = 24.0;
    pub const ENTITY_HEIGHT: f32 = 36.0;

    /// Default arena layout
    pub const BOUNDARY_X: f32 = 120.0;
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const SPAWN_Y_MARGIN: f32 = 50.0;

    /// Word pool partitioning by length
    pub const MIN_WORD_LEN: usize = 3;
    pub const EASY_MAX_LEN: usize = 5;
    pub const MEDIUM_MAX_LEN: usize = 8;

    /// Visual effects
    pub const BURST_PARTICLES: usize = 15;
    pub const MAX_VISUALS: usize = 256;
    pub const BACKGROUND_PARTICLES: usize = 50;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_EVENTS: usize = 1024;
}

/// Width of an entity label box for `text`
#[inline]
pub fn label_width(text: &str) -> f32 {
    text.chars().count() as f32 * consts::GLYPH_WIDTH + consts::ENTITY_PADDING
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
