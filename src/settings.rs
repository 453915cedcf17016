//! Game settings and preferences
//!
//! Persisted as JSON next to the highscores file. Missing fields fall back
//! to defaults so older files keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::theme::Theme;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Play field width in pixels
    pub viewport_width: f32,
    /// Play field height in pixels
    pub viewport_height: f32,
    /// Defense line: entities at or left of this x breach
    pub boundary_x: f32,
    /// Distance right of the viewport where entities appear
    pub spawn_margin: f32,

    // === Simulation ===
    /// Fixed RNG seed (None = derived from the clock)
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Active theme (color tokens, background decoration)
    pub theme: Theme,
    /// Particle bursts, shockwaves and pulses
    pub particles: bool,
    /// Maximum live visual effects
    pub max_visuals: usize,

    // === Accessibility ===
    /// Reduced motion (no particles, no damage flash)
    pub reduced_motion: bool,

    // === Files ===
    /// Newline separated word list
    pub word_list: PathBuf,
    /// Local highscores file
    pub highscores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            boundary_x: BOUNDARY_X,
            spawn_margin: SPAWN_MARGIN,

            seed: None,

            theme: Theme::Brutalist,
            particles: true,
            max_visuals: MAX_VISUALS,

            reduced_motion: false,

            word_list: PathBuf::from("words.txt"),
            highscores_path: PathBuf::from("word_runner_highscores.json"),
        }
    }
}

impl Settings {
    /// Effective visual effect cap (0 disables them entirely)
    pub fn effective_max_visuals(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.max_visuals
        }
    }

    /// Effective damage flash (respects reduced_motion)
    pub fn effective_damage_flash(&self) -> bool {
        !self.reduced_motion
    }

    /// Seed to use for a new game
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| crate::now_millis() as u64)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Settings file {} is invalid ({}), using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
