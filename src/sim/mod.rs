//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, word pool and
//! sequence of (timestamp, input) calls, a run plays out identically:
//! - Seeded RNG only
//! - Host-supplied timestamps only (no clock reads)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod background;
pub mod difficulty;
pub mod effects;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod words;

pub use difficulty::{Difficulty, ramp, recompute_speed};
pub use effects::activate_power_up;
pub use input::{InputOutcome, resolve_input, word_score};
pub use spawn::run_spawns;
pub use state::{
    ActiveEffects, Arena, BackgroundParticle, Entity, EntityKind, GameEvent, GameState, PowerKind,
    RunPhase, SessionState, SlowTimer, VisualEffect, VisualKind,
};
pub use tick::{return_to_lobby, start_game, tick};
pub use words::WordPool;
