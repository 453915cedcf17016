//! Run lifecycle and the per-frame tick
//!
//! Lobby -> Playing -> GameOver -> Lobby. A tick while not playing does
//! nothing, so the simulation is frozen from the instant health runs out
//! until the next `start_game`.

use super::background::{advance_background, seed_background};
use super::difficulty::Difficulty;
use super::effects::{advance_visuals, cancel_timers, update_timers};
use super::spawn::run_spawns;
use super::state::{Entity, GameEvent, GameState, RunPhase};
use super::words::WordPool;
use crate::consts::*;

/// Begin a fresh run at timestamp `now`
pub fn start_game(state: &mut GameState, difficulty: Difficulty, now: f64) {
    cancel_timers(state);
    state.reset_run(difficulty, now);
    seed_background(state);
    state.phase = RunPhase::Playing;
    log::info!("Sector init: {} mode (seed {})", difficulty, state.seed);
    state.push_event(GameEvent::RunStarted { difficulty });
}

/// Leave the game-over screen
pub fn return_to_lobby(state: &mut GameState) {
    if state.phase == RunPhase::GameOver {
        state.phase = RunPhase::Lobby;
    }
}

/// Advance the run by one frame at timestamp `now`
pub fn tick(state: &mut GameState, pool: &WordPool, now: f64) {
    if !state.is_playing() {
        return;
    }
    state.time_ms = now;

    update_timers(state, now);
    advance_background(state);
    run_spawns(state, pool, now);

    if advance_entities(state) {
        return;
    }

    advance_visuals(state);
}

/// Move entities and resolve breaches. Returns true if the run ended.
fn advance_entities(state: &mut GameState) -> bool {
    let multiplier = state.session.speed_multiplier;
    let boundary = state.arena.boundary_x;

    let mut i = 0;
    while i < state.entities.len() {
        state.entities[i].advance(multiplier);
        if state.entities[i].has_breached(boundary) {
            let entity = state.entities.remove(i);
            if breach(state, entity) {
                return true;
            }
        } else {
            i += 1;
        }
    }
    false
}

/// Apply breach damage. Returns true if this breach ended the run.
fn breach(state: &mut GameState, entity: Entity) -> bool {
    let depleted = state.session.take_damage(BREACH_DAMAGE);
    state.session.break_combo();
    if state.flash_enabled {
        state.damage_flash = 1.0;
    }
    let health = state.session.health;
    log::info!("Integrity fracture: {} breached (health {})", entity.text, health);
    state.push_event(GameEvent::Breach {
        text: entity.text,
        health,
    });

    if depleted {
        enter_game_over(state);
    }
    depleted
}

/// Transition to GameOver exactly once per run
pub(crate) fn enter_game_over(state: &mut GameState) {
    if state.phase != RunPhase::Playing {
        return;
    }
    state.phase = RunPhase::GameOver;
    cancel_timers(state);
    let score = state.session.score;
    log::info!(
        "Game over: score {} ({} words, max combo {})",
        score,
        state.words_typed.len(),
        state.session.max_combo
    );
    state.push_event(GameEvent::GameOver { score });
}
