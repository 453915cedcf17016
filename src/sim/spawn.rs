//! Spawn scheduling for hostile words and power-ups

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{EntityKind, GameEvent, GameState, PowerKind};
use super::words::WordPool;
use crate::consts::*;

/// Decide this tick's spawns at timestamp `now`
pub fn run_spawns(state: &mut GameState, pool: &WordPool, now: f64) {
    let session = &state.session;
    let hostile_due = session
        .last_hostile_spawn_at
        .is_none_or(|last| now - last > session.spawn_interval_ms as f64);
    if hostile_due {
        spawn_hostile(state, pool, now);
    }

    // Fresh threshold every check, so the gap lands anywhere in 15-20 s
    let threshold = POWERUP_SPAWN_MIN_MS + state.rng().random::<f64>() * POWERUP_SPAWN_JITTER_MS;
    if now - state.session.last_powerup_spawn_at > threshold {
        spawn_powerup(state, now);
    }
}

/// Power-up kinds that may spawn at the given health
pub fn powerup_candidates(health: i32) -> &'static [PowerKind] {
    if health < MAX_HEALTH {
        &[PowerKind::Clear, PowerKind::Slow, PowerKind::Heal]
    } else {
        &[PowerKind::Clear, PowerKind::Slow]
    }
}

fn spawn_hostile(state: &mut GameState, pool: &WordPool, now: f64) {
    let difficulty = state.session.difficulty;
    let Some(word) = pool.words(difficulty).choose(state.rng()).cloned() else {
        // Empty tier: skip without touching the spawn clock
        if state.mark_pool_warned() {
            log::warn!("Word pool for {} is empty, no hostiles will spawn", difficulty);
            state.push_event(GameEvent::PoolUnavailable { difficulty });
        }
        return;
    };

    let pos = spawn_position(state);
    let base_speed = HOSTILE_BASE_SPEED + state.rng().random::<f32>() * HOSTILE_SPEED_JITTER;
    let id = state.insert_entity(word.clone(), pos, base_speed, EntityKind::Hostile);
    state.session.last_hostile_spawn_at = Some(now);
    log::debug!("Spawned hostile #{} {}", id, word);
    state.push_event(GameEvent::HostileSpawned { id, text: word });
}

fn spawn_powerup(state: &mut GameState, now: f64) {
    let candidates = powerup_candidates(state.session.health);
    let Some(&kind) = candidates.choose(state.rng()) else {
        return;
    };

    let pos = spawn_position(state);
    let id = state.insert_entity(kind.label(), pos, POWERUP_SPEED, EntityKind::PowerUp(kind));
    state.session.last_powerup_spawn_at = now;
    log::debug!("Spawned power-up #{} {}", id, kind.as_str());
    state.push_event(GameEvent::PowerUpSpawned { id, kind });
}

/// Just past the right edge, random height inside the play band
fn spawn_position(state: &mut GameState) -> Vec2 {
    let arena = state.arena;
    let x = arena.width + arena.spawn_margin;
    let low = SPAWN_Y_MARGIN.min(arena.height / 2.0);
    let high = (arena.height - SPAWN_Y_MARGIN).max(low);
    let y = if high > low {
        state.rng().random_range(low..high)
    } else {
        low
    };
    Vec2::new(x, y)
}
