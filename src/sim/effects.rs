//! Power-up effects and transient visuals
//!
//! CLEAR and HEAL are instant. SLOW arms a single reversion timer that the
//! tick inspects; re-arming replaces it, and the reversion reads the base
//! speed at expiry so ramping during slow mode carries over.

use glam::Vec2;
use rand::Rng;

use super::difficulty::recompute_speed;
use super::state::{GameEvent, GameState, PowerKind, SlowTimer, VisualEffect, VisualKind};
use crate::consts::*;
use crate::theme::HEAL_COLOR;

/// Apply a collected power-up at time `now`
pub fn activate_power_up(state: &mut GameState, kind: PowerKind, now: f64) {
    log::info!("Power-up active: {}", kind.as_str());
    state.push_event(GameEvent::PowerUpActivated { kind });
    match kind {
        PowerKind::Clear => clear_hostiles(state),
        PowerKind::Slow => start_slow(state, now),
        PowerKind::Heal => heal(state),
    }
}

/// Remove every live hostile; power-ups stay on screen
fn clear_hostiles(state: &mut GameState) {
    let before = state.entities.len();
    state.entities.retain(|e| !e.is_hostile());
    let removed = before - state.entities.len();
    let points = CLEAR_SCORE_PER_HOSTILE * removed as u64;
    state.session.score += points;

    let center = Vec2::new(state.arena.width / 2.0, state.arena.height / 2.0);
    let color = state.theme.colors().primary;
    spawn_ring(state, VisualKind::Shockwave, center, color);

    state.push_event(GameEvent::AreaCleared { removed, points });
}

fn start_slow(state: &mut GameState, now: f64) {
    state.effects.slow = Some(SlowTimer {
        expires_at: now + SLOW_DURATION_MS,
    });
    state.session.slow_mode_active = true;
    recompute_speed(&mut state.session);
}

fn heal(state: &mut GameState) {
    state.session.heal(HEAL_AMOUNT);
    let pos = Vec2::new(state.arena.boundary_x, state.arena.height / 2.0);
    spawn_ring(state, VisualKind::Pulse, pos, HEAL_COLOR);
    let health = state.session.health;
    state.push_event(GameEvent::Healed { health });
}

/// Fire the slow reversion once its window has elapsed
pub fn update_timers(state: &mut GameState, now: f64) {
    let Some(timer) = state.effects.slow else {
        return;
    };
    if now < timer.expires_at {
        return;
    }
    state.effects.slow = None;
    state.session.slow_mode_active = false;
    recompute_speed(&mut state.session);
    log::debug!("Slow mode expired at {:.0} ms", now);
    state.push_event(GameEvent::SlowExpired);
}

/// Drop every pending timer without firing it
pub fn cancel_timers(state: &mut GameState) {
    state.effects.slow = None;
}

/// Particle burst for a destroyed word
pub fn spawn_burst(state: &mut GameState, pos: Vec2, color: u32) {
    if state.max_visuals == 0 {
        return;
    }
    for _ in 0..BURST_PARTICLES {
        let rng = state.rng();
        let effect = VisualEffect {
            kind: VisualKind::Particle,
            pos,
            vel: Vec2::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)),
            color,
            life: 1.0,
            decay: 0.02 + rng.random::<f32>() * 0.02,
            radius: 2.0 + rng.random::<f32>() * 3.0,
        };
        push_visual(state, effect);
    }
}

fn spawn_ring(state: &mut GameState, kind: VisualKind, pos: Vec2, color: u32) {
    if state.max_visuals == 0 {
        return;
    }
    push_visual(
        state,
        VisualEffect {
            kind,
            pos,
            vel: Vec2::ZERO,
            color,
            life: 1.0,
            decay: 0.03,
            radius: 0.0,
        },
    );
}

fn push_visual(state: &mut GameState, effect: VisualEffect) {
    if state.visuals.len() >= state.max_visuals {
        // Remove oldest to make room
        state.visuals.remove(0);
    }
    state.visuals.push(effect);
}

/// Advance visuals one tick and cull the dead ones
pub fn advance_visuals(state: &mut GameState) {
    for v in state.visuals.iter_mut() {
        v.life -= v.decay;
        match v.kind {
            VisualKind::Particle => {
                v.pos += v.vel;
                v.vel.y += 0.2; // Gravity
            }
            VisualKind::Shockwave => v.radius += 20.0,
            VisualKind::Pulse => v.radius += 15.0,
        }
    }
    state.visuals.retain(|v| v.life > 0.0);

    if state.damage_flash > 0.0 {
        state.damage_flash *= 0.9;
        if state.damage_flash < 0.01 {
            state.damage_flash = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{Difficulty, ramp};
    use crate::sim::state::{Arena, EntityKind};
    use crate::theme::Theme;

    fn playing_state() -> GameState {
        let mut state = GameState::new(9, Arena::default(), Theme::default());
        state.reset_run(Difficulty::Easy, 0.0);
        state
    }

    #[test]
    fn test_clear_removes_only_hostiles() {
        let mut state = playing_state();
        for word in ["ONE", "TWO", "SIX"] {
            state.insert_entity(word.into(), Vec2::new(500.0, 100.0), 1.3, EntityKind::Hostile);
        }
        state.insert_entity(
            PowerKind::Slow.label(),
            Vec2::new(600.0, 100.0),
            POWERUP_SPEED,
            EntityKind::PowerUp(PowerKind::Slow),
        );

        activate_power_up(&mut state, PowerKind::Clear, 1000.0);

        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.entities[0].power_kind(), Some(PowerKind::Slow));
        assert_eq!(state.session.score, 150);
        assert_eq!(
            state.visuals.iter().filter(|v| v.kind == VisualKind::Shockwave).count(),
            1
        );
    }

    #[test]
    fn test_slow_scales_then_reverts() {
        let mut state = playing_state();
        activate_power_up(&mut state, PowerKind::Slow, 1000.0);
        assert!(state.session.slow_mode_active);
        assert!((state.session.speed_multiplier - 0.4).abs() < 1e-6);

        update_timers(&mut state, 8999.0);
        assert!(state.session.slow_mode_active);

        update_timers(&mut state, 9000.0);
        assert!(!state.session.slow_mode_active);
        assert_eq!(state.session.speed_multiplier, state.session.base_speed_multiplier);
        assert!(state.effects.slow.is_none());
    }

    #[test]
    fn test_reversion_reads_base_at_expiry() {
        let mut state = playing_state();
        activate_power_up(&mut state, PowerKind::Slow, 0.0);
        for _ in 0..10 {
            ramp(&mut state.session);
        }
        let ramped = state.session.base_speed_multiplier;
        assert!(ramped > 1.0);
        assert!((state.session.speed_multiplier - ramped * SLOW_FACTOR).abs() < 1e-6);

        update_timers(&mut state, SLOW_DURATION_MS);
        assert_eq!(state.session.speed_multiplier, ramped);
    }

    #[test]
    fn test_reactivation_restarts_window() {
        let mut state = playing_state();
        activate_power_up(&mut state, PowerKind::Slow, 0.0);
        activate_power_up(&mut state, PowerKind::Slow, 5000.0);

        update_timers(&mut state, 8000.0);
        assert!(state.session.slow_mode_active, "first timer must be replaced");
        update_timers(&mut state, 13_000.0);
        assert!(!state.session.slow_mode_active);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut state = playing_state();
        activate_power_up(&mut state, PowerKind::Slow, 0.0);
        cancel_timers(&mut state);
        state.drain_events();
        update_timers(&mut state, 20_000.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut state = playing_state();
        state.session.health = 75;
        activate_power_up(&mut state, PowerKind::Heal, 0.0);
        assert_eq!(state.session.health, MAX_HEALTH);
        state.session.health = 25;
        activate_power_up(&mut state, PowerKind::Heal, 0.0);
        assert_eq!(state.session.health, 75);
        assert!(state.visuals.iter().any(|v| v.kind == VisualKind::Pulse && v.color == HEAL_COLOR));
    }

    #[test]
    fn test_visuals_decay_and_cull() {
        let mut state = playing_state();
        spawn_burst(&mut state, Vec2::new(300.0, 300.0), 0x1A1A1A);
        assert_eq!(state.visuals.len(), BURST_PARTICLES);
        // Slowest particle decays at 0.02/tick
        for _ in 0..51 {
            advance_visuals(&mut state);
        }
        assert!(state.visuals.is_empty());
    }

    #[test]
    fn test_visuals_respect_cap() {
        let mut state = playing_state();
        state.max_visuals = 20;
        spawn_burst(&mut state, Vec2::ZERO, 0);
        spawn_burst(&mut state, Vec2::ZERO, 0);
        assert_eq!(state.visuals.len(), 20);

        state.max_visuals = 0;
        state.visuals.clear();
        spawn_burst(&mut state, Vec2::ZERO, 0);
        assert!(state.visuals.is_empty());
    }

    #[test]
    fn test_damage_flash_fades_out() {
        let mut state = playing_state();
        state.damage_flash = 1.0;
        for _ in 0..60 {
            advance_visuals(&mut state);
        }
        assert_eq!(state.damage_flash, 0.0);
    }
}
