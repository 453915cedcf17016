//! Theme background decoration
//!
//! Purely cosmetic drift that wraps around the viewport.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, BackgroundParticle, GameState};
use crate::consts::BACKGROUND_PARTICLES;
use crate::theme::BackgroundKind;

/// Seed the decoration for the active theme (clears it for plain themes)
pub fn seed_background(state: &mut GameState) {
    state.background.clear();
    let Some(kind) = state.theme.background() else {
        return;
    };
    let arena = state.arena;
    for _ in 0..BACKGROUND_PARTICLES {
        let rng = state.rng();
        let max_size = if kind == BackgroundKind::Star { 2.0 } else { 4.0 };
        let particle = BackgroundParticle {
            kind,
            pos: Vec2::new(
                rng.random::<f32>() * arena.width,
                rng.random::<f32>() * arena.height,
            ),
            size: rng.random::<f32>() * max_size + 1.0,
            speed: rng.random::<f32>() * 0.5 + 0.1,
            angle: rng.random::<f32>() * std::f32::consts::TAU,
        };
        state.background.push(particle);
    }
}

/// Drift every decoration particle by one tick
pub fn advance_background(state: &mut GameState) {
    let arena = state.arena;
    for p in state.background.iter_mut() {
        drift(p, &arena);
    }
}

fn drift(p: &mut BackgroundParticle, arena: &Arena) {
    match p.kind {
        BackgroundKind::Star => {
            p.pos.x -= p.speed;
        }
        BackgroundKind::Ember => {
            p.pos.x -= p.speed * 2.0;
            p.pos.y -= p.angle.sin() * 0.5;
            p.angle += 0.05;
            if p.pos.y < 0.0 {
                p.pos.y = arena.height;
            }
        }
        BackgroundKind::Leaf => {
            p.pos.x -= p.speed;
            p.pos.y += p.angle.cos() * 0.5;
            p.angle += 0.02;
            if p.pos.y > arena.height {
                p.pos.y = 0.0;
            }
        }
    }
    if p.pos.x < 0.0 {
        p.pos.x = arena.width;
    }
}
