//! Committed-input resolution and scoring
//!
//! The first live entity (oldest spawn) whose text equals the input wins.
//! Duplicates on screen are not disambiguated.

use super::difficulty::ramp;
use super::effects::{activate_power_up, spawn_burst};
use super::state::{EntityKind, GameEvent, GameState, PowerKind};
use crate::consts::*;

/// What a committed input did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Empty input or not currently playing
    Ignored,
    /// Destroyed a hostile word
    Hostile { id: u32, points: u64 },
    /// Collected a power-up
    PowerUp { id: u32, kind: PowerKind },
    /// Nothing matched; combo broken
    NoMatch,
}

/// Trim and upper-case raw player input
pub fn normalize_input(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Points for a hostile word cleared at the given combo
pub fn word_score(combo: u32) -> u64 {
    WORD_SCORE * (1 + (combo / COMBO_STEP) as u64)
}

/// Resolve a committed input at timestamp `now`
pub fn resolve_input(state: &mut GameState, raw: &str, now: f64) -> InputOutcome {
    if !state.is_playing() {
        return InputOutcome::Ignored;
    }
    let input = normalize_input(raw);
    if input.is_empty() {
        return InputOutcome::Ignored;
    }

    let Some(index) = state.entities.iter().position(|e| e.text == input) else {
        state.session.break_combo();
        log::debug!("Unknown signal: {}", input);
        state.push_event(GameEvent::UnknownSignal { input });
        return InputOutcome::NoMatch;
    };
    let target = state.entities.remove(index);

    match target.kind {
        EntityKind::PowerUp(kind) => {
            activate_power_up(state, kind, now);
            state.session.bump_combo();
            InputOutcome::PowerUp { id: target.id, kind }
        }
        EntityKind::Hostile => {
            let points = word_score(state.session.combo);
            state.session.score += points;
            state.session.bump_combo();
            state.words_typed.push(input.clone());

            let color = state.theme.colors().primary;
            spawn_burst(state, target.center(), color);
            ramp(&mut state.session);

            log::debug!("Cleared {} (+{})", input, points);
            state.push_event(GameEvent::WordCleared {
                text: input,
                points,
            });
            InputOutcome::Hostile {
                id: target.id,
                points,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::state::{Arena, RunPhase};
    use crate::theme::Theme;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_state(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(5, Arena::default(), Theme::default());
        state.reset_run(difficulty, 0.0);
        state.phase = RunPhase::Playing;
        state
    }

    fn add_hostile(state: &mut GameState, word: &str) -> u32 {
        state.insert_entity(word.into(), Vec2::new(400.0, 200.0), 1.2, EntityKind::Hostile)
    }

    #[test]
    fn test_score_formula() {
        for combo in 0..5 {
            assert_eq!(word_score(combo), 100);
        }
        for combo in 5..10 {
            assert_eq!(word_score(combo), 200);
        }
        assert_eq!(word_score(17), 400);
    }

    #[test]
    fn test_hostile_match_scores_and_ramps() {
        let mut state = playing_state(Difficulty::Easy);
        let id = add_hostile(&mut state, "CAT");

        let outcome = resolve_input(&mut state, "  cat ", 10.0);

        assert_eq!(outcome, InputOutcome::Hostile { id, points: 100 });
        assert!(state.entities.is_empty());
        assert_eq!(state.session.score, 100);
        assert_eq!(state.session.combo, 1);
        assert_eq!(state.words_typed, ["CAT"]);
        assert!((state.session.base_speed_multiplier - 1.015).abs() < 1e-6);
        assert_eq!(state.session.spawn_interval_ms, INITIAL_SPAWN_INTERVAL_MS - 5);
        assert_eq!(state.visuals.len(), BURST_PARTICLES);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut state = playing_state(Difficulty::Easy);
        let first = add_hostile(&mut state, "DOG");
        let second = add_hostile(&mut state, "DOG");
        let outcome = resolve_input(&mut state, "dog", 0.0);
        assert_eq!(outcome, InputOutcome::Hostile { id: first, points: 100 });
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.entities[0].id, second);
    }

    #[test]
    fn test_combo_multiplier_kicks_in_at_five() {
        let mut state = playing_state(Difficulty::Medium);
        state.session.combo = 5;
        add_hostile(&mut state, "BANANA");
        let outcome = resolve_input(&mut state, "banana", 0.0);
        assert!(matches!(outcome, InputOutcome::Hostile { points: 200, .. }));
        assert_eq!(state.session.combo, 6);
        assert_eq!(state.session.max_combo, 6);
    }

    #[test]
    fn test_miss_resets_combo_only() {
        let mut state = playing_state(Difficulty::Easy);
        state.session.combo = 7;
        state.session.score = 300;
        add_hostile(&mut state, "CAT");
        assert_eq!(resolve_input(&mut state, "cot", 0.0), InputOutcome::NoMatch);
        assert_eq!(state.session.combo, 0);
        assert_eq!(state.session.score, 300);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_empty_input_is_ignored() {
        let mut state = playing_state(Difficulty::Easy);
        state.session.combo = 3;
        assert_eq!(resolve_input(&mut state, "   ", 0.0), InputOutcome::Ignored);
        assert_eq!(state.session.combo, 3);
    }

    #[test]
    fn test_input_outside_a_run_is_ignored() {
        let mut state = playing_state(Difficulty::Easy);
        add_hostile(&mut state, "CAT");
        state.phase = RunPhase::GameOver;
        assert_eq!(resolve_input(&mut state, "cat", 0.0), InputOutcome::Ignored);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_powerup_bumps_combo_without_score_or_ramp() {
        let mut state = playing_state(Difficulty::Easy);
        state.session.combo = 2;
        let id = state.insert_entity(
            PowerKind::Slow.label(),
            Vec2::new(400.0, 200.0),
            POWERUP_SPEED,
            EntityKind::PowerUp(PowerKind::Slow),
        );
        let outcome = resolve_input(&mut state, "_slow", 100.0);
        assert_eq!(outcome, InputOutcome::PowerUp { id, kind: PowerKind::Slow });
        assert_eq!(state.session.combo, 3);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.base_speed_multiplier, 1.0);
        assert!(state.session.slow_mode_active);
        assert!(state.words_typed.is_empty());
    }

    proptest! {
        #[test]
        fn test_combo_increments_on_every_match(words in prop::collection::vec("[A-Z]{3,6}", 1..30)) {
            let mut state = playing_state(Difficulty::Hard);
            for (i, word) in words.iter().enumerate() {
                add_hostile(&mut state, word);
                let before = state.session.combo;
                let score_before = state.session.score;
                let outcome = resolve_input(&mut state, &word.to_lowercase(), i as f64);
                prop_assert!(matches!(outcome, InputOutcome::Hostile { .. }), "expected a hostile match");
                prop_assert_eq!(state.session.combo, before + 1);
                prop_assert_eq!(state.session.score - score_before, word_score(before));
            }
        }
    }
}
