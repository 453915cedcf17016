//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`. Components receive it by
//! `&mut` and touch only the fields they own.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::consts::*;
use crate::label_width;
use crate::theme::{BackgroundKind, Theme};

/// Top-level run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for a difficulty pick
    Lobby,
    /// Active gameplay
    Playing,
    /// Run ended, simulation frozen
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerKind {
    /// Destroy every hostile on screen
    Clear,
    /// Slow everything down for a while
    Slow,
    /// Restore health
    Heal,
}

impl PowerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerKind::Clear => "CLEAR",
            PowerKind::Slow => "SLOW",
            PowerKind::Heal => "HEAL",
        }
    }

    /// Text the player types to collect this power-up
    pub fn label(&self) -> String {
        format!("_{}", self.as_str())
    }
}

/// Entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Hostile,
    PowerUp(PowerKind),
}

/// A scrolling target (hostile word or power-up)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    /// Uppercase text the player must type
    pub text: String,
    /// Left edge (x) and vertical center (y)
    pub pos: Vec2,
    /// Pixels per tick before the speed multiplier
    pub base_speed: f32,
    /// Label box width
    pub width: f32,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: u32, text: String, pos: Vec2, base_speed: f32, kind: EntityKind) -> Self {
        let width = label_width(&text);
        Self {
            id,
            text,
            pos,
            base_speed,
            width,
            kind,
        }
    }

    /// Move left by one tick at the given speed multiplier
    pub fn advance(&mut self, speed_multiplier: f32) {
        self.pos.x -= self.base_speed * speed_multiplier;
    }

    /// Has the entity reached the defense line?
    pub fn has_breached(&self, boundary_x: f32) -> bool {
        self.pos.x <= boundary_x
    }

    pub fn is_hostile(&self) -> bool {
        self.kind == EntityKind::Hostile
    }

    pub fn power_kind(&self) -> Option<PowerKind> {
        match self.kind {
            EntityKind::PowerUp(kind) => Some(kind),
            EntityKind::Hostile => None,
        }
    }

    /// Center of the label box
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width / 2.0, self.pos.y)
    }
}

/// Per-run session numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    /// Always within [0, MAX_HEALTH]
    pub health: i32,
    pub combo: u32,
    pub max_combo: u32,
    pub difficulty: Difficulty,
    /// Effective multiplier applied to entity movement
    pub speed_multiplier: f32,
    /// Ratchet that only grows during a run
    pub base_speed_multiplier: f32,
    pub spawn_interval_ms: u32,
    pub slow_mode_active: bool,
    /// None until the first hostile of the run (spawns immediately)
    pub last_hostile_spawn_at: Option<f64>,
    pub last_powerup_spawn_at: f64,
}

impl SessionState {
    /// Fresh session for a tier, started at `now`
    pub fn new(difficulty: Difficulty, now: f64) -> Self {
        let base = difficulty.initial_speed_multiplier();
        Self {
            score: 0,
            health: MAX_HEALTH,
            combo: 0,
            max_combo: 0,
            difficulty,
            speed_multiplier: base,
            base_speed_multiplier: base,
            spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            slow_mode_active: false,
            last_hostile_spawn_at: None,
            last_powerup_spawn_at: now,
        }
    }

    /// Count a successful match
    pub fn bump_combo(&mut self) {
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
    }

    pub fn break_combo(&mut self) {
        self.combo = 0;
    }

    /// Apply damage, clamped at zero. Returns true when health is depleted.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).clamp(0, MAX_HEALTH);
        self.health <= 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, MAX_HEALTH);
    }
}

/// Pending slow-time reversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowTimer {
    pub expires_at: f64,
}

/// Active power-up timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub slow: Option<SlowTimer>,
}

/// Transient visual effect shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualKind {
    Particle,
    Shockwave,
    Pulse,
}

/// A presentation-only effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualEffect {
    pub kind: VisualKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 1.0 at birth, removed at 0
    pub life: f32,
    /// Life lost per tick
    pub decay: f32,
    /// Particle size or ring radius
    pub radius: f32,
}

/// Ambient decoration particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundParticle {
    pub kind: BackgroundKind,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub angle: f32,
}

/// Play field geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub boundary_x: f32,
    pub spawn_margin: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            boundary_x: BOUNDARY_X,
            spawn_margin: SPAWN_MARGIN,
        }
    }
}

/// Something the host may want to show or log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { difficulty: Difficulty },
    HostileSpawned { id: u32, text: String },
    PowerUpSpawned { id: u32, kind: PowerKind },
    WordCleared { text: String, points: u64 },
    UnknownSignal { input: String },
    PowerUpActivated { kind: PowerKind },
    AreaCleared { removed: usize, points: u64 },
    SlowExpired,
    Healed { health: i32 },
    Breach { text: String, health: i32 },
    PoolUnavailable { difficulty: Difficulty },
    GameOver { score: u64 },
    ScoreSaved { points_awarded: u64 },
    SaveRequiresLogin,
    SubmissionFailed { reason: String },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: RunPhase,
    pub session: SessionState,
    /// Live entities in spawn order (oldest first)
    pub entities: Vec<Entity>,
    pub effects: ActiveEffects,
    /// Visual effects (not gameplay-affecting)
    pub visuals: Vec<VisualEffect>,
    /// Background decoration (not gameplay-affecting)
    pub background: Vec<BackgroundParticle>,
    /// Hostile words typed this run, in order
    pub words_typed: Vec<String>,
    /// Damage indicator intensity (0-1, decays)
    pub damage_flash: f32,
    /// Timestamp of the last processed tick
    pub time_ms: f64,
    pub arena: Arena,
    pub theme: Theme,
    /// Visual effect cap (0 disables them)
    pub max_visuals: usize,
    /// Damage flash enabled
    pub flash_enabled: bool,
    /// Undrained events, oldest first (capped at `MAX_EVENTS`)
    events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
    pool_warned: bool,
}

impl GameState {
    /// Create a lobby state with the given seed
    pub fn new(seed: u64, arena: Arena, theme: Theme) -> Self {
        Self {
            seed,
            phase: RunPhase::Lobby,
            session: SessionState::new(Difficulty::Easy, 0.0),
            entities: Vec::new(),
            effects: ActiveEffects::default(),
            visuals: Vec::new(),
            background: Vec::new(),
            words_typed: Vec::new(),
            damage_flash: 0.0,
            time_ms: 0.0,
            arena,
            theme,
            max_visuals: MAX_VISUALS,
            flash_enabled: true,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            pool_warned: false,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_EVENTS {
            // Remove oldest to make room
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn hostile_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_hostile()).count()
    }

    pub fn powerup_count(&self) -> usize {
        self.entities.len() - self.hostile_count()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RunPhase::Playing
    }

    /// Returns true the first time it is called in a run
    pub(crate) fn mark_pool_warned(&mut self) -> bool {
        !std::mem::replace(&mut self.pool_warned, true)
    }

    /// Reset per-run bookkeeping (ids keep increasing across runs)
    pub(crate) fn reset_run(&mut self, difficulty: Difficulty, now: f64) {
        self.session = SessionState::new(difficulty, now);
        self.entities.clear();
        self.effects = ActiveEffects::default();
        self.visuals.clear();
        self.background.clear();
        self.words_typed.clear();
        self.damage_flash = 0.0;
        self.time_ms = now;
        self.pool_warned = false;
    }

    /// Insert an entity, keeping spawn order
    pub fn insert_entity(&mut self, text: String, pos: Vec2, base_speed: f32, kind: EntityKind) -> u32 {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, text, pos, base_speed, kind));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults_follow_tier() {
        let s = SessionState::new(Difficulty::Hard, 500.0);
        assert_eq!(s.health, MAX_HEALTH);
        assert!((s.base_speed_multiplier - 1.35).abs() < 1e-6);
        assert_eq!(s.speed_multiplier, s.base_speed_multiplier);
        assert_eq!(s.spawn_interval_ms, INITIAL_SPAWN_INTERVAL_MS);
        assert_eq!(s.last_hostile_spawn_at, None);
        assert_eq!(s.last_powerup_spawn_at, 500.0);
    }

    #[test]
    fn test_health_is_clamped() {
        let mut s = SessionState::new(Difficulty::Easy, 0.0);
        assert!(!s.take_damage(75));
        assert!(s.take_damage(60));
        assert_eq!(s.health, 0);
        s.heal(500);
        assert_eq!(s.health, MAX_HEALTH);
    }

    #[test]
    fn test_max_combo_tracks_peak() {
        let mut s = SessionState::new(Difficulty::Easy, 0.0);
        s.bump_combo();
        s.bump_combo();
        s.break_combo();
        s.bump_combo();
        assert_eq!(s.combo, 1);
        assert_eq!(s.max_combo, 2);
    }

    #[test]
    fn test_powerup_labels() {
        assert_eq!(PowerKind::Slow.label(), "_SLOW");
        assert_eq!(PowerKind::Clear.label(), "_CLEAR");
    }

    #[test]
    fn test_entity_moves_and_breaches() {
        let mut e = Entity::new(1, "CAT".into(), Vec2::new(125.0, 300.0), 2.0, EntityKind::Hostile);
        assert!(!e.has_breached(BOUNDARY_X));
        e.advance(1.5);
        assert!((e.pos.x - 122.0).abs() < 1e-5);
        e.advance(1.0);
        assert!(e.has_breached(BOUNDARY_X));
        assert_eq!(e.width, 3.0 * GLYPH_WIDTH + ENTITY_PADDING);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = GameState::new(1, Arena::default(), Theme::default());
        for i in 0..MAX_EVENTS as u64 + 10 {
            state.push_event(GameEvent::GameOver { score: i });
        }
        assert_eq!(state.events().len(), MAX_EVENTS);
        assert_eq!(state.events()[0], GameEvent::GameOver { score: 10 });
        assert_eq!(state.drain_events().len(), MAX_EVENTS);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut state = GameState::new(1, Arena::default(), Theme::default());
        let a = state.insert_entity("A".into(), Vec2::ZERO, 1.0, EntityKind::Hostile);
        let b = state.insert_entity("B".into(), Vec2::ZERO, 1.0, EntityKind::PowerUp(PowerKind::Heal));
        assert!(b > a);
        assert_eq!(state.hostile_count(), 1);
        assert_eq!(state.powerup_count(), 1);
    }
}
