//! Visual themes
//!
//! The simulation only reads color tokens and the background decoration
//! style from the active theme. Ownership and purchase live elsewhere.

use serde::{Deserialize, Serialize};

use crate::sim::PowerKind;

/// Heal pulse / heal pickup color
pub const HEAL_COLOR: u32 = 0x2ECC71;
/// Slow pickup color
pub const SLOW_COLOR: u32 = 0xADD8E6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Theme {
    #[default]
    Brutalist,
    Neon,
    Galaxy,
    Volcano,
    Vegetal,
}

/// Color tokens consumed by the renderer (RGB hex)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTokens {
    pub background: u32,
    pub primary: u32,
    pub accent: u32,
}

/// Ambient particle style drawn behind the play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundKind {
    Star,
    Ember,
    Leaf,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Brutalist,
        Theme::Neon,
        Theme::Galaxy,
        Theme::Volcano,
        Theme::Vegetal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Brutalist => "BRUTALIST",
            Theme::Neon => "NEON",
            Theme::Galaxy => "GALAXY",
            Theme::Volcano => "VOLCANO",
            Theme::Vegetal => "VEGETAL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn colors(&self) -> ColorTokens {
        let (background, primary, accent) = match self {
            Theme::Brutalist => (0xF0F0F0, 0x1A1A1A, 0xDD0000),
            Theme::Neon => (0x050008, 0x00FFFF, 0xFF00FF),
            Theme::Galaxy => (0x000208, 0xB794F4, 0x9D4EDD),
            Theme::Volcano => (0x100000, 0xFF6600, 0xFFCC00),
            Theme::Vegetal => (0x020502, 0x4CAF50, 0x2E7D32),
        };
        ColorTokens {
            background,
            primary,
            accent,
        }
    }

    /// Badge fill for a power-up label. CLEAR uses the theme's primary.
    pub fn power_badge_color(&self, kind: PowerKind) -> u32 {
        match kind {
            PowerKind::Clear => self.colors().primary,
            PowerKind::Slow => SLOW_COLOR,
            PowerKind::Heal => HEAL_COLOR,
        }
    }

    /// Background decoration for this theme (None = plain field)
    pub fn background(&self) -> Option<BackgroundKind> {
        match self {
            Theme::Galaxy => Some(BackgroundKind::Star),
            Theme::Volcano => Some(BackgroundKind::Ember),
            Theme::Vegetal => Some(BackgroundKind::Leaf),
            Theme::Brutalist | Theme::Neon => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_case_insensitively() {
        assert_eq!(Theme::from_str("galaxy"), Some(Theme::Galaxy));
        assert_eq!(Theme::from_str(" NEON "), Some(Theme::Neon));
        assert_eq!(Theme::from_str("sepia"), None);
    }

    #[test]
    fn test_only_decorated_themes_have_background() {
        assert_eq!(Theme::Brutalist.background(), None);
        assert_eq!(Theme::Volcano.background(), Some(BackgroundKind::Ember));
    }

    #[test]
    fn test_power_badges_use_pickup_colors() {
        assert_eq!(Theme::Neon.power_badge_color(PowerKind::Slow), SLOW_COLOR);
        assert_eq!(Theme::Neon.power_badge_color(PowerKind::Heal), HEAL_COLOR);
        assert_eq!(
            Theme::Volcano.power_badge_color(PowerKind::Clear),
            Theme::Volcano.colors().primary
        );
    }

    #[test]
    fn test_serializes_uppercase() {
        let json = serde_json::to_string(&Theme::Vegetal).unwrap();
        assert_eq!(json, "\"VEGETAL\"");
    }
}
