//! The embedded games
//!
//! Each game is an independent [`Game`] implementation owning its whole world
//! as struct fields, seeded with its own PCG32 stream so runs are
//! reproducible. Dispatch is by the platform's string identifiers; unknown
//! identifiers get a placeholder instead of an error so a stale link renders
//! a card, not a crash.

pub mod match3;
pub mod runner;
pub mod shooter;

use glam::Vec2;
use log::warn;

use crate::engine::{Game, GameConfig};
use crate::input::InputState;
use crate::surface::{Color, Surface, TextAlign};

/// The games the platform ships
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    NeonRunner,
    PuzzleQuest,
    SpaceDefender,
}

impl GameKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "neon-runner" => Some(GameKind::NeonRunner),
            "puzzle-quest" => Some(GameKind::PuzzleQuest),
            "space-defender" => Some(GameKind::SpaceDefender),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            GameKind::NeonRunner => "neon-runner",
            GameKind::PuzzleQuest => "puzzle-quest",
            GameKind::SpaceDefender => "space-defender",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::NeonRunner => "Neon Runner",
            GameKind::PuzzleQuest => "Puzzle Quest",
            GameKind::SpaceDefender => "Space Defender",
        }
    }

    /// The engine config each game was designed against
    pub fn config(self) -> GameConfig {
        match self {
            GameKind::NeonRunner => GameConfig {
                width: 800.0,
                height: 500.0,
                background_color: Color::rgb8(0x0a, 0x0a, 0x1a),
                ..GameConfig::default()
            },
            GameKind::PuzzleQuest => GameConfig {
                width: 600.0,
                height: 700.0,
                enable_keyboard: false,
                background_color: Color::rgb8(0x1a, 0x1a, 0x2e),
                ..GameConfig::default()
            },
            GameKind::SpaceDefender => GameConfig {
                width: 800.0,
                height: 600.0,
                background_color: Color::rgb8(0x0a, 0x0a, 0x1a),
                ..GameConfig::default()
            },
        }
    }
}

/// Build the game for `id`, or the placeholder if the id is unknown
pub fn create(id: &str, seed: u64) -> Box<dyn Game> {
    match GameKind::from_id(id) {
        Some(GameKind::NeonRunner) => Box::new(runner::NeonRunner::new(seed)),
        Some(GameKind::PuzzleQuest) => Box::new(match3::PuzzleQuest::new(seed)),
        Some(GameKind::SpaceDefender) => Box::new(shooter::SpaceDefender::new(seed)),
        None => {
            warn!("unknown game id {id:?}, serving placeholder");
            Box::new(Placeholder::new(id))
        }
    }
}

/// Shown when a game id does not resolve. Never finishes, never scores.
pub struct Placeholder {
    id: String,
}

impl Placeholder {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Game for Placeholder {
    fn update(&mut self, _dt: f32, _input: &InputState) {}

    fn render(&self, surface: &mut dyn Surface) {
        let size = surface.size();
        surface.clear(Color::rgb8(0x1a, 0x1a, 0x2e));
        surface.draw_text(
            "Game not available",
            Vec2::new(size.x / 2.0, size.y / 2.0 - 20.0),
            32.0,
            Color::LIGHT,
            TextAlign::Center,
        );
        surface.draw_text(
            &self.id,
            Vec2::new(size.x / 2.0, size.y / 2.0 + 20.0),
            18.0,
            Color::rgb8(0x66, 0x66, 0x66),
            TextAlign::Center,
        );
    }

    fn score(&self) -> f64 {
        0.0
    }

    fn finished(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawCommand};

    #[test]
    fn test_known_ids_resolve() {
        assert_eq!(GameKind::from_id("neon-runner"), Some(GameKind::NeonRunner));
        assert_eq!(GameKind::from_id("puzzle-quest"), Some(GameKind::PuzzleQuest));
        assert_eq!(
            GameKind::from_id("space-defender"),
            Some(GameKind::SpaceDefender)
        );
        assert_eq!(GameKind::from_id("tetris"), None);
    }

    #[test]
    fn test_id_round_trip() {
        for kind in [
            GameKind::NeonRunner,
            GameKind::PuzzleQuest,
            GameKind::SpaceDefender,
        ] {
            assert_eq!(GameKind::from_id(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_id_gets_placeholder() {
        let mut game = create("does-not-exist", 7);
        let mut surface = DisplayList::new(800.0, 600.0);

        // The placeholder runs forever without scoring
        game.update(0.016, &InputState::new(800.0, 600.0));
        game.render(&mut surface);
        assert_eq!(game.score(), 0.0);
        assert!(!game.finished());

        let drew_notice = surface.texts().any(|t| t == "Game not available");
        assert!(drew_notice);
        assert!(matches!(surface.commands()[0], DrawCommand::Clear(_)));
    }

    #[test]
    fn test_puzzle_quest_is_touch_only() {
        let config = GameKind::PuzzleQuest.config();
        assert!(config.enable_touch);
        assert!(!config.enable_keyboard);
        assert_eq!(config.width, 600.0);
        assert_eq!(config.height, 700.0);
    }
}
