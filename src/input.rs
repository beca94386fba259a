//! Input normalization
//!
//! Touch and mouse collapse into one pointer; key events collapse into
//! held/just-pressed/just-released sets. The host feeds raw events in display
//! (CSS) coordinates and the games poll normalized queries in logical
//! coordinates. Edge flags survive exactly one frame: the engine calls
//! [`InputState::clear_edges`] after every render pass.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::SWIPE_THRESHOLD;

/// Inferred swipe direction along the dominant displacement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Key codes the games consume. Anything else is dropped at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyA,
    KeyD,
    KeyS,
    KeyW,
}

impl Key {
    /// Map a DOM-style key code to a [`Key`], if the games care about it
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "KeyA" => Some(Key::KeyA),
            "KeyD" => Some(Key::KeyD),
            "KeyS" => Some(Key::KeyS),
            "KeyW" => Some(Key::KeyW),
            _ => None,
        }
    }
}

/// Unified touch/mouse pointer state
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    /// Current position, logical coordinates
    pub pos: Vec2,
    /// Position of the initial press, logical coordinates
    pub start: Vec2,
    pub is_down: bool,
    pub just_pressed: bool,
    pub just_released: bool,
    /// Swipe inferred from displacement since the press; `None` below threshold
    pub swipe: Option<SwipeDirection>,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            start: Vec2::ZERO,
            is_down: false,
            just_pressed: false,
            just_released: false,
            swipe: None,
        }
    }
}

/// Key sets with per-frame deltas
#[derive(Debug, Default)]
pub struct KeyboardState {
    pub down: HashSet<Key>,
    pub just_pressed: HashSet<Key>,
    pub just_released: HashSet<Key>,
}

/// Normalized input snapshot polled by the games each tick
#[derive(Debug)]
pub struct InputState {
    pointer: PointerState,
    keyboard: KeyboardState,
    /// Logical (backing) size the games simulate against
    logical: Vec2,
    /// Display (CSS) size events arrive in; responsive layouts shrink it
    display: Vec2,
}

impl InputState {
    pub fn new(logical_width: f32, logical_height: f32) -> Self {
        let logical = Vec2::new(logical_width, logical_height);
        Self {
            pointer: PointerState::default(),
            keyboard: KeyboardState::default(),
            logical,
            display: logical,
        }
    }

    /// Record the current CSS size of the surface so pointer coordinates stay
    /// correct under responsive layouts
    pub fn set_display_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.display = Vec2::new(width, height);
        }
    }

    fn to_logical(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            x * self.logical.x / self.display.x,
            y * self.logical.y / self.display.y,
        )
    }

    // --- Event intake (host-facing) ---

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let pos = self.to_logical(x, y);
        self.pointer.pos = pos;
        self.pointer.start = pos;
        self.pointer.is_down = true;
        self.pointer.just_pressed = true;
        self.pointer.swipe = None;
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.pointer.is_down {
            return;
        }
        self.pointer.pos = self.to_logical(x, y);

        let delta = self.pointer.pos - self.pointer.start;
        if delta.x.abs() > SWIPE_THRESHOLD || delta.y.abs() > SWIPE_THRESHOLD {
            self.pointer.swipe = Some(if delta.x.abs() > delta.y.abs() {
                if delta.x > 0.0 {
                    SwipeDirection::Right
                } else {
                    SwipeDirection::Left
                }
            } else if delta.y > 0.0 {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            });
        }
    }

    pub fn pointer_up(&mut self) {
        if self.pointer.is_down {
            self.pointer.is_down = false;
            self.pointer.just_released = true;
        }
    }

    /// Only the first down event while held arms `just_pressed`; key repeat
    /// from the platform is ignored
    pub fn key_down(&mut self, key: Key) {
        if self.keyboard.down.insert(key) {
            self.keyboard.just_pressed.insert(key);
        }
    }

    /// A release without a prior hold (focus loss artifacts) is ignored
    pub fn key_up(&mut self, key: Key) {
        if self.keyboard.down.remove(&key) {
            self.keyboard.just_released.insert(key);
        }
    }

    /// Drop the per-frame edge flags. The engine calls this once per frame
    /// after the render pass so every edge is observed exactly once.
    pub fn clear_edges(&mut self) {
        self.pointer.just_pressed = false;
        self.pointer.just_released = false;
        self.keyboard.just_pressed.clear();
        self.keyboard.just_released.clear();
    }

    // --- Polled queries (game-facing) ---

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keyboard.down.contains(&key)
    }

    pub fn was_key_just_pressed(&self, key: Key) -> bool {
        self.keyboard.just_pressed.contains(&key)
    }

    pub fn was_key_just_released(&self, key: Key) -> bool {
        self.keyboard.just_released.contains(&key)
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer.is_down
    }

    pub fn was_pointer_just_pressed(&self) -> bool {
        self.pointer.just_pressed
    }

    pub fn was_pointer_just_released(&self) -> bool {
        self.pointer.just_released
    }

    /// Current pointer position in logical coordinates
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer.pos
    }

    /// Swipe since the current press, if displacement crossed the threshold.
    /// Reset on the next press, not per frame.
    pub fn swipe_direction(&self) -> Option<SwipeDirection> {
        self.pointer.swipe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::new(800.0, 600.0)
    }

    #[test]
    fn test_swipe_down() {
        let mut input = input();
        input.pointer_down(0.0, 0.0);
        input.pointer_move(0.0, 40.0);
        assert_eq!(input.swipe_direction(), Some(SwipeDirection::Down));
    }

    #[test]
    fn test_swipe_right() {
        let mut input = input();
        input.pointer_down(0.0, 0.0);
        input.pointer_move(40.0, 0.0);
        assert_eq!(input.swipe_direction(), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_below_threshold_is_no_swipe() {
        let mut input = input();
        input.pointer_down(0.0, 0.0);
        input.pointer_move(10.0, 10.0);
        assert_eq!(input.swipe_direction(), None);
    }

    #[test]
    fn test_swipe_resets_on_next_press() {
        let mut input = input();
        input.pointer_down(0.0, 0.0);
        input.pointer_move(0.0, 40.0);
        input.pointer_up();
        input.pointer_down(100.0, 100.0);
        assert_eq!(input.swipe_direction(), None);
    }

    #[test]
    fn test_pointer_scaled_to_logical_size() {
        let mut input = input();
        // CSS layout shrank the 800x600 surface to 400x300
        input.set_display_size(400.0, 300.0);
        input.pointer_down(200.0, 150.0);
        assert_eq!(input.pointer_position(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_edge_flags_cleared_once_per_frame() {
        let mut input = input();
        input.pointer_down(10.0, 10.0);
        input.key_down(Key::Space);
        assert!(input.was_pointer_just_pressed());
        assert!(input.was_key_just_pressed(Key::Space));

        input.clear_edges();
        assert!(!input.was_pointer_just_pressed());
        assert!(!input.was_key_just_pressed(Key::Space));
        // Held state survives the clear
        assert!(input.is_pointer_down());
        assert!(input.is_key_down(Key::Space));
    }

    #[test]
    fn test_key_repeat_does_not_rearm_edge() {
        let mut input = input();
        input.key_down(Key::Space);
        input.clear_edges();
        input.key_down(Key::Space); // platform key repeat
        assert!(!input.was_key_just_pressed(Key::Space));
        assert!(input.is_key_down(Key::Space));
    }

    #[test]
    fn test_spurious_key_up_ignored() {
        let mut input = input();
        input.key_up(Key::KeyW);
        assert!(!input.was_key_just_released(Key::KeyW));
    }

    #[test]
    fn test_release_edge() {
        let mut input = input();
        input.key_down(Key::Space);
        input.clear_edges();
        input.key_up(Key::Space);
        assert!(input.was_key_just_released(Key::Space));
        assert!(!input.is_key_down(Key::Space));
    }

    #[test]
    fn test_move_without_press_ignored() {
        let mut input = input();
        input.pointer_move(100.0, 100.0);
        assert_eq!(input.pointer_position(), Vec2::ZERO);
        assert_eq!(input.swipe_direction(), None);
    }

    #[test]
    fn test_unknown_key_code_dropped() {
        assert_eq!(Key::from_code("F13"), None);
        assert_eq!(Key::from_code("Space"), Some(Key::Space));
    }
}
