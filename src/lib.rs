//! GameHub mini-game core
//!
//! Core modules:
//! - `engine`: Game trait, frame loop state machine, FPS sampling, callbacks
//! - `input`: Pointer/keyboard normalization with per-tick edge flags
//! - `surface`: 2D drawing-surface abstraction and display-list recorder
//! - `games`: The three embedded games plus dispatch by identifier
//!
//! The core performs no I/O: score persistence and leaderboard submission are
//! the host's responsibility, reached through the engine callbacks.

pub mod engine;
pub mod games;
pub mod input;
pub mod rect;
pub mod surface;

pub use engine::{Engine, EngineError, Game, GameConfig, LoopState};
pub use games::GameKind;
pub use input::{InputState, Key, SwipeDirection};
pub use rect::Rect;
pub use surface::{Color, DisplayList, DrawCommand, Surface, TextAlign};

/// Shared engine constants
pub mod consts {
    /// Minimum pointer displacement (logical units) to register a swipe
    pub const SWIPE_THRESHOLD: f32 = 30.0;

    /// Off-screen cull margin: entities past this boundary are removed
    pub const CULL_MARGIN: f32 = -50.0;

    /// Largest frame delta fed to a game, in seconds. Tab switches and
    /// debugger pauses produce multi-second deltas that would teleport
    /// entities through each other.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// FPS sampling window in milliseconds
    pub const FPS_WINDOW_MS: f64 = 1000.0;
}
