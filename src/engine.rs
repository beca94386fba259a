//! Game loop and lifecycle
//!
//! The engine owns one game, one surface and the input state, and is driven
//! externally: the host calls [`Engine::frame`] with a wall-clock timestamp
//! once per display frame. There is no internal thread and no timer; pausing
//! the loop pauses every in-game timer for free because game timers are all
//! dt accumulators.

use glam::Vec2;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FPS_WINDOW_MS, MAX_FRAME_DT};
use crate::input::{InputState, Key};
use crate::surface::{Color, Surface};

/// Errors surfaced at the engine boundary. Everything recoverable (bad spawn
/// positions, unknown game ids) is handled internally instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The drawing surface is absent or zero-sized. Fatal to this engine
    /// instance; the host should render its own error state.
    #[error("drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: f32, height: f32 },

    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}

/// Host-supplied engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub target_fps: u32,
    pub enable_touch: bool,
    pub enable_keyboard: bool,
    pub background_color: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            target_fps: 60,
            enable_touch: true,
            enable_keyboard: true,
            background_color: Color::rgb8(0x1a, 0x1a, 0x2e),
        }
    }
}

impl GameConfig {
    /// Load a config from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "dimensions must be positive and finite, got {}x{}",
                self.width, self.height
            )));
        }
        if self.target_fps == 0 {
            return Err(EngineError::InvalidConfig("target_fps must be nonzero".into()));
        }
        Ok(())
    }
}

/// One embeddable game.
///
/// Implementations own their whole world (entities, RNG, score) as plain
/// struct fields; `update` advances it and `render` draws it without mutating
/// it.
pub trait Game {
    /// Called once when the loop starts
    fn init(&mut self) {}

    /// Advance the simulation by `dt` seconds of wall-clock time
    fn update(&mut self, dt: f32, input: &InputState);

    /// Draw the current state. Must not mutate the simulation.
    fn render(&self, surface: &mut dyn Surface);

    /// Current score, monotone within a run until restart
    fn score(&self) -> f64;

    /// Whether the run has ended (game over or win screen)
    fn finished(&self) -> bool;
}

/// Loop lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// Frames-per-second over a rolling one-second window
#[derive(Debug)]
struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            window_start: None,
            frames: 0,
            fps: 0,
        }
    }

    fn frame(&mut self, now_ms: f64) {
        let start = *self.window_start.get_or_insert(now_ms);
        self.frames += 1;
        if now_ms - start >= FPS_WINDOW_MS {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Some(now_ms);
        }
    }
}

type ScoreSink = Box<dyn FnMut(f64)>;

/// The frame loop around one [`Game`] and one [`Surface`].
pub struct Engine<S: Surface> {
    config: GameConfig,
    game: Box<dyn Game>,
    surface: S,
    input: InputState,
    state: LoopState,
    start_ms: f64,
    last_frame_ms: Option<f64>,
    fps: FpsCounter,
    last_score: f64,
    game_over_fired: bool,
    on_score_update: Option<ScoreSink>,
    on_game_over: Option<ScoreSink>,
}

impl<S: Surface> Engine<S> {
    /// Build an engine. Fails if the config is invalid or the surface is
    /// unusable (zero-sized).
    pub fn new(config: GameConfig, game: Box<dyn Game>, surface: S) -> Result<Self, EngineError> {
        config.validate()?;
        let size = surface.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(EngineError::SurfaceUnavailable {
                width: size.x,
                height: size.y,
            });
        }
        let input = InputState::new(config.width, config.height);
        Ok(Self {
            config,
            game,
            surface,
            input,
            state: LoopState::Idle,
            start_ms: 0.0,
            last_frame_ms: None,
            fps: FpsCounter::new(),
            last_score: 0.0,
            game_over_fired: false,
            on_score_update: None,
            on_game_over: None,
        })
    }

    // --- Lifecycle ---

    /// Start the loop. Only valid from `Idle`; anything else is logged and
    /// ignored.
    pub fn start(&mut self, now_ms: f64) {
        if self.state != LoopState::Idle {
            warn!("start ignored in state {:?}", self.state);
            return;
        }
        info!("engine start");
        self.start_ms = now_ms;
        self.game.init();
        self.state = LoopState::Running;
    }

    /// Toggle `Running` and `Paused`. Other states are logged and ignored.
    pub fn pause(&mut self) {
        match self.state {
            LoopState::Running => {
                info!("engine paused");
                self.state = LoopState::Paused;
            }
            LoopState::Paused => {
                info!("engine resumed");
                self.state = LoopState::Running;
            }
            other => warn!("pause ignored in state {other:?}"),
        }
    }

    /// Stop the loop for good. Terminal: the engine never leaves `Stopped`.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        info!("engine stopped");
        self.state = LoopState::Stopped;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    // --- Frame driver ---

    /// Run one frame at wall-clock time `now_ms`.
    ///
    /// Updates the game only while `Running`, but always renders and samples
    /// FPS, so a paused game still shows its last state. Input edge flags are
    /// cleared at the end so each press/release is observed by exactly one
    /// frame.
    pub fn frame(&mut self, now_ms: f64) {
        if self.state == LoopState::Stopped {
            return;
        }

        let dt = self.delta_seconds(now_ms);
        self.fps.frame(now_ms);

        if self.state == LoopState::Running {
            self.game.update(dt, &self.input);
        }
        self.game.render(&mut self.surface);

        let score = self.game.score();
        if score != self.last_score {
            self.last_score = score;
            if let Some(sink) = &mut self.on_score_update {
                sink(score);
            }
        }
        if self.game.finished() {
            if !self.game_over_fired {
                self.game_over_fired = true;
                info!("game over, final score {score}");
                if let Some(sink) = &mut self.on_game_over {
                    sink(score);
                }
            }
        } else {
            // Run restarted; re-arm the game-over edge
            self.game_over_fired = false;
        }

        self.input.clear_edges();
    }

    /// Seconds since the previous frame, sanitized so a tab switch or
    /// debugger pause cannot teleport entities
    fn delta_seconds(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_frame_ms {
            Some(prev) => ((now_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        if !dt.is_finite() || dt < 0.0 {
            return 0.0;
        }
        dt.min(MAX_FRAME_DT)
    }

    // --- Input routing ---

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.config.enable_touch {
            self.input.pointer_down(x, y);
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.config.enable_touch {
            self.input.pointer_move(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        if self.config.enable_touch {
            self.input.pointer_up();
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.config.enable_keyboard {
            self.input.key_down(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.config.enable_keyboard {
            self.input.key_up(key);
        }
    }

    /// Forward the surface's current CSS size for pointer scaling
    pub fn set_display_size(&mut self, width: f32, height: f32) {
        self.input.set_display_size(width, height);
    }

    // --- Callbacks (the host's persistence boundary) ---

    pub fn on_score_update(&mut self, sink: impl FnMut(f64) + 'static) {
        self.on_score_update = Some(Box::new(sink));
    }

    pub fn on_game_over(&mut self, sink: impl FnMut(f64) + 'static) {
        self.on_game_over = Some(Box::new(sink));
    }

    // --- Accessors ---

    /// Milliseconds since `start`
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.start_ms
    }

    /// Frames counted over the last full one-second window
    pub fn fps(&self) -> u32 {
        self.fps.fps
    }

    pub fn score(&self) -> f64 {
        self.last_score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DisplayList;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Minimal game that accumulates dt into its score
    struct Probe {
        score: f64,
        finished: bool,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                score: 0.0,
                finished: false,
            }
        }
    }

    impl Game for Probe {
        fn update(&mut self, dt: f32, _input: &InputState) {
            self.score += (dt * 100.0) as f64;
        }

        fn render(&self, surface: &mut dyn Surface) {
            surface.clear(Color::BLACK);
        }

        fn score(&self) -> f64 {
            self.score
        }

        fn finished(&self) -> bool {
            self.finished
        }
    }

    fn engine() -> Engine<DisplayList> {
        Engine::new(
            GameConfig::default(),
            Box::new(Probe::new()),
            DisplayList::new(800.0, 600.0),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_sized_surface_rejected() {
        let result = Engine::new(
            GameConfig::default(),
            Box::new(Probe::new()),
            DisplayList::new(0.0, 600.0),
        );
        assert!(matches!(
            result,
            Err(EngineError::SurfaceUnavailable { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            width: -1.0,
            ..GameConfig::default()
        };
        let result = Engine::new(config, Box::new(Probe::new()), DisplayList::new(800.0, 600.0));
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{"width": 640, "height": 480}"#).unwrap();
        assert_eq!(config.width, 640.0);
        assert_eq!(config.target_fps, 60);
        assert!(config.enable_touch);
        assert_eq!(config.background_color.to_hex(), "#1a1a2e");
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut engine = engine();
        assert_eq!(engine.state(), LoopState::Idle);
        engine.start(0.0);
        assert_eq!(engine.state(), LoopState::Running);
        engine.start(100.0); // ignored
        assert_eq!(engine.state(), LoopState::Running);
    }

    #[test]
    fn test_pause_toggles() {
        let mut engine = engine();
        engine.pause(); // ignored while idle
        assert_eq!(engine.state(), LoopState::Idle);
        engine.start(0.0);
        engine.pause();
        assert_eq!(engine.state(), LoopState::Paused);
        engine.pause();
        assert_eq!(engine.state(), LoopState::Running);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut engine = engine();
        engine.start(0.0);
        engine.stop();
        assert_eq!(engine.state(), LoopState::Stopped);
        engine.pause();
        engine.start(50.0);
        assert_eq!(engine.state(), LoopState::Stopped);
    }

    #[test]
    fn test_paused_frames_render_without_updating() {
        let mut engine = engine();
        engine.start(0.0);
        engine.frame(0.0);
        engine.frame(16.0);
        engine.pause();
        engine.frame(32.0);
        engine.frame(48.0);

        // Downcast via score: paused frames add nothing
        let score_after_pause = engine.score();
        engine.frame(64.0);
        assert_eq!(engine.score(), score_after_pause);
        // But render still happened: the display list keeps growing
        assert!(!engine.surface().commands().is_empty());
    }

    #[test]
    fn test_first_frame_dt_is_zero() {
        let mut engine = engine();
        engine.start(1000.0);
        engine.frame(1000.0);
        assert_eq!(engine.score(), 0.0);
    }

    #[test]
    fn test_huge_dt_clamped() {
        let mut engine = engine();
        engine.start(0.0);
        engine.frame(0.0);
        // 10-second stall (tab switch); the game must see at most 0.1 s
        engine.frame(10_000.0);
        assert!(engine.score() <= 10.0 + 1e-6);
    }

    #[test]
    fn test_non_finite_dt_becomes_zero() {
        let mut engine = engine();
        engine.start(0.0);
        engine.frame(0.0);
        engine.frame(f64::NAN);
        engine.frame(f64::INFINITY);
        assert!(engine.score().is_finite());
    }

    #[test]
    fn test_fps_rolling_window() {
        let mut engine = engine();
        engine.start(0.0);
        // 60 frames over one second
        for i in 0..=60 {
            engine.frame(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(engine.fps(), 61);
    }

    #[test]
    fn test_score_callback_fires_on_change() {
        let mut engine = engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.on_score_update(move |score| sink.borrow_mut().push(score));

        engine.start(0.0);
        engine.frame(0.0); // dt 0, no score change
        engine.frame(16.0);
        engine.frame(32.0);

        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_game_over_fires_once_per_run() {
        struct Doomed {
            ticks: u32,
        }
        impl Game for Doomed {
            fn update(&mut self, _dt: f32, _input: &InputState) {
                self.ticks += 1;
            }
            fn render(&self, _surface: &mut dyn Surface) {}
            fn score(&self) -> f64 {
                42.0
            }
            fn finished(&self) -> bool {
                self.ticks >= 2
            }
        }

        let mut engine = Engine::new(
            GameConfig::default(),
            Box::new(Doomed { ticks: 0 }),
            DisplayList::new(800.0, 600.0),
        )
        .unwrap();
        let fired = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&fired);
        engine.on_game_over(move |_| *sink.borrow_mut() += 1);

        engine.start(0.0);
        for i in 0..5 {
            engine.frame(i as f64 * 16.0);
        }
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_input_edges_cleared_after_frame() {
        struct EdgeCounter {
            presses: Rc<RefCell<u32>>,
        }
        impl Game for EdgeCounter {
            fn update(&mut self, _dt: f32, input: &InputState) {
                if input.was_key_just_pressed(Key::Space) {
                    *self.presses.borrow_mut() += 1;
                }
            }
            fn render(&self, _surface: &mut dyn Surface) {}
            fn score(&self) -> f64 {
                0.0
            }
            fn finished(&self) -> bool {
                false
            }
        }

        let presses = Rc::new(RefCell::new(0u32));
        let mut engine = Engine::new(
            GameConfig::default(),
            Box::new(EdgeCounter {
                presses: Rc::clone(&presses),
            }),
            DisplayList::new(800.0, 600.0),
        )
        .unwrap();
        engine.start(0.0);
        engine.key_down(Key::Space);
        engine.frame(0.0);
        engine.frame(16.0);
        engine.frame(32.0);
        // Only the frame that saw the press observes the edge
        assert_eq!(*presses.borrow(), 1);
    }

    #[test]
    fn test_keyboard_disabled_drops_keys() {
        let config = GameConfig {
            enable_keyboard: false,
            ..GameConfig::default()
        };
        let mut engine = Engine::new(
            config,
            Box::new(Probe::new()),
            DisplayList::new(800.0, 600.0),
        )
        .unwrap();
        engine.key_down(Key::Space);
        assert!(!engine.input.is_key_down(Key::Space));
    }

    #[test]
    fn test_elapsed_ms() {
        let mut engine = engine();
        engine.start(500.0);
        assert_eq!(engine.elapsed_ms(2500.0), 2000.0);
    }
}
