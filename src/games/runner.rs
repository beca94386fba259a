//! Neon Runner
//!
//! Endless side-scroller: one-button jump over scrolling obstacles, orbs for
//! bonus score with a decaying multiplier. The world scrolls left at a speed
//! that ratchets up every few seconds; the player only ever moves vertically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::CULL_MARGIN;
use crate::engine::Game;
use crate::input::{InputState, Key, SwipeDirection};
use crate::rect::Rect;
use crate::surface::{Color, Surface, TextAlign};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 500.0;
const GROUND_Y: f32 = HEIGHT - 100.0;

const PLAYER_X: f32 = 100.0;
const PLAYER_W: f32 = 30.0;
const PLAYER_H: f32 = 40.0;
const JUMP_POWER: f32 = 400.0;
const GRAVITY: f32 = 1000.0;

const BASE_SPEED: f32 = 200.0;
const SPEED_STEP: f32 = 10.0;
const SPEED_INTERVAL: f32 = 5.0;
const COLLECTIBLE_INTERVAL: f32 = 1.5;
const TRAIL_LEN: usize = 10;

const MULTIPLIER_CAP: f32 = 3.0;
const MULTIPLIER_WINDOW: f32 = 5.0;

const SPIKE_COLOR: Color = Color::rgb8(0xff, 0x44, 0x44);
const WALL_COLOR: Color = Color::rgb8(0x44, 0x44, 0xff);
const BACKGROUND: Color = Color::rgb8(0x0a, 0x0a, 0x1a);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObstacleKind {
    Spike,
    Wall,
    Laser,
}

#[derive(Debug)]
struct Obstacle {
    rect: Rect,
    kind: ObstacleKind,
}

#[derive(Debug)]
struct Collectible {
    rect: Rect,
    collected: bool,
    pulse: f32,
}

#[derive(Debug)]
struct Star {
    pos: Vec2,
    size: f32,
    speed: f32,
    color: Color,
    alpha: f32,
}

/// Particle lifetimes are in milliseconds, decremented by `dt * 1000`
#[derive(Debug)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    max_life: f32,
    color: Color,
    size: f32,
}

#[derive(Debug)]
struct Player {
    pos: Vec2,
    vy: f32,
    grounded: bool,
    trail: Vec<Vec2>,
}

impl Player {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_W, PLAYER_H)
    }
}

pub struct NeonRunner {
    rng: Pcg32,
    player: Player,
    obstacles: Vec<Obstacle>,
    collectibles: Vec<Collectible>,
    stars: Vec<Star>,
    particles: Vec<Particle>,
    speed: f32,
    distance: f32,
    score: f64,
    game_over: bool,
    spawn_timer: f32,
    collectible_timer: f32,
    speed_timer: f32,
    camera_shake: f32,
    shake_offset: Vec2,
    laser_phase: f32,
    multiplier: f32,
    multiplier_timer: f32,
}

impl NeonRunner {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            rng: Pcg32::seed_from_u64(seed),
            player: Player {
                pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_H),
                vy: 0.0,
                grounded: true,
                trail: Vec::new(),
            },
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            stars: Vec::new(),
            particles: Vec::new(),
            speed: BASE_SPEED,
            distance: 0.0,
            score: 0.0,
            game_over: false,
            spawn_timer: 0.0,
            collectible_timer: 0.0,
            speed_timer: 0.0,
            camera_shake: 0.0,
            shake_offset: Vec2::ZERO,
            laser_phase: 0.0,
            multiplier: 1.0,
            multiplier_timer: 0.0,
        };
        game.reset();
        game
    }

    /// Back to a fresh run. The RNG stream continues across restarts.
    fn reset(&mut self) {
        self.player = Player {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_H),
            vy: 0.0,
            grounded: true,
            trail: Vec::new(),
        };
        self.obstacles.clear();
        self.collectibles.clear();
        self.particles.clear();
        self.speed = BASE_SPEED;
        self.distance = 0.0;
        self.score = 0.0;
        self.game_over = false;
        self.spawn_timer = 0.0;
        self.collectible_timer = 0.0;
        self.speed_timer = 0.0;
        self.camera_shake = 0.0;
        self.shake_offset = Vec2::ZERO;
        self.multiplier = 1.0;
        self.multiplier_timer = 0.0;

        self.stars.clear();
        for _ in 0..50 {
            let star = Star {
                pos: Vec2::new(
                    self.rng.random::<f32>() * WIDTH * 3.0,
                    self.rng.random::<f32>() * HEIGHT,
                ),
                size: self.rng.random::<f32>() * 3.0 + 1.0,
                speed: self.rng.random::<f32>() * 50.0 + 25.0,
                color: if self.rng.random_bool(0.5) {
                    Color::PRIMARY
                } else {
                    Color::SECONDARY
                },
                alpha: self.rng.random::<f32>() * 0.5 + 0.2,
            };
            self.stars.push(star);
        }
    }

    fn wants_jump(input: &InputState) -> bool {
        input.was_pointer_just_pressed()
            || input.was_key_just_pressed(Key::Space)
            || input.was_key_just_pressed(Key::ArrowUp)
            || input.swipe_direction() == Some(SwipeDirection::Up)
    }

    fn wants_restart(input: &InputState) -> bool {
        input.was_pointer_just_pressed() || input.was_key_just_pressed(Key::Space)
    }

    fn update_player(&mut self, dt: f32, input: &InputState) {
        if Self::wants_jump(input) && self.player.grounded {
            self.player.vy = -JUMP_POWER;
            self.player.grounded = false;
            self.spawn_jump_particles();
        }

        if !self.player.grounded {
            self.player.vy += GRAVITY * dt;
        }
        self.player.pos.y += self.player.vy * dt;

        // Ground clamp re-grounds
        if self.player.pos.y >= GROUND_Y - PLAYER_H {
            self.player.pos.y = GROUND_Y - PLAYER_H;
            self.player.vy = 0.0;
            self.player.grounded = true;
        }

        self.player.trail.push(self.player.rect().center());
        if self.player.trail.len() > TRAIL_LEN {
            self.player.trail.remove(0);
        }

        // Dust kicked up while running
        if self.player.grounded && self.rng.random_bool(0.3) {
            let vel = Vec2::new(
                -self.speed * 0.5 + self.rng.random::<f32>() * 100.0 - 50.0,
                -self.rng.random::<f32>() * 100.0,
            );
            self.particles.push(Particle {
                pos: Vec2::new(self.player.pos.x, self.player.pos.y + PLAYER_H),
                vel,
                life: 1000.0,
                max_life: 1000.0,
                color: Color::PRIMARY,
                size: self.rng.random::<f32>() * 3.0 + 1.0,
            });
        }
    }

    fn update_obstacles(&mut self, dt: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.rect.x -= self.speed * dt;
        }
        self.obstacles
            .retain(|o| o.rect.x + o.rect.w > CULL_MARGIN);

        self.spawn_timer += dt;
        if self.spawn_timer > 2.0 - (self.distance / 10_000.0).min(1.5) {
            self.spawn_obstacle();
            self.spawn_timer = 0.0;
        }
    }

    fn spawn_obstacle(&mut self) {
        let kind = match self.rng.random_range(0..3) {
            0 => ObstacleKind::Spike,
            1 => ObstacleKind::Wall,
            _ => ObstacleKind::Laser,
        };
        let rect = match kind {
            ObstacleKind::Spike => Rect::new(WIDTH + 50.0, GROUND_Y - 30.0, 30.0, 30.0),
            ObstacleKind::Wall => Rect::new(WIDTH + 50.0, GROUND_Y - 80.0, 20.0, 80.0),
            ObstacleKind::Laser => {
                let y = self.rng.random::<f32>() * (GROUND_Y - 150.0) + 50.0;
                // Malformed heights stay inside the playfield
                Rect::new(WIDTH + 50.0, y.clamp(0.0, GROUND_Y - 100.0), 5.0, 100.0)
            }
        };
        self.obstacles.push(Obstacle { rect, kind });
    }

    fn update_collectibles(&mut self, dt: f32) {
        for collectible in &mut self.collectibles {
            collectible.rect.x -= self.speed * dt;
            collectible.pulse += dt * 5.0;
        }
        self.collectibles
            .retain(|c| c.rect.x + c.rect.w > CULL_MARGIN && !c.collected);

        self.collectible_timer += dt;
        if self.collectible_timer > COLLECTIBLE_INTERVAL {
            let y = self.rng.random::<f32>() * (GROUND_Y - 100.0) + 50.0;
            self.collectibles.push(Collectible {
                rect: Rect::new(
                    WIDTH + self.rng.random::<f32>() * 200.0,
                    y.clamp(0.0, GROUND_Y - 20.0),
                    20.0,
                    20.0,
                ),
                collected: false,
                pulse: 0.0,
            });
            self.collectible_timer = 0.0;
        }
    }

    fn update_stars(&mut self, dt: f32) {
        for star in &mut self.stars {
            star.pos.x -= star.speed * dt;
            if star.pos.x < -10.0 {
                star.pos.x = WIDTH + self.rng.random::<f32>() * 200.0;
            }
        }
    }

    fn update_particles(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.life -= dt * 1000.0;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    fn check_collisions(&mut self) {
        let player_rect = self.player.rect();

        for i in 0..self.obstacles.len() {
            if player_rect.intersects(&self.obstacles[i].rect) {
                self.game_over = true;
                self.camera_shake = 20.0;
                self.spawn_explosion_particles(player_rect.center());
                break;
            }
        }

        for i in 0..self.collectibles.len() {
            if self.collectibles[i].collected {
                continue;
            }
            if player_rect.intersects(&self.collectibles[i].rect) {
                self.collectibles[i].collected = true;
                self.score += (100.0 * self.multiplier) as f64;
                self.multiplier = (self.multiplier + 0.1).min(MULTIPLIER_CAP);
                self.multiplier_timer = MULTIPLIER_WINDOW;
                let center = self.collectibles[i].rect.center();
                self.spawn_collect_particles(center);
            }
        }
    }

    fn spawn_jump_particles(&mut self) {
        let origin = Vec2::new(self.player.pos.x + PLAYER_W / 2.0, self.player.pos.y + PLAYER_H);
        for _ in 0..10 {
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(
                    self.rng.random::<f32>() * 200.0 - 100.0,
                    self.rng.random::<f32>() * 100.0 + 50.0,
                ),
                life: 800.0,
                max_life: 800.0,
                color: Color::PRIMARY,
                size: self.rng.random::<f32>() * 4.0 + 2.0,
            });
        }
    }

    fn spawn_collect_particles(&mut self, origin: Vec2) {
        for _ in 0..15 {
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(
                    self.rng.random::<f32>() * 300.0 - 150.0,
                    self.rng.random::<f32>() * 300.0 - 150.0,
                ),
                life: 1500.0,
                max_life: 1500.0,
                color: Color::SECONDARY,
                size: self.rng.random::<f32>() * 3.0 + 2.0,
            });
        }
    }

    fn spawn_explosion_particles(&mut self, origin: Vec2) {
        for _ in 0..30 {
            let color = if self.rng.random_bool(0.5) {
                SPIKE_COLOR
            } else {
                Color::PRIMARY
            };
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(
                    self.rng.random::<f32>() * 400.0 - 200.0,
                    self.rng.random::<f32>() * 400.0 - 200.0,
                ),
                life: 2000.0,
                max_life: 2000.0,
                color,
                size: self.rng.random::<f32>() * 5.0 + 3.0,
            });
        }
    }
}

impl Game for NeonRunner {
    fn update(&mut self, dt: f32, input: &InputState) {
        if self.game_over {
            if Self::wants_restart(input) {
                self.reset();
            }
            return;
        }

        self.update_player(dt, input);
        self.update_obstacles(dt);
        self.update_collectibles(dt);
        self.update_stars(dt);
        self.update_particles(dt);

        self.speed_timer += dt;
        if self.speed_timer > SPEED_INTERVAL {
            self.speed += SPEED_STEP;
            self.speed_timer = 0.0;
        }

        self.check_collisions();

        self.distance += self.speed * dt;
        self.score += ((self.speed * dt * 0.1).floor() * self.multiplier) as f64;
        self.laser_phase += dt * 10.0;

        self.camera_shake *= 0.95;
        self.shake_offset = if self.camera_shake > 0.05 {
            Vec2::new(
                self.rng.random::<f32>() * self.camera_shake - self.camera_shake / 2.0,
                self.rng.random::<f32>() * self.camera_shake - self.camera_shake / 2.0,
            )
        } else {
            Vec2::ZERO
        };

        if self.multiplier_timer > 0.0 {
            self.multiplier_timer -= dt;
            if self.multiplier_timer <= 0.0 {
                self.multiplier = 1.0;
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND);
        let shake = self.shake_offset;

        for star in &self.stars {
            surface.fill_rect(
                Rect::new(star.pos.x, star.pos.y, star.size, star.size),
                star.color.with_alpha(star.alpha),
            );
        }

        let grid = Color::PRIMARY.with_alpha(0.125);
        let mut x = 0.0;
        while x < WIDTH {
            surface.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, HEIGHT), grid, 1.0);
            x += 50.0;
        }
        let mut y = 0.0;
        while y < HEIGHT {
            surface.stroke_line(Vec2::new(0.0, y), Vec2::new(WIDTH, y), grid, 1.0);
            y += 50.0;
        }

        surface.fill_rect(
            Rect::new(shake.x, GROUND_Y + shake.y, WIDTH, HEIGHT - GROUND_Y),
            Color::PRIMARY.with_alpha(0.25),
        );
        surface.stroke_line(
            Vec2::new(0.0, GROUND_Y) + shake,
            Vec2::new(WIDTH, GROUND_Y) + shake,
            Color::PRIMARY,
            2.0,
        );

        for obstacle in &self.obstacles {
            let r = Rect::new(
                obstacle.rect.x + shake.x,
                obstacle.rect.y + shake.y,
                obstacle.rect.w,
                obstacle.rect.h,
            );
            match obstacle.kind {
                ObstacleKind::Spike => surface.fill_triangle(
                    Vec2::new(r.x, r.y + r.h),
                    Vec2::new(r.x + r.w / 2.0, r.y),
                    Vec2::new(r.x + r.w, r.y + r.h),
                    SPIKE_COLOR,
                ),
                ObstacleKind::Wall => surface.fill_rect(r, WALL_COLOR),
                ObstacleKind::Laser => {
                    let pulse = 0.5 + 0.5 * self.laser_phase.sin();
                    surface.fill_rect(r, Color::SECONDARY.with_alpha(pulse));
                }
            }
        }

        for collectible in &self.collectibles {
            if collectible.collected {
                continue;
            }
            let pulse = 0.8 + 0.2 * collectible.pulse.sin();
            let center = collectible.rect.center() + shake;
            let size = collectible.rect.w * pulse;
            surface.fill_circle(center, size / 2.0, Color::SECONDARY);
            surface.fill_circle(center, size / 4.0, Color::WHITE);
        }

        for pair in self.player.trail.windows(2) {
            surface.stroke_line(
                pair[0] + shake,
                pair[1] + shake,
                Color::PRIMARY.with_alpha(0.5),
                3.0,
            );
        }
        let body = self.player.rect();
        surface.fill_rect(
            Rect::new(body.x + 2.0 + shake.x, body.y + 2.0 + shake.y, body.w - 4.0, body.h - 4.0),
            Color::SECONDARY,
        );
        surface.stroke_rect(
            Rect::new(body.x + shake.x, body.y + shake.y, body.w, body.h),
            Color::WHITE,
            2.0,
        );

        for particle in &self.particles {
            let alpha = particle.life / particle.max_life;
            surface.fill_circle(particle.pos + shake, particle.size, particle.color.with_alpha(alpha));
        }

        surface.draw_text(
            &format!("Score: {}", self.score.floor()),
            Vec2::new(20.0, 30.0),
            24.0,
            Color::LIGHT,
            TextAlign::Left,
        );
        surface.draw_text(
            &format!("Distance: {}m", (self.distance / 10.0).floor()),
            Vec2::new(20.0, 60.0),
            18.0,
            Color::SECONDARY,
            TextAlign::Left,
        );
        surface.draw_text(
            &format!("Speed: {}", self.speed.floor()),
            Vec2::new(WIDTH - 150.0, 30.0),
            18.0,
            Color::PRIMARY,
            TextAlign::Left,
        );
        if self.multiplier > 1.0 {
            surface.draw_text(
                &format!("x{:.1}", self.multiplier),
                Vec2::new(WIDTH - 80.0, 60.0),
                20.0,
                Color::SECONDARY,
                TextAlign::Left,
            );
        }

        if self.game_over {
            surface.fill_rect(Rect::new(0.0, 0.0, WIDTH, HEIGHT), Color::BLACK.with_alpha(0.8));
            surface.draw_text(
                "GAME OVER",
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 - 60.0),
                48.0,
                Color::PRIMARY,
                TextAlign::Center,
            );
            surface.draw_text(
                &format!("Final Score: {}", self.score.floor()),
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 - 10.0),
                24.0,
                Color::SECONDARY,
                TextAlign::Center,
            );
            surface.draw_text(
                &format!("Distance: {}m", (self.distance / 10.0).floor()),
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 + 20.0),
                20.0,
                Color::LIGHT,
                TextAlign::Center,
            );
            surface.draw_text(
                "Tap or press SPACE to restart",
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 + 80.0),
                18.0,
                Color::rgb8(0xcc, 0xcc, 0xcc),
                TextAlign::Center,
            );
        }
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn finished(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn idle_input() -> InputState {
        InputState::new(WIDTH, HEIGHT)
    }

    fn jump_input() -> InputState {
        let mut input = idle_input();
        input.key_down(Key::Space);
        input
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut game = NeonRunner::new(1);
        let input = jump_input();

        game.update(0.016, &input);
        assert!(!game.player.grounded);
        let vy_after_jump = game.player.vy;
        assert!(vy_after_jump < 0.0);

        // A second press mid-air does nothing beyond gravity
        game.update(0.016, &input);
        assert!(game.player.vy > vy_after_jump);
        assert!(game.player.vy < 0.0);
    }

    #[test]
    fn test_ground_clamp_regrounds() {
        let mut game = NeonRunner::new(1);
        game.update(0.016, &jump_input());
        let input = idle_input();

        for _ in 0..120 {
            game.update(0.016, &input);
        }
        assert!(game.player.grounded);
        assert_eq!(game.player.pos.y, GROUND_Y - PLAYER_H);
        assert_eq!(game.player.vy, 0.0);
    }

    #[test]
    fn test_obstacles_culled_past_margin() {
        let mut game = NeonRunner::new(1);
        game.obstacles.push(Obstacle {
            rect: Rect::new(-81.0, GROUND_Y - 30.0, 30.0, 30.0),
            kind: ObstacleKind::Spike,
        });
        game.obstacles.push(Obstacle {
            rect: Rect::new(-65.0, GROUND_Y - 30.0, 30.0, 30.0),
            kind: ObstacleKind::Spike,
        });
        game.update(0.0, &idle_input());
        assert_eq!(game.obstacles.len(), 1);
        assert_eq!(game.obstacles[0].rect.x, -65.0);
    }

    #[test]
    fn test_collectible_pickup_scores_and_bumps_multiplier() {
        let mut game = NeonRunner::new(1);
        game.collectibles.push(Collectible {
            rect: Rect::new(PLAYER_X, GROUND_Y - PLAYER_H, 20.0, 20.0),
            collected: false,
            pulse: 0.0,
        });
        game.update(0.0, &idle_input());
        assert_eq!(game.score, 100.0);
        assert!((game.multiplier - 1.1).abs() < 1e-6);
        assert_eq!(game.multiplier_timer, MULTIPLIER_WINDOW);
    }

    #[test]
    fn test_multiplier_capped_and_expires() {
        let mut game = NeonRunner::new(1);
        game.multiplier = 2.95;
        game.collectibles.push(Collectible {
            rect: Rect::new(PLAYER_X, GROUND_Y - PLAYER_H, 20.0, 20.0),
            collected: false,
            pulse: 0.0,
        });
        game.update(0.0, &idle_input());
        assert_eq!(game.multiplier, MULTIPLIER_CAP);

        // Window runs out without further pickups
        game.multiplier_timer = 0.01;
        game.update(0.016, &idle_input());
        assert_eq!(game.multiplier, 1.0);
    }

    #[test]
    fn test_obstacle_hit_ends_run() {
        let mut game = NeonRunner::new(1);
        game.obstacles.push(Obstacle {
            rect: game.player.rect(),
            kind: ObstacleKind::Wall,
        });
        game.update(0.0, &idle_input());
        assert!(game.finished());
        assert_eq!(game.camera_shake, 20.0);
        assert!(!game.particles.is_empty());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = NeonRunner::new(1);
        let input = idle_input();
        for _ in 0..600 {
            game.update(0.016, &input);
        }
        game.game_over = true;
        game.score = 999.0;
        game.speed = 300.0;

        game.update(0.016, &jump_input());
        assert!(!game.finished());
        assert_eq!(game.score(), 0.0);
        assert_eq!(game.speed, BASE_SPEED);
        assert_eq!(game.distance, 0.0);
        assert!(game.obstacles.is_empty());
        assert!(game.collectibles.is_empty());
        assert!(game.player.grounded);
    }

    #[test]
    fn test_game_over_freezes_world_until_restart() {
        let mut game = NeonRunner::new(1);
        game.game_over = true;
        let score = game.score;
        game.update(0.5, &idle_input());
        assert!(game.finished());
        assert_eq!(game.score, score);
    }

    #[test]
    fn test_speed_ratchets() {
        let mut game = NeonRunner::new(2);
        let input = idle_input();
        let mut elapsed = 0.0f32;
        while elapsed < SPEED_INTERVAL + 0.1 {
            game.update(0.016, &input);
            if game.game_over {
                game.game_over = false; // keep the clock running for this check
            }
            elapsed += 0.016;
        }
        assert!(game.speed >= BASE_SPEED + SPEED_STEP);
    }

    #[test]
    fn test_long_run_stays_in_bounds() {
        let mut game = NeonRunner::new(3);
        let input = idle_input();
        for _ in 0..2000 {
            game.update(0.016, &input);
            if game.game_over {
                break;
            }
            for o in &game.obstacles {
                assert!(o.rect.y >= 0.0 && o.rect.y + o.rect.h <= GROUND_Y + 0.001);
                assert!(o.rect.x.is_finite());
            }
            for c in &game.collectibles {
                assert!(c.rect.y >= 0.0 && c.rect.y + c.rect.h <= GROUND_Y + 0.001);
            }
        }
    }

    #[test]
    fn test_trail_capped() {
        let mut game = NeonRunner::new(1);
        let input = idle_input();
        for _ in 0..30 {
            game.update(0.016, &input);
            if game.game_over {
                break;
            }
        }
        assert!(game.player.trail.len() <= TRAIL_LEN);
    }

    proptest! {
        #[test]
        fn prop_gravity_pulls_down_monotonically(steps in 1usize..40) {
            let mut game = NeonRunner::new(9);
            game.update(0.016, &jump_input());
            let input = idle_input();

            let mut prev_vy = game.player.vy;
            for _ in 0..steps {
                game.update(0.016, &input);
                if game.game_over || game.player.grounded {
                    break;
                }
                prop_assert!(game.player.vy > prev_vy);
                prev_vy = game.player.vy;
            }
        }
    }
}
