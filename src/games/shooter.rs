//! Space Defender
//!
//! Wave shooter. Enemies spawn in waves that grow by two ships each round,
//! with a boss closing every fifth wave. Collision resolution is mark-sweep:
//! hits flag entities during the scan and a retain pass removes them after,
//! so no list is mutated while it is being walked. Between waves the game
//! counts down a two-second intermission inside `update`; there is no
//! wall-clock scheduling anywhere.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::engine::Game;
use crate::input::{InputState, Key};
use crate::rect::Rect;
use crate::surface::{Color, Surface, TextAlign};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;
const CULL_MARGIN: f32 = 50.0;

const PLAYER_W: f32 = 40.0;
const PLAYER_H: f32 = 30.0;
const PLAYER_SPEED: f32 = 300.0;
const MAX_HEALTH: f32 = 100.0;
const SHIELD_RECHARGE_CAP: f32 = 50.0;
const SHIELD_RECHARGE_RATE: f32 = 10.0;
const SHIELD_RECHARGE_DELAY: f32 = 3.0;
const MAX_WEAPON_LEVEL: u32 = 4;
const SHOOT_COOLDOWN_MS: f32 = 150.0;

const FIRST_WAVE_SIZE: u32 = 5;
const WAVE_GROWTH: u32 = 2;
const INTERMISSION_SECS: f32 = 2.0;
const POWER_UP_DROP_CHANCE: f64 = 0.2;

const BACKGROUND: Color = Color::rgb8(0x0a, 0x0a, 0x1a);
const BOSS_COLOR: Color = Color::rgb8(0xff, 0x00, 0xff);
const FAST_COLOR: Color = Color::rgb8(0x00, 0xff, 0xff);
const HEAVY_COLOR: Color = Color::rgb8(0xff, 0x44, 0x44);
const HEALTH_GREEN: Color = Color::rgb8(0x00, 0xff, 0x00);
const SHIELD_CYAN: Color = Color::rgb8(0x00, 0xff, 0xff);
const BAR_BG: Color = Color::rgb8(0x33, 0x33, 0x33);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnemyKind {
    Basic,
    Fast,
    Heavy,
    Boss,
}

impl EnemyKind {
    fn color(self) -> Color {
        match self {
            EnemyKind::Basic => Color::SECONDARY,
            EnemyKind::Fast => FAST_COLOR,
            EnemyKind::Heavy => HEAVY_COLOR,
            EnemyKind::Boss => BOSS_COLOR,
        }
    }
}

#[derive(Debug)]
struct Enemy {
    pos: Vec2,
    size: Vec2,
    vel: Vec2,
    health: f32,
    max_health: f32,
    kind: EnemyKind,
    shoot_timer: f32,
    shoot_cooldown: f32,
    value: f64,
    dead: bool,
}

impl Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

#[derive(Debug)]
struct Bullet {
    pos: Vec2,
    size: Vec2,
    vel: Vec2,
    damage: f32,
    from_player: bool,
    trail: Vec<Vec2>,
    dead: bool,
}

impl Bullet {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PowerUpKind {
    Health,
    Weapon,
    Shield,
    Multishot,
}

impl PowerUpKind {
    fn color(self) -> Color {
        match self {
            PowerUpKind::Health => HEALTH_GREEN,
            PowerUpKind::Weapon => Color::PRIMARY,
            PowerUpKind::Shield => Color::rgb8(0xff, 0xff, 0x00),
            PowerUpKind::Multishot => Color::SECONDARY,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            PowerUpKind::Health => "+",
            PowerUpKind::Weapon => "⚡",
            PowerUpKind::Shield => "🛡",
            PowerUpKind::Multishot => "※",
        }
    }
}

#[derive(Debug)]
struct PowerUp {
    pos: Vec2,
    kind: PowerUpKind,
    pulse: f32,
    collected: bool,
}

const POWER_UP_SIZE: f32 = 30.0;

impl PowerUp {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

/// Expanding ring, gone after half a second
#[derive(Debug)]
struct Explosion {
    pos: Vec2,
    radius: f32,
    max_radius: f32,
    life: f32,
    max_life: f32,
}

#[derive(Debug)]
struct Star {
    pos: Vec2,
    speed: f32,
    size: f32,
    brightness: f32,
}

#[derive(Debug)]
struct PlayerShip {
    pos: Vec2,
    health: f32,
    weapon_level: u32,
    shield: f32,
    shield_recharge_timer: f32,
}

impl PlayerShip {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_W, PLAYER_H)
    }
}

pub struct SpaceDefender {
    rng: Pcg32,
    player: PlayerShip,
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    power_ups: Vec<PowerUp>,
    explosions: Vec<Explosion>,
    stars: Vec<Star>,
    score: f64,
    game_over: bool,
    wave: u32,
    wave_size: u32,
    spawned: u32,
    wave_active: bool,
    intermission: f32,
    enemy_spawn_timer: f32,
    power_up_timer: f32,
    power_up_interval: f32,
    shoot_cooldown_ms: f32,
    difficulty: f32,
    boss_spawned: bool,
    boss_pulse: f32,
}

impl SpaceDefender {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            rng: Pcg32::seed_from_u64(seed),
            player: PlayerShip {
                pos: Vec2::new(WIDTH / 2.0 - PLAYER_W / 2.0, HEIGHT - 80.0),
                health: MAX_HEALTH,
                weapon_level: 1,
                shield: 0.0,
                shield_recharge_timer: 0.0,
            },
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            stars: Vec::new(),
            score: 0.0,
            game_over: false,
            wave: 1,
            wave_size: FIRST_WAVE_SIZE,
            spawned: 0,
            wave_active: true,
            intermission: 0.0,
            enemy_spawn_timer: 0.0,
            power_up_timer: 0.0,
            power_up_interval: 10.0,
            shoot_cooldown_ms: 0.0,
            difficulty: 1.0,
            boss_spawned: false,
            boss_pulse: 0.0,
        };
        game.reset();
        game
    }

    fn reset(&mut self) {
        self.player = PlayerShip {
            pos: Vec2::new(WIDTH / 2.0 - PLAYER_W / 2.0, HEIGHT - 80.0),
            health: MAX_HEALTH,
            weapon_level: 1,
            shield: 0.0,
            shield_recharge_timer: 0.0,
        };
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.explosions.clear();
        self.score = 0.0;
        self.game_over = false;
        self.wave = 1;
        self.wave_size = FIRST_WAVE_SIZE;
        self.intermission = 0.0;
        self.power_up_timer = 0.0;
        self.power_up_interval = self.roll_power_up_interval();
        self.shoot_cooldown_ms = 0.0;
        self.boss_spawned = false;
        self.boss_pulse = 0.0;

        self.stars.clear();
        for _ in 0..100 {
            let star = Star {
                pos: Vec2::new(
                    self.rng.random::<f32>() * WIDTH,
                    self.rng.random::<f32>() * HEIGHT,
                ),
                speed: self.rng.random::<f32>() * 100.0 + 25.0,
                size: self.rng.random::<f32>() * 2.0 + 1.0,
                brightness: self.rng.random::<f32>(),
            };
            self.stars.push(star);
        }

        self.start_wave();
    }

    fn roll_power_up_interval(&mut self) -> f32 {
        10.0 + self.rng.random::<f32>() * 10.0
    }

    fn start_wave(&mut self) {
        self.wave_active = true;
        self.spawned = 0;
        self.enemy_spawn_timer = 0.0;
        self.difficulty = 1.0 + (self.wave - 1) as f32 * 0.2;
    }

    fn wants_restart(input: &InputState) -> bool {
        input.was_pointer_just_pressed() || input.was_key_just_pressed(Key::Space)
    }

    fn update_player(&mut self, dt: f32, input: &InputState) {
        let center = self.player.rect().center();
        let touch = input.is_pointer_down().then(|| input.pointer_position());

        let left = input.is_key_down(Key::ArrowLeft)
            || input.is_key_down(Key::KeyA)
            || touch.is_some_and(|t| t.x < center.x);
        let right = input.is_key_down(Key::ArrowRight)
            || input.is_key_down(Key::KeyD)
            || touch.is_some_and(|t| t.x > center.x);
        let up = input.is_key_down(Key::ArrowUp)
            || input.is_key_down(Key::KeyW)
            || touch.is_some_and(|t| t.y < center.y);
        let down = input.is_key_down(Key::ArrowDown)
            || input.is_key_down(Key::KeyS)
            || touch.is_some_and(|t| t.y > center.y);

        if left {
            self.player.pos.x -= PLAYER_SPEED * dt;
        }
        if right {
            self.player.pos.x += PLAYER_SPEED * dt;
        }
        if up {
            self.player.pos.y -= PLAYER_SPEED * dt;
        }
        if down {
            self.player.pos.y += PLAYER_SPEED * dt;
        }

        self.player.pos.x = self.player.pos.x.clamp(0.0, WIDTH - PLAYER_W);
        self.player.pos.y = self.player.pos.y.clamp(0.0, HEIGHT - PLAYER_H);
    }

    fn handle_shooting(&mut self, input: &InputState) {
        let shooting = input.is_key_down(Key::Space) || input.is_pointer_down();
        if shooting && self.shoot_cooldown_ms <= 0.0 {
            self.shoot();
            self.shoot_cooldown_ms = SHOOT_COOLDOWN_MS / self.player.weapon_level as f32;
        }
    }

    fn shoot(&mut self) {
        let cx = self.player.pos.x + PLAYER_W / 2.0;
        let cy = self.player.pos.y;
        match self.player.weapon_level {
            1 => self.spawn_player_bullet(cx, cy, 0.0),
            2 => {
                self.spawn_player_bullet(cx - 5.0, cy, 0.0);
                self.spawn_player_bullet(cx + 5.0, cy, 0.0);
            }
            3 => {
                self.spawn_player_bullet(cx, cy, 0.0);
                self.spawn_player_bullet(cx - 10.0, cy, -50.0);
                self.spawn_player_bullet(cx + 10.0, cy, 50.0);
            }
            _ => {
                self.spawn_player_bullet(cx - 10.0, cy, 0.0);
                self.spawn_player_bullet(cx + 10.0, cy, 0.0);
                self.spawn_player_bullet(cx - 15.0, cy, -100.0);
                self.spawn_player_bullet(cx + 15.0, cy, 100.0);
            }
        }
    }

    fn spawn_player_bullet(&mut self, x: f32, y: f32, vx: f32) {
        self.bullets.push(Bullet {
            pos: Vec2::new(x, y),
            size: Vec2::new(4.0, 12.0),
            vel: Vec2::new(vx, -500.0),
            damage: 25.0 * self.player.weapon_level as f32,
            from_player: true,
            trail: Vec::new(),
            dead: false,
        });
    }

    fn spawn_enemy_bullet(&mut self, x: f32, y: f32, vx: f32, vy: f32) {
        self.bullets.push(Bullet {
            pos: Vec2::new(x, y),
            size: Vec2::new(6.0, 8.0),
            vel: Vec2::new(vx, vy),
            damage: 15.0,
            from_player: false,
            trail: Vec::new(),
            dead: false,
        });
    }

    fn update_bullets(&mut self, dt: f32) {
        for bullet in &mut self.bullets {
            bullet.pos += bullet.vel * dt;
            bullet.trail.push(bullet.rect().center());
            if bullet.trail.len() > 5 {
                bullet.trail.remove(0);
            }
        }
        self.bullets.retain(|b| {
            b.pos.x > -CULL_MARGIN
                && b.pos.x < WIDTH + CULL_MARGIN
                && b.pos.y > -CULL_MARGIN
                && b.pos.y < HEIGHT + CULL_MARGIN
        });
    }

    fn update_enemies(&mut self, dt: f32) {
        if self.wave_active && self.spawned < self.wave_size {
            self.enemy_spawn_timer += dt;
            if self.enemy_spawn_timer > 1.0 / self.difficulty {
                self.spawn_enemy();
                self.enemy_spawn_timer = 0.0;
            }
        }

        let player_cx = self.player.pos.x + PLAYER_W / 2.0;
        let mut shots: Vec<(Vec2, EnemyKind)> = Vec::new();
        for enemy in &mut self.enemies {
            enemy.pos += enemy.vel * dt;

            // Steer toward the player, clamped
            if enemy.kind != EnemyKind::Boss {
                let cx = enemy.pos.x + enemy.size.x / 2.0;
                if cx < player_cx {
                    enemy.vel.x = (enemy.vel.x + 50.0 * dt).min(100.0);
                } else {
                    enemy.vel.x = (enemy.vel.x - 50.0 * dt).max(-100.0);
                }
            }

            enemy.shoot_timer += dt;
            if enemy.shoot_timer > enemy.shoot_cooldown {
                enemy.shoot_timer = 0.0;
                let muzzle = Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.pos.y + enemy.size.y);
                shots.push((muzzle, enemy.kind));
            }
        }
        for (muzzle, kind) in shots {
            if kind == EnemyKind::Boss {
                for i in -2..=2 {
                    self.spawn_enemy_bullet(
                        muzzle.x + i as f32 * 15.0,
                        muzzle.y,
                        i as f32 * 50.0,
                        200.0,
                    );
                }
            } else {
                self.spawn_enemy_bullet(muzzle.x, muzzle.y, 0.0, 150.0);
            }
        }

        self.enemies.retain(|e| e.pos.y < HEIGHT + 100.0);
    }

    fn spawn_enemy(&mut self) {
        if self.spawned >= self.wave_size {
            return;
        }
        let spawn_x = self.rng.random::<f32>() * (WIDTH - 40.0);
        let roll: f32 = self.rng.random();

        let enemy = if self.wave % 5 == 0 && self.spawned == self.wave_size - 1 && !self.boss_spawned
        {
            self.boss_spawned = true;
            Enemy {
                pos: Vec2::new(WIDTH / 2.0 - 40.0, -80.0),
                size: Vec2::new(80.0, 60.0),
                vel: Vec2::new(0.0, 30.0),
                health: 200.0 * self.difficulty,
                max_health: 200.0 * self.difficulty,
                kind: EnemyKind::Boss,
                shoot_timer: 0.0,
                shoot_cooldown: 0.3,
                value: 500.0,
                dead: false,
            }
        } else if roll < 0.6 {
            Enemy {
                pos: Vec2::new(spawn_x, -40.0),
                size: Vec2::new(30.0, 25.0),
                vel: Vec2::new(0.0, 50.0 + self.rng.random::<f32>() * 50.0),
                health: 50.0 * self.difficulty,
                max_health: 50.0 * self.difficulty,
                kind: EnemyKind::Basic,
                shoot_timer: 0.0,
                shoot_cooldown: 1.0 + self.rng.random::<f32>(),
                value: 50.0,
                dead: false,
            }
        } else if roll < 0.8 {
            Enemy {
                pos: Vec2::new(spawn_x, -30.0),
                size: Vec2::new(20.0, 20.0),
                vel: Vec2::new(
                    self.rng.random::<f32>() * 100.0 - 50.0,
                    80.0 + self.rng.random::<f32>() * 50.0,
                ),
                health: 25.0 * self.difficulty,
                max_health: 25.0 * self.difficulty,
                kind: EnemyKind::Fast,
                shoot_timer: 0.0,
                shoot_cooldown: 0.5,
                value: 75.0,
                dead: false,
            }
        } else {
            Enemy {
                pos: Vec2::new(spawn_x, -60.0),
                size: Vec2::new(50.0, 40.0),
                vel: Vec2::new(0.0, 30.0),
                health: 100.0 * self.difficulty,
                max_health: 100.0 * self.difficulty,
                kind: EnemyKind::Heavy,
                shoot_timer: 0.0,
                shoot_cooldown: 1.5,
                value: 100.0,
                dead: false,
            }
        };
        self.enemies.push(enemy);
        self.spawned += 1;
    }

    fn update_power_ups(&mut self, dt: f32) {
        self.power_up_timer += dt;
        if self.power_up_timer > self.power_up_interval {
            let kind = match self.rng.random_range(0..4) {
                0 => PowerUpKind::Health,
                1 => PowerUpKind::Weapon,
                2 => PowerUpKind::Shield,
                _ => PowerUpKind::Multishot,
            };
            let x = self.rng.random::<f32>() * (WIDTH - POWER_UP_SIZE);
            self.power_ups.push(PowerUp {
                pos: Vec2::new(x, -POWER_UP_SIZE),
                kind,
                pulse: 0.0,
                collected: false,
            });
            self.power_up_timer = 0.0;
            self.power_up_interval = self.roll_power_up_interval();
        }

        for p in &mut self.power_ups {
            p.pos.y += 50.0 * dt;
            p.pulse += dt * 3.0;
        }
        self.power_ups
            .retain(|p| p.pos.y < HEIGHT + CULL_MARGIN && !p.collected);
    }

    fn update_explosions(&mut self, dt: f32) {
        for e in &mut self.explosions {
            e.life -= dt;
            e.radius = e.max_radius * (1.0 - e.life / e.max_life);
        }
        self.explosions.retain(|e| e.life > 0.0);
    }

    fn update_stars(&mut self, dt: f32) {
        for star in &mut self.stars {
            star.pos.y += star.speed * dt;
            if star.pos.y > HEIGHT {
                star.pos.y = -5.0;
                star.pos.x = self.rng.random::<f32>() * WIDTH;
            }
        }
    }

    fn update_wave_logic(&mut self, dt: f32) {
        if self.wave_active && self.enemies.is_empty() && self.spawned >= self.wave_size {
            self.wave_active = false;
            self.wave += 1;
            self.wave_size += WAVE_GROWTH;
            self.boss_spawned = false;
            self.score += (self.wave * 100) as f64;
            self.intermission = INTERMISSION_SECS;
        }
        if !self.wave_active {
            self.intermission -= dt;
            if self.intermission <= 0.0 {
                self.start_wave();
            }
        }
    }

    fn explosion(&mut self, pos: Vec2, max_radius: f32) {
        self.explosions.push(Explosion {
            pos,
            radius: 0.0,
            max_radius,
            life: 0.5,
            max_life: 0.5,
        });
    }

    fn damage_player(&mut self, damage: f32) {
        if self.player.shield > 0.0 {
            // Shield absorbs the hit at half cost
            self.player.shield = (self.player.shield - damage / 2.0).max(0.0);
            self.player.shield_recharge_timer = SHIELD_RECHARGE_DELAY;
        } else {
            self.player.health -= damage;
        }
        if self.player.health <= 0.0 && !self.game_over {
            self.game_over = true;
            let center = self.player.rect().center();
            self.explosion(center, 50.0);
        }
    }

    fn collect_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Health => {
                self.player.health = (self.player.health + 30.0).min(MAX_HEALTH);
            }
            PowerUpKind::Weapon => {
                self.player.weapon_level = (self.player.weapon_level + 1).min(MAX_WEAPON_LEVEL);
            }
            PowerUpKind::Shield => {
                self.player.shield = (self.player.shield + 50.0).min(100.0);
            }
            PowerUpKind::Multishot => {
                self.player.weapon_level = (self.player.weapon_level + 2).min(MAX_WEAPON_LEVEL);
            }
        }
        self.score += 25.0;
    }

    fn drop_power_up(&mut self, center: Vec2) {
        let kind = match self.rng.random_range(0..3) {
            0 => PowerUpKind::Health,
            1 => PowerUpKind::Weapon,
            _ => PowerUpKind::Shield,
        };
        self.power_ups.push(PowerUp {
            pos: center - Vec2::splat(POWER_UP_SIZE / 2.0),
            kind,
            pulse: 0.0,
            collected: false,
        });
    }

    /// Mark hits first, sweep the dead after. Nothing is removed while a
    /// list is being scanned.
    fn check_collisions(&mut self) {
        let player_rect = self.player.rect();

        // Player bullets vs enemies
        for b in 0..self.bullets.len() {
            if !self.bullets[b].from_player || self.bullets[b].dead {
                continue;
            }
            let brect = self.bullets[b].rect();
            for e in 0..self.enemies.len() {
                if self.enemies[e].dead {
                    continue;
                }
                if brect.intersects(&self.enemies[e].rect()) {
                    self.enemies[e].health -= self.bullets[b].damage;
                    self.bullets[b].dead = true;
                    self.explosion(brect.center(), 15.0);
                    break;
                }
            }
        }

        // Kills
        for e in 0..self.enemies.len() {
            if self.enemies[e].dead || self.enemies[e].health > 0.0 {
                continue;
            }
            self.enemies[e].dead = true;
            let center = self.enemies[e].rect().center();
            let boss = self.enemies[e].kind == EnemyKind::Boss;
            self.score += self.enemies[e].value;
            self.explosion(center, if boss { 60.0 } else { 30.0 });
            if self.rng.random_bool(POWER_UP_DROP_CHANCE) {
                self.drop_power_up(center);
            }
        }

        // Enemy bullets vs player
        for b in 0..self.bullets.len() {
            if self.bullets[b].from_player || self.bullets[b].dead {
                continue;
            }
            if self.bullets[b].rect().intersects(&player_rect) {
                self.bullets[b].dead = true;
                let damage = self.bullets[b].damage;
                self.damage_player(damage);
            }
        }

        // Rams
        for e in 0..self.enemies.len() {
            if self.enemies[e].dead {
                continue;
            }
            if self.enemies[e].rect().intersects(&player_rect) {
                self.enemies[e].dead = true;
                let center = self.enemies[e].rect().center();
                self.damage_player(30.0);
                self.explosion(center, 30.0);
            }
        }

        // Pickups
        for p in 0..self.power_ups.len() {
            if self.power_ups[p].collected {
                continue;
            }
            if self.power_ups[p].rect().intersects(&player_rect) {
                self.power_ups[p].collected = true;
                let center = self.power_ups[p].rect().center();
                let kind = self.power_ups[p].kind;
                self.collect_power_up(kind);
                self.explosion(center, 15.0);
            }
        }

        // Sweep
        self.bullets.retain(|b| !b.dead);
        self.enemies.retain(|e| !e.dead);
        self.power_ups.retain(|p| !p.collected);
    }
}

impl Game for SpaceDefender {
    fn update(&mut self, dt: f32, input: &InputState) {
        if self.game_over {
            if Self::wants_restart(input) {
                self.reset();
            }
            return;
        }

        self.update_player(dt, input);
        self.update_bullets(dt);
        self.update_enemies(dt);
        self.update_power_ups(dt);
        self.update_explosions(dt);
        self.update_stars(dt);
        self.update_wave_logic(dt);
        self.handle_shooting(input);
        self.check_collisions();
        self.boss_pulse += dt * 10.0;

        if self.shoot_cooldown_ms > 0.0 {
            self.shoot_cooldown_ms -= dt * 1000.0;
        }

        if self.player.shield_recharge_timer > 0.0 {
            self.player.shield_recharge_timer -= dt;
        } else if self.player.shield < SHIELD_RECHARGE_CAP {
            self.player.shield =
                (self.player.shield + dt * SHIELD_RECHARGE_RATE).min(SHIELD_RECHARGE_CAP);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND);

        for star in &self.stars {
            surface.fill_circle(star.pos, star.size, Color::WHITE.with_alpha(star.brightness));
        }

        for bullet in &self.bullets {
            let color = if bullet.from_player {
                Color::PRIMARY
            } else {
                Color::SECONDARY
            };
            for pair in bullet.trail.windows(2) {
                surface.stroke_line(pair[0], pair[1], color.with_alpha(0.5), 2.0);
            }
            surface.fill_rect(bullet.rect(), color);
        }

        for enemy in &self.enemies {
            surface.fill_rect(enemy.rect(), enemy.kind.color());

            if enemy.health < enemy.max_health {
                let percent = enemy.health / enemy.max_health;
                surface.fill_rect(
                    Rect::new(enemy.pos.x, enemy.pos.y - 8.0, enemy.size.x, 4.0),
                    BAR_BG,
                );
                surface.fill_rect(
                    Rect::new(enemy.pos.x, enemy.pos.y - 8.0, enemy.size.x * percent, 4.0),
                    Color::rgb8(0xff, 0x00, 0x00),
                );
            }

            if enemy.kind == EnemyKind::Boss {
                let alpha = 0.2 + 0.2 * self.boss_pulse.sin();
                surface.stroke_rect(
                    Rect::new(
                        enemy.pos.x - 5.0,
                        enemy.pos.y - 5.0,
                        enemy.size.x + 10.0,
                        enemy.size.y + 10.0,
                    ),
                    BOSS_COLOR.with_alpha(alpha),
                    3.0,
                );
            }
        }

        for p in &self.power_ups {
            let pulse = 0.8 + 0.2 * p.pulse.sin();
            let size = POWER_UP_SIZE * pulse;
            let offset = (POWER_UP_SIZE - size) / 2.0;
            surface.fill_rect(
                Rect::new(p.pos.x + offset, p.pos.y + offset, size, size),
                p.kind.color(),
            );
            surface.draw_text(
                p.kind.icon(),
                Vec2::new(p.pos.x + POWER_UP_SIZE / 2.0, p.pos.y + POWER_UP_SIZE / 2.0 + 5.0),
                16.0,
                Color::WHITE,
                TextAlign::Center,
            );
        }

        surface.fill_rect(self.player.rect(), Color::PRIMARY);
        if self.player.shield > 0.0 {
            let alpha = self.player.shield / SHIELD_RECHARGE_CAP * 0.4;
            surface.stroke_circle(self.player.rect().center(), 30.0, SHIELD_CYAN.with_alpha(alpha), 2.0);
        }

        for e in &self.explosions {
            let alpha = e.life / e.max_life;
            surface.stroke_circle(e.pos, e.radius, Color::SECONDARY.with_alpha(alpha), 3.0);
            surface.stroke_circle(e.pos, e.radius * 0.5, Color::WHITE.with_alpha(alpha * 0.5), 1.0);
        }

        surface.draw_text(
            &format!("Score: {}", self.score.floor()),
            Vec2::new(20.0, 30.0),
            24.0,
            Color::LIGHT,
            TextAlign::Left,
        );
        surface.draw_text(
            &format!("Wave: {}", self.wave),
            Vec2::new(20.0, 60.0),
            18.0,
            Color::SECONDARY,
            TextAlign::Left,
        );

        let health_percent = (self.player.health / MAX_HEALTH).max(0.0);
        surface.draw_text("Health:", Vec2::new(20.0, 100.0), 16.0, Color::LIGHT, TextAlign::Left);
        surface.fill_rect(Rect::new(80.0, 85.0, 200.0, 20.0), BAR_BG);
        surface.fill_rect(Rect::new(80.0, 85.0, 200.0 * health_percent, 20.0), HEALTH_GREEN);

        if self.player.shield > 0.0 {
            let shield_percent = self.player.shield / SHIELD_RECHARGE_CAP;
            surface.draw_text("Shield:", Vec2::new(20.0, 130.0), 16.0, Color::LIGHT, TextAlign::Left);
            surface.fill_rect(Rect::new(80.0, 115.0, 200.0, 20.0), BAR_BG);
            surface.fill_rect(Rect::new(80.0, 115.0, 200.0 * shield_percent, 20.0), SHIELD_CYAN);
        }

        surface.draw_text(
            &format!("Weapon: Lv.{}", self.player.weapon_level),
            Vec2::new(WIDTH - 150.0, 30.0),
            18.0,
            Color::PRIMARY,
            TextAlign::Left,
        );
        surface.draw_text(
            &format!("Enemies: {}", self.enemies.len()),
            Vec2::new(WIDTH - 150.0, 60.0),
            16.0,
            Color::SECONDARY,
            TextAlign::Left,
        );

        if self.game_over {
            surface.fill_rect(Rect::new(0.0, 0.0, WIDTH, HEIGHT), Color::BLACK.with_alpha(0.8));
            surface.draw_text(
                "GAME OVER",
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 - 60.0),
                48.0,
                Color::SECONDARY,
                TextAlign::Center,
            );
            surface.draw_text(
                &format!("Final Score: {}", self.score.floor()),
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 - 10.0),
                24.0,
                Color::LIGHT,
                TextAlign::Center,
            );
            surface.draw_text(
                &format!("Wave Reached: {}", self.wave),
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 + 20.0),
                20.0,
                Color::PRIMARY,
                TextAlign::Center,
            );
            surface.draw_text(
                "Tap or press SPACE to restart",
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 + 80.0),
                18.0,
                Color::rgb8(0xcc, 0xcc, 0xcc),
                TextAlign::Center,
            );
        } else if !self.wave_active {
            surface.fill_rect(Rect::new(0.0, 0.0, WIDTH, HEIGHT), Color::BLACK.with_alpha(0.7));
            surface.draw_text(
                &format!("Wave {} Complete!", self.wave - 1),
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 - 40.0),
                36.0,
                Color::PRIMARY,
                TextAlign::Center,
            );
            surface.draw_text(
                "Prepare for next wave...",
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 + 20.0),
                20.0,
                Color::SECONDARY,
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
