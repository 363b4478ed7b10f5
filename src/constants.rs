//! Fixed gameplay constants.  Every timer is measured in ticks.

use std::time::Duration;

use glam::Vec2;

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const WIDTH: f32 = 1100.0;
pub const HEIGHT: f32 = 650.0;

/// Simulation rate of the frame loop.
pub const TICKS_PER_SECOND: u32 = 50;
pub const TICK_DURATION: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND as u64);

/// How long the final screen stays up after a lethal hit.
pub const GAME_OVER_PAUSE: Duration = Duration::from_secs(2);

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_START: Vec2 = Vec2::new(900.0, 400.0);
pub const PLAYER_SIZE: Vec2 = Vec2::new(72.0, 66.0);
pub const PLAYER_SPEED: f32 = 10.0;

/// A shot is allowed once `tick - last_shot` exceeds this.
pub const BEAM_INTERVAL: i64 = 25;
pub const FAN_BEAM_COUNT: usize = 16;

pub const HYPER_TICKS: i32 = 500;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BEAM_SIZE: Vec2 = Vec2::new(44.0, 14.0);
pub const BEAM_SPEED: f32 = 10.0;

pub const BOMB_SPEED: f32 = 6.0;
pub const BOMB_RADIUS_MIN: u32 = 10;
pub const BOMB_RADIUS_MAX: u32 = 50;
pub const BOMB_PALETTE_SIZE: u8 = 6;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: Vec2 = Vec2::new(64.0, 56.0);
pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
pub const ENEMY_SPAWN_INTERVAL: u64 = 200;
pub const ENEMY_HALT_MIN: f32 = 50.0;
pub const ENEMY_BOMB_INTERVAL_MIN: u64 = 50;
pub const ENEMY_BOMB_INTERVAL_MAX: u64 = 300;

// ── Effects ───────────────────────────────────────────────────────────────────

pub const ENEMY_EXPLOSION_TICKS: i32 = 100;
pub const BOMB_EXPLOSION_TICKS: i32 = 50;
pub const GRAVITY_TICKS: i32 = 400;
pub const EMP_TICKS: i32 = 3;
pub const SHIELD_TICKS: i32 = 400;
pub const SHIELD_THICKNESS: f32 = 20.0;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const ENEMY_POINTS: u32 = 10;
pub const BOMB_POINTS: u32 = 1;

pub const GRAVITY_COST: u32 = 200;
pub const HYPER_COST: u32 = 100;
pub const EMP_COST: u32 = 20;
pub const SHIELD_COST: u32 = 50;
