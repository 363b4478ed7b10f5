//! Periodic enemy arrivals and per-enemy bomb drops.  All randomness comes
//! through the injected RNG.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::entities::{Bomb, Enemy, EnemyKind, GameState};
use crate::events::GameEvent;
use crate::geometry::direction_between;

/// A fresh enemy at the top edge with randomized column, halt line, bomb
/// cadence and sprite.
pub fn random_enemy(rng: &mut impl Rng) -> Enemy {
    let x = rng.gen_range(0..=WIDTH as u32) as f32;
    let halt_y = rng.gen_range(ENEMY_HALT_MIN as u32..=(HEIGHT / 2.0) as u32) as f32;
    let interval = rng.gen_range(ENEMY_BOMB_INTERVAL_MIN..=ENEMY_BOMB_INTERVAL_MAX);
    let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
    Enemy::new(x, kind, halt_y, interval)
}

/// One enemy every [`ENEMY_SPAWN_INTERVAL`] ticks, starting at tick 0.
pub fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    if state.tick % ENEMY_SPAWN_INTERVAL == 0 {
        let enemy = random_enemy(rng);
        events.push(GameEvent::EnemySpawned {
            at: enemy.rect.center,
        });
        state.enemies.insert(enemy);
    }
}

/// Every holding enemy whose own interval divides the tick drops a bomb
/// aimed at where the player is right now.
pub fn drop_bombs(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let tick = state.tick;
    let target = state.player.rect.center;

    // (enemy center, bomb launch point just below the hull)
    let launches: Vec<(Vec2, Vec2)> = state
        .enemies
        .values()
        .filter(|enemy| enemy.drops_bomb_at(tick))
        .map(|enemy| {
            let center = enemy.rect.center;
            (center, center + Vec2::new(0.0, (enemy.rect.height() / 2.0).floor()))
        })
        .collect();

    for (source, origin) in launches {
        let radius = rng.gen_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX) as f32;
        let palette = rng.gen_range(0..BOMB_PALETTE_SIZE);
        let bomb = Bomb::new(origin, radius, direction_between(source, target), palette);
        events.push(GameEvent::BombDropped { at: origin });
        state.bombs.insert(bomb);
    }
}
