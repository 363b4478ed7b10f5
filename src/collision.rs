//! Collision resolution matrix.
//!
//! Six rules run in a fixed order each tick.  A rule removes what it
//! destroys before the next rule looks, so nothing is scored twice and no
//! rule ever sees an entity that an earlier rule already destroyed.

use glam::Vec2;
use slotmap::{Key, SlotMap};

use crate::constants::*;
use crate::entities::{BombId, BombState, Explosion, GameState, GameStatus, PlayerMode};
use crate::events::{GameEvent, KillCause};
use crate::geometry::Rect;

/// Whether the run survived this tick's collisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Survived,
    Lethal,
}

/// Run every rule in priority order.  A lethal bomb hit stops resolution
/// and flips the state to [`GameStatus::GameOver`].
pub fn resolve(state: &mut GameState, events: &mut Vec<GameEvent>) -> Outcome {
    enemies_vs_beams(state, events);
    bombs_vs_beams(state, events);
    bombs_vs_shield(state, events);
    if bombs_vs_player(state, events) == Outcome::Lethal {
        state.status = GameStatus::GameOver;
        events.push(GameEvent::PlayerDefeated {
            score: state.score.value(),
        });
        return Outcome::Lethal;
    }
    enemies_vs_gravity(state, events);
    bombs_vs_gravity(state, events);
    Outcome::Survived
}

/// First live entry of `map` (in slot order) whose box overlaps `target`.
fn first_overlap<K: Key, T>(
    map: &SlotMap<K, T>,
    target: &Rect,
    rect_of: impl Fn(&T) -> Rect,
) -> Option<K> {
    map.iter()
        .find(|(_, item)| rect_of(*item).overlaps(target))
        .map(|(id, _)| id)
}

fn enemy_destroyed(state: &mut GameState, at: Vec2, cause: KillCause, events: &mut Vec<GameEvent>) {
    state.explosions.insert(Explosion::new(at, ENEMY_EXPLOSION_TICKS));
    state.score.credit(ENEMY_POINTS);
    events.push(GameEvent::EnemyDestroyed { at, cause });
}

fn bomb_destroyed(state: &mut GameState, at: Vec2, cause: KillCause, events: &mut Vec<GameEvent>) {
    state.explosions.insert(Explosion::new(at, BOMB_EXPLOSION_TICKS));
    state.score.credit(BOMB_POINTS);
    events.push(GameEvent::BombDestroyed { at, cause });
}

/// Rule 1: an enemy and the first beam touching it destroy each other.
pub fn enemies_vs_beams(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for enemy_id in state.enemies.keys().collect::<Vec<_>>() {
        let Some(enemy_rect) = state.enemies.get(enemy_id).map(|enemy| enemy.rect) else {
            continue;
        };
        if let Some(beam_id) = first_overlap(&state.beams, &enemy_rect, |beam| beam.rect) {
            state.beams.remove(beam_id);
            state.enemies.remove(enemy_id);
            enemy_destroyed(state, enemy_rect.center, KillCause::Beam, events);
        }
    }
}

/// Rule 2: a bomb and the first beam touching it destroy each other.
pub fn bombs_vs_beams(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for bomb_id in state.bombs.keys().collect::<Vec<_>>() {
        let Some(bomb_rect) = state.bombs.get(bomb_id).map(|bomb| bomb.rect) else {
            continue;
        };
        if let Some(beam_id) = first_overlap(&state.beams, &bomb_rect, |beam| beam.rect) {
            state.beams.remove(beam_id);
            state.bombs.remove(bomb_id);
            bomb_destroyed(state, bomb_rect.center, KillCause::Beam, events);
        }
    }
}

/// Rule 3: the shield absorbs every bomb touching it and stays up.
pub fn bombs_vs_shield(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(shield_rect) = state.shield.as_ref().map(|shield| shield.rect) else {
        return;
    };
    for bomb_id in state.bombs.keys().collect::<Vec<_>>() {
        let hit = state
            .bombs
            .get(bomb_id)
            .is_some_and(|bomb| bomb.rect.overlaps(&shield_rect));
        if hit {
            if let Some(bomb) = state.bombs.remove(bomb_id) {
                bomb_destroyed(state, bomb.rect.center, KillCause::Shield, events);
            }
        }
    }
}

/// Rule 4: every bomb touching the player is consumed.
///
/// A normal-mode player hit by an active bomb loses the run.  A defused
/// bomb fizzles harmlessly.  In hyper mode every bomb explodes for a point,
/// defused or not.
pub fn bombs_vs_player(state: &mut GameState, events: &mut Vec<GameEvent>) -> Outcome {
    let player_rect = state.player.rect;
    let touching: Vec<BombId> = state
        .bombs
        .iter()
        .filter(|(_, bomb)| bomb.rect.overlaps(&player_rect))
        .map(|(id, _)| id)
        .collect();

    let mut outcome = Outcome::Survived;
    for bomb_id in touching {
        let Some(bomb) = state.bombs.remove(bomb_id) else {
            continue;
        };
        match (state.player.mode, bomb.state) {
            (PlayerMode::Normal, BombState::Active) => outcome = Outcome::Lethal,
            (PlayerMode::Normal, BombState::Inactive) => {
                events.push(GameEvent::BombFizzled {
                    at: bomb.rect.center,
                });
            }
            (PlayerMode::Hyper, _) => {
                bomb_destroyed(state, bomb.rect.center, KillCause::Hyper, events);
            }
        }
    }
    outcome
}

fn gravity_covers(state: &GameState, rect: &Rect) -> bool {
    state
        .gravity_fields
        .values()
        .any(|field| field.rect().overlaps(rect))
}

/// Rule 5: gravity crushes every enemy it touches.
pub fn enemies_vs_gravity(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.gravity_fields.is_empty() {
        return;
    }
    for enemy_id in state.enemies.keys().collect::<Vec<_>>() {
        let Some(enemy_rect) = state.enemies.get(enemy_id).map(|enemy| enemy.rect) else {
            continue;
        };
        if gravity_covers(state, &enemy_rect) {
            state.enemies.remove(enemy_id);
            enemy_destroyed(state, enemy_rect.center, KillCause::Gravity, events);
        }
    }
}

/// Rule 6: gravity crushes every bomb it touches.
pub fn bombs_vs_gravity(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.gravity_fields.is_empty() {
        return;
    }
    for bomb_id in state.bombs.keys().collect::<Vec<_>>() {
        let Some(bomb_rect) = state.bombs.get(bomb_id).map(|bomb| bomb.rect) else {
            continue;
        };
        if gravity_covers(state, &bomb_rect) {
            state.bombs.remove(bomb_id);
            bomb_destroyed(state, bomb_rect.center, KillCause::Gravity, events);
        }
    }
}
