//! The per-tick simulation step.
//!
//! `tick` mutates the state in place and reports what happened as a list of
//! [`GameEvent`]s.  All randomness comes through the injected RNG, so a
//! seeded RNG and the same inputs replay the same run.

use rand::Rng;
use slotmap::SlotMap;

use crate::abilities;
use crate::collision::{self, Outcome};
use crate::constants::PLAYER_START;
use crate::entities::{GameState, GameStatus, Player, Score};
use crate::events::GameEvent;
use crate::input::TickInput;
use crate::motion;
use crate::spawner;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh run: the player at its start position, nothing else on the field.
pub fn init_state() -> GameState {
    GameState {
        player: Player::new(PLAYER_START),
        enemies: SlotMap::with_key(),
        bombs: SlotMap::with_key(),
        beams: SlotMap::with_key(),
        explosions: SlotMap::with_key(),
        gravity_fields: SlotMap::with_key(),
        emp_pulses: SlotMap::with_key(),
        shield: None,
        score: Score::default(),
        status: GameStatus::Playing,
        tick: 0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick.
///
/// Does nothing once the run has ended.  A quit command ends the run before
/// anything else in the tick is applied; a lethal collision freezes the
/// state before motion, so the final frame shows the hit.
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.status != GameStatus::Playing {
        return events;
    }

    // ── 1. Quit ──────────────────────────────────────────────────────────────
    if input.wants_quit() {
        state.status = GameStatus::Quit;
        return events;
    }

    // ── 2. Fire ──────────────────────────────────────────────────────────────
    abilities::fire(state, input.held, &mut events);

    // ── 3. Abilities, in the order they were pressed ─────────────────────────
    for &command in &input.commands {
        abilities::activate(state, command, &mut events);
    }

    // ── 4. Spawn enemies and drop bombs ──────────────────────────────────────
    spawner::spawn_enemies(state, rng, &mut events);
    spawner::drop_bombs(state, rng, &mut events);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    if collision::resolve(state, &mut events) == Outcome::Lethal {
        return events;
    }

    // ── 6. Motion and timers ─────────────────────────────────────────────────
    motion::advance(state, input.held);

    state.tick += 1;
    events
}
