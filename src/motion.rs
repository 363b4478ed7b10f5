//! Motion integrator: moves everything with a velocity, drops projectiles
//! that leave the playfield and runs down every countdown.

use crate::entities::{GameState, Player};
use crate::geometry::check_bound;
use crate::input::Keys;

/// Advance every surviving entity by one tick.
///
/// Order: player, beams, enemies, gravity fields, bombs, shield,
/// explosions, EMP pulses.  The shield runs after the player so it sits in
/// front of the player's new position.
pub fn advance(state: &mut GameState, held: Keys) {
    move_player(&mut state.player, held);

    state.beams.retain(|_, beam| {
        beam.rect.translate(beam.velocity());
        check_bound(&beam.rect).is_inside()
    });

    for enemy in state.enemies.values_mut() {
        enemy.advance();
    }

    state.gravity_fields.retain(|_, field| field.lifetime.tick());

    state.bombs.retain(|_, bomb| {
        bomb.rect.translate(bomb.velocity());
        check_bound(&bomb.rect).is_inside()
    });

    let player = &state.player;
    state.shield = state.shield.take().and_then(|mut shield| {
        let alive = shield.lifetime.tick();
        shield.follow(player);
        alive.then_some(shield)
    });

    state.explosions.retain(|_, explosion| explosion.lifetime.tick());
    state.emp_pulses.retain(|_, pulse| pulse.lifetime.tick());
}

/// Count down hyper mode, then step the player along the held movement
/// keys.  A step that would leave the playfield on either axis is undone;
/// the player is never removed for being out of bounds.
pub fn move_player(player: &mut Player, held: Keys) {
    player.tick_mode();

    let step = held.movement().as_vec2() * player.speed;
    player.rect.translate(step);
    if !check_bound(&player.rect).is_inside() {
        player.rect.translate(-step);
    }

    if let Some(heading) = held.heading() {
        player.facing = heading;
    }
}
