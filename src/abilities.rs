//! Player-triggered actions: beam fire and the score-gated abilities.

use tracing::{debug, info};

use crate::constants::*;
use crate::entities::{Beam, EmpPulse, GameState, GravityField, Shield, Threshold};
use crate::events::{Ability, GameEvent};
use crate::input::{Command, Keys};

/// Fire while the fire key is held and the cooldown has elapsed.  Holding
/// the fan modifier as well sends [`FAN_BEAM_COUNT`] beams around the full
/// circle instead of one along the facing.
pub fn fire(state: &mut GameState, held: Keys, events: &mut Vec<GameEvent>) {
    if !held.contains(Keys::FIRE) || !state.player.can_fire(state.tick) {
        return;
    }

    let player = &state.player;
    let beams: Vec<Beam> = if held.contains(Keys::FAN) {
        let step = 360.0 / FAN_BEAM_COUNT as f32;
        (0..FAN_BEAM_COUNT)
            .map(|i| Beam::from_player(player, step * i as f32))
            .collect()
    } else {
        vec![Beam::from_player(player, player.facing.degrees())]
    };

    let count = beams.len();
    for beam in beams {
        state.beams.insert(beam);
    }
    state.player.last_shot = state.tick as i64;
    events.push(GameEvent::BeamsFired { count });
}

/// Price and entry requirement of each ability.
fn price(ability: Ability) -> (Threshold, u32) {
    match ability {
        Ability::Gravity => (Threshold::AtLeast(GRAVITY_COST), GRAVITY_COST),
        Ability::Hyper => (Threshold::AtLeast(HYPER_COST), HYPER_COST),
        Ability::Emp => (Threshold::Above(EMP_COST), EMP_COST),
        Ability::Shield => (Threshold::AtLeast(SHIELD_COST), SHIELD_COST),
    }
}

/// Apply one command.  The debit and the effect happen together or not at
/// all.  `Quit` is handled by the caller and ignored here.
pub fn activate(state: &mut GameState, command: Command, events: &mut Vec<GameEvent>) {
    let ability = match command {
        Command::Gravity => Ability::Gravity,
        Command::Hyper => Ability::Hyper,
        Command::Emp => Ability::Emp,
        Command::Shield => Ability::Shield,
        Command::Quit => return,
    };

    // one shield at a time
    if ability == Ability::Shield && state.shield.is_some() {
        debug!(tick = state.tick, "shield refused: already up");
        events.push(GameEvent::AbilityDenied(ability));
        return;
    }

    let (threshold, cost) = price(ability);
    if !state.score.try_spend(threshold, cost) {
        debug!(
            tick = state.tick,
            ?ability,
            score = state.score.value(),
            "ability refused: score too low"
        );
        events.push(GameEvent::AbilityDenied(ability));
        return;
    }

    match ability {
        Ability::Gravity => {
            state.gravity_fields.insert(GravityField::new(GRAVITY_TICKS));
        }
        Ability::Hyper => state.player.enter_hyper(),
        Ability::Emp => emp_pulse(state),
        Ability::Shield => state.shield = Some(Shield::new(&state.player, SHIELD_TICKS)),
    }
    info!(
        tick = state.tick,
        ?ability,
        score = state.score.value(),
        "ability activated"
    );
    events.push(GameEvent::AbilityActivated(ability));
}

/// Jam every enemy and disarm every bomb alive right now.  Anything spawned
/// later is unaffected.
pub fn emp_pulse(state: &mut GameState) {
    for enemy in state.enemies.values_mut() {
        enemy.jam();
    }
    for bomb in state.bombs.values_mut() {
        bomb.disarm();
    }
    state.emp_pulses.insert(EmpPulse::new(EMP_TICKS));
}
