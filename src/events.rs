//! Things that happened during a tick.  The simulation records them; the
//! front end logs them and uses them to pick the player's expression.

use glam::Vec2;

/// What destroyed an enemy or a bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillCause {
    Beam,
    Shield,
    Hyper,
    Gravity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ability {
    Gravity,
    Hyper,
    Emp,
    Shield,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    EnemySpawned { at: Vec2 },
    BombDropped { at: Vec2 },
    BeamsFired { count: usize },
    EnemyDestroyed { at: Vec2, cause: KillCause },
    BombDestroyed { at: Vec2, cause: KillCause },
    /// A defused bomb hit a normal-mode player and fizzled.
    BombFizzled { at: Vec2 },
    AbilityActivated(Ability),
    /// The command was refused: not enough score, or a shield is already up.
    AbilityDenied(Ability),
    PlayerDefeated { score: u32 },
}

impl GameEvent {
    /// True for the kills that make the player cheer.
    pub fn is_enemy_kill(&self) -> bool {
        matches!(self, GameEvent::EnemyDestroyed { .. })
    }
}
