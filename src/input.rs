//! Input boundary: the held-key snapshot and the discrete commands a tick
//! consumes.  Polling the keyboard is the front end's job.

use bitflags::bitflags;
use glam::IVec2;

use crate::entities::Direction;

bitflags! {
    /// Keys currently held down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const FIRE = 1 << 4;
        /// Modifier that turns a shot into a full-circle fan.
        const FAN = 1 << 5;
    }
}

impl Keys {
    /// Sum of the held movement keys as a grid step.  Opposing keys cancel.
    pub fn movement(self) -> IVec2 {
        let mut step = IVec2::ZERO;
        if self.contains(Keys::UP) {
            step.y -= 1;
        }
        if self.contains(Keys::DOWN) {
            step.y += 1;
        }
        if self.contains(Keys::LEFT) {
            step.x -= 1;
        }
        if self.contains(Keys::RIGHT) {
            step.x += 1;
        }
        step
    }

    /// Heading implied by the movement keys, if they do not cancel out.
    pub fn heading(self) -> Option<Direction> {
        Direction::from_delta(self.movement())
    }
}

/// Edge-triggered player commands, delivered once per key-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Gravity,
    Hyper,
    Emp,
    Shield,
    Quit,
}

/// Everything the simulation needs from the outside world for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: Keys,
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn new(held: Keys, commands: Vec<Command>) -> Self {
        TickInput { held, commands }
    }

    pub fn held(held: Keys) -> Self {
        TickInput {
            held,
            commands: Vec::new(),
        }
    }

    pub fn command(command: Command) -> Self {
        TickInput {
            held: Keys::empty(),
            commands: vec![command],
        }
    }

    pub fn wants_quit(&self) -> bool {
        self.commands.contains(&Command::Quit)
    }
}
