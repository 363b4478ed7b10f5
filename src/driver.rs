//! Frame loop driver.
//!
//! Owns the state, the RNG and the frame budget.  The front end feeds it one
//! [`TickInput`] per frame and sleeps for whatever budget is left.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::compute::{init_state, tick};
use crate::constants::TICK_DURATION;
use crate::entities::{GameState, GameStatus};
use crate::events::GameEvent;
use crate::input::TickInput;

/// Result of stepping the driver once.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// The run goes on; these events happened this tick.
    Continue(Vec<GameEvent>),
    /// The run ended this tick or earlier.
    Ended {
        status: GameStatus,
        score: u32,
        events: Vec<GameEvent>,
    },
}

pub struct Driver {
    state: GameState,
    rng: StdRng,
    period: Duration,
}

impl Driver {
    /// A new run.  With a seed the run is reproducible; without one the RNG
    /// is seeded from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Driver::with_state(init_state(), rng)
    }

    /// Drive an existing state, e.g. one prepared by a test.
    pub fn with_state(state: GameState, rng: StdRng) -> Self {
        Driver {
            state,
            rng,
            period: TICK_DURATION,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.state.status == GameStatus::Playing
    }

    /// Run one tick of the simulation.
    pub fn step(&mut self, input: &TickInput) -> Step {
        if !self.is_running() {
            return self.ended(Vec::new());
        }

        let events = tick(&mut self.state, input, &mut self.rng);
        match self.state.status {
            GameStatus::Playing => Step::Continue(events),
            GameStatus::GameOver => {
                info!(
                    tick = self.state.tick,
                    score = self.state.score.value(),
                    "game over"
                );
                self.ended(events)
            }
            GameStatus::Quit => {
                info!(
                    tick = self.state.tick,
                    score = self.state.score.value(),
                    "quit requested"
                );
                self.ended(events)
            }
        }
    }

    fn ended(&self, events: Vec<GameEvent>) -> Step {
        Step::Ended {
            status: self.state.status,
            score: self.state.score.value(),
            events,
        }
    }

    /// Sleep budget left in a frame that has taken `elapsed` so far.  An
    /// overrun leaves nothing and is logged.
    pub fn remaining_budget(&self, elapsed: Duration) -> Duration {
        match self.period.checked_sub(elapsed) {
            Some(left) => left,
            None => {
                warn!(
                    tick = self.state.tick,
                    "frame behind schedule by {:?}",
                    elapsed - self.period
                );
                Duration::ZERO
            }
        }
    }
}
