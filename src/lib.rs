//! Simulation core of Kokaton Musou, a fixed-timestep arcade shooter.
//!
//! The library holds everything that decides what happens in a tick.  The
//! terminal front end in `main.rs` only polls keys and draws.

pub mod abilities;
pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod driver;
pub mod entities;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod motion;
pub mod spawner;
