//! dv-core: Core game logic for the delve dungeon crawler
//!
//! This crate contains all game logic with no I/O dependencies.
//! Every random decision goes through an injected [`RandomSource`], so a
//! whole game replays exactly from a seed and a list of intents.

pub mod action;
pub mod combat;
pub mod dungeon;
pub mod monster;
pub mod object;
pub mod player;
pub mod vision;

mod consts;
mod gameloop;
mod rng;

#[cfg(test)]
mod testing;

pub use action::{ActionResult, Intent, RingSlot};
pub use consts::*;
pub use gameloop::{GameConfig, GameLoop, GameState, StateError, TurnOutcome, advance};
pub use rng::{GameRng, RandomSource, ScriptedRng, shuffle};
