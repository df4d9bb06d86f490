//! Player system
//!
//! Contains the Player struct, status counters, hunger and the rank table.

mod hunger;
pub mod rank;
mod status;
mod you;

pub use hunger::{HungerState, tick_hunger};
pub use status::PlayerStatus;
pub use you::{Player, RingPowers, STARTING_KIT_SIZE, regen_rate};
