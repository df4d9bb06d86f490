//! Player action system
//!
//! Intents are the whole input vocabulary of the engine. Each action
//! validates before it mutates anything: a rejected intent returns
//! [`ActionResult::Failed`] and leaves the state as it found it.

pub mod eat;
pub mod level_change;
pub mod movement;
pub mod pickup;
pub mod quaff;
pub mod read;
pub mod throw;
pub mod wear;
pub mod zap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::Position;
use crate::gameloop::GameState;
use crate::object::Item;
use crate::rng::RandomSource;

/// One player decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Step by a delta; `(0, 0)` waits a turn
    Move { dx: i32, dy: i32 },
    Wield(usize),
    Unwield,
    Wear(usize),
    TakeOff,
    PutOn(usize, RingSlot),
    Remove(RingSlot),
    Eat(usize),
    Quaff(usize),
    Read(usize),
    Zap(usize, i32, i32),
    Throw(usize, i32, i32),
    Drop(usize),
    Descend,
    Ascend,
    DebugRankUp,
}

impl Intent {
    pub const fn wait() -> Self {
        Intent::Move { dx: 0, dy: 0 }
    }
}

/// Which hand a ring goes on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RingSlot {
    #[strum(serialize = "left")]
    Left,
    #[strum(serialize = "right")]
    Right,
}

impl RingSlot {
    pub const fn index(&self) -> usize {
        match self {
            RingSlot::Left => 0,
            RingSlot::Right => 1,
        }
    }
}

/// Result of a player action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Action completed, time passes
    Success,
    /// Action rejected with an informational message; no time passes
    Failed(String),
}

impl ActionResult {
    pub fn failed(msg: impl Into<String>) -> Self {
        ActionResult::Failed(msg.into())
    }
}

/// Look up an inventory slot, rejecting bad indices
pub(crate) fn inventory_item(state: &GameState, index: usize) -> Result<&Item, ActionResult> {
    state
        .player
        .inventory
        .get(index)
        .ok_or_else(|| ActionResult::failed("You don't have that item."))
}

/// Clamp a delta to a unit step
pub(crate) fn unit_direction(dx: i32, dy: i32) -> (i32, i32) {
    (dx.signum(), dy.signum())
}

/// Where a thrown item or wand bolt stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Flight {
    /// Living monster struck, if any
    pub target: Option<usize>,
    /// Last walkable tile reached
    pub landing: Position,
}

/// Trace a straight flight from the player until it hits a monster, a wall
/// or runs out of range
pub(crate) fn fly(state: &GameState, dx: i32, dy: i32, range: i32) -> Flight {
    let mut landing = state.player.pos;
    for _ in 0..range {
        let next = landing.offset(dx, dy);
        if !state.dungeon.is_walkable(next) {
            break;
        }
        landing = next;
        if let Some(index) = state.monster_at(next) {
            return Flight {
                target: Some(index),
                landing,
            };
        }
    }
    Flight {
        target: None,
        landing,
    }
}

/// Apply the primary effect of an intent
pub fn perform(state: &mut GameState, intent: Intent, rng: &mut dyn RandomSource) -> ActionResult {
    match intent {
        Intent::Move { dx, dy } => movement::do_move(state, dx, dy, rng),
        Intent::Wield(index) => wear::do_wield(state, index),
        Intent::Unwield => wear::do_unwield(state),
        Intent::Wear(index) => wear::do_wear(state, index),
        Intent::TakeOff => wear::do_takeoff(state),
        Intent::PutOn(index, slot) => wear::do_puton(state, index, slot),
        Intent::Remove(slot) => wear::do_remove(state, slot),
        Intent::Eat(index) => eat::do_eat(state, index),
        Intent::Quaff(index) => quaff::do_quaff(state, index, rng),
        Intent::Read(index) => read::do_read(state, index, rng),
        Intent::Zap(index, dx, dy) => zap::do_zap(state, index, dx, dy, rng),
        Intent::Throw(index, dx, dy) => throw::do_throw(state, index, dx, dy, rng),
        Intent::Drop(index) => pickup::do_drop(state, index),
        Intent::Descend => level_change::do_descend(state, rng),
        Intent::Ascend => level_change::do_ascend(state, rng),
        Intent::DebugRankUp => {
            let mut messages = Vec::new();
            if !state.player.raise_level(&mut messages) {
                return ActionResult::Failed(messages.concat());
            }
            state.messages.extend(messages);
            ActionResult::Success
        }
    }
}
