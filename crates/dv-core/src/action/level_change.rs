//! Stairs: descending and ascending between levels
//!
//! Each transition builds a fresh level from a seed drawn from the game RNG.
//! Only the player carries over.

use super::ActionResult;
use crate::dungeon::{Tile, generate_seeded};
use crate::gameloop::GameState;
use crate::rng::RandomSource;

/// Which staircase the player arrives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    StairsUp,
    StairsDown,
}

/// Go down the stairs
pub fn do_descend(state: &mut GameState, rng: &mut dyn RandomSource) -> ActionResult {
    if state.dungeon.tile(state.player.pos) != Some(Tile::StairsDown) {
        return ActionResult::failed("You can't go down here.");
    }
    let depth = state.dungeon_level + 1;
    change_level(state, depth, Arrival::StairsUp, rng);
    state.message(format!("You descend to level {depth}."));
    ActionResult::Success
}

/// Go up the stairs; leaving level 1 escapes the dungeon
pub fn do_ascend(state: &mut GameState, rng: &mut dyn RandomSource) -> ActionResult {
    if state.dungeon.tile(state.player.pos) != Some(Tile::StairsUp) {
        return ActionResult::failed("You can't go up here.");
    }

    if state.dungeon_level <= 1 {
        state.dead = true;
        state.escaped = true;
        state.set_cause_of_death("escaped the dungeon");
        state.message("You escape the dungeon!");
        tracing::info!(turn = state.turn, gold = state.player.gold, "player escaped");
        return ActionResult::Success;
    }

    let depth = state.dungeon_level - 1;
    change_level(state, depth, Arrival::StairsDown, rng);
    state.message(format!("You climb up to level {depth}."));
    ActionResult::Success
}

fn change_level(state: &mut GameState, depth: i32, arrival: Arrival, rng: &mut dyn RandomSource) {
    let seed = rng.next_seed();
    let dungeon = generate_seeded(state.dungeon.width, state.dungeon.height, seed, depth);

    state.player.pos = match arrival {
        Arrival::StairsUp => dungeon.stairs_up,
        Arrival::StairsDown => dungeon.stairs_down,
    };
    state.dungeon = dungeon;
    state.dungeon_level = depth;
    state.max_depth = state.max_depth.max(depth);

    state.populate_level(rng);
    state.refresh_view();
    tracing::info!(depth, seed, "level change");
}
