//! Picking up and dropping items

use super::{ActionResult, inventory_item};
use crate::consts::MAX_INVENTORY;
use crate::gameloop::GameState;
use crate::object::FloorItem;

/// Pick up whatever lies on the player's tile. Runs after every step.
pub fn pick_up(state: &mut GameState) {
    let pos = state.player.pos;

    if let Some(index) = state.gold_at(pos) {
        let pile = state.gold.remove(index);
        state.player.gold = state.player.gold.saturating_add(pile.amount);
        state.message(format!("You found {} gold pieces.", pile.amount));
    }

    if let Some(index) = state.item_at(pos) {
        if state.player.inventory.len() >= MAX_INVENTORY {
            let name = state.items[index].item.name();
            state.message(format!("You see here {name}. Your pack is full."));
            return;
        }
        let floor = state.items.remove(index);
        let name = floor.item.name();
        state.player.inventory.push(floor.item);
        state.message(format!("You now have {name}."));
    }
}

/// Drop an inventory item on the player's tile
pub fn do_drop(state: &mut GameState, index: usize) -> ActionResult {
    let item = match inventory_item(state, index) {
        Ok(item) => item,
        Err(rejected) => return rejected,
    };

    if state.player.is_equipped(item.id) {
        return ActionResult::failed("You must take that off first.");
    }

    let pos = state.player.pos;
    if state.dungeon.tile(pos).is_some_and(|t| t.is_stairs()) {
        return ActionResult::failed("You can't drop things on the stairs.");
    }
    if state.item_at(pos).is_some() || state.gold_at(pos).is_some() {
        return ActionResult::failed("There is already something here.");
    }

    let item = state.player.inventory.remove(index);
    state.message(format!("You drop {}.", item.name()));
    state.items.push(FloorItem { pos, item });
    ActionResult::Success
}
