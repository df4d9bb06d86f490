//! Eating food

use super::{ActionResult, inventory_item};
use crate::consts::{FOOD_RATION_VALUE, STOMACH_SIZE};
use crate::gameloop::GameState;
use crate::object::ItemKind;

/// Eat a food ration from inventory
pub fn do_eat(state: &mut GameState, index: usize) -> ActionResult {
    match inventory_item(state, index) {
        Ok(item) if matches!(item.kind, ItemKind::Food) => {}
        Ok(_) => return ActionResult::failed("That's not something you can eat."),
        Err(rejected) => return rejected,
    }

    state.player.inventory.remove(index);
    state.player.food = (state.player.food + FOOD_RATION_VALUE).min(STOMACH_SIZE);
    state.message("That food tasted delicious!");
    ActionResult::Success
}
