//! Wielding weapons, wearing armor and rings
//!
//! Every change of equipment ends with `recompute_derived` so defense and
//! bonuses never go stale.

use super::{ActionResult, RingSlot, inventory_item};
use crate::gameloop::GameState;

/// Wield a weapon from inventory
pub fn do_wield(state: &mut GameState, index: usize) -> ActionResult {
    let item = match inventory_item(state, index) {
        Ok(item) => item,
        Err(rejected) => return rejected,
    };
    if !item.is_weapon() {
        return ActionResult::failed("You can't wield that.");
    }
    if state.player.equipped_weapon == Some(item.id) {
        return ActionResult::failed("You are already wielding that!");
    }
    if state.player.is_equipped(item.id) {
        return ActionResult::failed("You are wearing that!");
    }

    let (id, name) = (item.id, item.name());
    state.player.equipped_weapon = Some(id);
    state.player.recompute_derived();
    state.message(format!("You are now wielding {name}."));
    ActionResult::Success
}

/// Put the wielded weapon away
pub fn do_unwield(state: &mut GameState) -> ActionResult {
    let Some(name) = state.player.weapon().map(|w| w.name()) else {
        return ActionResult::failed("You are empty handed.");
    };
    state.player.equipped_weapon = None;
    state.player.recompute_derived();
    state.message(format!("You put away {name}."));
    ActionResult::Success
}

/// Put on a suit of armor
pub fn do_wear(state: &mut GameState, index: usize) -> ActionResult {
    let item = match inventory_item(state, index) {
        Ok(item) => item,
        Err(rejected) => return rejected,
    };
    if !item.is_armor() {
        return ActionResult::failed("You can't wear that.");
    }
    if state.player.equipped_armor == Some(item.id) {
        return ActionResult::failed("You are already wearing that!");
    }
    if state.player.equipped_armor.is_some() {
        return ActionResult::failed("You are already wearing some armor.");
    }

    let (id, name) = (item.id, item.name());
    state.player.equipped_armor = Some(id);
    state.player.recompute_derived();
    state.message(format!("You are now wearing {name}."));
    ActionResult::Success
}

/// Take off the worn armor
pub fn do_takeoff(state: &mut GameState) -> ActionResult {
    let Some(name) = state.player.armor().map(|a| a.name()) else {
        return ActionResult::failed("You are not wearing any armor.");
    };
    state.player.equipped_armor = None;
    state.player.recompute_derived();
    state.message(format!("You take off {name}."));
    ActionResult::Success
}

/// Put a ring on one hand
pub fn do_puton(state: &mut GameState, index: usize, slot: RingSlot) -> ActionResult {
    let item = match inventory_item(state, index) {
        Ok(item) => item,
        Err(rejected) => return rejected,
    };
    if !item.is_ring() {
        return ActionResult::failed("You can't put that on.");
    }
    if state.player.is_equipped(item.id) {
        return ActionResult::failed("You are already wearing that!");
    }
    if state.player.equipped_rings[slot.index()].is_some() {
        return ActionResult::failed(format!("You are already wearing a ring on your {slot} hand."));
    }

    let (id, name) = (item.id, item.name());
    state.player.equipped_rings[slot.index()] = Some(id);
    state.player.recompute_derived();
    state.message(format!("You put {name} on your {slot} hand."));
    ActionResult::Success
}

/// Remove the ring from one hand
pub fn do_remove(state: &mut GameState, slot: RingSlot) -> ActionResult {
    let Some(id) = state.player.equipped_rings[slot.index()] else {
        return ActionResult::failed(format!("You are not wearing a ring on your {slot} hand."));
    };
    let name = state
        .player
        .item(id)
        .map(|r| r.name())
        .unwrap_or_else(|| "the ring".to_string());
    state.player.equipped_rings[slot.index()] = None;
    state.player.recompute_derived();
    state.message(format!("You remove {name}."));
    ActionResult::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STARTING_DEFENSE;
    use crate::object::{Item, ItemId, ItemKind, RingEffect};
    use crate::testing::arena;

    #[test]
    fn test_unwield_and_wield() {
        let mut state = arena();
        assert_eq!(do_unwield(&mut state), ActionResult::Success);
        assert_eq!(state.player.hit_bonus, 0);
        assert!(matches!(do_unwield(&mut state), ActionResult::Failed(_)));

        assert_eq!(do_wield(&mut state, 0), ActionResult::Success);
        assert_eq!(state.player.hit_bonus, 1);
        assert!(matches!(do_wield(&mut state, 0), ActionResult::Failed(_)));
    }

    #[test]
    fn test_wield_rejects_non_weapons() {
        let mut state = arena();
        assert!(matches!(do_wield(&mut state, 2), ActionResult::Failed(_)));
        assert!(matches!(do_wield(&mut state, 1), ActionResult::Failed(_)));
    }

    #[test]
    fn test_armor_swap() {
        let mut state = arena();
        assert!(matches!(do_wear(&mut state, 1), ActionResult::Failed(_)));
        assert_eq!(do_takeoff(&mut state), ActionResult::Success);
        assert_eq!(state.player.defense, STARTING_DEFENSE);
        assert!(matches!(do_takeoff(&mut state), ActionResult::Failed(_)));
        assert_eq!(do_wear(&mut state, 1), ActionResult::Success);
        assert_eq!(state.player.defense, STARTING_DEFENSE + 3);
    }

    #[test]
    fn test_ring_slots() {
        let mut state = arena();
        state
            .player
            .inventory
            .push(Item::new(ItemId(10), ItemKind::Ring(RingEffect::Protection(2))));
        state
            .player
            .inventory
            .push(Item::new(ItemId(11), ItemKind::Ring(RingEffect::Dexterity(1))));

        assert_eq!(do_puton(&mut state, 3, RingSlot::Left), ActionResult::Success);
        assert_eq!(state.player.ring_defense_bonus, 2);
        assert!(matches!(
            do_puton(&mut state, 4, RingSlot::Left),
            ActionResult::Failed(_)
        ));
        assert!(matches!(
            do_puton(&mut state, 3, RingSlot::Right),
            ActionResult::Failed(_)
        ));
        assert_eq!(do_puton(&mut state, 4, RingSlot::Right), ActionResult::Success);
        assert_eq!(state.player.hit_bonus, 2);

        assert_eq!(do_remove(&mut state, RingSlot::Left), ActionResult::Success);
        assert_eq!(state.player.ring_defense_bonus, 0);
        assert!(matches!(
            do_remove(&mut state, RingSlot::Left),
            ActionResult::Failed(_)
        ));
    }

    #[test]
    fn test_put_on_needs_a_ring() {
        let mut state = arena();
        assert!(matches!(
            do_puton(&mut state, 2, RingSlot::Left),
            ActionResult::Failed(_)
        ));
    }
}
