//! Throwing items

use super::{ActionResult, fly, inventory_item, unit_direction};
use crate::combat::{
    Combatant, player_hit_message, player_miss_message, resolve_combat, roll_hit,
};
use crate::consts::THROW_RANGE;
use crate::gameloop::GameState;
use crate::object::{FloorItem, Item, ItemKind};
use crate::rng::RandomSource;

/// The player's arm plus a thrown weapon's enchantment
struct Missile {
    attack: i32,
    defense: i32,
    hit_bonus: i32,
    damage_bonus: i32,
    hp: i32,
}

impl Combatant for Missile {
    fn attack(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn hit_bonus(&self) -> i32 {
        self.hit_bonus
    }

    fn damage_bonus(&self) -> i32 {
        self.damage_bonus
    }

    fn hp_mut(&mut self) -> &mut i32 {
        &mut self.hp
    }
}

/// Throw an inventory item in a direction
pub fn do_throw(
    state: &mut GameState,
    index: usize,
    dx: i32,
    dy: i32,
    rng: &mut dyn RandomSource,
) -> ActionResult {
    let item = match inventory_item(state, index) {
        Ok(item) => item,
        Err(rejected) => return rejected,
    };
    if state.player.is_equipped(item.id) {
        return ActionResult::failed("You can't throw something you are wearing.");
    }
    let (dx, dy) = unit_direction(dx, dy);
    if (dx, dy) == (0, 0) {
        return ActionResult::failed("In what direction?");
    }

    let item = state.player.inventory.remove(index);
    let flight = fly(state, dx, dy, THROW_RANGE);

    if let Some(target) = flight.target {
        strike(state, target, &item, rng);
    }

    if state.item_at(flight.landing).is_none() {
        state.items.push(FloorItem {
            pos: flight.landing,
            item,
        });
    } else {
        state.message(format!("The {} is lost.", item.name()));
    }
    ActionResult::Success
}

/// Resolve the thrown item against the monster at `target`
fn strike(state: &mut GameState, target: usize, item: &Item, rng: &mut dyn RandomSource) {
    let monster = &mut state.monsters[target];
    monster.provoked = true;

    let (hit, tier) = match &item.kind {
        ItemKind::Weapon {
            hit_bonus,
            damage_bonus,
            ..
        } => {
            let missile = Missile {
                attack: state.player.attack,
                defense: 0,
                hit_bonus: *hit_bonus,
                damage_bonus: *damage_bonus,
                hp: 0,
            };
            let outcome = resolve_combat(&missile, &mut *monster, rng);
            (outcome.hit, outcome.tier)
        }
        _ => {
            let hit = roll_hit(0, rng);
            if hit {
                monster.hp -= 1;
            }
            (hit, 0)
        }
    };

    let msg = if hit {
        player_hit_message(&monster.name, tier)
    } else {
        player_miss_message(&monster.name)
    };
    state.message(msg);

    if state.monsters[target].is_dead() {
        state.kill_monster(target, rng);
    }
}
