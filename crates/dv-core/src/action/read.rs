//! Reading scrolls

use super::{ActionResult, inventory_item};
use crate::consts::{HOLD_RADIUS, SCARE_RADIUS, TELEPORT_CONFUSION};
use crate::dungeon::Tile;
use crate::gameloop::GameState;
use crate::monster::{Monster, makemon};
use crate::object::{ItemKind, ScrollEffect};
use crate::rng::RandomSource;
use crate::vision;

const NOTHING_HAPPENS: &str = "You feel a strange sense of loss.";

/// Read a scroll from inventory. The scroll crumbles to dust.
pub fn do_read(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> ActionResult {
    let effect = match inventory_item(state, index) {
        Ok(item) => match item.kind {
            ItemKind::Scroll(effect) => effect,
            _ => return ActionResult::failed("That's not something you can read."),
        },
        Err(rejected) => return rejected,
    };
    if state.player.status.is_blind() {
        return ActionResult::failed("You can't see to read!");
    }

    state.player.inventory.remove(index);
    apply_scroll(state, effect, rng);
    ActionResult::Success
}

/// Apply a scroll's effect
pub fn apply_scroll(state: &mut GameState, effect: ScrollEffect, rng: &mut dyn RandomSource) {
    let msg: String = match effect {
        ScrollEffect::EnchantArmor => enchant_armor(state),
        ScrollEffect::EnchantWeapon => enchant_weapon(state, rng),
        ScrollEffect::Teleportation => {
            teleport_player(state, rng);
            "Suddenly you're somewhere else!".into()
        }
        ScrollEffect::MagicMapping => {
            for cell in state.dungeon.map.cells_mut() {
                if cell.tile != Tile::Void {
                    cell.visited = true;
                }
            }
            "Oh, now this scroll has a map on it!".into()
        }
        ScrollEffect::HoldMonster => {
            let hold = |m: &mut Monster, rng: &mut dyn RandomSource| {
                m.status.paralysis += rng.range(4, 8);
            };
            let held = affect_nearby(state, HOLD_RADIUS, hold, rng);
            if held > 0 {
                "The monsters around you freeze.".into()
            } else {
                NOTHING_HAPPENS.into()
            }
        }
        ScrollEffect::Sleep => {
            state.player.status.paralysis += rng.range(4, 8);
            "You fall asleep.".into()
        }
        ScrollEffect::ScareMonster => {
            let scare = |m: &mut Monster, rng: &mut dyn RandomSource| {
                m.status.scared += rng.range(10, 20);
            };
            let scared = affect_nearby(state, SCARE_RADIUS, scare, rng);
            if scared > 0 {
                "You hear maniacal laughter in the distance.".into()
            } else {
                NOTHING_HAPPENS.into()
            }
        }
        ScrollEffect::ConfuseMonster => {
            state.player.confuse_touch = true;
            "Your hands begin to glow red.".into()
        }
        ScrollEffect::CreateMonster => match makemon::spawn_adjacent(state, rng) {
            Some(_) => "You hear a faint cry of anguish in the distance.".into(),
            None => NOTHING_HAPPENS.into(),
        },
        ScrollEffect::AggravateMonsters => {
            for monster in &mut state.monsters {
                monster.provoked = true;
            }
            "You hear a high pitched humming noise.".into()
        }
        ScrollEffect::ProtectArmor => protect_armor(state),
        ScrollEffect::Identify => "This is an identify scroll.".into(),
        ScrollEffect::RemoveCurse => "You feel as if somebody is watching over you.".into(),
        ScrollEffect::GoldDetection => match state.gold.len() {
            0 => NOTHING_HAPPENS.into(),
            1 => "You feel greedy, and sense a pile of gold.".into(),
            n => format!("You feel greedy, and sense {n} piles of gold."),
        },
    };
    state.message(msg);
}

/// Move the player to a random walkable tile away from where they stand
pub fn teleport_player(state: &mut GameState, rng: &mut dyn RandomSource) {
    let start = state.player.pos;
    let candidates: Vec<_> = state
        .dungeon
        .walkable_positions()
        .into_iter()
        .filter(|&p| p != start && state.monster_at(p).is_none())
        .collect();
    if let Some(i) = rng.pick(candidates.len()) {
        state.player.pos = candidates[i];
        vision::light_room_at(&mut state.dungeon, state.player.pos);
    }
    state.player.status.confusion += TELEPORT_CONFUSION;
}

/// Apply `effect` to every living monster within `radius`; returns the count
fn affect_nearby(
    state: &mut GameState,
    radius: i32,
    effect: impl Fn(&mut Monster, &mut dyn RandomSource),
    rng: &mut dyn RandomSource,
) -> usize {
    let center = state.player.pos;
    let mut count = 0;
    for monster in state
        .monsters
        .iter_mut()
        .filter(|m| !m.is_dead() && m.pos.chebyshev(center) <= radius)
    {
        effect(monster, &mut *rng);
        count += 1;
    }
    count
}

fn enchant_armor(state: &mut GameState) -> String {
    let Some(id) = state.player.equipped_armor else {
        return "Your skin glows then fades.".into();
    };
    if let Some(ItemKind::Armor { ac, .. }) = state.player.item_mut(id).map(|i| &mut i.kind) {
        *ac += 1;
    }
    state.player.recompute_derived();
    "Your armor glows silver for a moment.".into()
}

fn enchant_weapon(state: &mut GameState, rng: &mut dyn RandomSource) -> String {
    let Some(id) = state.player.equipped_weapon else {
        return "Your hands twitch.".into();
    };
    let to_hit = rng.chance(0.5);
    if let Some(ItemKind::Weapon {
        hit_bonus,
        damage_bonus,
        ..
    }) = state.player.item_mut(id).map(|i| &mut i.kind)
    {
        if to_hit {
            *hit_bonus += 1;
        } else {
            *damage_bonus += 1;
        }
    }
    state.player.recompute_derived();
    "Your weapon glows blue for a moment.".into()
}

fn protect_armor(state: &mut GameState) -> String {
    let Some(id) = state.player.equipped_armor else {
        return NOTHING_HAPPENS.into();
    };
    if let Some(ItemKind::Armor { protected, .. }) = state.player.item_mut(id).map(|i| &mut i.kind) {
        *protected = true;
    }
    "Your armor is covered by a shimmering gold shield!".into()
}
