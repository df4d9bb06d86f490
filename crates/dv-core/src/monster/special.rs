//! Monster melee against the player
//!
//! Every attack goes through [`monster_attack`], which dispatches on the
//! monster's [`SpecialAttack`]. Side effects only happen on a hit.

use super::SpecialAttack;
use crate::combat::{self, monster_hit_message, monster_miss_message, resolve_combat};
use crate::consts::LEPRECHAUN_MAX_STEAL;
use crate::gameloop::GameState;
use crate::object::ItemKind;
use crate::player::RingPowers;
use crate::rng::RandomSource;

/// Chance the gold thief fumbles, rolled instead of the usual hit check
const THIEF_MISS_CHANCE: f64 = 0.25;
const VENOM_CHANCE: f64 = 0.5;
const DRAIN_XP_CHANCE: f64 = 0.25;

/// Resolve one attack by the monster at `index` against the player
pub fn monster_attack(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let Some(monster) = state.monsters.get(index) else {
        return;
    };
    let special = monster.active_special();

    match special {
        SpecialAttack::StealGold => steal_gold(state, index, rng),
        SpecialAttack::StealItem => steal_item(state, index, rng),
        SpecialAttack::CorrodeArmor => corrode_armor(state, index, rng),
        SpecialAttack::Freeze => freeze(state, index, rng),
        SpecialAttack::None
        | SpecialAttack::Venom
        | SpecialAttack::DrainLife
        | SpecialAttack::DrainXp
        | SpecialAttack::Confuse => {
            if standard_attack(state, index, rng) {
                apply_touch(state, special, rng);
            }
        }
    }

    if state.player.is_dead() {
        let killer = state.monsters[index].described();
        state.set_cause_of_death(killer);
    }
}

/// Plain melee through the combat resolver. Returns true on a hit.
fn standard_attack(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> bool {
    let monster = &state.monsters[index];
    let outcome = resolve_combat(monster, &mut state.player, rng);
    let msg = if outcome.hit {
        monster_hit_message(&monster.name, outcome.tier)
    } else {
        monster_miss_message(&monster.name)
    };
    state.message(msg);
    outcome.hit
}

/// Extra effect riding on a successful standard hit
fn apply_touch(state: &mut GameState, special: SpecialAttack, rng: &mut dyn RandomSource) {
    let player = &mut state.player;
    match special {
        SpecialAttack::Venom => {
            if rng.chance(VENOM_CHANCE) && player.attack > 1 {
                player.attack -= 1;
                state.message("You feel weaker.");
            }
        }
        SpecialAttack::DrainLife => {
            let loss = rng.range(1, 3);
            player.max_hp = (player.max_hp - loss).max(1);
            player.hp = player.hp.min(player.max_hp);
            state.message("You feel your life force draining away.");
        }
        SpecialAttack::DrainXp => {
            if rng.chance(DRAIN_XP_CHANCE) && player.lose_rank() {
                let rank = player.rank.clone();
                state.message(format!("You feel less experienced. You are now a {rank}."));
            }
        }
        SpecialAttack::Confuse => {
            player.status.confusion += rng.range(3, 5);
            state.message("You feel confused.");
        }
        _ => {}
    }
}

fn steal_gold(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let name = state.monsters[index].name.clone();
    if rng.chance(THIEF_MISS_CHANCE) {
        state.message(monster_miss_message(&name));
        return;
    }

    let fraction = 0.1 + rng.next_f64() * 0.2;
    let stolen = ((state.player.gold as f64 * fraction).floor() as u32).min(LEPRECHAUN_MAX_STEAL);
    state.player.gold -= stolen;
    state.monsters[index].hp = 0;

    if stolen > 0 {
        state.message(format!("The {name} steals {stolen} gold and vanishes!"));
    } else {
        state.message(format!("The {name} finds nothing to steal and vanishes!"));
    }
}

/// Hits like any other monster, then takes one item and vanishes
fn steal_item(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    if !standard_attack(state, index, rng) || state.player.is_dead() {
        return;
    }

    let name = state.monsters[index].name.clone();
    state.monsters[index].hp = 0;
    let stolen = rng
        .pick(state.player.inventory.len())
        .and_then(|i| state.player.remove_item(i));
    match stolen {
        Some(item) => state.message(format!(
            "The {name} stole your {} and vanishes!",
            item.name()
        )),
        None => state.message(format!("The {name} finds nothing to steal and vanishes!")),
    }
}

fn corrode_armor(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let name = state.monsters[index].name.clone();
    if !combat::roll_hit(0, rng) {
        state.message(monster_miss_message(&name));
        return;
    }

    let maintained = state.player.has_power(RingPowers::MAINTAIN_ARMOR);
    let armor_id = state.player.equipped_armor;
    let armor = armor_id.and_then(|id| state.player.item_mut(id));
    let corroded = match armor {
        Some(item) => match &mut item.kind {
            ItemKind::Armor { ac, protected, .. } if !*protected && !maintained && *ac > 0 => {
                *ac -= 1;
                true
            }
            _ => false,
        },
        None => false,
    };

    if corroded {
        state.player.recompute_derived();
        state.message(format!("The {name} touches you. Your armor corrodes!"));
    } else {
        state.message(format!("The {name} touches you."));
    }
}

fn freeze(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let name = state.monsters[index].name.clone();
    if !combat::roll_hit(0, rng) {
        state.message(monster_miss_message(&name));
        return;
    }
    state.player.status.paralysis += rng.range(2, 4);
    state.message(format!("The {name} freezes you solid!"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Position;
    use crate::rng::ScriptedRng;
    use crate::testing::{arena, spawn};

    #[test]
    fn test_leprechaun_steals_and_vanishes() {
        let mut state = arena();
        state.player.gold = 500;
        let i = spawn(&mut state, "leprechaun", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.99, 0.99]);
        monster_attack(&mut state, i, &mut rng);
        // floor(500 * 0.298) = 149
        assert_eq!(state.player.gold, 351);
        assert!(state.monsters[i].is_dead());
        assert!(state.messages[0].contains("steals 149 gold"));
    }

    #[test]
    fn test_leprechaun_steal_is_capped() {
        let mut state = arena();
        state.player.gold = 10_000;
        let i = spawn(&mut state, "leprechaun", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.99, 0.99]);
        monster_attack(&mut state, i, &mut rng);
        assert_eq!(state.player.gold, 10_000 - LEPRECHAUN_MAX_STEAL);
    }

    #[test]
    fn test_leprechaun_vanishes_with_nothing() {
        let mut state = arena();
        let i = spawn(&mut state, "leprechaun", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.99, 0.99]);
        monster_attack(&mut state, i, &mut rng);
        assert!(state.monsters[i].is_dead());
        assert!(state.messages[0].contains("finds nothing to steal"));
    }

    #[test]
    fn test_leprechaun_miss() {
        let mut state = arena();
        state.player.gold = 100;
        let i = spawn(&mut state, "leprechaun", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.1]);
        monster_attack(&mut state, i, &mut rng);
        assert_eq!(state.player.gold, 100);
        assert!(!state.monsters[i].is_dead());
    }

    #[test]
    fn test_nymph_steals_equipped_item() {
        let mut state = arena();
        let i = spawn(&mut state, "nymph", Position::new(6, 5));
        let hp = state.player.hp;
        // hit, minimum damage roll, then pick slot 0 (the wielded mace)
        let mut rng = ScriptedRng::new([0.9, 0.0, 0.0]);
        monster_attack(&mut state, i, &mut rng);
        assert_eq!(state.player.hp, hp - 1);
        assert_eq!(state.player.inventory.len(), 2);
        assert_eq!(state.player.equipped_weapon, None);
        assert_eq!(state.player.hit_bonus, 0);
        assert!(state.monsters[i].is_dead());
    }

    #[test]
    fn test_nymph_miss_steals_nothing() {
        let mut state = arena();
        let hp = state.player.hp;
        let i = spawn(&mut state, "nymph", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.1]);
        monster_attack(&mut state, i, &mut rng);
        assert_eq!(state.player.hp, hp);
        assert_eq!(state.player.inventory.len(), 3);
        assert!(!state.monsters[i].is_dead());
    }

    #[test]
    fn test_aquator_corrodes_armor() {
        let mut state = arena();
        let defense = state.player.defense;
        let hp = state.player.hp;
        let i = spawn(&mut state, "aquator", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.9]);
        monster_attack(&mut state, i, &mut rng);
        assert_eq!(state.player.defense, defense - 1);
        assert_eq!(state.player.hp, hp);
    }

    #[test]
    fn test_protected_armor_resists() {
        let mut state = arena();
        if let Some(ItemKind::Armor { protected, .. }) =
            state.player.item_mut(state.player.equipped_armor.unwrap()).map(|i| &mut i.kind)
        {
            *protected = true;
        }
        let defense = state.player.defense;
        let i = spawn(&mut state, "aquator", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.9]);
        monster_attack(&mut state, i, &mut rng);
        assert_eq!(state.player.defense, defense);
    }

    #[test]
    fn test_ice_monster_freezes() {
        let mut state = arena();
        let i = spawn(&mut state, "ice monster", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.9, 0.0]);
        monster_attack(&mut state, i, &mut rng);
        assert_eq!(state.player.status.paralysis, 2);
    }

    #[test]
    fn test_cancelled_monster_fights_plainly() {
        let mut state = arena();
        let i = spawn(&mut state, "ice monster", Position::new(6, 5));
        state.monsters[i].cancelled = true;
        let mut rng = ScriptedRng::new([0.9, 0.5]);
        monster_attack(&mut state, i, &mut rng);
        assert_eq!(state.player.status.paralysis, 0);
    }

    #[test]
    fn test_killing_blow_sets_cause() {
        let mut state = arena();
        state.player.hp = 1;
        let i = spawn(&mut state, "orc", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.9, 0.9]);
        monster_attack(&mut state, i, &mut rng);
        assert!(state.player.is_dead());
        assert_eq!(state.cause_of_death.as_deref(), Some("an orc"));
    }
}
