//! Quaffing potions

use super::{ActionResult, inventory_item};
use crate::gameloop::GameState;
use crate::object::{ItemKind, PotionEffect};
use crate::player::Player;
use crate::rng::RandomSource;

/// Quaff a potion from inventory. The potion is used up.
pub fn do_quaff(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) -> ActionResult {
    let effect = match inventory_item(state, index) {
        Ok(item) => match item.kind {
            ItemKind::Potion(effect) => effect,
            _ => return ActionResult::failed("That's not something you can drink."),
        },
        Err(rejected) => return rejected,
    };

    state.player.inventory.remove(index);
    apply_potion(state, effect, rng);
    ActionResult::Success
}

/// Apply a potion's effect to the player
pub fn apply_potion(state: &mut GameState, effect: PotionEffect, rng: &mut dyn RandomSource) {
    let player = &mut state.player;
    let msg = match effect {
        PotionEffect::Healing => {
            let amount = rng.range(4, 8) + player.xp_level;
            heal_with_overflow(player, amount);
            player.status.blindness = 0;
            "You begin to feel better."
        }
        PotionEffect::ExtraHealing => {
            let amount = rng.range(6, 12) + 2 * player.xp_level;
            heal_with_overflow(player, amount);
            player.status.blindness = 0;
            "You feel much better."
        }
        PotionEffect::Confusion => {
            player.status.confusion += rng.range(8, 15);
            "Huh, what? Where am I?"
        }
        PotionEffect::Blindness => {
            player.status.blindness += rng.range(20, 40);
            "Oh, bummer! Everything is dark! Help!"
        }
        PotionEffect::Sleep => {
            player.status.paralysis += rng.range(4, 8);
            "You fall asleep."
        }
        PotionEffect::HasteSelf => {
            player.status.haste += rng.range(10, 20);
            "You feel yourself moving much faster."
        }
        PotionEffect::RaiseLevel => {
            let mut messages = Vec::new();
            player.raise_level(&mut messages);
            state.messages.extend(messages);
            return;
        }
        PotionEffect::GainStrength => {
            player.attack += 1;
            player.max_attack = player.max_attack.max(player.attack);
            "You feel strong!"
        }
        PotionEffect::RestoreStrength => {
            player.attack = player.max_attack;
            "This tastes great! You feel warm all over."
        }
        PotionEffect::Poison => {
            player.attack = (player.attack - 1).max(1);
            player.hp = (player.hp - rng.range(1, 3)).max(1);
            "You feel very sick now."
        }
        PotionEffect::SeeInvisible => "This potion tastes like slime mold juice.",
        PotionEffect::MonsterDetection => {
            if state.monsters.is_empty() {
                "You have a strange feeling for a moment, then it passes."
            } else {
                "You sense the presence of monsters."
            }
        }
        PotionEffect::MagicDetection => {
            if state.items.is_empty() {
                "You have a strange feeling for a moment, then it passes."
            } else {
                "You sense the presence of magic on this level."
            }
        }
        PotionEffect::ThirstQuenching => "This tastes like water.",
    };
    state.message(msg);
}

/// Heal; healing past full raises max hp by one
fn heal_with_overflow(player: &mut Player, amount: i32) {
    if player.hp + amount > player.max_hp {
        player.max_hp += 1;
    }
    player.heal(amount);
}
