//! Player hunger

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Player, RingPowers};
use crate::consts::{HUNGER_HUNGRY, HUNGER_WEAK};

/// Hunger state levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum HungerState {
    #[default]
    NotHungry = 0,
    Hungry = 1,
    Weak = 2,
    Starving = 3,
}

impl HungerState {
    /// Calculate hunger state from the food counter
    pub const fn from_food(food: i32) -> Self {
        if food <= 0 {
            HungerState::Starving
        } else if food <= HUNGER_WEAK {
            HungerState::Weak
        } else if food <= HUNGER_HUNGRY {
            HungerState::Hungry
        } else {
            HungerState::NotHungry
        }
    }

    /// Message when the player crosses into this state
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            HungerState::NotHungry => None,
            HungerState::Hungry => Some("You are getting hungry."),
            HungerState::Weak => Some("You are weak from hunger."),
            HungerState::Starving => Some("You are starving!"),
        }
    }
}

/// Digest one turn of food.
///
/// Returns true if the player took starvation damage.
pub fn tick_hunger(player: &mut Player, turn: u64, messages: &mut Vec<String>) -> bool {
    let before = HungerState::from_food(player.food);

    let digest = !player.powers.contains(RingPowers::SLOW_DIGESTION) || turn % 2 == 0;
    if digest && player.food > 0 {
        player.food -= 1;
    }

    let after = HungerState::from_food(player.food);
    if after > before {
        if let Some(msg) = after.message() {
            messages.push(msg.to_string());
        }
    }

    if player.food <= 0 {
        player.hp -= 1;
        return true;
    }
    false
}
