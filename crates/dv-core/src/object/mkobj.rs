//! Random item creation

use strum::IntoEnumIterator;

use super::{Item, ItemId, ItemKind, PotionEffect, RingEffect, ScrollEffect, WandEffect};
use crate::rng::RandomSource;

/// Item class weights (percent)
const CLASS_WEIGHTS: [(ItemClass, u32); 7] = [
    (ItemClass::Food, 17),
    (ItemClass::Weapon, 8),
    (ItemClass::Armor, 8),
    (ItemClass::Potion, 27),
    (ItemClass::Scroll, 30),
    (ItemClass::Ring, 5),
    (ItemClass::Wand, 5),
];

const WEAPONS: [&str; 5] = ["mace", "long sword", "dagger", "spear", "two handed sword"];

/// Armor names with their base protection
const ARMORS: [(&str, i32); 8] = [
    ("leather armor", 2),
    ("ring mail", 3),
    ("studded leather armor", 3),
    ("scale mail", 4),
    ("chain mail", 5),
    ("splint mail", 6),
    ("banded mail", 6),
    ("plate mail", 7),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemClass {
    Food,
    Weapon,
    Armor,
    Potion,
    Scroll,
    Ring,
    Wand,
}

fn pick_class(rng: &mut dyn RandomSource) -> ItemClass {
    let total: u32 = CLASS_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.below(total);
    for &(class, weight) in &CLASS_WEIGHTS {
        if roll < weight {
            return class;
        }
        roll -= weight;
    }
    ItemClass::Food
}

fn pick<T: Copy>(items: &[T], rng: &mut dyn RandomSource) -> T {
    debug_assert!(!items.is_empty());
    items[rng.pick(items.len()).unwrap_or(0)]
}

/// Random enchantment for numeric rings: usually +1..+3, sometimes cursed
fn ring_bonus(rng: &mut dyn RandomSource) -> i32 {
    let n = rng.range(1, 3);
    if rng.chance(0.15) { -n } else { n }
}

pub fn random_potion(rng: &mut dyn RandomSource) -> PotionEffect {
    let all: Vec<_> = PotionEffect::iter().collect();
    pick(&all, rng)
}

pub fn random_scroll(rng: &mut dyn RandomSource) -> ScrollEffect {
    let all: Vec<_> = ScrollEffect::iter().collect();
    pick(&all, rng)
}

pub fn random_ring(rng: &mut dyn RandomSource) -> RingEffect {
    let all: Vec<_> = RingEffect::iter().collect();
    match pick(&all, rng) {
        RingEffect::Protection(_) => RingEffect::Protection(ring_bonus(rng)),
        RingEffect::Dexterity(_) => RingEffect::Dexterity(ring_bonus(rng)),
        RingEffect::IncreaseDamage(_) => RingEffect::IncreaseDamage(ring_bonus(rng)),
        other => other,
    }
}

pub fn random_wand(rng: &mut dyn RandomSource) -> WandEffect {
    let all: Vec<_> = WandEffect::iter().collect();
    pick(&all, rng)
}

/// Create a random item
pub fn random_item(id: ItemId, rng: &mut dyn RandomSource) -> Item {
    let kind = match pick_class(rng) {
        ItemClass::Food => ItemKind::Food,
        ItemClass::Weapon => ItemKind::Weapon {
            name: pick(&WEAPONS, rng).to_string(),
            hit_bonus: rng.range(-1, 2),
            damage_bonus: rng.range(-1, 2),
        },
        ItemClass::Armor => {
            let (name, ac) = pick(&ARMORS, rng);
            ItemKind::Armor {
                name: name.to_string(),
                ac: (ac + rng.range(-1, 1)).max(0),
                protected: false,
            }
        }
        ItemClass::Potion => ItemKind::Potion(random_potion(rng)),
        ItemClass::Scroll => ItemKind::Scroll(random_scroll(rng)),
        ItemClass::Ring => ItemKind::Ring(random_ring(rng)),
        ItemClass::Wand => ItemKind::Wand {
            effect: random_wand(rng),
            charges: rng.range(3, 7),
        },
    };
    Item::new(id, kind)
}
