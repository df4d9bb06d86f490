//! The player character
//!
//! Base stats are edited by gameplay; derived stats (defense, bonuses, ring
//! powers) are only ever written by [`Player::recompute_derived`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::PlayerStatus;
use super::rank::{self, MAX_LEVEL};
use crate::combat::Combatant;
use crate::consts::{STARTING_ATTACK, STARTING_DEFENSE, STARTING_FOOD, STARTING_HP};
use crate::dungeon::Position;
use crate::object::{Item, ItemId, ItemKind, RingEffect};

bitflags! {
    /// Passive powers granted by worn rings
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RingPowers: u16 {
        const STEALTH = 0x0001;
        const AGGRAVATE = 0x0002;
        const SLOW_DIGESTION = 0x0004;
        const MAINTAIN_ARMOR = 0x0008;
        const SEE_INVISIBLE = 0x0010;
        const SEARCHING = 0x0020;
        const ADORNMENT = 0x0040;
    }
}

// Manual serde impl for RingPowers
impl Serialize for RingPowers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RingPowers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(RingPowers::from_bits_truncate(bits))
    }
}

/// Number of items in the starting kit; ids 1..=N are taken
pub const STARTING_KIT_SIZE: u32 = 3;

/// Hp regeneration period for a level: heal 1 every N turns
pub fn regen_rate(xp_level: i32) -> u64 {
    (21 - 2 * xp_level).max(3) as u64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub pos: Position,

    pub hp: i32,
    pub max_hp: i32,
    /// Current strength; drained by venom
    pub attack: i32,
    /// Value restored by a potion of restore strength
    pub max_attack: i32,
    pub base_defense: i32,
    /// Derived: base defense + armor + protection rings
    pub defense: i32,

    pub gold: u32,
    pub xp: u32,
    pub xp_level: i32,
    pub rank: String,
    pub food: i32,

    pub inventory: Vec<Item>,
    pub equipped_weapon: Option<ItemId>,
    pub equipped_armor: Option<ItemId>,
    pub equipped_rings: [Option<ItemId>; 2],

    // Derived from equipment
    pub hit_bonus: i32,
    pub damage_bonus: i32,
    pub ring_defense_bonus: i32,
    /// Number of worn regeneration rings
    pub regeneration: i32,
    pub powers: RingPowers,

    pub status: PlayerStatus,
    /// Next melee hit confuses its target
    pub confuse_touch: bool,
}

impl Player {
    /// A fresh level-1 character with the starting kit equipped
    pub fn new(name: &str, pos: Position) -> Self {
        let mace = Item::weapon(ItemId(1), "mace", 1, 1);
        let armor = Item::armor(ItemId(2), "ring mail", 3);
        let food = Item::new(ItemId(3), ItemKind::Food);

        let mut player = Self {
            name: name.to_string(),
            pos,
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            attack: STARTING_ATTACK,
            max_attack: STARTING_ATTACK,
            base_defense: STARTING_DEFENSE,
            defense: STARTING_DEFENSE,
            gold: 0,
            xp: 0,
            xp_level: 1,
            rank: rank::rank_title(1).to_string(),
            food: STARTING_FOOD,
            inventory: vec![mace, armor, food],
            equipped_weapon: Some(ItemId(1)),
            equipped_armor: Some(ItemId(2)),
            equipped_rings: [None, None],
            hit_bonus: 0,
            damage_bonus: 0,
            ring_defense_bonus: 0,
            regeneration: 0,
            powers: RingPowers::empty(),
            status: PlayerStatus::default(),
            confuse_touch: false,
        };
        player.recompute_derived();
        player
    }

    pub const fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn has_power(&self, power: RingPowers) -> bool {
        self.powers.contains(power)
    }

    /// Rebuild every derived stat from base stats and worn equipment
    pub fn recompute_derived(&mut self) {
        let mut hit_bonus = 0;
        let mut damage_bonus = 0;
        let mut armor_ac = 0;
        let mut ring_defense = 0;
        let mut regeneration = 0;
        let mut powers = RingPowers::empty();

        if let Some(ItemKind::Weapon {
            hit_bonus: h,
            damage_bonus: d,
            ..
        }) = self.equipped_kind(self.equipped_weapon)
        {
            hit_bonus += h;
            damage_bonus += d;
        }

        if let Some(ItemKind::Armor { ac, .. }) = self.equipped_kind(self.equipped_armor) {
            armor_ac = *ac;
        }

        for slot in self.equipped_rings {
            let Some(ItemKind::Ring(effect)) = self.equipped_kind(slot) else {
                continue;
            };
            match *effect {
                RingEffect::Protection(n) => ring_defense += n,
                RingEffect::Dexterity(n) => hit_bonus += n,
                RingEffect::IncreaseDamage(n) => damage_bonus += n,
                RingEffect::Regeneration => regeneration += 1,
                RingEffect::SlowDigestion => powers |= RingPowers::SLOW_DIGESTION,
                RingEffect::Stealth => powers |= RingPowers::STEALTH,
                RingEffect::AggravateMonster => powers |= RingPowers::AGGRAVATE,
                RingEffect::MaintainArmor => powers |= RingPowers::MAINTAIN_ARMOR,
                RingEffect::SeeInvisible => powers |= RingPowers::SEE_INVISIBLE,
                RingEffect::Searching => powers |= RingPowers::SEARCHING,
                RingEffect::Adornment => powers |= RingPowers::ADORNMENT,
            }
        }

        self.hit_bonus = hit_bonus;
        self.damage_bonus = damage_bonus;
        self.ring_defense_bonus = ring_defense;
        self.regeneration = regeneration;
        self.powers = powers;
        self.defense = self.base_defense + armor_ac + ring_defense;
    }

    fn equipped_kind(&self, slot: Option<ItemId>) -> Option<&ItemKind> {
        slot.and_then(|id| self.item(id)).map(|item| &item.kind)
    }

    /// Inventory index of an item
    pub fn item_index(&self, id: ItemId) -> Option<usize> {
        self.inventory.iter().position(|i| i.id == id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.inventory.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.inventory.iter_mut().find(|i| i.id == id)
    }

    /// Check if the item is in any equipment slot
    pub fn is_equipped(&self, id: ItemId) -> bool {
        self.equipped_weapon == Some(id)
            || self.equipped_armor == Some(id)
            || self.equipped_rings.contains(&Some(id))
    }

    /// Clear every slot holding this item. Returns true if anything changed.
    pub fn unequip(&mut self, id: ItemId) -> bool {
        let mut changed = false;
        if self.equipped_weapon == Some(id) {
            self.equipped_weapon = None;
            changed = true;
        }
        if self.equipped_armor == Some(id) {
            self.equipped_armor = None;
            changed = true;
        }
        for slot in &mut self.equipped_rings {
            if *slot == Some(id) {
                *slot = None;
                changed = true;
            }
        }
        if changed {
            self.recompute_derived();
        }
        changed
    }

    /// Take an item out of the inventory, unequipping it first
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        let id = self.inventory.get(index)?.id;
        self.unequip(id);
        Some(self.inventory.remove(index))
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.equipped_weapon.and_then(|id| self.item(id))
    }

    pub fn armor(&self) -> Option<&Item> {
        self.equipped_armor.and_then(|id| self.item(id))
    }

    /// Heal up to max hp
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Add experience and apply any rank promotion.
    ///
    /// Pushes two messages per promotion and returns true if the level rose.
    pub fn gain_xp(&mut self, amount: u32, messages: &mut Vec<String>) -> bool {
        self.xp = self.xp.saturating_add(amount);
        let new_level = rank::level_for_xp(self.xp);
        if new_level > self.xp_level {
            self.promote_to(new_level, messages);
            true
        } else {
            false
        }
    }

    /// Raise the player to the next rank (potion of raise level, debug)
    pub fn raise_level(&mut self, messages: &mut Vec<String>) -> bool {
        if self.xp_level >= MAX_LEVEL {
            messages.push("You feel as experienced as you can be.".to_string());
            return false;
        }
        let target = self.xp_level + 1;
        self.xp = self.xp.max(rank::xp_threshold(target));
        self.promote_to(target, messages);
        true
    }

    /// Apply the hp gains for every rank between the current one and
    /// `new_level`, keeping the same fraction of health
    fn promote_to(&mut self, new_level: i32, messages: &mut Vec<String>) {
        let old_level = self.xp_level;
        let gain = rank::hp_gain_between(old_level, new_level);
        let ratio = self.hp.max(0) as f64 / self.max_hp.max(1) as f64;

        self.max_hp += gain;
        self.hp = ((ratio * self.max_hp as f64).round() as i32).max(1);
        self.xp_level = new_level;
        self.rank = rank::rank_title(new_level).to_string();

        tracing::info!(from = old_level, to = new_level, rank = %self.rank, "rank promotion");
        messages.push(format!("Welcome to level {new_level}."));
        messages.push(format!("You are now a {}.", self.rank));
    }

    /// Lose one rank (wraith touch). Returns false at level 1.
    pub fn lose_rank(&mut self) -> bool {
        if self.xp_level <= 1 {
            return false;
        }
        let lost = rank::hp_gain(self.xp_level);
        self.xp_level -= 1;
        self.xp = rank::xp_threshold(self.xp_level);
        self.rank = rank::rank_title(self.xp_level).to_string();
        self.max_hp = (self.max_hp - lost).max(1);
        self.hp = self.hp.min(self.max_hp);
        true
    }
}

impl Combatant for Player {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(id: u32, effect: RingEffect) -> Item {
        Item::new(ItemId(id), ItemKind::Ring(effect))
    }

    #[test]
    fn test_starting_kit() {
        let p = Player::new("Tester", Position::new(1, 1));
        assert_eq!(p.hp, STARTING_HP);
        assert_eq!(p.inventory.len(), 3);
        assert_eq!(p.hit_bonus, 1);
        assert_eq!(p.damage_bonus, 1);
        assert_eq!(p.defense, STARTING_DEFENSE + 3);
        assert_eq!(p.rank, "Guild Novice");
    }

    #[test]
    fn test_rings_feed_derived_stats() {
        let mut p = Player::new("Tester", Position::default());
        p.inventory.push(ring(10, RingEffect::Protection(2)));
        p.inventory.push(ring(11, RingEffect::Regeneration));
        p.equipped_rings = [Some(ItemId(10)), Some(ItemId(11))];
        p.recompute_derived();
        assert_eq!(p.ring_defense_bonus, 2);
        assert_eq!(p.defense, STARTING_DEFENSE + 3 + 2);
        assert_eq!(p.regeneration, 1);

        p.unequip(ItemId(10));
        assert_eq!(p.ring_defense_bonus, 0);
        assert_eq!(p.defense, STARTING_DEFENSE + 3);
    }

    #[test]
    fn test_ring_powers_bitflags() {
        let mut p = Player::new("Tester", Position::default());
        p.inventory.push(ring(10, RingEffect::Stealth));
        p.inventory.push(ring(11, RingEffect::SlowDigestion));
        p.equipped_rings = [Some(ItemId(10)), Some(ItemId(11))];
        p.recompute_derived();
        assert!(p.has_power(RingPowers::STEALTH | RingPowers::SLOW_DIGESTION));
        assert!(!p.has_power(RingPowers::AGGRAVATE));
    }

    #[test]
    fn test_remove_item_unequips() {
        let mut p = Player::new("Tester", Position::default());
        let mace = p.remove_item(0).unwrap();
        assert_eq!(mace.id, ItemId(1));
        assert_eq!(p.equipped_weapon, None);
        assert_eq!(p.hit_bonus, 0);
        assert!(p.remove_item(10).is_none());
    }

    #[test]
    fn test_promotion_rescales_hp() {
        let mut p = Player::new("Tester", Position::default());
        p.hp = 6;
        let mut messages = Vec::new();
        assert!(p.gain_xp(20, &mut messages));
        assert_eq!(p.xp_level, 3);
        assert_eq!(p.max_hp, 12 + 4 + 4);
        assert_eq!(p.hp, 10);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], "You are now a Journeyman.");
    }

    #[test]
    fn test_promotion_hp_floor() {
        let mut p = Player::new("Tester", Position::default());
        p.hp = 0;
        let mut messages = Vec::new();
        p.gain_xp(10, &mut messages);
        assert_eq!(p.hp, 1);
    }

    #[test]
    fn test_lose_rank() {
        let mut p = Player::new("Tester", Position::default());
        let mut messages = Vec::new();
        p.gain_xp(45, &mut messages);
        assert_eq!(p.xp_level, 4);
        let max = p.max_hp;
        assert!(p.lose_rank());
        assert_eq!(p.xp_level, 3);
        assert_eq!(p.xp, 20);
        assert_eq!(p.max_hp, max - 5);
        assert!(p.hp <= p.max_hp);
    }

    #[test]
    fn test_regen_rate() {
        assert_eq!(regen_rate(1), 19);
        assert_eq!(regen_rate(9), 3);
        assert_eq!(regen_rate(20), 3);
    }

    #[test]
    fn test_powers_serde_as_bits() {
        let json = serde_json::to_string(&(RingPowers::STEALTH | RingPowers::ADORNMENT)).unwrap();
        assert_eq!(json, "65");
        let back: RingPowers = serde_json::from_str(&json).unwrap();
        assert!(back.contains(RingPowers::ADORNMENT));
    }
}
