//! Combat system
//!
//! A single stateless resolver shared by melee, thrown items and monster
//! attacks. It only touches the defender's hp, and only on a hit.

pub mod messages;

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

pub use messages::{
    monster_hit_message, monster_miss_message, player_hit_message, player_miss_message,
    tier_verb,
};

/// Base chance to miss before hit bonuses
pub const BASE_MISS_CHANCE: f64 = 0.25;
/// Miss chance removed per point of hit bonus
pub const MISS_PER_HIT_BONUS: f64 = 0.05;

/// Anything that can attack or be attacked
pub trait Combatant {
    fn attack(&self) -> i32;
    fn defense(&self) -> i32;

    fn hit_bonus(&self) -> i32 {
        0
    }

    fn damage_bonus(&self) -> i32 {
        0
    }

    fn hp_mut(&mut self) -> &mut i32;
}

/// Result of one swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub hit: bool,
    pub damage: i32,
    /// 0..=3 severity bucket, only used to pick flavor text
    pub tier: u8,
}

impl CombatOutcome {
    pub const MISS: Self = Self {
        hit: false,
        damage: 0,
        tier: 0,
    };
}

/// Miss probability for a given hit bonus
pub fn miss_chance(hit_bonus: i32) -> f64 {
    (BASE_MISS_CHANCE - hit_bonus as f64 * MISS_PER_HIT_BONUS).max(0.0)
}

/// Roll only the to-hit check (one draw)
pub fn roll_hit(hit_bonus: i32, rng: &mut dyn RandomSource) -> bool {
    rng.next_f64() >= miss_chance(hit_bonus)
}

/// Roll raw damage and its tier for an attack value (one draw)
pub fn roll_damage(attack: i32, rng: &mut dyn RandomSource) -> (i32, u8) {
    let attack = attack.max(1);
    let raw = 1 + (rng.next_f64() * (attack * 4) as f64).floor() as i32;
    let tier = ((raw - 1) / attack).min(3) as u8;
    (raw, tier)
}

/// Resolve one attack. Draws twice on a hit, once on a miss.
pub fn resolve_combat(
    attacker: &dyn Combatant,
    defender: &mut dyn Combatant,
    rng: &mut dyn RandomSource,
) -> CombatOutcome {
    if !roll_hit(attacker.hit_bonus(), rng) {
        return CombatOutcome::MISS;
    }

    let (raw, tier) = roll_damage(attacker.attack(), rng);
    let damage = (raw - defender.defense() + attacker.damage_bonus()).max(1);
    *defender.hp_mut() -= damage;

    CombatOutcome {
        hit: true,
        damage,
        tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    struct Dummy {
        attack: i32,
        defense: i32,
        hit_bonus: i32,
        damage_bonus: i32,
        hp: i32,
    }

    impl Dummy {
        fn new(attack: i32, defense: i32) -> Self {
            Self {
                attack,
                defense,
                hit_bonus: 0,
                damage_bonus: 0,
                hp: 100,
            }
        }
    }

    impl Combatant for Dummy {
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

    #[test]
    fn test_exact_tier_from_draws() {
        let attacker = Dummy::new(3, 0);
        let mut defender = Dummy::new(1, 0);
        let mut rng = ScriptedRng::new([0.9, 0.333]);
        let out = resolve_combat(&attacker, &mut defender, &mut rng);
        assert!(out.hit);
        assert_eq!(out.tier, 1);
        assert_eq!(out.damage, 4);
        assert_eq!(defender.hp, 96);
    }

    #[test]
    fn test_miss_leaves_hp() {
        let attacker = Dummy::new(5, 0);
        let mut defender = Dummy::new(1, 0);
        let mut rng = ScriptedRng::new([0.1]);
        let out = resolve_combat(&attacker, &mut defender, &mut rng);
        assert_eq!(out, CombatOutcome::MISS);
        assert_eq!(defender.hp, 100);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_damage_floor_of_one() {
        let attacker = Dummy::new(1, 0);
        let mut defender = Dummy::new(1, 999);
        let mut rng = ScriptedRng::new([0.99, 0.99]);
        let out = resolve_combat(&attacker, &mut defender, &mut rng);
        assert!(out.hit);
        assert_eq!(out.damage, 1);
        assert_eq!(defender.hp, 99);
    }

    #[test]
    fn test_tier_caps_at_three() {
        let mut rng = ScriptedRng::new([0.999]);
        let (raw, tier) = roll_damage(2, &mut rng);
        assert_eq!(raw, 8);
        assert_eq!(tier, 3);
    }

    #[test]
    fn test_hit_bonus_removes_misses() {
        assert_eq!(miss_chance(0), 0.25);
        assert!((miss_chance(2) - 0.15).abs() < 1e-9);
        assert_eq!(miss_chance(5), 0.0);
        assert_eq!(miss_chance(9), 0.0);
        let mut rng = ScriptedRng::new([0.0]);
        assert!(roll_hit(5, &mut rng));
    }

    #[test]
    fn test_damage_bonus_applies() {
        let mut attacker = Dummy::new(2, 0);
        attacker.damage_bonus = 3;
        let mut defender = Dummy::new(1, 1);
        let mut rng = ScriptedRng::new([0.5, 0.0]);
        let out = resolve_combat(&attacker, &mut defender, &mut rng);
        // raw 1, -1 defense, +3 bonus
        assert_eq!(out.damage, 3);
        assert_eq!(out.tier, 0);
    }
}
