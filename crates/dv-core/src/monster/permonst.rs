//! Monster templates
//!
//! Immutable stats for each monster type, one per letter of the alphabet.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Bespoke effect attached to a monster's melee attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum SpecialAttack {
    #[default]
    None,
    /// Steals gold then vanishes
    StealGold,
    /// Steals an inventory item then vanishes
    StealItem,
    /// Rusts the worn armor; deals no damage
    CorrodeArmor,
    /// Paralyzes the player; deals no damage
    Freeze,
    /// May sap the player's strength
    Venom,
    /// Lowers maximum hit points
    DrainLife,
    /// May cost the player a rank
    DrainXp,
    /// Confuses the player
    Confuse,
}

impl SpecialAttack {
    /// Special-only attackers never deal physical damage
    pub const fn is_special_only(&self) -> bool {
        matches!(self, SpecialAttack::CorrodeArmor | SpecialAttack::Freeze)
    }
}

/// Aggression classes
pub const AGGRESSION_PASSIVE: u8 = 0;
pub const AGGRESSION_MEDIUM: u8 = 1;
pub const AGGRESSION_ROAMING: u8 = 2;
pub const AGGRESSION_ALWAYS: u8 = 3;

/// Monster template (static data for each monster type)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub glyph: char,
    /// Shallowest depth the monster appears on
    pub level: i32,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub xp: u32,
    /// 0 passive, 1 medium, 2 roaming, 3 always active
    pub aggression: u8,
    pub special: SpecialAttack,
    /// Always leaves gold on death
    pub drops_gold: bool,
}

impl MonsterTemplate {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        name: &'static str,
        glyph: char,
        level: i32,
        hp: i32,
        attack: i32,
        defense: i32,
        xp: u32,
        aggression: u8,
    ) -> Self {
        Self {
            name,
            glyph,
            level,
            hp,
            attack,
            defense,
            xp,
            aggression,
            special: SpecialAttack::None,
            drops_gold: false,
        }
    }

    const fn with_special(mut self, special: SpecialAttack) -> Self {
        self.special = special;
        self
    }

    const fn with_gold(mut self) -> Self {
        self.drops_gold = true;
        self
    }
}

use SpecialAttack as S;

/// All monster types, ordered by glyph
pub static MONSTERS: [MonsterTemplate; 26] = [
    MonsterTemplate::new("aquator", 'A', 5, 25, 3, 2, 20, 1).with_special(S::CorrodeArmor),
    MonsterTemplate::new("bat", 'B', 1, 5, 2, 1, 1, 2),
    MonsterTemplate::new("centaur", 'C', 8, 40, 6, 4, 25, 1),
    MonsterTemplate::new("dragon", 'D', 20, 100, 12, 9, 500, 3),
    MonsterTemplate::new("emu", 'E', 1, 6, 2, 0, 2, 1),
    MonsterTemplate::new("venus flytrap", 'F', 6, 30, 4, 3, 20, 3),
    MonsterTemplate::new("griffin", 'G', 13, 60, 8, 6, 100, 2),
    MonsterTemplate::new("hobgoblin", 'H', 1, 8, 3, 2, 3, 1),
    MonsterTemplate::new("ice monster", 'I', 3, 15, 2, 2, 5, 0).with_special(S::Freeze),
    MonsterTemplate::new("jabberwock", 'J', 16, 80, 10, 7, 200, 0),
    MonsterTemplate::new("kestrel", 'K', 1, 4, 2, 1, 1, 1),
    MonsterTemplate::new("leprechaun", 'L', 4, 15, 1, 2, 10, 0)
        .with_special(S::StealGold)
        .with_gold(),
    MonsterTemplate::new("medusa", 'M', 12, 55, 8, 6, 120, 1).with_special(S::Confuse),
    MonsterTemplate::new("nymph", 'N', 5, 15, 1, 1, 15, 0).with_special(S::StealItem),
    MonsterTemplate::new("orc", 'O', 2, 12, 4, 2, 5, 1),
    MonsterTemplate::new("phantom", 'P', 10, 45, 6, 5, 60, 2),
    MonsterTemplate::new("quagga", 'Q', 7, 30, 5, 3, 20, 1),
    MonsterTemplate::new("rattlesnake", 'R', 2, 10, 3, 2, 6, 1).with_special(S::Venom),
    MonsterTemplate::new("snake", 'S', 1, 6, 2, 1, 2, 1),
    MonsterTemplate::new("troll", 'T', 10, 50, 8, 5, 75, 1),
    MonsterTemplate::new("black unicorn", 'U', 11, 55, 8, 6, 90, 1),
    MonsterTemplate::new("vampire", 'V', 14, 60, 8, 6, 120, 1).with_special(S::DrainLife),
    MonsterTemplate::new("wraith", 'W', 9, 40, 5, 4, 55, 1).with_special(S::DrainXp),
    MonsterTemplate::new("xeroc", 'X', 7, 30, 5, 3, 35, 0),
    MonsterTemplate::new("yeti", 'Y', 8, 40, 6, 3, 50, 1),
    MonsterTemplate::new("zombie", 'Z', 3, 16, 4, 1, 7, 1),
];

/// Look up a template by name
pub fn template_by_name(name: &str) -> Option<&'static MonsterTemplate> {
    MONSTERS.iter().find(|t| t.name == name)
}

/// Indefinite article for a monster name
pub fn article(name: &str) -> &'static str {
    match name.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    }
}

/// "a goblin" / "an orc"
pub fn with_article(name: &str) -> String {
    format!("{} {}", article(name), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_per_letter() {
        for (i, t) in MONSTERS.iter().enumerate() {
            assert_eq!(t.glyph, (b'A' + i as u8) as char, "{}", t.name);
            assert!(t.hp > 0 && t.attack > 0 && t.level >= 1);
            assert!(t.aggression <= AGGRESSION_ALWAYS);
        }
    }

    #[test]
    fn test_special_only_monsters() {
        let only: Vec<_> = MONSTERS
            .iter()
            .filter(|t| t.special.is_special_only())
            .map(|t| t.name)
            .collect();
        assert_eq!(only, vec!["aquator", "ice monster"]);
    }

    #[test]
    fn test_articles() {
        assert_eq!(with_article("orc"), "an orc");
        assert_eq!(with_article("hobgoblin"), "a hobgoblin");
        assert_eq!(with_article("ice monster"), "an ice monster");
    }

    #[test]
    fn test_lookup() {
        let lep = template_by_name("leprechaun").unwrap();
        assert!(lep.drops_gold);
        assert_eq!(lep.special, SpecialAttack::StealGold);
        assert!(template_by_name("balrog").is_none());
    }
}
