//! Item instances and their effect tables

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Unique identifier for an item, stable across inventory moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    pub fn next(self) -> Self {
        ItemId(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum PotionEffect {
    Healing,
    ExtraHealing,
    Confusion,
    Blindness,
    Sleep,
    HasteSelf,
    RaiseLevel,
    GainStrength,
    RestoreStrength,
    Poison,
    SeeInvisible,
    MonsterDetection,
    MagicDetection,
    ThirstQuenching,
}

impl PotionEffect {
    pub const fn name(&self) -> &'static str {
        match self {
            PotionEffect::Healing => "healing",
            PotionEffect::ExtraHealing => "extra healing",
            PotionEffect::Confusion => "confusion",
            PotionEffect::Blindness => "blindness",
            PotionEffect::Sleep => "sleep",
            PotionEffect::HasteSelf => "haste self",
            PotionEffect::RaiseLevel => "raise level",
            PotionEffect::GainStrength => "gain strength",
            PotionEffect::RestoreStrength => "restore strength",
            PotionEffect::Poison => "poison",
            PotionEffect::SeeInvisible => "see invisible",
            PotionEffect::MonsterDetection => "monster detection",
            PotionEffect::MagicDetection => "magic detection",
            PotionEffect::ThirstQuenching => "thirst quenching",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ScrollEffect {
    EnchantArmor,
    EnchantWeapon,
    Teleportation,
    MagicMapping,
    HoldMonster,
    Sleep,
    ScareMonster,
    ConfuseMonster,
    CreateMonster,
    AggravateMonsters,
    ProtectArmor,
    Identify,
    RemoveCurse,
    GoldDetection,
}

impl ScrollEffect {
    pub const fn name(&self) -> &'static str {
        match self {
            ScrollEffect::EnchantArmor => "enchant armor",
            ScrollEffect::EnchantWeapon => "enchant weapon",
            ScrollEffect::Teleportation => "teleportation",
            ScrollEffect::MagicMapping => "magic mapping",
            ScrollEffect::HoldMonster => "hold monster",
            ScrollEffect::Sleep => "sleep",
            ScrollEffect::ScareMonster => "scare monster",
            ScrollEffect::ConfuseMonster => "confuse monster",
            ScrollEffect::CreateMonster => "create monster",
            ScrollEffect::AggravateMonsters => "aggravate monsters",
            ScrollEffect::ProtectArmor => "protect armor",
            ScrollEffect::Identify => "identify",
            ScrollEffect::RemoveCurse => "remove curse",
            ScrollEffect::GoldDetection => "gold detection",
        }
    }
}

/// Ring effects. Numeric rings carry their enchantment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum RingEffect {
    Protection(i32),
    Dexterity(i32),
    IncreaseDamage(i32),
    Regeneration,
    SlowDigestion,
    Stealth,
    AggravateMonster,
    MaintainArmor,
    SeeInvisible,
    Searching,
    Adornment,
}

impl RingEffect {
    pub const fn name(&self) -> &'static str {
        match self {
            RingEffect::Protection(_) => "protection",
            RingEffect::Dexterity(_) => "dexterity",
            RingEffect::IncreaseDamage(_) => "increase damage",
            RingEffect::Regeneration => "regeneration",
            RingEffect::SlowDigestion => "slow digestion",
            RingEffect::Stealth => "stealth",
            RingEffect::AggravateMonster => "aggravate monster",
            RingEffect::MaintainArmor => "maintain armor",
            RingEffect::SeeInvisible => "see invisible",
            RingEffect::Searching => "searching",
            RingEffect::Adornment => "adornment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum WandEffect {
    MagicMissile,
    Striking,
    Lightning,
    Fire,
    Cold,
    SlowMonster,
    HasteMonster,
    TeleportAway,
    Polymorph,
    Cancellation,
    DrainLife,
    Light,
    Nothing,
}

impl WandEffect {
    pub const fn name(&self) -> &'static str {
        match self {
            WandEffect::MagicMissile => "magic missile",
            WandEffect::Striking => "striking",
            WandEffect::Lightning => "lightning",
            WandEffect::Fire => "fire",
            WandEffect::Cold => "cold",
            WandEffect::SlowMonster => "slow monster",
            WandEffect::HasteMonster => "haste monster",
            WandEffect::TeleportAway => "teleport away",
            WandEffect::Polymorph => "polymorph",
            WandEffect::Cancellation => "cancellation",
            WandEffect::DrainLife => "drain life",
            WandEffect::Light => "light",
            WandEffect::Nothing => "nothing",
        }
    }

    /// Damage range of bolt wands, `None` for utility wands
    pub const fn bolt_damage(&self) -> Option<(i32, i32)> {
        match self {
            WandEffect::MagicMissile => Some((2, 8)),
            WandEffect::Striking => Some((2, 12)),
            WandEffect::Lightning | WandEffect::Fire | WandEffect::Cold => Some((6, 18)),
            _ => None,
        }
    }
}

/// What an item is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon {
        name: String,
        hit_bonus: i32,
        damage_bonus: i32,
    },
    Armor {
        name: String,
        ac: i32,
        /// Immune to corrosion
        protected: bool,
    },
    Food,
    Potion(PotionEffect),
    Scroll(ScrollEffect),
    Ring(RingEffect),
    Wand {
        effect: WandEffect,
        charges: i32,
    },
}

/// An item instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind) -> Self {
        Self { id, kind }
    }

    pub fn weapon(id: ItemId, name: &str, hit_bonus: i32, damage_bonus: i32) -> Self {
        Self::new(
            id,
            ItemKind::Weapon {
                name: name.to_string(),
                hit_bonus,
                damage_bonus,
            },
        )
    }

    pub fn armor(id: ItemId, name: &str, ac: i32) -> Self {
        Self::new(
            id,
            ItemKind::Armor {
                name: name.to_string(),
                ac,
                protected: false,
            },
        )
    }

    pub const fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. })
    }

    pub const fn is_armor(&self) -> bool {
        matches!(self.kind, ItemKind::Armor { .. })
    }

    pub const fn is_ring(&self) -> bool {
        matches!(self.kind, ItemKind::Ring(_))
    }

    /// Display name, e.g. "mace (+1,+1)" or "wand of fire [3]"
    pub fn name(&self) -> String {
        match &self.kind {
            ItemKind::Weapon {
                name,
                hit_bonus,
                damage_bonus,
            } => format!("{name} ({hit_bonus:+},{damage_bonus:+})"),
            ItemKind::Armor { name, ac, .. } => format!("{name} [{ac}]"),
            ItemKind::Food => "food ration".to_string(),
            ItemKind::Potion(e) => format!("potion of {}", e.name()),
            ItemKind::Scroll(e) => format!("scroll of {}", e.name()),
            ItemKind::Ring(e) => match e {
                RingEffect::Protection(n) | RingEffect::Dexterity(n) | RingEffect::IncreaseDamage(n) => {
                    format!("ring of {} ({n:+})", e.name())
                }
                _ => format!("ring of {}", e.name()),
            },
            ItemKind::Wand { effect, charges } => format!("wand of {} [{charges}]", effect.name()),
        }
    }
}
