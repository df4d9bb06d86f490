//! Monster instances

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{AGGRESSION_PASSIVE, MonsterTemplate, SpecialAttack, with_article};
use crate::combat::Combatant;
use crate::dungeon::Position;

/// Monster speed state, changed by wands
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Speed {
    Slow = 0,
    #[default]
    Normal = 1,
    Fast = 2,
}

/// Per-monster status counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonsterStatus {
    /// Turns left unable to act
    pub paralysis: i32,
    /// Turns left fleeing the player
    pub scared: i32,
    /// Turns left moving erratically
    pub confusion: i32,
}

/// A live monster on the current level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub glyph: char,
    pub level: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub xp: u32,
    pub aggression: u8,
    pub special: SpecialAttack,
    pub drops_gold: bool,

    pub pos: Position,
    /// Attacked or aggravated; passive monsters start pursuing
    pub provoked: bool,
    pub status: MonsterStatus,
    pub speed: Speed,
    /// Special attack suppressed
    pub cancelled: bool,
}

impl Monster {
    /// Create a monster from its template
    pub fn new(template: &MonsterTemplate, pos: Position) -> Self {
        Self {
            name: template.name.to_string(),
            glyph: template.glyph,
            level: template.level,
            hp: template.hp,
            max_hp: template.hp,
            attack: template.attack,
            defense: template.defense,
            xp: template.xp,
            aggression: template.aggression,
            special: template.special,
            drops_gold: template.drops_gold,
            pos,
            provoked: false,
            status: MonsterStatus::default(),
            speed: Speed::Normal,
            cancelled: false,
        }
    }

    /// Turn this monster into another type, keeping position and statuses
    pub fn polymorph_into(&mut self, template: &MonsterTemplate) {
        let pos = self.pos;
        let provoked = self.provoked;
        let status = self.status;
        *self = Monster::new(template, pos);
        self.provoked = provoked;
        self.status = status;
    }

    pub const fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub const fn is_passive(&self) -> bool {
        self.aggression == AGGRESSION_PASSIVE
    }

    /// Effective special attack, accounting for cancellation
    pub const fn active_special(&self) -> SpecialAttack {
        if self.cancelled {
            SpecialAttack::None
        } else {
            self.special
        }
    }

    /// "a bat" / "an orc"
    pub fn described(&self) -> String {
        with_article(&self.name)
    }
}

impl Combatant for Monster {
    fn attack(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn hp_mut(&mut self) -> &mut i32 {
        &mut self.hp
    }
}
