//! Monster system
//!
//! Contains monster templates (permonst), instances (monst), creation,
//! the AI stepper and special attacks.

pub mod ai;
pub mod makemon;
mod monst;
mod permonst;
pub mod special;

pub use ai::step_monsters;
pub use monst::{Monster, MonsterStatus, Speed};
pub use permonst::{
    AGGRESSION_ALWAYS, AGGRESSION_MEDIUM, AGGRESSION_PASSIVE, AGGRESSION_ROAMING, MONSTERS,
    MonsterTemplate, SpecialAttack, article, template_by_name, with_article,
};
