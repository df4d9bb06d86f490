//! Object system
//!
//! Item instances, effect tables and random item creation.

mod mkobj;
mod obj;

use serde::{Deserialize, Serialize};

use crate::dungeon::Position;

pub use mkobj::{random_item, random_potion, random_ring, random_scroll, random_wand};
pub use obj::{Item, ItemId, ItemKind, PotionEffect, RingEffect, ScrollEffect, WandEffect};

/// A pile of gold on the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldPile {
    pub pos: Position,
    pub amount: u32,
}

/// An item lying on the floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorItem {
    pub pos: Position,
    pub item: Item,
}
