//! Core game constants
//!
//! Tuning values are fixed configuration. Values that scenarios depend on
//! exactly (miss chance, steal fractions) live next to the code that uses
//! them; everything here is a tunable default.

/// Map dimensions
pub const MAP_WIDTH: i32 = 80;
pub const MAP_HEIGHT: i32 = 22;

/// Sector layout (3x3)
pub const SECTOR_COLS: usize = 3;
pub const SECTOR_ROWS: usize = 3;

/// Placement jitter on each side of a room inside its sector
pub const ROOM_PAD: i32 = 2;
/// Smallest room interior on either axis
pub const MIN_ROOM_SIZE: i32 = 3;

/// Rooms are never lit at or below this depth
pub const MAX_LIT_DEPTH: i32 = 10;

/// Player sight radius
pub const SIGHT_RADIUS: i32 = 8;
/// Monsters further than this (Chebyshev) ignore the player
pub const MONSTER_SIGHT: i32 = 10;
/// Roaming monsters only pursue inside this radius
pub const ROAM_RADIUS: i32 = 5;

/// Leprechaun theft ceiling
pub const LEPRECHAUN_MAX_STEAL: u32 = 250;

/// Chance a slain monster leaves a gold pile
pub const GOLD_DROP_CHANCE: f64 = 0.1;

/// Per-room spawn chances on level creation
pub const MONSTER_ROOM_CHANCE: f64 = 0.5;
pub const GOLD_ROOM_CHANCE: f64 = 0.5;
pub const ITEM_ROOM_CHANCE: f64 = 0.35;

/// Hunger
pub const STARTING_FOOD: i32 = 1300;
pub const STOMACH_SIZE: i32 = 2000;
pub const FOOD_RATION_VALUE: i32 = 1100;
pub const HUNGER_HUNGRY: i32 = 300;
pub const HUNGER_WEAK: i32 = 150;

/// Starting player stats
pub const STARTING_HP: i32 = 12;
pub const STARTING_ATTACK: i32 = 3;
pub const STARTING_DEFENSE: i32 = 1;

/// Status durations
pub const TELEPORT_CONFUSION: i32 = 3;

/// Radii for area effects
pub const HOLD_RADIUS: i32 = 2;
pub const SCARE_RADIUS: i32 = 3;
pub const DRAIN_RADIUS: i32 = 5;

/// Range of thrown items and wand bolts
pub const THROW_RANGE: i32 = 8;
pub const BOLT_RANGE: i32 = 10;

/// Inventory limit
pub const MAX_INVENTORY: usize = 23;

/// Default player name
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";
