//! The generated level aggregate

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{Corridor, Grid, Position, Room, Sector, Tile};

/// One generated dungeon level.
///
/// Only the visibility flags of `map` change after generation; a stair
/// transition replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub depth: i32,
    pub map: Grid,
    pub sectors: Vec<Sector>,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub stairs_up: Position,
    pub stairs_down: Position,
}

impl Dungeon {
    /// Tile at position, `None` outside the map
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.map.tile(pos)
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.map.is_walkable(pos)
    }

    /// Index of the room whose walled bounds contain `pos`
    pub fn room_index_at(&self, pos: Position) -> Option<usize> {
        self.rooms.iter().position(|r| r.contains_with_walls(pos))
    }

    /// Every walkable position on the map
    pub fn walkable_positions(&self) -> Vec<Position> {
        self.map
            .iter()
            .filter(|(_, c)| c.tile.is_walkable())
            .map(|(p, _)| p)
            .collect()
    }

    /// Flood fill (4-directional) over walkable tiles from `start`
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        let mut seen = HashSet::new();
        if !self.map.is_walkable(start) {
            return seen;
        }
        let mut stack = vec![start];
        seen.insert(start);
        while let Some(pos) = stack.pop() {
            for next in pos.neighbours4() {
                if self.map.is_walkable(next) && seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen
    }

    /// Check that every walkable tile can be reached from the up staircase
    pub fn is_connected(&self) -> bool {
        let reached = self.reachable_from(self.stairs_up);
        self.map
            .iter()
            .filter(|(_, c)| c.tile.is_walkable())
            .all(|(p, _)| reached.contains(&p))
    }
}
