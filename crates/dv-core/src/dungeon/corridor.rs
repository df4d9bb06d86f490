//! Corridor carving
//!
//! Rooms are joined along the adjacency edges of the 3x3 sector grid:
//! 6 horizontal pairs then 6 vertical pairs. Every corridor is an L: walk
//! the horizontal leg from the first center, then the vertical leg into the
//! second. Since the 12 edges connect the sector graph, every room is
//! reachable from every other one for any seed.

use serde::{Deserialize, Serialize};

use super::{Grid, Position, Tile};
use crate::consts::{SECTOR_COLS, SECTOR_ROWS};

/// An L-shaped connection between two room centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    /// Index of the first room
    pub from_room: usize,
    /// Index of the second room
    pub to_room: usize,
    pub from: Position,
    pub to: Position,
}

impl Corridor {
    /// Bend point of the L: end of the horizontal leg
    pub const fn bend(&self) -> Position {
        Position::new(self.to.x, self.from.y)
    }

    /// Positions walked by the corridor, horizontal leg first
    pub fn path(&self) -> Vec<Position> {
        let bend = self.bend();
        let mut path = Vec::new();

        let step_x = (bend.x - self.from.x).signum();
        let mut x = self.from.x;
        loop {
            path.push(Position::new(x, self.from.y));
            if x == bend.x {
                break;
            }
            x += step_x;
        }

        let step_y = (self.to.y - bend.y).signum();
        let mut y = bend.y;
        while y != self.to.y {
            y += step_y;
            path.push(Position::new(bend.x, y));
        }
        path
    }

    /// Carve the corridor into the grid.
    ///
    /// Void becomes Corridor and Wall becomes Door; anything already
    /// walkable is left as is, so carving twice is a no-op.
    pub fn carve(&self, grid: &mut Grid) {
        for pos in self.path() {
            match grid.tile(pos) {
                Some(Tile::Void) => grid.set_tile(pos, Tile::Corridor),
                Some(Tile::Wall) => grid.set_tile(pos, Tile::Door),
                _ => {}
            }
        }
    }
}

/// The 12 sector adjacency pairs, horizontal pairs first, row-major
pub fn adjacency_pairs() -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(12);
    for r in 0..SECTOR_ROWS {
        for c in 0..SECTOR_COLS - 1 {
            pairs.push((r * SECTOR_COLS + c, r * SECTOR_COLS + c + 1));
        }
    }
    for r in 0..SECTOR_ROWS - 1 {
        for c in 0..SECTOR_COLS {
            pairs.push((r * SECTOR_COLS + c, (r + 1) * SECTOR_COLS + c));
        }
    }
    pairs
}
