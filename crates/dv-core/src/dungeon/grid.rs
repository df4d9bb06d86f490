//! The cell matrix and map coordinates

use serde::{Deserialize, Serialize};

use super::{Cell, Tile};

/// A map coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// King-move distance
    pub fn chebyshev(&self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Check if the other position is one of the 8 neighbours
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.chebyshev(other) == 1
    }

    /// The four orthogonal neighbours
    pub fn neighbours4(&self) -> [Position; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }

    /// The eight surrounding positions
    pub fn neighbours8(&self) -> [Position; 8] {
        [
            self.offset(-1, -1),
            self.offset(0, -1),
            self.offset(1, -1),
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(-1, 1),
            self.offset(0, 1),
            self.offset(1, 1),
        ]
    }
}

/// Rectangular grid of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of void cells. Negative sizes are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![Cell::void(); (width * height) as usize],
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells actually stored (used to validate decoded saves)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if position is inside the grid
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    /// Get cell at position
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).and_then(|i| self.cells.get(i))
    }

    /// Get mutable cell at position
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).and_then(|i| self.cells.get_mut(i))
    }

    /// Tile at position, `None` outside the grid
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.get(pos).map(|c| c.tile)
    }

    /// Set the tile at a position. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        if let Some(cell) = self.get_mut(pos) {
            cell.tile = tile;
        }
    }

    /// Check if position is walkable (false outside the grid)
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|t| t.is_walkable())
    }

    /// Check if position blocks sight (false outside the grid)
    pub fn blocks_sight(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|t| t.blocks_sight())
    }

    /// Iterate over all positions with their cells
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Position::new(i as i32 % width, i as i32 / width), c))
    }

    /// Iterate mutably over all cells
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Render the terrain as text, one line per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let tile = self.tile(Position::new(x, y)).unwrap_or_default();
                out.push(tile.symbol());
            }
            out.push('\n');
        }
        out
    }
}
