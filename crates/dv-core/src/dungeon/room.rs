//! Sectors and rooms
//!
//! The map is cut into a fixed 3x3 grid of sectors and each sector holds
//! exactly one walled room.

use serde::{Deserialize, Serialize};

use super::{Grid, Position, Tile};
use crate::consts::{MIN_ROOM_SIZE, ROOM_PAD, SECTOR_COLS, SECTOR_ROWS};
use crate::rng::RandomSource;

/// A rectangular slice of the map hosting one room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Sector {
    /// Check if a position lies inside the sector
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.y >= self.y
            && pos.x < self.x + self.width
            && pos.y < self.y + self.height
    }
}

/// Cut `total` into `parts` spans whose lengths sum exactly to `total`.
///
/// Boundaries are the rounded cumulative sums of equal weights, so every
/// span differs from the others by at most one tile.
fn split_evenly(total: i32, parts: usize) -> Vec<(i32, i32)> {
    let total = total.max(0);
    let mut spans = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 1..=parts {
        let end = if i == parts {
            total
        } else {
            ((total as f64) * (i as f64) / (parts as f64)).round() as i32
        };
        spans.push((start, end - start));
        start = end;
    }
    spans
}

/// Partition a map into the 3x3 sector layout, row-major
pub fn sector_layout(width: i32, height: i32) -> Vec<Sector> {
    let cols = split_evenly(width, SECTOR_COLS);
    let rows = split_evenly(height, SECTOR_ROWS);
    let mut sectors = Vec::with_capacity(SECTOR_COLS * SECTOR_ROWS);
    for &(y, h) in &rows {
        for &(x, w) in &cols {
            sectors.push(Sector {
                x,
                y,
                width: w,
                height: h,
            });
        }
    }
    sectors
}

/// A room: interior bounds plus a one-tile wall perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Interior left edge
    pub x: i32,
    /// Interior top edge
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Permanently revealed once entered
    pub illuminated: bool,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            illuminated: false,
        }
    }

    /// Center of the interior
    pub const fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a position is inside the interior
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.y >= self.y
            && pos.x < self.x + self.width
            && pos.y < self.y + self.height
    }

    /// Check if a position is inside the interior or on the wall ring
    pub fn contains_with_walls(&self, pos: Position) -> bool {
        pos.x >= self.x - 1
            && pos.y >= self.y - 1
            && pos.x <= self.x + self.width
            && pos.y <= self.y + self.height
    }

    /// All interior positions
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Position::new(x, y)))
    }

    /// All interior and wall positions
    pub fn bounds(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y - 1..=self.y + self.height).flat_map(move |y| {
            (self.x - 1..=self.x + self.width).map(move |x| Position::new(x, y))
        })
    }

    /// Carve walls and floor into the grid. Cells outside the perimeter are
    /// left alone; cells outside the grid are skipped.
    pub fn carve(&self, grid: &mut Grid) {
        for pos in self.bounds() {
            let tile = if self.contains(pos) {
                Tile::Floor
            } else {
                Tile::Wall
            };
            grid.set_tile(pos, tile);
        }
    }
}

/// Pick a room inside a sector.
///
/// Size is drawn from `[3, available - 2*PAD]` per axis where `available`
/// excludes the two wall tiles; the position is drawn from the remaining
/// slack. Sectors too small for a 3x3 room still get one, clamped to the
/// sector origin.
pub fn place_room(sector: &Sector, rng: &mut dyn RandomSource) -> Room {
    let avail_w = sector.width - 2;
    let avail_h = sector.height - 2;

    let max_w = (avail_w - 2 * ROOM_PAD).max(MIN_ROOM_SIZE);
    let max_h = (avail_h - 2 * ROOM_PAD).max(MIN_ROOM_SIZE);
    let width = rng.range(MIN_ROOM_SIZE, max_w);
    let height = rng.range(MIN_ROOM_SIZE, max_h);

    let slack_x = (avail_w - width).max(0);
    let slack_y = (avail_h - height).max(0);
    let x = sector.x + 1 + rng.range(0, slack_x);
    let y = sector.y + 1 + rng.range(0, slack_y);

    Room::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    #[test]
    fn test_split_sums_exactly() {
        for total in [0, 1, 7, 22, 80, 101] {
            let spans = split_evenly(total, 3);
            assert_eq!(spans.iter().map(|s| s.1).sum::<i32>(), total);
            assert_eq!(spans[0].0, 0);
        }
    }

    #[test]
    fn test_default_layout() {
        let sectors = sector_layout(80, 22);
        assert_eq!(sectors.len(), 9);
        assert_eq!((sectors[0].x, sectors[0].y), (0, 0));
        let widths: Vec<_> = sectors[..3].iter().map(|s| s.width).collect();
        assert_eq!(widths.iter().sum::<i32>(), 80);
        let heights: Vec<_> = [0, 3, 6].iter().map(|&i| sectors[i].height).collect();
        assert_eq!(heights.iter().sum::<i32>(), 22);
    }

    #[test]
    fn test_room_fits_sector() {
        let mut rng = GameRng::new(3);
        for sector in sector_layout(80, 22) {
            for _ in 0..50 {
                let room = place_room(&sector, &mut rng);
                assert!(room.width >= 3 && room.height >= 3);
                assert!(room.x - 1 >= sector.x);
                assert!(room.y - 1 >= sector.y);
                assert!(room.x + room.width < sector.x + sector.width);
                assert!(room.y + room.height < sector.y + sector.height);
            }
        }
    }

    #[test]
    fn test_tiny_sector_still_gets_minimum_room() {
        let sector = Sector {
            x: 0,
            y: 0,
            width: 2,
            height: 1,
        };
        let mut rng = GameRng::new(1);
        let room = place_room(&sector, &mut rng);
        assert_eq!((room.width, room.height), (3, 3));
    }

    #[test]
    fn test_carve_leaves_outside_untouched() {
        let mut grid = Grid::new(10, 10);
        let room = Room::new(2, 2, 3, 3);
        room.carve(&mut grid);
        assert_eq!(grid.tile(Position::new(1, 1)), Some(Tile::Wall));
        assert_eq!(grid.tile(Position::new(3, 3)), Some(Tile::Floor));
        assert_eq!(grid.tile(Position::new(0, 0)), Some(Tile::Void));
        assert_eq!(grid.tile(Position::new(6, 6)), Some(Tile::Void));
        assert_eq!(room.center(), Position::new(3, 3));
    }
}
