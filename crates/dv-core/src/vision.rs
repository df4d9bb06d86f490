//! Field of view
//!
//! Recursive shadowcasting over eight octants. Each octant scans rows
//! outward from the origin and narrows the visible arc around blocking
//! tiles. Cells are marked before their opacity is tested, so the facing
//! side of a wall is lit while whatever stands behind it stays dark.
//!
//! Only Void and Wall block sight. Probes outside the grid are ignored.

use crate::consts::SIGHT_RADIUS;
use crate::dungeon::{Dungeon, Grid, Position};
use crate::player::Player;

/// Octant transforms: (xx, xy, yx, yy)
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// Clear the transient `visible` flag on every cell; `visited` is kept
pub fn reset_visibility(grid: &mut Grid) {
    for cell in grid.cells_mut() {
        cell.visible = false;
    }
}

/// Recompute visibility from `origin` out to `radius` (Chebyshev)
pub fn compute_fov(grid: &mut Grid, origin: Position, radius: i32) {
    reset_visibility(grid);

    if let Some(cell) = grid.get_mut(origin) {
        cell.reveal();
    }

    let radius = radius.max(0);
    for &(xx, xy, yx, yy) in &OCTANTS {
        cast_light(
            grid,
            origin,
            1,
            1.0,
            0.0,
            radius,
            Transform { xx, xy, yx, yy },
        );
    }

    // Lit rooms stay visible regardless of line of sight
    for cell in grid.cells_mut() {
        if cell.always_visible {
            cell.reveal();
        }
    }
}

#[derive(Clone, Copy)]
struct Transform {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

fn cast_light(
    grid: &mut Grid,
    origin: Position,
    row: i32,
    mut start: f64,
    end: f64,
    radius: i32,
    t: Transform,
) {
    if start < end {
        return;
    }

    let mut new_start = 0.0;
    for j in row..=radius {
        let dy = -j;
        let mut dx = -j - 1;
        let mut blocked = false;

        while dx <= 0 {
            dx += 1;
            let pos = Position::new(
                origin.x + dx * t.xx + dy * t.xy,
                origin.y + dx * t.yx + dy * t.yy,
            );
            let l_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let r_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start < r_slope {
                continue;
            }
            if end > l_slope {
                break;
            }

            if let Some(cell) = grid.get_mut(pos) {
                cell.reveal();
            }

            let opaque = grid.blocks_sight(pos);
            if blocked {
                if opaque {
                    new_start = r_slope;
                } else {
                    blocked = false;
                    start = new_start;
                }
            } else if opaque && j < radius {
                blocked = true;
                cast_light(grid, origin, j + 1, start, l_slope, radius, t);
                new_start = r_slope;
            }
        }

        if blocked {
            break;
        }
    }
}

/// Sight radius for this turn; blindness collapses it to the player's tile
pub fn effective_sight_radius(player: &Player) -> i32 {
    if player.status.blindness > 0 {
        0
    } else {
        SIGHT_RADIUS
    }
}

/// Index of the room whose walled bounds contain `pos`
pub fn room_containing(dungeon: &Dungeon, pos: Position) -> Option<usize> {
    dungeon.room_index_at(pos)
}

/// Permanently reveal a room's interior and walls
pub fn light_room(dungeon: &mut Dungeon, room_index: usize) {
    let Some(room) = dungeon.rooms.get(room_index).copied() else {
        return;
    };
    for pos in room.bounds() {
        if let Some(cell) = dungeon.map.get_mut(pos) {
            cell.always_visible = true;
            cell.reveal();
        }
    }
}

/// Light the room at `pos` if it is an illuminated room.
///
/// Returns true when a room was lit.
pub fn light_room_at(dungeon: &mut Dungeon, pos: Position) -> bool {
    match room_containing(dungeon, pos) {
        Some(index) if dungeon.rooms[index].illuminated => {
            light_room(dungeon, index);
            true
        }
        _ => false,
    }
}

/// Recompute the player's view, honouring blindness
pub fn update_player_view(dungeon: &mut Dungeon, player: &Player) {
    let radius = effective_sight_radius(player);
    compute_fov(&mut dungeon.map, player.pos, radius);
}
