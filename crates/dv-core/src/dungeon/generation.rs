//! Level generation
//!
//! sector layout -> one room per sector -> 12 adjacency corridors -> stairs.
//! Every random draw goes through the injected [`RandomSource`], so a seed
//! fully determines the level.

use serde::{Deserialize, Serialize};

use super::room::{place_room, sector_layout};
use super::{Corridor, Dungeon, Grid, Tile, adjacency_pairs};
use crate::consts::{MAP_HEIGHT, MAP_WIDTH, MAX_LIT_DEPTH};
use crate::rng::{GameRng, RandomSource};

/// Inputs to [`generate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub width: i32,
    pub height: i32,
    /// Recorded on the dungeon; the caller's RNG decides the layout
    pub seed: Option<u64>,
    pub depth: i32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            seed: None,
            depth: 1,
        }
    }
}

/// Probability that a room on this depth is lit
///
/// 1.0 at depth 1, falling linearly to 0.0 at `MAX_LIT_DEPTH`.
pub fn lit_chance(depth: i32) -> f64 {
    if depth <= 1 {
        1.0
    } else if depth >= MAX_LIT_DEPTH {
        0.0
    } else {
        (MAX_LIT_DEPTH - depth) as f64 / (MAX_LIT_DEPTH - 1) as f64
    }
}

/// Generate a dungeon level from the given parameters
pub fn generate(params: &GenerationParams, rng: &mut dyn RandomSource) -> Dungeon {
    let width = params.width.max(0);
    let height = params.height.max(0);
    let mut map = Grid::new(width, height);

    let sectors = sector_layout(width, height);
    let light = lit_chance(params.depth);

    let mut rooms = Vec::with_capacity(sectors.len());
    for sector in &sectors {
        let mut room = place_room(sector, rng);
        // Always draw, so lighting never shifts later rolls
        room.illuminated = rng.chance(light);
        room.carve(&mut map);
        rooms.push(room);
    }

    let corridors: Vec<Corridor> = adjacency_pairs()
        .into_iter()
        .map(|(a, b)| Corridor {
            from_room: a,
            to_room: b,
            from: rooms[a].center(),
            to: rooms[b].center(),
        })
        .collect();
    for corridor in &corridors {
        corridor.carve(&mut map);
    }

    let up_room = rng.below(rooms.len() as u32) as usize;
    let mut down_room = rng.below(rooms.len() as u32 - 1) as usize;
    if down_room >= up_room {
        down_room += 1;
    }
    let stairs_up = rooms[up_room].center();
    let stairs_down = rooms[down_room].center();
    map.set_tile(stairs_up, Tile::StairsUp);
    map.set_tile(stairs_down, Tile::StairsDown);

    tracing::debug!(
        width,
        height,
        depth = params.depth,
        lit = rooms.iter().filter(|r| r.illuminated).count(),
        "generated level"
    );

    Dungeon {
        width,
        height,
        seed: params.seed.unwrap_or_default(),
        depth: params.depth,
        map,
        sectors,
        rooms,
        corridors,
        stairs_up,
        stairs_down,
    }
}

/// Generate with a fresh [`GameRng`] seeded from `seed`
pub fn generate_seeded(width: i32, height: i32, seed: u64, depth: i32) -> Dungeon {
    let params = GenerationParams {
        width,
        height,
        seed: Some(seed),
        depth,
    };
    let mut rng = GameRng::new(seed);
    generate(&params, &mut rng)
}
