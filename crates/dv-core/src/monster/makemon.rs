//! Monster creation

use super::{MONSTERS, Monster, MonsterTemplate};
use crate::dungeon::Position;
use crate::gameloop::GameState;
use crate::rng::{RandomSource, shuffle};

/// How many levels below its home depth a monster keeps appearing
const DEPTH_WINDOW: i32 = 6;

/// Pick a template suitable for a depth
///
/// Prefers monsters whose home level lies within the last few levels, so
/// weak monsters thin out as the player goes deeper.
pub fn pick_template(depth: i32, rng: &mut dyn RandomSource) -> &'static MonsterTemplate {
    debug_assert!(!MONSTERS.is_empty(), "monster table is empty");

    let mut candidates: Vec<&'static MonsterTemplate> = MONSTERS
        .iter()
        .filter(|t| t.level <= depth && t.level > depth - DEPTH_WINDOW)
        .collect();
    if candidates.is_empty() {
        candidates = MONSTERS.iter().filter(|t| t.level <= depth.max(1)).collect();
    }
    if candidates.is_empty() {
        return &MONSTERS[0];
    }
    candidates[rng.pick(candidates.len()).unwrap_or(0)]
}

/// Spawn a monster on a free tile next to the player.
///
/// Returns the new monster's position, or `None` if every neighbour is
/// blocked.
pub fn spawn_adjacent(state: &mut GameState, rng: &mut dyn RandomSource) -> Option<Position> {
    let mut around = state.player.pos.neighbours8();
    shuffle(rng, &mut around);
    let pos = around.into_iter().find(|&p| state.is_free(p))?;
    let template = pick_template(state.dungeon_level, rng);
    state.monsters.push(Monster::new(template, pos));
    Some(pos)
}
