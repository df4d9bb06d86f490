//! Monster AI
//!
//! One pass moves every living monster once (twice when fast). Dead
//! monsters keep their tile until the pass ends, then they are filtered.

use super::{AGGRESSION_ALWAYS, AGGRESSION_MEDIUM, AGGRESSION_ROAMING, Speed, special};
use crate::consts::{MONSTER_SIGHT, ROAM_RADIUS};
use crate::dungeon::Position;
use crate::gameloop::GameState;
use crate::player::RingPowers;
use crate::rng::{RandomSource, shuffle};

/// Chance a confused monster stumbles instead of acting
const CONFUSED_WANDER_CHANCE: f64 = 0.5;

/// Run the AI for every monster on the level
pub fn step_monsters(state: &mut GameState, rng: &mut dyn RandomSource) {
    // A hasted player gets every other monster turn for free
    if state.player.status.is_hasted() && state.turn % 2 == 1 {
        state.filter_dead_monsters();
        for monster in &mut state.monsters {
            monster.status.paralysis = (monster.status.paralysis - 1).max(0);
        }
        return;
    }

    if state.player.has_power(RingPowers::AGGRAVATE) {
        for monster in state.monsters.iter_mut().filter(|m| !m.is_dead()) {
            monster.provoked = true;
        }
    }

    for index in 0..state.monsters.len() {
        let monster = &mut state.monsters[index];
        if monster.is_dead() {
            continue;
        }
        // Paralysis wears off once per pass whatever the speed
        if monster.status.paralysis > 0 {
            monster.status.paralysis -= 1;
            continue;
        }

        let actions = match state.monsters[index].speed {
            Speed::Fast => 2,
            Speed::Normal => 1,
            Speed::Slow if state.turn % 2 == 0 => 1,
            Speed::Slow => 0,
        };
        for _ in 0..actions {
            if state.player.is_dead() || state.monsters[index].is_dead() {
                break;
            }
            monster_turn(state, index, rng);
        }
        if state.player.is_dead() {
            break;
        }
    }

    state.filter_dead_monsters();
}

/// One action for the monster at `index`
fn monster_turn(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let player_pos = state.player.pos;

    let monster = &mut state.monsters[index];
    if monster.status.scared > 0 {
        monster.status.scared -= 1;
        flee(state, index, player_pos);
        return;
    }
    if monster.status.confusion > 0 {
        monster.status.confusion -= 1;
        if rng.chance(CONFUSED_WANDER_CHANCE) {
            wander(state, index, rng);
            return;
        }
    }

    let monster = &state.monsters[index];
    let dist = monster.pos.chebyshev(player_pos);
    let provoked = monster.provoked;

    if monster.is_passive() && !provoked {
        return;
    }
    if monster.aggression == AGGRESSION_MEDIUM
        && !provoked
        && state.player.has_power(RingPowers::STEALTH)
    {
        return;
    }
    if monster.aggression != AGGRESSION_ALWAYS && dist > MONSTER_SIGHT {
        return;
    }
    if monster.aggression == AGGRESSION_ROAMING && !provoked && dist > ROAM_RADIUS {
        wander(state, index, rng);
        return;
    }

    pursue(state, index, rng);
}

/// Candidate steps toward `target`: horizontal first, then vertical
pub fn pursuit_steps(from: Position, target: Position) -> Vec<Position> {
    let dx = (target.x - from.x).signum();
    let dy = (target.y - from.y).signum();
    let mut steps = Vec::with_capacity(2);
    if dx != 0 {
        steps.push(from.offset(dx, 0));
    }
    if dy != 0 {
        steps.push(from.offset(0, dy));
    }
    steps
}

fn pursue(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let from = state.monsters[index].pos;
    let target = state.player.pos;

    for step in pursuit_steps(from, target) {
        if step == target {
            special::monster_attack(state, index, rng);
            return;
        }
        if state.dungeon.is_walkable(step) && state.monster_at_any(step).is_none() {
            state.monsters[index].pos = step;
            return;
        }
    }
}

/// Step to the neighbour furthest from the player, if it gains distance
fn flee(state: &mut GameState, index: usize, player_pos: Position) {
    let from = state.monsters[index].pos;
    let mut best = from;
    let mut best_dist = from.chebyshev(player_pos);

    for step in from.neighbours8() {
        let dist = step.chebyshev(player_pos);
        if dist > best_dist && is_open(state, step) {
            best = step;
            best_dist = dist;
        }
    }
    state.monsters[index].pos = best;
}

/// Move to a random free neighbour; stay put if there is none
fn wander(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let mut around = state.monsters[index].pos.neighbours8();
    shuffle(rng, &mut around);
    if let Some(step) = around.into_iter().find(|&p| is_open(state, p)) {
        state.monsters[index].pos = step;
    }
}

/// Free for a monster mid-pass: bodies killed this pass still block
fn is_open(state: &GameState, pos: Position) -> bool {
    state.dungeon.is_walkable(pos)
        && pos != state.player.pos
        && state.monster_at_any(pos).is_none()
}
