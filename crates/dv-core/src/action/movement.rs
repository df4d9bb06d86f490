//! Movement and melee
//!
//! A step onto a living monster becomes a bump attack; a step onto open
//! floor moves the player, lights the room they entered and picks up
//! whatever lies there.

use super::{ActionResult, pickup, unit_direction};
use crate::combat::{player_hit_message, player_miss_message, resolve_combat};
use crate::gameloop::GameState;
use crate::rng::RandomSource;
use crate::vision;

/// Move the player by a delta, or wait on `(0, 0)`
pub fn do_move(state: &mut GameState, dx: i32, dy: i32, rng: &mut dyn RandomSource) -> ActionResult {
    let confused = state.player.status.is_confused();
    let (dx, dy) = if confused {
        random_direction(rng)
    } else {
        unit_direction(dx, dy)
    };

    if (dx, dy) == (0, 0) {
        return ActionResult::Success;
    }

    let target = state.player.pos.offset(dx, dy);

    if let Some(index) = state.monster_at(target) {
        attack_monster(state, index, rng);
        return ActionResult::Success;
    }

    if !state.dungeon.is_walkable(target) {
        if confused {
            state.message("You stumble around in confusion.");
            return ActionResult::Success;
        }
        return ActionResult::failed("You can't move there.");
    }

    state.player.pos = target;
    vision::light_room_at(&mut state.dungeon, target);
    pickup::pick_up(state);
    ActionResult::Success
}

/// One of the 9 relative directions, stay included, from a single draw
fn random_direction(rng: &mut dyn RandomSource) -> (i32, i32) {
    let d = rng.below(9) as i32;
    (d % 3 - 1, d / 3 - 1)
}

/// Melee the monster at `index`
pub fn attack_monster(state: &mut GameState, index: usize, rng: &mut dyn RandomSource) {
    let monster = &mut state.monsters[index];
    monster.provoked = true;

    let outcome = resolve_combat(&state.player, &mut *monster, rng);
    if !outcome.hit {
        let msg = player_miss_message(&monster.name);
        state.message(msg);
        return;
    }

    let msg = player_hit_message(&monster.name, outcome.tier);
    if state.player.confuse_touch && !monster.is_dead() {
        monster.status.confusion += rng.range(2, 4);
        state.player.confuse_touch = false;
        let name = monster.name.clone();
        state.message(msg);
        state.message(format!("Your hands stop glowing. The {name} appears confused."));
    } else {
        state.message(msg);
    }

    if state.monsters[index].is_dead() {
        state.kill_monster(index, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Position;
    use crate::object::GoldPile;
    use crate::rng::ScriptedRng;
    use crate::testing::{arena, spawn};

    #[test]
    fn test_step_moves_player() {
        let mut state = arena();
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(do_move(&mut state, 1, 0, &mut rng), ActionResult::Success);
        assert_eq!(state.player.pos, Position::new(6, 5));
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut state = arena();
        let mut rng = ScriptedRng::constant(0.5);
        do_move(&mut state, 7, -3, &mut rng);
        assert_eq!(state.player.pos, Position::new(6, 4));
    }

    #[test]
    fn test_wall_blocks() {
        let mut state = arena();
        state.player.pos = Position::new(1, 1);
        let mut rng = ScriptedRng::constant(0.5);
        let result = do_move(&mut state, -1, 0, &mut rng);
        assert!(matches!(result, ActionResult::Failed(_)));
        assert_eq!(state.player.pos, Position::new(1, 1));
    }

    #[test]
    fn test_confused_into_wall_uses_turn() {
        let mut state = arena();
        state.player.pos = Position::new(1, 1);
        state.player.status.confusion = 3;
        // below(9) = 0 -> (-1, -1)
        let mut rng = ScriptedRng::new([0.0]);
        assert_eq!(do_move(&mut state, 1, 0, &mut rng), ActionResult::Success);
        assert_eq!(state.player.pos, Position::new(1, 1));
    }

    #[test]
    fn test_bump_attacks_instead_of_moving() {
        let mut state = arena();
        let i = spawn(&mut state, "bat", Position::new(6, 5));
        let mut rng = ScriptedRng::new([0.0]);
        do_move(&mut state, 1, 0, &mut rng);
        assert_eq!(state.player.pos, Position::new(5, 5));
        assert!(state.monsters[i].provoked);
        assert_eq!(state.messages, vec!["You miss the bat."]);
    }

    #[test]
    fn test_kill_awards_xp() {
        let mut state = arena();
        let i = spawn(&mut state, "bat", Position::new(6, 5));
        state.monsters[i].hp = 1;
        // hit, damage, no gold drop
        let mut rng = ScriptedRng::new([0.9, 0.5, 0.9]);
        do_move(&mut state, 1, 0, &mut rng);
        assert!(state.monsters[i].is_dead());
        assert_eq!(state.player.xp, 1);
        assert!(state.messages.iter().any(|m| m == "You defeat the bat."));
        assert!(state.gold.is_empty());
    }

    #[test]
    fn test_confuse_touch_is_spent() {
        let mut state = arena();
        let i = spawn(&mut state, "troll", Position::new(6, 5));
        state.player.confuse_touch = true;
        let mut rng = ScriptedRng::new([0.9, 0.0, 0.0]);
        do_move(&mut state, 1, 0, &mut rng);
        assert!(!state.player.confuse_touch);
        assert_eq!(state.monsters[i].status.confusion, 2);
    }

    #[test]
    fn test_walking_onto_gold_picks_it_up() {
        let mut state = arena();
        state.gold.push(GoldPile {
            pos: Position::new(6, 5),
            amount: 17,
        });
        let mut rng = ScriptedRng::constant(0.5);
        do_move(&mut state, 1, 0, &mut rng);
        assert_eq!(state.player.gold, 17);
        assert!(state.gold.is_empty());
        assert_eq!(state.messages, vec!["You found 17 gold pieces."]);
    }
}
