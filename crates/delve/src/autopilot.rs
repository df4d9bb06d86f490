//! A simple bot: fight what is adjacent, keep fed and healthy, head for
//! the down stairs.

use std::collections::VecDeque;

use hashbrown::HashMap;

use dv_core::dungeon::{Position, Tile};
use dv_core::object::{ItemKind, PotionEffect};
use dv_core::{GameState, HUNGER_HUNGRY, Intent};

/// Pick the next intent for the current state
pub fn choose(state: &GameState) -> Intent {
    let player = &state.player;

    if player.hp * 3 < player.max_hp {
        if let Some(index) = healing_potion(state) {
            return Intent::Quaff(index);
        }
    }
    if player.food <= HUNGER_HUNGRY {
        if let Some(index) = player
            .inventory
            .iter()
            .position(|i| i.kind == ItemKind::Food)
        {
            return Intent::Eat(index);
        }
    }

    if let Some(target) = state
        .monsters
        .iter()
        .find(|m| !m.is_dead() && m.pos.is_adjacent(player.pos))
    {
        return step_towards(player.pos, target.pos);
    }

    if state.dungeon.tile(player.pos) == Some(Tile::StairsDown) {
        return Intent::Descend;
    }

    match first_step(state, player.pos, state.dungeon.stairs_down) {
        Some(next) => step_towards(player.pos, next),
        None => Intent::wait(),
    }
}

fn healing_potion(state: &GameState) -> Option<usize> {
    state.player.inventory.iter().position(|i| {
        matches!(
            i.kind,
            ItemKind::Potion(PotionEffect::Healing | PotionEffect::ExtraHealing)
        )
    })
}

fn step_towards(from: Position, to: Position) -> Intent {
    Intent::Move {
        dx: (to.x - from.x).signum(),
        dy: (to.y - from.y).signum(),
    }
}

/// First tile on a shortest walkable path from `start` to `goal`
fn first_step(state: &GameState, start: Position, goal: Position) -> Option<Position> {
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    came_from.insert(start, start);

    while let Some(pos) = queue.pop_front() {
        if pos == goal {
            let mut step = pos;
            while came_from.get(&step) != Some(&start) {
                step = *came_from.get(&step)?;
            }
            return (step != start).then_some(step);
        }
        for next in pos.neighbours8() {
            if state.dungeon.is_walkable(next) && !came_from.contains_key(&next) {
                came_from.insert(next, pos);
                queue.push_back(next);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::dungeon::{Dungeon, Grid, Room};
    use dv_core::monster::{Monster, template_by_name};
    use dv_core::object::{Item, ItemId};
    use dv_core::player::Player;

    fn room_state() -> GameState {
        let mut map = Grid::new(12, 8);
        let room = Room::new(1, 1, 10, 6);
        room.carve(&mut map);
        map.set_tile(Position::new(9, 5), Tile::StairsDown);
        let dungeon = Dungeon {
            width: 12,
            height: 8,
            seed: 0,
            depth: 1,
            map,
            sectors: Vec::new(),
            rooms: vec![room],
            corridors: Vec::new(),
            stairs_up: Position::new(2, 2),
            stairs_down: Position::new(9, 5),
        };
        GameState::with_dungeon(dungeon, Player::new("Bot", Position::new(2, 2)))
    }

    #[test]
    fn test_heads_for_stairs() {
        let state = room_state();
        assert!(matches!(choose(&state), Intent::Move { dx: 1, .. }));
    }

    #[test]
    fn test_descends_on_stairs() {
        let mut state = room_state();
        state.player.pos = Position::new(9, 5);
        assert_eq!(choose(&state), Intent::Descend);
    }

    #[test]
    fn test_attacks_adjacent_monster() {
        let mut state = room_state();
        let orc = template_by_name("orc").unwrap();
        state.monsters.push(Monster::new(orc, Position::new(2, 3)));
        assert_eq!(choose(&state), Intent::Move { dx: 0, dy: 1 });
    }

    #[test]
    fn test_drinks_when_wounded() {
        let mut state = room_state();
        state.player.inventory.push(Item::new(
            ItemId(9),
            ItemKind::Potion(PotionEffect::Healing),
        ));
        state.player.hp = 2;
        assert_eq!(choose(&state), Intent::Quaff(3));
    }

    #[test]
    fn test_eats_when_hungry() {
        let mut state = room_state();
        state.player.food = HUNGER_HUNGRY;
        assert_eq!(choose(&state), Intent::Eat(2));
    }

    #[test]
    fn test_unreachable_goal_waits() {
        let mut state = room_state();
        state.dungeon.stairs_down = Position::new(30, 30);
        assert_eq!(choose(&state), Intent::wait());
    }
}
