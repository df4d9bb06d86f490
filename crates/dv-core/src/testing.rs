//! Shared fixtures for unit tests

use crate::dungeon::{Dungeon, Grid, Position, Room};
use crate::gameloop::GameState;
use crate::monster::{Monster, template_by_name};
use crate::player::Player;

/// A 22x12 map holding one lit 20x10 room, player at (5, 5), nothing else
pub(crate) fn arena() -> GameState {
    let mut map = Grid::new(22, 12);
    let mut room = Room::new(1, 1, 20, 10);
    room.illuminated = true;
    room.carve(&mut map);
    let dungeon = Dungeon {
        width: 22,
        height: 12,
        seed: 0,
        depth: 1,
        map,
        sectors: Vec::new(),
        rooms: vec![room],
        corridors: Vec::new(),
        stairs_up: Position::new(1, 1),
        stairs_down: Position::new(20, 10),
    };
    GameState::with_dungeon(dungeon, Player::new("Tester", Position::new(5, 5)))
}

/// Put a monster on the map and return its index
pub(crate) fn spawn(state: &mut GameState, name: &str, pos: Position) -> usize {
    let template = template_by_name(name).expect("unknown monster");
    state.monsters.push(Monster::new(template, pos));
    state.monsters.len() - 1
}
