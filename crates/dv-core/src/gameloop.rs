//! Game state and the turn pipeline
//!
//! One intent in, one atomic turn out. [`advance`] is the whole state
//! machine; [`GameLoop`] pairs a state with the RNG that drives it.

use serde::{Deserialize, Serialize};

use crate::action::{self, ActionResult, Intent};
use crate::consts::{
    DEFAULT_PLAYER_NAME, GOLD_DROP_CHANCE, GOLD_ROOM_CHANCE, ITEM_ROOM_CHANCE, MAP_HEIGHT,
    MAP_WIDTH, MONSTER_ROOM_CHANCE,
};
use crate::dungeon::{Dungeon, Position, Room, Tile, generate_seeded};
use crate::monster::{Monster, ai, makemon};
use crate::object::{FloorItem, GoldPile, ItemId, random_item};
use crate::player::{Player, STARTING_KIT_SIZE, regen_rate, tick_hunger};
use crate::rng::{GameRng, RandomSource};
use crate::vision;

/// Errors raised while restoring a saved state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Map has {found} cells, expected {expected}")]
    InvalidGrid { expected: usize, found: usize },
}

/// Parameters for a new game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub dungeon_level: i32,
    pub player_name: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dungeon_level: 1,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            width: None,
            height: None,
        }
    }
}

/// What a call to [`advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The turn was played
    Advanced,
    /// Nothing changed except the message log
    Rejected,
    /// The player died or escaped during this turn
    GameOver,
}

/// Main game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub dungeon: Dungeon,
    pub player: Player,
    pub monsters: Vec<Monster>,
    /// Gold piles, at most one per tile
    pub gold: Vec<GoldPile>,
    /// Floor items, at most one per tile
    pub items: Vec<FloorItem>,
    pub turn: u64,
    pub dungeon_level: i32,
    pub max_depth: i32,
    /// Messages for the current turn
    pub messages: Vec<String>,
    pub dead: bool,
    pub escaped: bool,
    pub cause_of_death: Option<String>,
    pub next_item_id: ItemId,
}

impl GameState {
    /// Create a new game. The level seed comes from the config, or from
    /// `rng` when the config has none.
    pub fn new(config: &GameConfig, rng: &mut dyn RandomSource) -> Self {
        let depth = config.dungeon_level.max(1);
        let width = config.width.unwrap_or(MAP_WIDTH);
        let height = config.height.unwrap_or(MAP_HEIGHT);
        let seed = config.seed.unwrap_or_else(|| rng.next_seed());

        let dungeon = generate_seeded(width, height, seed, depth);
        let player = Player::new(&config.player_name, dungeon.stairs_up);

        let mut state = Self::with_dungeon(dungeon, player);
        state.populate_level(rng);
        state.message(format!(
            "Hello {}, welcome to the dungeon.",
            state.player.name
        ));
        tracing::info!(seed, depth, "new game");
        state
    }

    /// Wrap an existing level with no monsters, gold or items on it.
    /// The player keeps their position.
    pub fn with_dungeon(dungeon: Dungeon, player: Player) -> Self {
        let depth = dungeon.depth;
        let mut state = Self {
            dungeon,
            player,
            monsters: Vec::new(),
            gold: Vec::new(),
            items: Vec::new(),
            turn: 0,
            dungeon_level: depth,
            max_depth: depth,
            messages: Vec::new(),
            dead: false,
            escaped: false,
            cause_of_death: None,
            next_item_id: ItemId(STARTING_KIT_SIZE + 1),
        };
        state.refresh_view();
        state
    }

    /// Add a message for this turn
    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    /// Allocate a fresh item id
    pub fn alloc_item_id(&mut self) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id = id.next();
        id
    }

    /// Index of the living monster standing on `pos`
    pub fn monster_at(&self, pos: Position) -> Option<usize> {
        self.monsters
            .iter()
            .position(|m| m.pos == pos && !m.is_dead())
    }

    /// Index of any monster on `pos`, including ones killed this pass
    pub fn monster_at_any(&self, pos: Position) -> Option<usize> {
        self.monsters.iter().position(|m| m.pos == pos)
    }

    pub fn gold_at(&self, pos: Position) -> Option<usize> {
        self.gold.iter().position(|g| g.pos == pos)
    }

    pub fn item_at(&self, pos: Position) -> Option<usize> {
        self.items.iter().position(|i| i.pos == pos)
    }

    /// Walkable, no living monster and not the player
    pub fn is_free(&self, pos: Position) -> bool {
        self.dungeon.is_walkable(pos) && pos != self.player.pos && self.monster_at(pos).is_none()
    }

    /// Drop monsters whose hp reached zero
    pub fn filter_dead_monsters(&mut self) {
        self.monsters.retain(|m| !m.is_dead());
    }

    /// Record the killer unless one is already recorded
    pub fn set_cause_of_death(&mut self, cause: impl Into<String>) {
        if self.cause_of_death.is_none() {
            self.cause_of_death = Some(cause.into());
        }
    }

    /// Mark the player dead if hp ran out. Only triggers once.
    pub fn check_death(&mut self) -> bool {
        if !self.dead && self.player.is_dead() {
            self.dead = true;
            self.set_cause_of_death("killed");
            let cause = self.cause_of_death.clone().unwrap_or_default();
            tracing::info!(turn = self.turn, depth = self.dungeon_level, %cause, "player died");
            self.message("You die...");
        }
        self.dead
    }

    /// Recompute FOV and room lighting around the player
    pub fn refresh_view(&mut self) {
        vision::light_room_at(&mut self.dungeon, self.player.pos);
        vision::update_player_view(&mut self.dungeon, &self.player);
    }

    /// Award a kill on the monster at `index` (already at hp <= 0)
    pub fn kill_monster(&mut self, index: usize, rng: &mut dyn RandomSource) {
        let Some(monster) = self.monsters.get(index) else {
            return;
        };
        let (name, xp, pos, drops_gold) =
            (monster.name.clone(), monster.xp, monster.pos, monster.drops_gold);

        self.message(format!("You defeat the {name}."));

        let mut messages = Vec::new();
        self.player.gain_xp(xp, &mut messages);
        self.messages.extend(messages);

        if (drops_gold || rng.chance(GOLD_DROP_CHANCE)) && self.gold_at(pos).is_none() {
            let amount = gold_amount(self.dungeon_level, rng);
            self.gold.push(GoldPile { pos, amount });
        }
    }

    /// Spawn monsters, gold and items for the current dungeon
    pub fn populate_level(&mut self, rng: &mut dyn RandomSource) {
        self.monsters.clear();
        self.gold.clear();
        self.items.clear();

        let start_room = self.dungeon.room_index_at(self.player.pos);
        let rooms = self.dungeon.rooms.clone();

        for (index, room) in rooms.iter().enumerate() {
            if Some(index) != start_room && rng.chance(MONSTER_ROOM_CHANCE) {
                if let Some(pos) = self.random_floor(room, rng, |s, p| s.is_free(p)) {
                    let template = makemon::pick_template(self.dungeon_level, rng);
                    self.monsters.push(Monster::new(template, pos));
                }
            }

            if rng.chance(GOLD_ROOM_CHANCE) {
                if let Some(pos) = self.random_floor(room, rng, |s, p| s.gold_at(p).is_none()) {
                    let amount = gold_amount(self.dungeon_level, rng);
                    self.gold.push(GoldPile { pos, amount });
                }
            }

            if rng.chance(ITEM_ROOM_CHANCE) {
                let free = |s: &GameState, p| s.item_at(p).is_none() && s.gold_at(p).is_none();
                if let Some(pos) = self.random_floor(room, rng, free) {
                    let item = random_item(self.alloc_item_id(), rng);
                    self.items.push(FloorItem { pos, item });
                }
            }
        }
    }

    /// A random plain floor tile inside `room` that passes `accept`
    fn random_floor(
        &self,
        room: &Room,
        rng: &mut dyn RandomSource,
        accept: impl Fn(&GameState, Position) -> bool,
    ) -> Option<Position> {
        const TRIES: usize = 10;
        for _ in 0..TRIES {
            let pos = Position::new(
                rng.range(room.x, room.x + room.width - 1),
                rng.range(room.y, room.y + room.height - 1),
            );
            if self.dungeon.tile(pos) == Some(Tile::Floor)
                && pos != self.player.pos
                && accept(self, pos)
            {
                return Some(pos);
            }
        }
        None
    }

    /// Serialize the whole state to JSON
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a state from JSON, checking the map dimensions
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let state: GameState = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }

    /// Check that the decoded map matches the dungeon's dimensions
    pub fn validate(&self) -> Result<(), StateError> {
        let expected = (self.dungeon.width.max(0) * self.dungeon.height.max(0)) as usize;
        let found = self.dungeon.map.len();
        if expected != found
            || self.dungeon.map.width() != self.dungeon.width
            || self.dungeon.map.height() != self.dungeon.height
        {
            return Err(StateError::InvalidGrid { expected, found });
        }
        Ok(())
    }
}

/// Size of a gold pile on a given depth
fn gold_amount(depth: i32, rng: &mut dyn RandomSource) -> u32 {
    rng.range(2, 50 + 10 * depth.max(1)) as u32
}

/// Play one intent through the full turn pipeline
pub fn advance(state: &mut GameState, intent: Intent, rng: &mut dyn RandomSource) -> TurnOutcome {
    state.messages.clear();

    if state.dead {
        state.message("The game is over.");
        return TurnOutcome::Rejected;
    }

    if state.player.status.is_paralyzed() {
        state.message("You can't move!");
    } else if let ActionResult::Failed(msg) = action::perform(state, intent, rng) {
        tracing::trace!(?intent, %msg, "intent rejected");
        state.message(msg);
        return TurnOutcome::Rejected;
    }

    finish_turn(state, rng)
}

/// Everything after the primary effect of a turn
fn finish_turn(state: &mut GameState, rng: &mut dyn RandomSource) -> TurnOutcome {
    state.filter_dead_monsters();
    state.turn += 1;
    if state.check_death() {
        return TurnOutcome::GameOver;
    }

    state.player.status.tick(&mut state.messages);
    vision::update_player_view(&mut state.dungeon, &state.player);

    ai::step_monsters(state, rng);
    if state.check_death() {
        return TurnOutcome::GameOver;
    }

    regenerate(state);

    let turn = state.turn;
    if tick_hunger(&mut state.player, turn, &mut state.messages) && state.player.is_dead() {
        state.set_cause_of_death("starvation");
    }
    if state.check_death() {
        return TurnOutcome::GameOver;
    }

    TurnOutcome::Advanced
}

fn regenerate(state: &mut GameState) {
    let player = &mut state.player;
    if player.hp >= player.max_hp {
        return;
    }
    let mut amount = player.regeneration;
    if state.turn % regen_rate(player.xp_level) == 0 {
        amount += 1;
    }
    player.heal(amount);
}

/// Game loop controller: a state plus the RNG that drives it
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: GameState,
    rng: GameRng,
}

impl GameLoop {
    /// Create a new game loop with the given state
    pub fn new(state: GameState, rng: GameRng) -> Self {
        Self { state, rng }
    }

    /// Start a new game, seeding the RNG from the config or from entropy
    pub fn from_config(config: &GameConfig) -> Self {
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let state = GameState::new(config, &mut rng);
        Self { state, rng }
    }

    /// Get reference to game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get mutable reference to game state
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Consume the game loop and return the owned game state
    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Play one intent
    pub fn step(&mut self, intent: Intent) -> TurnOutcome {
        advance(&mut self.state, intent, &mut self.rng)
    }

    /// True once the player died or escaped
    pub fn is_over(&self) -> bool {
        self.state.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn new_state(seed: u64) -> GameState {
        let config = GameConfig {
            seed: Some(seed),
            ..Default::default()
        };
        let mut rng = GameRng::new(seed);
        GameState::new(&config, &mut rng)
    }

    #[test]
    fn test_new_game_on_stairs_up() {
        let state = new_state(42);
        assert_eq!(state.player.pos, state.dungeon.stairs_up);
        assert_eq!(state.turn, 0);
        let cell = state.dungeon.map.get(state.player.pos).unwrap();
        assert!(cell.visible && cell.visited);
        assert_eq!(state.next_item_id, ItemId(STARTING_KIT_SIZE + 1));
    }

    #[test]
    fn test_no_monster_in_start_room() {
        for seed in 0..20 {
            let state = new_state(seed);
            let start = state.dungeon.room_index_at(state.player.pos);
            assert!(
                state
                    .monsters
                    .iter()
                    .all(|m| state.dungeon.room_index_at(m.pos) != start)
            );
        }
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut state = new_state(3);
        state.monsters.clear();
        // Walk left until something blocks the way
        let mut rng = ScriptedRng::constant(0.5);
        let mut outcome = TurnOutcome::Advanced;
        for _ in 0..100 {
            outcome = advance(&mut state, Intent::Move { dx: -1, dy: 0 }, &mut rng);
            if outcome == TurnOutcome::Rejected {
                break;
            }
        }
        assert_eq!(outcome, TurnOutcome::Rejected);
        let turn = state.turn;
        let snapshot = state.clone();
        let again = advance(&mut state, Intent::Move { dx: -1, dy: 0 }, &mut rng);
        assert_eq!(again, TurnOutcome::Rejected);
        assert_eq!(state.turn, turn);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.player, snapshot.player);
        assert_eq!(state.monsters, snapshot.monsters);
    }

    #[test]
    fn test_paralyzed_player_waits() {
        let mut state = new_state(5);
        state.monsters.clear();
        state.player.status.paralysis = 3;
        let start = state.player.pos;
        let mut rng = ScriptedRng::constant(0.5);
        let outcome = advance(&mut state, Intent::Move { dx: 1, dy: 0 }, &mut rng);
        assert_eq!(outcome, TurnOutcome::Advanced);
        assert_eq!(state.player.pos, start);
        assert_eq!(state.messages[0], "You can't move!");
        assert_eq!(state.player.status.paralysis, 2);
        assert_eq!(state.turn, 1);
    }

    #[test]
    fn test_terminal_state_rejects() {
        let mut state = new_state(6);
        state.dead = true;
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(
            advance(&mut state, Intent::wait(), &mut rng),
            TurnOutcome::Rejected
        );
        assert_eq!(state.messages, vec!["The game is over."]);
    }

    #[test]
    fn test_regeneration_ring_heals_each_turn() {
        let mut state = new_state(8);
        state.monsters.clear();
        state.player.hp = 5;
        state.player.regeneration = 1;
        let mut rng = ScriptedRng::constant(0.5);
        advance(&mut state, Intent::wait(), &mut rng);
        assert_eq!(state.player.hp, 6);
    }

    #[test]
    fn test_starvation_sets_cause() {
        let mut state = new_state(9);
        state.monsters.clear();
        state.player.food = 0;
        state.player.hp = 1;
        let mut rng = ScriptedRng::constant(0.5);
        let outcome = advance(&mut state, Intent::wait(), &mut rng);
        assert_eq!(outcome, TurnOutcome::GameOver);
        assert!(state.dead);
        assert_eq!(state.cause_of_death.as_deref(), Some("starvation"));
    }

    #[test]
    fn test_escape_counts_the_turn() {
        let mut state = new_state(11);
        assert_eq!(state.dungeon_level, 1);
        let mut rng = ScriptedRng::constant(0.5);
        let outcome = advance(&mut state, Intent::Ascend, &mut rng);
        assert_eq!(outcome, TurnOutcome::GameOver);
        assert!(state.escaped);
        assert_eq!(state.turn, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let state = new_state(10);
        let json = state.to_json().unwrap();
        let back = GameState::from_json(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_from_json_rejects_bad_grid() {
        let mut state = new_state(11);
        state.dungeon.width += 1;
        let json = state.to_json().unwrap();
        assert!(matches!(
            GameState::from_json(&json),
            Err(StateError::InvalidGrid { .. })
        ));
        assert!(matches!(
            GameState::from_json("{"),
            Err(StateError::Json(_))
        ));
    }

    #[test]
    fn test_game_loop_from_config() {
        let config = GameConfig {
            seed: Some(77),
            ..Default::default()
        };
        let mut game = GameLoop::from_config(&config);
        assert_eq!(game.seed(), 77);
        assert!(!game.is_over());
        game.step(Intent::wait());
        assert!(game.state().turn <= 1);
    }
}
