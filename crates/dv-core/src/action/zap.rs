//! Zapping wands

use super::{ActionResult, fly, inventory_item, unit_direction};
use crate::consts::{BOLT_RANGE, DRAIN_RADIUS};
use crate::gameloop::GameState;
use crate::monster::{MONSTERS, Speed};
use crate::object::{ItemKind, WandEffect};
use crate::rng::RandomSource;
use crate::vision;

/// Zap a wand in a direction. Each zap uses one charge.
pub fn do_zap(
    state: &mut GameState,
    index: usize,
    dx: i32,
    dy: i32,
    rng: &mut dyn RandomSource,
) -> ActionResult {
    let (effect, charges) = match inventory_item(state, index) {
        Ok(item) => match item.kind {
            ItemKind::Wand { effect, charges } => (effect, charges),
            _ => return ActionResult::failed("You can't zap that!"),
        },
        Err(rejected) => return rejected,
    };
    if charges <= 0 {
        return ActionResult::failed("Nothing happens.");
    }

    let (dx, dy) = unit_direction(dx, dy);
    if is_directional(effect) && (dx, dy) == (0, 0) {
        return ActionResult::failed("In what direction?");
    }
    if effect == WandEffect::DrainLife && state.player.hp < 2 {
        return ActionResult::failed("You are too weak to use it.");
    }

    if let Some(ItemKind::Wand { charges, .. }) =
        state.player.inventory.get_mut(index).map(|i| &mut i.kind)
    {
        *charges -= 1;
    }

    match effect {
        WandEffect::DrainLife => drain_life(state, rng),
        WandEffect::Light => light(state),
        WandEffect::Nothing => state.message("You feel self-knowledgeable... for a moment."),
        _ => zap_bolt(state, effect, dx, dy, rng),
    }
    ActionResult::Success
}

/// Wands that need a direction
pub const fn is_directional(effect: WandEffect) -> bool {
    !matches!(
        effect,
        WandEffect::DrainLife | WandEffect::Light | WandEffect::Nothing
    )
}

fn zap_bolt(
    state: &mut GameState,
    effect: WandEffect,
    dx: i32,
    dy: i32,
    rng: &mut dyn RandomSource,
) {
    let Some(index) = fly(state, dx, dy, BOLT_RANGE).target else {
        state.message(format!("The bolt of {} bounces!", effect.name()));
        return;
    };

    let monster = &mut state.monsters[index];
    monster.provoked = true;
    let name = monster.name.clone();

    if let Some((lo, hi)) = effect.bolt_damage() {
        monster.hp -= rng.range(lo, hi);
        state.message(format!("The bolt of {} hits the {name}.", effect.name()));
        if state.monsters[index].is_dead() {
            state.kill_monster(index, rng);
        }
        return;
    }

    let msg = match effect {
        WandEffect::SlowMonster => {
            monster.speed = match monster.speed {
                Speed::Fast => Speed::Normal,
                _ => Speed::Slow,
            };
            format!("The {name} slows down.")
        }
        WandEffect::HasteMonster => {
            monster.speed = match monster.speed {
                Speed::Slow => Speed::Normal,
                _ => Speed::Fast,
            };
            format!("The {name} speeds up.")
        }
        WandEffect::TeleportAway => {
            let free: Vec<_> = state
                .dungeon
                .walkable_positions()
                .into_iter()
                .filter(|&p| state.is_free(p))
                .collect();
            if let Some(i) = rng.pick(free.len()) {
                state.monsters[index].pos = free[i];
            }
            format!("The {name} vanishes!")
        }
        WandEffect::Polymorph => {
            let template = &MONSTERS[rng.below(MONSTERS.len() as u32) as usize];
            monster.polymorph_into(template);
            format!("The {name} turns into {}!", monster.described())
        }
        WandEffect::Cancellation => {
            monster.cancelled = true;
            format!("The {name} shudders.")
        }
        _ => format!("The bolt of {} fizzles.", effect.name()),
    };
    state.message(msg);
}

/// Trade half the player's hp for damage split among nearby visible monsters
fn drain_life(state: &mut GameState, rng: &mut dyn RandomSource) {
    let cost = state.player.hp / 2;
    state.player.hp -= cost;

    let center = state.player.pos;
    let targets: Vec<usize> = state
        .monsters
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            !m.is_dead()
                && m.pos.chebyshev(center) <= DRAIN_RADIUS
                && state.dungeon.map.get(m.pos).is_some_and(|c| c.visible)
        })
        .map(|(i, _)| i)
        .collect();

    if targets.is_empty() {
        state.message("You feel drained, but nothing else happens.");
        return;
    }

    let share = (cost / targets.len() as i32).max(1);
    for &i in &targets {
        state.monsters[i].hp -= share;
        state.monsters[i].provoked = true;
    }
    state.message("You drain the life from the monsters around you!");
    for i in targets {
        if state.monsters[i].is_dead() {
            state.kill_monster(i, rng);
        }
    }
}

fn light(state: &mut GameState) {
    match vision::room_containing(&state.dungeon, state.player.pos) {
        Some(room) => {
            state.dungeon.rooms[room].illuminated = true;
            vision::light_room(&mut state.dungeon, room);
            state.message("The room is lit by a shimmering blue light.");
        }
        None => state.message("The corridor glows briefly."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Position;
    use crate::object::{Item, ItemId};
    use crate::rng::ScriptedRng;
    use crate::testing::{arena, spawn};

    fn with_wand(effect: WandEffect, charges: i32) -> GameState {
        let mut state = arena();
        state
            .player
            .inventory
            .push(Item::new(ItemId(10), ItemKind::Wand { effect, charges }));
        state
    }

    fn charges_left(state: &GameState) -> i32 {
        match state.player.inventory[3].kind {
            ItemKind::Wand { charges, .. } => charges,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_wand_rejected() {
        let mut state = with_wand(WandEffect::MagicMissile, 0);
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(
            do_zap(&mut state, 3, 1, 0, &mut rng),
            ActionResult::failed("Nothing happens.")
        );
    }

    #[test]
    fn test_bolt_hits_first_monster() {
        let mut state = with_wand(WandEffect::Striking, 3);
        let near = spawn(&mut state, "troll", Position::new(8, 5));
        let far = spawn(&mut state, "troll", Position::new(9, 5));
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(do_zap(&mut state, 3, 1, 0, &mut rng), ActionResult::Success);
        assert_eq!(state.monsters[near].hp, state.monsters[near].max_hp - 2);
        assert_eq!(state.monsters[far].hp, state.monsters[far].max_hp);
        assert!(state.monsters[near].provoked);
        assert_eq!(charges_left(&state), 2);
    }

    #[test]
    fn test_bolt_without_target_bounces() {
        let mut state = with_wand(WandEffect::Fire, 1);
        let mut rng = ScriptedRng::constant(0.0);
        do_zap(&mut state, 3, 0, 1, &mut rng);
        assert_eq!(state.messages, vec!["The bolt of fire bounces!"]);
        assert_eq!(charges_left(&state), 0);
    }

    #[test]
    fn test_direction_required() {
        let mut state = with_wand(WandEffect::SlowMonster, 1);
        let mut rng = ScriptedRng::constant(0.0);
        assert!(matches!(
            do_zap(&mut state, 3, 0, 0, &mut rng),
            ActionResult::Failed(_)
        ));
        assert_eq!(charges_left(&state), 1);
    }

    #[test]
    fn test_slow_and_cancel() {
        let mut state = with_wand(WandEffect::SlowMonster, 2);
        let i = spawn(&mut state, "medusa", Position::new(7, 5));
        let mut rng = ScriptedRng::constant(0.0);
        do_zap(&mut state, 3, 1, 0, &mut rng);
        assert_eq!(state.monsters[i].speed, Speed::Slow);

        state.player.inventory[3].kind = ItemKind::Wand {
            effect: WandEffect::Cancellation,
            charges: 1,
        };
        do_zap(&mut state, 3, 1, 0, &mut rng);
        assert!(state.monsters[i].cancelled);
    }

    #[test]
    fn test_drain_life_splits_damage() {
        let mut state = with_wand(WandEffect::DrainLife, 1);
        let a = spawn(&mut state, "troll", Position::new(7, 5));
        let b = spawn(&mut state, "troll", Position::new(5, 7));
        state.refresh_view();
        let mut rng = ScriptedRng::constant(0.0);
        do_zap(&mut state, 3, 0, 0, &mut rng);
        assert_eq!(state.player.hp, 6);
        assert_eq!(state.monsters[a].hp, state.monsters[a].max_hp - 3);
        assert_eq!(state.monsters[b].hp, state.monsters[b].max_hp - 3);
    }

    #[test]
    fn test_drain_life_needs_health() {
        let mut state = with_wand(WandEffect::DrainLife, 1);
        state.player.hp = 1;
        let mut rng = ScriptedRng::constant(0.0);
        assert!(matches!(
            do_zap(&mut state, 3, 0, 0, &mut rng),
            ActionResult::Failed(_)
        ));
    }

    #[test]
    fn test_polymorph_changes_type() {
        let mut state = with_wand(WandEffect::Polymorph, 1);
        let i = spawn(&mut state, "bat", Position::new(7, 5));
        let mut rng = ScriptedRng::constant(0.0);
        do_zap(&mut state, 3, 1, 0, &mut rng);
        assert_eq!(state.monsters[i].name, "aquator");
        assert_eq!(state.monsters[i].pos, Position::new(7, 5));
    }
}
