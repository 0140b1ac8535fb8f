use std::collections::VecDeque;

use crate::actions::Action;
use crate::components::{Ai, EntityId, Position};
use crate::pathfinding::{CostGrid, path_to};
use crate::world::World;

/// Cost grid for `seeker`: walkable cells cost 1, and every cell another
/// blocking entity stands on costs `crowd_penalty` more.
pub fn cost_grid_for(world: &World, seeker: EntityId) -> CostGrid {
    let tiles = &world.map.tiles;
    let mut grid = CostGrid::from_walkable(tiles.width(), tiles.height(), &tiles.walkable_mask());
    for (id, entity) in world.map.entities() {
        if id != seeker && entity.blocks_movement {
            grid.add_penalty(entity.pos, world.tuning.crowd_penalty);
        }
    }
    grid
}

/// Route from `seeker` to `goal`, excluding the seeker's own cell.
pub fn get_path_to(world: &World, seeker: EntityId, goal: Position) -> VecDeque<Position> {
    let Some(start) = world.map.get(seeker).map(|e| e.pos) else {
        return VecDeque::new();
    };
    let grid = cost_grid_for(world, seeker);
    path_to(&grid, start, goal).into()
}

/// Decide what a hostile actor does this turn.
///
/// While the actor stands in the player's view it re-plans toward the player
/// each turn (or attacks when adjacent). Out of view it keeps walking the
/// last route it planned, then waits.
pub fn decide(world: &mut World, id: EntityId) -> Action {
    let wait = Action::Wait { entity: id };
    let Some(pos) = world.map.get(id).map(|e| e.pos) else {
        return wait;
    };
    let Some(target) = world.player_entity().map(|p| p.pos) else {
        return wait;
    };

    let dx = target.x - pos.x;
    let dy = target.y - pos.y;
    let distance = pos.chebyshev(target);

    if world.map.tiles.is_visible(pos.x, pos.y) {
        if distance <= 1 {
            log::debug!("{:?} attacks toward ({dx},{dy})", id);
            return Action::Melee { entity: id, dx, dy };
        }
        let path = get_path_to(world, id, target);
        if let Some(Ai::Hostile(state)) = world
            .map
            .get_mut(id)
            .and_then(|e| e.actor.as_mut())
            .and_then(|a| a.ai.as_mut())
        {
            state.path = path;
        }
    }

    let next = world
        .map
        .get_mut(id)
        .and_then(|e| e.actor.as_mut())
        .and_then(|a| a.ai.as_mut())
        .and_then(|ai| match ai {
            Ai::Hostile(state) => state.path.pop_front(),
        });

    match next {
        Some(step) if pos.chebyshev(step) == 1 => Action::Movement {
            entity: id,
            dx: step.x - pos.x,
            dy: step.y - pos.y,
        },
        Some(step) => {
            // A blocked step was dropped earlier; the rest of the route no
            // longer starts next to us.
            log::debug!("{:?} lost its route at {:?}, dropping it", id, step);
            clear_path(world, id);
            wait
        }
        None => wait,
    }
}

fn clear_path(world: &mut World, id: EntityId) {
    if let Some(Ai::Hostile(state)) = world
        .map
        .get_mut(id)
        .and_then(|e| e.actor.as_mut())
        .and_then(|a| a.ai.as_mut())
    {
        state.path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes;
    use crate::game_map::GameMap;
    use crate::tile_map::TileKind;

    fn open_world(width: usize, height: usize) -> World {
        let mut world = World::new_with_seed(7);
        world.map = GameMap::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                world.map.tiles.set_kind(x, y, TileKind::Floor);
            }
        }
        world
    }

    fn with_player(world: &mut World, pos: Position) -> EntityId {
        let id = world.spawn(archetypes::player().instantiate(pos));
        world.player = Some(id);
        id
    }

    fn see_everything(world: &mut World) {
        let n = world.map.width() * world.map.height();
        world.map.tiles.set_visible(vec![true; n]);
    }

    fn cached_path(world: &World, id: EntityId) -> Vec<Position> {
        match world
            .map
            .get(id)
            .and_then(|e| e.actor.as_ref())
            .and_then(|a| a.ai.as_ref())
        {
            Some(Ai::Hostile(state)) => state.path.iter().copied().collect(),
            None => Vec::new(),
        }
    }

    fn set_cached_path(world: &mut World, id: EntityId, path: &[Position]) {
        if let Some(Ai::Hostile(state)) = world
            .map
            .get_mut(id)
            .and_then(|e| e.actor.as_mut())
            .and_then(|a| a.ai.as_mut())
        {
            state.path = path.iter().copied().collect();
        }
    }

    #[test]
    fn adjacent_visible_enemy_attacks() {
        let mut world = open_world(8, 8);
        with_player(&mut world, Position::new(3, 3));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(4, 4)));
        see_everything(&mut world);
        assert_eq!(
            decide(&mut world, orc),
            Action::Melee {
                entity: orc,
                dx: -1,
                dy: -1
            }
        );
    }

    #[test]
    fn melee_takes_priority_over_stale_path() {
        let mut world = open_world(8, 8);
        with_player(&mut world, Position::new(3, 3));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(3, 4)));
        set_cached_path(&mut world, orc, &[Position::new(6, 6), Position::new(7, 7)]);
        see_everything(&mut world);
        assert!(matches!(decide(&mut world, orc), Action::Melee { .. }));
        assert_eq!(cached_path(&world, orc).len(), 2);
    }

    #[test]
    fn visible_enemy_replans_and_steps_toward_player() {
        let mut world = open_world(10, 3);
        with_player(&mut world, Position::new(0, 1));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(5, 1)));
        see_everything(&mut world);
        let action = decide(&mut world, orc);
        assert_eq!(
            action,
            Action::Movement {
                entity: orc,
                dx: -1,
                dy: 0
            }
        );
        // First step consumed, the rest stays cached up to the player's cell.
        let rest = cached_path(&world, orc);
        assert_eq!(rest.last(), Some(&Position::new(0, 1)));
        assert_eq!(rest.len(), 4);
    }

    #[test]
    fn unseen_enemy_follows_cached_path_then_waits() {
        let mut world = open_world(10, 3);
        with_player(&mut world, Position::new(0, 1));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(5, 1)));
        set_cached_path(&mut world, orc, &[Position::new(5, 2)]);

        // Nothing visible: no replanning, the cached step is used as-is.
        assert_eq!(
            decide(&mut world, orc),
            Action::Movement {
                entity: orc,
                dx: 0,
                dy: 1
            }
        );
        assert!(cached_path(&world, orc).is_empty());
        assert_eq!(decide(&mut world, orc), Action::Wait { entity: orc });
    }

    #[test]
    fn detached_cached_route_is_dropped() {
        let mut world = open_world(10, 3);
        with_player(&mut world, Position::new(0, 1));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(5, 1)));
        set_cached_path(&mut world, orc, &[Position::new(7, 1), Position::new(8, 1)]);

        assert_eq!(decide(&mut world, orc), Action::Wait { entity: orc });
        assert!(cached_path(&world, orc).is_empty());
        assert_eq!(world.map.get(orc).map(|e| e.pos), Some(Position::new(5, 1)));
    }

    #[test]
    fn blocked_step_does_not_make_enemy_jump() {
        let mut world = open_world(10, 3);
        with_player(&mut world, Position::new(0, 1));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(5, 1)));
        world.spawn(archetypes::troll().instantiate(Position::new(4, 1)));
        set_cached_path(&mut world, orc, &[Position::new(4, 1), Position::new(3, 1)]);

        // The troll blocks the first step, so the move fails and the step is spent.
        let first = decide(&mut world, orc);
        first.perform(&mut world);
        assert_eq!(world.map.get(orc).map(|e| e.pos), Some(Position::new(5, 1)));

        assert_eq!(decide(&mut world, orc), Action::Wait { entity: orc });
        assert!(cached_path(&world, orc).is_empty());
    }

    #[test]
    fn unseen_adjacent_enemy_does_not_attack() {
        let mut world = open_world(5, 5);
        with_player(&mut world, Position::new(2, 2));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(3, 2)));
        assert_eq!(decide(&mut world, orc), Action::Wait { entity: orc });
    }

    #[test]
    fn unreachable_player_means_wait() {
        let mut world = open_world(7, 3);
        for y in 0..3 {
            world.map.tiles.set_kind(3, y, TileKind::Wall);
        }
        with_player(&mut world, Position::new(0, 1));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(6, 1)));
        see_everything(&mut world);
        assert_eq!(decide(&mut world, orc), Action::Wait { entity: orc });
    }

    #[test]
    fn no_player_means_wait() {
        let mut world = open_world(5, 5);
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(3, 2)));
        see_everything(&mut world);
        assert_eq!(decide(&mut world, orc), Action::Wait { entity: orc });
    }

    #[test]
    fn crowd_penalty_applies_to_other_blockers_only() {
        let mut world = open_world(6, 3);
        with_player(&mut world, Position::new(0, 1));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(5, 1)));
        let other = world.spawn(archetypes::troll().instantiate(Position::new(3, 1)));
        let grid = cost_grid_for(&world, orc);
        assert_eq!(grid.get(Position::new(5, 1)), 1);
        assert_eq!(grid.get(Position::new(3, 1)), 11);
        assert_eq!(grid.get(Position::new(0, 1)), 11);
        assert_eq!(grid.get(Position::new(2, 1)), 1);

        // A corpse no longer crowds the route.
        crate::systems::combat::take_damage(&mut world, other, 100);
        let grid = cost_grid_for(&world, orc);
        assert_eq!(grid.get(Position::new(3, 1)), 1);
    }

    #[test]
    fn negative_crowd_penalty_still_lets_enemies_through() {
        let mut world = open_world(5, 1);
        with_player(&mut world, Position::new(0, 0));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(4, 0)));
        world.spawn(archetypes::troll().instantiate(Position::new(2, 0)));
        world.tuning.crowd_penalty = -10;

        let grid = cost_grid_for(&world, orc);
        assert_eq!(grid.get(Position::new(2, 0)), 1);
        let path = get_path_to(&world, orc, Position::new(0, 0));
        assert_eq!(path.len(), 4);
        assert_eq!(path.back(), Some(&Position::new(0, 0)));
    }

    #[test]
    fn path_avoids_crowded_cell_when_detour_is_cheaper() {
        let mut world = open_world(7, 3);
        with_player(&mut world, Position::new(0, 1));
        let orc = world.spawn(archetypes::orc().instantiate(Position::new(6, 1)));
        world.spawn(archetypes::troll().instantiate(Position::new(3, 1)));
        let path = get_path_to(&world, orc, Position::new(0, 1));
        assert!(!path.is_empty());
        assert!(!path.contains(&Position::new(3, 1)));
        assert_eq!(path.back(), Some(&Position::new(0, 1)));
    }
}
