use crate::actions::{Action, Outcome};
use crate::archetypes::Archetypes;
use crate::color;
use crate::components::{EntityId, Tick};
use crate::config::GameConfig;
use crate::fov::compute_tile_fov;
use crate::procgen::generate_dungeon;
use crate::systems::hostile;
use crate::world::World;

pub const WELCOME_MESSAGE: &str = "Welcome to the dungeon, adventurer!";

/// What the session is currently accepting input for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    MainGame,
    /// The player is dead. Only Escape does anything.
    GameOver,
}

/// Seeded world with a freshly generated level, initial FOV, and the
/// welcome line in the log.
pub fn new_game(config: &GameConfig, archetypes: &Archetypes) -> World {
    let mut world = World::new_with_seed(config.seed);
    world.tuning = config.tuning();
    generate_dungeon(&mut world, &config.dungeon_params(), archetypes);
    update_fov(&mut world);
    world
        .messages
        .add_message(WELCOME_MESSAGE, color::WELCOME_TEXT, true);
    log::info!("new game, seed {}", config.seed);
    world
}

/// Run one full turn cycle for a player-issued action.
///
/// Order: the player's action resolves completely, then every other living
/// actor acts once in arena order, then FOV is recomputed, then the tick
/// advances. Escape short-circuits with `Outcome::Quit`.
pub fn handle_player_action(world: &mut World, action: Action) -> Outcome {
    if action == Action::Escape {
        return action.perform(world);
    }
    if world.mode == GameMode::GameOver {
        log::debug!("game over, ignoring {:?}", action);
        return Outcome::Continue;
    }
    let Some(player) = world.player else {
        return Outcome::Continue;
    };
    if action.entity() != Some(player) {
        log::warn!("player turn given an action for another entity: {:?}", action);
        return Outcome::Continue;
    }

    let outcome = action.perform(world);
    if outcome == Outcome::Quit {
        return outcome;
    }

    handle_enemy_turns(world);
    update_fov(world);

    #[cfg(debug_assertions)]
    crate::world::validate_world(world);

    world.tick = Tick(world.tick.0 + 1);
    outcome
}

/// Let every living non-player actor take one action.
///
/// The actor list is fixed at the start of the phase; actors killed earlier
/// in the phase are skipped.
pub fn handle_enemy_turns(world: &mut World) {
    let actors: Vec<EntityId> = world
        .map
        .actors()
        .filter(|&id| !world.is_player(id))
        .collect();

    for id in actors {
        if world.mode == GameMode::GameOver {
            break;
        }
        if !world.map.get(id).is_some_and(|e| e.is_alive()) {
            continue;
        }
        let action = hostile::decide(world, id);
        log::debug!("{:?} -> {:?}", id, action);
        if action.perform(world) == Outcome::Quit {
            break;
        }
    }
}

/// Recompute `visible` from the player's cell and fold it into `explored`.
pub fn update_fov(world: &mut World) {
    let Some(origin) = world.player_entity().map(|p| p.pos) else {
        world.map.tiles.clear_visible();
        return;
    };
    let mask = compute_tile_fov(&world.map.tiles, origin, world.tuning.fov_radius);
    world.map.tiles.set_visible(mask);
}
