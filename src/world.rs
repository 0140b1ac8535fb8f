use rand::rngs::StdRng;

use crate::components::{Entity, EntityId, RenderOrder, Tick};
use crate::engine::GameMode;
use crate::events::{Event, EventLog};
use crate::game_map::GameMap;
use crate::message_log::MessageLog;
use crate::rng::create_rng;

/// Sight radius of the player, in cells.
pub const FOV_RADIUS: i32 = 8;

/// Extra path cost for a cell another blocking entity stands on. Lower values
/// make monsters queue up behind each other in corridors; higher values send
/// them around to surround the target.
pub const CROWD_PENALTY: i32 = 10;

/// Runtime constants the turn systems read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    pub fov_radius: i32,
    pub crowd_penalty: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fov_radius: FOV_RADIUS,
            crowd_penalty: CROWD_PENALTY,
        }
    }
}

/// Everything one game session mutates, passed explicitly to every system.
pub struct World {
    pub map: GameMap,
    /// None until a dungeon with at least one room has been generated.
    pub player: Option<EntityId>,
    pub mode: GameMode,

    // Infrastructure
    pub messages: MessageLog,
    pub events: EventLog,
    pub rng: StdRng,
    pub tick: Tick,
    pub tuning: Tuning,
}

impl World {
    /// Create a new World with an all-wall 80×43 map and a deterministic RNG seed.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            map: GameMap::new(80, 43),
            player: None,
            mode: GameMode::MainGame,

            messages: MessageLog::new(),
            events: EventLog::default(),
            rng: create_rng(seed),
            tick: Tick(0),
            tuning: Tuning::default(),
        }
    }

    /// Place an entity on the map and journal it.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.map.spawn(entity);
        self.events.push(Event::Spawned {
            entity: id,
            tick: self.tick,
        });
        id
    }

    pub fn is_player(&self, id: EntityId) -> bool {
        self.player == Some(id)
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.map.get(id))
    }
}

/// Validate world invariants. Run every turn in debug builds.
#[cfg(debug_assertions)]
pub fn validate_world(world: &World) {
    if let Some(player) = world.player {
        assert!(
            world.map.contains(player),
            "player handle {:?} does not resolve on the map",
            player
        );
    }

    for (id, entity) in world.map.entities() {
        assert!(
            world.map.in_bounds(entity.pos.x, entity.pos.y),
            "entity {:?} ({}) out of bounds at {:?}",
            id,
            entity.name,
            entity.pos
        );

        let Some(actor) = entity.actor.as_ref() else {
            continue;
        };

        let hp = actor.fighter.hp();
        assert!(
            (0..=actor.fighter.max_hp()).contains(&hp),
            "entity {:?} hp {} outside [0, {}]",
            id,
            hp,
            actor.fighter.max_hp()
        );

        if entity.is_alive() {
            assert!(hp > 0, "living entity {:?} at 0 hp", id);
        } else {
            assert!(
                !entity.blocks_movement,
                "dead entity {:?} still blocks movement",
                id
            );
            assert_eq!(
                entity.render_order,
                RenderOrder::Corpse,
                "dead entity {:?} not drawn as a corpse",
                id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes;
    use crate::components::Position;

    #[test]
    fn new_with_seed_initializes_correctly() {
        let world = World::new_with_seed(42);
        assert!(world.map.is_empty());
        assert!(world.player.is_none());
        assert!(world.messages.is_empty());
        assert_eq!(world.mode, GameMode::MainGame);
        assert_eq!(world.tick, Tick(0));
        assert_eq!(world.map.width(), 80);
        assert_eq!(world.map.height(), 43);
        assert_eq!(world.tuning, Tuning::default());
    }

    #[test]
    fn spawn_records_event() {
        let mut world = World::new_with_seed(42);
        let id = world.spawn(archetypes::orc().instantiate(Position::new(1, 1)));
        assert!(world.map.contains(id));
        assert!(matches!(
            world.events.last(),
            Some(Event::Spawned { entity, .. }) if *entity == id
        ));
    }

    #[test]
    fn player_lookup() {
        let mut world = World::new_with_seed(42);
        assert!(world.player_entity().is_none());
        let id = world.spawn(archetypes::player().instantiate(Position::new(2, 2)));
        world.player = Some(id);
        assert!(world.is_player(id));
        assert_eq!(world.player_entity().map(|e| e.glyph), Some('@'));
    }

    #[test]
    fn validate_passes_for_clean_world() {
        let mut world = World::new_with_seed(42);
        world.spawn(archetypes::orc().instantiate(Position::new(3, 3)));
        validate_world(&world);
    }

    #[test]
    #[should_panic(expected = "does not resolve")]
    fn validate_catches_dangling_player() {
        let mut world = World::new_with_seed(42);
        let id = world.spawn(archetypes::player().instantiate(Position::new(2, 2)));
        world.player = Some(id);
        world.map.remove(id);
        validate_world(&world);
    }

    #[test]
    #[should_panic(expected = "still blocks movement")]
    fn validate_catches_blocking_corpse() {
        let mut world = World::new_with_seed(42);
        let id = world.spawn(archetypes::orc().instantiate(Position::new(2, 2)));
        if let Some(actor) = world.map.get_mut(id).and_then(|e| e.actor.as_mut()) {
            actor.ai = None;
        }
        validate_world(&world);
    }
}
