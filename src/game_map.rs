use slotmap::SlotMap;

use crate::components::{Entity, EntityId, Position};
use crate::tile_map::TileMap;

/// A dungeon level: the tile grid and the arena owning every entity on it.
///
/// Entities never hold a pointer back to the map; anything that needs to find
/// one goes through its `EntityId`. Membership is therefore exact: an entity
/// is on this map if and only if its id resolves in the arena.
#[derive(Debug, Clone)]
pub struct GameMap {
    pub tiles: TileMap,
    entities: SlotMap<EntityId, Entity>,
}

impl GameMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            tiles: TileMap::new(width, height),
            entities: SlotMap::with_key(),
        }
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.tiles.in_bounds(x, y)
    }

    /// Take ownership of a freshly built entity.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.entities.insert(entity)
    }

    /// Move an entity already on this map to a new cell. Returns false for
    /// unknown ids.
    pub fn place(&mut self, id: EntityId, pos: Position) -> bool {
        match self.entities.get_mut(id) {
            Some(e) => {
                e.pos = pos;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in arena order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// First entity at (x, y) that blocks movement, of any kind.
    pub fn blocking_entity_at(&self, x: i32, y: i32) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, e)| e.blocks_movement && e.pos.x == x && e.pos.y == y)
            .map(|(id, _)| id)
    }

    /// First living actor at (x, y). Corpses and plain entities are ignored.
    pub fn actor_at(&self, x: i32, y: i32) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, e)| e.is_alive() && e.pos.x == x && e.pos.y == y)
            .map(|(id, _)| id)
    }

    /// Living actors, recomputed from the arena on every call.
    pub fn actors(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(|(_, e)| e.is_alive())
            .map(|(id, _)| id)
    }

    /// True when any entity (blocking or not) stands on the cell.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.entities.values().any(|e| e.pos == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Actor, AiKind, Fighter, RenderOrder, Rgb};

    fn actor_at(x: i32, y: i32) -> Entity {
        Entity {
            pos: Position::new(x, y),
            glyph: 'o',
            color: Rgb(63, 127, 63),
            name: "Orc".to_string(),
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            actor: Some(Actor {
                ai: Some(AiKind::Hostile.build()),
                fighter: Fighter::new(10, 0, 3),
            }),
        }
    }

    fn corpse_at(x: i32, y: i32) -> Entity {
        let mut e = actor_at(x, y);
        e.blocks_movement = false;
        e.render_order = RenderOrder::Corpse;
        if let Some(a) = e.actor.as_mut() {
            a.ai = None;
        }
        e
    }

    #[test]
    fn spawn_and_remove_track_membership() {
        let mut map = GameMap::new(10, 10);
        let a = map.spawn(actor_at(1, 1));
        let b = map.spawn(actor_at(2, 2));
        assert_ne!(a, b);
        assert_eq!(map.len(), 2);
        assert!(map.remove(a).is_some());
        assert!(!map.contains(a));
        assert!(map.get(a).is_none());
        assert!(map.contains(b));
        assert!(map.remove(a).is_none());
    }

    #[test]
    fn place_moves_entity() {
        let mut map = GameMap::new(10, 10);
        let a = map.spawn(actor_at(1, 1));
        assert!(map.place(a, Position::new(4, 5)));
        assert_eq!(map.get(a).map(|e| e.pos), Some(Position::new(4, 5)));
        map.remove(a);
        assert!(!map.place(a, Position::new(0, 0)));
    }

    #[test]
    fn blocking_query_ignores_corpses() {
        let mut map = GameMap::new(10, 10);
        map.spawn(corpse_at(3, 3));
        assert_eq!(map.blocking_entity_at(3, 3), None);
        let live = map.spawn(actor_at(3, 3));
        assert_eq!(map.blocking_entity_at(3, 3), Some(live));
        assert_eq!(map.blocking_entity_at(4, 3), None);
    }

    #[test]
    fn actor_query_only_returns_living() {
        let mut map = GameMap::new(10, 10);
        map.spawn(corpse_at(5, 5));
        assert_eq!(map.actor_at(5, 5), None);
        let live = map.spawn(actor_at(6, 5));
        assert_eq!(map.actor_at(6, 5), Some(live));
    }

    #[test]
    fn actors_reflect_current_state() {
        let mut map = GameMap::new(10, 10);
        let a = map.spawn(actor_at(1, 1));
        map.spawn(corpse_at(2, 2));
        let b = map.spawn(actor_at(3, 3));
        let first: Vec<_> = map.actors().collect();
        assert_eq!(first, vec![a, b]);

        if let Some(actor) = map.get_mut(a).and_then(|e| e.actor.as_mut()) {
            actor.ai = None;
        }
        let second: Vec<_> = map.actors().collect();
        assert_eq!(second, vec![b]);
    }

    #[test]
    fn bounds_follow_tile_grid() {
        let map = GameMap::new(8, 6);
        assert!(map.in_bounds(0, 0));
        assert!(map.in_bounds(7, 5));
        assert!(!map.in_bounds(8, 5));
        assert!(!map.in_bounds(-1, 0));
    }

    #[test]
    fn occupancy_counts_non_blocking_entities() {
        let mut map = GameMap::new(8, 6);
        map.spawn(corpse_at(2, 2));
        assert!(map.is_occupied(Position::new(2, 2)));
        assert!(!map.is_occupied(Position::new(2, 3)));
    }
}
