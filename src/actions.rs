use crate::components::{EntityId, Position};
use crate::events::Event;
use crate::systems::combat::run_melee;
use crate::world::World;

/// What the outer loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The session ends now. Not an error.
    Quit,
}

/// One discrete unit of game time, issued by the player or by an AI.
///
/// Illegal moves and missing targets are not errors: the action simply does
/// nothing, the same as bumping into a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Escape,
    Wait { entity: EntityId },
    Movement { entity: EntityId, dx: i32, dy: i32 },
    Melee { entity: EntityId, dx: i32, dy: i32 },
    /// Melee if a living actor is in the way, otherwise Movement.
    Bump { entity: EntityId, dx: i32, dy: i32 },
}

impl Action {
    pub fn entity(&self) -> Option<EntityId> {
        match *self {
            Action::Escape => None,
            Action::Wait { entity }
            | Action::Movement { entity, .. }
            | Action::Melee { entity, .. }
            | Action::Bump { entity, .. } => Some(entity),
        }
    }

    pub fn perform(self, world: &mut World) -> Outcome {
        match self {
            Action::Escape => {
                log::info!("escape requested, ending session");
                return Outcome::Quit;
            }
            Action::Wait { .. } => {}
            Action::Movement { entity, dx, dy } => perform_movement(world, entity, dx, dy),
            Action::Melee { entity, dx, dy } => perform_melee(world, entity, dx, dy),
            Action::Bump { entity, dx, dy } => {
                if target_actor(world, entity, dx, dy).is_some() {
                    perform_melee(world, entity, dx, dy);
                } else {
                    perform_movement(world, entity, dx, dy);
                }
            }
        }
        Outcome::Continue
    }
}

/// Absolute cell an offset action aims at.
pub fn destination(world: &World, entity: EntityId, dx: i32, dy: i32) -> Option<Position> {
    world.map.get(entity).map(|e| e.pos.offset(dx, dy))
}

/// Whatever physically blocks the destination cell.
pub fn blocking_entity(world: &World, entity: EntityId, dx: i32, dy: i32) -> Option<EntityId> {
    let dest = destination(world, entity, dx, dy)?;
    world.map.blocking_entity_at(dest.x, dest.y)
}

/// The living actor standing on the destination cell.
pub fn target_actor(world: &World, entity: EntityId, dx: i32, dy: i32) -> Option<EntityId> {
    let dest = destination(world, entity, dx, dy)?;
    world.map.actor_at(dest.x, dest.y)
}

fn perform_movement(world: &mut World, entity: EntityId, dx: i32, dy: i32) {
    let Some(dest) = destination(world, entity, dx, dy) else {
        return;
    };
    if !world.map.in_bounds(dest.x, dest.y) {
        return; // out of bounds
    }
    if !world.map.tiles.is_walkable(dest.x, dest.y) {
        return; // wall
    }
    if world.map.blocking_entity_at(dest.x, dest.y).is_some() {
        return; // occupied
    }
    if let Some(e) = world.map.get_mut(entity) {
        e.move_by(dx, dy);
        world.events.push(Event::Moved {
            entity,
            x: dest.x,
            y: dest.y,
            tick: world.tick,
        });
    }
}

fn perform_melee(world: &mut World, entity: EntityId, dx: i32, dy: i32) {
    let Some(target) = target_actor(world, entity, dx, dy) else {
        return;
    };
    if target == entity {
        return;
    }
    run_melee(world, entity, target);
}
