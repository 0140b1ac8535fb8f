use rand::RngExt;
use rand::rngs::StdRng;

use crate::archetypes::Archetypes;
use crate::components::{EntityId, Position};
use crate::game_map::GameMap;
use crate::rng::chance;
use crate::tile_map::TileKind;
use crate::world::World;

/// Generator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonParams {
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub map_width: usize,
    pub map_height: usize,
    pub max_monsters_per_room: u32,
}

impl Default for DungeonParams {
    fn default() -> Self {
        Self {
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            map_width: 80,
            map_height: 43,
            max_monsters_per_room: 2,
        }
    }
}

/// Axis-aligned room. The outer ring (x1, y1, x2, y2 edges) stays wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectangularRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectangularRoom {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Floor cells: everything strictly inside the wall ring.
    pub fn inner(&self) -> impl Iterator<Item = Position> + use<> {
        let (x1, y1, x2, y2) = (self.x1, self.y1, self.x2, self.y2);
        (y1 + 1..y2).flat_map(move |y| (x1 + 1..x2).map(move |x| Position::new(x, y)))
    }

    /// Overlap test including the wall ring; rooms sharing a wall intersect.
    pub fn intersects(&self, other: &RectangularRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// Every cell on the raster line from `from` to `to`, both ends included.
fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut cells = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        cells.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

/// L-shaped corridor between two points. A coin flip decides whether the
/// horizontal or the vertical leg comes first.
pub fn tunnel_between(rng: &mut StdRng, start: Position, end: Position) -> Vec<Position> {
    let corner = if chance(rng, 0.5) {
        Position::new(end.x, start.y)
    } else {
        Position::new(start.x, end.y)
    };
    let mut cells = bresenham(start, corner);
    cells.extend(bresenham(corner, end));
    cells
}

/// Drop up to `max_monsters` monsters on random free inner cells of `room`.
/// A roll that lands on an occupied cell is skipped, not retried. A room
/// with no inner cells gets nothing.
pub fn place_entities(
    world: &mut World,
    room: &RectangularRoom,
    max_monsters: u32,
    archetypes: &Archetypes,
) -> Vec<EntityId> {
    if room.x2 - room.x1 < 2 || room.y2 - room.y1 < 2 {
        return Vec::new();
    }
    let count = world.rng.random_range(0..=max_monsters);
    let mut spawned = Vec::new();
    for _ in 0..count {
        let x = world.rng.random_range(room.x1 + 1..=room.x2 - 1);
        let y = world.rng.random_range(room.y1 + 1..=room.y2 - 1);
        let pos = Position::new(x, y);
        if world.map.is_occupied(pos) {
            continue;
        }
        let Some(archetype) = archetypes.pick_monster(&mut world.rng) else {
            continue;
        };
        spawned.push(world.spawn(archetype.instantiate(pos)));
    }
    spawned
}

/// Build a fresh level into `world.map` and place the player in the first
/// room. Returns the accepted rooms in order.
///
/// Zero accepted rooms is a valid outcome: the map stays solid rock and
/// `world.player` is left as None.
pub fn generate_dungeon(
    world: &mut World,
    params: &DungeonParams,
    archetypes: &Archetypes,
) -> Vec<RectangularRoom> {
    world.map = GameMap::new(params.map_width, params.map_height);
    world.player = None;

    let width = params.map_width as i32;
    let height = params.map_height as i32;
    let room_min = params.room_min_size.max(1);
    let room_max = params.room_max_size.max(room_min);
    let mut rooms: Vec<RectangularRoom> = Vec::new();

    for _ in 0..params.max_rooms {
        let room_w = world.rng.random_range(room_min..=room_max);
        let room_h = world.rng.random_range(room_min..=room_max);
        if width - room_w - 1 < 0 || height - room_h - 1 < 0 {
            continue; // room cannot fit on this map
        }
        let x = world.rng.random_range(0..=width - room_w - 1);
        let y = world.rng.random_range(0..=height - room_h - 1);
        let room = RectangularRoom::new(x, y, room_w, room_h);

        if rooms.iter().any(|other| room.intersects(other)) {
            continue;
        }

        for cell in room.inner() {
            world.map.tiles.set_kind(cell.x, cell.y, TileKind::Floor);
        }

        match rooms.last() {
            None => {
                let id = world.spawn(archetypes.player.instantiate(room.center()));
                world.player = Some(id);
            }
            Some(prev) => {
                for cell in tunnel_between(&mut world.rng, prev.center(), room.center()) {
                    world.map.tiles.set_kind(cell.x, cell.y, TileKind::Floor);
                }
            }
        }

        place_entities(world, &room, params.max_monsters_per_room, archetypes);
        rooms.push(room);
    }

    log::info!(
        "generated {}x{} dungeon: {} rooms, {} entities",
        params.map_width,
        params.map_height,
        rooms.len(),
        world.map.len()
    );
    if rooms.is_empty() {
        log::warn!("no room could be placed; the level has no player");
    }
    rooms
}
