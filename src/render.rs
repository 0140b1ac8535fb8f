use crate::components::{Entity, EntityId};
use crate::events::Event;
use crate::message_log::MessageLog;
use crate::tile_map::{Graphic, SHROUD};
use crate::world::World;

/// Compose the map into a row-major cell buffer.
///
/// Visible cells use their lit graphic, explored cells their dark one, and
/// everything else is shroud. Entities are drawn over visible cells only, in
/// ascending render order, so living actors end up on top of corpses.
///
/// This function is READ-ONLY and does not modify world state.
pub fn render_cells(world: &World) -> Vec<Graphic> {
    let tiles = &world.map.tiles;
    let width = tiles.width();
    let height = tiles.height();
    let mut cells = Vec::with_capacity(width * height);

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let graphic = match tiles.get_kind(x, y) {
                Some(kind) if tiles.is_visible(x, y) => kind.tile().light,
                Some(kind) if tiles.is_explored(x, y) => kind.tile().dark,
                _ => SHROUD,
            };
            cells.push(graphic);
        }
    }

    let mut drawn: Vec<&Entity> = world.map.entities().map(|(_, e)| e).collect();
    drawn.sort_by_key(|e| e.render_order);
    for entity in drawn {
        let (x, y) = (entity.pos.x, entity.pos.y);
        if !tiles.is_visible(x, y) {
            continue;
        }
        let idx = y as usize * width + x as usize;
        if let Some(cell) = cells.get_mut(idx) {
            cell.ch = entity.glyph;
            cell.fg = entity.color;
        }
    }

    cells
}

/// Render the map as text, one line per row, no trailing newline.
pub fn render_map_to_string(world: &World) -> String {
    let width = world.map.width();
    if width == 0 || world.map.height() == 0 {
        return String::new();
    }
    let cells = render_cells(world);
    let rows: Vec<String> = cells
        .chunks(width)
        .map(|row| row.iter().map(|g| g.ch).collect())
        .collect();
    rows.join("\n")
}

/// Player hit points and the turn counter on one line.
pub fn render_status(world: &World) -> String {
    match world.player_entity().and_then(|p| p.fighter()) {
        Some(f) => format!("HP: {}/{} | Turn: {}", f.hp(), f.max_hp(), world.tick.0),
        None => format!("HP: -- | Turn: {}", world.tick.0),
    }
}

/// The newest `count` log lines, oldest first, stacked lines shown as "(xN)".
pub fn render_messages(log: &MessageLog, count: usize) -> String {
    log.recent(count)
        .iter()
        .map(|m| m.full_text())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render recent events as a multi-line string.
///
/// Entity names are resolved through the map, with a fallback of
/// `"E{id:?}"` for entities that are gone.
pub fn render_recent_events(world: &World, count: usize) -> String {
    let resolve = |id: &EntityId| -> String {
        world
            .map
            .get(*id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| format!("E{:?}", id))
    };

    let lines: Vec<String> = world
        .events
        .recent(count)
        .map(|event| match event {
            Event::Spawned { entity, tick } => {
                format!("[{}] {} spawned", tick.0, resolve(entity))
            }
            Event::Moved { entity, x, y, tick } => {
                format!("[{}] {} moved to ({},{})", tick.0, resolve(entity), x, y)
            }
            Event::Attacked {
                attacker,
                defender,
                damage,
                tick,
            } => format!(
                "[{}] {} attacked {} for {} dmg",
                tick.0,
                resolve(attacker),
                resolve(defender),
                damage
            ),
            Event::Died { entity, tick } => {
                format!("[{}] {} died", tick.0, resolve(entity))
            }
            Event::GameOver { tick } => format!("[{}] game over", tick.0),
        })
        .collect();

    lines.join("\n")
}
