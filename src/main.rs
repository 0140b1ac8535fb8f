use std::io::{self, BufRead, Write};

use delve::actions::{Action, Outcome};
use delve::components::EntityId;
use delve::config::{GameConfig, load_config};
use delve::engine::{GameMode, handle_player_action, new_game};
use delve::loading::load_archetypes;
use delve::render::{render_map_to_string, render_messages, render_status};
use delve::world::World;

/// Lines of the message log shown under the map.
const LOG_LINES: usize = 5;

/// Direction for a movement key: vi-keys and numpad digits.
fn direction(key: char) -> Option<(i32, i32)> {
    match key {
        'k' | '8' => Some((0, -1)),
        'j' | '2' => Some((0, 1)),
        'h' | '4' => Some((-1, 0)),
        'l' | '6' => Some((1, 0)),
        'y' | '7' => Some((-1, -1)),
        'u' | '9' => Some((1, -1)),
        'b' | '1' => Some((-1, 1)),
        'n' | '3' => Some((1, 1)),
        _ => None,
    }
}

fn key_to_action(key: char, player: EntityId) -> Option<Action> {
    match key {
        'q' => Some(Action::Escape),
        '.' | '5' => Some(Action::Wait { entity: player }),
        _ => direction(key).map(|(dx, dy)| Action::Bump {
            entity: player,
            dx,
            dy,
        }),
    }
}

fn draw(world: &World, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", render_map_to_string(world))?;
    writeln!(out, "{}", render_status(world))?;
    writeln!(out, "{}", render_messages(&world.messages, LOG_LINES))?;
    if world.mode == GameMode::GameOver {
        writeln!(out, "-- game over, q to quit --")?;
    }
    out.flush()
}

fn main() -> io::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path),
        None => GameConfig::default(),
    };
    let archetypes = load_archetypes(&config.archetypes_path);
    let mut world = new_game(&config, &archetypes);

    let Some(player) = world.player else {
        log::error!("dungeon generation placed no player, nothing to play");
        return Ok(());
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    draw(&world, &mut out)?;

    for line in io::stdin().lock().lines() {
        for key in line?.chars() {
            let Some(action) = key_to_action(key, player) else {
                continue;
            };
            if handle_player_action(&mut world, action) == Outcome::Quit {
                return Ok(());
            }
        }
        draw(&world, &mut out)?;
    }

    Ok(())
}
