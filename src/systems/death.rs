use crate::color;
use crate::components::{Entity, EntityId, RenderOrder, Tick};
use crate::engine::GameMode;
use crate::events::{Event, EventLog};
use crate::message_log::MessageLog;

/// The sinks a death reports into. Borrowed from the world by the caller so
/// that fighters never need to reach back into the game.
pub struct DeathContext<'a> {
    pub messages: &'a mut MessageLog,
    pub events: &'a mut EventLog,
    pub mode: &'a mut GameMode,
    pub tick: Tick,
}

/// One-shot death transition. Turns the entity into a non-blocking corpse,
/// drops its AI, and logs the death. A dying player ends the game.
pub fn die(entity: &mut Entity, id: EntityId, is_player: bool, ctx: &mut DeathContext<'_>) {
    let (text, fg) = if is_player {
        ("You died! Game Over".to_string(), color::PLAYER_DIE)
    } else {
        (format!("{} is dead!", entity.name), color::ENEMY_DIE)
    };

    entity.glyph = 'X';
    entity.color = color::CORPSE;
    entity.blocks_movement = false;
    if let Some(actor) = entity.actor.as_mut() {
        actor.ai = None;
    }
    entity.name = format!("dead body of {}", entity.name);
    entity.render_order = RenderOrder::Corpse;

    log::info!("{text}");
    ctx.messages.add_message(text, fg, true);
    ctx.events.push(Event::Died {
        entity: id,
        tick: ctx.tick,
    });

    if is_player {
        *ctx.mode = GameMode::GameOver;
        ctx.events.push(Event::GameOver { tick: ctx.tick });
    }
}
