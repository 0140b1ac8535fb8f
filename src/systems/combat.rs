use crate::color;
use crate::components::{EntityId, Fighter};
use crate::events::Event;
use crate::systems::death::{DeathContext, die};
use crate::world::World;

/// Raw melee damage. Zero or negative means the blow does nothing.
pub fn damage(attacker: &Fighter, defender: &Fighter) -> i32 {
    attacker.power - defender.defense
}

/// Melee resolution: attacker strikes defender once.
///
/// Damage = attacker.power - defender.defense. Positive damage is subtracted
/// from the defender's hp (which may kill it); anything else only logs a
/// "no damage" line. The attack line is logged before any death line.
pub fn run_melee(world: &mut World, attacker: EntityId, defender: EntityId) {
    let (Some(a), Some(d)) = (world.map.get(attacker), world.map.get(defender)) else {
        return;
    };
    let (Some(af), Some(df)) = (a.fighter(), d.fighter()) else {
        return;
    };
    if !d.is_alive() {
        return;
    }

    let dmg = damage(af, df);
    let description = format!("{} attacks {}", a.name, d.name);
    let fg = if world.is_player(attacker) {
        color::PLAYER_ATK
    } else {
        color::ENEMY_ATK
    };

    world.events.push(Event::Attacked {
        attacker,
        defender,
        damage: dmg.max(0),
        tick: world.tick,
    });

    if dmg > 0 {
        log::debug!("{description} for {dmg}");
        world
            .messages
            .add_message(format!("{description} for {dmg} hit points."), fg, true);
        take_damage(world, defender, dmg);
    } else {
        log::debug!("{description}, no damage");
        world
            .messages
            .add_message(format!("{description} but does no damage."), fg, true);
    }
}

pub fn take_damage(world: &mut World, id: EntityId, amount: i32) {
    let Some(hp) = world.map.get(id).and_then(|e| e.fighter()).map(Fighter::hp) else {
        return;
    };
    set_hp(world, id, hp - amount);
}

/// The one write path for hp. Clamps to [0, max_hp]; reaching 0 while the
/// actor still has an AI runs the death transition. A dead actor has no AI,
/// so later writes of 0 never run it again.
pub fn set_hp(world: &mut World, id: EntityId, value: i32) {
    let World {
        map,
        player,
        mode,
        messages,
        events,
        tick,
        ..
    } = world;
    let Some(entity) = map.get_mut(id) else {
        return;
    };
    let Some(fighter) = entity.fighter_mut() else {
        return;
    };
    let at_zero = fighter.set_hp(value);
    if at_zero && entity.is_alive() {
        let mut ctx = DeathContext {
            messages,
            events,
            mode,
            tick: *tick,
        };
        die(entity, id, *player == Some(id), &mut ctx);
    }
}
