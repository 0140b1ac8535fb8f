use std::collections::VecDeque;

use slotmap::new_key_type;

new_key_type! {
    /// Handle into the game map's entity arena. Stable across insertions/removals.
    pub struct EntityId;
}

/// Turn counter. Never use raw u64 where a Tick is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Tick(pub u64);

/// Spatial position on the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// max(|dx|, |dy|): the number of king moves between two cells.
    pub fn chebyshev(self, other: Position) -> i32 {
        (other.x - self.x).abs().max((other.y - self.y).abs())
    }

    pub fn offset(self, dx: i32, dy: i32) -> Position {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Draw priority: higher variants are drawn on top of lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderOrder {
    Corpse,
    Actor,
}

/// Combat stats. `hp` is only writable through `set_hp`, which clamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fighter {
    max_hp: i32,
    hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        let max_hp = hp.max(0);
        Self {
            max_hp,
            hp: max_hp,
            defense,
            power,
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Store `value` clamped to [0, max_hp]. Returns true when the stored
    /// value is 0; the caller decides whether that is a new death.
    pub fn set_hp(&mut self, value: i32) -> bool {
        self.hp = value.clamp(0, self.max_hp);
        self.hp == 0
    }
}

/// Hostile melee AI state: the last route planned toward the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostileEnemy {
    pub path: VecDeque<Position>,
}

/// Behaviour strategy owned by exactly one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ai {
    Hostile(HostileEnemy),
}

/// Which behaviour a fresh actor starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiKind {
    Hostile,
}

impl AiKind {
    pub fn build(self) -> Ai {
        match self {
            AiKind::Hostile => Ai::Hostile(HostileEnemy::default()),
        }
    }
}

/// Acting/fighting part of an entity. `ai == None` means dead or inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub ai: Option<Ai>,
    pub fighter: Fighter,
}

/// Anything placed on the map: the player, monsters, corpses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub pos: Position,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub actor: Option<Actor>,
}

impl Entity {
    pub fn is_actor(&self) -> bool {
        self.actor.is_some()
    }

    /// An actor is alive exactly while it holds an AI. The player holds one
    /// too; it is simply never asked to decide.
    pub fn is_alive(&self) -> bool {
        self.actor.as_ref().is_some_and(|a| a.ai.is_some())
    }

    pub fn fighter(&self) -> Option<&Fighter> {
        self.actor.as_ref().map(|a| &a.fighter)
    }

    pub fn fighter_mut(&mut self) -> Option<&mut Fighter> {
        self.actor.as_mut().map(|a| &mut a.fighter)
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.pos = self.pos.offset(dx, dy);
    }
}
