use rand::rngs::StdRng;

use crate::components::{Actor, AiKind, Entity, Fighter, Position, RenderOrder, Rgb};
use crate::rng::pick_weighted;

/// Starting combat stats of an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FighterStats {
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

/// Descriptor a fresh entity is built from. Spawning never copies a live
/// entity; it always goes through `instantiate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archetype {
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub fighter: Option<FighterStats>,
    pub ai: Option<AiKind>,
    /// Relative spawn frequency among monsters.
    pub weight: u32,
}

impl Archetype {
    /// Build a new entity at `pos`. Archetypes with a stat block become
    /// blocking actors; the rest are inert scenery.
    pub fn instantiate(&self, pos: Position) -> Entity {
        let actor = self.fighter.map(|s| Actor {
            ai: self.ai.map(AiKind::build),
            fighter: Fighter::new(s.hp, s.defense, s.power),
        });
        let is_actor = actor.is_some();
        Entity {
            pos,
            glyph: self.glyph,
            color: self.color,
            name: self.name.clone(),
            blocks_movement: is_actor,
            render_order: RenderOrder::Actor,
            actor,
        }
    }
}

/// The player template plus the weighted monster table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archetypes {
    pub player: Archetype,
    pub monsters: Vec<Archetype>,
}

impl Archetypes {
    pub fn pick_monster(&self, rng: &mut StdRng) -> Option<&Archetype> {
        let weights: Vec<u32> = self.monsters.iter().map(|m| m.weight).collect();
        pick_weighted(rng, &weights).and_then(|i| self.monsters.get(i))
    }
}

pub fn player() -> Archetype {
    Archetype {
        name: "Player".to_string(),
        glyph: '@',
        color: Rgb(255, 255, 255),
        fighter: Some(FighterStats {
            hp: 30,
            defense: 2,
            power: 5,
        }),
        ai: Some(AiKind::Hostile),
        weight: 0,
    }
}

pub fn orc() -> Archetype {
    Archetype {
        name: "Orc".to_string(),
        glyph: 'o',
        color: Rgb(63, 127, 63),
        fighter: Some(FighterStats {
            hp: 10,
            defense: 0,
            power: 3,
        }),
        ai: Some(AiKind::Hostile),
        weight: 80,
    }
}

pub fn troll() -> Archetype {
    Archetype {
        name: "Troll".to_string(),
        glyph: 'T',
        color: Rgb(0, 127, 0),
        fighter: Some(FighterStats {
            hp: 16,
            defense: 1,
            power: 4,
        }),
        ai: Some(AiKind::Hostile),
        weight: 20,
    }
}

impl Default for Archetypes {
    fn default() -> Self {
        Self {
            player: player(),
            monsters: vec![orc(), troll()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_map::GameMap;
    use crate::rng::create_rng;

    #[test]
    fn instantiate_builds_living_blocking_actor() {
        let e = orc().instantiate(Position::new(4, 2));
        assert_eq!(e.pos, Position::new(4, 2));
        assert!(e.blocks_movement);
        assert!(e.is_alive());
        assert_eq!(e.fighter().map(|f| (f.hp(), f.max_hp())), Some((10, 10)));
        assert_eq!(e.render_order, RenderOrder::Actor);
    }

    #[test]
    fn instances_do_not_share_state() {
        let template = troll();
        let mut a = template.instantiate(Position::new(0, 0));
        let b = template.instantiate(Position::new(1, 0));
        if let Some(f) = a.fighter_mut() {
            f.set_hp(1);
        }
        assert_eq!(b.fighter().map(Fighter::hp), Some(16));
        assert_eq!(template.fighter.map(|s| s.hp), Some(16));
    }

    #[test]
    fn statless_archetype_is_inert_scenery() {
        let mut rock = orc();
        rock.fighter = None;
        let e = rock.instantiate(Position::new(0, 0));
        assert!(!e.blocks_movement);
        assert!(!e.is_actor());
    }

    #[test]
    fn spawn_inserts_into_map() {
        let mut map = GameMap::new(5, 5);
        let id = map.spawn(orc().instantiate(Position::new(2, 2)));
        assert_eq!(map.blocking_entity_at(2, 2), Some(id));
    }

    #[test]
    fn default_table_prefers_orcs() {
        let table = Archetypes::default();
        let mut rng = create_rng(42);
        let mut orcs = 0;
        for _ in 0..1_000 {
            if table.pick_monster(&mut rng).map(|m| m.name.as_str()) == Some("Orc") {
                orcs += 1;
            }
        }
        assert!(orcs > 700 && orcs < 900, "orcs = {orcs}");
    }

    #[test]
    fn empty_monster_table_picks_nothing() {
        let table = Archetypes {
            player: player(),
            monsters: Vec::new(),
        };
        let mut rng = create_rng(1);
        assert!(table.pick_monster(&mut rng).is_none());
    }
}
