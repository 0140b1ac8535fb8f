use serde::Deserialize;

use crate::procgen::DungeonParams;
use crate::world::{CROWD_PENALTY, FOV_RADIUS, Tuning};

/// Smallest room edge that still leaves floor inside the walls.
pub const MIN_ROOM_SIZE: i32 = 3;
pub const MAX_FOV_RADIUS: i32 = 100;
pub const MAX_CROWD_PENALTY: i32 = 1000;

/// Session settings. Every field is optional in the file; missing fields
/// keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    pub map_width: usize,
    pub map_height: usize,
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_monsters_per_room: u32,
    pub fov_radius: i32,
    pub crowd_penalty: i32,
    pub archetypes_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let dungeon = DungeonParams::default();
        Self {
            seed: 42,
            map_width: dungeon.map_width,
            map_height: dungeon.map_height,
            max_rooms: dungeon.max_rooms,
            room_min_size: dungeon.room_min_size,
            room_max_size: dungeon.room_max_size,
            max_monsters_per_room: dungeon.max_monsters_per_room,
            fov_radius: FOV_RADIUS,
            crowd_penalty: CROWD_PENALTY,
            archetypes_path: "data/monsters.kdl".to_string(),
        }
    }
}

impl GameConfig {
    /// Generator parameters with room bounds repaired: both edges at least
    /// `MIN_ROOM_SIZE`, and max never below min.
    pub fn dungeon_params(&self) -> DungeonParams {
        let room_min_size = self.room_min_size.max(MIN_ROOM_SIZE);
        DungeonParams {
            max_rooms: self.max_rooms,
            room_min_size,
            room_max_size: self.room_max_size.max(room_min_size),
            map_width: self.map_width,
            map_height: self.map_height,
            max_monsters_per_room: self.max_monsters_per_room,
        }
    }

    pub fn tuning(&self) -> Tuning {
        Tuning {
            fov_radius: self.fov_radius.clamp(0, MAX_FOV_RADIUS),
            crowd_penalty: self.crowd_penalty.clamp(0, MAX_CROWD_PENALTY),
        }
    }
}

/// Parse a config from RON text.
pub fn parse_config(content: &str) -> Result<GameConfig, ron::error::SpannedError> {
    ron::from_str::<GameConfig>(content)
}

/// Load session config from a RON file. Logs a warning and returns the
/// defaults if the file is missing or malformed.
pub fn load_config(path: &str) -> GameConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default config", path, e);
            return GameConfig::default();
        }
    };
    match parse_config(&content) {
        Ok(config) => {
            log::info!("loaded config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("failed to parse RON {}: {}, using default config", path, e);
            GameConfig::default()
        }
    }
}
