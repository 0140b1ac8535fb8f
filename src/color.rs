use crate::components::Rgb;

pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

pub const PLAYER_ATK: Rgb = Rgb(0xE0, 0xE0, 0xE0);
pub const ENEMY_ATK: Rgb = Rgb(0xFF, 0xC0, 0xC0);

pub const PLAYER_DIE: Rgb = Rgb(0xFF, 0x30, 0x30);
pub const ENEMY_DIE: Rgb = Rgb(0xFF, 0xA0, 0x30);

pub const WELCOME_TEXT: Rgb = Rgb(0x20, 0xA0, 0xFF);

pub const CORPSE: Rgb = Rgb(191, 0, 0);

// Tile palette: light = in view, dark = remembered.
pub const FLOOR_DARK: Rgb = Rgb(50, 50, 150);
pub const FLOOR_LIGHT: Rgb = Rgb(200, 180, 50);
pub const WALL_DARK: Rgb = Rgb(0, 0, 100);
pub const WALL_LIGHT: Rgb = Rgb(130, 110, 50);
