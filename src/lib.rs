pub mod actions;
pub mod archetypes;
pub mod color;
pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod fov;
pub mod game_map;
pub mod loading;
pub mod message_log;
pub mod pathfinding;
pub mod procgen;
pub mod render;
pub mod rng;
pub mod systems;
pub mod tile_map;
pub mod world;
