pub mod asset;
pub mod game;
pub mod map;
pub mod math;
pub mod network;

pub const TILE_SIZE: f32 = 16.0;

pub const GRAVITY: f32 = 0.125;
pub const JUMP_FORCE: f32 = -4.0;
pub const MOVEMENT_SPEED: f32 = 1.25;

/// Logical resolution the game is simulated and drawn at, before letterboxing.
pub const GAME_WIDTH: f32 = 640.0;
pub const GAME_HEIGHT: f32 = 360.0;

pub const CAMERA_SMOOTHNESS: f32 = 0.1;
pub const PLAYER_FRAME_DURATION: u32 = 11;

/// Simulation ticks per second; one tick is one rendered frame.
pub const TICK_RATE: u32 = 60;

pub const DEFAULT_PORT: u16 = 3000;
