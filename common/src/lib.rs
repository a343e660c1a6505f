pub mod config;
pub mod games;
pub mod logger;
pub mod media;
pub mod render;

pub use games::snake::{Direction, GameEvent, GameSnapshot, GameStatus, PlayMode, Point};
