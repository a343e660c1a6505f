use tokio::time::Instant;

use super::types::{Direction, GameStatus, PlayMode, Point};

/// Read-only copy of the simulation handed to renderers and the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub grid_size: i32,
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub mode: PlayMode,
    pub status: GameStatus,
    pub lives: u32,
    pub score: u32,
    pub flash_until: Option<Instant>,
}

impl GameSnapshot {
    pub fn is_flashing(&self, now: Instant) -> bool {
        self.flash_until.is_some_and(|until| now < until)
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }
}
