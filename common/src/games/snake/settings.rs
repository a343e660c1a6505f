use std::time::Duration;

use super::grid::GRID_SIZE;
use super::types::{PlayMode, TickIntervals};

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSessionSettings {
    pub grid_size: i32,
    pub initial_lives: u32,
    pub flash_duration: Duration,
    pub tick_intervals: TickIntervals,
    pub initial_mode: PlayMode,
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_lives: 3,
            flash_duration: Duration::from_millis(400),
            tick_intervals: TickIntervals::default(),
            initial_mode: PlayMode::Manual,
        }
    }
}
