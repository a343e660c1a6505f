use std::time::Duration;
use tokio::time::Instant;

use crate::log;
use crate::games::SessionRng;
use super::events::GameEvent;
use super::grid::Grid;
use super::pathfinder::Pathfinder;
use super::settings::SnakeSessionSettings;
use super::snake::Snake;
use super::snapshot::GameSnapshot;
use super::types::{CollisionKind, Direction, GameStatus, PlayMode, Point};

pub const INITIAL_DIRECTION: Direction = Direction::Up;
const MIN_GRID_SIZE: i32 = 5;

/// The whole simulation for one player. Only the session task mutates it.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    grid: Grid,
    snake: Snake,
    food: Point,
    direction: Direction,
    pending_direction: Direction,
    lives: u32,
    score: u32,
    status: GameStatus,
    mode: PlayMode,
    flash_until: Option<Instant>,
    initial_lives: u32,
    flash_duration: Duration,
}

impl SnakeGameState {
    pub fn new(settings: &SnakeSessionSettings, rng: &mut SessionRng) -> Self {
        let grid = Grid::new(settings.grid_size.max(MIN_GRID_SIZE));
        let mut state = Self {
            grid,
            snake: Snake::new(grid.center(), INITIAL_DIRECTION),
            food: Point::new(0, 0),
            direction: INITIAL_DIRECTION,
            pending_direction: INITIAL_DIRECTION,
            lives: settings.initial_lives,
            score: 0,
            status: GameStatus::Idle,
            mode: settings.initial_mode,
            flash_until: None,
            initial_lives: settings.initial_lives.max(1),
            flash_duration: settings.flash_duration,
        };
        state.place_food(rng);
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Begins a fresh episode: full lives, zero score, initial snake.
    pub fn start_game(&mut self, rng: &mut SessionRng) {
        self.lives = self.initial_lives;
        self.score = 0;
        self.flash_until = None;
        self.reset_snake();
        self.place_food(rng);
        self.status = GameStatus::Playing;
        log!(
            "New game: lives={}, mode={:?}, food at ({}, {})",
            self.lives,
            self.mode,
            self.food.x,
            self.food.y
        );
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
    }

    pub fn pause(&mut self) -> Result<(), String> {
        if self.status != GameStatus::Playing {
            return Err(format!("Cannot pause while {:?}", self.status));
        }
        self.status = GameStatus::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), String> {
        if self.status != GameStatus::Paused {
            return Err(format!("Cannot resume while {:?}", self.status));
        }
        self.status = GameStatus::Playing;
        Ok(())
    }

    /// Queues a manual turn for the next step. The reverse check is against
    /// the direction committed by the previous step, not the queued one.
    pub fn set_pending_direction(&mut self, direction: Direction) -> Result<(), String> {
        if self.mode.is_autonomous() {
            return Err("Manual input is ignored in autonomous mode".to_string());
        }
        if direction.is_opposite(&self.direction) {
            return Err(format!(
                "Cannot reverse from {:?} to {:?}",
                self.direction, direction
            ));
        }
        self.pending_direction = direction;
        Ok(())
    }

    /// Asks the pathfinder for the next move using the pre-step body and food.
    /// On `None` the pending direction is left as is and the step collides.
    pub fn steer_autonomously(&mut self) -> Option<Direction> {
        let direction = Pathfinder::next_direction(&self.grid, &self.snake, self.food);
        if let Some(direction) = direction {
            self.pending_direction = direction;
        }
        direction
    }

    /// Advances one tick. Does nothing unless the game is playing.
    pub fn step(&mut self, now: Instant, rng: &mut SessionRng) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }

        self.direction = self.pending_direction;
        let next_head = self.snake.head().moved(self.direction);

        if !self.grid.in_bounds(next_head) {
            return self.handle_collision(CollisionKind::Wall, now);
        }
        if self.grid.occupied_by(&self.snake, next_head) {
            return self.handle_collision(CollisionKind::SelfCollision, now);
        }

        let pre_growth_length = self.snake.len() as u32;
        self.snake.push_head(next_head);

        if next_head != self.food {
            self.snake.drop_tail();
            return Vec::new();
        }

        self.score = pre_growth_length.saturating_sub(2) * self.mode.score_multiplier();
        log!(
            "Ate food at ({}, {}). Length: {}, score: {}",
            next_head.x,
            next_head.y,
            self.snake.len(),
            self.score
        );

        let mut events = vec![GameEvent::ScoreUpdated { score: self.score }];
        if !self.place_food(rng) {
            log!("Board is full, ending the game");
            self.status = GameStatus::GameOver;
            events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        }
        events
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid_size: self.grid.size(),
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            direction: self.direction,
            mode: self.mode,
            status: self.status,
            lives: self.lives,
            score: self.score,
            flash_until: self.flash_until,
        }
    }

    fn handle_collision(&mut self, reason: CollisionKind, now: Instant) -> Vec<GameEvent> {
        if self.lives > 1 {
            self.lives -= 1;
            log!("Life lost ({:?}), {} left", reason, self.lives);
            self.reset_snake();
            self.flash_until = Some(now + self.flash_duration);
            return vec![GameEvent::LifeLost {
                lives_remaining: self.lives,
                reason,
            }];
        }

        self.lives = 0;
        self.status = GameStatus::GameOver;
        log!("Last life lost ({:?}). Final score: {}", reason, self.score);
        vec![
            GameEvent::LifeLost {
                lives_remaining: 0,
                reason,
            },
            GameEvent::GameOver {
                final_score: self.score,
            },
        ]
    }

    fn reset_snake(&mut self) {
        self.snake = Snake::new(self.grid.center(), INITIAL_DIRECTION);
        self.direction = INITIAL_DIRECTION;
        self.pending_direction = INITIAL_DIRECTION;
    }

    /// Rejection-samples a free cell. Returns `false` when the snake covers
    /// the whole board.
    fn place_food(&mut self, rng: &mut SessionRng) -> bool {
        if self.snake.len() >= self.grid.cell_count() {
            return false;
        }

        let size = self.grid.size();
        loop {
            let candidate = Point::new(rng.random_range(0..size), rng.random_range(0..size));
            if !self.grid.occupied_by(&self.snake, candidate) {
                self.food = candidate;
                log!("Food spawned at ({}, {})", candidate.x, candidate.y);
                return true;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, segments: &[Point], direction: Direction) {
        self.snake = Snake::from_segments(segments.iter().copied());
        self.direction = direction;
        self.pending_direction = direction;
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }
}
