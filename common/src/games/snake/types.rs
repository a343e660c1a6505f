use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Expansion order used wherever directions are tried one after another.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayMode {
    Manual,
    Autonomous,
}

impl PlayMode {
    pub fn score_multiplier(&self) -> u32 {
        match self {
            PlayMode::Manual => 20,
            PlayMode::Autonomous => 5,
        }
    }

    pub fn is_autonomous(&self) -> bool {
        matches!(self, PlayMode::Autonomous)
    }

    pub fn toggled(&self) -> Self {
        match self {
            PlayMode::Manual => PlayMode::Autonomous,
            PlayMode::Autonomous => PlayMode::Manual,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickIntervals {
    pub manual: Duration,
    pub autonomous: Duration,
}

impl TickIntervals {
    pub fn for_mode(&self, mode: PlayMode) -> Duration {
        match mode {
            PlayMode::Manual => self.manual,
            PlayMode::Autonomous => self.autonomous,
        }
    }
}

impl Default for TickIntervals {
    fn default() -> Self {
        Self {
            manual: Duration::from_millis(600),
            autonomous: Duration::from_millis(100),
        }
    }
}
