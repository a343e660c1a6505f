use super::snake::Snake;
use super::types::{Direction, Point};

pub const GRID_SIZE: i32 = 22;

/// Square board of `size` x `size` cells. Everything outside is wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: i32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        (self.size * self.size) as usize
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2, self.size / 2)
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.size && p.y >= 0 && p.y < self.size
    }

    pub fn occupied_by(&self, snake: &Snake, p: Point) -> bool {
        snake.contains(p)
    }

    /// In-bounds neighbour of `p` that the snake does not cover.
    pub fn open_neighbor(&self, snake: &Snake, p: Point, direction: Direction) -> Option<Point> {
        let next = p.moved(direction);
        (self.in_bounds(next) && !self.occupied_by(snake, next)).then_some(next)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = Grid::default();
        assert!(grid.in_bounds(Point::new(0, 0)));
        assert!(grid.in_bounds(Point::new(21, 21)));
        assert!(!grid.in_bounds(Point::new(22, 0)));
        assert!(!grid.in_bounds(Point::new(0, -1)));
        assert_eq!(grid.cell_count(), 484);
    }

    #[test]
    fn test_occupancy_and_open_neighbor() {
        let grid = Grid::default();
        let snake = Snake::new(grid.center(), Direction::Up);

        assert!(grid.occupied_by(&snake, Point::new(11, 12)));
        assert!(!grid.occupied_by(&snake, Point::new(11, 10)));
        assert_eq!(grid.open_neighbor(&snake, Point::new(11, 11), Direction::Down), None);
        assert_eq!(
            grid.open_neighbor(&snake, Point::new(11, 11), Direction::Up),
            Some(Point::new(11, 10))
        );
        assert_eq!(grid.open_neighbor(&snake, Point::new(0, 0), Direction::Left), None);
    }
}
