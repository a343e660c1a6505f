use std::collections::{HashSet, VecDeque};

use super::grid::Grid;
use super::snake::Snake;
use super::types::{Direction, Point};

/// Chooses the autonomous snake's next move. Stateless between calls.
pub struct Pathfinder;

impl Pathfinder {
    /// First move of a shortest path from the head to `target`, or a safe
    /// move when the target cannot be reached. `None` means every
    /// neighbouring cell is blocked.
    pub fn next_direction(grid: &Grid, snake: &Snake, target: Point) -> Option<Direction> {
        Self::first_step_towards(grid, snake, target).or_else(|| Self::safe_move(grid, snake))
    }

    /// Breadth-first search treating every snake cell as a wall. Each queued
    /// cell carries the first direction of the path that reached it.
    pub fn first_step_towards(grid: &Grid, snake: &Snake, target: Point) -> Option<Direction> {
        let head = snake.head();
        let mut visited: HashSet<Point> = HashSet::with_capacity(grid.cell_count());
        let mut queue: VecDeque<(Point, Option<Direction>)> = VecDeque::new();

        visited.insert(head);
        queue.push_back((head, None));

        while let Some((point, first)) = queue.pop_front() {
            if point == target {
                return first;
            }

            for direction in Direction::ALL {
                let Some(next) = grid.open_neighbor(snake, point, direction) else {
                    continue;
                };
                if visited.insert(next) {
                    queue.push_back((next, first.or(Some(direction))));
                }
            }
        }

        None
    }

    pub fn safe_move(grid: &Grid, snake: &Snake) -> Option<Direction> {
        let head = snake.head();
        Direction::ALL
            .into_iter()
            .find(|&direction| grid.open_neighbor(snake, head, direction).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::default()
    }

    fn follow(grid: &Grid, snake: &mut Snake, target: Point, max_steps: usize) -> Option<usize> {
        for step in 1..=max_steps {
            let direction = Pathfinder::next_direction(grid, snake, target)?;
            let head = snake.head().moved(direction);
            assert!(grid.in_bounds(head));
            assert!(!snake.contains(head));
            snake.push_head(head);
            if head == target {
                return Some(step);
            }
            snake.drop_tail();
        }
        None
    }

    #[test]
    fn test_straight_line_goes_up() {
        let snake = Snake::new(Point::new(11, 11), Direction::Up);
        assert_eq!(
            Pathfinder::next_direction(&grid(), &snake, Point::new(11, 5)),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_ties_prefer_up_then_down_then_left_then_right() {
        let snake = Snake::new(Point::new(5, 5), Direction::Right);
        assert_eq!(
            Pathfinder::next_direction(&grid(), &snake, Point::new(6, 4)),
            Some(Direction::Up)
        );
        assert_eq!(
            Pathfinder::next_direction(&grid(), &snake, Point::new(6, 6)),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_open_board_reaches_food_in_manhattan_steps() {
        let grid = grid();
        let mut snake = Snake::new(Point::new(11, 11), Direction::Up);
        let target = Point::new(3, 2);
        let steps = follow(&grid, &mut snake, target, 100);
        assert_eq!(steps, Some(8 + 9));
    }

    #[test]
    fn test_routes_around_own_body() {
        let grid = grid();
        // Head at (5,5) facing up; the food sits directly behind the body.
        let mut snake = Snake::from_segments([
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(5, 7),
            Point::new(5, 8),
        ]);
        let target = Point::new(5, 9);
        // Around the body: one step sideways, four down, one back.
        assert_eq!(follow(&grid, &mut snake, target, 50), Some(6));
    }

    #[test]
    fn test_enclosed_food_falls_back_to_open_neighbor() {
        let grid = grid();
        // Food in the corner (0,0) is sealed off by the body.
        let snake = Snake::from_segments([
            Point::new(2, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
        ]);
        let target = Point::new(0, 0);

        assert_eq!(Pathfinder::first_step_towards(&grid, &snake, target), None);
        assert_eq!(Pathfinder::next_direction(&grid, &snake, target), Some(Direction::Down));
    }

    #[test]
    fn test_no_safe_move_when_boxed_in() {
        let grid = grid();
        // Head in the corner with both neighbours taken by the body.
        let snake = Snake::from_segments([
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
        ]);
        assert_eq!(Pathfinder::next_direction(&grid, &snake, Point::new(10, 10)), None);
        assert_eq!(Pathfinder::safe_move(&grid, &snake), None);
    }
}
