use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

pub const INITIAL_LENGTH: usize = 3;

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Head at `start_pos`, remaining segments trailing away from `direction`.
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let segments = (0..INITIAL_LENGTH as i32)
            .map(|i| Point::new(start_pos.x - dx * i, start_pos.y - dy * i));
        Self::from_segments(segments)
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Self {
        let body: VecDeque<Point> = segments.into_iter().collect();
        let body_set = body.iter().copied().collect();
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.body_set.contains(&p)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    pub fn drop_tail(&mut self) {
        if let Some(tail) = self.body.pop_back() {
            self.body_set.remove(&tail);
        }
    }
}
