use crate::algorithms::common::Frontier;
use crate::grid::Position;
use std::collections::VecDeque;

/// Breadth-first: a FIFO queue, so cells come out in discovery order.
#[derive(Debug, Default)]
pub struct Bfs {
    queue: VecDeque<Position>,
}

impl Bfs {
    pub fn new() -> Self {
        Bfs::default()
    }
}

impl Frontier for Bfs {
    fn seed(&mut self, start: Position) {
        self.queue.push_back(start);
    }

    fn pop(&mut self) -> Option<Position> {
        self.queue.pop_front()
    }

    fn extend(&mut self, _current: Position, discovered: &[Position]) {
        self.queue.extend(discovered.iter().copied());
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_insertion_order() {
        let mut f = Bfs::new();
        f.seed(Position::new(1, 1));
        assert_eq!(f.pop(), Some(Position::new(1, 1)));

        f.extend(
            Position::new(1, 1),
            &[Position::new(0, 1), Position::new(2, 1), Position::new(1, 0)],
        );
        assert_eq!(f.len(), 3);
        assert_eq!(f.pop(), Some(Position::new(0, 1)));
        assert_eq!(f.pop(), Some(Position::new(2, 1)));
        assert_eq!(f.pop(), Some(Position::new(1, 0)));
        assert!(f.is_empty());
    }
}
