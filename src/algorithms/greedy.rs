use crate::algorithms::common::{Frontier, MinQueue};
use crate::grid::Position;

/// Greedy best-first: always pops the cell closest to the goal by
/// Manhattan distance, ignoring how far it is from the start.
#[derive(Debug)]
pub struct Greedy {
    goal: Position,
    queue: MinQueue,
}

impl Greedy {
    pub fn new(goal: Position) -> Self {
        Greedy {
            goal,
            queue: MinQueue::default(),
        }
    }
}

impl Frontier for Greedy {
    fn seed(&mut self, start: Position) {
        self.queue.push(start.manhattan(&self.goal), start);
    }

    fn pop(&mut self) -> Option<Position> {
        self.queue.pop()
    }

    fn extend(&mut self, _current: Position, discovered: &[Position]) {
        for &pos in discovered {
            self.queue.push(pos.manhattan(&self.goal), pos);
        }
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_to_goal_first() {
        let goal = Position::new(4, 0);
        let mut f = Greedy::new(goal);
        f.seed(Position::new(2, 2));
        f.pop();

        f.extend(
            Position::new(2, 2),
            &[
                Position::new(1, 2),
                Position::new(3, 2),
                Position::new(2, 1),
                Position::new(2, 3),
            ],
        );
        // (3,2) and (2,1) tie at distance 3; the earlier direction wins.
        assert_eq!(f.pop(), Some(Position::new(3, 2)));
        assert_eq!(f.pop(), Some(Position::new(2, 1)));
        assert_eq!(f.pop(), Some(Position::new(1, 2)));
        assert_eq!(f.pop(), Some(Position::new(2, 3)));
    }
}
