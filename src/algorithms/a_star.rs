use crate::algorithms::common::{CostMap, Frontier, MinQueue};
use crate::grid::Position;

/// Implements the A* frontier: cells are ordered by `g + h`, where `g` is the
/// step count from the start and `h` the Manhattan distance to the goal.
///
/// Equal `g + h` pops the smaller `g` first, then the older entry. With that
/// order each cell's `g` is final at first discovery, so costs are never
/// lowered and no cell is queued twice.
#[derive(Debug)]
pub struct AStar {
    goal: Position,
    queue: MinQueue,
    costs: CostMap,
}

impl AStar {
    /// Creates a new A* frontier aimed at `goal`.
    pub fn new(goal: Position) -> Self {
        AStar {
            goal,
            queue: MinQueue::default(),
            costs: CostMap::default(),
        }
    }

    /// Cost from the start recorded when `pos` was discovered.
    pub fn cost(&self, pos: &Position) -> Option<u32> {
        self.costs.get(pos).copied()
    }

    fn enqueue(&mut self, pos: Position, g: u32) {
        self.costs.insert(pos, g);
        self.queue.push_with_tie(g + pos.manhattan(&self.goal), g, pos);
    }
}

impl Frontier for AStar {
    fn seed(&mut self, start: Position) {
        self.enqueue(start, 0);
    }

    fn pop(&mut self) -> Option<Position> {
        self.queue.pop()
    }

    fn extend(&mut self, current: Position, discovered: &[Position]) {
        let g = self.costs.get(&current).copied().unwrap_or(0) + 1;
        for &pos in discovered {
            self.enqueue(pos, g);
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
    fn orders_by_cost_plus_heuristic() {
        let goal = Position::new(3, 0);
        let mut f = AStar::new(goal);
        let start = Position::new(0, 0);
        f.seed(start);
        assert_eq!(f.pop(), Some(start));

        let right = Position::new(1, 0);
        let down = Position::new(0, 1);
        f.extend(start, &[right, down]);
        assert_eq!(f.cost(&right), Some(1));
        assert_eq!(f.cost(&down), Some(1));

        // right: 1 + 2 = 3, down: 1 + 4 = 5
        assert_eq!(f.pop(), Some(right));

        let next = Position::new(2, 0);
        f.extend(right, &[next]);
        assert_eq!(f.cost(&next), Some(2));
        assert_eq!(f.pop(), Some(next));
        assert_eq!(f.pop(), Some(down));
    }

    #[test]
    fn equal_totals_pop_the_shallower_cell_first() {
        let goal = Position::new(3, 0);
        let mut f = AStar::new(goal);
        let start = Position::new(0, 0);
        f.seed(start);
        f.pop();

        // deep: g = 2, h = 3; shallow: g = 1, h = 4. Both total 5.
        let parent = Position::new(1, 2);
        let deep = Position::new(1, 1);
        let shallow = Position::new(0, 1);
        f.costs.insert(parent, 1);
        f.extend(parent, &[deep]);
        f.extend(start, &[shallow]);

        assert_eq!(f.pop(), Some(shallow));
        assert_eq!(f.pop(), Some(deep));
        assert_eq!(f.cost(&deep), Some(2));
    }
}
